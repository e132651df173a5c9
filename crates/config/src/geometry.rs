use crate::schema::Geometry;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("'{0}' is out of range")]
    OutOfRange(String),

    #[error("unexpected '{0}', expected [W]x[H][+X][+Y]")]
    Trailing(String),
}

/// Grammar: `[W] ['x' [H]] [('+'|'-') [X]] [('+'|'-') [Y]]`.
///
/// Every component may be left out, including the whole string.  A `-`
/// sign makes the offset negative; an empty offset after its sign stays
/// unset, so `x24++10` sets only the height and `y`.
impl FromStr for Geometry {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, rest) = dimension(s)?;

        let (height, rest) = match rest.strip_prefix('x') {
            Some(after) => dimension(after)?,
            None => (None, rest),
        };

        let (x, rest) = offset(rest)?;
        let (y, rest) = offset(rest)?;

        if !rest.is_empty() {
            return Err(GeometryError::Trailing(rest.to_string()));
        }

        Ok(Self { width, height, x, y })
    }
}

/// Split off the leading run of ASCII digits.
fn digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn dimension(s: &str) -> Result<(Option<u32>, &str), GeometryError> {
    let (num, rest) = digits(s);
    if num.is_empty() {
        return Ok((None, rest));
    }
    let value = num
        .parse()
        .map_err(|_| GeometryError::OutOfRange(num.to_string()))?;
    Ok((Some(value), rest))
}

fn offset(s: &str) -> Result<(Option<i32>, &str), GeometryError> {
    let negative = match s.chars().next() {
        Some('+') => false,
        Some('-') => true,
        _ => return Ok((None, s)),
    };

    let (num, rest) = digits(&s[1..]);
    if num.is_empty() {
        return Ok((None, rest));
    }

    let signed = if negative { format!("-{num}") } else { num.to_string() };
    let value = signed
        .parse()
        .map_err(|_| GeometryError::OutOfRange(signed.clone()))?;
    Ok((Some(value), rest))
}
