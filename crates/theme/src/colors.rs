use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 8-bit ARGB colour as given on the command line.
///
/// The alpha channel is stored as-is; whether it has any visible effect
/// depends on a compositor being present, which is not our concern here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("colour must start with '#'")]
    MissingHash,

    #[error("expected 3, 6 or 8 hex digits after '#', found {0}")]
    BadLength(usize),

    #[error("'{0}' is not a hex digit")]
    BadDigit(char),
}

impl Color {
    pub const BLACK: Self = Self::opaque(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::opaque(0xff, 0xff, 0xff);
    pub const DARK:  Self = Self::opaque(0x1a, 0x1a, 0x1a);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xff, r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` or `#aarrggbb` (case-insensitive).
    ///
    /// Short `#rgb` digits are widened by ×17, so `#f80` is `#ff8800`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').ok_or(ColorError::MissingHash)?;

        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(bad));
        }

        let byte = |s: &str| u8::from_str_radix(s, 16).unwrap_or_default();
        let nibble = |s: &str| byte(s) * 17;

        match digits.len() {
            3 => Ok(Self::opaque(
                nibble(&digits[0..1]),
                nibble(&digits[1..2]),
                nibble(&digits[2..3]),
            )),
            6 => Ok(Self::opaque(
                byte(&digits[0..2]),
                byte(&digits[2..4]),
                byte(&digits[4..6]),
            )),
            8 => Ok(Self {
                a: byte(&digits[0..2]),
                r: byte(&digits[2..4]),
                g: byte(&digits[4..6]),
                b: byte(&digits[6..8]),
            }),
            n => Err(ColorError::BadLength(n)),
        }
    }

    /// Channels normalised to `[0.0, 1.0]`, in `(r, g, b, a)` order.
    pub fn rgba_f32(self) -> [f32; 4] {
        let f = |c: u8| f32::from(c) / 255.0;
        [f(self.r), f(self.g), f(self.b), f(self.a)]
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 0xff
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Always the full `#aarrggbb` form, so it parses back unchanged.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_expands_each_nibble() {
        assert_eq!(Color::from_hex("#f80"), Ok(Color::opaque(0xff, 0x88, 0x00)));
        assert_eq!(Color::from_hex("#000"), Ok(Color::BLACK));
    }

    #[test]
    fn six_digits_is_opaque() {
        let c = Color::from_hex("#1A2b3C").unwrap();
        assert_eq!((c.a, c.r, c.g, c.b), (0xff, 0x1a, 0x2b, 0x3c));
        assert!(c.is_opaque());
    }

    #[test]
    fn eight_digits_leads_with_alpha() {
        let c = Color::from_hex("#801a2b3c").unwrap();
        assert_eq!((c.a, c.r, c.g, c.b), (0x80, 0x1a, 0x2b, 0x3c));
        assert!(!c.is_opaque());
    }

    #[test]
    fn rejects_other_lengths() {
        for bad in ["#", "#f", "#ff", "#ffff", "#fffff", "#fffffff", "#fffffffff"] {
            let n = bad.len() - 1;
            assert_eq!(Color::from_hex(bad), Err(ColorError::BadLength(n)), "{bad}");
        }
    }

    #[test]
    fn rejects_non_hex_and_missing_hash() {
        assert_eq!(Color::from_hex("#ggg"), Err(ColorError::BadDigit('g')));
        assert_eq!(Color::from_hex("#+ff"), Err(ColorError::BadDigit('+')));
        assert_eq!(Color::from_hex("#ffé"), Err(ColorError::BadDigit('é')));
        assert_eq!(Color::from_hex("ffffff"), Err(ColorError::MissingHash));
    }

    #[test]
    fn display_parses_back() {
        let c = Color::from_hex("#7f102030").unwrap();
        assert_eq!(c.to_string(), "#7f102030");
        assert_eq!(c.to_string().parse::<Color>(), Ok(c));
    }

    #[test]
    fn normalised_channels() {
        assert_eq!(Color::WHITE.rgba_f32(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::from_hex("#00000000").unwrap().rgba_f32(), [0.0; 4]);
    }

    #[test]
    fn serde_uses_hex_string() {
        #[derive(Serialize, Deserialize)]
        struct Wrap {
            color: Color,
        }

        let text = toml::to_string(&Wrap { color: Color::DARK }).unwrap();
        assert_eq!(text.trim(), r##"color = "#ff1a1a1a""##);

        let back: Wrap = toml::from_str(r##"color = "#abc""##).unwrap();
        assert_eq!(back.color, Color::opaque(0xaa, 0xbb, 0xcc));
        assert!(toml::from_str::<Wrap>(r##"color = "#abcd""##).is_err());
    }
}
