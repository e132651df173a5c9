use crate::schema::{BarConfig, Geometry};
use lexopt::Arg::{Long, Short, Value};
use lexopt::Arg;
use limebar_core::{ConfigError, Result};
use limebar_theme::Color;
use std::cell::Cell;
use std::ffi::OsString;
use std::rc::Rc;
use tracing::{debug, trace};

/// One recognised option: its short and long spellings, the value it takes
/// (if any, as shown in the usage text) and a help line.
#[derive(Debug, Clone, Copy)]
pub struct Flag {
    pub short: char,
    pub long:  &'static str,
    /// Extra long spellings accepted for the same option.
    pub aliases: &'static [&'static str],
    pub value: Option<&'static str>,
    pub help:  &'static str,
}

/// Every option the bar understands, in usage order.
pub const FLAGS: &[Flag] = &[
    Flag { short: 'h', long: "help",            aliases: &[],             value: None,             help: "Show this help message and exit" },
    Flag { short: 'g', long: "geometry",        aliases: &[],             value: Some("WxH+X+Y"),  help: "Set the window geometry; omitted parts keep their default" },
    Flag { short: 'o', long: "output",          aliases: &[],             value: Some("NAME"),     help: "Draw on output NAME; repeatable, order is significant" },
    Flag { short: 'b', long: "bottom",          aliases: &[],             value: None,             help: "Dock the bar at the bottom of the screen" },
    Flag { short: 'd', long: "force-dock",      aliases: &[],             value: None,             help: "Force docking without asking the window manager" },
    Flag { short: 'f', long: "font",            aliases: &[],             value: Some("FONT"),     help: "Add a font; repeatable, earlier fonts take priority" },
    Flag { short: 'p', long: "permanent",       aliases: &[],             value: None,             help: "Keep running after standard input is closed" },
    Flag { short: 'n', long: "name",            aliases: &[],             value: Some("NAME"),     help: "Set the WM_NAME of the bar window" },
    Flag { short: 'u', long: "underline",       aliases: &[],             value: Some("PIXELS"),   help: "Underline width in pixels (default: 1)" },
    Flag { short: 'B', long: "background",      aliases: &[],             value: Some("COLOR"),    help: "Background color (#aarrggbb, #rrggbb or #rgb)" },
    Flag { short: 'F', long: "foreground",      aliases: &["text-color"], value: Some("COLOR"),    help: "Foreground color, same formats as -B" },
    Flag { short: 'U', long: "underline-color", aliases: &[],             value: Some("COLOR"),    help: "Underline color, same formats as -B" },
];

impl Flag {
    fn by_short(c: char) -> Option<&'static Flag> {
        FLAGS.iter().find(|f| f.short == c)
    }

    fn by_long(name: &str) -> Option<&'static Flag> {
        FLAGS
            .iter()
            .find(|f| f.long == name || f.aliases.contains(&name))
    }
}

/// Parse an argument vector (without the program name) into a [`BarConfig`].
///
/// The first problem aborts the whole parse.  `-h` short-circuits with
/// [`ConfigError::HelpRequested`].
pub fn parse<I>(args: I) -> Result<BarConfig>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    scan(args.into_iter().map(Into::into).collect())
}

/// Parse the current process's arguments.
pub fn parse_env() -> Result<BarConfig> {
    scan(std::env::args_os().skip(1).collect())
}

/// Flags shared between [`scan`] and the [`Source`] feeding lexopt.
#[derive(Debug, Default)]
struct Watch {
    scanning:   Cell<bool>,
    terminator: Cell<bool>,
}

/// Argument source that records a bare `--` pulled while lexopt is looking
/// for the next option.  lexopt would otherwise treat it as end-of-options;
/// a `--` taken as a flag's value is not recorded.
struct Source {
    args:  std::vec::IntoIter<OsString>,
    watch: Rc<Watch>,
}

impl Iterator for Source {
    type Item = OsString;

    fn next(&mut self) -> Option<OsString> {
        let arg = self.args.next()?;
        if self.watch.scanning.get() && arg == "--" {
            self.watch.terminator.set(true);
        }
        Some(arg)
    }
}

fn scan(args: Vec<OsString>) -> Result<BarConfig> {
    let watch = Rc::new(Watch::default());
    let mut parser = lexopt::Parser::from_args(Source {
        args:  args.into_iter(),
        watch: Rc::clone(&watch),
    });
    let mut config = BarConfig::default();

    loop {
        watch.scanning.set(true);
        let next = parser.next();
        watch.scanning.set(false);

        if watch.terminator.get() {
            return Err(ConfigError::UnknownOption("--".into()));
        }
        let Some(arg) = next.map_err(from_lexopt)? else {
            break;
        };
        let flag = spelling(&arg);
        trace!(flag = %flag, "option");

        match arg {
            Short('h') | Long("help") => return Err(ConfigError::HelpRequested),

            Short('g') | Long("geometry") => {
                let raw = value(&mut parser, &flag)?;
                config.geometry = raw
                    .parse::<Geometry>()
                    .map_err(|e| ConfigError::invalid(&flag, &raw, e))?;
            }
            Short('o') | Long("output") => {
                config.outputs.push(value(&mut parser, &flag)?);
            }
            Short('b') | Long("bottom") => config.dock_bottom = true,
            Short('d') | Long("force-dock") => config.force_dock = true,
            Short('f') | Long("font") => {
                config.fonts.push(value(&mut parser, &flag)?);
            }
            Short('p') | Long("permanent") => config.permanent = true,
            Short('n') | Long("name") => {
                let raw = value(&mut parser, &flag)?;
                if raw.is_empty() {
                    return Err(ConfigError::invalid(&flag, raw, "window name must not be empty"));
                }
                config.window_name = Some(raw);
            }
            Short('u') | Long("underline") => {
                let raw = value(&mut parser, &flag)?;
                config.underline_width_px = raw
                    .parse::<u32>()
                    .map_err(|_| ConfigError::invalid(&flag, &raw, "expected a non-negative integer"))?;
            }
            Short('B') | Long("background") => {
                config.background_color = Some(color(&mut parser, &flag)?);
            }
            Short('F') | Long("foreground") | Long("text-color") => {
                config.foreground_color = Some(color(&mut parser, &flag)?);
            }
            Short('U') | Long("underline-color") => {
                config.underline_color = Some(color(&mut parser, &flag)?);
            }

            Short(_) | Long(_) | Value(_) => return Err(ConfigError::UnknownOption(flag)),
        }
    }

    debug!(
        outputs = config.outputs.len(),
        fonts = config.fonts.len(),
        dock_bottom = config.dock_bottom,
        "parsed bar configuration"
    );
    Ok(config)
}

/// The token as the user wrote it, for error messages.
fn spelling(arg: &Arg<'_>) -> String {
    match arg {
        Short(c) => format!("-{c}"),
        Long(name) => format!("--{name}"),
        Value(v) => v.to_string_lossy().into_owned(),
    }
}

/// Take the value for `flag`: an attached one (`-gWxH`, `--font=x`) or the
/// next argument.  A following token that is itself an option means the
/// value is missing; other dash-led tokens (`-1`) are taken as values.
fn value(parser: &mut lexopt::Parser, flag: &str) -> Result<String> {
    let raw = match parser.optional_value() {
        Some(attached) => attached,
        None => {
            let next = parser
                .value()
                .map_err(|_| ConfigError::MissingValue(flag.to_string()))?;
            if is_option(&next) {
                return Err(ConfigError::MissingValue(flag.to_string()));
            }
            next
        }
    };

    raw.into_string().map_err(|raw| {
        ConfigError::invalid(flag, raw.to_string_lossy(), "not valid UTF-8")
    })
}

fn color(parser: &mut lexopt::Parser, flag: &str) -> Result<Color> {
    let raw = value(parser, flag)?;
    Color::from_hex(&raw).map_err(|e| ConfigError::invalid(flag, &raw, e))
}

fn is_option(token: &OsString) -> bool {
    let Some(token) = token.to_str() else {
        return false;
    };

    if let Some(long) = token.strip_prefix("--") {
        let name = long.split_once('=').map_or(long, |(name, _)| name);
        return Flag::by_long(name).is_some();
    }

    token
        .strip_prefix('-')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| Flag::by_short(c).is_some())
}

fn from_lexopt(err: lexopt::Error) -> ConfigError {
    match err {
        lexopt::Error::MissingValue { option } => {
            ConfigError::MissingValue(option.unwrap_or_default())
        }
        lexopt::Error::UnexpectedValue { option, value } => {
            ConfigError::invalid(option, value.to_string_lossy(), "option takes no value")
        }
        lexopt::Error::UnexpectedOption(option) => ConfigError::UnknownOption(option),
        lexopt::Error::UnexpectedArgument(arg) => {
            ConfigError::UnknownOption(arg.to_string_lossy().into_owned())
        }
        lexopt::Error::NonUnicodeValue(value) => {
            let lossy = value.to_string_lossy().into_owned();
            ConfigError::invalid(lossy.clone(), lossy, "not valid UTF-8")
        }
        other => ConfigError::UnknownOption(other.to_string()),
    }
}

/// Usage text, one line per entry in [`FLAGS`].
pub fn usage(program: &str) -> String {
    let mut out = format!("Usage: {program} [options]\n\nOptions:\n");

    for flag in FLAGS {
        let left = match flag.value {
            Some(v) => format!("-{}, --{} {v}", flag.short, flag.long),
            None => format!("-{}, --{}", flag.short, flag.long),
        };
        out.push_str(&format!("  {left:<32} {}\n", flag.help));
        for alias in flag.aliases {
            out.push_str(&format!("  {:<32} alias of --{}\n", format!("--{alias}"), flag.long));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(args: &[&str]) -> Result<BarConfig> {
        parse(args.iter().copied())
    }

    #[test]
    fn flag_table_has_no_duplicates() {
        for (i, a) in FLAGS.iter().enumerate() {
            for b in &FLAGS[i + 1..] {
                assert_ne!(a.short, b.short);
                assert_ne!(a.long, b.long);
            }
        }
    }

    #[test]
    fn usage_lists_every_flag() {
        let text = usage("limebar");
        assert!(text.starts_with("Usage: limebar [options]"));
        for flag in FLAGS {
            assert!(text.contains(&format!("-{},", flag.short)), "missing -{}", flag.short);
            assert!(text.contains(&format!("--{}", flag.long)));
        }
    }

    #[test]
    fn attached_values() {
        let cfg = parse_str(&["-g100x20", "-u=3", "--name=top", "-B#fff"]).unwrap();
        assert_eq!(cfg.geometry.width, Some(100));
        assert_eq!(cfg.underline_width_px, 3);
        assert_eq!(cfg.window_name.as_deref(), Some("top"));
        assert_eq!(cfg.background_color, Some(Color::WHITE));
    }

    #[test]
    fn clustered_switches() {
        let cfg = parse_str(&["-bdp"]).unwrap();
        assert!(cfg.dock_bottom && cfg.force_dock && cfg.permanent);
    }

    #[test]
    fn cluster_ending_in_value_flag_takes_next_arg() {
        let cfg = parse_str(&["-bf", "Terminus"]).unwrap();
        assert!(cfg.dock_bottom);
        assert_eq!(cfg.fonts, ["Terminus"]);
    }

    #[test]
    fn following_option_is_missing_value() {
        assert_eq!(
            parse_str(&["-B", "-F", "#000"]),
            Err(ConfigError::MissingValue("-B".into()))
        );
        assert_eq!(
            parse_str(&["--font", "--permanent"]),
            Err(ConfigError::MissingValue("--font".into()))
        );
    }

    #[test]
    fn dash_led_non_option_is_a_value() {
        let cfg = parse_str(&["-o", "-"]).unwrap();
        assert_eq!(cfg.outputs, ["-"]);
    }

    #[test]
    fn switch_with_value_is_rejected() {
        assert!(matches!(
            parse_str(&["--bottom=yes"]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    /// A value that every flag in the table accepts.
    fn sample_value(short: char) -> &'static str {
        match short {
            'g' => "x20",
            'u' => "2",
            'B' | 'F' | 'U' => "#fff",
            _ => "sample",
        }
    }

    #[test]
    fn every_table_spelling_is_dispatched() {
        for flag in FLAGS {
            let longs = std::iter::once(flag.long).chain(flag.aliases.iter().copied());
            let spellings = std::iter::once(format!("-{}", flag.short))
                .chain(longs.map(|long| format!("--{long}")));

            for spelling in spellings {
                let mut args = vec![spelling.clone()];
                if flag.value.is_some() {
                    args.push(sample_value(flag.short).to_string());
                }
                let result = parse(args);
                if flag.short == 'h' {
                    assert_eq!(result, Err(ConfigError::HelpRequested), "{spelling}");
                } else {
                    assert!(result.is_ok(), "{spelling}: {result:?}");
                }
            }
        }
    }

    #[test]
    fn text_color_is_foreground() {
        let cfg = parse_str(&["--text-color", "#000"]).unwrap();
        assert_eq!(cfg.foreground_color, Some(Color::BLACK));
        assert!(usage("limebar").contains("--text-color"));
    }

    #[test]
    fn non_unicode_lexopt_error_is_invalid_value() {
        let err = from_lexopt(lexopt::Error::NonUnicodeValue(OsString::from("x")));
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref reason, .. } if reason == "not valid UTF-8"
        ));
    }

    #[test]
    fn positional_is_unknown() {
        assert_eq!(
            parse_str(&["stray"]),
            Err(ConfigError::UnknownOption("stray".into()))
        );
        assert_eq!(
            parse_str(&["--bogus"]),
            Err(ConfigError::UnknownOption("--bogus".into()))
        );
    }
}
