use limebar_theme::Color;
use serde::{Deserialize, Serialize};

/// Window name used when `-n` is not given.
pub const DEFAULT_WINDOW_NAME: &str = "limebar";

/// Fonts loaded, in fallback order, when no `-f` is given.
pub const DEFAULT_FONTS: [&str; 2] = ["Monospace 12", "Monospace Bold 12"];

/// Bar height in pixels when the geometry leaves it out.
pub const DEFAULT_HEIGHT: u32 = 24;

pub const DEFAULT_UNDERLINE_WIDTH: u32 = 1;

/// Startup configuration built from the command line.
///
/// Built once by [`crate::parse`] and read-only afterwards.  Unset fields
/// mean "use the tool default"; the `effective_*` accessors resolve them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Monitors to draw on, in order.  Empty = all outputs.
    pub outputs: Vec<String>,
    /// Dock at the bottom of the screen instead of the top.
    pub dock_bottom: bool,
    /// Dock without asking the window manager (non-EWMH WMs).
    pub force_dock: bool,
    /// Fonts in fallback priority order.
    pub fonts: Vec<String>,
    /// Keep running after standard input closes.
    pub permanent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_name: Option<String>,
    pub underline_width_px: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline_color: Option<Color>,
    /// Requested size and position; every component is optional.
    pub geometry: Geometry,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            outputs:            Vec::new(),
            dock_bottom:        false,
            force_dock:         false,
            fonts:              Vec::new(),
            permanent:          false,
            window_name:        None,
            underline_width_px: DEFAULT_UNDERLINE_WIDTH,
            background_color:   None,
            foreground_color:   None,
            underline_color:    None,
            geometry:           Geometry::default(),
        }
    }
}

impl BarConfig {
    pub fn effective_window_name(&self) -> &str {
        self.window_name.as_deref().unwrap_or(DEFAULT_WINDOW_NAME)
    }

    /// The font list to load, falling back to the built-in pair.
    pub fn effective_fonts(&self) -> Vec<&str> {
        if self.fonts.is_empty() {
            DEFAULT_FONTS.to_vec()
        } else {
            self.fonts.iter().map(String::as_str).collect()
        }
    }

    pub fn effective_background(&self) -> Color {
        self.background_color.unwrap_or(Color::DARK)
    }

    pub fn effective_foreground(&self) -> Color {
        self.foreground_color.unwrap_or(Color::WHITE)
    }

    /// Underlines follow the text colour unless `-U` says otherwise.
    pub fn effective_underline(&self) -> Color {
        self.underline_color
            .unwrap_or_else(|| self.effective_foreground())
    }

    /// `true` when the bar should draw on every output.
    #[must_use]
    pub fn all_outputs(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Parsed `[W]x[H][+X][+Y]` string.  `None` components keep the default.
///
/// `y` is recorded raw; combining it with `dock_bottom` (offset from the
/// bottom edge) is up to whoever places the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width:  Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x:      Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y:      Option<i32>,
}

impl Geometry {
    #[must_use]
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Width, or `screen_width` (a full-width bar) when not given.
    pub fn width_or(&self, screen_width: u32) -> u32 {
        self.width.unwrap_or(screen_width)
    }

    pub fn height_or_default(&self) -> u32 {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }

    pub fn x_or_zero(&self) -> i32 {
        self.x.unwrap_or(0)
    }

    pub fn y_or_zero(&self) -> i32 {
        self.y.unwrap_or(0)
    }
}
