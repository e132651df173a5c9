//! Command-line configuration for the bar.
//!
//! [`parse`] turns an argument vector into a [`BarConfig`]; everything
//! downstream (output selection, font loading, drawing) reads that value.

pub mod args;
pub mod geometry;
pub mod schema;

pub use args::{parse, parse_env, usage, Flag, FLAGS};
pub use geometry::GeometryError;
pub use schema::{
    BarConfig, Geometry, DEFAULT_FONTS, DEFAULT_HEIGHT, DEFAULT_UNDERLINE_WIDTH,
    DEFAULT_WINDOW_NAME,
};

pub use limebar_core::{ConfigError, Result};
pub use limebar_theme::{Color, ColorError};
