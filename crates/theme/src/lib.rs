pub mod colors;

pub use colors::{Color, ColorError};
