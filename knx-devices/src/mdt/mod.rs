//! MDT devices
//!
//! Both variants share one text layout: a panel of [`WIDTH`] columns framed
//! with [`BORDER`] lines, rows separated by [`HSEP`] lines.

mod binary_interface;
mod glass_push_button;

pub use binary_interface::BinaryInterface;
pub use glass_push_button::{GlassPushButton, PanelLayout};

/// Width of the description column
pub const WIDTH: usize = 50;
/// Vertical separator
pub const VSEP: char = '|';
/// Horizontal separator between rows
pub const HSEP: char = '-';
/// Top and bottom border
pub const BORDER: char = '=';

fn repeat(c: char, count: usize) -> String {
    std::iter::repeat(c).take(count).collect()
}
