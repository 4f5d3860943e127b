//! Output formatting

pub mod list;

pub use list::{render_human, render_json};
