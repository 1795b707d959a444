//! User Interface layer for iocview
//!
//! - Theme definitions and colors
//! - Reusable widgets
//! - Main render entry point

pub mod render;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
