//! Screens of iocview

pub mod files;
pub mod panel;
