//! UI components.

pub mod starfield;
