//! Render3 View Module
//!
//! Corresponds to packages/compiler/src/render3/view/

pub mod template;

pub use template::*;
