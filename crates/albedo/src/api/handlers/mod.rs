//! HTTP handlers, grouped by concern.

pub mod reflection;
pub mod system;
