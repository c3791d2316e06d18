//! Reusable view components.

pub mod overview;
