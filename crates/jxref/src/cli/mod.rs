//! CLI command implementations.

mod display;

pub mod cycles;
pub mod extensions;
pub mod graph;
pub mod comments;
pub mod hierarchy;
pub mod project;
