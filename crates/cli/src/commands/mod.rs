//! CLI commands

pub mod check;
