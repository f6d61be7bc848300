pub mod args;
pub mod commands;
mod reporting;
