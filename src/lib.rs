pub mod cli;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod probe;
pub mod report;
pub mod split;
pub mod split_plan;
pub mod util;
