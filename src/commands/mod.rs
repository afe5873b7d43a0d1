//! CLI commands for mindspark

pub mod config;
pub mod dispatch;
pub mod folders;
pub mod history;
pub mod spark;
