pub mod api;
pub mod auth;
pub mod cli;
pub mod collect;
pub mod config;
pub mod redact;
pub mod ui;
pub mod wipe;
