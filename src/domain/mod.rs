pub mod command_log;
pub mod commands;
pub mod models;
pub mod settings;
