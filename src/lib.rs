pub mod core;
pub mod exec;
pub mod renderer;
pub mod platform;
pub mod config;
