pub mod app;
pub mod config;
pub mod logging;
pub mod script;
pub mod surface;
