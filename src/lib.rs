pub mod config;
pub mod controllers;
pub mod dispatch;
pub mod errors;
pub mod event_handling;
pub mod init;
pub mod models;
pub mod movement;
pub mod repositories;
pub mod state_management;
pub mod utils;
