//! Task-tracking backend: account registration and login with bearer
//! tokens, plus create/list/update/delete of to-do items.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod tasks;
pub mod validation;

#[cfg(test)]
mod testing;


pub use app::{create_router, AppState};
pub use config::Config;
