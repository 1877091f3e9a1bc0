//! Application orchestration: state, input handling and host actions.

pub mod catalog_runtime;
pub mod event;
pub mod handler;
pub mod host;
pub mod settings;
pub mod state;
