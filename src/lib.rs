pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;
