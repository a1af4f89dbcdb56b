// File: ./src/model/mod.rs
pub mod item;

pub use item::{TodoId, TodoItem, normalize_content};
