pub mod enums;
pub mod models;
pub mod repositories;

pub use repositories::{InMemoryStore, Store};
