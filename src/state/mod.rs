pub mod store;
pub mod json_store;
pub mod factory;

pub use store::*;
pub use json_store::JsonFileStore;
pub use factory::{create_store, create_in_memory_store};
