pub mod file;
pub mod memory;
pub mod service;
pub mod store;

pub use crate::file::JsonFileStore;
pub use crate::memory::MemoryStore;
pub use crate::service::{HabitService, HabitServiceBuilder, HabitSnapshot, ServiceError};
pub use crate::store::{DocumentStore, StoreError};
