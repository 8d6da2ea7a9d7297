//! Image storage adapters.
//!
//! - **LocalImageStorage** - Writes uploads under a directory on disk
//! - **InMemoryImageStorage** - Keeps uploads in memory (testing/development)

mod in_memory_image_storage;
mod local_image_storage;

pub use in_memory_image_storage::{InMemoryImageStorage, StoredImage};
pub use local_image_storage::LocalImageStorage;
