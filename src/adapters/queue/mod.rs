//! In-memory work queue.

mod in_memory;

pub use in_memory::InMemoryWorkQueue;
