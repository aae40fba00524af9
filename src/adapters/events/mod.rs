//! In-memory event publisher.

mod in_memory;

pub use in_memory::InMemoryEventPublisher;
