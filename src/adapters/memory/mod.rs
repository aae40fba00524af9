//! In-memory member persistence.

mod member_store;

pub use member_store::{InMemoryMemberStore, PaymentMethodRecord};
