//! Ports: interfaces to external collaborators.
//!
//! The core issues intent through these traits; adapters own the actual
//! I/O. Everything here is object-safe and `Send + Sync` so handlers can
//! hold collaborators as `Arc<dyn _>`.

mod event_publisher;
mod mandate_gateway;
mod member_store;
mod work_queue;

pub use event_publisher::{EventPublisher, PublishError};
pub use mandate_gateway::{GatewayError, MandateGateway};
pub use member_store::{ActivateMandateCommand, ActivationReport, MemberStore, StoreError};
pub use work_queue::{QueueError, WorkQueue};
