//! Application layer: use-case orchestration over domain and ports.

pub mod pipeline;
