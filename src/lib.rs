//! ringio - Fixed-Capacity Ring Buffer untuk Non-Blocking I/O
//!
//! Arsitektur:
//! - core: Ring buffer byte dengan cursor algebra power-of-2
//! - network: Connection dengan inbound/outbound ring buffer di atas mio

pub mod core;
pub mod network;

pub use crate::core::{Error, Fill, RingBuffer, DEFAULT_CAPACITY, MAX_CAPACITY};
