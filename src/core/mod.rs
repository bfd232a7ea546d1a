//! Core module: Fixed-Capacity Byte Ring Buffer
//!
//! Prinsip desain:
//! - No-Allocation: Backing array dialokasikan sekali saat init
//! - Single-Owner: Tidak ada Mutex/atomic, mutasi lewat `&mut self`
//! - Scatter Read: Ruang kosong yang wrap diisi dalam satu panggilan

mod error;
mod fill;
mod ring_buffer;

pub use error::Error;
#[cfg(unix)]
pub use fill::FdReader;
pub use fill::Fill;
pub use ring_buffer::{RingBuffer, DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY};
