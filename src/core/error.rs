//! Error type untuk ring buffer
//!
//! Hanya ada satu kondisi error internal: `WouldBlock` (buffer penuh saat
//! write/fill, atau kosong saat read/drain). Error dari descriptor
//! diteruskan apa adanya lewat `Io`.

use std::io;

use thiserror::Error;

/// Error ring buffer
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer penuh (write/fill) atau kosong (read/drain). Retry nanti.
    #[error("operation would block")]
    WouldBlock,

    /// Error dari descriptor atau writer, tidak diklasifikasi ulang
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// `true` jika ini sinyal backpressure, bukan kegagalan
    #[inline(always)]
    pub fn is_would_block(&self) -> bool {
        match self {
            Error::WouldBlock => true,
            Error::Io(e) => e.kind() == io::ErrorKind::WouldBlock,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::WouldBlock => io::Error::from(io::ErrorKind::WouldBlock),
            Error::Io(e) => e,
        }
    }
}
