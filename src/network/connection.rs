//! Connection handling dengan ring-buffered I/O
//!
//! Satu stream, dua ring buffer pre-allocated:
//! - inbound: akumulasi byte dari socket sampai frame lengkap
//! - outbound: antrean byte yang belum terkirim, menyerap short write
//!
//! Event loop (poll, retry, framing) tetap tanggung jawab pemanggil.

use std::io::{self, Read, Write};

use mio::event::Source;
use mio::{Interest, Registry, Token};
use tracing::{debug, trace};

use crate::core::RingBuffer;

/// Connection di atas stream non-blocking mio
pub type TcpConnection = Connection<mio::net::TcpStream>;

/// Stream dengan inbound/outbound ring buffer
///
/// Tidak ada alokasi setelah `new`.
pub struct Connection<S> {
    stream: S,
    inbound: RingBuffer,
    outbound: RingBuffer,
}

impl<S: Read + Write> Connection<S> {
    /// Wrap stream dengan dua ring buffer berkapasitas `capacity`
    /// (dinormalisasi seperti `RingBuffer::with_capacity`).
    pub fn new(stream: S, capacity: usize) -> Self {
        Self {
            stream,
            inbound: RingBuffer::with_capacity(capacity),
            outbound: RingBuffer::with_capacity(capacity),
        }
    }

    /// Read dari socket ke inbound buffer
    ///
    /// Returns jumlah byte baru. Buffer penuh atau socket `WouldBlock`
    /// menghasilkan `Ok(0)`; EOF menjadi `ConnectionReset`.
    pub fn fill_inbound(&mut self) -> io::Result<usize> {
        match self.inbound.copy_from(&mut self.stream) {
            Ok(0) => {
                debug!("connection closed by peer");
                Err(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "Connection closed",
                ))
            }
            Ok(n) => Ok(n),
            Err(e) if e.is_would_block() => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Data inbound yang belum dikonsumsi, sebagai maksimal dua slice
    #[inline(always)]
    pub fn inbound(&self) -> (&[u8], &[u8]) {
        self.inbound.as_slices()
    }

    /// Inbound buffer (untuk `read`/`bytes` non-destruktif)
    #[inline(always)]
    pub fn inbound_buffer(&self) -> &RingBuffer {
        &self.inbound
    }

    /// Consume n bytes dari inbound buffer
    #[inline(always)]
    pub fn consume(&mut self, n: usize) {
        self.inbound.release(n);
    }

    /// Queue data untuk write (copy ke outbound buffer)
    ///
    /// Returns jumlah byte yang diterima; kurang dari `data.len()` saat
    /// outbound penuh. Pemanggil menyimpan sisanya sampai `flush_outbound`.
    pub fn queue_write(&mut self, data: &[u8]) -> usize {
        // Satu-satunya error dari ring write adalah WouldBlock (penuh)
        self.outbound.write(data).unwrap_or(0)
    }

    /// Flush outbound buffer ke socket sampai kosong atau socket `WouldBlock`
    ///
    /// Returns jumlah byte yang masih pending.
    pub fn flush_outbound(&mut self) -> io::Result<usize> {
        while !self.outbound.is_empty() {
            match self.outbound.copy_to(&mut self.stream) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "Failed to write to socket",
                    ));
                }
                Ok(n) => trace!(written = n, pending = self.outbound.len(), "outbound flushed"),
                Err(e) if e.is_would_block() => break,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(self.outbound.len())
    }

    /// Bytes pending di outbound buffer
    #[inline(always)]
    pub fn write_pending(&self) -> usize {
        self.outbound.len()
    }

    /// Interest yang dibutuhkan: selalu READABLE, WRITABLE selama ada
    /// data outbound yang pending.
    #[inline]
    pub fn interest(&self) -> Interest {
        if self.outbound.is_empty() {
            Interest::READABLE
        } else {
            Interest::READABLE | Interest::WRITABLE
        }
    }

    /// Get underlying stream
    pub fn stream(&self) -> &S {
        &self.stream
    }

    /// Lepas stream, buang buffer
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write + Source> Connection<S> {
    /// Register stream ke poll registry dengan interest saat ini
    pub fn register(&mut self, registry: &Registry, token: Token) -> io::Result<()> {
        let interest = self.interest();
        registry.register(&mut self.stream, token, interest)
    }

    /// Update interest setelah queue/flush
    pub fn reregister(&mut self, registry: &Registry, token: Token) -> io::Result<()> {
        let interest = self.interest();
        registry.reregister(&mut self.stream, token, interest)
    }

    pub fn deregister(&mut self, registry: &Registry) -> io::Result<()> {
        registry.deregister(&mut self.stream)
    }
}
