//! Descriptor-read capability
//!
//! Ring buffer tidak tahu cara membaca socket/pipe. Ia hanya menyerahkan
//! region kosong (satu, atau dua jika wraparound) ke implementor `Fill`,
//! lalu memajukan write cursor sesuai jumlah byte yang terisi.

use std::io::{self, IoSliceMut, Read};

/// Scatter read ke satu atau dua region
pub trait Fill {
    /// Isi `regions` secara berurutan. Returns jumlah byte yang terisi.
    ///
    /// Error dikembalikan apa adanya, termasuk `WouldBlock` dari descriptor.
    fn fill(&mut self, regions: &mut [IoSliceMut<'_>]) -> io::Result<usize>;
}

/// Semua `Read` (TcpStream, UnixStream, mio stream, reader in-memory)
/// bisa dipakai langsung lewat `read_vectored`.
impl<R: Read + ?Sized> Fill for R {
    #[inline]
    fn fill(&mut self, regions: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        self.read_vectored(regions)
    }
}

#[cfg(unix)]
pub use self::unix::FdReader;

#[cfg(unix)]
mod unix {
    use std::io::{self, IoSliceMut, Read};
    use std::os::unix::io::{AsRawFd, RawFd};

    /// Raw descriptor reader berbasis `readv(2)`
    ///
    /// Tidak memiliki descriptor: tidak menutupnya saat drop, tidak
    /// mengubah mode non-blocking.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FdReader(pub RawFd);

    impl FdReader {
        /// Pinjam descriptor dari objek apa pun yang punya raw fd
        pub fn borrow<T: AsRawFd + ?Sized>(source: &T) -> Self {
            Self(source.as_raw_fd())
        }
    }

    impl Read for FdReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.read_vectored(&mut [IoSliceMut::new(buf)])
        }

        fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
            // IoSliceMut dijamin ABI-compatible dengan iovec di unix
            let iovcnt = bufs.len().min(libc::c_int::MAX as usize) as libc::c_int;

            // SAFETY: pointer dan panjang berasal dari slice mutable yang valid
            // selama panggilan ini
            let n = unsafe {
                libc::readv(self.0, bufs.as_mut_ptr() as *const libc::iovec, iovcnt)
            };

            if n < 0 {
                return Err(io::Error::last_os_error());
            }

            Ok(n as usize)
        }
    }
}
