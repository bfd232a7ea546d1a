//! Fixed-Capacity Byte Ring Buffer untuk staging I/O
//!
//! Satu backing array, dua cursor (`r`, `w`) dan `len` eksplisit.
//! Tidak ada alokasi setelah inisialisasi, tidak ada lock.
//!
//! # Invariants
//! - `capacity` selalu power of 2, sehingga modulo cukup `& mask`.
//! - `r < capacity`, `w < capacity`, `len <= capacity`.
//! - `w == (r + len) & mask`. Saat `r == w`, `len` yang menentukan
//!   penuh (`len == capacity`) atau kosong (`len == 0`).
//!
//! Data yang terbaca bisa wrap di ujung array; semua copy dipecah
//! menjadi maksimal dua run yang contiguous.

use std::fmt;
use std::io::{self, IoSlice, IoSliceMut, Write};

use tracing::{debug, trace};

use super::error::Error;
use super::fill::Fill;

/// Kapasitas default untuk request `<= 0` (64KB)
pub const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Kapasitas maksimum (16MB). Request lebih besar di-clamp ke sini.
pub const MAX_CAPACITY: usize = 16 * 1024 * 1024;

/// Kapasitas minimum (2^0)
pub const MIN_CAPACITY: usize = 1;

/// Ring buffer byte untuk satu pemilik (satu connection, satu event loop)
///
/// Semua mutasi lewat `&mut self`, jadi tidak perlu sinkronisasi internal.
/// Data keluar selalu berupa copy (`read`, `bytes`) atau borrow yang
/// dicek compiler (`as_slices`).
pub struct RingBuffer {
    // Pre-allocated sekali saat init
    buffer: Box<[u8]>,
    // capacity - 1
    mask: usize,
    r: usize,
    w: usize,
    len: usize,
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("r", &self.r)
            .field("w", &self.w)
            .field("len", &self.len)
            .finish()
    }
}

/// Normalisasi kapasitas: round up ke power of 2, clamp ke `MAX_CAPACITY`
#[inline]
fn normalize_capacity(requested: usize) -> usize {
    if requested == 0 {
        return DEFAULT_CAPACITY;
    }
    if requested >= MAX_CAPACITY {
        return MAX_CAPACITY;
    }
    requested.next_power_of_two().max(MIN_CAPACITY)
}

impl RingBuffer {
    /// Membuat ring buffer dari request kapasitas bertanda.
    ///
    /// Request `<= 0` memakai `DEFAULT_CAPACITY`, request di atas
    /// `MAX_CAPACITY` di-clamp, selain itu di-round up ke power of 2.
    /// Tidak pernah gagal.
    pub fn new(requested: isize) -> Self {
        if requested <= 0 {
            debug!(requested, capacity = DEFAULT_CAPACITY, "using default ring capacity");
            return Self::with_capacity(DEFAULT_CAPACITY);
        }
        Self::with_capacity(requested as usize)
    }

    /// Sama dengan `new`, untuk request unsigned (`0` berarti default).
    pub fn with_capacity(requested: usize) -> Self {
        let capacity = normalize_capacity(requested);
        if capacity != requested {
            debug!(requested, capacity, "ring capacity normalized");
        }

        Self {
            buffer: vec![0u8; capacity].into_boxed_slice(),
            mask: capacity - 1,
            r: 0,
            w: 0,
            len: 0,
        }
    }

    /// Kapasitas buffer
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Jumlah byte yang belum dibaca
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Cek apakah buffer kosong
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cek apakah buffer penuh
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == self.buffer.len()
    }

    /// Sisa ruang yang bisa ditulis
    #[inline(always)]
    pub fn free(&self) -> usize {
        self.buffer.len() - self.len
    }

    /// Tulis sebanyak mungkin dari `data`.
    ///
    /// Returns jumlah byte yang ditulis; bisa kurang dari `data.len()`
    /// (short write, bukan error). `Err(WouldBlock)` hanya jika buffer
    /// sudah penuh saat dipanggil. Slice kosong selalu `Ok(0)`.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        if data.is_empty() {
            return Ok(0);
        }
        if self.is_full() {
            return Err(Error::WouldBlock);
        }

        let n = data.len().min(self.free());
        let w = self.w;

        // Run pertama: w..akhir array, run kedua: awal array
        let first = (self.buffer.len() - w).min(n);
        self.buffer[w..w + first].copy_from_slice(&data[..first]);
        if n > first {
            self.buffer[..n - first].copy_from_slice(&data[first..n]);
        }

        self.advance_write(n);
        Ok(n)
    }

    /// `write` untuk string
    #[inline]
    pub fn write_str(&mut self, s: &str) -> Result<usize, Error> {
        self.write(s.as_bytes())
    }

    /// Copy byte terlama ke `dest` tanpa mengonsumsinya.
    ///
    /// Konsumsi eksplisit lewat `release`. `Err(WouldBlock)` jika buffer
    /// kosong dan `dest` tidak kosong.
    pub fn read(&self, dest: &mut [u8]) -> Result<usize, Error> {
        if dest.is_empty() {
            return Ok(0);
        }
        if self.is_empty() {
            return Err(Error::WouldBlock);
        }

        let (head, tail) = self.as_slices();
        let n = dest.len().min(self.len);
        let first = head.len().min(n);

        dest[..first].copy_from_slice(&head[..first]);
        if n > first {
            dest[first..n].copy_from_slice(&tail[..n - first]);
        }

        Ok(n)
    }

    /// Isi ruang kosong dari descriptor lewat `Fill`.
    ///
    /// Ruang kosong diserahkan sebagai satu region, atau dua region jika
    /// wrap di ujung array. Error descriptor diteruskan apa adanya dan
    /// tidak di-retry.
    pub fn copy_from<F: Fill + ?Sized>(&mut self, src: &mut F) -> Result<usize, Error> {
        if self.is_full() {
            return Err(Error::WouldBlock);
        }

        let free = self.free();
        let filled = {
            let (head, tail) = self.free_regions_mut();
            if tail.is_empty() {
                src.fill(&mut [IoSliceMut::new(head)])?
            } else {
                src.fill(&mut [IoSliceMut::new(head), IoSliceMut::new(tail)])?
            }
        };

        let n = filled.min(free);
        self.advance_write(n);
        trace!(filled = n, len = self.len, "ring filled from descriptor");

        Ok(n)
    }

    /// Drain ke `dst` (peran outbound): tulis region terbaca lalu
    /// `release` sebanyak yang diterima writer.
    ///
    /// `Err(WouldBlock)` jika buffer kosong. Error writer diteruskan.
    pub fn copy_to<W: Write + ?Sized>(&mut self, dst: &mut W) -> Result<usize, Error> {
        if self.is_empty() {
            return Err(Error::WouldBlock);
        }

        let written = {
            let (head, tail) = self.as_slices();
            if tail.is_empty() {
                dst.write(head)?
            } else {
                dst.write_vectored(&[IoSlice::new(head), IoSlice::new(tail)])?
            }
        };

        let n = written.min(self.len);
        self.release(n);
        trace!(drained = n, len = self.len, "ring drained to writer");

        Ok(n)
    }

    /// Snapshot contiguous dari data terbaca, urut dari terlama.
    ///
    /// Selalu copy baru: write/release berikutnya tidak mengubah hasil.
    pub fn bytes(&self) -> Vec<u8> {
        let (head, tail) = self.as_slices();
        let mut out = Vec::with_capacity(self.len);
        out.extend_from_slice(head);
        out.extend_from_slice(tail);
        out
    }

    /// Region terbaca sebagai maksimal dua slice (zero-copy).
    ///
    /// Gabungan `head` lalu `tail` sama dengan `bytes()`.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        if self.len == 0 {
            return (&[], &[]);
        }

        let r = self.r;
        let cap = self.buffer.len();
        if self.len <= cap - r {
            (&self.buffer[r..r + self.len], &[])
        } else {
            let wrapped = self.len - (cap - r);
            (&self.buffer[r..], &self.buffer[..wrapped])
        }
    }

    /// Tandai `n` byte terlama sebagai terkonsumsi.
    ///
    /// `n > len()` dianggap drain semua, bukan error.
    #[inline]
    pub fn release(&mut self, n: usize) {
        let n = n.min(self.len);
        self.r = (self.r + n) & self.mask;
        self.len -= n;
    }

    /// Reset ke kosong. Storage dan kapasitas dipertahankan untuk reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.r = 0;
        self.w = 0;
        self.len = 0;
    }

    #[inline(always)]
    fn advance_write(&mut self, n: usize) {
        self.w = (self.w + n) & self.mask;
        self.len += n;
    }

    /// Ruang kosong sebagai maksimal dua slice mutable, mulai dari `w`.
    fn free_regions_mut(&mut self) -> (&mut [u8], &mut [u8]) {
        let free = self.free();
        if free == 0 {
            return (&mut [], &mut []);
        }

        let w = self.w;
        let cap = self.buffer.len();
        if free <= cap - w {
            (&mut self.buffer[w..w + free], &mut [])
        } else {
            let (front, back) = self.buffer.split_at_mut(w);
            let wrapped = free - back.len();
            (back, &mut front[..wrapped])
        }
    }
}

impl Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RingBuffer::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
