//! Network Layer: Ring-buffered connection
//!
//! Menggunakan mio untuk registrasi readiness. Event loop sendiri ada di
//! pemanggil; modul ini hanya memindahkan byte antara stream dan buffer.

mod connection;

pub use connection::{Connection, TcpConnection};
