//! End-to-end scenario: short write, full buffer, release, wraparound
//!
//! Usage:
//!   cargo test --test ring_buffer_scenario

use ringio::core::{Error, RingBuffer, DEFAULT_CAPACITY, MAX_CAPACITY};
use tracing_subscriber::EnvFilter;

/// RUST_LOG=ringio=debug untuk melihat normalisasi kapasitas
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_capacity_table() {
    init_tracing();
    let cases: [(isize, usize); 6] = [
        (1, 1),
        (3, 4),
        (MAX_CAPACITY as isize, MAX_CAPACITY),
        (-1, DEFAULT_CAPACITY),
        (0, DEFAULT_CAPACITY),
        (MAX_CAPACITY as isize + 1, MAX_CAPACITY),
    ];

    for (requested, expected) in cases {
        assert_eq!(
            RingBuffer::new(requested).capacity(),
            expected,
            "requested {}",
            requested
        );
    }
}

#[test]
fn test_read_write_release_scenario() {
    init_tracing();
    let mut rb = RingBuffer::new(10);
    assert!(rb.is_empty());
    assert_eq!(rb.capacity(), 16);

    assert_eq!(rb.write_str("helloworld").unwrap(), 10);
    assert_eq!(rb.bytes(), b"helloworld");
    assert_eq!(rb.len(), 10);

    // Short write: hanya 6 byte muat
    assert_eq!(rb.write_str("helloworld").unwrap(), 6);
    assert_eq!(rb.bytes(), b"helloworldhellow");
    assert_eq!(rb.len(), 16);

    assert!(matches!(rb.write_str("test"), Err(Error::WouldBlock)));
    assert_eq!(rb.bytes(), b"helloworldhellow");
    assert_eq!(rb.len(), 16);

    rb.release(5);
    assert_eq!(rb.bytes(), b"worldhellow");
    assert_eq!(rb.len(), 11);

    // Write cursor melewati ujung array
    assert_eq!(rb.write_str("123456").unwrap(), 5);
    assert_eq!(rb.bytes(), b"worldhellow12345");
    assert_eq!(rb.len(), 16);

    rb.release(10);
    assert_eq!(rb.bytes(), b"w12345");
    assert_eq!(rb.len(), 6);

    assert_eq!(rb.write_str("789").unwrap(), 3);
    assert_eq!(rb.bytes(), b"w12345789");
    assert_eq!(rb.len(), 9);

    rb.release(rb.len() + 1);
    assert!(rb.bytes().is_empty());
    assert_eq!(rb.len(), 0);

    rb.release(1);
    assert_eq!(rb.len(), 0);

    assert_eq!(rb.write(&[]).unwrap(), 0);
}

#[test]
fn test_bytes_is_idempotent_and_detached() {
    let mut rb = RingBuffer::new(16);
    rb.write_str("worldhellow").unwrap();

    let first = rb.bytes();
    let mut second = rb.bytes();
    assert_eq!(first, second);

    second.clear();
    assert_eq!(rb.bytes(), first);
    assert_eq!(rb.len(), 11);
}
