//! Checksum trait for the hwcrc32 workspace.
//!
//! This crate holds the interface the CRC-32 hashers implement, so callers
//! can be generic over the polynomial. It is `no_std` compatible and has zero
//! dependencies.
//!
//! | Trait | Purpose | Implementors |
//! |-------|---------|--------------|
//! | [`Checksum`] | Streaming non-cryptographic checksum | `Crc32`, `Crc32C` |
//!
//! With `std`, [`io::ChecksumReader`] and [`io::ChecksumWriter`] checksum
//! bytes as they pass through a reader or writer.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
#[cfg(feature = "std")]
pub mod io;

pub use checksum::Checksum;
