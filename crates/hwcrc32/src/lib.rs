//! Hardware-accelerated CRC-32 (IEEE) and CRC-32C (Castagnoli).
//!
//! Two layers:
//!
//! - The polynomial algorithm table ([`Accelerator`], plus the free functions
//!   [`update_ieee`], [`update_castagnoli`] and friends) exposes the hardware
//!   path only. Callers check `available()` and bring their own fallback.
//! - The streaming hashers [`Crc32`] and [`Crc32C`] pick the hardware kernel
//!   when present and the portable slice-by-8 tables otherwise.
//!
//! # Hardware Acceleration
//!
//! | Arch | CRC-32C | CRC-32 (IEEE) |
//! |------|---------|---------------|
//! | x86_64 | SSE4.2 `crc32` | PCLMULQDQ fold + table tail |
//! | aarch64 | CRC extension | PMULL fold + CRC extension |
//!
//! # Example
//!
//! ```rust
//! use hwcrc32::{Checksum, Crc32};
//!
//! let crc = Crc32::checksum(b"123456789");
//! assert_eq!(crc, 0xCBF4_3926);
//!
//! if hwcrc32::available_ieee() {
//!   hwcrc32::init_ieee();
//!   let first = hwcrc32::update_ieee(0, b"1234");
//!   assert_eq!(hwcrc32::update_ieee(first, b"56789"), crc);
//! }
//! ```
//!
//! # no_std Support
//!
//! ```toml
//! [dependencies]
//! hwcrc32 = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std` there is no runtime CPU probe: only target features enabled
//! at compile time (and the Apple baseline) count, and `HWCRC32_FORCE` is
//! ignored.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![cfg_attr(not(test), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod arch;
pub mod crc32;
mod dispatch;
mod error;
mod introspect;

pub use arch::{
  Accelerator, Features, Polynomial, available_castagnoli, available_ieee, init_castagnoli, init_ieee,
  update_castagnoli, update_ieee,
};
pub use crc32::{Crc32, Crc32C};
pub use error::Unavailable;
pub use introspect::DispatchInfo;
// Re-export traits for convenience
pub use traits::Checksum;
#[cfg(feature = "std")]
pub use traits::io::{ChecksumReader, ChecksumWriter};
