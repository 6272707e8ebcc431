//! CPU capability probe for hwcrc32.
//!
//! This crate is the single place the workspace asks "which CRC-relevant
//! instructions can this machine run?".
//!
//! # Main Entry Point
//!
//! ```
//! use platform::caps::x86;
//!
//! let caps = platform::caps();
//! if caps.has(x86::CRC32C_READY) {
//!   // SSE4.2 `crc32` loop is legal here
//! }
//! ```
//!
//! Detection combines compile-time `cfg!(target_feature)` with runtime
//! `is_*_feature_detected!` probes (`std` only), runs once per process, and
//! is cached in a `OnceLock` (std) or an atomic state machine (no_std).
//! Under Miri every query reports no capabilities.

#![no_std]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing))]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::Detected;

/// Cached detection result (capabilities and architecture).
#[inline]
#[must_use]
pub fn get() -> Detected {
  detect::get()
}

/// Cached capabilities.
///
/// Convenience wrapper around [`get()`].
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Cached architecture.
#[inline]
#[must_use]
pub fn arch() -> Arch {
  detect::arch()
}

/// Probe the CPU without consulting or filling the cache.
///
/// Always agrees with [`caps()`]; exposed so callers and tests can check the
/// probe is idempotent.
#[inline]
#[must_use]
pub fn probe() -> Caps {
  detect::detect_uncached().caps
}

/// Capabilities known at compile time (target features plus baselines).
#[inline]
#[must_use]
pub const fn caps_static() -> Caps {
  detect::caps_static()
}
