//! CPU capability detection.
//!
//! Handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (`is_x86_feature_detected!` / `is_aarch64_feature_detected!`, `std` only)
//! - Platform baselines that never need probing (Apple silicon)
//! - Caching (via `OnceLock` with `std`, an atomic state machine without)
//! - Miri fallback (always returns no capabilities)
//!
//! Detection runs at most once per process. The cached value is never
//! mutated afterward.

use crate::caps::{Arch, Caps};

/// Result of a detection pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detected {
  /// Detected CPU capabilities.
  pub caps: Caps,
  /// Architecture the capabilities belong to.
  pub arch: Arch,
}

impl Detected {
  /// Nothing detected.
  pub const PORTABLE: Self = Self {
    caps: Caps::NONE,
    arch: Arch::Other,
  };
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get the cached detection result, detecting on first use.
#[inline]
#[must_use]
pub fn get() -> Detected {
  #[cfg(miri)]
  {
    Detected::PORTABLE
  }

  #[cfg(all(not(miri), feature = "std"))]
  {
    use std::sync::OnceLock;
    static CACHED: OnceLock<Detected> = OnceLock::new();
    *CACHED.get_or_init(detect_uncached)
  }

  #[cfg(all(not(miri), not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::get_or_init(detect_uncached)
  }

  // Single-threaded targets without 64-bit atomics: detection is all compile-time anyway.
  #[cfg(all(not(miri), not(feature = "std"), not(target_has_atomic = "64")))]
  {
    detect_uncached()
  }
}

/// Cached capabilities.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  get().caps
}

/// Cached architecture.
#[inline]
#[must_use]
pub fn arch() -> Arch {
  get().arch
}

/// Detect capabilities without touching the cache.
#[must_use]
pub fn detect_uncached() -> Detected {
  #[cfg(miri)]
  {
    Detected::PORTABLE
  }

  #[cfg(all(not(miri), target_arch = "x86_64"))]
  {
    detect_x86_64()
  }

  #[cfg(all(not(miri), target_arch = "aarch64"))]
  {
    detect_aarch64()
  }

  #[cfg(all(not(miri), not(any(target_arch = "x86_64", target_arch = "aarch64"))))]
  {
    Detected::PORTABLE
  }
}

/// Features enabled at compile time, plus the architecture's guaranteed baseline.
#[must_use]
pub const fn caps_static() -> Caps {
  #[allow(unused_mut)]
  let mut caps = Caps::NONE;

  #[cfg(target_arch = "x86_64")]
  {
    use crate::caps::x86;

    // SSE2 is part of the x86_64 baseline.
    caps = caps.union(x86::SSE2);

    #[cfg(target_feature = "ssse3")]
    {
      caps = caps.union(x86::SSSE3);
    }
    #[cfg(target_feature = "sse4.1")]
    {
      caps = caps.union(x86::SSE41);
    }
    #[cfg(target_feature = "sse4.2")]
    {
      caps = caps.union(x86::SSE42);
    }
    #[cfg(target_feature = "pclmulqdq")]
    {
      caps = caps.union(x86::PCLMULQDQ);
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;

    caps = caps.union(aarch64::NEON);

    #[cfg(target_feature = "aes")]
    {
      caps = caps.union(aarch64::AES).union(aarch64::PMULL);
    }
    #[cfg(target_feature = "crc")]
    {
      caps = caps.union(aarch64::CRC);
    }

    // Every Apple AArch64 core ships CRC32 and PMULL; no need to ask.
    #[cfg(any(target_os = "macos", target_os = "ios", target_os = "tvos", target_os = "watchos"))]
    {
      caps = caps
        .union(aarch64::AES)
        .union(aarch64::PMULL)
        .union(aarch64::CRC);
    }
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(not(miri), target_arch = "x86_64"))]
fn detect_x86_64() -> Detected {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(feature = "std")]
  {
    use crate::caps::x86;

    if std::arch::is_x86_feature_detected!("ssse3") {
      caps |= x86::SSSE3;
    }
    if std::arch::is_x86_feature_detected!("sse4.1") {
      caps |= x86::SSE41;
    }
    if std::arch::is_x86_feature_detected!("sse4.2") {
      caps |= x86::SSE42;
    }
    if std::arch::is_x86_feature_detected!("pclmulqdq") {
      caps |= x86::PCLMULQDQ;
    }
  }

  Detected {
    caps,
    arch: Arch::X86_64,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(not(miri), target_arch = "aarch64"))]
fn detect_aarch64() -> Detected {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(feature = "std")]
  {
    use crate::caps::aarch64;

    // Rust's `aes` target feature covers PMULL; the kernels enable it under that name.
    if std::arch::is_aarch64_feature_detected!("aes") {
      caps |= aarch64::AES;
    }
    if std::arch::is_aarch64_feature_detected!("pmull") {
      caps |= aarch64::PMULL;
    }
    if std::arch::is_aarch64_feature_detected!("crc") {
      caps |= aarch64::CRC;
    }
  }

  Detected {
    caps,
    arch: Arch::Aarch64,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Atomic Cache (no_std)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(not(miri), not(feature = "std"), target_has_atomic = "64"))]
mod atomic_cache {
  use core::sync::atomic::{AtomicU8, AtomicU64, Ordering};

  use super::*;

  const STATE_UNINIT: u8 = 0;
  const STATE_INITING: u8 = 1;
  const STATE_READY: u8 = 2;

  static STATE: AtomicU8 = AtomicU8::new(STATE_UNINIT);
  static WORD0: AtomicU64 = AtomicU64::new(0);
  static WORD1: AtomicU64 = AtomicU64::new(0);
  static ARCH: AtomicU8 = AtomicU8::new(0);

  pub(super) fn get_or_init(f: fn() -> Detected) -> Detected {
    if STATE.load(Ordering::Acquire) == STATE_READY {
      return load();
    }

    match STATE.compare_exchange(STATE_UNINIT, STATE_INITING, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let detected = f();
        store(detected);
        STATE.store(STATE_READY, Ordering::Release);
        detected
      }
      Err(_) => {
        while STATE.load(Ordering::Acquire) != STATE_READY {
          core::hint::spin_loop();
        }
        load()
      }
    }
  }

  fn load() -> Detected {
    let caps = Caps([WORD0.load(Ordering::Acquire), WORD1.load(Ordering::Acquire)]);
    let arch = match ARCH.load(Ordering::Acquire) {
      1 => Arch::X86_64,
      2 => Arch::Aarch64,
      _ => Arch::Other,
    };
    Detected { caps, arch }
  }

  fn store(detected: Detected) {
    WORD0.store(detected.caps.0[0], Ordering::Release);
    WORD1.store(detected.caps.0[1], Ordering::Release);
    let arch = match detected.arch {
      Arch::X86_64 => 1,
      Arch::Aarch64 => 2,
      Arch::Other => 0,
    };
    ARCH.store(arch, Ordering::Release);
  }
}

#[cfg(test)]
mod tests;
