//! CPU capability representation.
//!
//! [`Caps`] answers the question: "Which checksum-relevant instructions can I
//! legally run on this machine?"
//!
//! # Bit Layout
//!
//! - Bits 0-63: x86_64 features
//! - Bits 64-127: aarch64 features
//!
//! Only features that some CRC kernel in this workspace can use are tracked.

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 128-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`. Once detected it is never mutated.
///
/// # Example
///
/// ```
/// use platform::caps::{Caps, x86};
///
/// let caps = x86::SSE42 | x86::PCLMULQDQ;
/// assert!(caps.has(x86::SSE42));
/// assert!(!caps.has(x86::PCLMUL_READY)); // needs SSE4.1 too
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) [u64; 2]);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self([0; 2]);

  /// Create a capability set from raw words.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(words: [u64; 2]) -> Self {
    Self(words)
  }

  /// Access the raw underlying words.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn as_raw(&self) -> &[u64; 2] {
    &self.0
  }

  /// Create a capability set with a single bit set.
  ///
  /// Bits above 127 wrap into the aarch64 word; callers only use the
  /// constants below.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    if bit < 64 {
      Self([1u64 << bit, 0])
    } else {
      Self([0, 1u64 << (bit % 64)])
    }
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0[0] & required.0[0]) == required.0[0] && (self.0[1] & required.0[1]) == required.0[1]
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self([self.0[0] | other.0[0], self.0[1] | other.0[1]])
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self([self.0[0] & other.0[0], self.0[1] & other.0[1]])
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0[0] == 0 && self.0[1] == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0[0].count_ones() + self.0[1].count_ones()
  }

  /// Iterate over the names of the known features present in this set.
  pub fn names(self) -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES
      .iter()
      .filter(move |(caps, _)| self.has(*caps))
      .map(|(_, name)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.names()).finish()
  }
}

impl fmt::Display for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, name) in self.names().enumerate() {
      if i != 0 {
        f.write_str(", ")?;
      }
      f.write_str(name)?;
    }
    f.write_str("]")
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
      Self::Other
    }
  }

  /// Returns the human-readable name for this architecture.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64 Features (bits 0-63)
// ─────────────────────────────────────────────────────────────────────────────

/// x86_64 feature bits.
pub mod x86 {
  use super::Caps;

  pub const SSE2: Caps = Caps::bit(0);
  pub const SSSE3: Caps = Caps::bit(1);
  pub const SSE41: Caps = Caps::bit(2);
  pub const SSE42: Caps = Caps::bit(3);
  pub const PCLMULQDQ: Caps = Caps::bit(4);

  /// SSE4.2 `crc32` instruction (CRC-32C polynomial only).
  pub const CRC32C_READY: Caps = SSE42;
  /// PCLMULQDQ plus the SSE4.1 lane extracts the folding kernel uses.
  pub const PCLMUL_READY: Caps = Caps([PCLMULQDQ.0[0] | SSE41.0[0], 0]);
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 64-127)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 feature bits.
pub mod aarch64 {
  use super::Caps;

  /// Advanced SIMD; baseline on every AArch64 core.
  pub const NEON: Caps = Caps::bit(64);
  pub const AES: Caps = Caps::bit(65);
  /// 64x64 polynomial multiply (`PMULL`/`PMULL2`).
  pub const PMULL: Caps = Caps::bit(66);
  /// ARMv8 CRC32 extension (`crc32*` and `crc32c*`).
  pub const CRC: Caps = Caps::bit(67);

  pub const CRC_READY: Caps = CRC;
  /// PMULL as exposed through Rust's `aes` target feature.
  pub const PMULL_READY: Caps = Caps([0, PMULL.0[1] | AES.0[1] | NEON.0[1]]);
}

/// Every named feature, in display order.
const FEATURE_NAMES: &[(Caps, &str)] = &[
  (x86::SSE2, "sse2"),
  (x86::SSSE3, "ssse3"),
  (x86::SSE41, "sse4.1"),
  (x86::SSE42, "sse4.2"),
  (x86::PCLMULQDQ, "pclmulqdq"),
  (aarch64::NEON, "neon"),
  (aarch64::AES, "aes"),
  (aarch64::PMULL, "pmull"),
  (aarch64::CRC, "crc"),
];
