//! CRC-32 implementations.
//!
//! This module provides:
//! - [`Crc32`] - CRC-32 IEEE (Ethernet, ZIP, PNG)
//! - [`Crc32C`] - CRC-32C Castagnoli (iSCSI, ext4, SCTP)
//!
//! Both hashers use the hardware kernel from the process-wide
//! [`Accelerator`](crate::Accelerator) when the polynomial is available and
//! fall back to the slice-by-8 tables otherwise. Setting `HWCRC32_FORCE=portable`
//! pins them to the tables.

pub(crate) mod clmul;
pub mod config;
pub mod convention;
pub mod portable;

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;

#[cfg(test)]
mod proptests;

use traits::Checksum;

use crate::{
  arch::{self, Accelerator},
  dispatch::{Crc32Dispatcher, Selected},
};

/// Reflected IEEE 802.3 polynomial.
pub const IEEE_POLY: u32 = 0xEDB8_8320;
/// Reflected Castagnoli polynomial.
pub const CASTAGNOLI_POLY: u32 = 0x82F6_3B78;

/// Shortest input the IEEE kernels fold with carryless multiplication.
pub const FOLD_MIN_LEN: usize = 64;
/// Bytes consumed per fold step; the folded prefix is a multiple of this.
pub const FOLD_BLOCK: usize = 16;

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher Selection
// ─────────────────────────────────────────────────────────────────────────────

fn select(accelerator: Accelerator, portable: Selected) -> Selected {
  match (config::force(), accelerator.selected()) {
    (config::Crc32Force::Auto, Some(hardware)) => hardware,
    _ => portable,
  }
}

fn select_crc32_ieee() -> Selected {
  select(arch::ieee(), Selected::new("portable/slice8", portable::crc32_ieee))
}

fn select_crc32c() -> Selected {
  select(arch::castagnoli(), Selected::new("portable/slice8", portable::crc32c))
}

/// Static dispatcher for CRC-32 IEEE.
static CRC32_IEEE_DISPATCHER: Crc32Dispatcher = Crc32Dispatcher::new(select_crc32_ieee);

/// Static dispatcher for CRC-32C.
static CRC32C_DISPATCHER: Crc32Dispatcher = Crc32Dispatcher::new(select_crc32c);

// ─────────────────────────────────────────────────────────────────────────────
// CRC-32 IEEE
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 checksum (IEEE 802.3 / ISO-HDLC).
///
/// Used in Ethernet FCS, ZIP, gzip, PNG, and many other formats.
///
/// # Properties
///
/// - **Polynomial**: 0x04C11DB7 (normal), 0xEDB88320 (reflected)
/// - **Initial value**: 0xFFFFFFFF
/// - **Final XOR**: 0xFFFFFFFF
/// - **Reflect input/output**: Yes
///
/// # Hardware Acceleration
///
/// - **aarch64**: CRC32 extension, PMULL folding for inputs of 64 bytes or more
/// - **x86_64**: PCLMULQDQ folding with a table-driven tail
///
/// # Example
///
/// ```
/// use hwcrc32::{Checksum, Crc32};
///
/// let crc = Crc32::checksum(b"123456789");
/// assert_eq!(crc, 0xCBF43926);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32 {
  crc: u32,
}

impl Crc32 {
  /// Create a hasher to resume from a previous CRC value.
  #[inline]
  #[must_use]
  pub const fn resume(crc: u32) -> Self {
    Self { crc }
  }

  /// Get the name of the currently selected backend.
  ///
  /// Returns the implementation name (e.g., "portable/slice8", "aarch64/crc").
  #[must_use]
  pub fn backend_name() -> &'static str {
    CRC32_IEEE_DISPATCHER.backend_name()
  }
}

impl Checksum for Crc32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Self { crc: 0 }
  }

  #[inline]
  fn with_initial(initial: u32) -> Self {
    Self { crc: initial }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.crc = CRC32_IEEE_DISPATCHER.update(self.crc, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    self.crc
  }

  #[inline]
  fn reset(&mut self) {
    self.crc = 0;
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// CRC-32C (Castagnoli)
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32C checksum (Castagnoli polynomial).
///
/// Used in iSCSI, ext4, Btrfs, SCTP, and other modern protocols.
///
/// # Properties
///
/// - **Polynomial**: 0x1EDC6F41 (normal), 0x82F63B78 (reflected)
/// - **Initial value**: 0xFFFFFFFF
/// - **Final XOR**: 0xFFFFFFFF
/// - **Reflect input/output**: Yes
///
/// # Hardware Acceleration
///
/// - **x86_64**: SSE4.2 `crc32` instruction
/// - **aarch64**: CRC32 extension (`crc32cx` .. `crc32cb`)
///
/// # Example
///
/// ```
/// use hwcrc32::{Checksum, Crc32C};
///
/// let mut hasher = Crc32C::new();
/// hasher.update(b"1234");
/// hasher.update(b"56789");
/// assert_eq!(hasher.finalize(), 0xE3069283);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32C {
  crc: u32,
}

impl Crc32C {
  /// Create a hasher to resume from a previous CRC value.
  #[inline]
  #[must_use]
  pub const fn resume(crc: u32) -> Self {
    Self { crc }
  }

  /// Get the name of the currently selected backend.
  ///
  /// Returns the implementation name (e.g., "portable/slice8", "x86_64/sse4.2").
  #[must_use]
  pub fn backend_name() -> &'static str {
    CRC32C_DISPATCHER.backend_name()
  }
}

impl Checksum for Crc32C {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Self { crc: 0 }
  }

  #[inline]
  fn with_initial(initial: u32) -> Self {
    Self { crc: initial }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.crc = CRC32C_DISPATCHER.update(self.crc, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    self.crc
  }

  #[inline]
  fn reset(&mut self) {
    self.crc = 0;
  }
}
