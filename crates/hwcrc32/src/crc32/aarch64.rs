//! aarch64 CRC-32 kernels using the CRC extension and PMULL fusion.
//!
//! # Hardware Features
//!
//! - **CRC32 extension**: dedicated instructions for both CRC-32 (IEEE) and
//!   CRC-32C, 8 bytes per step.
//! - **PMULL + CRC fusion** (IEEE only): PMULL folds the 16-byte-aligned
//!   prefix of inputs of at least [`FOLD_MIN_LEN`] bytes into one 128-bit
//!   lane; two `crc32x` instructions with a zero register reduce that lane,
//!   and the CRC instruction finishes the tail.
//!
//! The hardware reduction replaces the width fold and Barrett step the x86
//! kernel needs: a 128-bit remainder run through a zero register has the
//! same CRC as the whole folded prefix.

// SIMD intrinsics require unsafe; safety is documented per-function.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::aarch64::*;

use super::{
  FOLD_BLOCK, FOLD_MIN_LEN,
  clmul::{CRC32_IEEE_CLMUL, Crc32ClmulConstants},
};

// ─────────────────────────────────────────────────────────────────────────────
// ARM CRC32 Extension (Pure Hardware)
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
fn le_u64(chunk: &[u8]) -> u64 {
  let mut word = [0u8; 8];
  word.copy_from_slice(chunk);
  u64::from_le_bytes(word)
}

#[inline(always)]
fn le_u32(chunk: &[u8]) -> u32 {
  let mut word = [0u8; 4];
  word.copy_from_slice(chunk);
  u32::from_le_bytes(word)
}

#[inline(always)]
fn le_u16(chunk: &[u8]) -> u16 {
  let mut word = [0u8; 2];
  word.copy_from_slice(chunk);
  u16::from_le_bytes(word)
}

/// CRC-32C using the ARM `crc32c*` instructions.
///
/// # Safety
///
/// Caller must ensure the CRC32 extension is available.
#[target_feature(enable = "crc")]
unsafe fn crc32c_arm(mut crc: u32, data: &[u8]) -> u32 {
  let mut chunks8 = data.chunks_exact(8);
  for chunk in &mut chunks8 {
    crc = __crc32cd(crc, le_u64(chunk));
  }

  let mut chunks4 = chunks8.remainder().chunks_exact(4);
  for chunk in &mut chunks4 {
    crc = __crc32cw(crc, le_u32(chunk));
  }

  let mut chunks2 = chunks4.remainder().chunks_exact(2);
  for chunk in &mut chunks2 {
    crc = __crc32ch(crc, le_u16(chunk));
  }

  for &b in chunks2.remainder() {
    crc = __crc32cb(crc, b);
  }

  crc
}

/// CRC-32 (IEEE) using the ARM `crc32*` instructions.
///
/// # Safety
///
/// Caller must ensure the CRC32 extension is available.
#[target_feature(enable = "crc")]
unsafe fn crc32_ieee_arm(mut crc: u32, data: &[u8]) -> u32 {
  let mut chunks8 = data.chunks_exact(8);
  for chunk in &mut chunks8 {
    crc = __crc32d(crc, le_u64(chunk));
  }

  let mut chunks4 = chunks8.remainder().chunks_exact(4);
  for chunk in &mut chunks4 {
    crc = __crc32w(crc, le_u32(chunk));
  }

  let mut chunks2 = chunks4.remainder().chunks_exact(2);
  for chunk in &mut chunks2 {
    crc = __crc32h(crc, le_u16(chunk));
  }

  for &b in chunks2.remainder() {
    crc = __crc32b(crc, b);
  }

  crc
}

/// Safe wrapper for the CRC-32C kernel.
#[inline]
pub(crate) fn crc32c_crc_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: only selected when `Features::has_crc32` (CRC extension) was detected.
  unsafe { crc32c_arm(crc, data) }
}

/// Safe wrapper for the CRC-32 (IEEE) kernel without PMULL.
#[inline]
pub(crate) fn crc32_ieee_crc_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: only selected when `Features::has_crc32` (CRC extension) was detected.
  unsafe { crc32_ieee_arm(crc, data) }
}

// ─────────────────────────────────────────────────────────────────────────────
// PMULL Folding
// ─────────────────────────────────────────────────────────────────────────────

/// One 128-bit lane: lane 0 = low 64 bits = first 8 bytes of the block.
#[derive(Clone, Copy)]
struct Simd(uint64x2_t);

impl Simd {
  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn new(high: u64, low: u64) -> Self {
    Self(vcombine_u64(vcreate_u64(low), vcreate_u64(high)))
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn load(block: &[u8]) -> Self {
    debug_assert_eq!(block.len(), FOLD_BLOCK);
    let (lo, hi) = block.split_at(8);
    Self::new(le_u64(hi), le_u64(lo))
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn xor(self, other: Self) -> Self {
    Self(veorq_u64(self.0, other.0))
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn low_64(self) -> u64 {
    vgetq_lane_u64::<0>(self.0)
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn high_64(self) -> u64 {
    vgetq_lane_u64::<1>(self.0)
  }

  /// Fold 16 bytes forward: `self.low * coeff.high ^ self.high * coeff.low`.
  #[inline]
  #[target_feature(enable = "neon", enable = "aes")]
  unsafe fn fold_16(self, coeff: (u64, u64)) -> Self {
    let a = vreinterpretq_u64_p128(vmull_p64(self.low_64(), coeff.0));
    let b = vreinterpretq_u64_p128(vmull_p64(self.high_64(), coeff.1));
    Self(veorq_u64(a, b))
  }
}

/// Fold a non-empty multiple of 16 bytes, then reduce with two `crc32x`.
///
/// # Safety
///
/// Caller must ensure PMULL (`aes`) and the CRC32 extension are available.
#[target_feature(enable = "neon", enable = "aes", enable = "crc")]
unsafe fn fold_pmull(crc: u32, data: &[u8], consts: &Crc32ClmulConstants) -> u32 {
  let mut blocks = data.chunks_exact(FOLD_BLOCK);
  let Some(first) = blocks.next() else {
    return crc;
  };

  // XOR the register into the low 32 bits of the first block.
  let mut x = Simd::load(first).xor(Simd::new(0, u64::from(crc)));
  for block in blocks {
    x = x.fold_16(consts.fold_16b).xor(Simd::load(block));
  }

  let reduced = __crc32d(0, x.low_64());
  __crc32d(reduced, x.high_64())
}

/// CRC-32 (IEEE) with PMULL folding for the bulk and CRC instructions for
/// the tail.
///
/// # Safety
///
/// Caller must ensure PMULL (`aes`) and the CRC32 extension are available.
#[target_feature(enable = "neon", enable = "aes", enable = "crc")]
unsafe fn crc32_ieee_pmull(mut crc: u32, mut data: &[u8]) -> u32 {
  if data.len() >= FOLD_MIN_LEN {
    let (head, tail) = data.split_at(data.len() & !(FOLD_BLOCK - 1));
    crc = fold_pmull(crc, head, &CRC32_IEEE_CLMUL);
    if tail.is_empty() {
      return crc;
    }
    data = tail;
  }
  crc32_ieee_arm(crc, data)
}

/// Safe wrapper for the fused PMULL + CRC IEEE kernel.
#[inline]
pub(crate) fn crc32_ieee_pmull_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: only selected when both `has_crc32` and `has_clmul` were detected.
  unsafe { crc32_ieee_pmull(crc, data) }
}
