//! x86_64 hardware CRC-32 kernels.
//!
//! - CRC-32C: SSE4.2 `crc32` instruction, 8 bytes per step.
//! - CRC-32 (IEEE): x86 has no IEEE `crc32` instruction. Inputs of at least
//!   [`FOLD_MIN_LEN`] bytes fold their 16-byte-aligned prefix with PCLMULQDQ,
//!   reduce 128 -> 32 bits with a width fold plus Barrett reduction, and hand
//!   the short tail to the slice-by-8 tables.
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. The `*_safe` wrappers are only
//! reachable through an [`Accelerator`](crate::Accelerator) whose features
//! were detected on this CPU.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

use super::{
  FOLD_BLOCK, FOLD_MIN_LEN,
  clmul::{CRC32_IEEE_CLMUL, Crc32ClmulConstants},
  portable,
};

// ─────────────────────────────────────────────────────────────────────────────
// CRC-32C (SSE4.2)
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32C update using the SSE4.2 `crc32` instruction.
///
/// `crc` is the raw register.
#[inline]
#[target_feature(enable = "sse4.2")]
unsafe fn crc32c_sse42(crc: u32, data: &[u8]) -> u32 {
  let mut state64 = u64::from(crc);

  let mut chunks8 = data.chunks_exact(8);
  for chunk in &mut chunks8 {
    let mut word = [0u8; 8];
    word.copy_from_slice(chunk);
    state64 = _mm_crc32_u64(state64, u64::from_le_bytes(word));
  }

  let mut state = state64 as u32;

  let mut chunks4 = chunks8.remainder().chunks_exact(4);
  for chunk in &mut chunks4 {
    let mut word = [0u8; 4];
    word.copy_from_slice(chunk);
    state = _mm_crc32_u32(state, u32::from_le_bytes(word));
  }

  let mut chunks2 = chunks4.remainder().chunks_exact(2);
  for chunk in &mut chunks2 {
    let mut half = [0u8; 2];
    half.copy_from_slice(chunk);
    state = _mm_crc32_u16(state, u16::from_le_bytes(half));
  }

  for &b in chunks2.remainder() {
    state = _mm_crc32_u8(state, b);
  }

  state
}

/// Safe wrapper for the CRC-32C SSE4.2 kernel.
#[inline]
pub(crate) fn crc32c_sse42_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: only selected when `Features::has_crc32` (SSE4.2) was detected.
  unsafe { crc32c_sse42(crc, data) }
}

// ─────────────────────────────────────────────────────────────────────────────
// 128-bit lane helper
// ─────────────────────────────────────────────────────────────────────────────

/// One 128-bit lane: lane 0 = low 64 bits = first 8 bytes of the block.
#[derive(Clone, Copy)]
struct Simd(__m128i);

impl Simd {
  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn new(high: u64, low: u64) -> Self {
    Self(_mm_set_epi64x(high as i64, low as i64))
  }

  /// Load 16 bytes; `block` must be exactly [`FOLD_BLOCK`] long.
  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn load(block: &[u8]) -> Self {
    debug_assert_eq!(block.len(), FOLD_BLOCK);
    Self(_mm_loadu_si128(block.as_ptr().cast()))
  }

  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn xor(self, other: Self) -> Self {
    Self(_mm_xor_si128(self.0, other.0))
  }

  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn and(self, other: Self) -> Self {
    Self(_mm_and_si128(self.0, other.0))
  }

  #[inline]
  #[target_feature(enable = "sse2")]
  unsafe fn low_64(self) -> u64 {
    _mm_cvtsi128_si64(self.0) as u64
  }

  #[inline]
  #[target_feature(enable = "sse4.1")]
  unsafe fn high_64(self) -> u64 {
    _mm_extract_epi64::<1>(self.0) as u64
  }

  /// 64x64 -> 128 carryless multiply.
  #[inline]
  #[target_feature(enable = "pclmulqdq", enable = "sse2")]
  unsafe fn mul64(a: u64, b: u64) -> Self {
    let va = _mm_set_epi64x(0, a as i64);
    let vb = _mm_set_epi64x(0, b as i64);
    Self(_mm_clmulepi64_si128::<0x00>(va, vb))
  }

  /// Fold 16 bytes forward: `self.low * coeff.high ^ self.high * coeff.low`.
  #[inline]
  #[target_feature(enable = "pclmulqdq", enable = "sse2")]
  unsafe fn fold_16(self, coeff: Self) -> Self {
    let a = _mm_clmulepi64_si128::<0x10>(self.0, coeff.0);
    let b = _mm_clmulepi64_si128::<0x01>(self.0, coeff.0);
    Self(_mm_xor_si128(a, b))
  }

  /// 16B -> 8B -> 4B width fold; the result feeds [`Simd::barrett`].
  #[inline]
  #[target_feature(enable = "pclmulqdq", enable = "sse4.1")]
  unsafe fn fold_width(self, high: u64, low: u64) -> Self {
    let state = Self::mul64(self.low_64(), low).xor(Self::new(0, self.high_64()));

    let mask = Self::new(u64::MAX, 0xFFFF_FFFF_0000_0000);
    let masked = state.and(mask);
    let shifted = (state.low_64() & 0xFFFF_FFFF) << 32;
    Self::mul64(shifted, high).xor(masked)
  }

  /// Barrett reduction to the raw 32-bit register.
  #[inline]
  #[target_feature(enable = "pclmulqdq", enable = "sse4.1")]
  unsafe fn barrett(self, poly: u64, mu: u64) -> u32 {
    let t1 = Self::mul64(self.low_64(), mu);
    let l = Self::mul64(t1.low_64(), poly);
    self.xor(l).high_64() as u32
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// CRC-32 IEEE (PCLMULQDQ + table tail)
// ─────────────────────────────────────────────────────────────────────────────

/// Fold a non-empty multiple of 16 bytes and reduce to the raw register.
#[target_feature(enable = "pclmulqdq", enable = "sse4.1")]
unsafe fn fold_pclmul(crc: u32, data: &[u8], consts: &Crc32ClmulConstants) -> u32 {
  let mut blocks = data.chunks_exact(FOLD_BLOCK);
  let Some(first) = blocks.next() else {
    return crc;
  };

  // XOR the register into the low 32 bits of the first block.
  let mut x = Simd::load(first).xor(Simd::new(0, u64::from(crc)));

  let coeff = Simd::new(consts.fold_16b.0, consts.fold_16b.1);
  for block in blocks {
    x = x.fold_16(coeff).xor(Simd::load(block));
  }

  let (high, low) = consts.fold_width;
  x.fold_width(high, low).barrett(consts.poly, consts.mu)
}

#[target_feature(enable = "pclmulqdq", enable = "sse4.1")]
unsafe fn crc32_ieee_pclmul(mut crc: u32, mut data: &[u8]) -> u32 {
  if data.len() >= FOLD_MIN_LEN {
    let (head, tail) = data.split_at(data.len() & !(FOLD_BLOCK - 1));
    crc = fold_pclmul(crc, head, &CRC32_IEEE_CLMUL);
    if tail.is_empty() {
      return crc;
    }
    data = tail;
  }
  portable::crc32_ieee(crc, data)
}

/// Safe wrapper for the CRC-32 IEEE PCLMULQDQ kernel.
#[inline]
pub(crate) fn crc32_ieee_pclmul_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: only selected when `Features::has_clmul` (PCLMULQDQ + SSE4.1) was detected.
  unsafe { crc32_ieee_pclmul(crc, data) }
}

#[cfg(all(test, not(miri)))]
mod tests {
  use super::{super::clmul, *};

  fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u32).wrapping_mul(2_654_435_761) as u8).collect()
  }

  fn has_pclmul() -> bool {
    std::arch::is_x86_feature_detected!("pclmulqdq") && std::arch::is_x86_feature_detected!("sse4.1")
  }

  #[test]
  fn sse42_matches_portable() {
    if !std::arch::is_x86_feature_detected!("sse4.2") {
      return;
    }
    let data = pattern(300);
    for len in 0..data.len() {
      assert_eq!(crc32c_sse42_safe(!0, &data[..len]), portable::crc32c(!0, &data[..len]), "len {len}");
    }
  }

  #[test]
  fn pclmul_matches_portable() {
    if !has_pclmul() {
      return;
    }
    let data = pattern(1024 + 15);
    for len in 0..data.len() {
      for crc in [0, !0] {
        assert_eq!(
          crc32_ieee_pclmul_safe(crc, &data[..len]),
          portable::crc32_ieee(crc, &data[..len]),
          "len {len}"
        );
      }
    }
  }

  #[test]
  fn pclmul_fold_matches_software_model() {
    if !has_pclmul() {
      return;
    }
    let data = pattern(16 * 9);
    // SAFETY: features checked above.
    let hw = unsafe { fold_pclmul(0x89AB_CDEF, &data, &clmul::CRC32_IEEE_CLMUL) };
    assert_eq!(hw, clmul::fold_model(0x89AB_CDEF, &data, &clmul::CRC32_IEEE_CLMUL));
  }
}
