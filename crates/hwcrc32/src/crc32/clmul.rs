//! Carryless-multiply folding constants for reflected CRC-32 polynomials.
//!
//! Everything here is `const fn`, so the constants the PCLMULQDQ and PMULL
//! kernels load are computed by the compiler from the polynomial alone.
//! Under test the same arithmetic drives a pure-software rendition of the
//! folding kernels, so the constants are checked on every host.

#[cfg(test)]
use super::CASTAGNOLI_POLY;
use super::{FOLD_BLOCK, IEEE_POLY};

// ─────────────────────────────────────────────────────────────────────────────
// GF(2) polynomial arithmetic (CRC-32 width)
// ─────────────────────────────────────────────────────────────────────────────

/// Carryless multiplication of two 64-bit values, returning the 128-bit
/// product as `(hi, lo)`.
#[must_use]
pub(crate) const fn clmul64(a: u64, b: u64) -> (u64, u64) {
  let mut hi: u64 = 0;
  let mut lo: u64 = 0;

  let mut i: u32 = 0;
  while i < 64 {
    if (a >> i) & 1 != 0 {
      if i == 0 {
        lo ^= b;
      } else {
        lo ^= b << i;
        hi ^= b >> (64 - i);
      }
    }
    i += 1;
  }

  (hi, lo)
}

/// Reduce a 128-bit value modulo `x^32 + poly` (poly in normal form).
#[must_use]
const fn reduce128_crc32(hi: u64, lo: u64, poly: u32) -> u32 {
  let poly_full: u128 = (1u128 << 32) | (poly as u128);
  let mut val: u128 = ((hi as u128) << 64) | (lo as u128);

  let mut bit: u32 = 127;
  while bit >= 32 {
    if ((val >> bit) & 1) != 0 {
      val ^= poly_full << (bit - 32);
    }
    bit -= 1;
  }

  val as u32
}

/// `x^n mod (x^32 + poly)` in GF(2), `poly` in normal form.
#[must_use]
const fn xpow_mod_crc32(mut n: u32, poly: u32) -> u32 {
  if n == 0 {
    return 1;
  }
  if n == 1 {
    return 2;
  }

  let mut result: u32 = 1;
  let mut base: u32 = 2;

  while n > 0 {
    if n & 1 != 0 {
      let (hi, lo) = clmul64(result as u64, base as u64);
      result = reduce128_crc32(hi, lo, poly);
    }
    let (hi, lo) = clmul64(base as u64, base as u64);
    base = reduce128_crc32(hi, lo, poly);
    n >>= 1;
  }

  result
}

/// Reverse the low 33 bits of `v`.
#[must_use]
const fn reverse33(v: u64) -> u64 {
  let mask = (1u64 << 33) - 1;
  (v & mask).reverse_bits() >> 31
}

/// Folding constant `K_n = reverse33(x^n mod P)` for a reflected polynomial.
#[must_use]
pub(crate) const fn fold_k_crc32(reflected_poly: u32, n: u32) -> u64 {
  let normal_poly = reflected_poly.reverse_bits();
  let rem = xpow_mod_crc32(n, normal_poly) as u64;
  reverse33(rem)
}

/// 33-bit reciprocal polynomial `(reflected << 1) | 1`.
#[must_use]
const fn reciprocal_poly_crc32(reflected_poly: u32) -> u64 {
  ((reflected_poly as u64) << 1) | 1
}

/// Barrett constant: inverse series of the reciprocal polynomial modulo `x^33`.
#[must_use]
const fn compute_mu33(poly: u64) -> u64 {
  let mut inv: u64 = 1;

  let mut k: u32 = 1;
  while k < 33 {
    let mut s: u64 = 0;

    let mut i: u32 = 1;
    while i <= k {
      let p_i = (poly >> i) & 1;
      let q_j = (inv >> (k - i)) & 1;
      s ^= p_i & q_j;
      i += 1;
    }

    inv |= s << k;
    k += 1;
  }

  inv
}

/// `(high, low)` coefficient pair that folds a 16-byte lane forward by
/// `shift_bytes`: `(K_{d+32}, K_{d-32})` with `d = 8 * shift_bytes`.
#[must_use]
pub(crate) const fn fold16_coeff_for_bytes_crc32(reflected_poly: u32, shift_bytes: u32) -> (u64, u64) {
  let d = shift_bytes * 8;
  if d < 32 {
    return (0, 0);
  }

  (fold_k_crc32(reflected_poly, d + 32), fold_k_crc32(reflected_poly, d - 32))
}

// ─────────────────────────────────────────────────────────────────────────────
// Constant sets for the folding kernels
// ─────────────────────────────────────────────────────────────────────────────

/// Folding and reduction constants for one reflected CRC-32 polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "aarch64", allow(dead_code))] // aarch64 reduces with `crc32x`
pub(crate) struct Crc32ClmulConstants {
  /// 33-bit reciprocal polynomial for the Barrett step.
  pub poly: u64,
  /// Barrett reciprocal.
  pub mu: u64,
  /// `(high, low)` pair folding one 16-byte block into the next.
  pub fold_16b: (u64, u64),
  /// `(high, low)` pair for the 128 -> 64 -> 32 bit width fold.
  pub fold_width: (u64, u64),
}

impl Crc32ClmulConstants {
  #[must_use]
  pub const fn new(reflected_poly: u32) -> Self {
    let poly = reciprocal_poly_crc32(reflected_poly);

    Self {
      poly,
      mu: compute_mu33(poly),
      fold_16b: fold16_coeff_for_bytes_crc32(reflected_poly, FOLD_BLOCK as u32),
      // 16B -> 8B uses K_96 (same as the 16B fold low coeff), 8B -> 4B uses K_64.
      fold_width: (fold_k_crc32(reflected_poly, 64), fold_k_crc32(reflected_poly, 96)),
    }
  }
}

pub(crate) const CRC32_IEEE_CLMUL: Crc32ClmulConstants = Crc32ClmulConstants::new(IEEE_POLY);
#[cfg(test)]
pub(crate) const CRC32C_CLMUL: Crc32ClmulConstants = Crc32ClmulConstants::new(CASTAGNOLI_POLY);

// ─────────────────────────────────────────────────────────────────────────────
// Software model of the folding kernels
// ─────────────────────────────────────────────────────────────────────────────
//
// A 128-bit lane is held as `u128` with lane 0 (the first 8 input bytes,
// little-endian) in the low half, matching `__m128i` and `uint64x2_t`.

#[cfg(test)]
#[inline]
const fn mul64(a: u64, b: u64) -> u128 {
  let (hi, lo) = clmul64(a, b);
  ((hi as u128) << 64) | lo as u128
}

#[cfg(test)]
#[inline]
const fn lo64(x: u128) -> u64 {
  x as u64
}

#[cfg(test)]
#[inline]
const fn hi64(x: u128) -> u64 {
  (x >> 64) as u64
}

/// One fold step: `x.lo * K_hi ^ x.hi * K_lo`.
#[cfg(test)]
#[inline]
pub(crate) const fn fold_16(x: u128, coeff: (u64, u64)) -> u128 {
  mul64(lo64(x), coeff.0) ^ mul64(hi64(x), coeff.1)
}

/// 128 -> 64 -> 32 bit width fold, as the x86 kernel performs it.
#[cfg(test)]
#[must_use]
pub(crate) const fn fold_width(x: u128, consts: &Crc32ClmulConstants) -> u128 {
  let (high, low) = consts.fold_width;

  // 16B -> 8B
  let state = mul64(lo64(x), low) ^ (hi64(x) as u128);

  // 8B -> 4B
  let mask = (u64::MAX as u128) << 64 | 0xFFFF_FFFF_0000_0000;
  let masked = state & mask;
  let shifted = (lo64(state) & 0xFFFF_FFFF) << 32;
  mul64(shifted, high) ^ masked
}

/// Barrett reduction of a width-folded state to the raw register.
#[cfg(test)]
#[must_use]
pub(crate) const fn barrett(x: u128, consts: &Crc32ClmulConstants) -> u32 {
  let t1 = mul64(lo64(x), consts.mu);
  let l = mul64(lo64(t1), consts.poly);
  hi64(x ^ l) as u32
}

/// Fold `data` (a non-empty multiple of 16 bytes) into a 128-bit remainder
/// that has the same CRC, starting from the raw register `crc`.
#[cfg(test)]
#[must_use]
pub(crate) fn fold_blocks_model(crc: u32, data: &[u8], consts: &Crc32ClmulConstants) -> u128 {
  debug_assert!(!data.is_empty() && data.len() % FOLD_BLOCK == 0);

  let mut blocks = data.chunks_exact(FOLD_BLOCK);
  let mut x = match blocks.next() {
    Some(first) => load(first) ^ u128::from(crc),
    None => return u128::from(crc),
  };
  for block in blocks {
    x = fold_16(x, consts.fold_16b) ^ load(block);
  }
  x
}

/// Full model of the x86 fold kernel: fold, width-fold, Barrett.
#[cfg(test)]
#[must_use]
pub(crate) fn fold_model(crc: u32, data: &[u8], consts: &Crc32ClmulConstants) -> u32 {
  let x = fold_blocks_model(crc, data, consts);
  barrett(fold_width(x, consts), consts)
}

#[cfg(test)]
#[inline]
fn load(block: &[u8]) -> u128 {
  let mut bytes = [0u8; FOLD_BLOCK];
  bytes.copy_from_slice(block);
  u128::from_le_bytes(bytes)
}
