//! Portable table-driven CRC-32 (slice-by-8 and bytewise).
//!
//! Tables are generated at compile time with `const fn` and embedded in the
//! binary. Every function here works on the raw (non-complemented) register.
//!
//! # Algorithm Overview
//!
//! Slice-by-8 processes 8 bytes per iteration using 8 lookup tables. Table
//! `k` holds the contribution of a byte followed by `k` zero bytes, so the
//! eight lookups for one 64-bit word can be XORed together independently.

// SAFETY: All array indexing in this module uses bounded indices:
// - table indices are masked with `& 0xFF` or come from `u8`
// - table-generation loops run over 0..256 and 0..8
#![allow(clippy::indexing_slicing)]

use super::{CASTAGNOLI_POLY, IEEE_POLY};

// ─────────────────────────────────────────────────────────────────────────────
// Table Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Single CRC-32 table entry for a reflected polynomial.
#[must_use]
pub(crate) const fn crc32_table_entry(poly: u32, index: u8) -> u32 {
  let mut crc = index as u32;
  let mut i = 0;
  while i < 8 {
    if crc & 1 != 0 {
      crc = (crc >> 1) ^ poly;
    } else {
      crc >>= 1;
    }
    i += 1;
  }
  crc
}

/// Generate the 8 slice-by-8 tables for a reflected polynomial.
#[must_use]
pub(crate) const fn generate_crc32_tables_8(poly: u32) -> [[u32; 256]; 8] {
  let mut tables = [[0u32; 256]; 8];

  let mut i = 0usize;
  while i < 256 {
    tables[0][i] = crc32_table_entry(poly, i as u8);
    i += 1;
  }

  let mut k = 1usize;
  while k < 8 {
    i = 0;
    while i < 256 {
      let prev = tables[k - 1][i];
      tables[k][i] = tables[0][(prev & 0xFF) as usize] ^ (prev >> 8);
      i += 1;
    }
    k += 1;
  }

  tables
}

pub(crate) static IEEE_TABLES: [[u32; 256]; 8] = generate_crc32_tables_8(IEEE_POLY);
pub(crate) static CASTAGNOLI_TABLES: [[u32; 256]; 8] = generate_crc32_tables_8(CASTAGNOLI_POLY);

// ─────────────────────────────────────────────────────────────────────────────
// Update
// ─────────────────────────────────────────────────────────────────────────────

/// Update a raw CRC-32 register one byte at a time.
#[inline]
pub(crate) fn crc32_bytewise(mut crc: u32, data: &[u8], table: &[u32; 256]) -> u32 {
  for &b in data {
    let index = ((crc ^ u32::from(b)) & 0xFF) as usize;
    crc = table[index] ^ (crc >> 8);
  }
  crc
}

/// Update a raw CRC-32 register with slice-by-8.
#[inline]
pub(crate) fn crc32_slice8(mut crc: u32, data: &[u8], tables: &[[u32; 256]; 8]) -> u32 {
  let mut chunks = data.chunks_exact(8);

  for chunk in &mut chunks {
    let lo = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) ^ crc;
    let hi = u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);

    crc = tables[7][(lo & 0xFF) as usize]
      ^ tables[6][((lo >> 8) & 0xFF) as usize]
      ^ tables[5][((lo >> 16) & 0xFF) as usize]
      ^ tables[4][(lo >> 24) as usize]
      ^ tables[3][(hi & 0xFF) as usize]
      ^ tables[2][((hi >> 8) & 0xFF) as usize]
      ^ tables[1][((hi >> 16) & 0xFF) as usize]
      ^ tables[0][(hi >> 24) as usize];
  }

  crc32_bytewise(crc, chunks.remainder(), &tables[0])
}

/// Raw-register CRC-32 (IEEE) slice-by-8.
#[inline]
pub fn crc32_ieee(crc: u32, data: &[u8]) -> u32 {
  crc32_slice8(crc, data, &IEEE_TABLES)
}

/// Raw-register CRC-32C (Castagnoli) slice-by-8.
#[inline]
pub fn crc32c(crc: u32, data: &[u8]) -> u32 {
  crc32_slice8(crc, data, &CASTAGNOLI_TABLES)
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Bit-at-a-time reference, no tables.
  fn bitwise(mut crc: u32, data: &[u8], poly: u32) -> u32 {
    for &b in data {
      crc ^= u32::from(b);
      for _ in 0..8 {
        crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
      }
    }
    crc
  }

  #[test]
  fn check_values() {
    assert_eq!(!crc32_ieee(!0, b"123456789"), 0xCBF4_3926);
    assert_eq!(!crc32c(!0, b"123456789"), 0xE306_9283);
  }

  #[test]
  fn table_zero_is_the_classic_table() {
    assert_eq!(IEEE_TABLES[0][1], 0x7707_3096);
    assert_eq!(IEEE_TABLES[0][255], 0x2D02_EF8D);
    assert_eq!(CASTAGNOLI_TABLES[0][1], 0xF26B_8303);
  }

  #[test]
  fn slice8_matches_bitwise_at_every_alignment() {
    let data: Vec<u8> = (0..200u32).map(|i| (i.wrapping_mul(31) ^ 0x5A) as u8).collect();
    for len in 0..data.len() {
      let input = &data[..len];
      assert_eq!(crc32_ieee(0x1234_5678, input), bitwise(0x1234_5678, input, IEEE_POLY), "len {len}");
      assert_eq!(crc32c(!0, input), bitwise(!0, input, CASTAGNOLI_POLY), "len {len}");
    }
  }

  #[test]
  fn empty_input_is_identity() {
    assert_eq!(crc32_ieee(0xDEAD_BEEF, &[]), 0xDEAD_BEEF);
    assert_eq!(crc32c(0, &[]), 0);
  }
}
