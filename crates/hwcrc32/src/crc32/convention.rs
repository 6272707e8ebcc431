//! One's-complement convention adapter.
//!
//! CRC-32 complements the register before the first byte and after the
//! last one. Kernels work on the raw register; callers see the complemented
//! value. Every kernel call that crosses the public boundary goes through
//! [`complemented`].

/// Raw-register kernel signature: `fn(register, data) -> register`.
pub type RawKernel = fn(u32, &[u8]) -> u32;

/// Run `kernel` on the raw register behind the public value `crc`.
///
/// Feeding the result back in continues the same stream, so chained calls
/// compose: `complemented(complemented(c, a, k), b, k)` is the CRC of `a || b`.
#[inline(always)]
#[must_use]
pub fn complemented(crc: u32, data: &[u8], kernel: RawKernel) -> u32 {
  !kernel(!crc, data)
}

#[cfg(test)]
mod tests {
  use super::{super::portable, *};

  #[test]
  fn zero_public_value_is_all_ones_register() {
    fn observe(reg: u32, _: &[u8]) -> u32 {
      assert_eq!(reg, u32::MAX);
      reg
    }
    assert_eq!(complemented(0, b"", observe), 0);
  }

  #[test]
  fn empty_input_returns_input() {
    for crc in [0, 1, 0xCBF4_3926, u32::MAX] {
      assert_eq!(complemented(crc, &[], portable::crc32_ieee), crc);
    }
  }

  #[test]
  fn chained_calls_compose() {
    let data = b"The quick brown fox jumps over the lazy dog";
    let (a, b) = data.split_at(17);
    let whole = complemented(0, data, portable::crc32c);
    let split = complemented(complemented(0, a, portable::crc32c), b, portable::crc32c);
    assert_eq!(whole, split);
  }

  #[test]
  fn check_value_through_adapter() {
    assert_eq!(complemented(0, b"123456789", portable::crc32_ieee), 0xCBF4_3926);
    assert_eq!(complemented(0, b"123456789", portable::crc32c), 0xE306_9283);
  }
}
