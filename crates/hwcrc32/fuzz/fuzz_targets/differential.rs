//! Differential fuzzing of the hardware descriptors.
//!
//! Compares every available hardware path against the portable tables and
//! against `crc32fast`, from an arbitrary starting register.

#![no_main]

use arbitrary::Arbitrary;
use hwcrc32::{Accelerator, Checksum, Crc32, Polynomial, crc32::portable};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  crc: u32,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let Input { crc, data } = input;

  for polynomial in Polynomial::ALL {
    let acc = Accelerator::detect(polynomial);
    let expected = match polynomial {
      Polynomial::Ieee => !portable::crc32_ieee(!crc, &data),
      Polynomial::Castagnoli => !portable::crc32c(!crc, &data),
    };

    match acc.try_update(crc, &data) {
      Ok(hw) => assert_eq!(
        hw,
        expected,
        "{polynomial} via {:?}: hw={hw:#010x}, portable={expected:#010x}, len={}",
        acc.kernel_name(),
        data.len()
      ),
      Err(_) => assert!(!acc.available()),
    }
  }

  let mut reference = crc32fast::Hasher::new_with_initial(crc);
  reference.update(&data);
  let mut ours = Crc32::with_initial(crc);
  ours.update(&data);
  assert_eq!(ours.finalize(), reference.finalize(), "CRC-32 differential mismatch, len={}", data.len());
});
