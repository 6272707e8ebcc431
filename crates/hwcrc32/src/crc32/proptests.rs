extern crate std;

use crc_fast::CrcAlgorithm;
use proptest::prelude::*;

use super::*;
use crate::arch::Polynomial;

const CRC_IEEE: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
const CRC_ISCSI: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISCSI);

fn portable_public(polynomial: Polynomial, crc: u32, data: &[u8]) -> u32 {
  match polynomial {
    Polynomial::Ieee => convention::complemented(crc, data, portable::crc32_ieee),
    Polynomial::Castagnoli => convention::complemented(crc, data, portable::crc32c),
  }
}

proptest! {
  #[test]
  fn crc32_matches_portable(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let ours = Crc32::checksum(&data);
    let portable = portable::crc32_ieee(!0, &data) ^ !0;
    prop_assert_eq!(ours, portable);
  }

  #[test]
  fn crc32c_matches_portable(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let ours = Crc32C::checksum(&data);
    let portable = portable::crc32c(!0, &data) ^ !0;
    prop_assert_eq!(ours, portable);
  }

  // ─────────────────────────────────────────────────────────────────────────────
  // Hardware descriptors against the portable path
  // ─────────────────────────────────────────────────────────────────────────────

  #[test]
  fn accelerator_matches_portable(
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    crc in any::<u32>(),
    castagnoli in any::<bool>(),
  ) {
    let polynomial = if castagnoli { Polynomial::Castagnoli } else { Polynomial::Ieee };
    let acc = Accelerator::detect(polynomial);
    prop_assume!(acc.available());
    prop_assert_eq!(acc.update(crc, &data), portable_public(polynomial, crc, &data));
  }

  #[test]
  fn complement_is_self_inverse(data in proptest::collection::vec(any::<u8>(), 0..=512), crc in any::<u32>()) {
    for polynomial in Polynomial::ALL {
      prop_assert_eq!(portable_public(polynomial, !!crc, &data), portable_public(polynomial, crc, &data));
      let acc = Accelerator::detect(polynomial);
      if acc.available() {
        prop_assert_eq!(acc.update(!!crc, &data), acc.update(crc, &data));
      }
    }
  }

  #[test]
  fn clmul_model_matches_portable(blocks in proptest::collection::vec(any::<[u8; 16]>(), 1..=64), crc in any::<u32>()) {
    let data: Vec<u8> = blocks.concat();
    prop_assert_eq!(clmul::fold_model(crc, &data, &clmul::CRC32_IEEE_CLMUL), portable::crc32_ieee(crc, &data));
    prop_assert_eq!(clmul::fold_model(crc, &data, &clmul::CRC32C_CLMUL), portable::crc32c(crc, &data));
  }

  // ─────────────────────────────────────────────────────────────────────────────
  // Cross-validation against crc32fast, crc, and crc-fast-rust
  // ─────────────────────────────────────────────────────────────────────────────

  #[test]
  fn crc32_matches_crc32fast(data in proptest::collection::vec(any::<u8>(), 0..=4096), initial in any::<u32>()) {
    let mut ours = Crc32::with_initial(initial);
    ours.update(&data);

    let mut reference = crc32fast::Hasher::new_with_initial(initial);
    reference.update(&data);

    prop_assert_eq!(ours.finalize(), reference.finalize());
  }

  #[test]
  fn crc32_matches_crc_crate(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    prop_assert_eq!(Crc32::checksum(&data), CRC_IEEE.checksum(&data));
  }

  #[test]
  fn crc32c_matches_crc_crate(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    prop_assert_eq!(Crc32C::checksum(&data), CRC_ISCSI.checksum(&data));
  }

  #[test]
  fn crc32_matches_crc_fast_rust(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let ours = Crc32::checksum(&data);
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32IsoHdlc, &data) as u32;
    prop_assert_eq!(ours, reference);
  }

  #[test]
  fn crc32c_matches_crc_fast_rust(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let ours = Crc32C::checksum(&data);
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, &data) as u32;
    prop_assert_eq!(ours, reference);
  }

  #[test]
  fn crc32_streaming_matches_crc_fast_rust(data in proptest::collection::vec(any::<u8>(), 0..=4096), chunk in 1usize..=257) {
    let mut ours = Crc32::new();
    let mut reference = crc_fast::Digest::new(CrcAlgorithm::Crc32IsoHdlc);

    for part in data.chunks(chunk) {
      ours.update(part);
      reference.update(part);
    }

    prop_assert_eq!(ours.finalize(), reference.finalize() as u32);
  }

  #[test]
  fn crc32c_streaming_matches_crc_fast_rust(data in proptest::collection::vec(any::<u8>(), 0..=4096), chunk in 1usize..=257) {
    let mut ours = Crc32C::new();
    let mut reference = crc_fast::Digest::new(CrcAlgorithm::Crc32Iscsi);

    for part in data.chunks(chunk) {
      ours.update(part);
      reference.update(part);
    }

    prop_assert_eq!(ours.finalize(), reference.finalize() as u32);
  }

  #[test]
  fn resume_matches_oneshot(data in proptest::collection::vec(any::<u8>(), 0..=2048), split in any::<prop::sample::Index>()) {
    let split = split.index(data.len() + 1);
    let (a, b) = data.split_at(split);

    let mut resumed = Crc32C::resume(Crc32C::checksum(a));
    resumed.update(b);
    prop_assert_eq!(resumed.finalize(), Crc32C::checksum(&data));

    let mut resumed = Crc32::resume(Crc32::checksum(a));
    resumed.update(b);
    prop_assert_eq!(resumed.finalize(), Crc32::checksum(&data));
  }
}

#[test]
fn test_vectors_crc32() {
  assert_eq!(Crc32::checksum(b"123456789"), 0xCBF4_3926);
  assert_eq!(CRC_IEEE.checksum(b"123456789"), 0xCBF4_3926);
}

#[test]
fn test_vectors_crc32c() {
  assert_eq!(Crc32C::checksum(b"123456789"), 0xE306_9283);
  assert_eq!(CRC_ISCSI.checksum(b"123456789"), 0xE306_9283);
}
