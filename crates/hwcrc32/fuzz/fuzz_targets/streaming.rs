//! Fuzz target for streaming consistency.
//!
//! Incremental updates at arbitrary split points and resumed hashers must
//! agree with the one-shot checksum.

#![no_main]

use arbitrary::Arbitrary;
use hwcrc32::{Checksum, Crc32, Crc32C};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  splits: Vec<u16>,
}

fuzz_target!(|input: Input| {
  check::<Crc32>(&input.data, &input.splits);
  check::<Crc32C>(&input.data, &input.splits);
});

fn check<C: Checksum<Output = u32>>(data: &[u8], splits: &[u16]) {
  let oneshot = C::checksum(data);

  let mut hasher = C::new();
  let mut rest = data;
  for &split in splits {
    let (head, tail) = rest.split_at(usize::from(split) % (rest.len() + 1));
    hasher.update(head);
    rest = tail;
  }
  hasher.update(rest);
  assert_eq!(hasher.finalize(), oneshot, "incremental mismatch");

  let split = data.len() / 2;
  let (a, b) = data.split_at(split);
  let mut resumed = C::with_initial(C::checksum(a));
  resumed.update(b);
  assert_eq!(resumed.finalize(), oneshot, "resume mismatch");
}
