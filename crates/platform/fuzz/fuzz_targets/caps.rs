//! Fuzz target for `Caps` bitset operations.
//!
//! Checks that:
//! - No panics on arbitrary input
//! - Union/intersection behave as set algebra
//! - `count()` matches the popcount of the underlying words
//! - Every displayed name corresponds to a contained feature

#![no_main]

use libfuzzer_sys::fuzz_target;
use platform::Caps;

fuzz_target!(|data: ([u64; 2], [u64; 2])| {
  let a = Caps::from_raw(data.0);
  let b = Caps::from_raw(data.1);

  assert!(a.has(a), "caps must contain itself");
  assert!(a.has(Caps::NONE));

  let expected_count: u32 = data.0.iter().map(|w| w.count_ones()).sum();
  assert_eq!(a.count(), expected_count, "count() must equal sum of popcounts");
  assert_eq!(a.is_empty(), expected_count == 0);

  assert_eq!(a | Caps::NONE, a);
  assert_eq!(a & Caps::NONE, Caps::NONE);
  assert_eq!(a | b, b | a);
  assert_eq!(a & b, b & a);

  let union = a | b;
  assert!(union.has(a) && union.has(b), "union must contain both operands");
  let inter = a & b;
  assert!(a.has(inter) && b.has(inter), "both operands must contain the intersection");

  for n in 0u8..128 {
    let single = Caps::bit(n);
    let word = usize::from(n / 64);
    let expected = data.0[word] & (1u64 << (n % 64)) != 0;
    assert_eq!(a.has(single), expected, "has(Caps::bit({n})) disagrees with raw word");
  }

  // Display must not panic on arbitrary bit patterns.
  let _ = a.names().count();
});
