use super::*;

#[test]
#[cfg(not(miri))] // get() returns PORTABLE under Miri, which has a different arch
fn get_reports_the_compilation_arch() {
  let det = get();

  #[cfg(target_arch = "x86_64")]
  assert_eq!(det.arch, Arch::X86_64);
  #[cfg(target_arch = "aarch64")]
  assert_eq!(det.arch, Arch::Aarch64);
  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  assert_eq!(det, Detected::PORTABLE);
}

#[test]
#[cfg(not(miri))] // Uses syscalls for feature detection
fn detect_uncached_is_idempotent() {
  let d1 = detect_uncached();
  let d2 = detect_uncached();
  assert_eq!(d1, d2);
}

#[test]
#[cfg(not(miri))]
fn cache_matches_fresh_probe() {
  assert_eq!(get(), detect_uncached());
  assert_eq!(get(), get());
}

#[test]
fn convenience_functions_agree_with_get() {
  let det = get();
  assert_eq!(caps(), det.caps);
  assert_eq!(arch(), det.arch);
}

#[test]
#[cfg(all(target_arch = "x86_64", not(miri)))]
fn x86_64_baseline() {
  use crate::caps::x86;
  assert!(get().caps.has(x86::SSE2));
}

#[test]
#[cfg(all(target_arch = "aarch64", not(miri)))]
fn aarch64_baseline() {
  use crate::caps::aarch64;
  assert!(get().caps.has(aarch64::NEON));
}

#[test]
#[cfg(all(
  target_arch = "aarch64",
  any(target_os = "macos", target_os = "ios"),
  not(miri)
))]
fn apple_reports_crc_and_pmull_without_probing() {
  use crate::caps::aarch64;
  let caps = caps_static();
  assert!(caps.has(aarch64::CRC_READY));
  assert!(caps.has(aarch64::PMULL_READY));
}

#[test]
#[cfg(miri)]
fn miri_returns_portable() {
  assert_eq!(get(), Detected::PORTABLE);
  assert_eq!(detect_uncached(), Detected::PORTABLE);
}

#[test]
fn caps_static_is_const() {
  const STATIC: Caps = caps_static();
  assert_eq!(STATIC, caps_static());
}

#[test]
#[cfg(not(miri))]
fn caps_static_is_subset_of_runtime() {
  let runtime = get().caps;
  let compile_time = caps_static();
  assert!(
    runtime.has(compile_time),
    "compile-time caps {compile_time} missing from runtime caps {runtime}"
  );
}

#[test]
fn detected_portable_is_empty() {
  assert!(Detected::PORTABLE.caps.is_empty());
  assert_eq!(Detected::PORTABLE.arch, Arch::Other);
}
