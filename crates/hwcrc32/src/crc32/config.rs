//! CRC-32 runtime configuration.
//!
//! One knob: `HWCRC32_FORCE` (read once, `std` only) pins the streaming
//! hashers to the portable tables. It never changes what
//! [`Accelerator::available`](crate::Accelerator::available) reports; the
//! algorithm table always describes the hardware.

/// Forced backend selection for the CRC-32 hashers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Crc32Force {
  /// Hardware when available, portable otherwise.
  #[default]
  Auto,
  /// Always use the portable slice-by-8 tables.
  Portable,
}

impl Crc32Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
    }
  }

  /// Parse an override value. Unknown or empty values yield `None`.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable")
      || value.eq_ignore_ascii_case("scalar")
      || value.eq_ignore_ascii_case("table")
    {
      return Some(Self::Portable);
    }
    None
  }
}

/// Name of the environment variable holding the force mode.
pub const FORCE_ENV: &str = "HWCRC32_FORCE";

#[cfg(feature = "std")]
fn read_env_force() -> Crc32Force {
  std::env::var(FORCE_ENV)
    .ok()
    .and_then(|value| Crc32Force::parse(&value))
    .unwrap_or_default()
}

/// The effective force mode, read from the environment on first use.
#[cfg(feature = "std")]
#[must_use]
pub fn force() -> Crc32Force {
  use std::sync::OnceLock;
  static FORCE: OnceLock<Crc32Force> = OnceLock::new();
  *FORCE.get_or_init(read_env_force)
}

/// The effective force mode. Without `std` there is no environment.
#[cfg(not(feature = "std"))]
#[must_use]
pub fn force() -> Crc32Force {
  Crc32Force::Auto
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_accepts_aliases() {
    assert_eq!(Crc32Force::parse("portable"), Some(Crc32Force::Portable));
    assert_eq!(Crc32Force::parse(" TABLE "), Some(Crc32Force::Portable));
    assert_eq!(Crc32Force::parse("scalar"), Some(Crc32Force::Portable));
    assert_eq!(Crc32Force::parse("Auto"), Some(Crc32Force::Auto));
  }

  #[test]
  fn parse_rejects_unknown() {
    assert_eq!(Crc32Force::parse(""), None);
    assert_eq!(Crc32Force::parse("hwcrc"), None);
    assert_eq!(Crc32Force::parse("pclmul"), None);
  }

  #[test]
  fn force_is_stable() {
    assert_eq!(force(), force());
  }

  #[test]
  fn as_str_round_trips() {
    for mode in [Crc32Force::Auto, Crc32Force::Portable] {
      assert_eq!(Crc32Force::parse(mode.as_str()), Some(mode));
    }
  }
}
