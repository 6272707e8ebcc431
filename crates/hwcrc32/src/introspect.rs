//! Kernel dispatch introspection.
//!
//! # Examples
//!
//! ```
//! use hwcrc32::{Crc32C, DispatchInfo};
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//! // e.g. "x86_64 [crc32, clmul] ieee=x86_64/pclmul+table crc32c=x86_64/sse4.2"
//!
//! println!("CRC-32C backend: {}", Crc32C::backend_name());
//! ```

use core::fmt;

use platform::Arch;

use crate::{
  arch::Features,
  crc32::{Crc32, Crc32C},
};

/// Detected capability flags and the kernel each hasher selected.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DispatchInfo {
  arch: Arch,
  features: Features,
  ieee: &'static str,
  castagnoli: &'static str,
}

impl DispatchInfo {
  /// Dispatch info for the current process.
  ///
  /// Both the probe and the kernel selection are cached, so repeated calls
  /// are cheap.
  #[inline]
  #[must_use]
  pub fn current() -> Self {
    Self {
      arch: platform::arch(),
      features: Features::detect(),
      ieee: Crc32::backend_name(),
      castagnoli: Crc32C::backend_name(),
    }
  }

  #[inline]
  #[must_use]
  pub const fn arch(&self) -> Arch {
    self.arch
  }

  #[inline]
  #[must_use]
  pub const fn features(&self) -> Features {
    self.features
  }

  /// Kernel behind [`Crc32`].
  #[inline]
  #[must_use]
  pub const fn ieee_kernel(&self) -> &'static str {
    self.ieee
  }

  /// Kernel behind [`Crc32C`].
  #[inline]
  #[must_use]
  pub const fn castagnoli_kernel(&self) -> &'static str {
    self.castagnoli
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} ieee={} crc32c={}",
      self.arch, self.features, self.ieee, self.castagnoli
    )
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("arch", &self.arch)
      .field("features", &format_args!("{}", self.features))
      .field("ieee", &self.ieee)
      .field("crc32c", &self.castagnoli)
      .finish()
  }
}
