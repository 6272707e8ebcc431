//! Kernel dispatch for the streaming hashers.
//!
//! A [`Crc32Dispatcher`] runs its selector once and caches the [`Selected`]
//! kernel in a `OnceLock`. Without `std` the selector runs per call; it only
//! reads the capability cache (acquire/release atomics in `platform`) and the
//! result never changes.

use core::fmt;

use crate::crc32::convention::{self, RawKernel};

/// A named raw-register kernel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Selected {
  /// Diagnostic name, e.g. `"aarch64/pmull+crc"`.
  pub name: &'static str,
  pub func: RawKernel,
}

impl Selected {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: RawKernel) -> Self {
    Self { name, func }
  }

  /// Continue a public-convention CRC through this kernel.
  #[inline]
  #[must_use]
  pub fn update(&self, crc: u32, data: &[u8]) -> u32 {
    convention::complemented(crc, data, self.func)
  }
}

/// Write-once kernel cache for one polynomial.
pub(crate) struct Crc32Dispatcher {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<Selected>,
  selector: fn() -> Selected,
}

impl Crc32Dispatcher {
  #[must_use]
  pub const fn new(selector: fn() -> Selected) -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),
      selector,
    }
  }

  #[inline]
  #[must_use]
  pub fn get(&self) -> Selected {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(self.selector)
    }

    #[cfg(not(feature = "std"))]
    {
      (self.selector)()
    }
  }

  #[inline]
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    self.get().name
  }

  #[inline]
  #[must_use]
  pub fn update(&self, crc: u32, data: &[u8]) -> u32 {
    self.get().update(crc, data)
  }
}

impl fmt::Debug for Crc32Dispatcher {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Crc32Dispatcher")
      .field("backend", &self.backend_name())
      .finish_non_exhaustive()
  }
}
