//! Polynomial algorithm table.
//!
//! For each supported polynomial an [`Accelerator`] bundles the availability
//! flag, the initializer, and the hardware update kernel. The kernel is chosen
//! once, from [`Features`], when the descriptor is built:
//!
//! | Polynomial | x86_64 | aarch64 |
//! |------------|--------|---------|
//! | Castagnoli | SSE4.2 `crc32` | CRC extension |
//! | IEEE | PCLMULQDQ fold, table tail | CRC extension, PMULL fold when present |
//!
//! Using a descriptor whose polynomial is unavailable is a contract
//! violation: [`Accelerator::init`] and [`Accelerator::update`] panic with a
//! message naming the polynomial and the operation. [`Accelerator::try_update`]
//! reports the same condition as [`Unavailable`].
//!
//! ```
//! use hwcrc32::{Accelerator, Polynomial};
//!
//! let crc32c = Accelerator::detect(Polynomial::Castagnoli);
//! if crc32c.available() {
//!   crc32c.init();
//!   assert_eq!(crc32c.update(0, b"123456789"), 0xE306_9283);
//! }
//! ```

use core::fmt;

use platform::Caps;

use crate::{
  crc32::{CASTAGNOLI_POLY, IEEE_POLY},
  dispatch::Selected,
  error::Unavailable,
};

// ─────────────────────────────────────────────────────────────────────────────
// Polynomial
// ─────────────────────────────────────────────────────────────────────────────

/// The two supported CRC-32 polynomials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polynomial {
  /// IEEE 802.3 (Ethernet, zlib, PNG), reflected `0xEDB88320`.
  Ieee,
  /// Castagnoli (iSCSI, ext4, SCTP), reflected `0x82F63B78`.
  Castagnoli,
}

impl Polynomial {
  pub const ALL: [Self; 2] = [Self::Ieee, Self::Castagnoli];

  /// Reflected polynomial constant.
  #[inline]
  #[must_use]
  pub const fn reflected(self) -> u32 {
    match self {
      Self::Ieee => IEEE_POLY,
      Self::Castagnoli => CASTAGNOLI_POLY,
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Ieee => "IEEE",
      Self::Castagnoli => "Castagnoli",
    }
  }
}

impl fmt::Display for Polynomial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Features
// ─────────────────────────────────────────────────────────────────────────────

/// The two capability flags the kernels care about.
///
/// - `has_crc32`: a hardware CRC instruction (x86_64: SSE4.2, Castagnoli
///   only; aarch64: CRC extension, both polynomials).
/// - `has_clmul`: carryless multiplication (x86_64: PCLMULQDQ + SSE4.1;
///   aarch64: PMULL).
///
/// Flags come from the CPU probe and can only be cleared afterwards, so a
/// descriptor never claims an instruction the CPU lacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Features {
  has_crc32: bool,
  has_clmul: bool,
}

impl Features {
  /// No hardware support.
  pub const NONE: Self = Self {
    has_crc32: false,
    has_clmul: false,
  };

  /// Project the cached CPU capabilities onto the two flags.
  #[inline]
  #[must_use]
  pub fn detect() -> Self {
    Self::from_caps(platform::caps())
  }

  /// Project a capability set onto the two flags.
  ///
  /// Crate-internal: the caller must have detected `caps` on this CPU before
  /// any kernel built from the result is run.
  #[must_use]
  #[allow(unused_variables)] // `caps` only used on x86_64/aarch64
  pub(crate) const fn from_caps(caps: Caps) -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      use platform::caps::x86;
      Self {
        has_crc32: caps.has(x86::CRC32C_READY),
        has_clmul: caps.has(x86::PCLMUL_READY),
      }
    }

    #[cfg(target_arch = "aarch64")]
    {
      use platform::caps::aarch64;
      Self {
        has_crc32: caps.has(aarch64::CRC_READY),
        has_clmul: caps.has(aarch64::PMULL_READY),
      }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
      Self::NONE
    }
  }

  #[inline]
  #[must_use]
  pub const fn has_crc32(self) -> bool {
    self.has_crc32
  }

  #[inline]
  #[must_use]
  pub const fn has_clmul(self) -> bool {
    self.has_clmul
  }

  /// The same flags with the CRC instruction cleared.
  #[inline]
  #[must_use]
  pub const fn without_crc32(self) -> Self {
    Self {
      has_crc32: false,
      has_clmul: self.has_clmul,
    }
  }

  /// The same flags with carryless multiplication cleared.
  #[inline]
  #[must_use]
  pub const fn without_clmul(self) -> Self {
    Self {
      has_crc32: self.has_crc32,
      has_clmul: false,
    }
  }
}

impl fmt::Display for Features {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.has_crc32, self.has_clmul) {
      (true, true) => f.write_str("[crc32, clmul]"),
      (true, false) => f.write_str("[crc32]"),
      (false, true) => f.write_str("[clmul]"),
      (false, false) => f.write_str("[]"),
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kernel selection
// ─────────────────────────────────────────────────────────────────────────────

#[allow(unused_variables)] // arguments unused on architectures without kernels
const fn select_kernel(polynomial: Polynomial, features: Features) -> Option<Selected> {
  #[cfg(target_arch = "x86_64")]
  {
    use crate::crc32::x86_64;
    match polynomial {
      Polynomial::Castagnoli if features.has_crc32 => Some(Selected::new("x86_64/sse4.2", x86_64::crc32c_sse42_safe)),
      Polynomial::Ieee if features.has_clmul => Some(Selected::new("x86_64/pclmul+table", x86_64::crc32_ieee_pclmul_safe)),
      _ => None,
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::crc32::aarch64;
    match polynomial {
      Polynomial::Castagnoli if features.has_crc32 => Some(Selected::new("aarch64/crc", aarch64::crc32c_crc_safe)),
      Polynomial::Ieee if features.has_crc32 && features.has_clmul => {
        Some(Selected::new("aarch64/pmull+crc", aarch64::crc32_ieee_pmull_safe))
      }
      Polynomial::Ieee if features.has_crc32 => Some(Selected::new("aarch64/crc", aarch64::crc32_ieee_crc_safe)),
      _ => None,
    }
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    None
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Accelerator
// ─────────────────────────────────────────────────────────────────────────────

/// Hardware descriptor for one polynomial: availability, init, update.
///
/// Values passed to and returned from [`update`](Self::update) use the public
/// (complemented) CRC-32 convention: start from `0`, feed the result back in
/// to continue the stream.
#[derive(Clone, Copy)]
pub struct Accelerator {
  polynomial: Polynomial,
  features: Features,
  kernel: Option<Selected>,
}

impl Accelerator {
  /// The hardware kernel, if any, for the hashers' dispatchers.
  #[inline]
  pub(crate) const fn selected(&self) -> Option<Selected> {
    self.kernel
  }

  /// Build a descriptor from explicit features.
  #[must_use]
  pub const fn new(polynomial: Polynomial, features: Features) -> Self {
    Self {
      polynomial,
      features,
      kernel: select_kernel(polynomial, features),
    }
  }

  /// Build a descriptor from the CPU probe.
  #[must_use]
  pub fn detect(polynomial: Polynomial) -> Self {
    Self::new(polynomial, Features::detect())
  }

  #[inline]
  #[must_use]
  pub const fn polynomial(&self) -> Polynomial {
    self.polynomial
  }

  #[inline]
  #[must_use]
  pub const fn features(&self) -> Features {
    self.features
  }

  /// Whether the hardware path exists for this polynomial.
  #[inline]
  #[must_use]
  pub const fn available(&self) -> bool {
    self.kernel.is_some()
  }

  /// Name of the selected hardware kernel, e.g. `"x86_64/sse4.2"`.
  #[inline]
  #[must_use]
  pub const fn kernel_name(&self) -> Option<&'static str> {
    match self.kernel {
      Some(kernel) => Some(kernel.name),
      None => None,
    }
  }

  /// Check the descriptor before first use.
  ///
  /// # Panics
  ///
  /// Panics if the polynomial is not [`available`](Self::available).
  #[track_caller]
  pub fn init(&self) {
    if !self.available() {
      contract_violation(Unavailable::new(self.polynomial, "init"));
    }
  }

  /// Continue the CRC `crc` over `data` on the hardware path.
  ///
  /// # Panics
  ///
  /// Panics if the polynomial is not [`available`](Self::available).
  #[inline]
  #[track_caller]
  #[must_use]
  pub fn update(&self, crc: u32, data: &[u8]) -> u32 {
    match self.kernel {
      Some(kernel) => kernel.update(crc, data),
      None => contract_violation(Unavailable::new(self.polynomial, "update")),
    }
  }

  /// Like [`update`](Self::update), but reports an unavailable polynomial
  /// as an error instead of panicking.
  ///
  /// # Errors
  ///
  /// Returns [`Unavailable`] if the polynomial has no hardware path.
  #[inline]
  pub fn try_update(&self, crc: u32, data: &[u8]) -> Result<u32, Unavailable> {
    match self.kernel {
      Some(kernel) => Ok(kernel.update(crc, data)),
      None => Err(Unavailable::new(self.polynomial, "update")),
    }
  }
}

impl fmt::Debug for Accelerator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Accelerator")
      .field("polynomial", &self.polynomial)
      .field("features", &self.features)
      .field("kernel", &self.kernel_name())
      .finish()
  }
}

#[cold]
#[inline(never)]
#[track_caller]
fn contract_violation(err: Unavailable) -> ! {
  panic!("{err}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Process-wide descriptors
// ─────────────────────────────────────────────────────────────────────────────

/// Process-wide IEEE descriptor, built from the probe on first use.
#[must_use]
pub fn ieee() -> Accelerator {
  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static IEEE: OnceLock<Accelerator> = OnceLock::new();
    *IEEE.get_or_init(|| Accelerator::detect(Polynomial::Ieee))
  }

  // The probe result is cached; selection from it is a few branches.
  #[cfg(not(feature = "std"))]
  {
    Accelerator::detect(Polynomial::Ieee)
  }
}

/// Process-wide Castagnoli descriptor, built from the probe on first use.
#[must_use]
pub fn castagnoli() -> Accelerator {
  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static CASTAGNOLI: OnceLock<Accelerator> = OnceLock::new();
    *CASTAGNOLI.get_or_init(|| Accelerator::detect(Polynomial::Castagnoli))
  }

  #[cfg(not(feature = "std"))]
  {
    Accelerator::detect(Polynomial::Castagnoli)
  }
}

/// Whether the hardware CRC-32C path exists on this CPU.
#[inline]
#[must_use]
pub fn available_castagnoli() -> bool {
  castagnoli().available()
}

/// # Panics
///
/// Panics if [`available_castagnoli`] is false.
#[track_caller]
pub fn init_castagnoli() {
  castagnoli().init();
}

/// Hardware CRC-32C update in the public convention.
///
/// # Panics
///
/// Panics if [`available_castagnoli`] is false.
#[inline]
#[track_caller]
#[must_use]
pub fn update_castagnoli(crc: u32, data: &[u8]) -> u32 {
  castagnoli().update(crc, data)
}

/// Whether the hardware CRC-32 (IEEE) path exists on this CPU.
#[inline]
#[must_use]
pub fn available_ieee() -> bool {
  ieee().available()
}

/// # Panics
///
/// Panics if [`available_ieee`] is false.
#[track_caller]
pub fn init_ieee() {
  ieee().init();
}

/// Hardware CRC-32 (IEEE) update in the public convention.
///
/// # Panics
///
/// Panics if [`available_ieee`] is false.
#[inline]
#[track_caller]
#[must_use]
pub fn update_ieee(crc: u32, data: &[u8]) -> u32 {
  ieee().update(crc, data)
}
