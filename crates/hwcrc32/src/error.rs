//! Error type for hardware-only entry points.

use core::fmt;

use crate::arch::Polynomial;

/// A hardware CRC entry point was used on a CPU that lacks the instructions.
///
/// This is a caller bug (the caller should have checked
/// [`Accelerator::available`](crate::Accelerator::available) first), not a
/// condition to retry.
///
/// # Examples
///
/// ```
/// use hwcrc32::{Accelerator, Features, Polynomial};
///
/// let none = Accelerator::new(Polynomial::Castagnoli, Features::NONE);
/// let err = none.try_update(0, b"data").unwrap_err();
/// assert_eq!(
///   err.to_string(),
///   "hardware Castagnoli CRC-32 not available: update called"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unavailable {
  polynomial: Polynomial,
  operation: &'static str,
}

impl Unavailable {
  #[inline]
  #[must_use]
  pub(crate) const fn new(polynomial: Polynomial, operation: &'static str) -> Self {
    Self { polynomial, operation }
  }

  /// The polynomial whose hardware path was requested.
  #[inline]
  #[must_use]
  pub const fn polynomial(&self) -> Polynomial {
    self.polynomial
  }

  /// The misused operation (`"init"` or `"update"`).
  #[inline]
  #[must_use]
  pub const fn operation(&self) -> &'static str {
    self.operation
  }
}

impl fmt::Display for Unavailable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "hardware {} CRC-32 not available: {} called",
      self.polynomial.name(),
      self.operation
    )
  }
}

impl core::error::Error for Unavailable {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_names_polynomial_and_operation() {
    let err = Unavailable::new(Polynomial::Ieee, "init");
    assert_eq!(err.to_string(), "hardware IEEE CRC-32 not available: init called");
    assert_eq!(err.polynomial(), Polynomial::Ieee);
    assert_eq!(err.operation(), "init");
  }

  #[test]
  fn is_std_error() {
    fn assert_error<E: core::error::Error + Send + Sync + 'static>() {}
    assert_error::<Unavailable>();
  }
}
