//! `std::io` adapters that checksum bytes in flight.
//!
//! ```rust
//! # use traits::Checksum;
//! # #[derive(Clone, Default)]
//! # struct Sum(u32);
//! # impl Checksum for Sum {
//! #   const OUTPUT_SIZE: usize = 4;
//! #   type Output = u32;
//! #   fn new() -> Self { Self(0) }
//! #   fn with_initial(initial: Self::Output) -> Self { Self(initial) }
//! #   fn update(&mut self, data: &[u8]) {
//! #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(u32::from(b)));
//! #   }
//! #   fn finalize(&self) -> Self::Output { self.0 }
//! #   fn reset(&mut self) { self.0 = 0; }
//! # }
//! # use std::io::Cursor;
//! let mut reader = Sum::reader(Cursor::new(b"abc".to_vec()));
//! std::io::copy(&mut reader, &mut std::io::sink())?;
//! assert_eq!(reader.checksum(), 0x61 + 0x62 + 0x63);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, IoSlice, IoSliceMut, Read, Write};

use crate::Checksum;

/// Wraps a [`Read`] and checksums the bytes actually read.
///
/// Short reads are handled: only the `n` bytes returned by the inner reader
/// reach the hasher.
#[derive(Clone, Debug)]
pub struct ChecksumReader<R, C: Checksum> {
  inner: R,
  hasher: C,
}

impl<R, C: Checksum> ChecksumReader<R, C> {
  /// Wrap `inner` with a fresh hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: R) -> Self {
    Self {
      inner,
      hasher: C::new(),
    }
  }

  /// Wrap `inner`, continuing from a previously finalized checksum.
  #[inline]
  #[must_use]
  pub fn with_initial(inner: R, initial: C::Output) -> Self {
    Self {
      inner,
      hasher: C::with_initial(initial),
    }
  }

  /// Checksum of everything read so far.
  #[inline]
  #[must_use]
  pub fn checksum(&self) -> C::Output {
    self.hasher.finalize()
  }

  /// Return the inner reader and the checksum of everything read.
  #[inline]
  pub fn into_parts(self) -> (R, C::Output) {
    let crc = self.hasher.finalize();
    (self.inner, crc)
  }

  #[inline]
  pub fn get_ref(&self) -> &R {
    &self.inner
  }

  /// Mutable access to the inner reader. Bytes read through it directly are
  /// not checksummed.
  #[inline]
  pub fn get_mut(&mut self) -> &mut R {
    &mut self.inner
  }
}

impl<R: Read, C: Checksum> Read for ChecksumReader<R, C> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let n = self.inner.read(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
    let n = self.inner.read_vectored(bufs)?;
    let mut remaining = n;
    for buf in bufs.iter() {
      if remaining == 0 {
        break;
      }
      let take = remaining.min(buf.len());
      if let Some(data) = buf.get(..take) {
        self.hasher.update(data);
      }
      remaining -= take;
    }
    Ok(n)
  }
}

/// Wraps a [`Write`] and checksums the bytes the inner writer accepted.
///
/// Only the prefix reported by a (possibly short) `write` is checksummed, so
/// the checksum always matches what reached the inner writer.
#[derive(Clone, Debug)]
pub struct ChecksumWriter<W, C: Checksum> {
  inner: W,
  hasher: C,
}

impl<W, C: Checksum> ChecksumWriter<W, C> {
  /// Wrap `inner` with a fresh hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: W) -> Self {
    Self {
      inner,
      hasher: C::new(),
    }
  }

  /// Wrap `inner`, continuing from a previously finalized checksum.
  #[inline]
  #[must_use]
  pub fn with_initial(inner: W, initial: C::Output) -> Self {
    Self {
      inner,
      hasher: C::with_initial(initial),
    }
  }

  /// Checksum of everything written so far.
  #[inline]
  #[must_use]
  pub fn checksum(&self) -> C::Output {
    self.hasher.finalize()
  }

  /// Return the inner writer and the checksum of everything written.
  #[inline]
  pub fn into_parts(self) -> (W, C::Output) {
    let crc = self.hasher.finalize();
    (self.inner, crc)
  }

  #[inline]
  pub fn get_ref(&self) -> &W {
    &self.inner
  }
}

impl<W: Write, C: Checksum> Write for ChecksumWriter<W, C> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    let n = self.inner.write(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
    let n = self.inner.write_vectored(bufs)?;
    let mut remaining = n;
    for buf in bufs {
      if remaining == 0 {
        break;
      }
      let take = remaining.min(buf.len());
      if let Some(data) = buf.get(..take) {
        self.hasher.update(data);
      }
      remaining -= take;
    }
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    self.inner.flush()
  }
}

#[cfg(test)]
mod tests {
  use std::{io::Cursor, vec::Vec};

  use super::*;

  #[derive(Clone, Default, Debug)]
  struct Xor(u8);

  impl Checksum for Xor {
    const OUTPUT_SIZE: usize = 1;
    type Output = u8;

    fn new() -> Self {
      Self(0)
    }

    fn with_initial(initial: u8) -> Self {
      Self(initial)
    }

    fn update(&mut self, data: &[u8]) {
      self.0 = data.iter().fold(self.0, |acc, &b| acc ^ b);
    }

    fn finalize(&self) -> u8 {
      self.0
    }

    fn reset(&mut self) {
      self.0 = 0;
    }
  }

  /// Accepts at most `limit` bytes per call.
  struct Trickle {
    out: Vec<u8>,
    limit: usize,
  }

  impl Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      let n = buf.len().min(self.limit);
      self.out.extend_from_slice(&buf[..n]);
      Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn reader_checksums_what_was_read() {
    let data = b"reader payload";
    let mut reader = Xor::reader(Cursor::new(data.to_vec()));
    let mut sink = Vec::new();
    io::copy(&mut reader, &mut sink).unwrap();
    assert_eq!(sink, data);
    assert_eq!(reader.checksum(), Xor::checksum(data));
  }

  #[test]
  fn short_writes_only_checksum_accepted_bytes() {
    let mut writer = ChecksumWriter::<_, Xor>::new(Trickle { out: Vec::new(), limit: 3 });
    let n = writer.write(b"abcdef").unwrap();
    assert_eq!(n, 3);
    assert_eq!(writer.checksum(), Xor::checksum(b"abc"));

    writer.write_all(b"def").unwrap();
    let (inner, crc) = writer.into_parts();
    assert_eq!(inner.out, b"abcdef");
    assert_eq!(crc, Xor::checksum(b"abcdef"));
  }

  #[test]
  fn with_initial_continues() {
    let mut writer = ChecksumWriter::<_, Xor>::with_initial(Vec::new(), Xor::checksum(b"ab"));
    writer.write_all(b"cd").unwrap();
    assert_eq!(writer.checksum(), Xor::checksum(b"abcd"));
  }
}
