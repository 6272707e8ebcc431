//! CRC-32 / CRC-32C benchmarks.
//!
//! Run: `cargo bench -p hwcrc32`
//! Portable only: `HWCRC32_FORCE=portable cargo bench -p hwcrc32`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hwcrc32::{Accelerator, Checksum, Crc32, Crc32C, DispatchInfo, Polynomial, crc32::portable};

/// Standard benchmark sizes.
const SIZES: [usize; 7] = [16, 64, 256, 1024, 4096, 65536, 1048576];

const CRC_ISCSI: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISCSI);

/// Hashers through the cached dispatcher.
fn bench_dispatch(c: &mut Criterion) {
  eprintln!("{}", DispatchInfo::current());

  let mut group = c.benchmark_group("crc32/dispatch");
  for size in SIZES {
    let data = vec![0xA5u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::new("ieee", size), &data, |b, data| {
      b.iter(|| core::hint::black_box(Crc32::checksum(data)));
    });
    group.bench_with_input(BenchmarkId::new("castagnoli", size), &data, |b, data| {
      b.iter(|| core::hint::black_box(Crc32C::checksum(data)));
    });
  }
  group.finish();
}

/// Hardware descriptors directly, skipped where unavailable.
fn bench_accelerator(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32/accelerator");
  for polynomial in Polynomial::ALL {
    let acc = Accelerator::detect(polynomial);
    let Some(kernel) = acc.kernel_name() else {
      eprintln!("Skipping {polynomial}: no hardware path");
      continue;
    };
    for size in SIZES {
      let data = vec![0x5Au8; size];
      group.throughput(Throughput::Bytes(size as u64));
      group.bench_with_input(BenchmarkId::new(kernel, size), &data, |b, data| {
        b.iter(|| core::hint::black_box(acc.update(0, data)));
      });
    }
  }
  group.finish();
}

/// Slice-by-8 tables.
fn bench_portable(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32/portable");
  for size in SIZES {
    let data = vec![0x3Cu8; size];
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(BenchmarkId::new("ieee", size), &data, |b, data| {
      b.iter(|| core::hint::black_box(!portable::crc32_ieee(!0, data)));
    });
    group.bench_with_input(BenchmarkId::new("castagnoli", size), &data, |b, data| {
      b.iter(|| core::hint::black_box(!portable::crc32c(!0, data)));
    });
  }
  group.finish();
}

/// Reference crates for comparison.
fn bench_comparison(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32/comp");
  for size in SIZES {
    let data = vec![0xC3u8; size];
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(BenchmarkId::new("crc32fast", size), &data, |b, data| {
      b.iter(|| core::hint::black_box(crc32fast::hash(data)));
    });
    group.bench_with_input(BenchmarkId::new("crc/iscsi", size), &data, |b, data| {
      b.iter(|| core::hint::black_box(CRC_ISCSI.checksum(data)));
    });
    group.bench_with_input(BenchmarkId::new("crc-fast/iscsi", size), &data, |b, data| {
      b.iter(|| core::hint::black_box(crc_fast::checksum(crc_fast::CrcAlgorithm::Crc32Iscsi, data)));
    });
  }
  group.finish();
}

criterion_group!(
  benches,
  bench_dispatch,
  bench_accelerator,
  bench_portable,
  bench_comparison
);
criterion_main!(benches);
