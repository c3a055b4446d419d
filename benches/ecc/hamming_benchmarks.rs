use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hamcheck::ecc::{fletcher_checksum, Bits, HammingCodec, NoisyChannel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_bits(len: usize, seed: u64) -> Bits {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

fn bench_decode(c: &mut Criterion) {
    let codec = HammingCodec::new();
    let mut group = c.benchmark_group("hamming_decode");

    for &m in &[4usize, 57, 247, 1013] {
        let codeword = codec.encode(&random_bits(m, m as u64)).unwrap();
        let noisy = NoisyChannel::noiseless(1)
            .flip_exact(&codeword, 1)
            .unwrap()
            .bits;

        group.bench_with_input(BenchmarkId::new("clean", m), &codeword, |b, cw| {
            b.iter(|| codec.decode(black_box(cw)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("single_error", m), &noisy, |b, cw| {
            b.iter(|| codec.decode(black_box(cw)).unwrap())
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let codec = HammingCodec::new();
    let mut group = c.benchmark_group("hamming_encode");

    for &m in &[4usize, 57, 247, 1013] {
        let payload = random_bits(m, 17);
        group.bench_with_input(BenchmarkId::from_parameter(m), &payload, |b, p| {
            b.iter(|| codec.encode(black_box(p)).unwrap())
        });
    }

    group.finish();
}

fn bench_fletcher(c: &mut Criterion) {
    let data = random_bits(8192, 5);
    let mut group = c.benchmark_group("fletcher");

    for &block in &[8usize, 16, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(block), &block, |b, &size| {
            b.iter(|| fletcher_checksum(black_box(&data), size).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_fletcher);
criterion_main!(benches);
