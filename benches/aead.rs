use cryptal_sym::aead::{Aead, Ascon, ChaCha20Poly1305, XSalsa20Poly1305};
use cryptal_sym::hash::ascon_hash;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const SIZE: usize = 4096;

fn seal<A: Aead>(mut aead: A, buf: &mut [u8]) -> [u8; 16] {
    aead.write_ad(b"bench header").unwrap();
    aead.encrypt_in_place(buf).unwrap();
    aead.finalize().unwrap()
}

pub fn bench_aead(c: &mut Criterion) {
    let key = [7u8; 32];
    let mut buf = vec![0u8; SIZE];
    let mut group = c.benchmark_group("aead 4 KiB");
    group.throughput(Throughput::Bytes(SIZE as u64));

    group.bench_function("chacha20-poly1305", |b| {
        b.iter(|| seal(ChaCha20Poly1305::new(&key, &[1u8; 12]).unwrap(), black_box(&mut buf)))
    });

    group.bench_function("xsalsa20-poly1305", |b| {
        b.iter(|| seal(XSalsa20Poly1305::new(&key, &[1u8; 24]).unwrap(), black_box(&mut buf)))
    });

    group.bench_function("ascon-128a", |b| {
        b.iter(|| seal(Ascon::ascon128a(&key[..16], &[1u8; 16]).unwrap(), black_box(&mut buf)))
    });

    group.bench_function("ascon-hash", |b| b.iter(|| ascon_hash(black_box(&buf))));

    group.finish();
}

criterion_group!(benches, bench_aead);
criterion_main!(benches);
