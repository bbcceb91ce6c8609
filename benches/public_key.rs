//! Criterion suite for the public-key primitives: box, sign, and
//! base-point scalar multiplication.

use criterion::{criterion_group, criterion_main, Criterion};
use nacl_profile_bench::harness::BenchConfig;
use nacl_profile_bench::provider::{LibraryVariant, NaclSuite, KEY_LEN};
use std::hint::black_box;

fn bench_box(c: &mut Criterion) {
    let suite = NaclSuite::load(LibraryVariant::Fast);
    let cfg = BenchConfig { seed: 0 };
    let mut rng = cfg.rng();
    let alice = suite.box_keypair(&mut rng);
    let bob = suite.box_keypair(&mut rng);
    let nonce = *b"123456789012345678901234";
    let msg = vec![b'a'; 1023];
    let boxed = suite.box_seal(&msg, &nonce, &alice.public, &bob.secret);

    c.bench_function("box_seal_1023", |b| {
        b.iter(|| suite.box_seal(black_box(&msg), &nonce, &alice.public, &bob.secret));
    });
    c.bench_function("box_open_1023", |b| {
        b.iter(|| suite.box_open(black_box(&boxed), &nonce, &bob.public, &alice.secret));
    });
}

fn bench_sign(c: &mut Criterion) {
    let suite = NaclSuite::load(LibraryVariant::Fast);
    let cfg = BenchConfig { seed: 0 };
    let keypair = suite.sign_keypair(&mut cfg.rng());
    let msg = vec![b'a'; 127];
    let signed = suite.sign(&msg, &keypair);

    c.bench_function("sign_127", |b| {
        b.iter(|| suite.sign(black_box(&msg), &keypair));
    });
    c.bench_function("sign_open_127", |b| {
        b.iter(|| suite.sign_open(black_box(&signed), &keypair.verifying));
    });
}

fn bench_scalarmult(c: &mut Criterion) {
    let suite = NaclSuite::load(LibraryVariant::Fast);
    let n: [u8; KEY_LEN] = core::array::from_fn(|i| i as u8);

    c.bench_function("scalarmult_base", |b| {
        b.iter(|| suite.scalarmult_base(black_box(&n)));
    });
}

criterion_group!(benches, bench_box, bench_sign, bench_scalarmult);
criterion_main!(benches);
