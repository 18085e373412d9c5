use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stakepoll_types::{Ballot, Salt, VoterAddress};

fn blake2b_256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("blake2b_256_256B", |b| {
        b.iter(|| stakepoll_crypto::blake2b_256(black_box(&data)))
    });
}

fn commitment_bench(c: &mut Criterion) {
    let voter = VoterAddress::new("bench_voter");
    let salt = Salt::new([0x5Au8; 32]);
    let ballot = Ballot::Value(31);

    c.bench_function("compute_commitment", |b| {
        b.iter(|| stakepoll_crypto::compute_commitment(black_box(&voter), &ballot, &salt))
    });
}

fn verify_commitment_bench(c: &mut Criterion) {
    let voter = VoterAddress::new("bench_voter");
    let salt = Salt::new([0x5Au8; 32]);
    let ballot = Ballot::Signal(true);
    let commitment = stakepoll_crypto::compute_commitment(&voter, &ballot, &salt);

    c.bench_function("verify_commitment", |b| {
        b.iter(|| {
            stakepoll_crypto::verify_commitment(black_box(&commitment), &voter, &ballot, &salt)
        })
    });
}

criterion_group!(
    benches,
    blake2b_256_bench,
    commitment_bench,
    verify_commitment_bench
);
criterion_main!(benches);
