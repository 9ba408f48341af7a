// -*- mode: rust; -*-
//
// This file is part of ed25519-rfc8032.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

use criterion::{criterion_group, criterion_main, Criterion};

use rand::rngs::OsRng;

use ed25519_rfc8032::{Keypair, PublicKey, Signature};

fn sign(c: &mut Criterion) {
    let mut csprng = OsRng;
    let keypair: Keypair = Keypair::generate(&mut csprng);
    let msg: &[u8] = b"";

    c.bench_function("Ed25519 signing", move |b| b.iter(|| keypair.sign(msg)));
}

fn verify(c: &mut Criterion) {
    let mut csprng = OsRng;
    let keypair: Keypair = Keypair::generate(&mut csprng);
    let msg: &[u8] = b"";
    let sig: Signature = keypair.sign(msg);

    c.bench_function("Ed25519 signature verification", move |b| {
        b.iter(|| keypair.verify(msg, &sig))
    });
}

fn key_generation(c: &mut Criterion) {
    let mut csprng = OsRng;

    c.bench_function("Ed25519 keypair generation", move |b| {
        b.iter(|| Keypair::generate(&mut csprng))
    });
}

fn derive_public_key(c: &mut Criterion) {
    let mut csprng = OsRng;
    let keypair: Keypair = Keypair::generate(&mut csprng);

    c.bench_function("Ed25519 public key derivation", move |b| {
        b.iter(|| PublicKey::from(&keypair.secret))
    });
}

fn precomputation(c: &mut Criterion) {
    c.bench_function("Ed25519 basepoint table lookup (after init)", move |b| {
        b.iter(ed25519_rfc8032::precompute)
    });
}

criterion_group! {
    name = ed25519_benches;
    config = Criterion::default();
    targets =
        sign,
        verify,
        key_generation,
        derive_public_key,
        precomputation,
}
criterion_main!(ed25519_benches);
