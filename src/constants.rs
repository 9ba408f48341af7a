// -*- mode: rust; -*-
//
// This file is part of ed25519-rfc8032.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Various constants: curve parameters, useful field elements like
//! \\(\sqrt{-1}\\), the basepoint in the representations used by the
//! group operations, and the byte lengths of the wire formats.
//!
//! This module also owns the shared table of precomputed basepoint
//! multiples, which is constructed once on first use and immutable
//! thereafter.

use std::sync::OnceLock;

use crate::curve_models::AffineNielsPoint;
use crate::edwards::{EdwardsBasepointTable, EdwardsPoint};
use crate::field::FieldElement;

/// The length of an ed25519 EdDSA `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// The length of an ed25519 EdDSA `SecretKey`, in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The length of an ed25519 EdDSA `PublicKey`, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The length of an ed25519 EdDSA `Keypair`, in bytes.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// The length of an `ExpandedSecretKey`, in bytes.
pub const EXPANDED_SECRET_KEY_LENGTH: usize = 64;

/// Edwards `d` value, equal to `-121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement::from_limbs([
    56195235, 13857412, 51736253, 6949390, 114729, 24766616, 60832955, 30306712, 48412415,
    21499315,
]);

/// Edwards `2*d` value, equal to `2*(-121665/121666) mod p`.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement::from_limbs([
    45281625, 27714825, 36363642, 13898781, 229458, 15978800, 54557047, 27058993, 29715967,
    9444199,
]);

/// Precomputed value of one of the square roots of -1 (mod p).
pub(crate) const SQRT_M1: FieldElement = FieldElement::from_limbs([
    34513072, 25610706, 9377949, 3500415, 12389472, 33281959, 41962654, 31548777, 326685, 11406482,
]);

/// The field order \\( p = 2\^{255} - 19 \\) as eight 32-bit
/// little-endian words, for variable-time canonicality checks on
/// compressed points.
pub(crate) const P_WORDS: [u32; 8] = [
    0xffff_ffed, 0xffff_ffff, 0xffff_ffff, 0xffff_ffff, 0xffff_ffff, 0xffff_ffff, 0xffff_ffff,
    0x7fff_ffff,
];

/// The group order \\( \ell = 2\^{252} +
/// 27742317777372353535851937790883648493 \\) as eight 32-bit
/// little-endian words, for variable-time canonicality checks on
/// scalars.
pub(crate) const L_WORDS: [u32; 8] = [
    0x5cf5_d3ed, 0x5812_631a, 0xa2f7_9cd6, 0x14de_f9de, 0x0000_0000, 0x0000_0000, 0x0000_0000,
    0x1000_0000,
];

/// The Ed25519 basepoint, as an `EdwardsPoint`.
///
/// This is called `_POINT` to distinguish it from the precomputed
/// basepoint table, which should be used for scalar multiplication
/// (it's much faster).
pub(crate) const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement::from_limbs([
        52811034, 25909283, 16144682, 17082669, 27570973, 30858332, 40966398, 8378388, 20764389,
        8758491,
    ]),
    Y: FieldElement::from_limbs([
        40265304, 26843545, 13421772, 20132659, 26843545, 6710886, 53687091, 13421772, 40265318,
        26843545,
    ]),
    Z: FieldElement::from_limbs([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
    T: FieldElement::from_limbs([
        28827043, 27438313, 39759291, 244362, 8635006, 11264893, 19351346, 13413597, 16611511,
        27139452,
    ]),
};

/// The Ed25519 basepoint in affine Niels form, \\((y+x, y-x,
/// 2dxy)\\), used by the variable-time double-scalar multiplication.
pub(crate) const ED25519_BASEPOINT_NIELS: AffineNielsPoint = AffineNielsPoint {
    y_plus_x: FieldElement::from_limbs([
        25967493, 19198397, 29566455, 3660896, 54414519, 4014786, 27544626, 21800161, 61029707,
        2047604,
    ]),
    y_minus_x: FieldElement::from_limbs([
        54563134, 934261, 64385954, 3049989, 66381436, 9406985, 12720692, 5043384, 19500929,
        18085054,
    ]),
    xy2d: FieldElement::from_limbs([
        58370664, 4489569, 9688441, 18769238, 10184608, 21191052, 29287918, 11864899, 42594502,
        29115885,
    ]),
};

/// The one-shot cell holding the shared table of precomputed basepoint
/// multiples.
static ED25519_BASEPOINT_TABLE: OnceLock<EdwardsBasepointTable> = OnceLock::new();

/// Fetch the shared table of precomputed basepoint multiples,
/// constructing it on first use.
///
/// Callers racing the first invocation all observe a fully constructed
/// table; every later invocation is a lock-free read of the published
/// reference.  The table is immutable once published.
pub(crate) fn basepoint_table() -> &'static EdwardsBasepointTable {
    ED25519_BASEPOINT_TABLE
        .get_or_init(|| EdwardsBasepointTable::create(&ED25519_BASEPOINT_POINT))
}
