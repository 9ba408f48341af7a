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

//! Arithmetic on scalars (integers mod the group order).
//!
//! The Ed25519 basepoint has prime order
//! \\( \ell = 2\^{252} + 27742317777372353535851937790883648493 \\).
//!
//! A [`Scalar`] holds a 256-bit integer in 32 little-endian bytes.
//! Scalars produced by [`Scalar::from_bytes_mod_order_wide`] and
//! [`Scalar::from_canonical_bytes`] are fully reduced mod \\( \ell \\);
//! [`Scalar::from_bits`] loads raw bits (used for the "clamped" secret
//! scalar, which is deliberately not reduced).

use core::fmt::Debug;

use digest::generic_array::typenum::U64;
use digest::Digest;

use subtle::Choice;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants;

/// The `Scalar` struct holds an integer \\(s < 2\^{255} \\) which
/// represents an element of \\(\mathbb Z / \ell\\).
#[derive(Copy, Clone)]
pub(crate) struct Scalar {
    /// `bytes` is a little-endian byte encoding of an integer
    /// representing a scalar modulo the group order.
    pub(crate) bytes: [u8; 32],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.bytes)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

/// Clamp the scalar seed bytes for use as a secret scalar: clear the
/// low three bits, clear bit 255, and set bit 254.
///
/// The clamped value is in the range \\( 2\^{254} \leq s < 2\^{255} \\)
/// and is divisible by the cofactor 8.
pub(crate) const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// Unsigned comparison of two little-endian 8-word integers, in
/// constant time: returns `true` iff `a >= b`.
pub(crate) fn gte(a: &[u32; 8], b: &[u32; 8]) -> bool {
    let mut borrow: i64 = 0;
    for i in 0..8 {
        let t = (a[i] as i64) - (b[i] as i64) - borrow;
        borrow = (t >> 63) & 1;
    }
    borrow == 0
}

/// Decode 32 little-endian bytes into eight 32-bit words.
pub(crate) fn decode_words(bytes: &[u8; 32]) -> [u32; 8] {
    let mut words = [0u32; 8];
    for (i, word) in words.iter_mut().enumerate() {
        *word = u32::from_le_bytes([
            bytes[4 * i],
            bytes[4 * i + 1],
            bytes[4 * i + 2],
            bytes[4 * i + 3],
        ]);
    }
    words
}

impl Scalar {
    /// Construct a `Scalar` from the low 255 bits of a 256-bit integer.
    ///
    /// This function is intended for applications like X25519 and the
    /// Ed25519 secret scalar which require specific bit-patterns when
    /// performing scalar multiplication.  The value is *not* reduced
    /// modulo \\( \ell \\).
    pub(crate) const fn from_bits(bytes: [u8; 32]) -> Scalar {
        let mut s = Scalar { bytes };
        // Ensure that s < 2^255 by masking the high bit
        s.bytes[31] &= 0b0111_1111;
        s
    }

    /// Attempt to construct a `Scalar` from a canonical byte
    /// representation.
    ///
    /// # Return
    ///
    /// - `Some(s)`, where `s` is the `Scalar` corresponding to `bytes`,
    ///   if `bytes` is a canonical byte representation, i.e., the
    ///   encoded integer is smaller than \\( \ell \\);
    /// - `None` if `bytes` is not a canonical byte representation.
    ///
    /// This check is performed in variable time; it is only ever
    /// applied to public signature components.
    pub(crate) fn from_canonical_bytes(bytes: [u8; 32]) -> Option<Scalar> {
        if gte(&decode_words(&bytes), &constants::L_WORDS) {
            return None;
        }
        Some(Scalar { bytes })
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo the group order \\( \ell \\).
    ///
    /// The input is taken in nineteen overlapping radix-\\(2\^{28}\\)
    /// limbs, alternating full 32-bit loads with 24-bit loads shifted
    /// left by four.  Working from the top limb down, each high limb is
    /// multiplied against the five 28-bit-aligned pieces of
    /// \\( \ell - 2\^{252} \\) and subtracted out, with carries folded
    /// into the intermediate limbs as the annotated bit-sizes require.
    /// A final conditional add of \\( \ell \\), selected by the sign of
    /// the top limb, makes the result non-negative, and a last carry
    /// sweep leaves eight 28-bit limbs plus a top word encoding a value
    /// in \\( [0, \ell) \\).
    #[rustfmt::skip] // keep alignment of limb schedule
    pub(crate) fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        const M28: i64 = 0x0fff_ffff;

        // ℓ - 2^252 in five 28-bit-aligned signed pieces, so that the
        // per-piece products below stay well inside 64 bits.
        const L0: i64 = -0x030a_2c13;
        const L1: i64 =  0x0126_31a6;
        const L2: i64 =  0x079c_d658;
        const L3: i64 = -0x0062_15d1;
        const L4: i64 =  0x0000_14df;

        #[inline(always)]
        fn load4(b: &[u8], off: usize) -> i64 {
            ((b[off] as u32)
                | ((b[off + 1] as u32) << 8)
                | ((b[off + 2] as u32) << 16)
                | ((b[off + 3] as u32) << 24)) as i64
        }

        #[inline(always)]
        fn load3(b: &[u8], off: usize) -> i64 {
            ((b[off] as u32) | ((b[off + 1] as u32) << 8) | ((b[off + 2] as u32) << 16)) as i64
        }

        let n = input;
        let mut x00 =  load4(n,  0);       // x00:32/--
        let mut x01 =  load3(n,  4) << 4;  // x01:28/--
        let mut x02 =  load4(n,  7);       // x02:32/--
        let mut x03 =  load3(n, 11) << 4;  // x03:28/--
        let mut x04 =  load4(n, 14);       // x04:32/--
        let mut x05 =  load3(n, 18) << 4;  // x05:28/--
        let mut x06 =  load4(n, 21);       // x06:32/--
        let mut x07 =  load3(n, 25) << 4;  // x07:28/--
        let mut x08 =  load4(n, 28);       // x08:32/--
        let mut x09 =  load3(n, 32) << 4;  // x09:28/--
        let mut x10 =  load4(n, 35);       // x10:32/--
        let mut x11 =  load3(n, 39) << 4;  // x11:28/--
        let mut x12 =  load4(n, 42);       // x12:32/--
        let mut x13 =  load3(n, 46) << 4;  // x13:28/--
        let mut x14 =  load4(n, 49);       // x14:32/--
        let mut x15 =  load3(n, 53) << 4;  // x15:28/--
        let mut x16 =  load4(n, 56);       // x16:32/--
        let mut x17 =  load3(n, 60) << 4;  // x17:28/--
        let     x18 =  n[63] as i64;       // x18:08/--

        // The high four bits of x17 and x15 are zero by construction
        // (24-bit loads shifted left by four), so no carry into x18 or
        // x16 is needed before their rows.

        x09 -= x18 * L0;                   // x09:34/28
        x10 -= x18 * L1;                   // x10:33/30
        x11 -= x18 * L2;                   // x11:35/28
        x12 -= x18 * L3;                   // x12:32/31
        x13 -= x18 * L4;                   // x13:28/21

        x17 += x16 >> 28; x16 &= M28;      // x17:28/--, x16:28/--
        x08 -= x17 * L0;                   // x08:54/32
        x09 -= x17 * L1;                   // x09:52/51
        x10 -= x17 * L2;                   // x10:55/34
        x11 -= x17 * L3;                   // x11:51/36
        x12 -= x17 * L4;                   // x12:41/--

        x07 -= x16 * L0;                   // x07:54/28
        x08 -= x16 * L1;                   // x08:54/53
        x09 -= x16 * L2;                   // x09:55/53
        x10 -= x16 * L3;                   // x10:55/52
        x11 -= x16 * L4;                   // x11:51/41

        x15 += x14 >> 28; x14 &= M28;      // x15:28/--, x14:28/--
        x06 -= x15 * L0;                   // x06:54/32
        x07 -= x15 * L1;                   // x07:54/53
        x08 -= x15 * L2;                   // x08:56/--
        x09 -= x15 * L3;                   // x09:55/54
        x10 -= x15 * L4;                   // x10:55/53

        x05 -= x14 * L0;                   // x05:54/28
        x06 -= x14 * L1;                   // x06:54/53
        x07 -= x14 * L2;                   // x07:56/--
        x08 -= x14 * L3;                   // x08:56/51
        x09 -= x14 * L4;                   // x09:56/--

        x13 += x12 >> 28; x12 &= M28;      // x13:28/22, x12:28/--
        x04 -= x13 * L0;                   // x04:54/49
        x05 -= x13 * L1;                   // x05:54/53
        x06 -= x13 * L2;                   // x06:56/--
        x07 -= x13 * L3;                   // x07:56/52
        x08 -= x13 * L4;                   // x08:56/52

        x12 += x11 >> 28; x11 &= M28;      // x12:28/24, x11:28/--
        x03 -= x12 * L0;                   // x03:54/49
        x04 -= x12 * L1;                   // x04:54/51
        x05 -= x12 * L2;                   // x05:56/--
        x06 -= x12 * L3;                   // x06:56/52
        x07 -= x12 * L4;                   // x07:56/53

        x11 += x10 >> 28; x10 &= M28;      // x11:29/--, x10:28/--
        x02 -= x11 * L0;                   // x02:55/32
        x03 -= x11 * L1;                   // x03:55/--
        x04 -= x11 * L2;                   // x04:56/55
        x05 -= x11 * L3;                   // x05:56/52
        x06 -= x11 * L4;                   // x06:56/53

        x10 += x09 >> 28; x09 &= M28;      // x10:29/--, x09:28/--
        x01 -= x10 * L0;                   // x01:55/28
        x02 -= x10 * L1;                   // x02:55/54
        x03 -= x10 * L2;                   // x03:56/55
        x04 -= x10 * L3;                   // x04:57/--
        x05 -= x10 * L4;                   // x05:56/53

        x08 += x07 >> 28; x07 &= M28;      // x08:56/53, x07:28/--
        x09 += x08 >> 28; x08 &= M28;      // x09:29/25, x08:28/--

        // The top limb may still be one subtraction of ℓ too large;
        // borrow a bit so that the row below drives it negative at
        // most once, and repay the bit after the carry sweep.
        let t = ((x08 as u64) >> 27) as i64;
        x09 += t;                          // x09:29/26

        x00 -= x09 * L0;                   // x00:55/53
        x01 -= x09 * L1;                   // x01:55/54
        x02 -= x09 * L2;                   // x02:57/--
        x03 -= x09 * L3;                   // x03:57/--
        x04 -= x09 * L4;                   // x04:57/42

        x01 += x00 >> 28; x00 &= M28;
        x02 += x01 >> 28; x01 &= M28;
        x03 += x02 >> 28; x02 &= M28;
        x04 += x03 >> 28; x03 &= M28;
        x05 += x04 >> 28; x04 &= M28;
        x06 += x05 >> 28; x05 &= M28;
        x07 += x06 >> 28; x06 &= M28;
        x08 += x07 >> 28; x07 &= M28;
        x09  = x08 >> 28; x08 &= M28;

        x09 -= t;
        debug_assert!(x09 == 0 || x09 == -1);

        // Conditionally add ℓ back in, keyed on the borrow mask.
        x00 += x09 & L0;
        x01 += x09 & L1;
        x02 += x09 & L2;
        x03 += x09 & L3;
        x04 += x09 & L4;

        x01 += x00 >> 28; x00 &= M28;
        x02 += x01 >> 28; x01 &= M28;
        x03 += x02 >> 28; x02 &= M28;
        x04 += x03 >> 28; x03 &= M28;
        x05 += x04 >> 28; x04 &= M28;
        x06 += x05 >> 28; x05 &= M28;
        x07 += x06 >> 28; x06 &= M28;
        x08 += x07 >> 28; x07 &= M28;

        #[inline(always)]
        fn store56(bytes: &mut [u8; 32], off: usize, n: u64) {
            let b = n.to_le_bytes();
            bytes[off..off + 7].copy_from_slice(&b[..7]);
        }

        let mut s = [0u8; 32];
        store56(&mut s,  0, (x00 | (x01 << 28)) as u64);
        store56(&mut s,  7, (x02 | (x03 << 28)) as u64);
        store56(&mut s, 14, (x04 | (x05 << 28)) as u64);
        store56(&mut s, 21, (x06 | (x07 << 28)) as u64);
        s[28..32].copy_from_slice(&(x08 as u32).to_le_bytes());

        Scalar { bytes: s }
    }

    /// Construct a scalar from an existing `Digest` instance producing
    /// 64 bytes (512 bits) of output.
    pub(crate) fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    /// View the little-endian byte encoding of the integer representing
    /// this Scalar.
    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Extract bit `index` of the scalar, counting from the least
    /// significant bit.
    pub(crate) fn bit(&self, index: usize) -> u8 {
        (self.bytes[index >> 3] >> (index & 7)) & 1
    }

    /// Decode this scalar into eight 32-bit little-endian words.
    pub(crate) fn as_words(&self) -> [u32; 8] {
        decode_words(&self.bytes)
    }

    /// Write this scalar in radix 16, with coefficients in `[-8,8)`,
    /// i.e., compute `a_i` such that
    ///
    ///    a = a_0 + a_1*16^1 + ... + a_63*16^63,
    ///
    /// with `-8 ≤ a_i < 8` for `0 ≤ i < 63` and `-8 ≤ a_63 ≤ 8`.
    ///
    /// Precondition: self[31] <= 127.  This is the case whenever
    /// `self` is reduced or clamped.
    #[allow(clippy::identity_op)]
    pub(crate) fn to_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.bytes[31] <= 127);
        let mut output = [0i8; 64];

        // Step 1: change radix.
        // Convert from radix 256 (bytes) to radix 16 (nibbles)
        #[inline(always)]
        fn bot_half(x: u8) -> u8 {
            (x >> 0) & 15
        }
        #[inline(always)]
        fn top_half(x: u8) -> u8 {
            (x >> 4) & 15
        }

        for i in 0..32 {
            output[2 * i] = bot_half(self.bytes[i]) as i8;
            output[2 * i + 1] = top_half(self.bytes[i]) as i8;
        }
        // Precondition note: since self[31] <= 127, output[63] <= 7

        // Step 2: recenter coefficients from [0,16) to [-8,8)
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }
        // Precondition note: output[63] is not recentered.  It
        // increases by carry <= 1.  Thus output[63] <= 8.

        output
    }

    /// Compute `ab + c (mod ℓ)`.
    ///
    /// The product is accumulated as a full 512-bit integer using a
    /// schoolbook 8×8-word multiply-accumulate and then reduced, so
    /// `a`, `b`, and `c` may be any (possibly unreduced) 256-bit
    /// scalars.
    pub(crate) fn multiply_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        let x = a.as_words();
        let y = b.as_words();

        let mut acc = [0u32; 16];
        acc[..8].copy_from_slice(&c.as_words());
        mul_add_to(&x, &y, &mut acc);

        let mut wide = [0u8; 64];
        for (chunk, word) in wide.chunks_exact_mut(4).zip(acc.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Scalar::from_bytes_mod_order_wide(&wide)
    }
}

/// Compute `zz += x * y` over 32-bit little-endian words, where `zz`
/// holds a 512-bit accumulator.
///
/// The final carry out of `zz[15]` is necessarily zero for any product
/// of 256-bit operands accumulated onto a 256-bit value, so it is
/// discarded.
fn mul_add_to(x: &[u32; 8], y: &[u32; 8], zz: &mut [u32; 16]) {
    let mut zc: u64 = 0;
    for i in 0..8 {
        let mut c: u64 = 0;
        let xi = x[i] as u64;
        for j in 0..8 {
            let t = xi * (y[j] as u64) + (zz[i + j] as u64) + c;
            zz[i + j] = t as u32;
            c = t >> 32;
        }
        zc += c + (zz[i + 8] as u64);
        zz[i + 8] = zc as u32;
        zc >>= 32;
    }
    debug_assert!(zc == 0);
}

#[cfg(test)]
mod test {
    use super::*;

    /// ℓ, the order of the basepoint subgroup, in little-endian bytes.
    static L_BYTES: [u8; 32] = [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
        0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x10,
    ];

    /// SHA-512("scalar reduction test vector one").
    static H1_BYTES: [u8; 64] = [
        0x35, 0x4b, 0x3f, 0x77, 0xde, 0x4b, 0xc7, 0x40, 0x28, 0xed, 0x68, 0x3a, 0x33, 0xf9, 0x99,
        0x5b, 0x97, 0xc0, 0x24, 0x86, 0x73, 0x9c, 0x89, 0x7e, 0xf9, 0x14, 0x23, 0x7e, 0xfd, 0x5d,
        0xe6, 0x7e, 0x79, 0x23, 0x54, 0x1c, 0xfa, 0xaa, 0xe7, 0x62, 0x09, 0x46, 0x51, 0x15, 0x1a,
        0x1b, 0x18, 0xc5, 0xfa, 0x62, 0x65, 0x21, 0x72, 0x35, 0x41, 0x77, 0xba, 0x0b, 0x4d, 0x4b,
        0xc7, 0x18, 0x1a, 0x57,
    ];
    /// H1_BYTES reduced mod ℓ, computed in arbitrary precision.
    static H1_REDUCED: [u8; 32] = [
        0xe5, 0x9a, 0xcc, 0x59, 0xec, 0x69, 0xff, 0xf1, 0xf7, 0x4c, 0xde, 0x80, 0x8c, 0x9b, 0x94,
        0x85, 0x0c, 0xec, 0xd4, 0xc3, 0xab, 0x89, 0xc1, 0xcc, 0x43, 0x7b, 0x26, 0xe6, 0xde, 0x7b,
        0x78, 0x0f,
    ];

    /// SHA-512("scalar reduction test vector two").
    static H2_BYTES: [u8; 64] = [
        0xa4, 0xc3, 0xbd, 0x70, 0xdc, 0xd1, 0x99, 0x36, 0xaf, 0xab, 0xd4, 0x45, 0x65, 0x52, 0x01,
        0x7e, 0x96, 0x2e, 0xbb, 0x7a, 0xf5, 0x5b, 0x05, 0xa8, 0x45, 0x2a, 0x36, 0x33, 0x8f, 0x3f,
        0x70, 0x0d, 0x89, 0xd0, 0xa2, 0x9a, 0x19, 0x54, 0x27, 0x52, 0xe8, 0x7c, 0x00, 0xbc, 0xda,
        0x98, 0xbb, 0xf0, 0x38, 0x4a, 0x3b, 0x90, 0xdd, 0x1a, 0x40, 0x5c, 0xc6, 0x1d, 0x3e, 0xef,
        0xce, 0x98, 0xd8, 0xab,
    ];
    /// H2_BYTES reduced mod ℓ, computed in arbitrary precision.
    static H2_REDUCED: [u8; 32] = [
        0x9a, 0x92, 0x4d, 0x91, 0x00, 0x38, 0x79, 0x58, 0x1e, 0x42, 0x6c, 0x47, 0x07, 0xfd, 0x12,
        0x21, 0xee, 0x60, 0x8b, 0xf6, 0xee, 0x08, 0x8c, 0x35, 0x74, 0x2f, 0x25, 0x5b, 0xe0, 0xfc,
        0x89, 0x05,
    ];

    /// Scalars a, b, c with a*b + c precomputed in arbitrary precision.
    static A_BYTES: [u8; 32] = [
        0x7e, 0x1c, 0x2f, 0xc2, 0x56, 0x35, 0xba, 0xdb, 0x45, 0xf9, 0xa2, 0xbf, 0x13, 0x14, 0x28,
        0x8a, 0xd5, 0xd7, 0xd2, 0x8e, 0x18, 0x33, 0x5d, 0xe0, 0x5a, 0xbc, 0x54, 0xd0, 0x56, 0x0e,
        0x0f, 0x03,
    ];
    static B_BYTES: [u8; 32] = [
        0x36, 0x78, 0xf0, 0x2c, 0xe6, 0x48, 0x86, 0x2c, 0x3c, 0xa2, 0x46, 0xbb, 0x55, 0x14, 0x06,
        0xd1, 0xd5, 0x02, 0xcb, 0x7f, 0x4c, 0x21, 0x57, 0xa5, 0x16, 0x55, 0x69, 0x91, 0xf2, 0x2e,
        0xf8, 0x07,
    ];
    static C_BYTES: [u8; 32] = [
        0x0b, 0x9f, 0xc0, 0xe1, 0x3a, 0xc8, 0x58, 0x73, 0x7a, 0x0c, 0xda, 0xf5, 0xe3, 0x5e, 0xc1,
        0x62, 0x4e, 0x3f, 0xce, 0x44, 0xd7, 0xb0, 0x28, 0x79, 0xa5, 0x27, 0x99, 0xaa, 0xdf, 0xf5,
        0x41, 0x02,
    ];
    /// a*b + c (mod ℓ)
    static AB_PLUS_C_BYTES: [u8; 32] = [
        0xdd, 0x5b, 0x03, 0x07, 0xc8, 0xa5, 0x75, 0x5b, 0x8b, 0xb6, 0x95, 0x6d, 0xa1, 0x08, 0x35,
        0xb5, 0x30, 0x64, 0x1d, 0x75, 0x3e, 0x98, 0x09, 0xda, 0x44, 0x3a, 0x3a, 0xb0, 0x57, 0x35,
        0xe2, 0x04,
    ];

    fn wide(lo: &[u8; 32]) -> [u8; 64] {
        let mut w = [0u8; 64];
        w[..32].copy_from_slice(lo);
        w
    }

    #[test]
    fn reduce_wide_known_answers() {
        let h1 = Scalar::from_bytes_mod_order_wide(&H1_BYTES);
        assert_eq!(h1.bytes, H1_REDUCED);
        let h2 = Scalar::from_bytes_mod_order_wide(&H2_BYTES);
        assert_eq!(h2.bytes, H2_REDUCED);
    }

    #[test]
    fn reduce_wide_is_identity_below_ell() {
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(Scalar::from_bytes_mod_order_wide(&wide(&one)).bytes, one);

        let mut l_minus_one = L_BYTES;
        l_minus_one[0] -= 1;
        assert_eq!(
            Scalar::from_bytes_mod_order_wide(&wide(&l_minus_one)).bytes,
            l_minus_one
        );
    }

    #[test]
    fn reduce_wide_of_ell_is_zero() {
        assert_eq!(Scalar::from_bytes_mod_order_wide(&wide(&L_BYTES)).bytes, [0u8; 32]);

        let mut l_plus_two = L_BYTES;
        l_plus_two[0] += 2;
        let mut two = [0u8; 32];
        two[0] = 2;
        assert_eq!(Scalar::from_bytes_mod_order_wide(&wide(&l_plus_two)).bytes, two);
    }

    #[test]
    fn canonical_decoding() {
        // The encoding of ℓ is itself non-canonical.
        assert!(Scalar::from_canonical_bytes(L_BYTES).is_none());

        let mut l_minus_one = L_BYTES;
        l_minus_one[0] -= 1;
        assert!(Scalar::from_canonical_bytes(l_minus_one).is_some());

        assert!(Scalar::from_canonical_bytes([0xff; 32]).is_none());
    }

    #[test]
    fn multiply_add_known_answer() {
        let a = Scalar::from_bits(A_BYTES);
        let b = Scalar::from_bits(B_BYTES);
        let c = Scalar::from_bits(C_BYTES);
        assert_eq!(Scalar::multiply_add(&a, &b, &c).bytes, AB_PLUS_C_BYTES);
    }

    #[test]
    fn multiply_add_identities() {
        let a = Scalar::from_bits(A_BYTES);
        let c = Scalar::from_bits(C_BYTES);
        let zero = Scalar { bytes: [0u8; 32] };
        // 0*a + c == c (c is already reduced)
        assert_eq!(Scalar::multiply_add(&zero, &a, &c).bytes, C_BYTES);
        let mut one = [0u8; 32];
        one[0] = 1;
        let one = Scalar { bytes: one };
        // 1*a + 0 == a (a is already reduced)
        assert_eq!(Scalar::multiply_add(&one, &a, &zero).bytes, A_BYTES);
    }

    #[test]
    fn radix_16_digit_bounds_and_reconstruction() {
        let a = Scalar::from_bits(A_BYTES);
        let digits = a.to_radix_16();
        for (i, digit) in digits.iter().enumerate() {
            assert!(*digit >= -8);
            if i == 63 {
                assert!(*digit <= 8);
            } else {
                assert!(*digit < 8);
            }
        }

        // Recompose sum(digits[i] * 16^i) back into bytes.
        let mut bytes = [0u8; 32];
        let mut borrow: i16 = 0;
        for i in 0..32 {
            let lo = digits[2 * i] as i16;
            let hi = digits[2 * i + 1] as i16;
            let v = lo + (hi << 4) + borrow;
            bytes[i] = (v & 0xff) as u8;
            borrow = v >> 8;
        }
        assert_eq!(borrow, 0);
        assert_eq!(bytes, A_BYTES);
    }

    #[test]
    fn clamping() {
        let clamped = clamp_integer([0xff; 32]);
        assert_eq!(clamped[0] & 0b0000_0111, 0);
        assert_eq!(clamped[31] & 0b1000_0000, 0);
        assert_eq!(clamped[31] & 0b0100_0000, 0b0100_0000);

        let clamped = clamp_integer([0x00; 32]);
        assert_eq!(clamped[31], 0b0100_0000);
    }

    #[test]
    fn gte_comparisons() {
        let l = decode_words(&L_BYTES);
        let mut l_minus_one_bytes = L_BYTES;
        l_minus_one_bytes[0] -= 1;
        let l_minus_one = decode_words(&l_minus_one_bytes);

        assert!(gte(&l, &l));
        assert!(gte(&l, &l_minus_one));
        assert!(!gte(&l_minus_one, &l));
        assert!(gte(&decode_words(&[0xff; 32]), &l));
        assert!(!gte(&[0u32; 8], &l));
    }
}
