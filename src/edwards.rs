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

//! Group operations for Curve25519, in Edwards form.
//!
//! ## Encoding and Decoding
//!
//! Encoding is done by converting to and from a `CompressedEdwardsY`
//! struct, which is a typed wrapper around `[u8; 32]`.
//!
//! ## Scalar Multiplication
//!
//! Scalar multiplication is provided by:
//!
//! * the `*` operator between a `Scalar` and an `EdwardsBasepointTable`,
//!   which performs constant-time fixed-base scalar multiplication over
//!   a table of precomputed basepoint multiples;
//!
//! * `EdwardsPoint::vartime_double_scalar_mul_basepoint`, which computes
//!   \\( aA + bB \\) in variable time and is used only for signature
//!   verification, where all inputs are public.
//!
//! ## Validity Checking
//!
//! There is no function for checking whether a point is valid.
//! Instead, the `EdwardsPoint` struct is guaranteed to hold a valid
//! point on the curve.
//!
//! We use the Rust type system to make invalid points
//! unrepresentable: `EdwardsPoint` objects can only be created via
//! successful decompression of a compressed point, or else by
//! operations on other (valid) `EdwardsPoint`s.

// We allow non snake_case names because coordinates in projective space are
// traditionally denoted by the capitalisation of their respective
// counterparts in affine space.  Yeah, you heard me, rustc, I'm gonna have my
// affine and projective cakes and eat both of them too.
#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::curve_models::{AffineNielsPoint, CompletedPoint, ProjectiveNielsPoint, ProjectivePoint};
use crate::field::FieldElement;
use crate::scalar::{decode_words, gte, Scalar};
use crate::traits::Identity;
use crate::window::LookupTable;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" / "Ed25519" format, the curve point \\((x,y)\\) is
/// determined by the \\(y\\)-coordinate and the sign of \\(x\\).
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// \\(y\\)-coordinate.  The high bit of the 32nd byte gives the sign of
/// \\(x\\).
#[derive(Copy, Clone, Eq, PartialEq)]
pub(crate) struct CompressedEdwardsY(pub(crate) [u8; 32]);

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &CompressedEdwardsY) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub(crate) const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub(crate) const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Determine (in variable time) whether the \\(y\\)-coordinate
    /// encoded here, with the sign bit masked off, is below the field
    /// order \\(p\\).
    ///
    /// Non-canonical encodings (those with \\( y \geq p \\)) are
    /// rejected outright during verification, before any curve
    /// arithmetic.
    pub(crate) fn is_canonical_y_vartime(&self) -> bool {
        let mut words = decode_words(&self.0);
        words[7] &= 0x7fff_ffff;
        !gte(&words, &constants::P_WORDS)
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// This function runs in variable time; it is used only on public
    /// inputs (signature and public-key bytes).
    ///
    /// # Return
    ///
    /// - `Some(EdwardsPoint)` if `self` is a canonical encoding of a
    ///   curve point;
    /// - `None` if `self` encodes a \\(y\\)-coordinate at or above the
    ///   field order, a \\(y\\)-coordinate with no corresponding
    ///   \\(x\\) on the curve, or a negative zero \\(x\\).
    pub(crate) fn decompress(&self) -> Option<EdwardsPoint> {
        if !self.is_canonical_y_vartime() {
            return None;
        }

        let Y = FieldElement::from_bytes(self.as_bytes());
        let Z = FieldElement::ONE;
        let YY = Y.square();
        let u = &YY - &Z; //  u =  y²-1
        let v = &(&YY * &constants::EDWARDS_D) + &Z; //  v = dy²+1
        let (is_valid_y_coord, mut X) = FieldElement::sqrt_ratio_i(&u, &v);

        if !bool::from(is_valid_y_coord) {
            return None;
        }

        // sqrt_ratio_i always returns the nonnegative square root, so
        // we negate according to the supplied sign bit.
        let compressed_sign_bit = Choice::from(self.as_bytes()[31] >> 7);

        // The encoding of x = 0 with the sign bit set is invalid: zero
        // has no negative representative.
        if bool::from(compressed_sign_bit & X.is_zero()) {
            return None;
        }

        X.conditional_negate(compressed_sign_bit);

        Some(EdwardsPoint {
            X,
            Y,
            Z,
            T: &X * &Y,
        })
    }
}

// ------------------------------------------------------------------------
// Internal point representation
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of
/// Curve25519, in extended twisted Edwards coordinates \\((X, Y, T,
/// Z)\\) with \\( T \cdot Z = X \cdot Y \\); the affine point is
/// \\((X/Z, Y/Z)\\).
#[derive(Copy, Clone)]
pub(crate) struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

// ------------------------------------------------------------------------
// Equality
// ------------------------------------------------------------------------

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        // We would like to check that the point (X/Z, Y/Z) is equal to
        // the point (X'/Z', Y'/Z') without converting into affine
        // coordinates (x, y) and (x', y'), which requires two inversions.
        // We have that X = xZ and X' = x'Z'. Thus, x = x' is equivalent to
        // (xZ)Z' = (x'Z')Z, and similarly for the y-coordinate.

        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
            & (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Convert to a ProjectiveNielsPoint
    pub(crate) fn as_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Convert the representation of this point from extended
    /// coordinates to projective coordinates.
    ///
    /// Free.
    pub(crate) const fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Dehomogenize to an AffineNielsPoint.
    pub(crate) fn as_affine_niels(&self) -> AffineNielsPoint {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let xy2d = &(&x * &y) * &constants::EDWARDS_D2;
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d,
        }
    }

    /// Compress this point to `CompressedEdwardsY` format: the
    /// canonical little-endian encoding of \\(y\\), with the parity of
    /// \\(x\\) in the high bit of the last byte.
    pub(crate) fn compress(&self) -> CompressedEdwardsY {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let mut s = y.as_bytes();
        s[31] ^= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Add this point to itself.
    pub(crate) fn double(&self) -> EdwardsPoint {
        self.as_projective().double().as_extended()
    }

    /// Compute \\([2\^k] P \\) by successive doublings. Requires \\( k > 0 \\).
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut r: CompletedPoint;
        let mut s = self.as_projective();
        for _ in 0..(k - 1) {
            r = s.double();
            s = r.as_projective();
        }
        // Unroll last iteration so we can go directly as_extended()
        s.double().as_extended()
    }
}

// ------------------------------------------------------------------------
// Addition
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.as_projective_niels()).as_extended()
    }
}

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Variable-time double-scalar multiplication
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Compute \\(aA + bB\\) in **variable time**, where \\(B\\) is the
    /// Ed25519 basepoint.
    ///
    /// This is Straussʼs interleaved method over the bits of the two
    /// scalars, with the sum \\( A + B \\) precomputed so that each bit
    /// position costs one doubling and at most one addition.  It is
    /// used only for signature verification, where \\(a\\), \\(b\\),
    /// and \\(A\\) are all public.
    pub(crate) fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        let B = &constants::ED25519_BASEPOINT_NIELS;
        let A_niels = A.as_projective_niels();
        let A_plus_B_niels = (A + B).as_extended().as_projective_niels();

        let mut r = ProjectivePoint::identity();

        for i in (0..256).rev() {
            let t = r.double();

            let t = match (b.bit(i), a.bit(i)) {
                (1, 1) => &t.as_extended() + &A_plus_B_niels,
                (1, 0) => &t.as_extended() + B,
                (0, 1) => &t.as_extended() + &A_niels,
                _ => t,
            };

            r = t.as_projective();
        }

        r.as_extended()
    }
}

// ------------------------------------------------------------------------
// Fixed-base scalar multiplication
// ------------------------------------------------------------------------

/// A precomputed table of multiples of a basepoint, for accelerating
/// fixed-base scalar multiplication.  One table, for the Ed25519
/// basepoint, is constructed on first use behind a one-shot initializer
/// in the [`constants`] module.
///
/// For each of the 32 byte positions \\( i \\) of a scalar, window
/// \\(i\\) holds the multiples \\( [1 \cdot 256\^i]B, \ldots,
/// [8 \cdot 256\^i]B \\) in affine Niels form, roughly 30KB in total.
#[derive(Clone)]
pub(crate) struct EdwardsBasepointTable(pub(crate) [LookupTable<AffineNielsPoint>; 32]);

impl EdwardsBasepointTable {
    /// Create a table of precomputed multiples of `basepoint`.
    pub(crate) fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut table = EdwardsBasepointTable([LookupTable::default(); 32]);
        let mut P = *basepoint;
        for i in 0..32 {
            // P = (256^i)B
            table.0[i] = LookupTable::from(&P);
            P = P.mul_by_pow_2(8);
        }
        table
    }

    /// The computation uses Pippengerʼs algorithm, as described on page
    /// 13 of the Ed25519 paper.  Write the scalar \\(a\\) in radix
    /// \\(16\\) with coefficients in \\([-8,8)\\), i.e.,
    /// $$
    ///     a = a\_0 + a\_1 16\^1 + \cdots + a\_{63} 16\^{63},
    /// $$
    /// with \\(-8 \leq a_i < 8\\), \\(-8 \leq a\_{63} \leq 8\\).  Then
    /// $$
    ///     a B = a\_0 B + a\_1 16\^1 B + \cdots + a\_{63} 16\^{63} B.
    /// $$
    /// Grouping even and odd coefficients gives
    /// $$
    ///     a B = \quad a\_0 16\^0 B + a\_2 16\^2 B + \cdots + a\_{62} 16\^{62} B    \\\\
    ///               + a\_1 16\^1 B + a\_3 16\^3 B + \cdots + a\_{63} 16\^{63} B    \\\\
    ///         = \quad(a\_0 16\^0 B + a\_2 16\^2 B + \cdots + a\_{62} 16\^{62} B)   \\\\
    ///             + 16(a\_1 16\^0 B + a\_3 16\^2 B + \cdots + a\_{63} 16\^{62} B). \\\\
    /// $$
    /// For each \\(i = 0 \ldots 31\\), we create a lookup table of
    /// $$
    /// [16\^{2i} B, \ldots, 8\cdot 16\^{2i} B],
    /// $$
    /// and use it to select \\( x \cdot 16\^{2i} \cdot B \\) in
    /// constant time.
    ///
    /// The radix-\\(16\\) representation requires that the scalar is
    /// bounded by \\(2\^{255}\\), which is always the case.
    fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.to_radix_16();

        let tables = &self.0;
        let mut P = EdwardsPoint::identity();

        for i in (0..64).filter(|x| x % 2 == 1) {
            P = (&P + &tables[i / 2].select(a[i])).as_extended();
        }

        P = P.mul_by_pow_2(4);

        for i in (0..64).filter(|x| x % 2 == 0) {
            P = (&P + &tables[i / 2].select(a[i])).as_extended();
        }

        P
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsBasepointTable {
    type Output = EdwardsPoint;

    /// Construct an `EdwardsPoint` from a `Scalar` \\(a\\) by computing
    /// the multiple \\(aB\\) of this basepoint \\(B\\), in constant
    /// time.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.mul_base(scalar)
    }
}

impl<'a, 'b> Mul<&'a EdwardsBasepointTable> for &'b Scalar {
    type Output = EdwardsPoint;

    /// Construct an `EdwardsPoint` from a `Scalar` \\(a\\) by computing
    /// the multiple \\(aB\\) of this basepoint \\(B\\), in constant
    /// time.
    fn mul(self, basepoint_table: &'a EdwardsBasepointTable) -> EdwardsPoint {
        basepoint_table * self
    }
}

impl Debug for EdwardsBasepointTable {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "EdwardsBasepointTable([\n")?;
        for i in 0..32 {
            writeln!(f, "\t{:?},", &self.0[i])?;
        }
        write!(f, "])")
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
