// -*- mode: rust; -*-
//
// This file is part of ed25519-rfc8032.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! An ed25519 signature.

use core::fmt::Debug;

use crate::constants::*;
use crate::edwards::CompressedEdwardsY;
use crate::errors::*;
use crate::scalar::Scalar;

/// An ed25519 signature.
///
/// # Note
///
/// These signatures, unlike the ed25519 signature reference
/// implementation, are "detached"—that is, they do **not** include a
/// copy of the message which has been signed.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R` is an `EdwardsPoint`, formed by using an hash function with
    /// 512-bits output to produce the digest of:
    ///
    /// - the nonce half of the `ExpandedSecretKey`, and
    /// - the message to be signed.
    ///
    /// This digest is then interpreted as a `Scalar` and reduced into
    /// an element in ℤ/lℤ.  The scalar is then multiplied by the
    /// distinguished basepoint to produce `R`, an `EdwardsPoint`.
    pub(crate) R: CompressedEdwardsY,

    /// `s` is a `Scalar`, formed by using an hash function with
    /// 512-bits output to produce the digest of:
    ///
    /// - the `R` portion of this `Signature`,
    /// - the `PublicKey` which should be used to verify this
    ///   `Signature`, and
    /// - the message to be signed.
    ///
    /// This digest is then interpreted as a `Scalar` and reduced into
    /// an element in ℤ/lℤ.
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s)
    }
}

impl Signature {
    /// Convert this `Signature` to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(&self.R.as_bytes()[..]);
        signature_bytes[32..].copy_from_slice(&self.s.as_bytes()[..]);
        signature_bytes
    }

    /// Construct a `Signature` from a slice of bytes.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an EdDSA `Signature` or whose
    /// error value is a `SignatureError` describing the error that
    /// occurred.  In particular, the scalar half of the signature must
    /// encode an integer below the basepoint order \\( \ell \\);
    /// signatures with \\( S \geq \ell \\) are malleable and are
    /// rejected here, per RFC 8032 §5.1.7.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(InternalError::BytesLengthError {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            }
            .into());
        }
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        lower.copy_from_slice(&bytes[..32]);
        upper.copy_from_slice(&bytes[32..]);

        let s = Scalar::from_canonical_bytes(upper).ok_or(SignatureError(
            InternalError::ScalarFormatError,
        ))?;

        Ok(Signature {
            R: CompressedEdwardsY(lower),
            s,
        })
    }
}
