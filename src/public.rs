// -*- mode: rust; -*-
//
// This file is part of ed25519-rfc8032.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! ed25519 public keys.

use core::fmt::Debug;

use sha2::{Digest, Sha512};

use crate::constants::*;
use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::*;
use crate::scalar::{clamp_integer, Scalar};
use crate::secret::*;
use crate::signature::*;

/// An ed25519 public key.
///
/// Internally this caches both the compressed form (the wire format)
/// and the decompressed `EdwardsPoint`, so that verification does not
/// re-decompress the point for every signature.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct PublicKey(pub(crate) CompressedEdwardsY, pub(crate) EdwardsPoint);

impl Debug for PublicKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "PublicKey({:?}), {:?})", self.0, self.1)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Construct a `PublicKey` from a slice of bytes.
    ///
    /// The bytes are checked to be a canonical, on-curve encoding: a
    /// \\(y\\)-coordinate at or above the field order, a
    /// \\(y\\)-coordinate with no corresponding \\(x\\), or a
    /// negative-zero \\(x\\) encoding are all rejected.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an EdDSA `PublicKey` or whose
    /// error value is a `SignatureError` describing the error that
    /// occurred.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, SignatureError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(InternalError::BytesLengthError {
                name: "PublicKey",
                length: PUBLIC_KEY_LENGTH,
            }
            .into());
        }
        let mut bits: [u8; 32] = [0u8; 32];
        bits.copy_from_slice(&bytes[..32]);

        let compressed = CompressedEdwardsY(bits);
        let point = compressed
            .decompress()
            .ok_or(SignatureError(InternalError::PointDecompressionError))?;

        Ok(PublicKey(compressed, point))
    }

    /// Internal utility function for clamping a scalar and multiplying
    /// by the basepoint to produce a public key.
    fn clamp_and_mul_base(bits: [u8; 32]) -> PublicKey {
        let scalar = Scalar::from_bits(clamp_integer(bits));
        let point = &scalar * crate::constants::basepoint_table();
        let compressed = point.compress();

        PublicKey(compressed, point)
    }

    /// Verify a signature on a message with this keypair's public key.
    ///
    /// # Return
    ///
    /// Returns `Ok(())` if the signature is valid, and `Err` otherwise.
    #[allow(non_snake_case)]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        // The R component must encode a y-coordinate below the field
        // order.
        if !signature.R.is_canonical_y_vartime() {
            return Err(InternalError::VerifyError.into());
        }

        let mut h: Sha512 = Sha512::new();
        let minus_A: EdwardsPoint = -self.1;

        h.update(signature.R.as_bytes());
        h.update(self.as_bytes());
        h.update(message);

        let k = Scalar::from_hash(h);
        let R = EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, &signature.s);

        if R.compress() == signature.R {
            Ok(())
        } else {
            Err(InternalError::VerifyError.into())
        }
    }
}

impl<'a> From<&'a SecretKey> for PublicKey {
    /// Derive this public key from its corresponding `SecretKey`.
    fn from(secret_key: &SecretKey) -> PublicKey {
        let mut h: Sha512 = Sha512::new();
        let mut hash: [u8; 64] = [0u8; 64];
        let mut digest: [u8; 32] = [0u8; 32];

        h.update(secret_key.as_bytes());
        hash.copy_from_slice(h.finalize().as_slice());

        digest.copy_from_slice(&hash[..32]);

        PublicKey::clamp_and_mul_base(digest)
    }
}

impl<'a> From<&'a ExpandedSecretKey> for PublicKey {
    /// Derive this public key from its corresponding
    /// `ExpandedSecretKey`.
    fn from(expanded_secret_key: &ExpandedSecretKey) -> PublicKey {
        // The expanded secret key is already clamped; clamping is
        // idempotent.
        PublicKey::clamp_and_mul_base(*expanded_secret_key.key.as_bytes())
    }
}
