// -*- mode: rust; -*-
//
// This file is part of ed25519-rfc8032.
// Copyright (c) 2017-2019 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

#![deny(missing_docs)] // refuse to compile if documentation is missing

//! A self-contained Rust implementation of ed25519 key generation,
//! signing, and verification, as specified in [RFC 8032].
//!
//! The crate carries its own arithmetic: field elements of
//! \\(\mathrm{GF}(2\^{255}-19)\\) in ten 32-bit limbs of radix
//! \\(2\^{25.5}\\), extended twisted Edwards coordinates for the curve
//! group, and scalar arithmetic modulo the basepoint order \\(\ell\\).
//! SHA-512 is consumed as a black-box streaming digest from the `sha2`
//! crate.
//!
//! # Example
//!
//! Signing and verifying with a keypair derived from a 32-byte seed:
//!
//! ```
//! use ed25519_rfc8032::{Keypair, PublicKey, SecretKey, Signature};
//!
//! let seed: [u8; 32] = [
//!     0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60,
//!     0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c, 0xc4,
//!     0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19,
//!     0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae, 0x7f, 0x60,
//! ];
//!
//! let secret: SecretKey = SecretKey::from_bytes(&seed).unwrap();
//! let public: PublicKey = (&secret).into();
//! let keypair: Keypair = Keypair { secret, public };
//!
//! let message: &[u8] = b"This is a test of the tsunami alert system.";
//! let signature: Signature = keypair.sign(message);
//!
//! assert!(keypair.verify(message, &signature).is_ok());
//! ```
//!
//! Signing and verification are deterministic: the same seed and
//! message always produce the same 64-byte signature.
//!
//! # Precomputation
//!
//! Fixed-base scalar multiplication uses a table of precomputed
//! basepoint multiples (roughly 30KB), built on first use behind a
//! one-shot initializer and shared by all keys and threads.  Callers
//! who want to avoid the one-time construction cost on their first
//! signature can trigger it eagerly with [`precompute`].
//!
//! [RFC 8032]: https://tools.ietf.org/html/rfc8032

mod constants;
mod curve_models;
mod ed25519;
mod edwards;
mod errors;
mod field;
mod public;
mod scalar;
mod secret;
mod signature;
mod traits;
mod window;

pub use crate::constants::{
    EXPANDED_SECRET_KEY_LENGTH, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
    SIGNATURE_LENGTH,
};
pub use crate::ed25519::Keypair;
pub use crate::errors::SignatureError;
pub use crate::public::PublicKey;
pub use crate::secret::{ExpandedSecretKey, SecretKey};
pub use crate::signature::Signature;

/// Force construction of the shared table of precomputed basepoint
/// multiples.
///
/// Key generation, signing, and verification construct the table on
/// first use; calling this eagerly moves that one-time cost to a point
/// of the caller's choosing.  This function is idempotent and safe to
/// call concurrently from many threads.
pub fn precompute() {
    let _ = constants::basepoint_table();
}
