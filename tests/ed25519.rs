// -*- mode: rust; -*-
//
// This file is part of ed25519-rfc8032.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Integration tests for ed25519-rfc8032.

use ed25519_rfc8032::*;

use hex::FromHex;

/// Test against the RFC 8032 §7.1 test vectors and derived
/// known-answer vectors.
#[cfg(test)]
mod vectors {
    use super::*;

    /// (secret key, public key, message, signature), all hex-encoded.
    ///
    /// The first three rows are TEST 1, TEST 2, and TEST 3 from RFC
    /// 8032 §7.1; the fourth signs a 512-byte message under the TEST 1
    /// key and was generated with an independent implementation.
    static TESTVECTORS: &[(&str, &str, &str, &str)] = &[
        (
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            "",
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
             5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        ),
        (
            "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
            "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
            "72",
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
             085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        ),
        (
            "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
            "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
            "af82",
            "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac\
             18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
        ),
        (
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f\
             202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f\
             404142434445464748494a4b4c4d4e4f505152535455565758595a5b5c5d5e5f\
             606162636465666768696a6b6c6d6e6f707172737475767778797a7b7c7d7e7f\
             808182838485868788898a8b8c8d8e8f909192939495969798999a9b9c9d9e9f\
             a0a1a2a3a4a5a6a7a8a9aaabacadaeafb0b1b2b3b4b5b6b7b8b9babbbcbdbebf\
             c0c1c2c3c4c5c6c7c8c9cacbcccdcecfd0d1d2d3d4d5d6d7d8d9dadbdcdddedf\
             e0e1e2e3e4e5e6e7e8e9eaebecedeeeff0f1f2f3f4f5f6f7f8f9fafbfcfdfeff\
             000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f\
             202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f\
             404142434445464748494a4b4c4d4e4f505152535455565758595a5b5c5d5e5f\
             606162636465666768696a6b6c6d6e6f707172737475767778797a7b7c7d7e7f\
             808182838485868788898a8b8c8d8e8f909192939495969798999a9b9c9d9e9f\
             a0a1a2a3a4a5a6a7a8a9aaabacadaeafb0b1b2b3b4b5b6b7b8b9babbbcbdbebf\
             c0c1c2c3c4c5c6c7c8c9cacbcccdcecfd0d1d2d3d4d5d6d7d8d9dadbdcdddedf\
             e0e1e2e3e4e5e6e7e8e9eaebecedeeeff0f1f2f3f4f5f6f7f8f9fafbfcfdfeff",
            "301447eeb59d202f72623e293fdc517ceb2f0ea33cc02a6eb94392ca5f6dc56d\
             d6e1e24bf1c6c32ddf9d648b750c65e80277aa504538295734f746d70e5e2104",
        ),
    ];

    fn keypair_from_hex(sec_hex: &str) -> Keypair {
        let sec_bytes: Vec<u8> = FromHex::from_hex(sec_hex).unwrap();
        let secret = SecretKey::from_bytes(&sec_bytes).unwrap();
        let public = PublicKey::from(&secret);
        Keypair { secret, public }
    }

    #[test]
    fn rfc8032_known_answers() {
        for (i, (sec_hex, pub_hex, msg_hex, sig_hex)) in TESTVECTORS.iter().enumerate() {
            let keypair = keypair_from_hex(sec_hex);
            let pub_bytes: Vec<u8> = FromHex::from_hex(pub_hex).unwrap();
            let msg_bytes: Vec<u8> = FromHex::from_hex(msg_hex).unwrap();
            let sig_bytes: Vec<u8> = FromHex::from_hex(sig_hex).unwrap();

            assert_eq!(
                &keypair.public.to_bytes()[..],
                &pub_bytes[..],
                "public key mismatch on test vector {}",
                i
            );

            let expected = Signature::from_bytes(&sig_bytes).unwrap();
            let actual = keypair.sign(&msg_bytes);
            assert_eq!(
                expected.to_bytes(),
                actual.to_bytes(),
                "signature mismatch on test vector {}",
                i
            );
            assert!(
                keypair.verify(&msg_bytes, &actual).is_ok(),
                "verification failure on test vector {}",
                i
            );

            // The public key parsed from the vector must verify too.
            let parsed_public = PublicKey::from_bytes(&pub_bytes).unwrap();
            assert!(parsed_public.verify(&msg_bytes, &actual).is_ok());
        }
    }

    #[test]
    fn signature_malleability_is_rejected() {
        // The TEST 1 signature with ℓ added to S: it encodes the same
        // residue class, and must be rejected at parse time.
        let malleated_hex = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
                             4c8c7872aa064e049dbb3013fbf29380d25bf5f0595bbe24655141438e7a101b";
        let malleated: Vec<u8> = FromHex::from_hex(malleated_hex).unwrap();
        assert!(Signature::from_bytes(&malleated).is_err());
    }
}

#[cfg(test)]
mod integrations {
    use super::*;

    static SEED_1: [u8; 32] = [
        0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c,
        0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae,
        0x7f, 0x60,
    ];
    static SEED_2: [u8; 32] = [
        0x4c, 0xcd, 0x08, 0x9b, 0x28, 0xff, 0x96, 0xda, 0x9d, 0xb6, 0xc3, 0x46, 0xec, 0x11, 0x4e,
        0x0f, 0x5b, 0x8a, 0x31, 0x9f, 0x35, 0xab, 0xa6, 0x24, 0xda, 0x8c, 0xf6, 0xed, 0x4f, 0xb8,
        0xa6, 0xfb,
    ];

    fn keypair_from_seed(seed: &[u8; 32]) -> Keypair {
        let secret = SecretKey::from_bytes(seed).unwrap();
        let public = PublicKey::from(&secret);
        Keypair { secret, public }
    }

    #[test]
    fn sign_verify_round_trip() {
        let keypair = keypair_from_seed(&SEED_1);
        let good: &[u8] = "test message".as_bytes();
        let bad: &[u8] = "wrong message".as_bytes();

        let sig = keypair.sign(good);

        assert!(keypair.verify(good, &sig).is_ok());
        assert!(keypair.verify(bad, &sig).is_err());
    }

    #[test]
    fn keys_and_signatures_are_deterministic() {
        let keypair_a = keypair_from_seed(&SEED_1);
        let keypair_b = keypair_from_seed(&SEED_1);
        assert_eq!(keypair_a.public, keypair_b.public);

        let message: &[u8] = b"deterministic";
        assert_eq!(
            keypair_a.sign(message).to_bytes(),
            keypair_b.sign(message).to_bytes()
        );
    }

    #[test]
    fn expanded_secret_key_signs_like_keypair() {
        let keypair = keypair_from_seed(&SEED_1);
        let expanded = ExpandedSecretKey::from(&keypair.secret);
        let public_from_expanded = PublicKey::from(&expanded);
        assert_eq!(public_from_expanded, keypair.public);

        let message: &[u8] = b"expanded key signing";
        let sig = expanded.sign(message, &keypair.public);
        assert_eq!(sig.to_bytes(), keypair.sign(message).to_bytes());
        assert!(keypair.verify(message, &sig).is_ok());
    }

    #[test]
    fn wrong_key_rejects() {
        let keypair = keypair_from_seed(&SEED_1);
        let other = keypair_from_seed(&SEED_2);
        let message: &[u8] = b"signed under key one";

        let sig = keypair.sign(message);
        assert!(other.verify(message, &sig).is_err());
    }

    #[test]
    fn tampered_signature_rejects() {
        let keypair = keypair_from_seed(&SEED_1);
        let message: &[u8] = b"tamper with me";
        let sig_bytes = keypair.sign(message).to_bytes();

        // Flip one bit in every byte position in turn.
        for i in 0..SIGNATURE_LENGTH {
            let mut bad_bytes = sig_bytes;
            bad_bytes[i] ^= 1 << (i % 8);
            // Either the mangled bytes no longer parse (the scalar or
            // length checks), or the verification equation fails.
            match Signature::from_bytes(&bad_bytes) {
                Ok(bad_sig) => assert!(
                    keypair.verify(message, &bad_sig).is_err(),
                    "accepted signature with bit {} flipped",
                    i
                ),
                Err(_) => continue,
            }
        }
    }

    #[test]
    fn tampered_message_rejects() {
        let keypair = keypair_from_seed(&SEED_1);
        let message: &[u8] = b"tamper with me";
        let sig = keypair.sign(message);

        for i in 0..message.len() {
            let mut bad = message.to_vec();
            bad[i] ^= 1 << (i % 8);
            assert!(keypair.verify(&bad, &sig).is_err());
        }
    }

    #[test]
    fn tampered_public_key_rejects() {
        let keypair = keypair_from_seed(&SEED_1);
        let message: &[u8] = b"tamper with me";
        let sig = keypair.sign(message);
        let pk_bytes = keypair.public.to_bytes();

        for i in 0..PUBLIC_KEY_LENGTH {
            let mut bad_bytes = pk_bytes;
            bad_bytes[i] ^= 1 << (i % 8);
            // A flipped bit may make the bytes undecodable; if they
            // still decode, they decode to a different key, which must
            // reject the signature.
            match PublicKey::from_bytes(&bad_bytes) {
                Ok(bad_public) => assert!(
                    bad_public.verify(message, &sig).is_err(),
                    "accepted signature under public key with bit {} flipped",
                    i
                ),
                Err(_) => continue,
            }
        }
    }

    #[test]
    fn noncanonical_r_rejects() {
        let keypair = keypair_from_seed(&SEED_1);
        let message: &[u8] = b"canonical R only";
        let mut sig_bytes = keypair.sign(message).to_bytes();

        // Replace R with 2^255 - 1 (masked value >= p).
        for byte in sig_bytes[..31].iter_mut() {
            *byte = 0xff;
        }
        sig_bytes[31] = 0x7f;

        let sig = Signature::from_bytes(&sig_bytes).unwrap();
        assert!(keypair.verify(message, &sig).is_err());
    }

    #[test]
    fn noncanonical_public_key_is_rejected() {
        // All 0xff with the sign bit cleared encodes y = 2^255 - 1 >= p.
        let mut bad_pk = [0xffu8; 32];
        bad_pk[31] = 0x7f;
        assert!(PublicKey::from_bytes(&bad_pk).is_err());
    }

    #[test]
    fn low_order_public_key_rejects_honest_signature() {
        // The all-zero public key encodes a point of small order.  An
        // honest signature must not verify under it.
        let low_order_pk = PublicKey::from_bytes(&[0u8; 32]).unwrap();
        let keypair = keypair_from_seed(&SEED_1);
        let message: &[u8] = b"honest message";
        let sig = keypair.sign(message);

        assert!(low_order_pk.verify(message, &sig).is_err());
    }

    #[test]
    fn keypair_round_trip() {
        let keypair = keypair_from_seed(&SEED_1);
        let bytes = keypair.to_bytes();
        let decoded = Keypair::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.secret.to_bytes(), keypair.secret.to_bytes());
        assert_eq!(decoded.public, keypair.public);

        assert!(Keypair::from_bytes(&bytes[..63]).is_err());
    }

    #[test]
    fn precompute_is_idempotent() {
        precompute();
        precompute();

        let keypair = keypair_from_seed(&SEED_2);
        let message: &[u8] = b"after explicit precomputation";
        let sig = keypair.sign(message);
        assert!(keypair.verify(message, &sig).is_ok());
    }

    #[test]
    fn concurrent_signing_and_verification() {
        use std::thread;

        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    let mut seed = SEED_1;
                    seed[0] ^= i as u8;
                    let secret = SecretKey::from_bytes(&seed).unwrap();
                    let public = PublicKey::from(&secret);
                    let keypair = Keypair { secret, public };
                    let message = [i as u8; 100];
                    let sig = keypair.sign(&message);
                    keypair.verify(&message, &sig).is_ok()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[cfg(feature = "rand")]
    #[test]
    fn generated_keypairs_round_trip() {
        let mut csprng = rand::rngs::OsRng;
        let keypair = Keypair::generate(&mut csprng);
        let message: &[u8] = b"freshly generated";
        let sig = keypair.sign(message);
        assert!(keypair.verify(message, &sig).is_ok());
    }
}
