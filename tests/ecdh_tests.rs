//! Agreement-level tests: shared-secret symmetry, encoding, key validation

use assert_matches::assert_matches;
use ecdh_agreement::{AgreementKey, Curve, Error, LocalKey, PublicKey};

#[test]
fn test_shared_secret_symmetry_on_every_curve() {
    for curve in [Curve::P256, Curve::P384, Curve::P521] {
        let alice = LocalKey::generate(curve);
        let bob = LocalKey::generate(curve);

        let alice_secret = alice.agree(&bob.public_key().unwrap()).unwrap();
        let bob_secret = bob.agree(&alice.public_key().unwrap()).unwrap();

        assert_eq!(alice_secret.as_bytes(), bob_secret.as_bytes());
        assert_eq!(alice_secret.len(), curve.field_size());
    }
}

#[test]
fn test_public_key_sec1_round_trip() {
    for curve in [Curve::P256, Curve::P384, Curve::P521] {
        let public = LocalKey::generate(curve).public_key().unwrap();
        let encoded = public.to_sec1_bytes();

        // Uncompressed SEC1: 0x04 || x || y
        assert_eq!(encoded[0], 0x04);
        assert_eq!(encoded.len(), 1 + 2 * curve.field_size());

        let decoded = PublicKey::from_sec1_bytes(curve, &encoded).unwrap();
        assert_eq!(decoded, public);
    }
}

#[test]
fn test_malformed_public_key_is_rejected() {
    assert_matches!(
        PublicKey::from_sec1_bytes(Curve::P256, &[0x04, 0x01, 0x02]),
        Err(Error::InvalidKey(_))
    );
    // A valid P-256 point is not a valid P-384 point
    let p256_point = LocalKey::generate(Curve::P256)
        .public_key()
        .unwrap()
        .to_sec1_bytes();
    assert_matches!(
        PublicKey::from_sec1_bytes(Curve::P384, &p256_point),
        Err(Error::InvalidKey(_))
    );
}

#[test]
fn test_private_key_round_trip_produces_same_public_key() {
    // Fixed scalar, well within the P-256 order
    let mut scalar = [0u8; 32];
    scalar[31] = 0x2a;
    let a = LocalKey::from_bytes(Curve::P256, &scalar).unwrap();
    let b = LocalKey::from_bytes(Curve::P256, &scalar).unwrap();
    assert_eq!(a.public_key().unwrap(), b.public_key().unwrap());
}

#[test]
fn test_agreement_with_imported_keys_is_deterministic() {
    let mut a_bytes = [0u8; 32];
    a_bytes[31] = 0x17;
    let mut b_bytes = [0u8; 32];
    b_bytes[31] = 0x29;

    let a = LocalKey::from_bytes(Curve::P256, &a_bytes).unwrap();
    let b = LocalKey::from_bytes(Curve::P256, &b_bytes).unwrap();

    let s1 = a.agree(&b.public_key().unwrap()).unwrap();
    let s2 = a.agree(&b.public_key().unwrap()).unwrap();
    assert_eq!(s1.as_bytes(), s2.as_bytes());
}
