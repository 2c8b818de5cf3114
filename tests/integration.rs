use ml_kem::{KemError, MlKem, ParamSet, ML_KEM_1024, ML_KEM_512, ML_KEM_768};
use rand_chacha::rand_core::{RngCore, SeedableRng};

fn expected_flow(params: ParamSet, seed: u64, iterations: usize) {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let kem = MlKem::new(params);
    for _ in 0..iterations {
        // Alice runs KeyGen and sends the encapsulation key to Bob
        let (alice_ek, alice_dk) = kem.try_keygen_with_rng(&mut rng).unwrap();
        assert_eq!(alice_ek.len(), params.ek_len());
        assert_eq!(alice_dk.len(), params.dk_len());

        // Bob encapsulates against it and sends the ciphertext back
        let bob_ek = alice_ek;
        let (bob_ssk, bob_ct) = kem.try_encaps_with_rng(&bob_ek, &mut rng).unwrap();
        assert_eq!(bob_ct.len(), params.ct_len());

        // Alice decapsulates; both ends now share the same secret
        let alice_ssk = kem.try_decaps(&alice_dk, &bob_ct).unwrap();
        assert_eq!(alice_ssk, bob_ssk);
    }
}

#[test]
fn test_expected_flow_512() {
    expected_flow(ML_KEM_512, 123, 100);
}

#[test]
fn test_expected_flow_768() {
    expected_flow(ML_KEM_768, 456, 100);
}

#[test]
fn test_expected_flow_1024() {
    expected_flow(ML_KEM_1024, 789, 100);
}

// Decapsulation failure probability is bounded far below anything a seeded
// run of this size could plausibly hit; every iteration must agree.
#[test]
fn test_768_round_trip_1000() {
    expected_flow(ML_KEM_768, 20240813, 1000);
}

// $ cargo test -- --ignored
#[ignore]
#[test]
fn test_soak_10k_each() {
    expected_flow(ML_KEM_512, 1, 10_000);
    expected_flow(ML_KEM_768, 2, 10_000);
    expected_flow(ML_KEM_1024, 3, 10_000);
}

#[test]
fn keygen_from_seed_is_deterministic() {
    let kem = MlKem::new(ML_KEM_768);
    let d = [0x11u8; 32];
    let z = [0x22u8; 32];
    let (ek1, dk1) = kem.keygen_from_seed(&d, &z);
    let (ek2, dk2) = kem.keygen_from_seed(&d, &z);
    assert_eq!(ek1, ek2);
    assert_eq!(dk1, dk2);

    let (ek3, _) = kem.keygen_from_seed(&[0x33u8; 32], &z);
    assert_ne!(ek1, ek3);
}

#[test]
fn encaps_rejects_wrong_length_key() {
    let kem = MlKem::new(ML_KEM_512);
    let short_ek = vec![0u8; ML_KEM_512.ek_len() - 1];
    assert_eq!(
        kem.encaps_from_seed(&short_ek, &[0u8; 32]),
        Err(KemError::MalformedEncapsulationKey)
    );

    // A 768-sized key is the wrong length for a 512 instance.
    let (ek_768, _) = MlKem::new(ML_KEM_768).keygen_from_seed(&[0u8; 32], &[0u8; 32]);
    assert_eq!(
        kem.encaps_from_seed(&ek_768, &[0u8; 32]),
        Err(KemError::MalformedEncapsulationKey)
    );
}

#[test]
fn encaps_rejects_unreduced_key_coefficients() {
    let kem = MlKem::new(ML_KEM_512);
    // 0xFF bytes decode to 12-bit limbs of 4095 >= q.
    let bad_ek = vec![0xFFu8; ML_KEM_512.ek_len()];
    assert_eq!(
        kem.encaps_from_seed(&bad_ek, &[0u8; 32]),
        Err(KemError::MalformedEncapsulationKey)
    );

    // Corrupting a single limb of an honest key is also caught.
    let (mut ek, _) = kem.keygen_from_seed(&[7u8; 32], &[8u8; 32]);
    ek[0] = 0xFF;
    ek[1] |= 0x0F;
    assert_eq!(
        kem.encaps_from_seed(&ek, &[0u8; 32]),
        Err(KemError::MalformedEncapsulationKey)
    );
}

#[test]
fn decaps_rejects_malformed_inputs() {
    let kem = MlKem::new(ML_KEM_512);
    let (ek, dk) = kem.keygen_from_seed(&[4u8; 32], &[5u8; 32]);
    let (_, ct) = kem.encaps_from_seed(&ek, &[6u8; 32]).unwrap();

    let short_ct = &ct[..ct.len() - 1];
    assert_eq!(kem.try_decaps(&dk, short_ct), Err(KemError::MalformedCiphertext));

    let short_dk = &dk[..dk.len() - 1];
    assert_eq!(kem.try_decaps(short_dk, &ct), Err(KemError::MalformedDecapsulationKey));

    let mut bad_dk = dk.clone();
    bad_dk[768 * 2 + 32] ^= 0x80; // flip a bit of the embedded H(ek)
    assert_eq!(kem.try_decaps(&bad_dk, &ct), Err(KemError::MalformedDecapsulationKey));

    let mut bad_dk = dk;
    bad_dk[768 * 2] ^= 0x01; // flip a bit of the embedded ek itself
    assert_eq!(kem.try_decaps(&bad_dk, &ct), Err(KemError::MalformedDecapsulationKey));
}

#[test]
fn tampered_ciphertext_is_implicitly_rejected() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(99);
    let kem = MlKem::new(ML_KEM_1024);
    let (ek, dk) = kem.try_keygen_with_rng(&mut rng).unwrap();
    let (ssk, ct) = kem.try_encaps_with_rng(&ek, &mut rng).unwrap();

    for _ in 0..10 {
        let mut bad_ct = ct.clone();
        let bit = rng.next_u32() as usize % (bad_ct.len() * 8);
        bad_ct[bit / 8] ^= 1 << (bit % 8);

        // No error surfaces; the returned key is simply wrong.
        let rejected = kem.try_decaps(&dk, &bad_ct).unwrap();
        assert_ne!(rejected, ssk);
    }

    // The untampered ciphertext still decapsulates correctly afterwards.
    assert_eq!(kem.try_decaps(&dk, &ct).unwrap(), ssk);
}
