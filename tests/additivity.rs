use fahe::{Ciphertext, FaheEngine, Scheme};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn engine(scheme: Scheme, lambda: u32, m_max: u32, alpha: u32, msg_size: u32) -> FaheEngine {
    let mut rng = ChaCha20Rng::seed_from_u64(u64::from(lambda + m_max + alpha));
    FaheEngine::builder()
        .lambda(lambda)
        .m_max(m_max)
        .alpha(alpha)
        .msg_size(msg_size)
        .safe_prime(false)
        .build(scheme, &mut rng)
        .unwrap()
}

/// Adds fresh ciphertexts one by one up to the full budget, checking every partial sum.
fn check_running_sum(engine: &FaheEngine, seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let modulus = BigUint::one() << engine.params().m_max;
    let terms = engine.num_additions().to_usize().unwrap();

    let mut acc = Ciphertext::default();
    let mut expected = BigUint::zero();
    for i in 0..terms {
        let message = engine.generate_message(&mut rng);
        acc += engine.encrypt(&message, &mut rng).unwrap();
        expected = (expected + &message) % &modulus;
        assert_eq!(
            engine.decrypt(&acc).unwrap(),
            expected,
            "{engine}: partial sum of {} terms",
            i + 1
        );
    }
    assert!(engine.within_addition_budget(terms));
}

#[test]
fn test_running_sum_fahe1() {
    for (lambda, m_max, alpha, msg_size) in [(64, 16, 2, 16), (128, 32, 6, 28), (128, 32, 10, 20)] {
        check_running_sum(&engine(Scheme::Fahe1, lambda, m_max, alpha, msg_size), 1);
    }
}

#[test]
fn test_running_sum_fahe2() {
    for (lambda, m_max, alpha, msg_size) in [(64, 16, 2, 16), (128, 32, 6, 28), (128, 32, 10, 20)] {
        check_running_sum(&engine(Scheme::Fahe2, lambda, m_max, alpha, msg_size), 2);
    }
}

#[test]
fn test_pairwise_sum_without_wraparound() {
    for scheme in [Scheme::Fahe1, Scheme::Fahe2] {
        let engine = engine(scheme, 128, 32, 6, 32);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let m1 = BigUint::from(3_000_000_000u32);
        let m2 = BigUint::from(1_294_967_295u32);
        let c1 = engine.encrypt(&m1, &mut rng).unwrap();
        let c2 = engine.encrypt(&m2, &mut rng).unwrap();
        assert_eq!(engine.decrypt(&engine.add(&c1, &c2)).unwrap(), &m1 + &m2);
    }
}

#[test]
fn test_sum_wraps_modulo_message_space() {
    let engine = engine(Scheme::Fahe1, 64, 16, 4, 16);
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let max = BigUint::from(u16::MAX);
    let cts: Vec<Ciphertext> = (0..4)
        .map(|_| engine.encrypt(&max, &mut rng).unwrap())
        .collect();
    // 4 * 65535 = 262140 = 3 * 65536 + 65532
    assert_eq!(
        engine.decrypt(&engine.sum(&cts)).unwrap(),
        BigUint::from(65_532u32)
    );
}

#[test]
fn test_sum_of_encrypted_batch() {
    let engine = engine(Scheme::Fahe2, 128, 32, 8, 24);
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let messages = engine.generate_messages(128, &mut rng).unwrap();
    let cts = engine.encrypt_list(&messages, &mut rng).unwrap();
    let expected: BigUint = messages.iter().sum();
    assert_eq!(engine.decrypt(&cts.iter().sum()).unwrap(), expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_two_term_sum(a in any::<u32>(), b in any::<u32>(), seed in any::<u64>()) {
        let engine = engine(Scheme::Fahe1, 64, 32, 2, 32);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let ca = engine.encrypt(&BigUint::from(a), &mut rng).unwrap();
        let cb = engine.encrypt(&BigUint::from(b), &mut rng).unwrap();
        let expected = (u64::from(a) + u64::from(b)) % (1u64 << 32);
        prop_assert_eq!(engine.decrypt(&(ca + cb)).unwrap(), BigUint::from(expected));
    }
}
