//! Sums ciphertexts for every preset, including one sum past the budget.
//!
//! Set `RUST_LOG=fahe=debug` to see key generation details.
use fahe::{FaheEngine, Preset};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const MAX_TERMS: usize = 1024;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut rng = ChaCha20Rng::seed_from_u64(2024);

    for preset in Preset::ALL {
        let start = Instant::now();
        let engine = FaheEngine::builder()
            .preset(preset)
            .safe_prime(false)
            .build(preset.scheme(), &mut rng)?;
        let keygen = start.elapsed();

        let terms = engine
            .num_additions()
            .to_usize()
            .unwrap_or(MAX_TERMS)
            .min(MAX_TERMS);
        let messages = engine.generate_messages(terms, &mut rng)?;

        let start = Instant::now();
        let cts = engine.par_encrypt_list(&messages, 4, &mut rng)?;
        let encrypt = start.elapsed();

        let modulus = BigUint::one() << engine.params().m_max;
        let expected = messages.iter().sum::<BigUint>() % &modulus;
        let decrypted = engine.decrypt(&engine.sum(&cts))?;

        println!(
            "{preset:?}: {terms} terms, keygen {keygen:?}, encrypt {encrypt:?}, {}",
            if decrypted == expected { "ok" } else { "MISMATCH" }
        );
    }

    // alpha = 2 allows two terms; eight usually overflow the noise headroom.
    let engine = FaheEngine::builder()
        .lambda(64)
        .m_max(16)
        .alpha(2)
        .msg_size(8)
        .safe_prime(false)
        .build_fahe1(&mut rng)?;
    let messages = engine.generate_messages(8, &mut rng)?;
    let cts = engine.encrypt_list(&messages, &mut rng)?;
    let expected: BigUint = messages.iter().sum();
    let decrypted = engine.decrypt(&engine.sum(&cts))?;
    println!("over budget: expected {expected}, decrypted {decrypted}");

    Ok(())
}
