use fahe::{FaheEngine, Scheme};
use num_bigint::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = ChaCha20Rng::from_os_rng();

    for scheme in [Scheme::Fahe1, Scheme::Fahe2] {
        let engine = FaheEngine::builder()
            .lambda(128)
            .m_max(32)
            .alpha(6)
            .msg_size(32)
            .build(scheme, &mut rng)?;
        println!("{engine}");

        let layout = engine.key().layout();
        println!(
            "  rho={} eta={} gamma={} |p|={} |X|={}",
            layout.rho,
            layout.eta,
            layout.gamma,
            engine.key().p().bits(),
            engine.key().x().bits()
        );

        let message = BigUint::from(123_456_789u32);
        let ct = engine.encrypt(&message, &mut rng)?;
        let decrypted = engine.decrypt(&ct)?;
        println!("  {message} -> {} bit ciphertext -> {decrypted}", ct.bits());

        let other = BigUint::from(1_000u32);
        let sum = engine.add(&ct, &engine.encrypt(&other, &mut rng)?);
        println!("  {message} + {other} = {}", engine.decrypt(&sum)?);
    }

    Ok(())
}
