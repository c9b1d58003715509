#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use fahe::batch_io::{read_list_from_path, write_list_to_path};
use fahe::{Ciphertext, FaheEngine, Preset};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const BATCH: usize = 2000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "dhat-heap")]
    let _dhat = dhat::Profiler::new_heap();

    println!("Beginning memory profiling for batch encryption");
    let mut rng = ChaCha20Rng::seed_from_u64(123);

    let preset = Preset::Fahe1QuantumLongMsgSmallAlpha;
    println!("Generating key for {preset:?}...");
    let engine = FaheEngine::builder()
        .preset(preset)
        .build(preset.scheme(), &mut rng)?;
    println!("{engine}");

    println!("Generating {BATCH} messages...");
    let messages = engine.generate_messages(BATCH, &mut rng)?;

    println!("Profiling sequential encryption...");
    let cts = engine.encrypt_list(&messages, &mut rng)?;

    println!("Profiling parallel encryption...");
    let par_cts = engine.par_encrypt_list(&messages, 8, &mut rng)?;

    println!("Profiling batch file round trip...");
    let path = std::env::temp_dir().join("fahe_mem_ciphertexts.txt");
    write_list_to_path(&path, &cts)?;
    let loaded: Vec<Ciphertext> = read_list_from_path(&path)?;
    std::fs::remove_file(&path)?;

    println!("Profiling decryption...");
    let decrypted = engine.decrypt_list(&loaded)?;
    let par_decrypted = engine.decrypt_list(&par_cts)?;
    assert_eq!(decrypted, messages);
    assert_eq!(par_decrypted, messages);

    println!("Memory profiling complete!");
    Ok(())
}
