//! Multi-threaded batch encryption.
//!
//! The input is split into `workers` contiguous chunks. Each chunk is
//! encrypted on a rayon worker with its own ChaCha20 stream, seeded from the
//! caller's generator before any work starts, so the output depends only on
//! the caller's generator state and the worker count.
use super::operations::EncryptionContext;
use super::{Ciphertext, FaheError, FaheResult};
use crate::keys::SecretKey;
use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::{debug, info, instrument};

type Seed = <ChaCha20Rng as SeedableRng>::Seed;

/// Encrypts `messages` on up to `workers` threads, preserving order.
///
/// # Errors
///
/// - [`FaheError::InvalidParameter`] if `workers` is zero or the thread pool
///   cannot be created
/// - [`FaheError::OutOfMemory`] if the output cannot be reserved
/// - any error from a single encryption; already finished chunks are dropped
#[instrument(skip_all, fields(scheme = %key.scheme(), count = messages.len(), workers = workers))]
pub fn par_encrypt_list<R: Rng + ?Sized>(
    key: &SecretKey,
    messages: &[BigUint],
    workers: usize,
    rng: &mut R,
) -> FaheResult<Vec<Ciphertext>> {
    if workers == 0 {
        return Err(FaheError::invalid("worker count must be at least 1"));
    }
    if messages.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = messages.len().div_ceil(workers).max(1);
    let chunk_count = messages.len().div_ceil(chunk_size);
    let seeds: Vec<Seed> = (0..chunk_count)
        .map(|_| {
            let mut seed = Seed::default();
            rng.fill_bytes(&mut seed);
            seed
        })
        .collect();
    debug!(chunk_size, chunk_count, "chunk streams seeded");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| FaheError::invalid(format!("thread pool: {e}")))?;

    let ctx = EncryptionContext::new(key);
    let chunks: Vec<Vec<Ciphertext>> = pool.install(|| {
        messages
            .par_chunks(chunk_size)
            .zip(seeds.into_par_iter())
            .map(|(chunk, seed)| {
                let mut chunk_rng = ChaCha20Rng::from_seed(seed);
                chunk
                    .iter()
                    .map(|message| ctx.encrypt(message, &mut chunk_rng))
                    .collect::<FaheResult<Vec<_>>>()
            })
            .collect::<FaheResult<Vec<_>>>()
    })?;

    let mut out = Vec::new();
    out.try_reserve_exact(messages.len())
        .map_err(|_| FaheError::OutOfMemory {
            requested: messages.len(),
        })?;
    out.extend(chunks.into_iter().flatten());
    info!("parallel batch encrypted");
    Ok(out)
}
