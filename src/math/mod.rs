pub mod primes;
pub mod sampling;
pub mod utils;

pub use primes::{PrimeConfig, generate_prime, is_probable_prime};
pub use sampling::{generate_message, generate_message_list, random_below, random_bits};
pub use utils::{mask_bits, pow2};
