use rand::Rng;
use rand::rngs::OsRng;

const DIGITS: &[u8] = b"0123456789";

/// `len` random decimal digits drawn from the OS generator.
pub fn random_digits(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| DIGITS[rng.gen_range(0..DIGITS.len())] as char)
        .collect()
}
