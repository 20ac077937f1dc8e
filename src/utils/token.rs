use rand::Rng;

/// Voting codes are short enough to read out over the phone, long enough
/// that guessing one is impractical (36^10 values).
pub const CODE_LENGTH: usize = 10;

const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_code_token() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
