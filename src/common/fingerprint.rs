/// Width of the fingerprint space, in bits
const FINGERPRINT_BITS: u32 = 32;

/// Generate a 32-bit fingerprint for near-duplicate detection
///
/// Tokenizes on whitespace (case-folded), hashes each word with a
/// polynomial rolling hash, and XOR-folds the word hashes into a single
/// accumulator. Each word hash is rotated by its token position before
/// folding, so reordering words changes the fingerprint.
///
/// This is a simplified, SimHash-flavored fold, not a true locality
/// sensitive hash: at 32 bits it will both under- and over-detect
/// duplicates. Kept for behavioral parity with the original scheme.
pub fn fingerprint(text: &str) -> u32 {
    let mut acc: u32 = 0;

    for (position, word) in text.split_whitespace().enumerate() {
        let hash = word_hash(&word.to_lowercase());
        acc ^= hash.rotate_left(position as u32 % FINGERPRINT_BITS);
    }

    // Empty text folds nothing and stays at the stable zero value
    acc
}

/// Polynomial rolling hash over a single word
fn word_hash(word: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in word.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
    }
    hash
}

/// Hamming similarity between two fingerprints, in [0, 1]
///
/// `1.0` means identical bit patterns; each differing bit costs 1/32.
pub fn similarity(a: u32, b: u32) -> f64 {
    1.0 - f64::from((a ^ b).count_ones()) / f64::from(FINGERPRINT_BITS)
}
