//! Offline bag-of-characters vectorizer.
//!
//! Each surviving character's code point is added into a slot picked by its position in
//! the word and the word's index, then the whole vector is L2-normalized. Cheap,
//! deterministic, and entirely local. It is not a semantic embedding.

/// Width of every vector the engine produces.
pub const DIMENSIONS: usize = 128;

/// Identifier recorded in the database so stored vectors can be matched to the
/// vectorizer that produced them.
pub const VECTORIZER_ID: &str = "char-bag-128-v1";

/// Slot stride between consecutive words.
const WORD_STRIDE: usize = 7;

/// Map text to a normalized [`DIMENSIONS`]-wide vector.
///
/// Empty or punctuation-only input yields the zero vector.
pub fn vectorize(text: &str) -> Vec<f64> {
    let cleaned = clean(text);
    let mut vec = vec![0.0f64; DIMENSIONS];

    // A leading space still occupies word index 0 as an empty token.
    let offset = usize::from(cleaned.starts_with(' '));

    for (i, word) in cleaned.split_whitespace().enumerate() {
        let word_idx = i + offset;
        for (char_idx, byte) in word.bytes().enumerate() {
            let pos = (char_idx + word_idx * WORD_STRIDE) % DIMENSIONS;
            vec[pos] += f64::from(byte);
        }
    }

    l2_normalize(vec)
}

/// Lowercase, then keep only `a-z`, `0-9`, and plain spaces.
fn clean(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect()
}

/// Divide by the Euclidean norm, treating a zero norm as 1.
fn l2_normalize(mut v: Vec<f64>) -> Vec<f64> {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm = if norm == 0.0 { 1.0 } else { norm };
    for x in &mut v {
        *x /= norm;
    }
    v
}
