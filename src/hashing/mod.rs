//! BLAKE3 key derivation for the response caches.
//!
//! Keys are full 256-bit hashes rendered as lowercase hex, so they double as
//! safe file names for the file-backed cache. Multi-part keys are joined with
//! an explicit separator to prevent boundary ambiguity.

use blake3::Hasher;

/// Hex-encoded BLAKE3 hash of a single key string.
#[inline]
pub fn hash_key(key: &str) -> String {
    blake3::hash(key.as_bytes()).to_hex().to_string()
}

/// Cache key for one generator invocation.
///
/// The rendered prompt already embeds the question and retrieved context; the
/// model id is mixed in so switching models never replays a stale answer.
#[inline]
pub fn generation_key(model: &str, prompt: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(model.as_bytes());
    hasher.update(b"|");
    hasher.update(prompt.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Cache key for one retriever search.
#[inline]
pub fn search_key(query: &str, max_results: usize) -> String {
    let mut hasher = Hasher::new();
    hasher.update(query.as_bytes());
    hasher.update(b"|");
    hasher.update(&(max_results as u64).to_le_bytes());
    hasher.finalize().to_hex().to_string()
}
