use base64_simd::URL_SAFE_NO_PAD;
use xxhash_rust::xxh3::xxh3_128;

/// Content hash used in emitted asset file names.
pub fn xxhash_base64_url(input: &[u8]) -> String {
  let hash = xxh3_128(input).to_le_bytes();
  URL_SAFE_NO_PAD.encode_to_string(hash)
}

#[test]
fn test_xxhash_base64_url() {
  let hash = xxhash_base64_url(b"hello");
  // 16 bytes without padding
  assert_eq!(hash.len(), 22);
  assert!(hash.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
  assert_eq!(hash, xxhash_base64_url(b"hello"));
  assert_ne!(hash, xxhash_base64_url(b"hello!"));
}
