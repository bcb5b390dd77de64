use crate::error::DeriveError;
use crate::hash::HashPrimitive;
use zeroize::Zeroizing;

pub const SALT_HEX_LEN: usize = 16;
pub const SEED_HEX_LEN: usize = 8;

/// Salt for a secret pair: the first 16 hex chars of `H(first ‖ second)`.
pub fn derive_salt<H: HashPrimitive>(
    hasher: &H,
    first: &str,
    second: &str,
) -> Result<String, DeriveError> {
    let mut input = Zeroizing::new(Vec::with_capacity(first.len() + second.len()));
    input.extend_from_slice(first.as_bytes());
    input.extend_from_slice(second.as_bytes());

    let digest = hasher.digest(&input)?;
    hex_prefix(&digest, SALT_HEX_LEN).map(str::to_owned)
}

/// Initial LCG state: the first 8 hex chars of `H(first ‖ second ‖ salt)`
/// read as a big-endian `u32`.
pub fn derive_seed<H: HashPrimitive>(
    hasher: &H,
    first: &str,
    second: &str,
    salt: &str,
) -> Result<u32, DeriveError> {
    let mut input = Zeroizing::new(Vec::with_capacity(
        first.len() + second.len() + salt.len(),
    ));
    input.extend_from_slice(first.as_bytes());
    input.extend_from_slice(second.as_bytes());
    input.extend_from_slice(salt.as_bytes());

    let digest = Zeroizing::new(hasher.digest(&input)?);
    let prefix = hex_prefix(&digest, SEED_HEX_LEN)?;

    u32::from_str_radix(prefix, 16).map_err(|_| DeriveError::MalformedDigest {
        digest_len: digest.len(),
    })
}

fn hex_prefix(digest: &str, len: usize) -> Result<&str, DeriveError> {
    let malformed = || DeriveError::MalformedDigest {
        digest_len: digest.len(),
    };

    let prefix = digest.get(..len).ok_or_else(malformed)?;
    if !prefix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256Hex;
    use std::sync::Mutex;

    struct FixedDigest(&'static str);

    impl HashPrimitive for FixedDigest {
        fn digest(&self, _input: &[u8]) -> Result<String, DeriveError> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Default)]
    struct RecordingHash {
        inputs: Mutex<Vec<Vec<u8>>>,
    }

    impl HashPrimitive for RecordingHash {
        fn digest(&self, input: &[u8]) -> Result<String, DeriveError> {
            self.inputs.lock().unwrap().push(input.to_vec());
            Sha256Hex.digest(input)
        }
    }

    const STUB: &str = "0000000100000002000000030000000400000005000000060000000700000008";

    #[test]
    fn test_salt_from_stub() {
        let salt = derive_salt(&FixedDigest(STUB), "abcdef", "ghijkl").unwrap();
        assert_eq!(salt, "0000000100000002");
    }

    #[test]
    fn test_seed_from_stub() {
        let seed = derive_seed(&FixedDigest(STUB), "abcdef", "ghijkl", "0000000100000002").unwrap();
        assert_eq!(seed, 1);
    }

    #[test]
    fn test_salt_and_seed_sha256() {
        let salt = derive_salt(&Sha256Hex, "abcdef1!", "GHIJKL2@").unwrap();
        assert_eq!(salt, "6936bd3527c3d804");

        let seed = derive_seed(&Sha256Hex, "abcdef1!", "GHIJKL2@", &salt).unwrap();
        assert_eq!(seed, 3961372890);
    }

    #[test]
    fn test_hash_inputs_are_plain_concatenations() {
        let hasher = RecordingHash::default();
        let salt = derive_salt(&hasher, "first!", "second").unwrap();
        derive_seed(&hasher, "first!", "second", &salt).unwrap();

        let inputs = hasher.inputs.lock().unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], b"first!second");
        assert_eq!(inputs[1], format!("first!second{}", salt).into_bytes());
    }

    #[test]
    fn test_salt_order_sensitive() {
        let ab = derive_salt(&Sha256Hex, "abcdef1!", "GHIJKL2@").unwrap();
        let ba = derive_salt(&Sha256Hex, "GHIJKL2@", "abcdef1!").unwrap();
        assert_ne!(ab, ba);
        assert_eq!(ba, "4d1459ff2e4e6b07");
    }

    #[test]
    fn test_seed_max_value() {
        let seed = derive_seed(&FixedDigest("ffffffff00"), "a", "b", "c").unwrap();
        assert_eq!(seed, u32::MAX);
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        let seed = derive_seed(&FixedDigest("DEADBEEF"), "a", "b", "c").unwrap();
        assert_eq!(seed, 0xDEADBEEF);
    }

    #[test]
    fn test_short_digest_rejected() {
        let result = derive_salt(&FixedDigest("abc"), "abcdef", "ghijkl");
        assert_eq!(result, Err(DeriveError::MalformedDigest { digest_len: 3 }));

        let result = derive_seed(&FixedDigest("1234567"), "a", "b", "c");
        assert_eq!(result, Err(DeriveError::MalformedDigest { digest_len: 7 }));
    }

    #[test]
    fn test_non_hex_digest_rejected() {
        let result = derive_seed(&FixedDigest("+1234567ffff"), "a", "b", "c");
        assert_eq!(result, Err(DeriveError::MalformedDigest { digest_len: 12 }));

        let result = derive_salt(&FixedDigest("zzzzzzzzzzzzzzzzzzzz"), "a", "b");
        assert!(matches!(result, Err(DeriveError::MalformedDigest { .. })));
    }

    #[test]
    fn test_multibyte_digest_does_not_panic() {
        let result = derive_seed(&FixedDigest("ффффф"), "a", "b", "c");
        assert!(matches!(result, Err(DeriveError::MalformedDigest { .. })));
    }

    #[test]
    fn test_hash_failure_propagates() {
        struct Unavailable;
        impl HashPrimitive for Unavailable {
            fn digest(&self, _input: &[u8]) -> Result<String, DeriveError> {
                Err(DeriveError::Hash("no backend".to_string()))
            }
        }

        let result = derive_salt(&Unavailable, "abcdef", "ghijkl");
        assert_eq!(result, Err(DeriveError::Hash("no backend".to_string())));
    }
}
