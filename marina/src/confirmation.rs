//! Confirmation code generation.
//!
//! Codes are a short prefix followed by random Crockford base-32 characters.
//! Ten characters carry 50 bits, which keeps collisions rare; the allocator
//! still retries on the unique-constraint violation that a collision causes.

use rand::Rng;

use crate::reservation::ConfirmationCode;

/// Crockford base-32 alphabet (no I, L, O or U).
const CROCKFORD: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Number of random characters in a generated code.
pub const CODE_LENGTH: usize = 10;

/// Default code prefix.
pub const DEFAULT_PREFIX: &str = "SLP";

/// Default number of codes tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// Produces candidate confirmation codes.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmationCodeSource: Send + Sync {
    /// Returns a fresh candidate code.
    fn next_code(&self) -> ConfirmationCode;
}

/// Generates codes from the thread-local random generator.
///
/// # Examples
///
/// ```
/// use marina::confirmation::{ConfirmationCodeSource, RandomCodeSource};
///
/// let source = RandomCodeSource::new("SLP");
/// let code = source.next_code();
/// assert!(code.as_str().starts_with("SLP-"));
/// assert_eq!(code.as_str().len(), 14);
/// ```
#[derive(Debug, Clone)]
pub struct RandomCodeSource {
    prefix: String,
}

impl RandomCodeSource {
    /// Creates a source emitting `<prefix>-XXXXXXXXXX`. Characters other
    /// than ASCII letters, digits and dashes are dropped from the prefix; an
    /// empty prefix yields bare codes.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
                .to_ascii_uppercase(),
        }
    }
}

impl Default for RandomCodeSource {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl ConfirmationCodeSource for RandomCodeSource {
    fn next_code(&self) -> ConfirmationCode {
        let mut rng = rand::thread_rng();
        let body: String = (0..CODE_LENGTH)
            .map(|_| char::from(CROCKFORD[rng.gen_range(0..CROCKFORD.len())]))
            .collect();

        if self.prefix.is_empty() {
            ConfirmationCode::generated(body)
        } else {
            ConfirmationCode::generated(format!("{}-{body}", self.prefix))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_use_crockford_alphabet() {
        let source = RandomCodeSource::new("slp");
        for _ in 0..100 {
            let code = source.next_code();
            let (prefix, body) = code.as_str().split_once('-').unwrap();
            assert_eq!(prefix, "SLP");
            assert_eq!(body.len(), CODE_LENGTH);
            assert!(body.bytes().all(|b| CROCKFORD.contains(&b)));
        }
    }

    #[test]
    fn test_prefix_is_sanitized() {
        let code = RandomCodeSource::new(" m@r ").next_code();
        assert!(code.as_str().starts_with("MR-"));
    }

    #[test]
    fn test_empty_prefix() {
        let code = RandomCodeSource::new("").next_code();
        assert_eq!(code.as_str().len(), CODE_LENGTH);
        assert!(!code.as_str().contains('-'));
    }

    #[test]
    fn test_codes_are_distinct() {
        let source = RandomCodeSource::default();
        let codes: HashSet<_> = (0..1000).map(|_| source.next_code()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_mock_source() {
        let mut mock = MockConfirmationCodeSource::new();
        mock.expect_next_code()
            .times(1)
            .returning(|| ConfirmationCode::new("SLP-FIXED").unwrap());
        assert_eq!(mock.next_code().as_str(), "SLP-FIXED");
    }
}
