// Simulated shortening backend
//
// There is no real service behind the form. "Shortening" a URL means
// sleeping a randomized delay that models network latency, validating the
// input prefix, and composing a random 6-character code into a fixed
// origin. The random source is deliberately non-cryptographic; a real
// service would need a collision-checked, store-backed allocator instead.

use rand::Rng;
use std::ops::Range;
use std::time::Duration;
use thiserror::Error;

/// Default origin the short code is composed into
pub const DEFAULT_ORIGIN: &str = "https://short.url";

/// Default simulated latency window in milliseconds: [500, 1500)
pub const DEFAULT_DELAY_MS: Range<u64> = 500..1500;

/// Alphabet for generated short codes
const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated short codes
const CODE_LEN: usize = 6;

/// The one domain error: input rejected by the simulated backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Please enter a valid URL starting with http:// or https://")]
pub struct InvalidUrlError;

/// Simulate a shortening call against the backend.
///
/// Always waits a uniformly random delay drawn from `delay_ms` before
/// resolving, whether the input is valid or not. Fails with
/// [`InvalidUrlError`] when `url` is empty or does not begin with the
/// literal prefix `http`; otherwise returns `{origin}/{code}` with a fresh
/// 6-character lowercase alphanumeric code.
pub async fn simulate_shorten(
    url: &str,
    origin: &str,
    delay_ms: Range<u64>,
) -> Result<String, InvalidUrlError> {
    // Sample before the await: ThreadRng must not be held across it
    let delay = rand::rng().random_range(delay_ms);
    tokio::time::sleep(Duration::from_millis(delay)).await;

    if url.is_empty() || !url.starts_with("http") {
        return Err(InvalidUrlError);
    }

    Ok(format!("{}/{}", origin, short_code()))
}

/// Generate a 6-character code drawn from `[a-z0-9]`
fn short_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // start_paused makes tokio auto-advance the clock, so the randomized
    // delays elapse instantly without weakening the real code path.

    #[tokio::test(start_paused = true)]
    async fn rejects_empty_input() {
        let result = simulate_shorten("", DEFAULT_ORIGIN, DEFAULT_DELAY_MS).await;
        assert_eq!(result, Err(InvalidUrlError));
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_non_http_prefix() {
        let result = simulate_shorten("notaurl", DEFAULT_ORIGIN, DEFAULT_DELAY_MS).await;
        assert_eq!(result, Err(InvalidUrlError));

        let result = simulate_shorten("ftp://example.com", DEFAULT_ORIGIN, DEFAULT_DELAY_MS).await;
        assert_eq!(result, Err(InvalidUrlError));
    }

    #[tokio::test(start_paused = true)]
    async fn accepts_http_and_https() {
        for url in ["http://example.com", "https://a.com"] {
            let short = simulate_shorten(url, DEFAULT_ORIGIN, DEFAULT_DELAY_MS)
                .await
                .expect("valid URL must shorten");
            let suffix = short
                .strip_prefix("https://short.url/")
                .expect("result must start with the fixed origin");
            assert_eq!(suffix.len(), CODE_LEN);
            assert!(suffix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn delay_stays_within_window() {
        let start = tokio::time::Instant::now();
        let _ = simulate_shorten("https://a.com", DEFAULT_ORIGIN, DEFAULT_DELAY_MS).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(1500));
    }

    #[test]
    fn short_codes_use_the_documented_alphabet() {
        for _ in 0..100 {
            let code = short_code();
            assert_eq!(code.len(), CODE_LEN);
            assert!(code
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        }
    }
}
