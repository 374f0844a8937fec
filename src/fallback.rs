use std::future::Future;
use tracing::{debug, warn};

/// Run `primary`; if it fails and `fallback_enabled` is set, run `fallback` exactly once.
///
/// # Arguments
/// * `operation_name` - Name of the operation for logging
/// * `primary` - Async closure tried first
/// * `fallback_enabled` - Whether a failed primary may fall back
/// * `fallback` - Async closure tried after a failed primary
///
/// # Returns
/// The first successful result, or the last error observed.
pub async fn with_fallback<T, E, P, PFut, F, FFut>(
    operation_name: &str,
    primary: P,
    fallback_enabled: bool,
    fallback: F,
) -> Result<T, E>
where
    P: FnOnce() -> PFut,
    PFut: Future<Output = Result<T, E>>,
    F: FnOnce() -> FFut,
    FFut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let primary_error = match primary().await {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };

    if !fallback_enabled {
        debug!("{}: Failed ({}), no fallback allowed", operation_name, primary_error);
        return Err(primary_error);
    }

    warn!("{}: Primary attempt failed ({}), trying fallback", operation_name, primary_error);

    match fallback().await {
        Ok(result) => {
            debug!("{}: Fallback succeeded", operation_name);
            Ok(result)
        }
        Err(e) => {
            warn!("{}: Fallback failed too. Last error: {}", operation_name, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let fallback_calls = AtomicU32::new(0);

        let result: Result<&str, String> = with_fallback(
            "test",
            || async { Ok("published") },
            true,
            || async {
                fallback_calls.fetch_add(1, Ordering::SeqCst);
                Ok("draft")
            },
        )
        .await;

        assert_eq!(result, Ok("published"));
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_without_fallback_returns_primary_error() {
        let fallback_calls = AtomicU32::new(0);

        let result: Result<&str, String> = with_fallback(
            "test",
            || async { Err("published failed".to_string()) },
            false,
            || async {
                fallback_calls.fetch_add(1, Ordering::SeqCst);
                Ok("draft")
            },
        )
        .await;

        assert_eq!(result, Err("published failed".to_string()));
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_with_fallback_runs_it_once() {
        let fallback_calls = AtomicU32::new(0);

        let result: Result<&str, String> = with_fallback(
            "test",
            || async { Err("published failed".to_string()) },
            true,
            || async {
                fallback_calls.fetch_add(1, Ordering::SeqCst);
                Ok("draft")
            },
        )
        .await;

        assert_eq!(result, Ok("draft"));
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_both_failing_returns_fallback_error() {
        let result: Result<&str, String> = with_fallback(
            "test",
            || async { Err("published failed".to_string()) },
            true,
            || async { Err("draft failed".to_string()) },
        )
        .await;

        assert_eq!(result, Err("draft failed".to_string()));
    }
}
