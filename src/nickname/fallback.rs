use rand::seq::SliceRandom;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use super::error::NicknameError;

/// Names used when a nickname has nothing recognizable left after cleaning
///
/// Fetched once from a plain-text list and kept for the lifetime of the process.
pub struct FallbackNamePool {
    url: String,
    client: reqwest::Client,
    names: OnceCell<Arc<Vec<String>>>,
}

impl FallbackNamePool {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
            names: OnceCell::new(),
        }
    }

    /// Get the cached names, fetching them on first use
    pub async fn names(&self) -> Result<Arc<Vec<String>>, NicknameError> {
        self.get_or_fetch(|| fetch_names(&self.client, &self.url))
            .await
    }

    /// Populate the cache with `fetch` unless a previous call already did
    ///
    /// Concurrent first callers wait on a single fetch. A failed fetch leaves
    /// the cache empty so the next call tries again.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Arc<Vec<String>>, NicknameError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>, NicknameError>>,
    {
        self.names
            .get_or_try_init(|| async move {
                let names = fetch().await?;
                if names.is_empty() {
                    return Err(NicknameError::EmptyFallbackPool);
                }
                info!("Cached {} fallback names", names.len());
                Ok(Arc::new(names))
            })
            .await
            .map(Arc::clone)
    }
}

async fn fetch_names(client: &reqwest::Client, url: &str) -> Result<Vec<String>, NicknameError> {
    info!("Fetching fallback names from {}", url);
    let text = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_name_list(&text))
}

/// Split a plain-text list into names, one per line
pub fn parse_name_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Choose one name uniformly at random
pub fn pick_random(names: &[String]) -> Result<String, NicknameError> {
    names
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or(NicknameError::EmptyFallbackPool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn offline_pool() -> FallbackNamePool {
        FallbackNamePool::new("http://127.0.0.1:9/animals.txt", reqwest::Client::new())
    }

    #[test]
    fn test_parse_name_list() {
        assert_eq!(
            parse_name_list("aardvark\nalbatross\r\n\nalligator\n"),
            vec!["aardvark", "albatross", "alligator"]
        );
        assert!(parse_name_list("  \n").is_empty());
    }

    #[test]
    fn test_pick_random() {
        let names = vec!["otter".to_string(), "badger".to_string()];
        for _ in 0..20 {
            assert!(names.contains(&pick_random(&names).unwrap()));
        }
        assert!(matches!(
            pick_random(&[]),
            Err(NicknameError::EmptyFallbackPool)
        ));
    }

    #[tokio::test]
    async fn test_fetch_is_cached() {
        let pool = offline_pool();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let names = pool
                .get_or_fetch(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec!["heron".to_string()])
                })
                .await
                .unwrap();
            assert_eq!(*names, vec!["heron"]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_retried() {
        let pool = offline_pool();

        let result = pool
            .get_or_fetch(|| async { Ok(Vec::new()) })
            .await;
        assert!(matches!(result, Err(NicknameError::EmptyFallbackPool)));

        let names = pool
            .get_or_fetch(|| async { Ok(vec!["lynx".to_string()]) })
            .await
            .unwrap();
        assert_eq!(*names, vec!["lynx"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_use_fetches_once() {
        let pool = Arc::new(offline_pool());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let pool = Arc::clone(&pool);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    pool.get_or_fetch(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(vec!["ibis".to_string(), "newt".to_string()])
                    })
                    .await
                    .unwrap()
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
