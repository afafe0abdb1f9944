use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::OracleError;
use crate::text::{normalize_token, normalize_words};
use crate::{OracleVerdict, PronunciationOracle};

pub const DEFAULT_CACHE_CAPACITY: usize = 512;

type CacheKey = (String, String);

#[derive(Default)]
struct CacheState {
    verdicts: HashMap<CacheKey, OracleVerdict>,
    insertion_order: VecDeque<CacheKey>,
}

/// Bounded verdict cache in front of another oracle.
///
/// Keys are the normalized target and the normalized attempt, so repeated
/// grading of the same utterance skips the inner call. Only successful
/// verdicts are stored. Once `capacity` entries exist the oldest insertion
/// is evicted first.
pub struct CachedOracle<O> {
    inner: O,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl<O: PronunciationOracle> CachedOracle<O> {
    pub fn new(inner: O) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: O, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.verdicts.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.verdicts.clear();
            state.insertion_order.clear();
        }
    }

    fn lookup(&self, key: &CacheKey) -> Option<OracleVerdict> {
        self.state.lock().ok()?.verdicts.get(key).cloned()
    }

    fn store(&self, key: CacheKey, verdict: OracleVerdict) {
        if self.capacity == 0 {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if state.verdicts.contains_key(&key) {
            return;
        }
        while state.verdicts.len() >= self.capacity {
            match state.insertion_order.pop_front() {
                Some(oldest) => {
                    state.verdicts.remove(&oldest);
                }
                None => break,
            }
        }
        state.insertion_order.push_back(key.clone());
        state.verdicts.insert(key, verdict);
    }
}

#[async_trait]
impl<O: PronunciationOracle> PronunciationOracle for CachedOracle<O> {
    async fn evaluate(&self, target: &str, attempt: &str) -> Result<OracleVerdict, OracleError> {
        let key = (normalize_token(target), normalize_words(attempt).join(" "));
        if let Some(verdict) = self.lookup(&key) {
            log::debug!("Cache hit for {target:?}");
            return Ok(verdict);
        }

        let verdict = self.inner.evaluate(target, attempt).await?;
        self.store(key, verdict.clone());
        Ok(verdict)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingOracle {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl PronunciationOracle for CountingOracle {
        async fn evaluate(&self, _target: &str, _attempt: &str) -> Result<OracleVerdict, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(OracleError::Unavailable("offline".to_string()));
            }
            Ok(OracleVerdict::correct())
        }
    }

    #[tokio::test]
    async fn repeated_requests_hit_the_cache() {
        let oracle = CachedOracle::new(CountingOracle::default());
        oracle.evaluate("Cat", "the cat").await.expect("verdict");
        oracle.evaluate("cat", "The cat!").await.expect("verdict");

        assert_eq!(oracle.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(oracle.len(), 1);
    }

    #[tokio::test]
    async fn evicts_oldest_entry_at_capacity() {
        let oracle = CachedOracle::with_capacity(CountingOracle::default(), 2);
        for word in ["one", "two", "three"] {
            oracle.evaluate(word, word).await.expect("verdict");
        }
        assert_eq!(oracle.len(), 2);

        // "one" was evicted, "three" is still cached
        oracle.evaluate("one", "one").await.expect("verdict");
        oracle.evaluate("three", "three").await.expect("verdict");
        assert_eq!(oracle.inner().calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let oracle = CachedOracle::new(CountingOracle {
            fail: true,
            ..Default::default()
        });
        assert!(oracle.evaluate("cat", "cat").await.is_err());
        assert!(oracle.evaluate("cat", "cat").await.is_err());
        assert!(oracle.is_empty());
        assert_eq!(oracle.inner().calls.load(Ordering::SeqCst), 2);
    }
}
