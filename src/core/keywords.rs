use crate::services::PopularityCounter;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Join search terms into one phrase with single spaces between words
pub fn normalize_search_phrase<S: AsRef<str>>(terms: &[S]) -> String {
    terms
        .iter()
        .flat_map(|term| term.as_ref().split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Records normalized search phrases against an external popularity counter.
///
/// Recording runs as a detached task; failures are logged and dropped.
#[derive(Clone)]
pub struct KeywordPopularityRecorder {
    counter: Arc<dyn PopularityCounter>,
}

impl KeywordPopularityRecorder {
    pub fn new(counter: Arc<dyn PopularityCounter>) -> Self {
        Self { counter }
    }

    /// Spawn an increment for the normalized phrase.
    ///
    /// Returns `None` without touching the counter when the phrase is empty.
    /// Must be called from within a tokio runtime.
    pub fn record<S: AsRef<str>>(&self, terms: &[S]) -> Option<JoinHandle<()>> {
        let phrase = normalize_search_phrase(terms);
        if phrase.is_empty() {
            return None;
        }

        let counter = Arc::clone(&self.counter);
        Some(tokio::spawn(async move {
            match counter.increment(&phrase).await {
                Ok(()) => tracing::debug!("Recorded search phrase: {}", phrase),
                Err(e) => tracing::warn!("Failed to record search phrase '{}': {}", phrase, e),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StoreError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCounter {
        phrases: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl PopularityCounter for RecordingCounter {
        async fn increment(&self, phrase: &str) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Unavailable("counter down".to_string()));
            }
            self.phrases.lock().unwrap().push(phrase.to_string());
            Ok(())
        }

        async fn top(&self, _n: usize) -> Result<Vec<String>, StoreError> {
            Ok(self.phrases.lock().unwrap().clone())
        }
    }

    #[test]
    fn test_phrase_collapses_whitespace() {
        assert_eq!(
            normalize_search_phrase(&["  youth ", "rent\t\tsupport", "", "  "]),
            "youth rent support"
        );
    }

    #[test]
    fn test_empty_terms_give_empty_phrase() {
        let terms: [&str; 0] = [];
        assert_eq!(normalize_search_phrase(&terms), "");
        assert_eq!(normalize_search_phrase(&["   ", "\n"]), "");
    }

    #[tokio::test]
    async fn test_record_increments_counter() {
        let counter = Arc::new(RecordingCounter::default());
        let recorder = KeywordPopularityRecorder::new(counter.clone());

        let handle = recorder.record(&["job", " training "]).expect("phrase is non-empty");
        handle.await.unwrap();

        assert_eq!(*counter.phrases.lock().unwrap(), vec!["job training".to_string()]);
    }

    #[tokio::test]
    async fn test_record_skips_blank_phrase() {
        let counter = Arc::new(RecordingCounter::default());
        let recorder = KeywordPopularityRecorder::new(counter.clone());

        assert!(recorder.record(&["  "]).is_none());
        assert!(counter.phrases.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_failure_is_swallowed() {
        let counter = Arc::new(RecordingCounter {
            fail: true,
            ..Default::default()
        });
        let recorder = KeywordPopularityRecorder::new(counter);

        let handle = recorder.record(&["housing"]).expect("phrase is non-empty");

        assert!(handle.await.is_ok());
    }
}
