//! Review data sources.
//!
//! A provider turns `(offset, limit)` into the raw bytes of one page envelope.
//! Providers are blocking and run on the fetch worker thread, never on the
//! context that owns the list.

use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::error::LoadError;
use crate::types::ReviewsEnvelope;

/// Source of review pages.
pub trait ReviewsProvider: Send + 'static {
    /// Fetches the page covering `[offset, offset + limit)`.
    ///
    /// # Errors
    ///
    /// `LoadError::SourceUnavailable` when the source cannot be located,
    /// `LoadError::MalformedPayload` when its data cannot be read.
    fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<u8>, LoadError>;
}

impl<F> ReviewsProvider for F
where
    F: Fn(usize, usize) -> Result<Vec<u8>, LoadError> + Send + 'static,
{
    fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<u8>, LoadError> {
        self(offset, limit)
    }
}

/// Serves pages out of a JSON file holding every review in one envelope.
///
/// Each call re-reads the file, sleeps a random latency to stand in for the
/// network, then re-encodes the requested slice with the file's total `count`.
#[derive(Debug, Clone)]
pub struct BundleProvider {
    path: PathBuf,
    latency_ms: Option<RangeInclusive<u64>>,
}

impl BundleProvider {
    /// Default simulated latency, in milliseconds.
    pub const DEFAULT_LATENCY_MS: RangeInclusive<u64> = 100..=1_000;

    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), latency_ms: Some(Self::DEFAULT_LATENCY_MS) }
    }

    /// Replaces the simulated latency range; `min > max` is swapped.
    pub fn with_latency_ms(mut self, min: u64, max: u64) -> Self {
        self.latency_ms = Some(min.min(max)..=min.max(max));
        self
    }

    pub fn without_latency(mut self) -> Self {
        self.latency_ms = None;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn simulate_latency(&self) {
        if let Some(range) = &self.latency_ms {
            let ms = rand::thread_rng().gen_range(range.clone());
            thread::sleep(Duration::from_millis(ms));
        }
    }
}

impl ReviewsProvider for BundleProvider {
    fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<u8>, LoadError> {
        self.simulate_latency();

        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "review bundle not found");
                return Err(LoadError::SourceUnavailable);
            }
            Err(e) => return Err(LoadError::malformed(e)),
        };
        let bundle = ReviewsEnvelope::decode(&raw)?;
        let page = ReviewsEnvelope {
            items: bundle.items.into_iter().skip(offset).take(limit).collect(),
            count: bundle.count,
        };
        Ok(serde_json::to_vec(&page)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn bundle_file(records: usize) -> tempfile::NamedTempFile {
        let items: Vec<String> = (0..records)
            .map(|i| {
                format!(
                    r#"{{"text":"r{i}","created":"d","first_name":"F","last_name":"L","rating":5}}"#
                )
            })
            .collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"items":[{}],"count":{records}}}"#, items.join(",")).unwrap();
        file
    }

    #[test]
    fn serves_slices_with_full_count() {
        let file = bundle_file(7);
        let provider = BundleProvider::new(file.path()).without_latency();

        let page = ReviewsEnvelope::decode(&provider.fetch_page(0, 5).unwrap()).unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.count, 7);
        assert_eq!(page.items[0].text, "r0");

        let page = ReviewsEnvelope::decode(&provider.fetch_page(5, 5).unwrap()).unwrap();
        let texts: Vec<&str> = page.items.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["r5", "r6"]);

        let page = ReviewsEnvelope::decode(&provider.fetch_page(10, 5).unwrap()).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn missing_bundle_is_source_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let provider = BundleProvider::new(dir.path().join("absent.json")).without_latency();
        assert!(matches!(provider.fetch_page(0, 20), Err(LoadError::SourceUnavailable)));
    }

    #[test]
    fn garbage_bundle_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<html>").unwrap();
        let provider = BundleProvider::new(file.path()).without_latency();
        assert!(matches!(provider.fetch_page(0, 20), Err(LoadError::MalformedPayload(_))));
    }

    #[test]
    fn closures_are_providers() {
        let provider = |offset: usize, limit: usize| -> Result<Vec<u8>, LoadError> {
            Ok(format!("{offset}:{limit}").into_bytes())
        };
        assert_eq!(provider.fetch_page(40, 20).unwrap(), b"40:20");
    }

    #[test]
    fn latency_range_is_normalised() {
        let provider = BundleProvider::new("x.json").with_latency_ms(50, 10);
        assert_eq!(provider.latency_ms, Some(10..=50));
    }
}
