//! Test fixture utilities for scratch directories and parameter files.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding parameter files and generated tones.
pub struct ToneFixture {
    pub root: TempDir,
}

impl ToneFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of a file inside the fixture.
    pub fn join(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Write a four-line text parameter file.
    ///
    /// `output` is a file name; the absolute path inside the fixture is
    /// written to the first line.
    pub fn add_text_params(
        &self,
        name: &str,
        output: &str,
        sample_rate: i64,
        frequency: i64,
        duration: i64,
    ) -> PathBuf {
        let content = format!(
            "{}\n{}\n{}\n{}\n",
            self.join(output).display(),
            sample_rate,
            frequency,
            duration
        );
        self.add_raw(name, &content)
    }

    /// Write a JSON parameter file.
    pub fn add_json_params(
        &self,
        name: &str,
        output: &str,
        sample_rate: i64,
        frequency: i64,
        duration: i64,
        policy: Option<&str>,
    ) -> PathBuf {
        let mut doc = serde_json::json!({
            "output": self.join(output).display().to_string(),
            "sample_rate_hz": sample_rate,
            "tone_frequency_hz": frequency,
            "duration_seconds": duration,
        });
        if let Some(policy) = policy {
            doc["policy"] = serde_json::json!(policy);
        }
        let content = serde_json::to_string_pretty(&doc).expect("Failed to serialize params");
        self.add_raw(name, &content)
    }

    /// Write arbitrary content to a file in the fixture.
    pub fn add_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Names of all entries in the fixture directory, sorted.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .expect("Failed to list fixture")
            .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Default for ToneFixture {
    fn default() -> Self {
        Self::new()
    }
}
