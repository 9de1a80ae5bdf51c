/// Scan configuration: which file extensions count as audio and as images.
///
/// Extensions are stored lower-case with a leading dot (`".mp3"`). Matching
/// against file names is case-insensitive, so `Chapter 01.MP3` is audio.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default audio extensions.
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &[".mp3"];

/// Default image extensions, in cover-probe order.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Errors raised while loading or validating a [`ScanConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid extension: {0:?}")]
    InvalidExtension(String),
}

/// What a file is, as far as book scanning cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Audio,
    Image,
}

/// Extension sets consumed by the folder-tree builder and the matchers.
///
/// Fields are private so every instance goes through [`ScanConfig::new`],
/// [`ScanConfig::from_json_str`] or [`Default`], all of which normalise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Audio extensions, e.g. `[".mp3", ".m4b"]`.
    audio_extensions: Vec<String>,
    /// Image extensions, e.g. `[".jpg", ".png"]`. Order matters: single-file
    /// cover lookup tries them first to last.
    image_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            audio_extensions: DEFAULT_AUDIO_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    /// Build a config from explicit extension lists, normalising them.
    pub fn new<A, I>(audio: A, image: I) -> Result<Self, ConfigError>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            audio_extensions: audio.into_iter().map(|e| e.as_ref().to_string()).collect(),
            image_extensions: image.into_iter().map(|e| e.as_ref().to_string()).collect(),
        }
        .normalized()
    }

    /// Parse a JSON config document. Missing keys fall back to the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ScanConfig = serde_json::from_str(json)?;
        config.normalized()
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Lower-case every extension, add the leading dot where missing and
    /// drop duplicates. Blank entries are rejected.
    pub fn normalized(self) -> Result<Self, ConfigError> {
        Ok(Self {
            audio_extensions: normalize_set(self.audio_extensions)?,
            image_extensions: normalize_set(self.image_extensions)?,
        })
    }

    /// Normalised audio extensions.
    pub fn audio_extensions(&self) -> &[String] {
        &self.audio_extensions
    }

    /// Normalised image extensions, in cover-probe order.
    pub fn image_extensions(&self) -> &[String] {
        &self.image_extensions
    }

    /// Classify a file by its extension. Audio wins if an extension is
    /// configured in both sets.
    pub fn classify(&self, path: &Path) -> Option<FileKind> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        if contains_ext(&self.audio_extensions, &ext) {
            Some(FileKind::Audio)
        } else if contains_ext(&self.image_extensions, &ext) {
            Some(FileKind::Image)
        } else {
            None
        }
    }

    /// `true` if `path` has a configured audio extension.
    pub fn is_audio(&self, path: &Path) -> bool {
        self.classify(path) == Some(FileKind::Audio)
    }

    /// `true` if `path` has a configured image extension.
    pub fn is_image(&self, path: &Path) -> bool {
        self.classify(path) == Some(FileKind::Image)
    }
}

/// `ext` is lower-case and has no dot; configured entries are `.ext`.
fn contains_ext(set: &[String], ext: &str) -> bool {
    set.iter()
        .any(|configured| configured.strip_prefix('.') == Some(ext))
}

fn normalize_set(raw: Vec<String>) -> Result<Vec<String>, ConfigError> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for entry in raw {
        let trimmed = entry.trim();
        let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if bare.is_empty() || bare.contains(['.', '/', '\\']) || bare.contains(char::is_whitespace)
        {
            return Err(ConfigError::InvalidExtension(entry));
        }
        let normalized = format!(".{}", bare.to_lowercase());
        if !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    Ok(out)
}
