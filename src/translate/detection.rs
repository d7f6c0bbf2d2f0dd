//! Language detection. Discord messages are full of links and custom emoji that confuse the
//! statistical model, so those get stripped before anything is classified.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use regex::{Regex, RegexBuilder};

const URL_PATTERN: &str =
    r#"((https?|ftp|smtp):\/\/)?(www.)?[a-z0-9]+\.[a-z]+(\/[a-zA-Z0-9#?=]+\/?)*"#;

const EMOJI_PATTERN: &str = r#"<a?:\w+:\d+>"#;

static URL_RE: OnceLock<Regex> = OnceLock::new();
static EMOJI_RE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub(crate) enum DetectionError {
    /// Nothing left to classify once links and emoji are gone.
    #[error("text has no linguistic content to classify")]
    NoSignal,
    #[error("no language could be detected with enough confidence")]
    Unclassifiable,
    #[error("detection backend unavailable: {0}")]
    Unavailable(String),
}

/// Something that can name the language of a piece of text, as a language table code.
#[async_trait]
pub(crate) trait Detector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<String, DetectionError>;
}

/// Filters out URLs and emojis from text to make it easier to detect language.
fn filter_for_language_detection(msg: &str) -> String {
    let url_re = URL_RE.get_or_init(|| {
        RegexBuilder::new(URL_PATTERN)
            .case_insensitive(true)
            .build()
            .unwrap()
    });

    let emoji_re = EMOJI_RE.get_or_init(|| {
        RegexBuilder::new(EMOJI_PATTERN)
            .case_insensitive(true)
            .build()
            .unwrap()
    });

    emoji_re
        .replace_all(&url_re.replace_all(msg, ""), "")
        .to_string()
}

/// Maps a lingua language to the code the language table uses for it.
fn table_code(lang: Language) -> String {
    let iso = lang.iso_code_639_1().to_string().to_ascii_lowercase();
    match iso.as_str() {
        // lingua only knows one Chinese; the table splits by script
        "zh" => "zh-cn".to_string(),
        "nb" | "nn" => "no".to_string(),
        _ => iso,
    }
}

/// Detector backed by lingua's statistical models. Building one is expensive, so it is built once
/// and shared.
#[derive(Clone)]
pub(crate) struct LinguaDetector {
    detector: Arc<LanguageDetector>,
}

impl LinguaDetector {
    pub(crate) fn new(min_relative_distance: f64) -> Self {
        let detector = LanguageDetectorBuilder::from_all_languages()
            .with_minimum_relative_distance(min_relative_distance)
            .build();
        Self {
            detector: Arc::new(detector),
        }
    }
}

#[async_trait]
impl Detector for LinguaDetector {
    async fn detect(&self, text: &str) -> Result<String, DetectionError> {
        let filtered = filter_for_language_detection(text);
        if !filtered.chars().any(char::is_alphabetic) {
            return Err(DetectionError::NoSignal);
        }

        // model lookups are CPU-bound: keep them off the async workers
        let detector = Arc::clone(&self.detector);
        let detected = tokio::task::spawn_blocking(move || detector.detect_language_of(filtered))
            .await
            .map_err(|e| DetectionError::Unavailable(e.to_string()))?;

        detected.map(table_code).ok_or(DetectionError::Unclassifiable)
    }
}
