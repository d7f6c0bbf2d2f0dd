//! The logic behind each slash command, kept free of Discord types so it can be run against fake
//! backends. Every handler produces a [`Reply`]: backend failures are logged here and turned into a
//! generic message, so no backend detail ever reaches the user.

use serenity::utils::Colour;
use tracing::{info, warn};

use crate::command_responder::{EmbedReply, Reply};
use crate::config::OTHER_LANGUAGES_PER_PAGE;
use crate::translate::available_langs::backend_code;
use crate::translate::{DetectionGateway, LanguageEntry, LanguageRegistry, TranslationGateway};

/// Value of the `to_lang` choice that defers to `other_lang`.
pub(crate) const OTHER_SENTINEL: &str = "other";

pub(crate) const TRANSLATE_FAILED: &str = "An error occurred during translation. Please try again.";
pub(crate) const DETECT_TRANSLATE_FAILED: &str =
    "An error occurred while detecting and translating. Please try again.";
pub(crate) const DETECT_FAILED: &str =
    "An error occurred while detecting the language. Please try again.";

/// Shared, read-only state handed to every command.
pub(crate) struct Data {
    pub registry: LanguageRegistry,
    pub detection: DetectionGateway,
    pub translation: TranslationGateway,
}

/// Problems with what the user asked for, as opposed to backend failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ValidationError {
    #[error("Please select a language from the 'other_lang' dropdown when choosing 'Other Languages'.")]
    MissingOtherLanguage,
    #[error("I don't know a language called '{0}'. Pick one from the 'other_lang' suggestions.")]
    UnknownLanguage(String),
}

/// The language a translation should end up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    /// Code as it appears in the language table, for display.
    pub code: String,
    /// Code as the translation backend wants it.
    pub backend_code: String,
}

/// Works out the target language from the two menu selections.
pub(crate) fn resolve_target(
    registry: &LanguageRegistry,
    to_lang: &str,
    other_lang: Option<&str>,
) -> Result<Target, ValidationError> {
    let selected = if to_lang == OTHER_SENTINEL {
        other_lang
            .filter(|lang| !lang.trim().is_empty())
            .ok_or(ValidationError::MissingOtherLanguage)?
    } else {
        to_lang
    };

    let code = registry
        .resolve(selected)
        .ok_or_else(|| ValidationError::UnknownLanguage(selected.to_string()))?;

    Ok(Target {
        code: code.to_string(),
        backend_code: backend_code(code),
    })
}

/// `/translate`: detects the source language and translates into the selected one.
pub(crate) async fn translate(
    data: &Data,
    to_lang: &str,
    other_lang: Option<&str>,
    text: &str,
) -> Reply {
    let target = match resolve_target(&data.registry, to_lang, other_lang) {
        Ok(target) => target,
        Err(e) => return Reply::text(e),
    };

    match data.translation.translate(text, &target.backend_code).await {
        Ok(result) => {
            info!("translated {} -> {}", result.source_code, target.code);
            EmbedReply::new(Colour::BLUE)
                .field(
                    format!("From {}", data.registry.display_name(&result.source_code)),
                    text,
                    false,
                )
                .field(
                    format!("To {}", data.registry.display_name(&target.code)),
                    &result.translated_text,
                    false,
                )
                .into()
        }
        Err(e) => {
            warn!("translation into {} failed: {}", target.code, e);
            Reply::text(TRANSLATE_FAILED)
        }
    }
}

/// `/detecttranslate`: reports the detected language alongside the translation. Detection runs
/// once and its answer is reused as the translation's source language.
pub(crate) async fn detect_translate(
    data: &Data,
    to_lang: &str,
    other_lang: Option<&str>,
    text: &str,
) -> Reply {
    let target = match resolve_target(&data.registry, to_lang, other_lang) {
        Ok(target) => target,
        Err(e) => return Reply::text(e),
    };

    let result = match data.detection.detect(text).await {
        Ok(detected) => {
            data.translation
                .translate_from(text, detected, &target.backend_code)
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(result) => EmbedReply::new(Colour::PURPLE)
            .field("Language", &labelled(&data.registry, &result.source_code), false)
            .field("Original", text, false)
            .field("Translation", &result.translated_text, false)
            .into(),
        Err(e) => {
            warn!("detect-and-translate into {} failed: {}", target.code, e);
            Reply::text(DETECT_TRANSLATE_FAILED)
        }
    }
}

/// `/detect`: names the language of the text.
pub(crate) async fn detect(data: &Data, text: &str) -> Reply {
    match data.detection.detect(text).await {
        Ok(code) => EmbedReply::new(Colour::PURPLE)
            .field("Text", text, false)
            .field("Language", &labelled(&data.registry, &code), false)
            .into(),
        Err(e) => {
            warn!("detection failed: {}", e);
            Reply::text(DETECT_FAILED)
        }
    }
}

/// `/languages`: lists everything in the registry. The long tail is split into fields of
/// [`OTHER_LANGUAGES_PER_PAGE`] entries to stay under Discord's field size.
pub(crate) fn languages(registry: &LanguageRegistry) -> Reply {
    let mut embed = EmbedReply::new(Colour::DARK_GREEN)
        .title("Available Languages")
        .description(
            "Use /translate or /detecttranslate commands with these options:\n\n\
             1. Select from Common Languages in the first dropdown\n\
             2. Or choose '📚 Other Languages...' and use the second dropdown",
        )
        .field("Common Languages", &bullets(registry.list_common()), false);

    for (i, chunk) in registry
        .list_other()
        .chunks(OTHER_LANGUAGES_PER_PAGE)
        .enumerate()
    {
        embed = embed.field(
            format!("Other Languages - Part {}", i + 1),
            &bullets(chunk),
            true,
        );
    }

    embed.into()
}

fn labelled(registry: &LanguageRegistry, code: &str) -> String {
    match registry.lookup_by_code(code) {
        Some(entry) => entry.labelled(),
        None => format!("Unknown ({})", code),
    }
}

fn bullets(entries: &[LanguageEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("• {}", entry.labelled()))
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::detection::{DetectionError, Detector};
    use crate::translate::translation::{TranslationBackend, TranslationError};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Detector that answers with a fixed code (or fails) and counts its calls.
    struct FakeDetector {
        answer: Option<&'static str>,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl Detector for FakeDetector {
        async fn detect(&self, _text: &str) -> Result<String, DetectionError> {
            *self.calls.lock().unwrap() += 1;
            self.answer
                .map(str::to_string)
                .ok_or_else(|| DetectionError::Unavailable("connection refused".to_string()))
        }
    }

    /// Backend that records every (source, target) pair it is asked for.
    struct FakeBackend {
        answer: Option<&'static str>,
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl TranslationBackend for FakeBackend {
        async fn translate(
            &self,
            _text: &str,
            source: &str,
            target: &str,
        ) -> Result<String, TranslationError> {
            self.calls
                .lock()
                .unwrap()
                .push((source.to_string(), target.to_string()));
            self.answer
                .map(str::to_string)
                .ok_or(TranslationError::MissingResult)
        }
    }

    struct Harness {
        data: Data,
        detector: Arc<FakeDetector>,
        backend: Arc<FakeBackend>,
    }

    impl Harness {
        fn new(detected: Option<&'static str>, translated: Option<&'static str>) -> Self {
            let detector = Arc::new(FakeDetector {
                answer: detected,
                calls: Mutex::new(0),
            });
            let backend = Arc::new(FakeBackend {
                answer: translated,
                calls: Mutex::new(vec![]),
            });
            let limit = Duration::from_secs(5);
            let detection = DetectionGateway::new(detector.clone(), limit);
            let translation = TranslationGateway::new(detection.clone(), backend.clone(), limit);
            Self {
                data: Data {
                    registry: LanguageRegistry::bundled().unwrap(),
                    detection,
                    translation,
                },
                detector,
                backend,
            }
        }

        fn detections(&self) -> usize {
            *self.detector.calls.lock().unwrap()
        }

        fn translations(&self) -> Vec<(String, String)> {
            self.backend.calls.lock().unwrap().clone()
        }
    }

    #[test]
    fn test_resolve_target() {
        let reg = LanguageRegistry::bundled().unwrap();
        assert_eq!(
            resolve_target(&reg, "es", None).unwrap(),
            Target {
                code: "es".to_string(),
                backend_code: "es".to_string()
            }
        );
        // other_lang is ignored unless "other" was picked
        assert_eq!(resolve_target(&reg, "es", Some("fy")).unwrap().code, "es");
        assert_eq!(resolve_target(&reg, "other", Some("Frisian")).unwrap().code, "fy");
        assert_eq!(
            resolve_target(&reg, "other", None),
            Err(ValidationError::MissingOtherLanguage)
        );
        assert_eq!(
            resolve_target(&reg, "other", Some("")),
            Err(ValidationError::MissingOtherLanguage)
        );
        assert_eq!(
            resolve_target(&reg, "other", Some("Klingon")),
            Err(ValidationError::UnknownLanguage("Klingon".to_string()))
        );

        let zh = resolve_target(&reg, "zh-cn", None).unwrap();
        assert_eq!(zh.code, "zh-cn");
        assert_eq!(zh.backend_code, "zh-CN");
    }

    #[tokio::test]
    async fn test_translate() {
        let h = Harness::new(Some("en"), Some("Hola"));
        let reply = translate(&h.data, "es", None, "Hello").await;
        let embed = reply.as_embed().unwrap();
        assert_eq!(embed.value_of("From English"), Some("Hello"));
        assert_eq!(embed.value_of("To Spanish"), Some("Hola"));
        assert_eq!(
            h.translations(),
            vec![("en".to_string(), "es".to_string())]
        );
    }

    #[tokio::test]
    async fn test_translate_missing_other() {
        let h = Harness::new(Some("en"), Some("Hola"));
        let reply = translate(&h.data, "other", None, "Hello").await;
        assert_eq!(
            reply,
            Reply::text(ValidationError::MissingOtherLanguage)
        );
        assert_eq!(h.detections(), 0);
        assert!(h.translations().is_empty());
    }

    #[tokio::test]
    async fn test_translate_chinese_target() {
        let h = Harness::new(Some("en"), Some("你好"));
        let reply = translate(&h.data, "zh-cn", None, "Hello").await;
        assert_eq!(
            h.translations(),
            vec![("en".to_string(), "zh-CN".to_string())]
        );
        assert_eq!(
            reply.as_embed().unwrap().value_of("To Chinese (Simplified)"),
            Some("你好")
        );
    }

    #[tokio::test]
    async fn test_translate_other_by_name() {
        let h = Harness::new(Some("en"), Some("Hallo"));
        let reply = translate(&h.data, "other", Some("frisian"), "Hello").await;
        assert!(reply.as_embed().unwrap().value_of("To Frisian").is_some());
    }

    #[tokio::test]
    async fn test_translate_backend_failure_is_generic() {
        let h = Harness::new(Some("en"), None);
        assert_eq!(
            translate(&h.data, "es", None, "Hello").await,
            Reply::text(TRANSLATE_FAILED)
        );

        let h = Harness::new(None, Some("Hola"));
        assert_eq!(
            translate(&h.data, "es", None, "Hello").await,
            Reply::text(TRANSLATE_FAILED)
        );
        assert!(h.translations().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_source_language() {
        let h = Harness::new(Some("tn"), Some("Hola"));
        let reply = translate(&h.data, "es", None, "Dumela").await;
        assert!(reply.as_embed().unwrap().value_of("From Unknown").is_some());
    }

    #[tokio::test]
    async fn test_detect_translate_detects_once() {
        let h = Harness::new(Some("fr"), Some("Hello"));
        let reply = detect_translate(&h.data, "en", None, "Bonjour").await;
        let embed = reply.as_embed().unwrap();
        assert_eq!(embed.value_of("Language"), Some("French (fr)"));
        assert_eq!(embed.value_of("Original"), Some("Bonjour"));
        assert_eq!(embed.value_of("Translation"), Some("Hello"));
        assert_eq!(h.detections(), 1);
        assert_eq!(
            h.translations(),
            vec![("fr".to_string(), "en".to_string())]
        );
    }

    #[tokio::test]
    async fn test_detect_translate_validation() {
        let h = Harness::new(Some("fr"), Some("Hello"));
        assert_eq!(
            detect_translate(&h.data, "other", None, "Bonjour").await,
            Reply::text(ValidationError::MissingOtherLanguage)
        );
        assert_eq!(h.detections(), 0);
    }

    #[tokio::test]
    async fn test_detect_translate_failure() {
        let h = Harness::new(Some("fr"), None);
        assert_eq!(
            detect_translate(&h.data, "en", None, "Bonjour").await,
            Reply::text(DETECT_TRANSLATE_FAILED)
        );
    }

    #[tokio::test]
    async fn test_detect() {
        let h = Harness::new(Some("de"), None);
        let reply = detect(&h.data, "Guten Tag").await;
        let embed = reply.as_embed().unwrap();
        assert_eq!(embed.value_of("Text"), Some("Guten Tag"));
        assert_eq!(embed.value_of("Language"), Some("German (de)"));
        assert!(h.translations().is_empty());
    }

    #[tokio::test]
    async fn test_detect_unreachable_is_generic() {
        let h = Harness::new(None, None);
        let reply = detect(&h.data, "Guten Tag").await;
        assert_eq!(reply, Reply::text(DETECT_FAILED));
        if let Reply::Text(msg) = reply {
            assert!(!msg.contains("connection refused"));
        }
    }

    #[tokio::test]
    async fn test_detect_unknown_code() {
        let h = Harness::new(Some("tn"), None);
        let reply = detect(&h.data, "Dumela").await;
        assert_eq!(
            reply.as_embed().unwrap().value_of("Language"),
            Some("Unknown (tn)")
        );
    }

    #[test]
    fn test_languages() {
        let reg = LanguageRegistry::bundled().unwrap();
        let reply = languages(&reg);
        let embed = reply.as_embed().unwrap();
        assert_eq!(embed.title.as_deref(), Some("Available Languages"));

        let common = embed.value_of("Common Languages").unwrap();
        assert_eq!(common.lines().count(), reg.list_common().len());
        assert!(common.contains("• English (en)"));

        let pages: Vec<_> = embed
            .fields
            .iter()
            .filter(|f| f.name.starts_with("Other Languages - Part "))
            .collect();
        let expected_pages = (reg.list_other().len() + OTHER_LANGUAGES_PER_PAGE - 1)
            / OTHER_LANGUAGES_PER_PAGE;
        assert_eq!(pages.len(), expected_pages);
        assert!(pages.iter().all(|p| p.inline));
        assert!(pages
            .iter()
            .all(|p| p.value.lines().count() <= OTHER_LANGUAGES_PER_PAGE));
        assert_eq!(
            pages.iter().map(|p| p.value.lines().count()).sum::<usize>(),
            reg.list_other().len()
        );
        assert!(pages[0].value.starts_with("• Afrikaans (af)"));
    }
}
