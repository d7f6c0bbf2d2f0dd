//! Google Translate wrapper. There is no key-based API in play here: the mobile page takes the
//! language pair and text as query parameters and renders the result into a single div.

use async_trait::async_trait;

use crate::translate::available_langs::backend_code;

#[derive(Debug, thiserror::Error)]
pub(crate) enum TranslationError {
    #[error("nothing to translate")]
    EmptyText,
    #[error("translation backend unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("translation backend rejected {source_lang} -> {target_lang} with status {status}")]
    Rejected {
        source_lang: String,
        target_lang: String,
        status: reqwest::StatusCode,
    },
    #[error("translation missing from backend response")]
    MissingResult,
}

/// Something that translates text between two known languages.
#[async_trait]
pub(crate) trait TranslationBackend: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}

fn client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(format!(
            "{} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}

/// Pulls the translated text out of the mobile page's HTML.
fn extract_translation(page: &str) -> Option<String> {
    let result = scraper::Selector::parse("div.result-container").ok()?;
    let html = scraper::Html::parse_document(page);
    let text: String = html.select(&result).next()?.text().collect();
    Some(text.trim().to_string())
}

#[derive(Debug, Clone)]
pub(crate) struct GoogleTranslate {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslate {
    pub(crate) fn new(base_url: &str) -> reqwest::Result<Self> {
        Ok(Self {
            client: client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyText);
        }

        let source = backend_code(source);
        let target = backend_code(target);
        let resp = self
            .client
            .get(format!("{}/m", self.base_url))
            .query(&[
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("hl", target.as_str()),
                ("q", text),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TranslationError::Rejected {
                source_lang: source,
                target_lang: target,
                status,
            });
        }

        let page = resp.text().await?;
        extract_translation(&page).ok_or(TranslationError::MissingResult)
    }
}
