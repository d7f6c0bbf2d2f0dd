//! Slash commands. These only deal with Discord: parameters come in, the handler in
//! [`crate::handlers`] decides what to say, and the reply goes out privately to the invoker.

use anyhow::bail;

use crate::command_responder::{CommandResponder, Reply};
use crate::handlers::{self, OTHER_SENTINEL};
use crate::translate::LanguageRegistry;
use crate::utils::{Context, Error};

/// The `to_lang` menu: the common languages, sorted by name, plus a way into the long tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub(crate) enum TargetLanguage {
    #[name = "Arabic"]
    Arabic,
    #[name = "Chinese (Simplified)"]
    ChineseSimplified,
    #[name = "Chinese (Traditional)"]
    ChineseTraditional,
    #[name = "Dutch"]
    Dutch,
    #[name = "English"]
    English,
    #[name = "French"]
    French,
    #[name = "German"]
    German,
    #[name = "Greek"]
    Greek,
    #[name = "Hindi"]
    Hindi,
    #[name = "Indonesian"]
    Indonesian,
    #[name = "Italian"]
    Italian,
    #[name = "Japanese"]
    Japanese,
    #[name = "Korean"]
    Korean,
    #[name = "Polish"]
    Polish,
    #[name = "Portuguese"]
    Portuguese,
    #[name = "Russian"]
    Russian,
    #[name = "Spanish"]
    Spanish,
    #[name = "Swedish"]
    Swedish,
    #[name = "Thai"]
    Thai,
    #[name = "Turkish"]
    Turkish,
    #[name = "Ukrainian"]
    Ukrainian,
    #[name = "Vietnamese"]
    Vietnamese,
    #[name = "📚 Other Languages..."]
    Other,
}

impl TargetLanguage {
    /// Every menu entry that names a language.
    pub(crate) const LANGUAGES: [TargetLanguage; 22] = [
        TargetLanguage::Arabic,
        TargetLanguage::ChineseSimplified,
        TargetLanguage::ChineseTraditional,
        TargetLanguage::Dutch,
        TargetLanguage::English,
        TargetLanguage::French,
        TargetLanguage::German,
        TargetLanguage::Greek,
        TargetLanguage::Hindi,
        TargetLanguage::Indonesian,
        TargetLanguage::Italian,
        TargetLanguage::Japanese,
        TargetLanguage::Korean,
        TargetLanguage::Polish,
        TargetLanguage::Portuguese,
        TargetLanguage::Russian,
        TargetLanguage::Spanish,
        TargetLanguage::Swedish,
        TargetLanguage::Thai,
        TargetLanguage::Turkish,
        TargetLanguage::Ukrainian,
        TargetLanguage::Vietnamese,
    ];

    /// The language table code for this choice, or the "other" sentinel.
    pub(crate) fn code(self) -> &'static str {
        match self {
            TargetLanguage::Arabic => "ar",
            TargetLanguage::ChineseSimplified => "zh-cn",
            TargetLanguage::ChineseTraditional => "zh-tw",
            TargetLanguage::Dutch => "nl",
            TargetLanguage::English => "en",
            TargetLanguage::French => "fr",
            TargetLanguage::German => "de",
            TargetLanguage::Greek => "el",
            TargetLanguage::Hindi => "hi",
            TargetLanguage::Indonesian => "id",
            TargetLanguage::Italian => "it",
            TargetLanguage::Japanese => "ja",
            TargetLanguage::Korean => "ko",
            TargetLanguage::Polish => "pl",
            TargetLanguage::Portuguese => "pt",
            TargetLanguage::Russian => "ru",
            TargetLanguage::Spanish => "es",
            TargetLanguage::Swedish => "sv",
            TargetLanguage::Thai => "th",
            TargetLanguage::Turkish => "tr",
            TargetLanguage::Ukrainian => "uk",
            TargetLanguage::Vietnamese => "vi",
            TargetLanguage::Other => OTHER_SENTINEL,
        }
    }

    /// Checks that the menu and the registry's common languages are the same set, since the menu
    /// has to be fixed at compile time but the table is loaded at startup.
    pub(crate) fn check_against(registry: &LanguageRegistry) -> anyhow::Result<()> {
        let common = registry.list_common();
        for choice in Self::LANGUAGES {
            if !common.iter().any(|entry| entry.code == choice.code()) {
                bail!(
                    "menu language {} is not a common language in the table",
                    choice.code()
                );
            }
        }
        if common.len() != Self::LANGUAGES.len() {
            bail!(
                "the table has {} common languages but the menu has {}",
                common.len(),
                Self::LANGUAGES.len()
            );
        }
        Ok(())
    }
}

async fn send_private(ctx: Context<'_>, reply: Reply) -> Result<(), Error> {
    ctx.send(|b| reply.response(b).ephemeral(true)).await?;
    Ok(())
}

/// Suggests "other" languages matching what's been typed so far.
async fn autocomplete_other_lang(
    ctx: Context<'_>,
    partial: &str,
) -> Vec<poise::AutocompleteChoice<String>> {
    ctx.data()
        .registry
        .suggest_other(partial)
        .into_iter()
        .map(|entry| poise::AutocompleteChoice {
            name: entry.display_name.clone(),
            value: entry.code.clone(),
        })
        .collect()
}

/// Translate text to another language
#[poise::command(slash_command)]
pub(crate) async fn translate(
    ctx: Context<'_>,
    #[description = "Select a common language or choose 'Other Languages'"] to_lang: TargetLanguage,
    #[description = "The text to translate"] text: String,
    #[description = "If you selected 'Other Languages', choose a language from here"]
    #[autocomplete = "autocomplete_other_lang"]
    other_lang: Option<String>,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;
    let reply = handlers::translate(ctx.data(), to_lang.code(), other_lang.as_deref(), &text).await;
    send_private(ctx, reply).await
}

/// Detect language and translate to selected language
#[poise::command(slash_command)]
pub(crate) async fn detecttranslate(
    ctx: Context<'_>,
    #[description = "Select a common language or choose 'Other Languages'"] to_lang: TargetLanguage,
    #[description = "The text to detect and translate"] text: String,
    #[description = "If you selected 'Other Languages', choose a language from here"]
    #[autocomplete = "autocomplete_other_lang"]
    other_lang: Option<String>,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;
    let reply =
        handlers::detect_translate(ctx.data(), to_lang.code(), other_lang.as_deref(), &text).await;
    send_private(ctx, reply).await
}

/// Detect the language of the given text
#[poise::command(slash_command)]
pub(crate) async fn detect(
    ctx: Context<'_>,
    #[description = "The text to analyze"] text: String,
) -> Result<(), Error> {
    let reply = handlers::detect(ctx.data(), &text).await;
    send_private(ctx, reply).await
}

/// List all available languages
#[poise::command(slash_command)]
pub(crate) async fn languages(ctx: Context<'_>) -> Result<(), Error> {
    send_private(ctx, handlers::languages(&ctx.data().registry)).await
}
