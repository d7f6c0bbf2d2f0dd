mod command_responder;
mod commands;
mod config;
mod handlers;
mod translate;
mod utils;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::Data;
use crate::translate::detection::LinguaDetector;
use crate::translate::translation::GoogleTranslate;
use crate::translate::{DetectionGateway, LanguageRegistry, TranslationGateway};
use crate::utils::{log_err, Error};

const DEFAULT_LOG_FILTER: &str = "lang_trans_bot=info";

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error)
        }
        poise::FrameworkError::Command { error, ctx } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error)
        }
        other => log_err(poise::builtins::on_error(other).await),
    }
}

/// Builds everything the commands share. Fails if the language table can't be loaded or doesn't
/// match the `to_lang` menu.
fn build_data(config: &Config) -> Result<Data> {
    let registry = LanguageRegistry::load(config.languages_file.as_deref())
        .context("Could not load language table")?;
    commands::TargetLanguage::check_against(&registry)?;
    info!(
        "Loaded {} common and {} other languages",
        registry.list_common().len(),
        registry.list_other().len()
    );

    let detection = DetectionGateway::new(
        Arc::new(LinguaDetector::new(config.detection_min_distance)),
        config.gateway_timeout,
    );
    let backend = GoogleTranslate::new(&config.translate_url)
        .context("Could not build translation client")?;
    let translation =
        TranslationGateway::new(detection.clone(), Arc::new(backend), config.gateway_timeout);

    Ok(Data {
        registry,
        detection,
        translation,
    })
}

/// Log filter from `RUST_LOG`, falling back to info for this crate when it's unset or invalid.
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .init();

    let config = Config::from_env()?;
    let data = build_data(&config)?;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::translate(),
                commands::detecttranslate(),
                commands::detect(),
                commands::languages(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .token(config.discord_token.clone())
        .intents(serenity::GatewayIntents::non_privileged())
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("{} is connected!", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(
                    "Registered {} commands",
                    framework.options().commands.len()
                );
                Ok(data)
            })
        });

    framework.run().await.context("Client error")?;
    Ok(())
}
