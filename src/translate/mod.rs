//! Module to handle the bot's translation functionality.

pub(crate) mod available_langs;
pub(crate) mod detection;
pub(crate) mod gateway;
pub(crate) mod translation;

pub(crate) use available_langs::{LanguageEntry, LanguageRegistry};
pub(crate) use gateway::{DetectionGateway, TranslationGateway};
