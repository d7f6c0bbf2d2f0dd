//! This module defines the languages the bot can translate into and from. Discord only supports 25
//! options in a choice list, so the table is split into a small "common" subset that goes in the
//! `to_lang` menu and everything else, which is reachable through autocomplete.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::config::MAX_AUTOCOMPLETE_CHOICES;

/// The language table bundled with the bot.
const BUNDLED_TABLE: &str = include_str!("../../languages.toml");

/// A language the backend understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct LanguageEntry {
    /// The backend's code, e.g. `en` or `zh-cn`.
    pub code: String,
    /// Human-readable English name.
    pub display_name: String,
}

impl LanguageEntry {
    fn new(code: &str, display_name: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
        }
    }

    /// Formats the entry as `Name (code)`.
    pub(crate) fn labelled(&self) -> String {
        format!("{} ({})", self.display_name, self.code)
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RegistryError {
    #[error("could not read language table {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed language table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("common language `{0}` is not in the language table")]
    UnknownCommon(String),
}

/// On-disk shape of the language table.
#[derive(Debug, Deserialize)]
struct LanguageTable {
    common: Vec<String>,
    languages: BTreeMap<String, String>,
}

/// Every known language, split into two disjoint lists that are each sorted by display name.
#[derive(Debug, Clone)]
pub(crate) struct LanguageRegistry {
    common: Vec<LanguageEntry>,
    other: Vec<LanguageEntry>,
}

impl LanguageRegistry {
    /// Builds a registry from `(code, name)` pairs, putting the codes in `common` in the common
    /// subset. Codes in `common` that aren't in `languages` are an error.
    pub(crate) fn new<'a>(
        languages: impl IntoIterator<Item = (&'a str, &'a str)>,
        common: &[&str],
    ) -> Result<Self, RegistryError> {
        let common_codes: BTreeSet<&str> = common.iter().copied().collect();
        let all: Vec<LanguageEntry> = languages
            .into_iter()
            .map(|(code, name)| LanguageEntry::new(code, name))
            .collect();

        if let Some(missing) = common_codes
            .iter()
            .find(|code| !all.iter().any(|entry| entry.code == **code))
        {
            return Err(RegistryError::UnknownCommon(missing.to_string()));
        }

        let (mut common, mut other): (Vec<_>, Vec<_>) = all
            .into_iter()
            .partition(|entry| common_codes.contains(entry.code.as_str()));

        common.sort_by(by_display_name);
        other.sort_by(by_display_name);
        Ok(Self { common, other })
    }

    /// Parses a TOML language table.
    pub(crate) fn from_toml_str(table: &str) -> Result<Self, RegistryError> {
        let table: LanguageTable = toml::from_str(table)?;
        let common: Vec<&str> = table.common.iter().map(String::as_str).collect();
        Self::new(
            table
                .languages
                .iter()
                .map(|(code, name)| (code.as_str(), name.as_str())),
            &common,
        )
    }

    /// The table that ships with the bot.
    pub(crate) fn bundled() -> Result<Self, RegistryError> {
        Self::from_toml_str(BUNDLED_TABLE)
    }

    /// Loads the table at `path`, or the bundled one if no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, RegistryError> {
        match path {
            Some(path) => {
                let table = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_toml_str(&table)
            }
            None => Self::bundled(),
        }
    }

    fn all(&self) -> impl Iterator<Item = &LanguageEntry> {
        self.common.iter().chain(self.other.iter())
    }

    pub(crate) fn lookup_by_code(&self, code: &str) -> Option<&LanguageEntry> {
        self.all().find(|entry| entry.code == code)
    }

    /// Case-insensitive exact match on the display name.
    pub(crate) fn lookup_by_name(&self, name: &str) -> Option<&LanguageEntry> {
        let name = name.to_lowercase();
        self.all()
            .find(|entry| entry.display_name.to_lowercase() == name)
    }

    /// Gets the display name for a code, or `Unknown`.
    pub(crate) fn display_name(&self, code: &str) -> &str {
        self.lookup_by_code(code)
            .map(|entry| entry.display_name.as_str())
            .unwrap_or("Unknown")
    }

    pub(crate) fn list_common(&self) -> &[LanguageEntry] {
        &self.common
    }

    pub(crate) fn list_other(&self) -> &[LanguageEntry] {
        &self.other
    }

    /// Resolves user input (a code or a language name) to a known code.
    ///
    /// Exact codes come back unchanged. Otherwise names are compared case-insensitively, and
    /// finally codes are, so `zh-CN` typed by hand still finds `zh-cn`.
    pub(crate) fn resolve(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        if let Some(entry) = self.lookup_by_code(input) {
            return Some(entry.code.as_str());
        }

        self.lookup_by_name(input)
            .or_else(|| {
                self.all()
                    .find(|entry| entry.code.eq_ignore_ascii_case(input))
            })
            .map(|entry| entry.code.as_str())
    }

    /// Autocomplete suggestions for the "other languages" field: entries whose display name
    /// contains `partial` case-insensitively, in display name order, capped at Discord's limit.
    pub(crate) fn suggest_other(&self, partial: &str) -> Vec<&LanguageEntry> {
        let needle = partial.to_lowercase();
        self.other
            .iter()
            .filter(|entry| needle.is_empty() || entry.display_name.to_lowercase().contains(&needle))
            .take(MAX_AUTOCOMPLETE_CHOICES)
            .collect()
    }
}

fn by_display_name(a: &LanguageEntry, b: &LanguageEntry) -> std::cmp::Ordering {
    a.display_name
        .cmp(&b.display_name)
        .then_with(|| a.code.cmp(&b.code))
}

/// The translation backend is case-sensitive for regional Chinese codes: `zh-cn` must be sent as
/// `zh-CN`. Every other code passes through untouched.
pub(crate) fn backend_code(code: &str) -> String {
    match code.split_once('-') {
        Some((family, region)) if family.eq_ignore_ascii_case("zh") => {
            format!("zh-{}", region.to_uppercase())
        }
        _ => code.to_string(),
    }
}
