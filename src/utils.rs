//! Utilities.
use std::fmt::Debug;

use tracing::warn;

use crate::handlers::Data;

pub(crate) type Error = anyhow::Error;
pub(crate) type Context<'a> = poise::Context<'a, Data, Error>;

/// Discord rejects embed field values longer than this.
pub(crate) const EMBED_FIELD_LIMIT: usize = 1024;

/// Log errors to the console. Used for actions like sending a message where the fallback is "do nothing".
pub(crate) fn log_err<T, E: Debug>(res: Result<T, E>) {
    if let Err(e) = res {
        warn!("Errored: {:?}", e);
    }
}

/// Makes a string safe to use as an embed field value: non-empty and within Discord's length
/// limit, cutting on a character boundary.
pub(crate) fn field_value(value: &str) -> String {
    if value.trim().is_empty() {
        return "*(empty)*".to_string();
    }

    if value.chars().count() <= EMBED_FIELD_LIMIT {
        return value.to_string();
    }

    let mut cut: String = value.chars().take(EMBED_FIELD_LIMIT - 1).collect();
    cut.push('…');
    cut
}
