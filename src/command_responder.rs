//! Trait that responds to commands.
//!
//! Handlers build a [`Reply`] without touching Discord at all; the command glue then renders it
//! into poise's reply builder.

use poise::CreateReply;
use serenity::builder::CreateEmbed;
use serenity::utils::Colour;

use crate::utils::field_value;

pub(crate) trait CommandResponder: Sync + Send {
    /// Responds to a command.
    fn response<'a, 'b>(&self, msg: &'a mut CreateReply<'b>) -> &'a mut CreateReply<'b>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// An embed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmbedReply {
    pub title: Option<String>,
    pub description: Option<String>,
    pub colour: Colour,
    pub fields: Vec<EmbedField>,
}

impl EmbedReply {
    pub(crate) fn new(colour: Colour) -> Self {
        Self {
            title: None,
            description: None,
            colour,
            fields: vec![],
        }
    }

    pub(crate) fn title<D: ToString>(mut self, title: D) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub(crate) fn description<D: ToString>(mut self, description: D) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Adds a field, clamping the value to what Discord accepts.
    pub(crate) fn field<N: ToString>(mut self, name: N, value: &str, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.to_string(),
            value: field_value(value),
            inline,
        });
        self
    }

    /// Looks up a field's value by name.
    #[cfg(test)]
    pub(crate) fn value_of(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    fn fill<'a>(&self, e: &'a mut CreateEmbed) -> &'a mut CreateEmbed {
        e.colour(self.colour);
        if let Some(title) = &self.title {
            e.title(title);
        }
        if let Some(description) = &self.description {
            e.description(description);
        }
        for field in &self.fields {
            e.field(&field.name, &field.value, field.inline);
        }
        e
    }
}

/// What a command sends back to the invoking user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reply {
    /// Plain text, used for errors.
    Text(String),
    Embed(EmbedReply),
}

impl Reply {
    pub(crate) fn text<D: ToString>(content: D) -> Self {
        Reply::Text(content.to_string())
    }

    #[cfg(test)]
    pub(crate) fn as_embed(&self) -> Option<&EmbedReply> {
        match self {
            Reply::Embed(embed) => Some(embed),
            Reply::Text(_) => None,
        }
    }
}

impl From<EmbedReply> for Reply {
    fn from(embed: EmbedReply) -> Self {
        Reply::Embed(embed)
    }
}

impl CommandResponder for Reply {
    fn response<'a, 'b>(&self, msg: &'a mut CreateReply<'b>) -> &'a mut CreateReply<'b> {
        match self {
            Reply::Text(content) => msg.content(content),
            Reply::Embed(embed) => msg.embed(|e| embed.fill(e)),
        }
    }
}
