//! Builders for rich embeds attached to interaction responses and follow-ups.
//!
//! The only builder that needs constructing directly is [`CreateEmbed`], along with
//! [`CreateEmbedAuthor`] and [`CreateEmbedFooter`] for its nested objects.
//!
//! Documentation for embeds can be found [here].
//!
//! [here]: https://discord.com/developers/docs/resources/channel#embed-object

use serde::Serialize;

use crate::model::timestamp::Timestamp;

/// A builder to create an embed in a message
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#embed-object)
#[derive(Clone, Debug, Serialize)]
#[must_use]
pub struct CreateEmbed {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,
    #[serde(rename = "color")]
    #[serde(skip_serializing_if = "Option::is_none")]
    colour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<CreateEmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<CreateEmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<CreateEmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<CreateEmbedAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<CreateEmbedField>,
}

impl Default for CreateEmbed {
    fn default() -> Self {
        Self {
            title: None,
            kind: "rich",
            description: None,
            url: None,
            timestamp: None,
            colour: None,
            footer: None,
            image: None,
            thumbnail: None,
            author: None,
            fields: Vec::new(),
        }
    }
}

impl CreateEmbed {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the author of the embed.
    ///
    /// Refer to the documentation for [`CreateEmbedAuthor`] for more information.
    pub fn author(mut self, author: CreateEmbedAuthor) -> Self {
        self.author = Some(author);
        self
    }

    /// Set the colour of the left-hand side of the embed.
    ///
    /// This is an alias of [`Self::colour`].
    pub fn color(self, colour: u32) -> Self {
        self.colour(colour)
    }

    /// Set the colour of the left-hand side of the embed, as a `0xRRGGBB` value.
    pub fn colour(mut self, colour: u32) -> Self {
        self.colour = Some(colour);
        self
    }

    /// Set the description of the embed.
    ///
    /// **Note**: This can't be longer than 4096 characters.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a field. Note that this will not overwrite other fields, and will add to them.
    ///
    /// **Note**: Maximum amount of characters you can put is 256 in a field name and 1024 in a
    /// field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(CreateEmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Adds multiple fields at once.
    pub fn fields<N, V>(mut self, fields: impl IntoIterator<Item = (N, V, bool)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let fields = fields.into_iter().map(|(name, value, inline)| CreateEmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });

        self.fields.extend(fields);
        self
    }

    /// Set the footer of the embed.
    pub fn footer(mut self, footer: CreateEmbedFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Set the image associated with the embed. This only supports HTTP(S).
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(CreateEmbedImage {
            url: url.into(),
        });
        self
    }

    /// Set the thumbnail of the embed. This only supports HTTP(S).
    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(CreateEmbedImage {
            url: url.into(),
        });
        self
    }

    /// Set the timestamp.
    ///
    /// An RFC 3339 string has to be parsed into a [`Timestamp`] first, see [`Timestamp::parse`].
    pub fn timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set the title of the embed.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the URL to direct to when clicking on the title.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A builder to create the author data of an embed. See [`CreateEmbed::author`]
#[derive(Clone, Debug, Serialize)]
#[must_use]
pub struct CreateEmbedAuthor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
}

impl CreateEmbedAuthor {
    /// Creates an author object with the given name, leaving all other fields empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_url: None,
            url: None,
        }
    }

    /// Set the URL of the author's icon.
    pub fn icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    /// Set the author's URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A builder to create the footer data for an embed. See [`CreateEmbed::footer`]
#[derive(Clone, Debug, Serialize)]
#[must_use]
pub struct CreateEmbedFooter {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
}

impl CreateEmbedFooter {
    /// Creates a new footer object with the given text, leaving all other fields empty.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon_url: None,
        }
    }

    /// Set the icon URL's value. This only supports HTTP(S).
    pub fn icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }
}

#[derive(Clone, Debug, Serialize)]
struct CreateEmbedField {
    name: String,
    value: String,
    inline: bool,
}

#[derive(Clone, Debug, Serialize)]
struct CreateEmbedImage {
    url: String,
}
