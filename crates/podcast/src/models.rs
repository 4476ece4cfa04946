// ABOUTME: Typed podcast models: Channel (alias Podcast), Episode, Category and the iTunes enums.
// ABOUTME: Construction from loosely-typed JSON input is the validation step; see validate.rs for coercion.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Rule, ValidationError};
use crate::validate::{Choice, Fields};

/// MIME type assumed for an enclosure when the input does not name one.
pub const DEFAULT_MEDIA_TYPE: &str = "audio/mpeg";

/// `itunes:episodeType` values. Input spells them `Full`, `Trailer`, `Bonus`;
/// the feed gets Apple's lowercase form from [`EpisodeType::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EpisodeType {
    Full,
    Trailer,
    Bonus,
}

impl EpisodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeType::Full => "full",
            EpisodeType::Trailer => "trailer",
            EpisodeType::Bonus => "bonus",
        }
    }
}

impl Choice for EpisodeType {
    const ALLOWED: &'static [&'static str] = &["Full", "Trailer", "Bonus"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Full" => Some(EpisodeType::Full),
            "Trailer" => Some(EpisodeType::Trailer),
            "Bonus" => Some(EpisodeType::Bonus),
            _ => None,
        }
    }
}

impl fmt::Display for EpisodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `itunes:type` values for the show as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowType {
    Episodic,
    Serial,
}

impl ShowType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowType::Episodic => "episodic",
            ShowType::Serial => "serial",
        }
    }
}

impl Choice for ShowType {
    const ALLOWED: &'static [&'static str] = &["episodic", "serial"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "episodic" => Some(ShowType::Episodic),
            "serial" => Some(ShowType::Serial),
            _ => None,
        }
    }
}

impl fmt::Display for ShowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `itunes_category`: a top-level name, or a name with one subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Category {
    Single(String),
    Pair(String, String),
}

impl Category {
    pub fn primary(&self) -> &str {
        match self {
            Category::Single(name) | Category::Pair(name, _) => name,
        }
    }

    pub fn secondary(&self) -> Option<&str> {
        match self {
            Category::Single(_) => None,
            Category::Pair(_, sub) => Some(sub),
        }
    }
}

/// A single media item, rendered as one `<item>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Episode {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_explicit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_episode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_episode_type: Option<EpisodeType>,
    pub media_url: String,
    /// Enclosure length in bytes.
    pub media_size: u64,
    pub media_type: String,
}

impl Episode {
    /// Validates and coerces one episode mapping.
    ///
    /// Unknown keys are ignored. `null` is treated the same as an absent key.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        Self::from_input(value).map_err(|e| e.at_root("episode"))
    }

    /// Field paths in errors are relative to the episode itself.
    fn from_input(value: &Value) -> Result<Self, ValidationError> {
        let f = Fields::object(value)?;
        Ok(Self {
            title: f.string("title")?,
            link: f.optional_string("link")?,
            guid: f.optional_string("guid")?,
            pub_date: f.optional_timestamp("pub_date")?,
            description: f.optional_string("description")?,
            itunes_duration: f.optional_duration("itunes_duration")?,
            itunes_explicit: f.optional_bool("itunes_explicit")?,
            itunes_image: f.optional_string("itunes_image")?,
            itunes_episode: f.optional_ordinal("itunes_episode")?,
            itunes_season: f.optional_ordinal("itunes_season")?,
            itunes_episode_type: f.optional_choice("itunes_episode_type")?,
            media_url: f.string("media_url")?,
            media_size: f.size("media_size")?,
            media_type: f.string_or("media_type", DEFAULT_MEDIA_TYPE)?,
        })
    }
}

impl TryFrom<Value> for Episode {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Episode::from_value(&value)
    }
}

/// The podcast: channel-level metadata plus episodes in feed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Channel {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub description: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_author: Option<String>,
    pub itunes_image: String,
    pub itunes_category: Vec<Category>,
    pub itunes_explicit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_type: Option<ShowType>,
    /// RFC 5322 mailbox, split into name and address only when rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_new_feed_url: Option<String>,
    pub itunes_block: bool,
    pub itunes_complete: bool,
    pub episodes: Vec<Episode>,
}

/// Alternate name for [`Channel`].
pub type Podcast = Channel;

impl Channel {
    /// Validates and coerces a channel mapping, including every episode.
    ///
    /// Any invalid episode fails the whole channel; the error path names it,
    /// e.g. `episodes[2].itunes_episode_type`.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let f = Fields::object(value).map_err(|e| e.at_root("channel"))?;

        let channel = Self {
            title: f.string("title")?,
            link: f.optional_string("link")?,
            description: f.string("description")?,
            language: f.string("language")?,
            copyright: f.optional_string("copyright")?,
            itunes_author: f.optional_string("itunes_author")?,
            itunes_image: f.string("itunes_image")?,
            itunes_category: f.categories("itunes_category")?,
            itunes_explicit: f.bool("itunes_explicit")?,
            itunes_type: f.optional_choice("itunes_type")?,
            itunes_owner: f.optional_string("itunes_owner")?,
            itunes_new_feed_url: f.optional_string("itunes_new_feed_url")?,
            itunes_block: f.bool_or("itunes_block", false)?,
            itunes_complete: f.bool_or("itunes_complete", false)?,
            episodes: f
                .list("episodes")?
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    Episode::from_input(item).map_err(|e| e.within(&format!("episodes[{}]", idx)))
                })
                .collect::<Result<_, _>>()?,
        };

        debug!(
            "validated channel {:?} with {} episodes",
            channel.title,
            channel.episodes.len()
        );
        Ok(channel)
    }

    /// Parses JSON text and validates it as a channel.
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            ValidationError::new(
                "channel",
                Rule::TypeMismatch {
                    expected: "JSON object",
                    found: json_error_kind(&e),
                },
            )
        })?;
        Self::from_value(&value)
    }
}

fn json_error_kind(err: &serde_json::Error) -> &'static str {
    use serde_json::error::Category as JsonCategory;
    match err.classify() {
        JsonCategory::Eof => "truncated JSON",
        JsonCategory::Syntax => "malformed JSON",
        JsonCategory::Data => "unexpected JSON data",
        JsonCategory::Io => "unreadable JSON",
    }
}

impl TryFrom<Value> for Channel {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Channel::from_value(&value)
    }
}
