// ABOUTME: Podcast RSS writer: validates podcast metadata and renders RSS 2.0 with iTunes/Google Play tags.
// ABOUTME: Data flows one way: JSON input -> Channel/Episode (validated) -> Writer -> XML string.

pub mod duration;
pub mod error;
pub mod mailbox;
pub mod models;
pub mod node;
pub mod options;
pub mod timestamp;
mod validate;
pub mod writer;

pub use duration::parse_duration_seconds;
pub use error::{Error, RenderError, Rule, ValidationError};
pub use mailbox::{parse_mailbox, Mailbox};
pub use models::{Category, Channel, Episode, EpisodeType, Podcast, ShowType, DEFAULT_MEDIA_TYPE};
pub use options::{WriterBuilder, WriterOptions};
pub use timestamp::parse_timestamp;
pub use writer::{render, Writer};

use serde_json::Value;

/// Validates `input` as a channel and renders it with the default options.
pub fn write_feed(input: &Value) -> Result<String, Error> {
    let channel = Channel::from_value(input)?;
    Ok(render(&channel)?)
}
