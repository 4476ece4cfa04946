// ABOUTME: Maps a validated Channel onto the RSS 2.0 + iTunes element tree and renders it to a string.
// ABOUTME: Owns every presence rule: which optional fields emit elements, and in what shape.

use chrono::{DateTime, FixedOffset, Utc};
use log::{debug, trace};

use crate::error::RenderError;
use crate::mailbox::parse_mailbox;
use crate::models::{Category, Channel, Episode};
use crate::node::{write_document, Element};
use crate::options::WriterOptions;

pub const RSS_VERSION: &str = "2.0";
pub const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
pub const GOOGLEPLAY_NAMESPACE: &str = "http://www.google.com/schemas/play-podcasts/1.0";

/// Renders channels to RSS documents. Holds only its options, so one
/// instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    options: WriterOptions,
}

impl Writer {
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Renders `channel` to a complete XML document.
    ///
    /// # Returns
    /// * `Ok(String)` - The feed document
    /// * `Err(RenderError)` - `itunes_owner` is not a usable mailbox, or the XML writer failed
    pub fn render(&self, channel: &Channel) -> Result<String, RenderError> {
        let document = build_document(channel)?;
        let xml = write_document(&document, &self.options)?;
        debug!(
            "rendered feed {:?}: {} items, {} bytes",
            channel.title,
            channel.episodes.len(),
            xml.len()
        );
        Ok(xml)
    }
}

/// Renders `channel` with the default options.
pub fn render(channel: &Channel) -> Result<String, RenderError> {
    Writer::default().render(channel)
}

/// Builds the `<rss>` element tree for `channel` without serializing it.
pub fn build_document(channel: &Channel) -> Result<Element, RenderError> {
    Ok(Element::new("rss")
        .attr("version", RSS_VERSION)
        .attr("xmlns:itunes", ITUNES_NAMESPACE)
        .attr("xmlns:googleplay", GOOGLEPLAY_NAMESPACE)
        .child(channel_element(channel)?))
}

fn channel_element(channel: &Channel) -> Result<Element, RenderError> {
    let mut el = Element::new("channel");

    el.push(Element::text("title", &channel.title));
    push_optional(&mut el, "link", channel.link.as_deref());
    el.push(Element::text("description", &channel.description));
    el.push(Element::text("language", &channel.language));
    push_optional(&mut el, "copyright", channel.copyright.as_deref());

    push_optional(&mut el, "itunes:author", channel.itunes_author.as_deref());
    push_optional(
        &mut el,
        "itunes:type",
        channel.itunes_type.map(|t| t.as_str()),
    );
    el.push(Element::new("itunes:image").attr("href", &channel.itunes_image));
    el.push(Element::text(
        "itunes:explicit",
        channel.itunes_explicit.to_string(),
    ));
    push_flag(&mut el, "itunes:block", channel.itunes_block);
    push_flag(&mut el, "itunes:complete", channel.itunes_complete);

    for category in &channel.itunes_category {
        el.push(category_element(category));
    }

    if let Some(owner) = &channel.itunes_owner {
        let mailbox = parse_mailbox(owner)?;
        el.push(
            Element::new("itunes:owner")
                .child(Element::text("itunes:email", mailbox.address))
                .child(Element::text("itunes:name", mailbox.display_name)),
        );
    }

    push_optional(
        &mut el,
        "itunes:new-feed-url",
        channel.itunes_new_feed_url.as_deref(),
    );

    for (idx, episode) in channel.episodes.iter().enumerate() {
        trace!("rendering item {} {:?}", idx, episode.title);
        el.push(item_element(episode));
    }

    Ok(el)
}

fn category_element(category: &Category) -> Element {
    let parent = Element::new("itunes:category").attr("text", category.primary());
    match category.secondary() {
        Some(sub) => parent.child(Element::new("itunes:category").attr("text", sub)),
        None => parent,
    }
}

fn item_element(episode: &Episode) -> Element {
    let mut el = Element::new("item");

    el.push(Element::text("title", &episode.title));
    push_optional(&mut el, "link", episode.link.as_deref());
    push_optional(&mut el, "guid", episode.guid.as_deref());
    if let Some(date) = &episode.pub_date {
        el.push(Element::text("pubDate", format_pub_date(date)));
    }
    if let Some(description) = &episode.description {
        el.push(Element::cdata("description", description));
    }

    el.push(
        Element::new("enclosure")
            .attr("url", &episode.media_url)
            .attr("length", episode.media_size.to_string())
            .attr("type", &episode.media_type),
    );

    push_optional(
        &mut el,
        "itunes:episode",
        episode.itunes_episode.map(|n| n.to_string()).as_deref(),
    );
    push_optional(
        &mut el,
        "itunes:season",
        episode.itunes_season.map(|n| n.to_string()).as_deref(),
    );
    push_optional(
        &mut el,
        "itunes:episodeType",
        episode.itunes_episode_type.map(|t| t.as_str()),
    );
    push_optional(
        &mut el,
        "itunes:duration",
        episode.itunes_duration.map(|n| n.to_string()).as_deref(),
    );
    // Explicit false is still written; only an unset flag is omitted.
    push_optional(
        &mut el,
        "itunes:explicit",
        episode.itunes_explicit.map(|b| b.to_string()).as_deref(),
    );
    if let Some(image) = &episode.itunes_image {
        el.push(Element::new("itunes:image").attr("href", image));
    }

    el
}

/// RFC 2822 date in UTC, e.g. `Fri, 01 Mar 2024 15:00:00 +0000`.
pub fn format_pub_date(date: &DateTime<FixedOffset>) -> String {
    date.with_timezone(&Utc)
        .format("%a, %d %b %Y %H:%M:%S +0000")
        .to_string()
}

fn push_optional(parent: &mut Element, name: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        parent.push(Element::text(name, value));
    }
}

fn push_flag(parent: &mut Element, name: &'static str, set: bool) {
    if set {
        parent.push(Element::text(name, "Yes"));
    }
}
