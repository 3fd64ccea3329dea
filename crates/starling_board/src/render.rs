//! Mirrored-post rendering.
//!
//! Deterministic given (record, item, tier): no clocks, no randomness, no
//! hidden state. The title ends with the original message ID and carries the
//! source channel before it; the redirect resolver recovers both from the
//! rendered text, so that ordering is load-bearing.

use chrono::{DateTime, Utc};
use regex::Regex;
use starling_core::{Item, StarRecord, Tier};
use std::fmt::Write;
use std::sync::OnceLock;

fn image_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(https?://\S+\.(?:png|jpeg|jpg|gif|webp))").expect("image url regex")
    })
}

/// Visible content of a mirrored post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarPost {
    /// Headline: count, tier emoji, source channel mention, message ID.
    pub title: String,
    /// Mirrored message text, with non-image attachments appended as links.
    pub body: String,
    /// Accent color from the vote-ratio tier.
    pub color: u32,
    /// First image found in the text or attachments, if any.
    pub image_url: Option<String>,
    /// Original author's display name.
    pub author_name: String,
    /// Original author's avatar, if any.
    pub author_icon_url: Option<String>,
    /// Creation time of the original message.
    pub timestamp: DateTime<Utc>,
}

/// Build the mirrored post for a record at the given tier.
pub fn render_post(record: &StarRecord, item: &Item, tier: Tier) -> StarPost {
    let title = format!(
        "{} {} <#{}>, ID: {}",
        record.count(),
        tier.emoji(),
        record.channel_id(),
        record.message_id()
    );

    let image_url = image_url_regex()
        .find(&item.content)
        .map(|found| found.as_str().to_string())
        .or_else(|| {
            item.attachments
                .iter()
                .find(|attachment| attachment.is_image())
                .map(|attachment| attachment.url.clone())
        });

    let mut body = item.content.clone();
    for attachment in item.attachments.iter().filter(|a| !a.is_image()) {
        if !body.is_empty() {
            body.push('\n');
        }
        let _ = write!(body, "[{}]({})", attachment.filename, attachment.url);
    }

    StarPost {
        title,
        body,
        color: tier.color(),
        image_url,
        author_name: item.author_name.clone(),
        author_icon_url: item.author_icon_url.clone(),
        timestamp: item.timestamp,
    }
}
