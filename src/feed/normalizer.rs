use html_escape::decode_html_entities;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::domain::RawFeedItem;
use crate::feed::FeedError;

/// Which text node is currently being captured inside an `<item>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Title,
    ContentEncoded,
    Description,
    PubDate,
}

/// Streaming RSS 2.0 normalizer.
///
/// Turns a raw XML payload into a list of [`RawFeedItem`], tolerant of
/// vendor namespace prefixes (`media:content`, `content:encoded`).
/// Malformed individual items degrade to empty fields; only a
/// document-level structural error aborts with [`FeedError::Parse`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn normalize(&self, body: &[u8]) -> Result<Vec<RawFeedItem>, FeedError> {
        let mut reader = Reader::from_reader(body);
        reader.config_mut().trim_text(true);

        let mut items = Vec::new();
        let mut buf = Vec::new();

        let mut saw_root = false;
        let mut depth: usize = 0;
        let mut in_item = false;
        let mut item = ItemBuilder::default();
        let mut capture: Option<Capture> = None;
        let mut text = String::new();

        loop {
            buf.clear();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = e.name().as_ref().to_vec();
                    depth += 1;

                    if !saw_root {
                        saw_root = true;
                        if name != b"rss" {
                            return Err(FeedError::parse(format!(
                                "unexpected root element <{}>, expected <rss>",
                                String::from_utf8_lossy(&name)
                            )));
                        }
                        continue;
                    }

                    if name == b"item" {
                        in_item = true;
                        item = ItemBuilder::default();
                        continue;
                    }

                    if in_item {
                        item.inspect_element(&e, &name);
                        capture = capture_for(&name);
                        text.clear();
                    }
                }
                Ok(Event::Empty(e)) => {
                    // Self-closing elements carry their payload in attributes,
                    // e.g. <enclosure url="..."/> and <media:content url="..."/>.
                    if in_item {
                        let name = e.name().as_ref().to_vec();
                        item.inspect_element(&e, &name);
                    }
                }
                Ok(Event::Text(e)) => {
                    if capture.is_some() {
                        if let Ok(t) = e.unescape() {
                            text.push_str(&t);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if capture.is_some() {
                        text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::End(e)) => {
                    let name = e.name().as_ref().to_vec();
                    depth = depth.saturating_sub(1);

                    if name == b"item" {
                        in_item = false;
                        capture = None;
                        items.push(item.take().build());
                        continue;
                    }

                    if in_item && capture == capture_for(&name) {
                        if let Some(field) = capture.take() {
                            item.commit_text(field, std::mem::take(&mut text));
                        }
                    }
                }
                Ok(Event::Eof) => {
                    // A truncated payload ends with elements still open.
                    // quick-xml does not flag unclosed elements at EOF itself.
                    if depth != 0 {
                        return Err(FeedError::parse("unexpected end of document"));
                    }
                    break;
                }
                Err(e) => return Err(FeedError::parse(e.to_string())),
                _ => {}
            }
        }

        if !saw_root {
            return Err(FeedError::parse("document has no XML root element"));
        }

        Ok(items)
    }
}

fn capture_for(name: &[u8]) -> Option<Capture> {
    match name {
        b"title" => Some(Capture::Title),
        b"content:encoded" => Some(Capture::ContentEncoded),
        b"description" => Some(Capture::Description),
        b"pubDate" => Some(Capture::PubDate),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct ItemBuilder {
    title: Option<String>,
    enclosure_url: Option<String>,
    media_url: Option<String>,
    bare_content_url: Option<String>,
    content_encoded: Option<String>,
    description: Option<String>,
    pub_date: Option<String>,
}

impl ItemBuilder {
    /// Pick up URL-bearing child elements. Attribute decoding problems are
    /// swallowed: a broken child degrades to a missing field, never an error.
    fn inspect_element(&mut self, e: &BytesStart<'_>, name: &[u8]) {
        match name {
            b"enclosure" => {
                if self.enclosure_url.is_none() {
                    self.enclosure_url = url_attr(e);
                }
            }
            // Vendor-prefixed form; a bare <content url=".."/> child is
            // accepted as a fallback but never overrides media:content.
            b"media:content" => {
                if self.media_url.is_none() {
                    self.media_url = url_attr(e);
                }
            }
            b"content" => {
                if self.bare_content_url.is_none() {
                    self.bare_content_url = url_attr(e);
                }
            }
            _ => {}
        }
    }

    fn commit_text(&mut self, field: Capture, text: String) {
        match field {
            Capture::Title => {
                let decoded = decode_html_entities(text.trim()).to_string();
                if !decoded.is_empty() {
                    self.title = Some(decoded);
                }
            }
            Capture::ContentEncoded => self.content_encoded = Some(text),
            Capture::Description => self.description = Some(text),
            Capture::PubDate => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    self.pub_date = Some(trimmed.to_string());
                }
            }
        }
    }

    fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    fn build(self) -> RawFeedItem {
        RawFeedItem {
            // A missing or empty title becomes "Untitled".
            title: Some(self.title.unwrap_or_else(|| "Untitled".into())),
            enclosure_url: self.enclosure_url,
            media_content_url: self.media_url.or(self.bare_content_url),
            content: self.content_encoded.or(self.description),
            pub_date: self.pub_date,
        }
    }
}

fn url_attr(e: &BytesStart<'_>) -> Option<String> {
    e.try_get_attribute("url")
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok())
        .map(|v| v.into_owned())
}
