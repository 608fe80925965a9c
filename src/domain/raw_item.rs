/// Intermediate record for one `<item>` element of the source XML.
///
/// Produced by the normalizer, consumed only by the chapter extractor.
/// Every field is optional: malformed individual items degrade to empty
/// fields instead of aborting the parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawFeedItem {
    pub title: Option<String>,
    pub enclosure_url: Option<String>,
    pub media_content_url: Option<String>,
    /// Raw HTML/CDATA body, used only as an image-fallback source.
    pub content: Option<String>,
    pub pub_date: Option<String>,
}
