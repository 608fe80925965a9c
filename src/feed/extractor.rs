use crate::domain::{Chapter, RawFeedItem};

/// Project normalized feed items into playable [`Chapter`]s.
///
/// Items without an enclosure URL are dropped: a feed item with no
/// playable audio is not a chapter. Output preserves the feed's document
/// order; sort-order transformation belongs to the presentation layer.
pub(crate) fn extract_chapters(items: Vec<RawFeedItem>) -> Vec<Chapter> {
    items
        .into_iter()
        .filter_map(|item| {
            let audio_src = item.enclosure_url?;
            if audio_src.is_empty() {
                return None;
            }

            let image = item
                .media_content_url
                .or_else(|| item.content.as_deref().and_then(first_img_src));

            Some(Chapter {
                title: item.title.unwrap_or_else(|| "Untitled".into()),
                audio_src,
                image,
                publish_date: item.pub_date,
            })
        })
        .collect()
}

/// Find the first `<img src="...">` URL in an HTML fragment.
///
/// Plain string scan, no HTML parsing: matches the first `src` attribute
/// after an `<img` tag, quoted either way.
fn first_img_src(html: &str) -> Option<String> {
    let img_at = html.find("<img")?;
    let rest = &html[img_at..];
    let tag_end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
    let tag = &rest[..tag_end];

    for quote in ['"', '\''] {
        let pattern = format!("src={quote}");
        if let Some(start) = tag.find(&pattern) {
            let value = &tag[start + pattern.len()..];
            let end = value.find(quote)?;
            return Some(value[..end].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(
        enclosure: Option<&str>,
        media: Option<&str>,
        content: Option<&str>,
    ) -> RawFeedItem {
        RawFeedItem {
            title: Some("Day 1".into()),
            enclosure_url: enclosure.map(String::from),
            media_content_url: media.map(String::from),
            content: content.map(String::from),
            pub_date: None,
        }
    }

    #[test]
    fn test_sample_scenario() {
        let chapters = extract_chapters(vec![item(
            Some("http://x/a.mp3"),
            Some("http://x/a.jpg"),
            None,
        )]);

        assert_eq!(
            chapters,
            vec![Chapter {
                title: "Day 1".into(),
                audio_src: "http://x/a.mp3".into(),
                image: Some("http://x/a.jpg".into()),
                publish_date: None,
            }]
        );
    }

    #[test]
    fn test_items_without_enclosure_are_dropped() {
        let chapters = extract_chapters(vec![
            item(None, Some("http://x/a.jpg"), Some("rich content")),
            item(Some("http://x/b.mp3"), None, None),
            item(Some(""), None, None),
        ]);

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].audio_src, "http://x/b.mp3");
    }

    #[test]
    fn test_media_content_wins_over_embedded_img() {
        let chapters = extract_chapters(vec![item(
            Some("http://x/a.mp3"),
            Some("http://x/media.jpg"),
            Some(r#"<p>hi</p><img src="http://x/inline.png">"#),
        )]);

        assert_eq!(chapters[0].image.as_deref(), Some("http://x/media.jpg"));
    }

    #[test]
    fn test_img_fallback_from_content() {
        let chapters = extract_chapters(vec![item(
            Some("http://x/a.mp3"),
            None,
            Some(r#"<p>before</p><img class="c" src="http://x/inline.png" alt="">"#),
        )]);

        assert_eq!(chapters[0].image.as_deref(), Some("http://x/inline.png"));
    }

    #[test]
    fn test_no_image_sources_yields_none() {
        let chapters = extract_chapters(vec![item(
            Some("http://x/a.mp3"),
            None,
            Some("<p>no pictures here</p>"),
        )]);

        assert_eq!(chapters[0].image, None);
    }

    #[test]
    fn test_document_order_preserved() {
        let chapters = extract_chapters(vec![
            item(Some("http://x/1.mp3"), None, None),
            item(Some("http://x/2.mp3"), None, None),
            item(Some("http://x/3.mp3"), None, None),
        ]);

        let srcs: Vec<_> = chapters.iter().map(|c| c.audio_src.as_str()).collect();
        assert_eq!(srcs, vec!["http://x/1.mp3", "http://x/2.mp3", "http://x/3.mp3"]);
    }

    #[test]
    fn test_first_img_src_single_quotes() {
        assert_eq!(
            first_img_src("<img src='http://x/p.gif'/>").as_deref(),
            Some("http://x/p.gif")
        );
    }

    #[test]
    fn test_first_img_src_takes_first_occurrence() {
        let html = r#"<img src="http://x/1.png"><img src="http://x/2.png">"#;
        assert_eq!(first_img_src(html).as_deref(), Some("http://x/1.png"));
    }

    #[test]
    fn test_first_img_src_no_img() {
        assert_eq!(first_img_src("<p>plain</p>"), None);
    }
}
