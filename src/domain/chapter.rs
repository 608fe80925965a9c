use serde::{Deserialize, Serialize};

/// The canonical playable unit: one feed item with a resolved audio URL.
///
/// Chapters are constructed fresh on every feed fetch and never mutated;
/// a new fetch supersedes the previous list. Serialization is camelCase
/// (`audioSrc`, `publishDate`) to match the embed consumer's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub title: String,
    pub audio_src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
}

impl Chapter {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_with_title() {
        let chapter = Chapter {
            title: "Day 1".into(),
            audio_src: "http://x/a.mp3".into(),
            image: None,
            publish_date: None,
        };
        assert_eq!(chapter.display_title(), "Day 1");
    }

    #[test]
    fn test_display_title_empty() {
        let chapter = Chapter {
            title: String::new(),
            audio_src: "http://x/a.mp3".into(),
            image: None,
            publish_date: None,
        };
        assert_eq!(chapter.display_title(), "Untitled");
    }

    #[test]
    fn test_serializes_camel_case() {
        let chapter = Chapter {
            title: "Day 1".into(),
            audio_src: "http://x/a.mp3".into(),
            image: Some("http://x/a.jpg".into()),
            publish_date: None,
        };

        let json = serde_json::to_value(&chapter).unwrap();
        assert_eq!(json["audioSrc"], "http://x/a.mp3");
        assert_eq!(json["image"], "http://x/a.jpg");
        assert!(json.get("publishDate").is_none());
    }
}
