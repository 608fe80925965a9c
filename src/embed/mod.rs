//! Presentation helpers for the embed surface.
//!
//! Sort order and initial-chapter selection are presentation concerns,
//! applied here and never inside the feed pipeline: ascending order is a
//! plain list reversal, and the initially active chapter is picked from
//! the list as fetched.

use url::Url;

use crate::domain::{Chapter, PlayerSettings};

/// Apply the configured sort order: the feed's document order as-is, or
/// reversed when ascending is requested.
pub fn display_order(mut chapters: Vec<Chapter>, sort_ascending: bool) -> Vec<Chapter> {
    if sort_ascending {
        chapters.reverse();
    }
    chapters
}

/// Pick the initially active chapter from the list as fetched: the last
/// element when `show_first_post` is set (feeds conventionally list
/// newest first), otherwise the first.
pub fn initial_chapter(chapters: &[Chapter], show_first_post: bool) -> Option<&Chapter> {
    if show_first_post {
        chapters.last()
    } else {
        chapters.first()
    }
}

/// Query string carrying the appearance settings to the embed page.
fn embed_query(settings: &PlayerSettings) -> String {
    format!(
        "bg={}&text={}&primary={}&secondary={}&height={}&sortAsc={}&showFirst={}",
        urlencoding::encode(&settings.colors.background),
        urlencoding::encode(&settings.colors.text),
        urlencoding::encode(&settings.colors.primary),
        urlencoding::encode(&settings.colors.secondary),
        settings.list_height,
        settings.sort_ascending,
        settings.show_first_post,
    )
}

/// iframe embed code for inclusion in a third-party page. The iframe is
/// taller than the chapter list to leave room for the player controls.
pub fn iframe_snippet(base_url: &Url, settings: &PlayerSettings) -> String {
    format!(
        r#"<iframe
  src="{base}embed/{id}?{query}"
  width="100%"
  height="{height}px"
  frameborder="0"
></iframe>"#,
        base = base_url,
        id = settings.id,
        query = embed_query(settings),
        height = settings.list_height + 400,
    )
}

/// Script-tag embed code: injects an async loader that mounts the player
/// into a placeholder div.
pub fn script_snippet(base_url: &Url, settings: &PlayerSettings) -> String {
    format!(
        r#"<div id="kapitel-player"></div>
<script>
  (function() {{
    var script = document.createElement('script');
    script.src = '{base}embed.js';
    script.async = true;
    script.dataset.config = '{query}';
    document.head.appendChild(script);
  }})();
</script>"#,
        base = base_url,
        query = embed_query(settings),
    )
}
