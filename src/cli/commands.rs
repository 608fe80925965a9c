use url::Url;

use crate::app::{AppContext, KapitelError, Result};
use crate::domain::{PlayerSettings, PlayerType};
use crate::embed;
use crate::store::SettingsStore;

pub fn add_settings(
    ctx: &AppContext,
    name: &str,
    feed_url: &str,
    sort_ascending: bool,
    show_first_post: bool,
) -> Result<()> {
    let mut settings = PlayerSettings::new(name, feed_url);
    settings.sort_ascending = sort_ascending;
    settings.show_first_post = show_first_post;

    ctx.store.put(&settings)?;
    println!("Added configuration: {} ({})", settings.name, settings.id);
    Ok(())
}

pub fn remove_settings(ctx: &AppContext, id: &str) -> Result<()> {
    let settings = ctx
        .store
        .get(id)?
        .ok_or_else(|| KapitelError::SettingsNotFound(id.to_string()))?;

    ctx.store.delete(&settings.id)?;
    println!("Removed configuration: {}", settings.name);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn set_settings(
    ctx: &AppContext,
    id: &str,
    name: Option<String>,
    feed_url: Option<String>,
    list_height: Option<u32>,
    sort_ascending: Option<bool>,
    show_first_post: Option<bool>,
    player_type: Option<String>,
) -> Result<()> {
    let mut settings = ctx
        .store
        .get(id)?
        .ok_or_else(|| KapitelError::SettingsNotFound(id.to_string()))?;

    if let Some(name) = name {
        settings.name = name;
    }
    if let Some(feed_url) = feed_url {
        settings.feed_url = feed_url;
    }
    if let Some(list_height) = list_height {
        settings.list_height = list_height;
    }
    if let Some(sort_ascending) = sort_ascending {
        settings.sort_ascending = sort_ascending;
    }
    if let Some(show_first_post) = show_first_post {
        settings.show_first_post = show_first_post;
    }
    if let Some(player_type) = player_type {
        settings.player_type = PlayerType::parse(&player_type).ok_or_else(|| {
            KapitelError::Other(format!(
                "unknown player type \"{player_type}\" (expected big, medium or small)"
            ))
        })?;
    }

    ctx.store.put(&settings)?;
    println!("Updated configuration: {}", settings.name);
    Ok(())
}

pub fn list_settings(ctx: &AppContext) -> Result<()> {
    let all = ctx.store.list()?;

    if all.is_empty() {
        println!("No configurations");
        return Ok(());
    }

    for settings in all {
        println!("{}  {}\n  {}", settings.id, settings.name, settings.feed_url);
    }

    Ok(())
}

pub fn show_settings(ctx: &AppContext, id: &str, json: bool) -> Result<()> {
    let settings = ctx
        .store
        .get(id)?
        .ok_or_else(|| KapitelError::SettingsNotFound(id.to_string()))?;

    if json {
        let out = serde_json::to_string_pretty(&settings)
            .map_err(|e| KapitelError::Other(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    println!("id:              {}", settings.id);
    println!("name:            {}", settings.name);
    println!("feed url:        {}", settings.feed_url);
    println!("player type:     {}", settings.player_type.as_str());
    println!("list height:     {}", settings.list_height);
    println!("sort ascending:  {}", settings.sort_ascending);
    println!("show first post: {}", settings.show_first_post);
    println!(
        "colors:          bg {} / text {} / primary {} / secondary {}",
        settings.colors.background,
        settings.colors.text,
        settings.colors.primary,
        settings.colors.secondary
    );
    Ok(())
}

pub async fn fetch_feed(ctx: &AppContext, url: &str, json: bool) -> Result<()> {
    let chapters = ctx.pipeline.fetch_chapters(url).await?;

    if json {
        let out = serde_json::to_string_pretty(&chapters)
            .map_err(|e| KapitelError::Other(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    if chapters.is_empty() {
        println!("No playable chapters in feed");
        return Ok(());
    }

    for chapter in &chapters {
        let date = chapter.publish_date.as_deref().unwrap_or("-");
        println!("{}  {}", date, chapter.display_title());
        println!("    audio: {}", chapter.audio_src);
        if let Some(image) = &chapter.image {
            println!("    image: {image}");
        }
    }
    println!("{} chapters", chapters.len());
    Ok(())
}

pub async fn preview(ctx: &AppContext, id: &str) -> Result<()> {
    let settings = ctx
        .store
        .get(id)?
        .ok_or_else(|| KapitelError::SettingsNotFound(id.to_string()))?;

    let chapters = ctx.pipeline.fetch_chapters(&settings.feed_url).await?;
    let active = embed::initial_chapter(&chapters, settings.show_first_post).cloned();
    let ordered = embed::display_order(chapters, settings.sort_ascending);

    if ordered.is_empty() {
        println!("No playable chapters in feed");
        return Ok(());
    }

    for chapter in &ordered {
        let marker = if Some(chapter) == active.as_ref() {
            "▶"
        } else {
            " "
        };
        println!("{} {}", marker, chapter.display_title());
    }
    Ok(())
}

pub fn embed_codes(ctx: &AppContext, id: &str, base_url: &str) -> Result<()> {
    let settings = ctx
        .store
        .get(id)?
        .ok_or_else(|| KapitelError::SettingsNotFound(id.to_string()))?;

    let base = Url::parse(base_url)?;

    println!("iframe embed code:\n");
    println!("{}\n", embed::iframe_snippet(&base, &settings));
    println!("JavaScript embed code:\n");
    println!("{}", embed::script_snippet(&base, &settings));
    Ok(())
}
