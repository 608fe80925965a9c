use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kapitel::app::AppContext;
use kapitel::cli::{commands, Cli, Commands};
use kapitel::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(cli.db, config)?;

    match cli.command {
        Commands::Add {
            name,
            feed_url,
            sort_ascending,
            show_first_post,
        } => {
            commands::add_settings(&ctx, &name, &feed_url, sort_ascending, show_first_post)?;
        }
        Commands::Remove { id } => {
            commands::remove_settings(&ctx, &id)?;
        }
        Commands::Set {
            id,
            name,
            feed_url,
            list_height,
            sort_ascending,
            show_first_post,
            player_type,
        } => {
            commands::set_settings(
                &ctx,
                &id,
                name,
                feed_url,
                list_height,
                sort_ascending,
                show_first_post,
                player_type,
            )?;
        }
        Commands::List => {
            commands::list_settings(&ctx)?;
        }
        Commands::Show { id, json } => {
            commands::show_settings(&ctx, &id, json)?;
        }
        Commands::Fetch { url, json } => {
            commands::fetch_feed(&ctx, &url, json).await?;
        }
        Commands::Preview { id } => {
            commands::preview(&ctx, &id).await?;
        }
        Commands::Embed { id, base_url } => {
            commands::embed_codes(&ctx, &id, &base_url)?;
        }
    }

    Ok(())
}
