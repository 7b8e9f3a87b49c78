//! Warden Discord Bot - Main Entry Point

use anyhow::Result;
use clap::Parser;
use poise::serenity_prelude::{self as serenity, GatewayIntents};
use std::sync::Arc;
use tracing::{error, info, warn};

use warden_commands::{all_commands, Data, Error};
use warden_common::logging;
use warden_config::ConfigLoader;
use warden_store::Store;
use warden_web::WebState;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level override
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    // Initialize logging
    let mut logging_config: logging::LoggingConfig = config.logging.clone().into();
    if let Some(level) = &args.log_level {
        logging_config.level = level.clone();
    }
    logging::init_logging(logging_config).map_err(|err| anyhow::anyhow!(err))?;

    info!("Starting Warden");

    // Validate Discord token
    if config.discord.token.is_empty() {
        anyhow::bail!("Discord token is required but not provided (set DISCORD_TOKEN)");
    }

    // Connect storage shared by the bot and the dashboard
    let store = Arc::new(
        Store::connect(&config.database.url, config.database.max_connections).await?,
    );
    let config = Arc::new(config);

    // Start the web dashboard alongside the gateway client
    if config.web.enabled {
        let state = WebState::new(store.clone());
        let addr: std::net::SocketAddr =
            format!("{}:{}", config.web.bind, config.web.port).parse()?;

        tokio::spawn(async move {
            if let Err(err) = warden_web::serve(state, addr).await {
                error!("Web dashboard failed: {}", err);
            }
        });
    }

    // Configure Discord intents
    let intents =
        GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT | GatewayIntents::GUILDS;

    let data = Data {
        config: config.clone(),
        store: store.clone(),
    };

    // Set up Poise framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as: {}", ready.user.name);
                info!("Connected to {} guilds", ready.guilds.len());

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Slash commands registered globally");

                Ok(data)
            })
        })
        .build();

    // Create Discord client
    let mut client = serenity::ClientBuilder::new(&config.discord.token, intents)
        .framework(framework)
        .await?;

    // Set up graceful shutdown handling
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {:?}", err);
            return;
        }

        info!("Received shutdown signal, starting graceful shutdown");
        shard_manager.shutdown_all().await;
    });

    // Start the bot
    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
        return Err(why.into());
    }

    info!("Warden has shut down");
    Ok(())
}

/// Central event handler for Discord events
async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::GuildCreate { guild, .. } => {
            info!("Joined guild: {} (ID: {})", guild.name, guild.id);

            if let Err(err) = data
                .store
                .upsert_server(&guild.id.to_string(), &guild.name)
                .await
            {
                warn!("Failed to record guild {}: {}", guild.id, err);
            }
        }
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Bot ready event received for: {}", data_about_bot.user.name);
        }
        _ => {}
    }
    Ok(())
}

/// Global error handler for the framework
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {:?}", ctx.command().name, error);
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(
                "Error in event handler for {:?}: {:?}",
                event.snake_case_name(),
                error
            );
        }
        error => {
            error!("Other error: {:?}", error);
        }
    }
}
