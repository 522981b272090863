// Roster Bot
// Keeps a guild roster rendered in a Discord channel

mod api;
mod commands;
mod features;
mod models;
mod state;
mod utils;

use std::env;
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::discord::SerenityResolver;
use crate::api::storage::JsonStore;
use crate::commands::roster_helpers::{ADMIN_REQUIRED, COMMAND_FAILED, UNKNOWN_COMMAND};
use crate::features::roster_display::request_render;
use crate::state::AppState;
use crate::utils::config::{config_file, roster_file, STARTUP_RENDER_DELAY};

/// User data shared across all commands
#[derive(Debug)]
pub struct Data {
    pub state: Arc<AppState>,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// Register all slash commands
fn get_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        commands::roster::set_roster_channel(),
        commands::roster::add_member(),
        commands::roster::remove_member(),
        commands::roster::show_roster(),
        commands::roster::clear_roster(),
        commands::roster::force_update(),
    ]
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command error in /{}: {:?}", ctx.command().name, error);
            let _ = ctx
                .send(poise::CreateReply::default().content(COMMAND_FAILED).ephemeral(true))
                .await;
        }
        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
            info!("{} denied /{}", ctx.author().name, ctx.command().name);
            let _ = ctx
                .send(poise::CreateReply::default().content(ADMIN_REQUIRED).ephemeral(true))
                .await;
        }
        poise::FrameworkError::UnknownInteraction { ctx, interaction, .. } => {
            info!("Unknown command /{}", interaction.data.name);
            let response = serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(UNKNOWN_COMMAND)
                    .ephemeral(true),
            );
            let _ = interaction.create_response(ctx, response).await;
        }
        err => {
            error!("Framework error: {:?}", err);
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "roster_bot=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN must be set");
    let store = JsonStore::new(roster_file(), config_file());

    info!("Starting Roster Bot...");

    // Setup framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: get_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Connected as {}. Registering commands...", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully!");

                let state = Arc::new(AppState::load(store, Arc::new(SerenityResolver::new(ctx))));
                info!(
                    "Loaded {} roster members",
                    state.roster.read().await.len()
                );

                if state.config.read().await.roster_channel().is_some() {
                    let startup_state = state.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(STARTUP_RENDER_DELAY).await;
                        request_render(startup_state);
                    });
                }

                Ok(Data { state })
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MESSAGES;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .expect("Failed to create client");

    // Run with graceful shutdown
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to register Ctrl+C handler");
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    info!("Goodbye!");
}
