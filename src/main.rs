// VouchBot - Rust Edition
// A lightweight Discord bot for store vouches and customer feedback

mod commands;
mod features;
mod health;
mod models;
mod utils;

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::models::session::VouchSession;
use crate::utils::store::ConfigStore;

/// Shared state injected into every command and interaction handler
#[derive(Debug)]
pub struct Data {
    pub config: ConfigStore,
    /// In-flight vouches, keyed by the ID of their rating message
    pub sessions: DashMap<serenity::MessageId, VouchSession>,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// Register all slash commands
fn get_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        commands::setup::setupvouch(),
        commands::setup::setupfeedback(),
        commands::vouch::vouch(),
    ]
}

fn init_logging() {
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "vouchbot_rs=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer());

    // Railway captures stdout; keep a local bot.log everywhere else
    if env::var("RAILWAY_ENVIRONMENT").is_ok() {
        registry.init();
    } else {
        let file_appender = tracing_appender::rolling::never(".", "bot.log");
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false),
            )
            .init();
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logging();

    let token = match env::var("DISCORD_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            error!("DISCORD_TOKEN environment variable not found");
            eprintln!("❌ Lỗi: Không tìm thấy DISCORD_TOKEN trong biến môi trường!");
            eprintln!("💡 Hướng dẫn:");
            eprintln!("   1. Tạo file .env từ .env.example");
            eprintln!("   2. Thêm token bot Discord vào file .env");
            eprintln!("   3. Hoặc đặt biến môi trường DISCORD_TOKEN");
            std::process::exit(1);
        }
    };

    info!("Starting VouchBot (Rust Edition)...");

    let ready = Arc::new(AtomicBool::new(false));

    // Health check server for hosting platforms (Railway sets PORT)
    if env::var("RAILWAY_ENVIRONMENT").is_ok() || env::var("PORT").is_ok() {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        if let Err(e) = health::spawn(port, ready.clone()).await {
            error!("Failed to start health check server: {:?}", e);
        }
    }

    let config = ConfigStore::load("config.json");

    // Setup framework
    let ready_flag = ready.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: get_commands(),
            event_handler: |ctx, event, _framework, data| {
                Box::pin(features::feedback::handle_event(ctx, event, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx
                                .send(
                                    poise::CreateReply::default()
                                        .content(utils::messages::ERR_COMMAND)
                                        .ephemeral(true),
                                )
                                .await;
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready_event, framework| {
            Box::pin(async move {
                info!("Bot {} is ready! Registering commands...", ready_event.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully!");
                ready_flag.store(true, Ordering::Relaxed);

                Ok(Data {
                    config,
                    sessions: DashMap::new(),
                })
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MESSAGES;

    let mut client = match serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {:?}", e);
            std::process::exit(1);
        }
    };

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
