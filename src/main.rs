mod cli;

use clap::Parser;
use cli::{Cli, Clock, Commands, TimeCommand, WhitelistCommand};
use mc_console_config::{ConfigManager, LogLevel};
use mc_console_manager::prelude::*;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fmt::Display;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config_manager = match cli.config_dir.as_deref() {
        Some(dir) => ConfigManager::from_dir(Some(dir)),
        None => ConfigManager::new(),
    }
    .into_diagnostic()?;
    if cli.verbose {
        let logging = &mut config_manager.config_mut().logging;
        logging.log_level = LogLevel::Debug;
        logging.log_to_stderr = true;
    }

    let _guards = mc_console_core::logging::tracing(&config_manager.log_dir(), &config_manager.config().logging)
        .into_diagnostic()?;

    info!("Using configuration directory: {}", config_manager.config_dir().display());
    config_manager.config().validate().into_diagnostic()?;

    let manager = ConsoleManager::from_config(config_manager.config()).into_diagnostic()?;
    let outcome = run(&manager, cli.command, cli.json).await;
    if let Err(e) = &outcome {
        error!("Command failed: {}", e);
    }

    manager.close().await.into_diagnostic()?;
    outcome.into_diagnostic()
}

async fn run(manager: &ConsoleManager, command: Commands, json: bool) -> mc_console_core::Result<()> {
    match command {
        Commands::Players => {
            let players = manager.players().online().await?;
            let text = format!(
                "{}/{} online: {}",
                players.online_count,
                players.max_count,
                players.player_names.join(", ")
            );
            emit(json, &players, text);
        }
        Commands::Kick { name, reason } => {
            let reason = reason.join(" ");
            let response = manager.players().kick(&name, Some(reason.as_str())).await?;
            emit_response(json, response);
        }
        Commands::Whitelist { action } => {
            let whitelist = manager.whitelist();
            match action {
                WhitelistCommand::List => {
                    let roster = whitelist.list().await?;
                    let text = format!("{} whitelisted: {}", roster.count, roster.player_names.join(", "));
                    emit(json, &roster, text);
                }
                WhitelistCommand::Add { name } => {
                    let change = whitelist.add(&name).await?;
                    emit(json, &change, describe(&change));
                }
                WhitelistCommand::Remove { name } => {
                    let change = whitelist.remove(&name).await?;
                    emit(json, &change, describe(&change));
                }
            }
        }
        Commands::Time { action } => {
            let time = manager.time();
            match action {
                TimeCommand::Query { clock } => {
                    let ticks = match clock {
                        Clock::Daytime => time.daytime().await?,
                        Clock::Gametime => time.gametime().await?,
                        Clock::Day => GameTicks(time.day().await?),
                    };
                    emit(json, &ticks, ticks);
                }
                TimeCommand::Set { value } => {
                    let response = time.set(value.parse()?).await?;
                    emit_response(json, response);
                }
                TimeCommand::Add { ticks } => {
                    let response = time.add(GameTicks(ticks)).await?;
                    emit_response(json, response);
                }
            }
        }
        Commands::Difficulty { level: Some(level) } => {
            let response = manager.world().set_difficulty(&level).await?;
            emit_response(json, response);
        }
        Commands::Difficulty { level: None } => {
            let level = manager.world().difficulty().await?;
            emit(json, &level, &level);
        }
        Commands::Stats => {
            let stats = manager.world().stats().await?;
            let text = format!(
                "Day {} ({}), difficulty {}",
                stats.day, stats.day_phase, stats.difficulty
            );
            emit(json, &stats, text);
        }
        Commands::Weather { kind, duration } => {
            let response = manager.world().set_weather(kind.parse()?, duration).await?;
            emit_response(json, response);
        }
        Commands::Say { message } => {
            let response = manager.world().say(&message.join(" ")).await?;
            emit_response(json, response);
        }
        Commands::Save => {
            let response = manager.world().save().await?;
            emit_response(json, response);
        }
        Commands::Exec { command } => {
            let response = manager.commands().execute(&command.join(" ")).await?;
            emit_response(json, response);
        }
    }

    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl Display) {
    if !json {
        println!("{}", text);
        return;
    }

    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => error!("Failed to render JSON output: {}", e),
    }
}

fn describe(change: &WhitelistChange) -> String {
    match change {
        WhitelistChange::Added(name) => format!("Added {} to the whitelist", name),
        WhitelistChange::Removed(name) => format!("Removed {} from the whitelist", name),
        WhitelistChange::AlreadyWhitelisted => "Player is already whitelisted".to_string(),
        WhitelistChange::NotWhitelisted => "Player is not whitelisted".to_string(),
        WhitelistChange::UnknownPlayer => "That player does not exist".to_string(),
    }
}

#[derive(Serialize)]
struct RawResponse {
    response: String,
}

fn emit_response(json: bool, response: String) {
    let response = RawResponse { response };
    emit(json, &response, &response.response);
}
