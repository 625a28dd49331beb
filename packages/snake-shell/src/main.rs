//! Snake Shell - terminal host for the SnakeEngine.AI application shell.
//!
//! Plays every external collaborator of the shell: the auth page, the
//! sidebar, the feature views and a stand-in generative backend. Commands
//! are read line by line from stdin and the resulting screen is printed
//! after each one.

mod commands;
mod echo;
mod views;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use snake_core::{Action, AppShell, I18n, Message, ShellConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::Command;
use echo::EchoHandle;

#[derive(Parser)]
#[command(name = "snake-shell")]
#[command(about = "SnakeEngine.AI shell in the terminal")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $SNAKE_SHELL_CONFIG or ~/.snakeengine/shell.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog locale, overriding config and environment
    #[arg(short, long)]
    locale: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(ShellConfig::default_path);
    let config = ShellConfig::load_from_path(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let i18n = match cli.locale.as_deref().or(config.locale.as_deref()) {
        Some(locale) => I18n::for_locale(locale),
        None => I18n::detect(),
    };
    tracing::info!("Starting Snake Shell (locale {})", i18n.locale());

    let router = views::text_router(&i18n).context("failed to build view router")?;
    let backend = EchoHandle::new();
    let mut shell = AppShell::new(config, i18n).with_invalidator(backend.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", views::render_screen(shell.render(&router), shell.i18n()))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}. Type `help` for commands.")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", commands::HELP)?;
                continue;
            }
            Command::State => {
                writeln!(out, "{}", shell.snapshot_json()?)?;
                continue;
            }
            Command::Dispatch(action) => {
                shell.dispatch(action);
            }
            Command::Say(text) => say(&mut shell, &backend, &text),
            Command::Title(title) => {
                if let Some(id) = shell.active_conversation_id().cloned() {
                    shell.dispatch(Action::SetTitle {
                        conversation_id: id,
                        title,
                    });
                }
            }
        }

        writeln!(out, "{}", views::render_screen(shell.render(&router), shell.i18n()))?;
    }

    tracing::info!("Snake Shell exiting");
    Ok(())
}

/// Send `text` in the active conversation and append the backend's reply.
fn say(shell: &mut AppShell, backend: &EchoHandle, text: &str) {
    let Some(conversation) = shell.active_conversation() else {
        tracing::warn!("No active conversation to send to");
        return;
    };

    let id = conversation.id.clone();
    let user_message = Message::user(conversation.next_message_id(), text);
    if !shell.dispatch(Action::AppendMessage {
        conversation_id: id.clone(),
        message: user_message,
    }) {
        return;
    }

    let reply = backend.reply(&id, conversation.persona.as_deref(), text);
    tracing::debug!("Echo session for {} at turn {}", id, backend.turns(&id));
    let reply_id = shell
        .active_conversation()
        .map(|c| c.next_message_id())
        .unwrap_or_else(|| format!("{id}-reply"));
    shell.dispatch(Action::AppendMessage {
        conversation_id: id,
        message: Message::ai(reply_id, reply),
    });
}
