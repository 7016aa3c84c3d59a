//! Interactive command-line surface for Planwise.
//!
//! Reads one question per line, prints `Bot: <answer>` on stdout, and keeps
//! diagnostics on stderr.
//!
//! # Commands
//!
//! - `/help` shows available commands
//! - `/history` shows the conversation sent to the model
//! - `/clear` forgets the conversation
//! - `/lookup <entity>` queries the lookup tool directly
//! - `exit`, `quit`, or Ctrl+D leaves

#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "the REPL talks to the terminal"
)]

mod args;
mod repl;

pub use args::Cli;

use clap::Parser;
use planwise_agent::aggregate::title_case;
use planwise_agent::{Session, TurnController};
use planwise_model_providers::OllamaProvider;
use planwise_models::ModelRegistry;
use planwise_models::error::CreateModelError;
use planwise_tools::{LookupTool, ToolError, ToolRegistry};
use repl::{STYLE_RED, STYLE_RESET};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::process::ExitCode;
use std::sync::Arc;

/// Errors that stop the CLI before the first prompt.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The model identifier could not be resolved.
    #[error(transparent)]
    Model(#[from] CreateModelError),
    /// The configured lookup tool is not registered.
    #[error(transparent)]
    Tool(#[from] ToolError),
    /// The terminal line editor could not be opened.
    #[error("failed to open line editor: {0}")]
    Editor(#[from] ReadlineError),
}

/// Parses arguments, runs the REPL, and reports startup failures.
pub async fn run() -> ExitCode {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    cli.tracing().init();

    match start(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{STYLE_RED}Error: {err}{STYLE_RESET}");
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: &Cli) -> Result<(), StartupError> {
    let app = build_app(cli)?;
    let editor = DefaultEditor::new()?;

    let label = &app.controller.aggregator().measure().entity_label;
    repl::print_banner(&cli.model, label, &app.known, &app.tools.definitions());
    let tool = app.controller.config().tool.clone();
    repl::run(Session::new(app.controller), &app.tools, &tool, editor).await;
    Ok(())
}

/// Everything the REPL needs, wired from the arguments.
#[derive(Debug)]
struct App {
    controller: TurnController,
    tools: ToolRegistry,
    /// Display names of the entities the lookup tool knows.
    known: Vec<String>,
}

/// Wires the model, the lookup tool, and the agent.
fn build_app(cli: &Cli) -> Result<App, StartupError> {
    let config = cli.agent_config();

    let provider = match &cli.ollama_host {
        Some(host) => OllamaProvider::from_host(host),
        None => OllamaProvider::from_env(),
    };
    tracing::debug!(base_url = provider.base_url(), "ollama provider configured");

    let mut models = ModelRegistry::new();
    models.register_llm_provider("ollama", Arc::new(provider));
    let llm = models.llm(&config.model_id)?;

    let weather = LookupTool::weather();
    let known = weather.table().entities().map(title_case).collect();
    let mut tools = ToolRegistry::new();
    tools.register(weather);
    let tool = tools
        .get_shared(&config.tool)
        .ok_or_else(|| ToolError::unknown_tool(&config.tool))?;

    tracing::info!(
        model = %config.model_id,
        max_attempts = config.max_attempts,
        timeout = ?config.request_timeout,
        tools = ?tools.names(),
        "session configured"
    );
    Ok(App {
        controller: TurnController::new(llm, tool, config),
        tools,
        known,
    })
}
