use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use adaptive_card_renderer::{
    AdaptiveCard, CardAction, CardRenderer, HostConfig, RenderedCard, SubmitError,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "adaptive-card-tester")]
#[command(about = "Render Adaptive Cards and inspect warnings and input values", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a card and print the UI outline, warnings and input values.
    Render {
        #[arg(long, value_name = "CARD_JSON")]
        card: PathBuf,
        #[arg(long, value_name = "HOST_CONFIG_JSON")]
        host_config: Option<PathBuf>,
        #[arg(long)]
        no_interactivity: bool,
    },
    /// Render a card, apply input edits and print the payload of a submit action.
    Submit {
        #[arg(long, value_name = "CARD_JSON")]
        card: PathBuf,
        #[arg(long, value_name = "HOST_CONFIG_JSON")]
        host_config: Option<PathBuf>,
        /// Action id or title; defaults to the first card action.
        #[arg(long)]
        action: Option<String>,
        /// Input edit as `id=value`; may be repeated.
        #[arg(long = "set", value_name = "ID=VALUE")]
        set: Vec<String>,
    },
    /// Print the default host config.
    HostConfig,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    };
    process::exit(exit_code);
}

fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    let _ = subscriber.try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render {
            card,
            host_config,
            no_interactivity,
        } => handle_render(&card, host_config.as_deref(), no_interactivity),
        Command::Submit {
            card,
            host_config,
            action,
            set,
        } => handle_submit(&card, host_config.as_deref(), action.as_deref(), &set),
        Command::HostConfig => print_json(
            &serde_json::to_value(HostConfig::default())
                .map_err(|err| CliError::Output(err.into()))?,
        ),
    }
}

fn handle_render(
    card_path: &Path,
    host_config_path: Option<&Path>,
    no_interactivity: bool,
) -> Result<(), CliError> {
    let card = load_card(card_path)?;
    let mut host_config = load_host_config(host_config_path)?;
    if no_interactivity {
        host_config.supports_interactivity = false;
    }
    let rendered = CardRenderer::new(host_config).render(&card);
    print_json(&render_report(&rendered))
}

fn handle_submit(
    card_path: &Path,
    host_config_path: Option<&Path>,
    action: Option<&str>,
    edits: &[String],
) -> Result<(), CliError> {
    let card = load_card(card_path)?;
    let host_config = load_host_config(host_config_path)?;
    let action = find_action(&card, action)?;
    let rendered = CardRenderer::new(host_config).render(&card);

    for edit in edits {
        let (id, raw) = edit
            .split_once('=')
            .ok_or_else(|| CliError::Usage(format!("`{edit}` is not of the form id=value")))?;
        let input = rendered
            .inputs
            .get(id)
            .ok_or_else(|| CliError::Usage(format!("card has no input `{id}`")))?;
        if !input.set_value_from_str(raw) {
            return Err(CliError::Usage(format!("`{raw}` is not a valid value for `{id}`")));
        }
        tracing::debug!(input = id, value = raw, "applied input edit");
    }

    match rendered.submit_payload(action) {
        Ok(payload) => print_json(&payload),
        Err(SubmitError::Validation(errors)) => {
            for error in &errors {
                eprintln!("invalid: {error}");
            }
            Err(CliError::Validation(errors.len()))
        }
        Err(err) => Err(CliError::Usage(err.to_string())),
    }
}

fn find_action<'c>(card: &'c AdaptiveCard, wanted: Option<&str>) -> Result<&'c CardAction, CliError> {
    let found = match wanted {
        Some(wanted) => card
            .actions
            .iter()
            .find(|action| action.id.as_deref() == Some(wanted) || action.title == wanted),
        None => card.actions.first(),
    };
    found.ok_or_else(|| {
        CliError::Usage(match wanted {
            Some(wanted) => format!("card has no action `{wanted}`"),
            None => "card has no actions".to_string(),
        })
    })
}

fn load_card(path: &Path) -> Result<AdaptiveCard, CliError> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))
        .map_err(|err| CliError::CardFile(path.to_path_buf(), err))?;
    AdaptiveCard::from_json_str(&raw).map_err(|err| CliError::CardParse(path.to_path_buf(), err.into()))
}

fn load_host_config(path: Option<&Path>) -> Result<HostConfig, CliError> {
    let Some(path) = path else {
        return Ok(HostConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))
        .map_err(|err| CliError::HostConfig(path.to_path_buf(), err))?;
    HostConfig::from_json_str(&raw).map_err(|err| CliError::HostConfig(path.to_path_buf(), err.into()))
}

fn render_report(rendered: &RenderedCard) -> Value {
    json!({
        "ui": rendered.root.outline(),
        "warnings": rendered.warnings,
        "inputs": rendered.inputs.values(),
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(|err| CliError::Output(err.into()))?;
    println!("{text}");
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("card file failed ({0}): {1}")]
    CardFile(PathBuf, #[source] anyhow::Error),
    #[error("card parse failed ({0}): {1}")]
    CardParse(PathBuf, #[source] anyhow::Error),
    #[error("host config failed ({0}): {1}")]
    HostConfig(PathBuf, #[source] anyhow::Error),
    #[error("{0}")]
    Usage(String),
    #[error("{0} input(s) failed validation")]
    Validation(usize),
    #[error("failed to write output: {0}")]
    Output(#[source] anyhow::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::CardFile(_, _) => 1,
            CliError::CardParse(_, _) => 1,
            CliError::HostConfig(_, _) => 1,
            CliError::Usage(_) => 2,
            CliError::Validation(_) => 3,
            CliError::Output(_) => 4,
        }
    }
}
