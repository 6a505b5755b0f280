//! Command-line front end

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use roster_client::{AuthClient, EmployeeClient, HttpClient};
use shared::models::{EmployeeDraft, Shift};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::console::{Console, Notice};
use crate::render::render;
use crate::state::ActionKind;

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Employee administration console")]
pub struct Cli {
    /// Backend base URL [env: ROSTER_API_URL]
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token [env: ROSTER_TOKEN]
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Account whose PIN confirms actions [env: ROSTER_OPERATOR]
    #[arg(long, global = true)]
    pub operator: Option<String>,

    /// Request timeout in seconds [env: ROSTER_TIMEOUT_SECS]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List employees. A numeric query looks up a single id.
    List {
        query: Option<String>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create an employee with a login account
    Add {
        #[command(flatten)]
        draft: DraftArgs,
        #[command(flatten)]
        pin: PinArg,
    },
    /// Switch an employee between day and night shift
    Shift {
        username: String,
        #[command(flatten)]
        pin: PinArg,
    },
    /// Mark an employee as resigned
    Resign {
        username: String,
        #[command(flatten)]
        pin: PinArg,
    },
    /// Reset an employee
    Reset {
        username: String,
        #[command(flatten)]
        pin: PinArg,
    },
    /// Delete an employee record permanently
    Delete {
        username: String,
        #[command(flatten)]
        pin: PinArg,
    },
    /// Check that the backend answers
    Health,
    /// Log in and print a session token
    Login {
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct PinArg {
    /// Confirmation PIN; prompted for when omitted
    #[arg(long)]
    pub pin: Option<String>,
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long, default_value = "")]
    pub full_name: String,
    #[arg(long, default_value = "")]
    pub age: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "day")]
    pub shift: Shift,
}

impl From<DraftArgs> for EmployeeDraft {
    fn from(args: DraftArgs) -> Self {
        Self {
            full_name: args.full_name,
            username: args.username,
            age: args.age,
            address: args.address,
            phone: args.phone,
            shift: args.shift,
        }
    }
}

impl Cli {
    /// Environment values with command-line overrides applied
    pub fn apply_overrides(&self, mut config: ConsoleConfig) -> ConsoleConfig {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        if let Some(operator) = &self.operator {
            config.operator = operator.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config
    }
}

pub async fn run(cli: Cli, config: ConsoleConfig) -> anyhow::Result<()> {
    let client_config = config.client_config();
    let http: Arc<dyn HttpClient> = Arc::new(
        client_config
            .build_http_client()
            .context("Failed to build HTTP client")?,
    );
    debug!(api_url = %config.api_url, operator = %config.operator, "Console configured");

    let verifier = Arc::new(client_config.build_pin_verifier(http.clone())?);
    let mut console = Console::new(EmployeeClient::new(http.clone()), verifier);

    match cli.command {
        Command::List { query, json } => {
            let result = console.search(query.as_deref().unwrap_or_default()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(console.state().employees())?);
            } else {
                print!("{}", render(console.state()));
            }
            result?;
        }
        Command::Add { draft, pin } => {
            console.open_draft();
            console.edit_draft(draft.into())?;
            console.submit_draft()?;
            confirm(&mut console, pin.pin).await?;
        }
        Command::Shift { username, pin } => {
            row_action(&mut console, ActionKind::Shift, &username, pin.pin).await?;
        }
        Command::Resign { username, pin } => {
            row_action(&mut console, ActionKind::Resign, &username, pin.pin).await?;
        }
        Command::Reset { username, pin } => {
            row_action(&mut console, ActionKind::Reset, &username, pin.pin).await?;
        }
        Command::Delete { username, pin } => {
            row_action(&mut console, ActionKind::Remove, &username, pin.pin).await?;
        }
        Command::Health => {
            http.health().await.context("Backend unreachable")?;
            println!("ok ({})", config.api_url);
        }
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ").await?.unwrap_or_default(),
            };
            let session = AuthClient::new(http).login(&username, &password).await?;
            println!("{}", session.token);
        }
    }
    Ok(())
}

async fn row_action(
    console: &mut Console,
    kind: ActionKind,
    username: &str,
    pin: Option<String>,
) -> anyhow::Result<()> {
    console.reload().await?;
    console.request_action(kind, username)?;
    confirm(console, pin).await
}

/// How a confirmation ended when it did not fail
#[derive(Debug, PartialEq, Eq)]
enum Confirmation {
    Completed(Notice),
    Cancelled,
}

async fn confirm(console: &mut Console, pin: Option<String>) -> anyhow::Result<()> {
    match confirm_with(console, pin, || prompt("PIN: ")).await? {
        Confirmation::Completed(notice) => println!("{notice}"),
        Confirmation::Cancelled => println!("Cancelled"),
    }
    Ok(())
}

/// With `--pin` there is one attempt and a refused PIN cancels the action.
/// Otherwise `ask` is called until the PIN is accepted or returns an empty
/// line (or end of input), which cancels.
async fn confirm_with<F, Fut>(
    console: &mut Console,
    pin: Option<String>,
    mut ask: F,
) -> anyhow::Result<Confirmation>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<Option<String>>>,
{
    let interactive = pin.is_none();
    let mut pin = pin;
    loop {
        let entered = match pin.take() {
            Some(p) => p,
            None => match ask().await? {
                Some(p) if !p.trim().is_empty() => p,
                _ => {
                    console.cancel();
                    return Ok(Confirmation::Cancelled);
                }
            },
        };

        let notice = console.confirm(&entered).await?;
        if notice != Notice::PinRejected {
            return Ok(Confirmation::Completed(notice));
        }
        if !interactive {
            console.cancel();
            bail!("{notice}");
        }
        println!("{notice}");
    }
}

/// Read one line from stdin. `None` on end of input.
async fn prompt(label: &str) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    let read = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
