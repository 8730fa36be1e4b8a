//! Bitmessage CLI
//!
//! Talks to a running Bitmessage daemon over its XML-RPC API:
//! - Identities (list, random and deterministic creation)
//! - Inbox and sent folder
//! - Sending messages and broadcasts, delivery status
//! - Broadcast subscriptions

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bitmessage_cli::commands;
use bitmessage_cli::settings::{self, ConnectionOverrides};
use bm_client::BitmessageClient;

#[derive(Parser)]
#[command(name = "bitmessage")]
#[command(author, version, about = "Command-line client for the Bitmessage daemon API")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Daemon host (overrides config)
    #[arg(long, global = true, env = "BITMESSAGE_HOST")]
    host: Option<String>,

    /// Daemon API port (overrides config)
    #[arg(long, global = true, env = "BITMESSAGE_PORT")]
    port: Option<u16>,

    /// API username (overrides config)
    #[arg(long, global = true, env = "BITMESSAGE_USER")]
    user: Option<String>,

    /// API password (overrides config)
    #[arg(long, global = true, env = "BITMESSAGE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Remote(RemoteCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigAction),
}

/// Commands that call the daemon
#[derive(Subcommand)]
enum RemoteCommand {
    /// Manage identities
    #[command(subcommand, alias = "addr")]
    Addresses(AddressAction),

    /// Read received messages
    #[command(subcommand)]
    Inbox(InboxAction),

    /// Read sent messages
    #[command(subcommand)]
    Sent(SentAction),

    /// Send a message to an address
    Send {
        /// Recipient address
        to: String,
        /// Sending identity
        from: String,
        /// Subject line
        subject: String,
        /// Message body (read from stdin if omitted)
        body: Option<String>,
    },

    /// Send a broadcast to subscribers
    Broadcast {
        /// Sending identity
        from: String,
        /// Subject line
        subject: String,
        /// Message body (read from stdin if omitted)
        body: Option<String>,
    },

    /// Show the delivery status of a sent message
    Status {
        /// Ack data returned when the message was sent
        ack_data: String,
    },

    /// Manage broadcast subscriptions
    #[command(subcommand, alias = "subs")]
    Subscriptions(SubscriptionAction),

    /// Check connectivity with the daemon's test methods
    #[command(subcommand)]
    Test(TestAction),
}

#[derive(Subcommand)]
enum AddressAction {
    /// List identities
    List,
    /// Create a random identity
    CreateRandom {
        /// Label for the new identity
        label: String,
    },
    /// Create a deterministic identity from a passphrase
    CreateDeterministic {
        /// Passphrase the address is derived from
        passphrase: String,
    },
    /// Compute the deterministic address of a passphrase without storing it
    GetDeterministic {
        /// Passphrase the address is derived from
        passphrase: String,
    },
}

#[derive(Subcommand)]
enum InboxAction {
    /// List received messages
    List {
        /// Only show unread messages
        #[arg(short, long)]
        unread: bool,
    },
    /// Show one message
    Show {
        /// Message id
        msgid: String,
        /// Mark the message read
        #[arg(long, conflicts_with = "mark_unread")]
        mark_read: bool,
        /// Mark the message unread
        #[arg(long)]
        mark_unread: bool,
    },
    /// Move a message to the trash
    Trash {
        /// Message id
        msgid: String,
    },
}

#[derive(Subcommand)]
enum SentAction {
    /// List sent messages
    List,
    /// Show one message by message id
    Show {
        /// Message id
        msgid: String,
    },
    /// Show one message by ack data
    ShowAck {
        /// Ack data
        ack_data: String,
    },
    /// Move a message to the trash, by ack data
    Trash {
        /// Ack data
        ack_data: String,
    },
}

#[derive(Subcommand)]
enum SubscriptionAction {
    /// List subscriptions
    List,
    /// Subscribe to broadcasts from an address
    Add {
        /// Address to subscribe to
        address: String,
        /// Label for the subscription
        #[arg(default_value = "")]
        label: String,
    },
    /// Remove a subscription
    Remove {
        /// Address to unsubscribe from
        address: String,
    },
}

#[derive(Subcommand)]
enum TestAction {
    /// Add two integers on the daemon
    Add {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
    /// Join two words on the daemon
    Hello {
        #[arg(default_value = "hello")]
        word: String,
        #[arg(default_value = "world")]
        word2: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Get specific config value
    Get { key: String },
    /// Set config value
    Set { key: String, value: String },
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        // Config commands work on the file and never contact the daemon
        Commands::Config(action) => match action {
            ConfigAction::Show => commands::config_show(config_path),
            ConfigAction::Get { key } => commands::config_get(config_path, &key),
            ConfigAction::Set { key, value } => commands::config_set(config_path, &key, &value),
            ConfigAction::Init { force } => commands::config_init(config_path, force),
            ConfigAction::Path => commands::config_path(config_path),
        },

        Commands::Remote(command) => {
            let overrides = ConnectionOverrides {
                host: cli.host,
                port: cli.port,
                username: cli.user,
                password: cli.password,
            };
            let config = settings::resolve(config_path, &overrides)?;
            let client = BitmessageClient::from_config(&config)?;
            run_remote(command, &client, cli.json).await
        }
    }
}

async fn run_remote(command: RemoteCommand, client: &BitmessageClient, json: bool) -> Result<()> {
    match command {
        RemoteCommand::Addresses(action) => match action {
            AddressAction::List => commands::addresses_list(client, json).await,
            AddressAction::CreateRandom { label } => {
                commands::addresses_create_random(client, &label, json).await
            }
            AddressAction::CreateDeterministic { passphrase } => {
                commands::addresses_create_deterministic(client, &passphrase, json).await
            }
            AddressAction::GetDeterministic { passphrase } => {
                commands::addresses_get_deterministic(client, &passphrase, json).await
            }
        },

        RemoteCommand::Inbox(action) => match action {
            InboxAction::List { unread } => commands::inbox_list(client, unread, json).await,
            InboxAction::Show {
                msgid,
                mark_read,
                mark_unread,
            } => {
                let read = match (mark_read, mark_unread) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                commands::inbox_show(client, &msgid, read, json).await
            }
            InboxAction::Trash { msgid } => commands::inbox_trash(client, &msgid, json).await,
        },

        RemoteCommand::Sent(action) => match action {
            SentAction::List => commands::sent_list(client, json).await,
            SentAction::Show { msgid } => commands::sent_show(client, &msgid, json).await,
            SentAction::ShowAck { ack_data } => {
                commands::sent_show_by_ack(client, &ack_data, json).await
            }
            SentAction::Trash { ack_data } => commands::sent_trash(client, &ack_data, json).await,
        },

        RemoteCommand::Send {
            to,
            from,
            subject,
            body,
        } => commands::send_command(client, &to, &from, &subject, body.as_deref(), json).await,

        RemoteCommand::Broadcast {
            from,
            subject,
            body,
        } => commands::broadcast_command(client, &from, &subject, body.as_deref(), json).await,

        RemoteCommand::Status { ack_data } => commands::status_command(client, &ack_data, json).await,

        RemoteCommand::Subscriptions(action) => match action {
            SubscriptionAction::List => commands::subscriptions_list(client, json).await,
            SubscriptionAction::Add { address, label } => {
                commands::subscriptions_add(client, &address, &label, json).await
            }
            SubscriptionAction::Remove { address } => {
                commands::subscriptions_remove(client, &address, json).await
            }
        },

        RemoteCommand::Test(action) => match action {
            TestAction::Add { a, b } => commands::test_add(client, a, b, json).await,
            TestAction::Hello { word, word2 } => {
                commands::test_hello(client, &word, &word2, json).await
            }
        },
    }
}
