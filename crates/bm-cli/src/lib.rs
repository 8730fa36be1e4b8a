//! bitmessage-cli: Command-line interface for the Bitmessage daemon API
//!
//! Provides the `bitmessage` binary for managing identities, reading and
//! sending messages and handling subscriptions on a running daemon.

pub mod commands;
pub mod output;
pub mod settings;
