//! Inbox commands

use anyhow::Result;
use serde_json::json;

use bm_client::BitmessageClient;

use crate::output::{format_inbox, format_inbox_message, print_error, print_json, print_success};

/// List received messages
pub async fn inbox_list(client: &BitmessageClient, unread_only: bool, json: bool) -> Result<()> {
    let mut messages = match client.messages().inbox().list().await {
        Ok(m) => m,
        Err(e) => {
            print_error(&format!("Failed to list inbox: {}", e));
            return Err(e.into());
        }
    };

    if unread_only {
        messages.retain(|m| !m.read);
    }

    if json {
        return print_json(&messages);
    }

    println!("{}", format_inbox(&messages));
    Ok(())
}

/// Show one received message, optionally changing its read flag
pub async fn inbox_show(
    client: &BitmessageClient,
    msgid: &str,
    read: Option<bool>,
    json: bool,
) -> Result<()> {
    let message = match client.messages().inbox().single(msgid, read).await {
        Ok(m) => m,
        Err(e) => {
            print_error(&format!("Failed to fetch message: {}", e));
            return Err(e.into());
        }
    };

    let Some(message) = message else {
        print_error(&format!("No inbox message with id {}", msgid));
        anyhow::bail!("message not found: {}", msgid);
    };

    if json {
        return print_json(&message);
    }

    println!("{}", format_inbox_message(&message));
    Ok(())
}

/// Move a received message to the trash
pub async fn inbox_trash(client: &BitmessageClient, msgid: &str, json: bool) -> Result<()> {
    let reply = match client.messages().inbox().move_to_trash(msgid).await {
        Ok(r) => r,
        Err(e) => {
            print_error(&format!("Failed to trash message: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "msgid": msgid, "result": reply }));
    }

    print_success(&reply);
    Ok(())
}
