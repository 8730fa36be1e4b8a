//! Sent folder commands

use anyhow::Result;
use serde_json::json;

use bm_client::{BitmessageClient, SentMessage};

use crate::output::{format_sent, format_sent_message, print_error, print_json, print_success};

/// List sent messages
pub async fn sent_list(client: &BitmessageClient, json: bool) -> Result<()> {
    let messages = match client.messages().sent().list().await {
        Ok(m) => m,
        Err(e) => {
            print_error(&format!("Failed to list sent messages: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&messages);
    }

    println!("{}", format_sent(&messages));
    Ok(())
}

/// Show one sent message by message id
pub async fn sent_show(client: &BitmessageClient, msgid: &str, json: bool) -> Result<()> {
    let message = match client.messages().sent().single(msgid).await {
        Ok(m) => m,
        Err(e) => {
            print_error(&format!("Failed to fetch message: {}", e));
            return Err(e.into());
        }
    };

    show(message, msgid, json)
}

/// Show one sent message by ack data
pub async fn sent_show_by_ack(client: &BitmessageClient, ack_data: &str, json: bool) -> Result<()> {
    let message = match client.messages().sent().single_by_ack(ack_data).await {
        Ok(m) => m,
        Err(e) => {
            print_error(&format!("Failed to fetch message: {}", e));
            return Err(e.into());
        }
    };

    show(message, ack_data, json)
}

/// Move a sent message to the trash, by ack data
pub async fn sent_trash(client: &BitmessageClient, ack_data: &str, json: bool) -> Result<()> {
    let reply = match client.messages().sent().move_to_trash_by_ack(ack_data).await {
        Ok(r) => r,
        Err(e) => {
            print_error(&format!("Failed to trash message: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "ackData": ack_data, "result": reply }));
    }

    print_success(&reply);
    Ok(())
}

fn show(message: Option<SentMessage>, key: &str, json: bool) -> Result<()> {
    let Some(message) = message else {
        print_error(&format!("No sent message matching {}", key));
        anyhow::bail!("message not found: {}", key);
    };

    if json {
        return print_json(&message);
    }

    println!("{}", format_sent_message(&message));
    Ok(())
}
