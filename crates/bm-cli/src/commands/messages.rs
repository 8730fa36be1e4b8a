//! Sending and delivery status

use std::io::Read;

use anyhow::{Context, Result};
use serde_json::json;

use bm_client::BitmessageClient;

use crate::output::{print_error, print_info, print_json, print_success};

/// Send a message; reads the body from stdin when none is given
pub async fn send_command(
    client: &BitmessageClient,
    to: &str,
    from: &str,
    subject: &str,
    body: Option<&str>,
    json: bool,
) -> Result<()> {
    let body = read_body(body)?;

    let ack = match client.messages().send(to, from, subject, &body).await {
        Ok(a) => a,
        Err(e) => {
            print_error(&format!("Failed to send message: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "ackData": ack }));
    }

    print_success(&format!("Message queued to {}", to));
    print_info(&format!("Ack data: {}", ack));
    Ok(())
}

/// Send a broadcast; reads the body from stdin when none is given
pub async fn broadcast_command(
    client: &BitmessageClient,
    from: &str,
    subject: &str,
    body: Option<&str>,
    json: bool,
) -> Result<()> {
    let body = read_body(body)?;

    let ack = match client.messages().broadcast(from, subject, &body).await {
        Ok(a) => a,
        Err(e) => {
            print_error(&format!("Failed to send broadcast: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "ackData": ack }));
    }

    print_success("Broadcast queued");
    print_info(&format!("Ack data: {}", ack));
    Ok(())
}

/// Show the delivery status for an ack
pub async fn status_command(client: &BitmessageClient, ack_data: &str, json: bool) -> Result<()> {
    let status = match client.messages().status(ack_data).await {
        Ok(s) => s,
        Err(e) => {
            print_error(&format!("Failed to get status: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "ackData": ack_data, "status": status, "sent": status.is_sent() }));
    }

    println!("{}", status);
    Ok(())
}

fn read_body(body: Option<&str>) -> Result<String> {
    match body {
        Some(body) => Ok(body.to_string()),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read message body from stdin")?;
            Ok(buffer)
        }
    }
}
