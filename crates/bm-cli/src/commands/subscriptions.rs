//! Subscription commands

use anyhow::Result;
use serde_json::json;

use bm_client::BitmessageClient;

use crate::output::{format_subscriptions, print_error, print_json, print_success};

/// List subscriptions
pub async fn subscriptions_list(client: &BitmessageClient, json: bool) -> Result<()> {
    let subscriptions = match client.subscriptions().list().await {
        Ok(s) => s,
        Err(e) => {
            print_error(&format!("Failed to list subscriptions: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&subscriptions);
    }

    println!("{}", format_subscriptions(&subscriptions));
    Ok(())
}

/// Subscribe to an address
pub async fn subscriptions_add(
    client: &BitmessageClient,
    address: &str,
    label: &str,
    json: bool,
) -> Result<()> {
    let reply = match client.subscriptions().subscribe(address, label).await {
        Ok(r) => r,
        Err(e) => {
            print_error(&format!("Failed to subscribe: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "address": address, "result": reply }));
    }

    print_success(&reply);
    Ok(())
}

/// Unsubscribe from an address
pub async fn subscriptions_remove(client: &BitmessageClient, address: &str, json: bool) -> Result<()> {
    let reply = match client.subscriptions().unsubscribe(address).await {
        Ok(r) => r,
        Err(e) => {
            print_error(&format!("Failed to unsubscribe: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "address": address, "result": reply }));
    }

    print_success(&reply);
    Ok(())
}
