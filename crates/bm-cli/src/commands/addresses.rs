//! Address commands

use anyhow::Result;
use serde_json::json;

use bm_client::BitmessageClient;

use crate::output::{format_addresses, print_error, print_json, print_success, print_warning};

/// List identities
pub async fn addresses_list(client: &BitmessageClient, json: bool) -> Result<()> {
    let addresses = match client.addresses().list().await {
        Ok(a) => a,
        Err(e) => {
            print_error(&format!("Failed to list addresses: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&addresses);
    }

    println!("{}", format_addresses(&addresses));
    Ok(())
}

/// Create a random identity
pub async fn addresses_create_random(
    client: &BitmessageClient,
    label: &str,
    json: bool,
) -> Result<()> {
    let address = match client.addresses().create_random(label).await {
        Ok(a) => a,
        Err(e) => {
            print_error(&format!("Failed to create address: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "address": address }));
    }

    print_success(&format!("Created {}", address));
    Ok(())
}

/// Create a deterministic identity from a passphrase
pub async fn addresses_create_deterministic(
    client: &BitmessageClient,
    passphrase: &str,
    json: bool,
) -> Result<()> {
    let address = match client.addresses().create_deterministic(passphrase).await {
        Ok(a) => a,
        Err(e) => {
            print_error(&format!("Failed to create deterministic address: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "address": address }));
    }

    match address {
        Some(address) => print_success(&format!("Created {}", address)),
        None => print_warning("No new address generated; the daemon may already hold it"),
    }
    Ok(())
}

/// Compute the deterministic address for a passphrase
pub async fn addresses_get_deterministic(
    client: &BitmessageClient,
    passphrase: &str,
    json: bool,
) -> Result<()> {
    let address = match client.addresses().get_deterministic(passphrase).await {
        Ok(a) => a,
        Err(e) => {
            print_error(&format!("Failed to compute address: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "address": address }));
    }

    println!("{}", address);
    Ok(())
}
