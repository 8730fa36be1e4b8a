//! Connectivity checks against the daemon's test methods

use anyhow::Result;
use serde_json::json;

use bm_client::BitmessageClient;

use crate::output::{print_error, print_json};

/// Ask the daemon to add two numbers
pub async fn test_add(client: &BitmessageClient, a: i64, b: i64, json: bool) -> Result<()> {
    let sum = match client.test().add(a, b).await {
        Ok(s) => s,
        Err(e) => {
            print_error(&format!("Call failed: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "result": sum }));
    }

    println!("{}", sum);
    Ok(())
}

/// Ask the daemon to join two words
pub async fn test_hello(client: &BitmessageClient, word: &str, word2: &str, json: bool) -> Result<()> {
    let greeting = match client.test().hello(word, word2).await {
        Ok(g) => g,
        Err(e) => {
            print_error(&format!("Call failed: {}", e));
            print_error(&format!("Is the daemon API enabled at {}?", client.endpoint()));
            return Err(e.into());
        }
    };

    if json {
        return print_json(&json!({ "result": greeting }));
    }

    println!("{}", greeting);
    Ok(())
}
