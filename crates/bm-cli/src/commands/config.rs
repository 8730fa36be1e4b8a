//! Config command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bm_core::config;

use crate::output::{print_error, print_info, print_success, print_warning};

fn resolve_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_config_path)
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Print the config file, with the password masked
pub fn config_show(config_path: Option<&Path>) -> Result<()> {
    let path = resolve_path(config_path);

    if !path.exists() {
        print_warning(&format!("No configuration file found at {:?}", path));
        print_info("Run 'bitmessage config init' to create one");
        return Ok(());
    }

    print_info(&format!("Configuration file: {:?}", path));
    println!();

    let mut table = read_table(&path)?;
    if let Some(password) = table
        .get_mut("connection")
        .and_then(|v| v.as_table_mut())
        .and_then(|t| t.get_mut("password"))
    {
        *password = toml::Value::String("********".to_string());
    }

    println!("{}", toml::to_string_pretty(&table)?);
    Ok(())
}

/// Print one value by dotted key, e.g. `connection.port`
pub fn config_get(config_path: Option<&Path>, key: &str) -> Result<()> {
    let path = resolve_path(config_path);

    if !path.exists() {
        print_error(&format!("Config file not found: {:?}", path));
        print_info("Run 'bitmessage config init' to create one");
        anyhow::bail!("config file not found");
    }

    let table = read_table(&path)?;
    let Some(value) = lookup(&table, key) else {
        print_error(&format!("Key not found: {}", key));
        anyhow::bail!("key not found: {}", key);
    };

    match value {
        toml::Value::String(s) => println!("{}", s),
        toml::Value::Table(_) => println!("{}", toml::to_string_pretty(value)?),
        other => println!("{}", other),
    }
    Ok(())
}

/// Set one value by dotted key, creating the file if needed
///
/// Bare `true`/`false` and integers are stored typed unless the field only
/// accepts text, so `connection.password 123456` stays a string.
pub fn config_set(config_path: Option<&Path>, key: &str, value: &str) -> Result<()> {
    let path = resolve_path(config_path);

    if !path.exists() {
        print_info("Creating default configuration...");
        config_init(Some(path.as_path()), false)?;
    }

    let mut table = read_table(&path)?;
    let typed = parse_value(value);
    let is_text = typed.is_str();
    insert(&mut table, key, typed)?;
    if !is_text && validate(&table).is_err() {
        insert(&mut table, key, toml::Value::String(value.to_string()))?;
    }

    // Reject edits that no longer load as a config file
    validate(&table).with_context(|| format!("Invalid value for {}: {}", key, value))?;
    config::save_config(&path, &table)?;

    print_success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn validate(table: &toml::Table) -> Result<config::ConfigFile, toml::de::Error> {
    toml::Value::Table(table.clone()).try_into()
}

/// Write a default configuration file
pub fn config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_path(config_path);

    if path.exists() && !force {
        print_error(&format!("Config file already exists: {:?}", path));
        print_info("Use --force to overwrite");
        return Ok(());
    }

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {:?}", dir))?;
            print_success(&format!("Created config directory: {:?}", dir));
        }
    }

    std::fs::write(&path, default_config_template())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    print_success(&format!("Created configuration file: {:?}", path));
    print_info("Set the API credentials from keys.dat with 'bitmessage config set'");
    Ok(())
}

/// Print the config file location
pub fn config_path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", resolve_path(config_path).display());
    Ok(())
}

fn lookup<'a>(table: &'a toml::Table, key: &str) -> Option<&'a toml::Value> {
    let mut parts = key.split('.');
    let mut current = table.get(parts.next()?)?;
    for part in parts {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

fn insert(table: &mut toml::Table, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        anyhow::bail!("Invalid key: {}", key);
    };
    if last.is_empty() {
        anyhow::bail!("Invalid key: {}", key);
    }

    let mut current = table;
    for part in parents {
        current = current
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()))
            .as_table_mut()
            .ok_or_else(|| anyhow::anyhow!("Cannot navigate to key: {}", key))?;
    }

    current.insert(last.to_string(), value);
    Ok(())
}

fn parse_value(value: &str) -> toml::Value {
    if value == "true" {
        toml::Value::Boolean(true)
    } else if value == "false" {
        toml::Value::Boolean(false)
    } else if let Ok(i) = value.parse::<i64>() {
        toml::Value::Integer(i)
    } else {
        toml::Value::String(value.to_string())
    }
}

fn default_config_template() -> String {
    format!(
        r#"# Bitmessage API client configuration
# Credentials match apiusername / apipassword in the daemon's keys.dat

[connection]
host = "127.0.0.1"
port = {}
username = ""
password = ""

[options]
# Seconds before a call is abandoned; unset waits indefinitely
# request_timeout = 30
# connect_timeout = 5
use_tls = false
"#,
        config::DEFAULT_API_PORT
    )
}
