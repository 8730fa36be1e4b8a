//! Output formatting utilities for the CLI
//!
//! Tables for identities, messages and subscriptions, a detail view for a
//! single message, JSON output for `--json`, and colored status lines.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::{
    settings::{Style, Width},
    Table, Tabled,
};

use bm_core::types::{Address, InboxMessage, SentMessage, Subscription};

/// Widest subject column before truncation
const SUBJECT_WIDTH: usize = 40;

/// Format identities as an ASCII table
///
/// One row per identity with its label, address, stream number and the
/// enabled and chan flags. Empty labels show as a dash.
///
/// # Arguments
/// * `addresses` - Identities as returned by `listAddresses`
///
/// # Returns
/// A formatted string suitable for terminal output, or "No addresses" if the
/// list is empty.
pub fn format_addresses(addresses: &[Address]) -> String {
    if addresses.is_empty() {
        return "No addresses".to_string();
    }

    #[derive(Tabled)]
    struct AddressRow {
        #[tabled(rename = "LABEL")]
        label: String,
        #[tabled(rename = "ADDRESS")]
        address: String,
        #[tabled(rename = "STREAM")]
        stream: u32,
        #[tabled(rename = "ENABLED")]
        enabled: &'static str,
        #[tabled(rename = "CHAN")]
        chan: &'static str,
    }

    let rows: Vec<AddressRow> = addresses
        .iter()
        .map(|a| AddressRow {
            label: or_dash(&a.label),
            address: a.address.clone(),
            stream: a.stream,
            enabled: yes_no(a.enabled),
            chan: yes_no(a.chan),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format inbox messages as an ASCII table, newest first
///
/// Unread messages are marked with `*` in the first column. Message ids are
/// shortened and long subjects truncated so rows fit a terminal.
///
/// # Arguments
/// * `messages` - Decoded inbox records, in any order
///
/// # Returns
/// A formatted string suitable for terminal output, or "Inbox is empty" if
/// there are no messages.
pub fn format_inbox(messages: &[InboxMessage]) -> String {
    if messages.is_empty() {
        return "Inbox is empty".to_string();
    }

    #[derive(Tabled)]
    struct InboxRow {
        #[tabled(rename = "")]
        unread: &'static str,
        #[tabled(rename = "MSGID")]
        msgid: String,
        #[tabled(rename = "FROM")]
        from: String,
        #[tabled(rename = "SUBJECT")]
        subject: String,
        #[tabled(rename = "RECEIVED")]
        received: String,
    }

    let mut sorted: Vec<&InboxMessage> = messages.iter().collect();
    sorted.sort_by(|a, b| b.received_time.cmp(&a.received_time));

    let rows: Vec<InboxRow> = sorted
        .into_iter()
        .map(|m| InboxRow {
            unread: if m.read { " " } else { "*" },
            msgid: truncate(&m.msgid, 12),
            from: m.from_address.clone(),
            subject: truncate(&m.subject, SUBJECT_WIDTH),
            received: format_time(&m.received_time),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Width::wrap(140))
        .to_string()
}

/// Format sent messages as an ASCII table, ordered by last action, newest first
///
/// # Arguments
/// * `messages` - Decoded sent-folder records, in any order
///
/// # Returns
/// A formatted string suitable for terminal output, or "No sent messages" if
/// the list is empty.
pub fn format_sent(messages: &[SentMessage]) -> String {
    if messages.is_empty() {
        return "No sent messages".to_string();
    }

    #[derive(Tabled)]
    struct SentRow {
        #[tabled(rename = "MSGID")]
        msgid: String,
        #[tabled(rename = "TO")]
        to: String,
        #[tabled(rename = "SUBJECT")]
        subject: String,
        #[tabled(rename = "STATUS")]
        status: String,
        #[tabled(rename = "LAST ACTION")]
        last_action: String,
    }

    let mut sorted: Vec<&SentMessage> = messages.iter().collect();
    sorted.sort_by(|a, b| b.last_action_time.cmp(&a.last_action_time));

    let rows: Vec<SentRow> = sorted
        .into_iter()
        .map(|m| SentRow {
            msgid: truncate(&m.msgid, 12),
            to: m.to_address.clone(),
            subject: truncate(&m.subject, SUBJECT_WIDTH),
            status: m.status.to_string(),
            last_action: format_time(&m.last_action_time),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Width::wrap(140))
        .to_string()
}

/// Format broadcast subscriptions as an ASCII table
///
/// # Arguments
/// * `subscriptions` - Subscriptions as returned by `listSubscriptions`
///
/// # Returns
/// A formatted string, or "No subscriptions" if the list is empty.
pub fn format_subscriptions(subscriptions: &[Subscription]) -> String {
    if subscriptions.is_empty() {
        return "No subscriptions".to_string();
    }

    #[derive(Tabled)]
    struct SubscriptionRow {
        #[tabled(rename = "LABEL")]
        label: String,
        #[tabled(rename = "ADDRESS")]
        address: String,
        #[tabled(rename = "ENABLED")]
        enabled: &'static str,
    }

    let rows: Vec<SubscriptionRow> = subscriptions
        .iter()
        .map(|s| SubscriptionRow {
            label: or_dash(&s.label),
            address: s.address.clone(),
            enabled: yes_no(s.enabled),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format one received message with headers and body
///
/// # Arguments
/// * `message` - Decoded inbox record
///
/// # Returns
/// Aligned header lines, a blank line, then the full body untruncated.
pub fn format_inbox_message(message: &InboxMessage) -> String {
    let mut output = String::new();
    output.push_str(&format!("Message:  {}\n", message.msgid));
    output.push_str(&format!("From:     {}\n", message.from_address));
    output.push_str(&format!("To:       {}\n", message.to_address));
    output.push_str(&format!("Received: {}\n", format_time(&message.received_time)));
    output.push_str(&format!(
        "Read:     {}\n",
        if message.read { "yes" } else { "no" }
    ));
    output.push_str(&format!("Subject:  {}\n", message.subject));
    output.push('\n');
    output.push_str(&message.message);
    output
}

/// Format one sent message with headers and body
pub fn format_sent_message(message: &SentMessage) -> String {
    let mut output = String::new();
    output.push_str(&format!("Message:     {}\n", message.msgid));
    output.push_str(&format!("From:        {}\n", message.from_address));
    output.push_str(&format!("To:          {}\n", message.to_address));
    output.push_str(&format!("Status:      {}\n", message.status));
    output.push_str(&format!(
        "Last action: {}\n",
        format_time(&message.last_action_time)
    ));
    output.push_str(&format!("Ack data:    {}\n", message.ack_data));
    output.push_str(&format!("Subject:     {}\n", message.subject));
    output.push('\n');
    output.push_str(&message.message);
    output
}

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

/// Truncate to `max_len` characters with an ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a success message in green with a checkmark prefix
pub fn print_success(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Green),
        Print("✓ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an error message in red with an X prefix, on stderr
pub fn print_error(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Red),
        Print("✗ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a warning in yellow, on stderr
pub fn print_warning(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Yellow),
        Print("⚠ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an informational message in cyan
pub fn print_info(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("ℹ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}
