//! Record schemas for daemon responses
//!
//! Every JSON-encoded result the daemon returns has an explicit schema here.
//! Free-text fields arrive base64-encoded and timestamps arrive as Unix
//! seconds; both are converted while deserializing, so a record that
//! deserializes successfully is already in its decoded form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::serde_utils::{base64_text, int_bool, unix_timestamp};

fn default_true() -> bool {
    true
}

fn default_encoding_type() -> u8 {
    2
}

/// An identity held by the daemon (`listAddresses`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Label shown in the daemon UI
    #[serde(default)]
    pub label: String,
    /// `BM-` address string
    pub address: String,
    /// Stream number
    #[serde(default)]
    pub stream: u32,
    /// Whether the identity is enabled
    #[serde(default = "default_true", deserialize_with = "int_bool::deserialize")]
    pub enabled: bool,
    /// Whether this is a chan address
    #[serde(default, deserialize_with = "int_bool::deserialize")]
    pub chan: bool,
}

/// A received message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessage {
    /// Message identifier (hex)
    pub msgid: String,
    /// Recipient address
    pub to_address: String,
    /// Sender address
    pub from_address: String,
    /// Subject line
    #[serde(deserialize_with = "base64_text::deserialize")]
    pub subject: String,
    /// Message body
    #[serde(deserialize_with = "base64_text::deserialize")]
    pub message: String,
    /// Message encoding type (2 = simple)
    #[serde(default = "default_encoding_type")]
    pub encoding_type: u8,
    /// When the daemon received the message
    #[serde(deserialize_with = "unix_timestamp::deserialize")]
    pub received_time: DateTime<Utc>,
    /// Whether the message has been read
    #[serde(default, deserialize_with = "int_bool::deserialize")]
    pub read: bool,
}

/// A message sent from one of the daemon's identities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    /// Message identifier (hex)
    pub msgid: String,
    /// Recipient address
    pub to_address: String,
    /// Sender address
    pub from_address: String,
    /// Subject line
    #[serde(deserialize_with = "base64_text::deserialize")]
    pub subject: String,
    /// Message body
    #[serde(deserialize_with = "base64_text::deserialize")]
    pub message: String,
    /// Message encoding type (2 = simple)
    #[serde(default = "default_encoding_type")]
    pub encoding_type: u8,
    /// Time of the last status change
    #[serde(deserialize_with = "unix_timestamp::deserialize")]
    pub last_action_time: DateTime<Utc>,
    /// Delivery status
    pub status: MessageStatus,
    /// Acknowledgement data identifying the message
    pub ack_data: String,
}

/// A broadcast subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Label for the subscription
    #[serde(deserialize_with = "base64_text::deserialize")]
    pub label: String,
    /// Address subscribed to
    pub address: String,
    /// Whether the subscription is active
    #[serde(default = "default_true", deserialize_with = "int_bool::deserialize")]
    pub enabled: bool,
}

/// Delivery status of a sent message or broadcast
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageStatus {
    NotFound,
    MsgQueued,
    BroadcastQueued,
    BroadcastSent,
    DoingPubkeyPow,
    AwaitingPubkey,
    DoingMsgPow,
    ForcePow,
    MsgSent,
    MsgSentNoAckExpected,
    AckReceived,
    TooDifficult,
    BadKey,
    /// Any status string this client does not know about
    Other(String),
}

impl MessageStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &str {
        match self {
            MessageStatus::NotFound => "notfound",
            MessageStatus::MsgQueued => "msgqueued",
            MessageStatus::BroadcastQueued => "broadcastqueued",
            MessageStatus::BroadcastSent => "broadcastsent",
            MessageStatus::DoingPubkeyPow => "doingpubkeypow",
            MessageStatus::AwaitingPubkey => "awaitingpubkey",
            MessageStatus::DoingMsgPow => "doingmsgpow",
            MessageStatus::ForcePow => "forcepow",
            MessageStatus::MsgSent => "msgsent",
            MessageStatus::MsgSentNoAckExpected => "msgsentnoackexpected",
            MessageStatus::AckReceived => "ackreceived",
            MessageStatus::TooDifficult => "toodifficult",
            MessageStatus::BadKey => "badkey",
            MessageStatus::Other(status) => status,
        }
    }

    /// Whether the message has left this node
    pub fn is_sent(&self) -> bool {
        matches!(
            self,
            MessageStatus::BroadcastSent
                | MessageStatus::MsgSent
                | MessageStatus::MsgSentNoAckExpected
                | MessageStatus::AckReceived
        )
    }
}

impl From<&str> for MessageStatus {
    fn from(s: &str) -> Self {
        match s {
            "notfound" => MessageStatus::NotFound,
            "msgqueued" => MessageStatus::MsgQueued,
            "broadcastqueued" => MessageStatus::BroadcastQueued,
            "broadcastsent" => MessageStatus::BroadcastSent,
            "doingpubkeypow" => MessageStatus::DoingPubkeyPow,
            "awaitingpubkey" => MessageStatus::AwaitingPubkey,
            "doingmsgpow" => MessageStatus::DoingMsgPow,
            "forcepow" => MessageStatus::ForcePow,
            "msgsent" => MessageStatus::MsgSent,
            "msgsentnoackexpected" => MessageStatus::MsgSentNoAckExpected,
            "ackreceived" => MessageStatus::AckReceived,
            "toodifficult" => MessageStatus::TooDifficult,
            "badkey" => MessageStatus::BadKey,
            other => MessageStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for MessageStatus {
    fn from(s: String) -> Self {
        MessageStatus::from(s.as_str())
    }
}

impl From<MessageStatus> for String {
    fn from(status: MessageStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters of `createDeterministicAddresses`, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicOptions {
    /// How many addresses to generate
    pub number_of_addresses: u32,
    /// Address version (0 lets the daemon choose)
    pub address_version: u32,
    /// Stream number (0 lets the daemon choose)
    pub stream: u32,
    /// Spend extra work for a shorter address
    pub eighteen_byte_ripe: bool,
    /// Proof-of-work difficulty multiplier demanded from senders
    pub total_difficulty: u32,
    /// Difficulty multiplier for small messages
    pub small_message_difficulty: u32,
}

impl Default for DeterministicOptions {
    fn default() -> Self {
        Self {
            number_of_addresses: 1,
            address_version: 0,
            stream: 0,
            eighteen_byte_ripe: false,
            total_difficulty: 1,
            small_message_difficulty: 1,
        }
    }
}

// ============================================================================
// Response envelopes
// ============================================================================

/// `listAddresses` result
#[derive(Debug, Clone, Deserialize)]
pub struct AddressList {
    pub addresses: Vec<Address>,
}

/// `createDeterministicAddresses` result
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedAddresses {
    pub addresses: Vec<String>,
}

/// `getAllInboxMessages` result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessageList {
    pub inbox_messages: Vec<InboxMessage>,
}

/// `getInboxMessageById` result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessageEnvelope {
    pub inbox_message: Vec<InboxMessage>,
}

/// `getAllSentMessages` result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessageList {
    pub sent_messages: Vec<SentMessage>,
}

/// `getSentMessageById` / `getSentMessageByAckData` result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessageEnvelope {
    pub sent_message: Vec<SentMessage>,
}

/// `listSubscriptions` result
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionList {
    pub subscriptions: Vec<Subscription>,
}
