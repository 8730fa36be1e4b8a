//! Message operations: inbox, sent folder, sending and status

use bm_core::encoding::to_base64;
use bm_core::types::{
    InboxMessage, InboxMessageEnvelope, InboxMessageList, MessageStatus, SentMessage,
    SentMessageEnvelope, SentMessageList,
};
use bm_core::Result;

use crate::dispatcher::{expect_string, CallDescriptor, Dispatcher};

/// Messages held by the daemon
pub struct Messages<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Messages<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Received messages
    pub fn inbox(&self) -> Inbox<'a> {
        Inbox {
            dispatcher: self.dispatcher,
        }
    }

    /// Sent messages
    pub fn sent(&self) -> Sent<'a> {
        Sent {
            dispatcher: self.dispatcher,
        }
    }

    /// Queue a message and return its ack data
    pub async fn send(
        &self,
        to_address: &str,
        from_address: &str,
        subject: &str,
        message: &str,
    ) -> Result<String> {
        let descriptor = CallDescriptor::new("sendMessage")
            .arg(to_address)
            .arg(from_address)
            .arg(to_base64(subject))
            .arg(to_base64(message))
            .raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("sendMessage", value)
    }

    /// Queue a broadcast and return its ack data
    pub async fn broadcast(&self, from_address: &str, subject: &str, message: &str) -> Result<String> {
        let descriptor = CallDescriptor::new("sendBroadcast")
            .arg(from_address)
            .arg(to_base64(subject))
            .arg(to_base64(message))
            .raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("sendBroadcast", value)
    }

    /// Delivery status of a sent message, by ack data
    pub async fn status(&self, ack_data: &str) -> Result<MessageStatus> {
        let descriptor = CallDescriptor::new("getStatus").arg(ack_data).raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("getStatus", value).map(MessageStatus::from)
    }
}

/// Received messages
pub struct Inbox<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Inbox<'a> {
    /// List every inbox message
    pub async fn list(&self) -> Result<Vec<InboxMessage>> {
        let list: InboxMessageList = self
            .dispatcher
            .call_json(CallDescriptor::new("getAllInboxMessages"))
            .await?;
        Ok(list.inbox_messages)
    }

    /// Fetch one inbox message.
    ///
    /// `read` optionally marks the message read (`Some(true)`) or unread
    /// (`Some(false)`) as a side effect; `None` leaves it untouched.
    pub async fn single(&self, msgid: &str, read: Option<bool>) -> Result<Option<InboxMessage>> {
        let mut descriptor = CallDescriptor::new("getInboxMessageById").arg(msgid);
        if let Some(read) = read {
            descriptor = descriptor.arg(read);
        }

        let envelope: InboxMessageEnvelope = self.dispatcher.call_json(descriptor).await?;
        Ok(envelope.inbox_message.into_iter().next())
    }

    /// Move an inbox message to the trash
    pub async fn move_to_trash(&self, msgid: &str) -> Result<String> {
        let descriptor = CallDescriptor::new("trashMessage").arg(msgid).raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("trashMessage", value)
    }
}

/// Sent messages
pub struct Sent<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Sent<'a> {
    /// List every sent message
    pub async fn list(&self) -> Result<Vec<SentMessage>> {
        let list: SentMessageList = self
            .dispatcher
            .call_json(CallDescriptor::new("getAllSentMessages"))
            .await?;
        Ok(list.sent_messages)
    }

    /// Fetch one sent message by message id
    pub async fn single(&self, msgid: &str) -> Result<Option<SentMessage>> {
        self.fetch_one(CallDescriptor::new("getSentMessageById").arg(msgid))
            .await
    }

    /// Fetch one sent message by ack data
    pub async fn single_by_ack(&self, ack_data: &str) -> Result<Option<SentMessage>> {
        self.fetch_one(CallDescriptor::new("getSentMessageByAckData").arg(ack_data))
            .await
    }

    /// Move a sent message to the trash, by ack data
    pub async fn move_to_trash_by_ack(&self, ack_data: &str) -> Result<String> {
        let descriptor = CallDescriptor::new("trashSentMessageByAckData")
            .arg(ack_data)
            .raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("trashSentMessageByAckData", value)
    }

    async fn fetch_one(&self, descriptor: CallDescriptor) -> Result<Option<SentMessage>> {
        let envelope: SentMessageEnvelope = self.dispatcher.call_json(descriptor).await?;
        Ok(envelope.sent_message.into_iter().next())
    }
}
