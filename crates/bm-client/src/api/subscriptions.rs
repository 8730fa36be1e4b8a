//! Broadcast subscription operations

use bm_core::encoding::to_base64;
use bm_core::types::{Subscription, SubscriptionList};
use bm_core::Result;

use crate::dispatcher::{expect_string, CallDescriptor, Dispatcher};

/// Broadcast subscriptions
pub struct Subscriptions<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Subscriptions<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// List subscriptions with decoded labels
    pub async fn list(&self) -> Result<Vec<Subscription>> {
        let list: SubscriptionList = self
            .dispatcher
            .call_json(CallDescriptor::new("listSubscriptions"))
            .await?;
        Ok(list.subscriptions)
    }

    /// Subscribe to broadcasts from an address
    pub async fn subscribe(&self, address: &str, label: &str) -> Result<String> {
        let descriptor = CallDescriptor::new("addSubscription")
            .arg(address)
            .arg(to_base64(label))
            .raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("addSubscription", value)
    }

    /// Remove a subscription
    pub async fn unsubscribe(&self, address: &str) -> Result<String> {
        let descriptor = CallDescriptor::new("deleteSubscription").arg(address).raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("deleteSubscription", value)
    }
}
