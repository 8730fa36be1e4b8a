//! Shared test helpers

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use bm_client::BitmessageClient;
use bm_core::{RemoteCallError, RpcTransport};
use bm_protocol::{MethodCall, Value};

/// In-memory transport that records every call and replays canned results
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<MethodCall>>,
    responses: Mutex<VecDeque<Result<Value, RemoteCallError>>>,
}

impl RecordingTransport {
    /// Transport that answers each call with the next queued value
    pub fn with_values(values: Vec<Value>) -> Arc<Self> {
        let transport = Self::default();
        {
            let mut responses = transport.responses.lock().unwrap();
            responses.extend(values.into_iter().map(Ok));
        }
        Arc::new(transport)
    }

    /// Transport that fails its first call with the given error
    pub fn failing(error: RemoteCallError) -> Arc<Self> {
        let transport = Self::default();
        transport.responses.lock().unwrap().push_back(Err(error));
        Arc::new(transport)
    }

    /// Calls made so far
    pub fn calls(&self) -> Vec<MethodCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The one call made; panics if there were zero or several
    pub fn only_call(&self) -> MethodCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one remote call");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl RpcTransport for RecordingTransport {
    fn endpoint(&self) -> &str {
        "memory://test"
    }

    async fn call(&self, call: MethodCall) -> Result<Value, RemoteCallError> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::from("")))
    }
}

/// Client over a recording transport answering with one value
pub fn client_returning(value: impl Into<Value>) -> (BitmessageClient, Arc<RecordingTransport>) {
    let transport = RecordingTransport::with_values(vec![value.into()]);
    let client = BitmessageClient::with_transport(transport.clone());
    (client, transport)
}

/// Shorthand for a string argument
pub fn s(text: &str) -> Value {
    Value::from(text)
}

/// Base64 of a string, as the daemon expects free-text fields
pub fn b64(text: &str) -> Value {
    Value::from(bm_core::encoding::to_base64(text))
}

/// JSON for one inbox record with encoded fields
pub fn inbox_record_json(msgid: &str, subject: &str, message: &str, received: i64) -> String {
    format!(
        r#"{{"msgid":"{}","toAddress":"BM-to","fromAddress":"BM-from","subject":"{}","message":"{}","encodingType":2,"receivedTime":"{}","read":0}}"#,
        msgid,
        bm_core::encoding::to_base64(subject),
        bm_core::encoding::to_base64(message),
        received
    )
}

/// JSON for one sent record with encoded fields
pub fn sent_record_json(msgid: &str, subject: &str, message: &str, last_action: i64) -> String {
    format!(
        r#"{{"msgid":"{}","toAddress":"BM-to","fromAddress":"BM-from","subject":"{}","message":"{}","encodingType":2,"lastActionTime":{},"status":"msgsent","ackData":"ack-{}"}}"#,
        msgid,
        bm_core::encoding::to_base64(subject),
        bm_core::encoding::to_base64(message),
        last_action,
        msgid
    )
}
