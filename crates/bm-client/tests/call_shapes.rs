//! Method names, argument order and result decoding for every operation

mod common;

use bm_client::{BitmessageClient, BmError, CallDescriptor, CallOutput, MessageStatus, RemoteCallError};
use bm_protocol::Value;
use chrono::TimeZone;

use common::{b64, client_returning, inbox_record_json, s, sent_record_json, RecordingTransport};

// ============================================================================
// Addresses
// ============================================================================

#[tokio::test]
async fn test_create_random_encodes_label() {
    let (client, transport) = client_returning("BM-2cNewAddress");

    let address = client.addresses().create_random("wallet-1").await.unwrap();

    assert_eq!(address, "BM-2cNewAddress");
    let call = transport.only_call();
    assert_eq!(call.method_name, "createRandomAddress");
    assert_eq!(call.params, vec![s("d2FsbGV0LTE=")]);
}

#[tokio::test]
async fn test_create_deterministic_sends_fixed_parameters() {
    let (client, transport) = client_returning(r#"{"addresses":["BM-first","BM-second"]}"#);

    let address = client.addresses().create_deterministic("correct horse").await.unwrap();

    assert_eq!(address.as_deref(), Some("BM-first"));
    let call = transport.only_call();
    assert_eq!(call.method_name, "createDeterministicAddresses");
    assert_eq!(
        call.params,
        vec![
            b64("correct horse"),
            Value::Int(1),
            Value::Int(0),
            Value::Int(0),
            Value::Bool(false),
            Value::Int(1),
            Value::Int(1),
        ]
    );
}

#[tokio::test]
async fn test_create_deterministic_with_nothing_generated() {
    let (client, _transport) = client_returning(r#"{"addresses":[]}"#);

    let address = client.addresses().create_deterministic("already held").await.unwrap();

    assert_eq!(address, None);
}

#[tokio::test]
async fn test_get_deterministic_requests_version_three() {
    let (client, transport) = client_returning("BM-2cLookup");

    let address = client.addresses().get_deterministic("pass").await.unwrap();

    assert_eq!(address, "BM-2cLookup");
    let call = transport.only_call();
    assert_eq!(call.method_name, "getDeterministicAddress");
    assert_eq!(call.params, vec![b64("pass"), Value::Int(3), Value::Int(1)]);
}

#[tokio::test]
async fn test_list_addresses() {
    let (client, transport) = client_returning(
        r#"{"addresses":[{"label":"main","address":"BM-a","stream":1,"enabled":true,"chan":false}]}"#,
    );

    let addresses = client.addresses().list().await.unwrap();

    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].label, "main");
    assert_eq!(addresses[0].address, "BM-a");
    assert!(addresses[0].enabled);
    assert!(!addresses[0].chan);
    let call = transport.only_call();
    assert_eq!(call.method_name, "listAddresses");
    assert!(call.params.is_empty());
}

// ============================================================================
// Messages
// ============================================================================

#[tokio::test]
async fn test_send_encodes_subject_and_body_only() {
    let (client, transport) = client_returning("ackdata-1");

    let ack = client
        .messages()
        .send("BM-to", "BM-from", "Hi", "Body")
        .await
        .unwrap();

    assert_eq!(ack, "ackdata-1");
    let call = transport.only_call();
    assert_eq!(call.method_name, "sendMessage");
    assert_eq!(
        call.params,
        vec![s("BM-to"), s("BM-from"), s("SGk="), s("Qm9keQ==")]
    );
}

#[tokio::test]
async fn test_broadcast_argument_order() {
    let (client, transport) = client_returning("ackdata-2");

    client
        .messages()
        .broadcast("BM-from", "News", "Text")
        .await
        .unwrap();

    let call = transport.only_call();
    assert_eq!(call.method_name, "sendBroadcast");
    assert_eq!(call.params, vec![s("BM-from"), b64("News"), b64("Text")]);
}

#[tokio::test]
async fn test_status_maps_known_and_unknown_values() {
    let transport = RecordingTransport::with_values(vec![s("ackreceived"), s("somethingnew")]);
    let client = BitmessageClient::with_transport(transport.clone());

    let known = client.messages().status("ack").await.unwrap();
    let unknown = client.messages().status("ack").await.unwrap();

    assert_eq!(known, MessageStatus::AckReceived);
    assert!(known.is_sent());
    assert_eq!(unknown, MessageStatus::Other("somethingnew".to_string()));

    let calls = transport.calls();
    assert_eq!(calls[0].method_name, "getStatus");
    assert_eq!(calls[0].params, vec![s("ack")]);
}

#[tokio::test]
async fn test_inbox_list_decodes_records_in_order() {
    let json = format!(
        r#"{{"inboxMessages":[{},{}]}}"#,
        inbox_record_json("m1", "Hello", "World", 1_400_000_000),
        inbox_record_json("m2", "Second", "Body two", 1_400_000_060)
    );
    let (client, transport) = client_returning(json);

    let messages = client.messages().inbox().list().await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].msgid, "m1");
    assert_eq!(messages[0].subject, "Hello");
    assert_eq!(messages[0].message, "World");
    assert_eq!(
        messages[0].received_time,
        chrono::Utc.timestamp_opt(1_400_000_000, 0).unwrap()
    );
    assert!(!messages[0].read);
    assert_eq!(messages[1].msgid, "m2");
    assert_eq!(messages[1].subject, "Second");
    assert_eq!(messages[1].message, "Body two");
    assert_eq!(messages[1].received_time.timestamp(), 1_400_000_060);
    assert_eq!(transport.only_call().method_name, "getAllInboxMessages");
}

#[tokio::test]
async fn test_inbox_single_without_read_flag() {
    let json = format!(
        r#"{{"inboxMessage":[{}]}}"#,
        inbox_record_json("m1", "S", "B", 1_400_000_000)
    );
    let (client, transport) = client_returning(json);

    let message = client.messages().inbox().single("m1", None).await.unwrap();

    assert_eq!(message.map(|m| m.subject), Some("S".to_string()));
    let call = transport.only_call();
    assert_eq!(call.method_name, "getInboxMessageById");
    assert_eq!(call.params, vec![s("m1")]);
}

#[tokio::test]
async fn test_inbox_single_appends_read_flag() {
    let json = format!(
        r#"{{"inboxMessage":[{}]}}"#,
        inbox_record_json("m1", "S", "B", 1_400_000_000)
    );
    let (client, transport) = client_returning(json);

    client.messages().inbox().single("m1", Some(true)).await.unwrap();

    let call = transport.only_call();
    assert_eq!(call.params, vec![s("m1"), Value::Bool(true)]);
}

#[tokio::test]
async fn test_inbox_single_passes_unread_flag() {
    let (client, transport) = client_returning(r#"{"inboxMessage":[]}"#);

    client.messages().inbox().single("m1", Some(false)).await.unwrap();

    let call = transport.only_call();
    assert_eq!(call.params, vec![s("m1"), Value::Bool(false)]);
}

#[tokio::test]
async fn test_inbox_single_absent_is_none() {
    let (client, _transport) = client_returning(r#"{"inboxMessage":[]}"#);

    let message = client.messages().inbox().single("gone", None).await.unwrap();

    assert!(message.is_none());
}

#[tokio::test]
async fn test_inbox_trash() {
    let (client, transport) = client_returning("Trashed message (assuming message existed).");

    let result = client.messages().inbox().move_to_trash("m1").await.unwrap();

    assert!(result.starts_with("Trashed"));
    let call = transport.only_call();
    assert_eq!(call.method_name, "trashMessage");
    assert_eq!(call.params, vec![s("m1")]);
}

#[tokio::test]
async fn test_sent_list_and_lookups() {
    let list = format!(
        r#"{{"sentMessages":[{}]}}"#,
        sent_record_json("m2", "Out", "Going", 1_400_000_000)
    );
    let single = format!(
        r#"{{"sentMessage":[{}]}}"#,
        sent_record_json("m2", "Out", "Going", 1_400_000_000)
    );
    let transport = RecordingTransport::with_values(vec![
        Value::from(list),
        Value::from(single.clone()),
        Value::from(single),
    ]);
    let client = BitmessageClient::with_transport(transport.clone());
    let sent = client.messages().sent();

    let all = sent.list().await.unwrap();
    let by_id = sent.single("m2").await.unwrap().unwrap();
    let by_ack = sent.single_by_ack("ack-m2").await.unwrap().unwrap();

    assert_eq!(all[0].status, MessageStatus::MsgSent);
    assert_eq!(by_id.subject, "Out");
    assert_eq!(by_ack.ack_data, "ack-m2");

    let calls = transport.calls();
    assert_eq!(calls[0].method_name, "getAllSentMessages");
    assert_eq!(calls[1].method_name, "getSentMessageById");
    assert_eq!(calls[1].params, vec![s("m2")]);
    assert_eq!(calls[2].method_name, "getSentMessageByAckData");
    assert_eq!(calls[2].params, vec![s("ack-m2")]);
}

#[tokio::test]
async fn test_sent_trash_by_ack() {
    let (client, transport) = client_returning("Trashed sent message (assuming message existed).");

    client
        .messages()
        .sent()
        .move_to_trash_by_ack("ack-1")
        .await
        .unwrap();

    let call = transport.only_call();
    assert_eq!(call.method_name, "trashSentMessageByAckData");
    assert_eq!(call.params, vec![s("ack-1")]);
}

// ============================================================================
// Subscriptions and diagnostics
// ============================================================================

#[tokio::test]
async fn test_subscriptions() {
    let listing = format!(
        r#"{{"subscriptions":[{{"label":"{}","address":"BM-news","enabled":true}}]}}"#,
        bm_core::encoding::to_base64("News feed")
    );
    let transport = RecordingTransport::with_values(vec![
        Value::from(listing),
        s("Added subscription."),
        s("Deleted subscription if it existed."),
    ]);
    let client = BitmessageClient::with_transport(transport.clone());

    let subscriptions = client.subscriptions().list().await.unwrap();
    client.subscriptions().subscribe("BM-news", "News feed").await.unwrap();
    client.subscriptions().unsubscribe("BM-news").await.unwrap();

    assert_eq!(subscriptions[0].label, "News feed");
    let calls = transport.calls();
    assert_eq!(calls[0].method_name, "listSubscriptions");
    assert_eq!(calls[1].method_name, "addSubscription");
    assert_eq!(calls[1].params, vec![s("BM-news"), b64("News feed")]);
    assert_eq!(calls[2].method_name, "deleteSubscription");
    assert_eq!(calls[2].params, vec![s("BM-news")]);
}

#[tokio::test]
async fn test_diagnostics_pass_values_through() {
    let transport = RecordingTransport::with_values(vec![Value::Int(5), s("hello-world")]);
    let client = BitmessageClient::with_transport(transport.clone());

    assert_eq!(client.test().add(2, 3).await.unwrap(), 5);
    assert_eq!(client.test().hello("hello", "world").await.unwrap(), "hello-world");

    let calls = transport.calls();
    assert_eq!(calls[0].method_name, "add");
    assert_eq!(calls[0].params, vec![Value::Int(2), Value::Int(3)]);
    assert_eq!(calls[1].method_name, "helloWorld");
    assert_eq!(calls[1].params, vec![s("hello"), s("world")]);
}

#[tokio::test]
async fn test_hello_result_resembling_api_error_passes_through() {
    let (client, _transport) = client_returning("API Error 0001-x");

    let greeting = client.test().hello("API Error 0001", "x").await.unwrap();

    assert_eq!(greeting, "API Error 0001-x");
}

#[tokio::test]
async fn test_cloned_clients_share_transport_concurrently() {
    let transport = RecordingTransport::with_values(vec![Value::Int(5), Value::Int(9)]);
    let client = BitmessageClient::with_transport(transport.clone());
    let other = client.clone();

    let client_test = client.test();
    let other_test = other.test();
    let (first, second) = tokio::join!(client_test.add(2, 3), other_test.add(4, 5));

    let mut sums = vec![first.unwrap(), second.unwrap()];
    sums.sort_unstable();
    assert_eq!(sums, vec![5, 9]);

    let mut methods: Vec<_> = transport
        .calls()
        .into_iter()
        .map(|call| (call.method_name, call.params))
        .collect();
    methods.sort_by_key(|(_, params)| params.first().and_then(Value::as_i64));
    assert_eq!(
        methods,
        vec![
            ("add".to_string(), vec![Value::Int(2), Value::Int(3)]),
            ("add".to_string(), vec![Value::Int(4), Value::Int(5)]),
        ]
    );
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_api_error_result_becomes_error() {
    let (client, _transport) = client_returning("API Error 0013: Could not find this msgid in the inbox.");

    let err = client.messages().inbox().single("nope", None).await.unwrap_err();

    match err {
        BmError::Remote(RemoteCallError::Api { code, message }) => {
            assert_eq!(code, 13);
            assert!(message.contains("Could not find"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_failure_surfaces_unchanged() {
    let transport = RecordingTransport::failing(RemoteCallError::Fault {
        code: 1,
        message: "boom".to_string(),
    });
    let client = BitmessageClient::with_transport(transport);

    let err = client.addresses().list().await.unwrap_err();

    assert!(matches!(
        err,
        BmError::Remote(RemoteCallError::Fault { code: 1, .. })
    ));
}

#[tokio::test]
async fn test_bad_base64_in_record_is_an_error() {
    let (client, _transport) = client_returning(
        r#"{"inboxMessages":[{"msgid":"m","toAddress":"a","fromAddress":"b","subject":"***","message":"","encodingType":2,"receivedTime":"1","read":0}]}"#,
    );

    let err = client.messages().inbox().list().await.unwrap_err();

    assert!(matches!(err, BmError::UnexpectedShape { .. }));
}

#[tokio::test]
async fn test_empty_method_name_is_rejected_before_sending() {
    let transport = RecordingTransport::with_values(vec![]);
    let client = BitmessageClient::with_transport(transport.clone());

    let err = client
        .dispatcher()
        .call(CallDescriptor::new(""))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BmError::Remote(RemoteCallError::InvalidMethod(_))
    ));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_generic_dispatch_returns_json_or_raw() {
    let transport = RecordingTransport::with_values(vec![s(r#"{"ok":true}"#), Value::Int(9)]);
    let client = BitmessageClient::with_transport(transport);

    let json = client
        .dispatcher()
        .call(CallDescriptor::new("custom"))
        .await
        .unwrap();
    let raw = client
        .dispatcher()
        .call(CallDescriptor::new("custom").raw())
        .await
        .unwrap();

    assert_eq!(json, CallOutput::Json(serde_json::json!({"ok": true})));
    assert_eq!(raw, CallOutput::Raw(Value::Int(9)));
}
