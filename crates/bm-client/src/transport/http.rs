//! HTTP transport for the daemon's XML-RPC endpoint
//!
//! Each call is one `POST /` carrying a `<methodCall>` document and HTTP
//! basic auth. The underlying `reqwest::Client` is built once and pools
//! connections, so a single transport serves every call of a client.

use async_trait::async_trait;
use reqwest::{header, Client};

use bm_core::config::{ClientOptions, ConnectionConfig};
use bm_core::{RemoteCallError, RpcTransport};
use bm_protocol::{MethodCall, MethodResponse, Value};

/// Longest error body kept in a [`RemoteCallError::Status`]
const MAX_ERROR_BODY: usize = 512;

/// Connection handle to the daemon: endpoint URL, credentials, HTTP client
pub struct HttpTransport {
    client: Client,
    url: String,
    username: String,
    password: String,
}

impl HttpTransport {
    /// Build a transport for the given endpoint and options
    pub fn new(
        connection: &ConnectionConfig,
        options: &ClientOptions,
    ) -> Result<Self, RemoteCallError> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = options.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url: connection.endpoint_url(options.use_tls),
            username: connection.username.clone(),
            password: connection.password.clone(),
        })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn call(&self, call: MethodCall) -> Result<Value, RemoteCallError> {
        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.username, Some(&self.password))
            .header(header::CONTENT_TYPE, "text/xml")
            .body(call.to_xml())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RemoteCallError::Status {
                status: status.as_u16(),
                body: truncate(body, MAX_ERROR_BODY),
            });
        }

        let value = MethodResponse::from_xml(&body)?.into_result()?;
        Ok(value)
    }
}

/// Truncate on a character boundary
fn truncate(mut s: String, max_len: usize) -> String {
    if s.len() > max_len {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
    s
}
