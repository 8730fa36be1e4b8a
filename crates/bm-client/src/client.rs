//! Client entry point
//!
//! A [`BitmessageClient`] owns one connection handle to the daemon and hands
//! out namespaced views (`addresses()`, `messages()`, `subscriptions()`,
//! `test()`) that borrow it. Cloning the client shares the handle.

use std::sync::Arc;

use bm_core::config::{ClientOptions, ConfigFile, ConnectionConfig};
use bm_core::{Result, RpcTransport};

use crate::api::{Addresses, Diagnostics, Messages, Subscriptions};
use crate::dispatcher::Dispatcher;
use crate::transport::HttpTransport;

/// Client for the Bitmessage daemon API
///
/// # Example
///
/// ```rust,no_run
/// use bm_client::BitmessageClient;
/// use bm_core::config::ClientOptions;
///
/// # async fn example() -> bm_core::Result<()> {
/// let client = BitmessageClient::new("127.0.0.1", 8442, "api", "secret", ClientOptions::default())?;
///
/// let address = client.addresses().create_random("wallet-1").await?;
/// let inbox = client.messages().inbox().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BitmessageClient {
    dispatcher: Dispatcher,
}

impl BitmessageClient {
    /// Connect over HTTP with basic auth
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self> {
        let connection = ConnectionConfig::new(host, port, username, password);
        Self::with_options(&connection, &options)
    }

    /// Connect using a loaded configuration file
    pub fn from_config(config: &ConfigFile) -> Result<Self> {
        Self::with_options(&config.connection, &config.options)
    }

    /// Connect with explicit connection settings and options
    pub fn with_options(connection: &ConnectionConfig, options: &ClientOptions) -> Result<Self> {
        let transport = HttpTransport::new(connection, options)?;
        tracing::debug!(endpoint = transport.endpoint(), "Created client");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Use a custom transport
    pub fn with_transport(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport),
        }
    }

    /// Endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        self.dispatcher.transport().endpoint()
    }

    /// The underlying dispatcher, for calls without a convenience method
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Address operations
    pub fn addresses(&self) -> Addresses<'_> {
        Addresses::new(&self.dispatcher)
    }

    /// Message operations
    pub fn messages(&self) -> Messages<'_> {
        Messages::new(&self.dispatcher)
    }

    /// Subscription operations
    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(&self.dispatcher)
    }

    /// Diagnostic operations
    pub fn test(&self) -> Diagnostics<'_> {
        Diagnostics::new(&self.dispatcher)
    }
}
