//! Address operations

use bm_core::encoding::to_base64;
use bm_core::types::{Address, AddressList, DeterministicOptions, GeneratedAddresses};
use bm_core::Result;

use crate::dispatcher::{expect_string, CallDescriptor, Dispatcher};

/// Address version requested from `getDeterministicAddress`
const LOOKUP_ADDRESS_VERSION: u32 = 3;

/// Stream requested from `getDeterministicAddress`
const LOOKUP_STREAM: u32 = 1;

/// Identities held by the daemon
pub struct Addresses<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Addresses<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// List all identities
    pub async fn list(&self) -> Result<Vec<Address>> {
        let list: AddressList = self
            .dispatcher
            .call_json(CallDescriptor::new("listAddresses"))
            .await?;
        Ok(list.addresses)
    }

    /// Create a random identity with the given label and return its address
    pub async fn create_random(&self, label: &str) -> Result<String> {
        let descriptor = CallDescriptor::new("createRandomAddress")
            .arg(to_base64(label))
            .raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("createRandomAddress", value)
    }

    /// Create one deterministic identity from a passphrase.
    ///
    /// Returns the first generated address, or `None` if the daemon
    /// generated none (for instance because it already holds it).
    pub async fn create_deterministic(&self, passphrase: &str) -> Result<Option<String>> {
        let addresses = self
            .generate_deterministic(passphrase, &DeterministicOptions::default())
            .await?;
        Ok(addresses.into_iter().next())
    }

    /// Create deterministic identities with explicit generation parameters
    pub async fn generate_deterministic(
        &self,
        passphrase: &str,
        options: &DeterministicOptions,
    ) -> Result<Vec<String>> {
        let descriptor = CallDescriptor::new("createDeterministicAddresses")
            .arg(to_base64(passphrase))
            .arg(options.number_of_addresses)
            .arg(options.address_version)
            .arg(options.stream)
            .arg(options.eighteen_byte_ripe)
            .arg(options.total_difficulty)
            .arg(options.small_message_difficulty);

        let generated: GeneratedAddresses = self.dispatcher.call_json(descriptor).await?;
        Ok(generated.addresses)
    }

    /// Compute the deterministic address for a passphrase without storing it
    pub async fn get_deterministic(&self, passphrase: &str) -> Result<String> {
        let descriptor = CallDescriptor::new("getDeterministicAddress")
            .arg(to_base64(passphrase))
            .arg(LOOKUP_ADDRESS_VERSION)
            .arg(LOOKUP_STREAM)
            .raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("getDeterministicAddress", value)
    }
}
