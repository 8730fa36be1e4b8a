//! Diagnostic passthrough calls, useful to check connectivity and auth

use bm_core::Result;

use crate::dispatcher::{expect_int, expect_string, CallDescriptor, Dispatcher};

/// The daemon's `add` and `helloWorld` test methods
pub struct Diagnostics<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Diagnostics<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Ask the daemon to add two integers
    pub async fn add(&self, a: i64, b: i64) -> Result<i64> {
        let descriptor = CallDescriptor::new("add").arg(a).arg(b).raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_int("add", value)
    }

    /// Ask the daemon to join two words, e.g. `hello-world`
    pub async fn hello(&self, word: &str, word2: &str) -> Result<String> {
        let descriptor = CallDescriptor::new("helloWorld").arg(word).arg(word2).raw();
        let value = self.dispatcher.call_raw(descriptor).await?;
        expect_string("helloWorld", value)
    }
}
