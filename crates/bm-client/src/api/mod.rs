//! Namespaced convenience calls over the dispatcher

mod addresses;
mod diagnostics;
mod messages;
mod subscriptions;

pub use addresses::Addresses;
pub use diagnostics::Diagnostics;
pub use messages::{Inbox, Messages, Sent};
pub use subscriptions::Subscriptions;
