//! CLI command implementations

mod addresses;
mod config;
mod diagnostics;
mod inbox;
mod messages;
mod sent;
mod subscriptions;

pub use addresses::{
    addresses_create_deterministic, addresses_create_random, addresses_get_deterministic,
    addresses_list,
};
pub use config::{config_get, config_init, config_path, config_set, config_show};
pub use diagnostics::{test_add, test_hello};
pub use inbox::{inbox_list, inbox_show, inbox_trash};
pub use messages::{broadcast_command, send_command, status_command};
pub use sent::{sent_list, sent_show, sent_show_by_ack, sent_trash};
pub use subscriptions::{subscriptions_add, subscriptions_list, subscriptions_remove};
