//! Platform notifiers and the dispatch pipeline.
//!
//! The core trait `Notifier` wraps one platform's HTTP API behind a uniform
//! send/test contract. `NotifierRegistry` builds the enabled adapters once
//! at startup and `NotificationDispatcher` fans a message out to them.

mod dispatcher;
mod platform;
mod provider;
mod registry;
mod slack_provider;
mod telegram_provider;
mod whatsapp_provider;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::{NotificationDispatcher, NotificationResult};
pub use platform::Platform;
pub use provider::{Notifier, Outcome};
pub use registry::{NotifierRegistry, PlatformAdapter};
pub use slack_provider::SlackProvider;
pub use telegram_provider::TelegramProvider;
pub use whatsapp_provider::{WhatsAppProvider, whatsapp_address};
