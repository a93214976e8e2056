// Service exports
pub mod dispatch;
pub mod email;
pub mod messaging;
pub mod sqlite;
pub mod store;

pub use dispatch::{ChannelOutcome, DispatchReport, NotificationDispatcher};
pub use email::{EmailError, EmailTransport, SmtpMailer};
pub use messaging::{MessagingTransport, WebhookMessenger};
pub use sqlite::SqliteStore;
pub use store::{Store, StoreError};
