//! External system clients: live-state endpoint and publisher webhook.

pub mod live;
pub mod publisher;

pub use live::LiveStateClient;
pub use publisher::{HttpPublisher, Publisher};
