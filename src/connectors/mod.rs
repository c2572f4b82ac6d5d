//! External Service Connectors
//!
//! Adapters for communicating with external services. All outbound
//! integrations go through a connector trait so routes never depend on
//! HTTP details and tests can stand in their own server.

pub mod errors;
pub mod promptly;

pub use errors::ConnectorError;
pub use promptly::{PromptlyClient, PromptlyConnector};

pub use promptly::init as init_promptly;
