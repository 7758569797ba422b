pub mod config;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod moderation;
pub mod service;

pub use error::*;
pub use handlers::*;
pub use ledger::*;
pub use models::*;
pub use moderation::*;
pub use service::*;
