//! Domain entities handled by the reception form.

pub mod catalog;
pub mod client;
pub mod equipment;
pub mod types;
