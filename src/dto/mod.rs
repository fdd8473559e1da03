//! DTO modules bridging the reducer with the remote API and the templates.

pub mod api;
pub mod view;
