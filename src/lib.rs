//! Reception form controller of a service center.
//!
//! The `data` feature exposes the pure layers: domain values, form payloads,
//! the [`state::ReceptionState`] reducer and its view model. The `app`
//! feature adds the HTTP repository, the async controller, settings loading
//! and template rendering.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod state;

#[cfg(feature = "app")]
pub mod error_conversions;
#[cfg(feature = "app")]
pub mod models;
#[cfg(feature = "app")]
pub mod render;
#[cfg(feature = "app")]
pub mod repository;
#[cfg(feature = "app")]
pub mod services;
