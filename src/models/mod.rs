//! Runtime settings of the reception controller.

pub mod config;
