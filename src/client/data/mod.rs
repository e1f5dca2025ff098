//! Data related to IRC functionality.

pub use crate::client::data::config::Config;

pub mod config;
