//! # Trackboard API Server Library
//!
//! This library provides the core functionality for the Trackboard API server,
//! a read-only JSON proxy that aggregates Jira project data.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
