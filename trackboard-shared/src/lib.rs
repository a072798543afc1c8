//! # Trackboard Shared Library
//!
//! Domain types and logic shared by the Trackboard API server.
//!
//! ## Module Organization
//!
//! - `models`: Read-only projections of the tracker's data
//! - `jira`: Jira Cloud REST client
//! - `policy`: Configurable filtering and classification rules
//! - `aggregate`: Pure filtering, grouping, and counting functions
//! - `report`: Status extraction from HTML release reports

pub mod aggregate;
pub mod jira;
pub mod models;
pub mod policy;
pub mod report;

