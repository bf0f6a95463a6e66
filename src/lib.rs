//! # Courtcast
//!
//! A badminton league match-outcome prediction engine.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, rankings, predictions)
//! - **predict**: The six-factor prediction engine
//! - **dataset**: League export ingestion and in-memory repositories
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod dataset;
pub mod models;
pub mod predict;

pub use models::*;
