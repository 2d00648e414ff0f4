//! WealthEngine API Client Library
//!
//! This library provides an async client for the WealthEngine wealth-screening
//! API: profile matching and scoring by address, email or phone, and batch
//! lookups tracked by a job handle.
//!
//! # Modules
//!
//! - `client`: Client construction and the authorized request builder.
//! - `config`: API mode, detail mode and environment configuration.
//! - `decode`: JSON decoders, one per response shape.
//! - `errors`: Error handling types.
//! - `models`: Lookup records and provider response schemas.
//! - `operations`: One method per provider endpoint.
//!
//! # Example
//!
//! ```no_run
//! use wealthengine::{EmailLookup, WealthEngine};
//!
//! # async fn example() -> Result<(), wealthengine::WealthEngineError> {
//! let we = WealthEngine::new("my-api-key", "Dev")?;
//! let lookup = EmailLookup {
//!     email: "jane@example.com".to_string(),
//!     last_name: "Doe".to_string(),
//!     first_name: "Jane".to_string(),
//! };
//! let profile = we.match_one_by_email(&lookup, "basic").await?;
//! println!("{}", profile.identity.name.full_name);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod errors;
pub mod models;
pub mod operations;

pub use client::WealthEngine;
pub use config::{Config, DetailMode, Mode};
pub use errors::{ResultExt, WealthEngineError};
pub use models::*;
