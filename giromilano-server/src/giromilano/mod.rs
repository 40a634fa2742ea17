//! GiroMilano (ATM transit portal) client.
//!
//! This module provides an HTTP client for the ATM GiroMilano proxy API,
//! the upstream source of journey patterns and stop summaries.
//!
//! Key characteristics of the upstream:
//! - Identifier fields mix strings and numbers for the same key across
//!   payloads, so DTOs keep them as raw JSON values
//! - The proxy rejects requests without browser-shaped headers
//! - The metro status table is not part of the API at all; it is scraped
//!   from the ATM homepage HTML

mod client;
mod error;
mod types;

pub use client::{GiromilanoClient, GiromilanoConfig};
pub use error::GiromilanoError;
pub use types::{RawGeometry, RawJourneyPattern, RawLine, RawLocation, RawStop, RawStopPoint};
