//! GiroMilano transit API server.
//!
//! Normalizes the irregular free-text route descriptions and status
//! strings of the ATM GiroMilano API into a stable, structured schema.

pub mod giromilano;
pub mod parse;
pub mod records;
pub mod status;
pub mod web;
