//! The normalization core: free-text route descriptions and status strings
//! in, structured records out.
//!
//! Everything here is synchronous, pure and deterministic; identical input
//! always yields identical output. Builders return `Option` rather than
//! erroring: a record that cannot be normalized is simply absent.

mod description;
mod line;
mod route;
mod stop;
mod text;
mod waiting;

pub use description::{ParsedRoute, parse_description};
pub use line::build_line;
pub use route::split_route;
pub use stop::build_stop;
pub use text::{normalize, parse_location_name};
pub use waiting::{WaitingTime, WaitingTimeKind, classify as classify_waiting_time};

/// Upper bound on stop-in-line-in-stop recursion.
///
/// Realistic payloads nest one level; the schema alone does not guarantee
/// termination, so deeper collections are dropped instead of recursed into.
pub(crate) const MAX_NESTING: usize = 8;
