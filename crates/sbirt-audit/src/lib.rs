//! sbirt-audit
//!
//! Structured events for every answer recorded during a screening session.
//! Events go out through `tracing`; the host decides where they land.

pub mod events;
