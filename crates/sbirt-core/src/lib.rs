//! sbirt-core
//!
//! Pure domain types for substance-use screening: screening items, the
//! ASSIST substance families and their answers, and the risk tiers both
//! instruments report. No scoring rules live here.

pub mod error;
pub mod models;
