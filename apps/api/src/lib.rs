//! ATS keyword extraction, matching and scoring, plus its HTTP surface.

pub mod ats;
pub mod config;
pub mod errors;
pub mod routes;
pub mod state;
