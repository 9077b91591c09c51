//! Core library for the Babyon childcare marketplace backend.
//!
//! Sitters keep a general profile and an AI video resume answering a randomly assigned
//! interview question; parents browse and search those profiles. HTTP routers, domain
//! policies and the repository seams they depend on live here, while the `babyon-api`
//! service crate supplies the concrete infrastructure.

pub mod auth;
pub mod config;
pub mod error;
pub mod sitters;
pub mod storage;
pub mod telemetry;
