//! Sitter-facing marketplace domain: the interview question bank, AI video resumes and the
//! general sitter profile parents search through.

pub mod domain;
pub mod profile;
pub mod questions;
pub mod repository;
pub mod video;

pub use domain::{Sitter, SitterId};
pub use repository::{RepositoryError, SitterRepository};
