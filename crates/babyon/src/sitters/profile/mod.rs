//! General sitter profiles: self-service editing, completeness tracking and the parent-side
//! search.

pub mod domain;
pub mod repository;
pub mod router;
pub mod search;
pub mod service;

pub use domain::{
    is_profile_complete, AgeGroup, EducationLevel, ServiceArea, ServiceType, SitterProfile,
    SitterProfileUpdate,
};
pub use repository::SitterProfileRepository;
pub use router::sitter_profile_router;
pub use search::{Page, SitterSearch, SortDirection, SortKey};
pub use service::{SitterProfileError, SitterProfileService};
