use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sitters::domain::SitterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    ShortTerm,
    LongTerm,
    LiveIn,
    PickupDropoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeGroup {
    /// 0 to 12 months.
    Infant,
    /// 1 to 3 years.
    Toddler,
    /// 4 to 6 years.
    Preschool,
    /// 7 years and up.
    SchoolAge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Doctorate,
    SpecializedTraining,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub city: String,
    pub district: String,
}

/// The general profile parents browse. Distinct from the AI video profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitterProfile {
    pub sitter_id: SitterId,
    pub profile_image_url: Option<String>,
    pub introduction: Option<String>,
    pub available_service_types: Vec<ServiceType>,
    pub preferred_age_groups: Vec<AgeGroup>,
    pub languages_spoken: Vec<String>,
    pub education_level: Option<EducationLevel>,
    pub service_areas: Vec<ServiceArea>,
    /// Hourly rate in KRW.
    pub hourly_rate: Option<u32>,
    pub rating: f32,
    pub total_reviews: u32,
    pub profile_completed: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SitterProfile {
    pub fn empty(sitter_id: SitterId, now: DateTime<Utc>) -> Self {
        Self {
            sitter_id,
            profile_image_url: None,
            introduction: None,
            available_service_types: Vec::new(),
            preferred_age_groups: Vec::new(),
            languages_spoken: Vec::new(),
            education_level: None,
            service_areas: Vec::new(),
            hourly_rate: None,
            rating: 0.0,
            total_reviews: 0,
            profile_completed: false,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every editable field and recomputes completeness.
    pub fn apply(&mut self, update: SitterProfileUpdate, now: DateTime<Utc>) {
        self.profile_image_url = update.profile_image_url.filter(|url| !url.trim().is_empty());
        self.introduction = update.introduction;
        self.available_service_types = dedup(update.available_service_types);
        self.preferred_age_groups = dedup(update.preferred_age_groups);
        self.languages_spoken = update
            .languages_spoken
            .into_iter()
            .map(|language| language.trim().to_string())
            .filter(|language| !language.is_empty())
            .collect();
        self.education_level = update.education_level;
        self.service_areas = update.service_areas;
        self.hourly_rate = update.hourly_rate;
        self.profile_completed = is_profile_complete(
            self.introduction.as_deref(),
            &self.available_service_types,
            &self.languages_spoken,
        );
        self.updated_at = now;
    }
}

/// Editable part of a profile; absent lists clear the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitterProfileUpdate {
    pub profile_image_url: Option<String>,
    pub introduction: Option<String>,
    pub available_service_types: Vec<ServiceType>,
    pub preferred_age_groups: Vec<AgeGroup>,
    pub languages_spoken: Vec<String>,
    pub education_level: Option<EducationLevel>,
    pub service_areas: Vec<ServiceArea>,
    pub hourly_rate: Option<u32>,
}

/// A profile is complete once it has an introduction, at least one service type and at
/// least one spoken language. Whitespace-only introductions count as missing.
pub fn is_profile_complete(
    introduction: Option<&str>,
    service_types: &[ServiceType],
    languages: &[String],
) -> bool {
    introduction.is_some_and(|text| !text.trim().is_empty())
        && !service_types.is_empty()
        && !languages.is_empty()
}

fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
