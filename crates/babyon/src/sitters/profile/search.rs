use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{AgeGroup, ServiceType, SitterProfile};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Rating,
    HourlyRate,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Parent-side search filters, as sent in the query string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SitterSearch {
    pub city: Option<String>,
    pub district: Option<String>,
    pub service_type: Option<ServiceType>,
    pub age_group: Option<AgeGroup>,
    pub min_rating: Option<f32>,
    pub max_hourly_rate: Option<u32>,
    pub sort_by: Option<SortKey>,
    pub sort_direction: Option<SortDirection>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl SitterSearch {
    pub fn page_size(&self) -> usize {
        self.size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn matches(&self, profile: &SitterProfile) -> bool {
        if !profile.active {
            return false;
        }
        if let Some(service_type) = self.service_type {
            if !profile.available_service_types.contains(&service_type) {
                return false;
            }
        }
        if let Some(age_group) = self.age_group {
            if !profile.preferred_age_groups.contains(&age_group) {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if profile.rating < min_rating {
                return false;
            }
        }
        if let Some(max_rate) = self.max_hourly_rate {
            if profile.hourly_rate.map_or(true, |rate| rate > max_rate) {
                return false;
            }
        }

        let city = non_blank(self.city.as_deref());
        let district = non_blank(self.district.as_deref());
        if city.is_none() && district.is_none() {
            return true;
        }
        profile.service_areas.iter().any(|area| {
            city.map_or(true, |city| area.city.eq_ignore_ascii_case(city))
                && district.map_or(true, |district| area.district.eq_ignore_ascii_case(district))
        })
    }

    /// Filters, sorts and slices `profiles` into the requested page.
    pub fn run(&self, profiles: Vec<SitterProfile>) -> Page<SitterProfile> {
        let mut matched: Vec<_> = profiles
            .into_iter()
            .filter(|profile| self.matches(profile))
            .collect();

        let key = self.sort_by.unwrap_or_default();
        let direction = self.sort_direction.unwrap_or_default();
        matched.sort_by(|left, right| compare(left, right, key, direction));

        let size = self.page_size();
        let page = self.page.unwrap_or(0);
        let total_elements = matched.len();
        let content = matched
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect();

        Page {
            content,
            page,
            size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn compare(
    left: &SitterProfile,
    right: &SitterProfile,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    let ordering = match key {
        SortKey::Rating => left.rating.total_cmp(&right.rating),
        SortKey::CreatedAt => left.created_at.cmp(&right.created_at),
        // unpriced profiles always sort last
        SortKey::HourlyRate => match (left.hourly_rate, right.hourly_rate) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitters::domain::SitterId;
    use crate::sitters::profile::domain::ServiceArea;
    use chrono::{Duration, TimeZone, Utc};

    fn profile(id: u64, rating: f32, rate: Option<u32>, city: &str) -> SitterProfile {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap() + Duration::days(id as i64);
        let mut profile = SitterProfile::empty(SitterId(id), created);
        profile.rating = rating;
        profile.hourly_rate = rate;
        profile.available_service_types = vec![ServiceType::ShortTerm];
        profile.preferred_age_groups = vec![AgeGroup::Toddler];
        profile.service_areas = vec![ServiceArea {
            city: city.to_string(),
            district: "Gangnam-gu".to_string(),
        }];
        profile
    }

    fn ids(page: &Page<SitterProfile>) -> Vec<u64> {
        page.content.iter().map(|profile| profile.sitter_id.0).collect()
    }

    #[test]
    fn defaults_to_newest_first_with_ten_per_page() {
        let profiles = (1..=12).map(|id| profile(id, 4.0, Some(15_000), "Seoul")).collect();
        let page = SitterSearch::default().run(profiles);
        assert_eq!(page.size, 10);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.content[0].sitter_id, SitterId(12));
    }

    #[test]
    fn filters_combine() {
        let mut inactive = profile(4, 5.0, Some(12_000), "Seoul");
        inactive.active = false;
        let profiles = vec![
            profile(1, 4.8, Some(18_000), "Seoul"),
            profile(2, 3.9, Some(14_000), "Seoul"),
            profile(3, 4.9, Some(13_000), "Busan"),
            inactive,
            profile(5, 4.6, None, "seoul"),
        ];
        let search = SitterSearch {
            city: Some("SEOUL".to_string()),
            min_rating: Some(4.5),
            max_hourly_rate: Some(20_000),
            service_type: Some(ServiceType::ShortTerm),
            ..SitterSearch::default()
        };
        assert_eq!(ids(&search.run(profiles)), vec![1]);
    }

    #[test]
    fn hourly_rate_sort_puts_unpriced_last() {
        let profiles = vec![
            profile(1, 4.0, None, "Seoul"),
            profile(2, 4.0, Some(20_000), "Seoul"),
            profile(3, 4.0, Some(11_000), "Seoul"),
        ];
        let search = SitterSearch {
            sort_by: Some(SortKey::HourlyRate),
            sort_direction: Some(SortDirection::Asc),
            ..SitterSearch::default()
        };
        assert_eq!(ids(&search.run(profiles.clone())), vec![3, 2, 1]);

        let descending = SitterSearch {
            sort_direction: Some(SortDirection::Desc),
            ..search
        };
        assert_eq!(ids(&descending.run(profiles)), vec![2, 3, 1]);
    }

    #[test]
    fn page_size_is_clamped() {
        let zero = SitterSearch {
            size: Some(0),
            ..SitterSearch::default()
        };
        assert_eq!(zero.page_size(), 1);
        let huge = SitterSearch {
            size: Some(10_000),
            ..SitterSearch::default()
        };
        assert_eq!(huge.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn pages_past_the_end_are_empty() {
        let profiles = (1..=3).map(|id| profile(id, 4.0, None, "Seoul")).collect();
        let search = SitterSearch {
            page: Some(5),
            ..SitterSearch::default()
        };
        let page = search.run(profiles);
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 3);
    }
}
