//! Dashboard filter state and the honoree-selection predicate

use chrono::{Datelike, NaiveDate};
use premiacoes_common::db::models::Honoree;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time-window granularity. Month and semester windows are anchored on the
/// reference date's month, restricted to the selected year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Month,
    Semester,
    #[default]
    Year,
}

/// Dashboard filter state. An absent field means "all"; when `year` is
/// absent no time filtering is applied regardless of `period`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilter {
    #[serde(default)]
    pub regional_id: Option<Uuid>,

    #[serde(default)]
    pub brand_id: Option<Uuid>,

    #[serde(default)]
    pub unit_id: Option<Uuid>,

    #[serde(default)]
    pub award_id: Option<Uuid>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub period: Period,
}

/// Half of the year a one-based month falls in: 1 for Jan–Jun, 2 for Jul–Dec
pub fn semester_of(month: u32) -> u32 {
    if month <= 6 {
        1
    } else {
        2
    }
}

/// Select published honorees matching every present filter field plus the
/// time window.
pub fn filtered_honorees<'a>(
    honorees: &'a [Honoree],
    filter: &DashboardFilter,
    reference: NaiveDate,
) -> Vec<&'a Honoree> {
    honorees
        .iter()
        .filter(|h| h.is_published)
        .filter(|h| matches_ids(h, filter))
        .filter(|h| in_time_window(h.awarded_at, filter, reference))
        .collect()
}

fn matches_ids(honoree: &Honoree, filter: &DashboardFilter) -> bool {
    if let Some(regional_id) = filter.regional_id {
        if honoree.regional_id != Some(regional_id) {
            return false;
        }
    }
    if let Some(brand_id) = filter.brand_id {
        if honoree.brand_id != brand_id {
            return false;
        }
    }
    if let Some(unit_id) = filter.unit_id {
        if honoree.unit_id != unit_id {
            return false;
        }
    }
    if let Some(award_id) = filter.award_id {
        if honoree.award_id != Some(award_id) {
            return false;
        }
    }
    true
}

fn in_time_window(awarded_at: NaiveDate, filter: &DashboardFilter, reference: NaiveDate) -> bool {
    let Some(year) = filter.year else {
        return true;
    };

    if awarded_at.year() != year {
        return false;
    }

    match filter.period {
        Period::Year => true,
        Period::Month => awarded_at.month() == reference.month(),
        Period::Semester => semester_of(awarded_at.month()) == semester_of(reference.month()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    fn honorees_for_dates(dates: &[NaiveDate]) -> Vec<premiacoes_common::db::models::Honoree> {
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| {
                honoree(
                    100 + i as u128,
                    HonoreeSeed {
                        awarded_at: *d,
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_year_absent_disables_time_filtering() {
        let honorees = honorees_for_dates(&[
            date(2022, 1, 10),
            date(2023, 7, 10),
            date(2024, 12, 10),
        ]);

        for period in [Period::Month, Period::Semester, Period::Year] {
            let filter = DashboardFilter {
                year: None,
                period,
                ..Default::default()
            };
            let filtered = filtered_honorees(&honorees, &filter, date(2024, 3, 15));
            assert_eq!(filtered.len(), 3);
        }
    }

    #[test]
    fn test_year_period_selects_whole_year() {
        let honorees = honorees_for_dates(&[
            date(2024, 1, 1),
            date(2024, 12, 31),
            date(2023, 6, 1),
        ]);

        let filter = DashboardFilter {
            year: Some(2024),
            period: Period::Year,
            ..Default::default()
        };

        let filtered = filtered_honorees(&honorees, &filter, date(2024, 3, 15));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_month_window_is_anchored_on_reference_month() {
        let honorees = honorees_for_dates(&[date(2024, 3, 5), date(2024, 4, 5)]);

        let filter = DashboardFilter {
            year: Some(2024),
            period: Period::Month,
            ..Default::default()
        };

        // Reference in March: only the March honoree matches
        let filtered = filtered_honorees(&honorees, &filter, date(2024, 3, 20));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].awarded_at, date(2024, 3, 5));

        // Reference in April: only the April honoree matches
        let filtered = filtered_honorees(&honorees, &filter, date(2024, 4, 20));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].awarded_at, date(2024, 4, 5));
    }

    #[test]
    fn test_month_window_for_past_year_only_matches_aligned_months() {
        // A March 2023 honoree with a month filter for 2023 is visible only
        // while the reference (today) is itself in March.
        let honorees = honorees_for_dates(&[date(2023, 3, 5)]);

        let filter = DashboardFilter {
            year: Some(2023),
            period: Period::Month,
            ..Default::default()
        };

        let in_march = filtered_honorees(&honorees, &filter, date(2025, 3, 1));
        assert_eq!(in_march.len(), 1);

        let in_june = filtered_honorees(&honorees, &filter, date(2025, 6, 1));
        assert!(in_june.is_empty());
    }

    #[test]
    fn test_semester_window() {
        let honorees = honorees_for_dates(&[date(2024, 2, 1), date(2024, 8, 1)]);

        let filter = DashboardFilter {
            year: Some(2024),
            period: Period::Semester,
            ..Default::default()
        };

        // First half reference
        let filtered = filtered_honorees(&honorees, &filter, date(2024, 5, 1));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].awarded_at, date(2024, 2, 1));

        // Second half reference
        let filtered = filtered_honorees(&honorees, &filter, date(2024, 11, 1));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].awarded_at, date(2024, 8, 1));
    }

    #[test]
    fn test_semester_boundaries() {
        assert_eq!(semester_of(1), 1);
        assert_eq!(semester_of(6), 1);
        assert_eq!(semester_of(7), 2);
        assert_eq!(semester_of(12), 2);
    }

    #[test]
    fn test_id_filters_are_conjunctive() {
        let honorees = vec![
            honoree(100, HonoreeSeed { brand: 1, unit: 10, award: Some(20), regional: Some(30), ..Default::default() }),
            honoree(101, HonoreeSeed { brand: 1, unit: 11, award: Some(20), regional: Some(30), ..Default::default() }),
            honoree(102, HonoreeSeed { brand: 2, unit: 12, award: Some(21), regional: Some(31), ..Default::default() }),
        ];

        let filter = DashboardFilter {
            brand_id: Some(id(1)),
            unit_id: Some(id(10)),
            ..Default::default()
        };

        let filtered = filtered_honorees(&honorees, &filter, date(2024, 3, 15));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, id(100));
    }

    #[test]
    fn test_award_filter_excludes_honorees_without_award() {
        let honorees = vec![
            honoree(100, HonoreeSeed { award: Some(20), ..Default::default() }),
            honoree(101, HonoreeSeed { award: None, ..Default::default() }),
        ];

        let filter = DashboardFilter {
            award_id: Some(id(20)),
            ..Default::default()
        };

        let filtered = filtered_honorees(&honorees, &filter, date(2024, 3, 15));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, id(100));
    }

    #[test]
    fn test_unpublished_honorees_never_selected() {
        let honorees = vec![
            honoree(100, HonoreeSeed { published: false, ..Default::default() }),
            honoree(101, HonoreeSeed::default()),
        ];

        let filtered = filtered_honorees(&honorees, &DashboardFilter::default(), date(2024, 3, 15));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, id(101));
    }
}
