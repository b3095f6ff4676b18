//! Dashboard aggregation for the Premiações backend
//!
//! Pure functions over in-memory rows: given the honoree list, the
//! reference tables, and a filter state, derive the KPI block, the chart
//! series, the rankings, and the cascading filter options. No I/O; the
//! same inputs always produce the same output.

pub mod charts;
pub mod export;
pub mod filter;
pub mod kpi;
pub mod options;
pub mod rankings;

pub use charts::{brand_pie_chart, unit_bar_chart, BAR_CHART_LIMIT};
pub use export::{build_export, DashboardExport};
pub use filter::{filtered_honorees, DashboardFilter, Period};
pub use kpi::{compute_kpis, Kpis};
pub use options::{filter_options, FilterOptions, OptionItem};
pub use rankings::{
    award_ranking, regional_ranking, AwardRankingEntry, RegionalRankingEntry,
    AWARD_RANKING_LIMIT,
};

use premiacoes_common::db::models::{Award, Brand, Honoree, Regional, Unit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The full tables the dashboard works from
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub honorees: &'a [Honoree],
    pub awards: &'a [Award],
    pub brands: &'a [Brand],
    pub units: &'a [Unit],
    pub regionals: &'a [Regional],
}

/// A named group with its honoree count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub id: Uuid,
    pub name: String,
    pub count: usize,
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub kpis: Kpis,
    pub bar_chart: Vec<NamedCount>,
    pub pie_chart: Vec<NamedCount>,
    pub award_ranking: Vec<AwardRankingEntry>,
    pub regional_ranking: Vec<RegionalRankingEntry>,
}

impl DashboardReport {
    /// Derive the full report. `reference` anchors the month/semester
    /// windows; callers pass today's date.
    pub fn compute(
        input: &ReportInput<'_>,
        filter: &DashboardFilter,
        reference: chrono::NaiveDate,
    ) -> Self {
        let filtered = filtered_honorees(input.honorees, filter, reference);

        Self {
            kpis: compute_kpis(&filtered, input.brands, input.units),
            bar_chart: unit_bar_chart(&filtered, input.units),
            pie_chart: brand_pie_chart(&filtered, input.brands),
            award_ranking: award_ranking(&filtered, input),
            regional_ranking: regional_ranking(&filtered, input),
        }
    }
}

/// Count occurrences of each id
pub(crate) fn count_by<I>(ids: I) -> HashMap<Uuid, usize>
where
    I: IntoIterator<Item = Uuid>,
{
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Resolve counts against a name table and rank them: count descending,
/// name ascending on ties. Ids with no matching row are dropped.
pub(crate) fn ranked<F>(counts: HashMap<Uuid, usize>, resolve: F) -> Vec<NamedCount>
where
    F: Fn(Uuid) -> Option<String>,
{
    let mut entries: Vec<NamedCount> = counts
        .into_iter()
        .filter_map(|(id, count)| {
            resolve(id).map(|name| NamedCount { id, name, count })
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::NaiveDate;
    use premiacoes_common::db::models::{Award, Brand, Honoree, Regional, Unit};
    use uuid::Uuid;

    pub fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn now() -> chrono::DateTime<chrono::FixedOffset> {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .into()
    }

    pub fn brand(n: u128, name: &str) -> Brand {
        Brand {
            id: id(n),
            name: name.to_string(),
            created_at: now(),
            updated_at: now(),
        }
    }

    pub fn regional(n: u128, name: &str) -> Regional {
        Regional {
            id: id(n),
            name: name.to_string(),
            created_at: now(),
            updated_at: now(),
        }
    }

    pub fn unit(n: u128, name: &str, brand: u128, regional: Option<u128>) -> Unit {
        Unit {
            id: id(n),
            name: name.to_string(),
            location: "Recife, PE".to_string(),
            brand_id: id(brand),
            regional_id: regional.map(id),
            latitude: None,
            longitude: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    pub fn award(n: u128, name: &str) -> Award {
        Award {
            id: id(n),
            name: name.to_string(),
            description: String::new(),
            image_url: None,
            criteria: serde_json::json!([]),
            cycle_info: serde_json::json!({
                "edition": "2024",
                "description": "",
                "button_text": "",
                "button_link": ""
            }),
            created_at: now(),
            updated_at: now(),
        }
    }

    pub struct HonoreeSeed {
        pub brand: u128,
        pub unit: u128,
        pub award: Option<u128>,
        pub regional: Option<u128>,
        pub awarded_at: NaiveDate,
        pub published: bool,
    }

    impl Default for HonoreeSeed {
        fn default() -> Self {
            Self {
                brand: 1,
                unit: 1,
                award: None,
                regional: None,
                awarded_at: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                published: true,
            }
        }
    }

    pub fn honoree(n: u128, spec: HonoreeSeed) -> Honoree {
        Honoree {
            id: id(n),
            kind: "interno".to_string(),
            professional_data: serde_json::json!({
                "type": "interno",
                "name": format!("Homenageado {}", n),
                "email": format!("h{}@example.com", n),
                "unit": "Campus",
                "registration_id": "0001",
                "role": "Professor",
                "years_at_company": 5
            }),
            biography: String::new(),
            photo_url: None,
            video_url: None,
            award_id: spec.award.map(id),
            brand_id: id(spec.brand),
            unit_id: id(spec.unit),
            regional_id: spec.regional.map(id),
            awarded_at: spec.awarded_at,
            is_published: spec.published,
            stats: serde_json::json!({
                "years_of_service": 0,
                "total_awards": 0,
                "projects_led": 0,
                "units": 0
            }),
            timeline: serde_json::json!([]),
            initiatives: String::new(),
            recognitions: String::new(),
            created_at: now(),
            updated_at: now(),
        }
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::*;
    use super::*;

    #[test]
    fn test_two_honorees_one_brand_two_units() {
        let brands = vec![brand(1, "Ser Educacional")];
        let units = vec![unit(10, "Campus A", 1, None), unit(11, "Campus B", 1, None)];
        let awards = vec![award(20, "Destaque"), award(21, "Inovação")];
        let honorees = vec![
            honoree(100, HonoreeSeed { brand: 1, unit: 10, award: Some(20), ..Default::default() }),
            honoree(101, HonoreeSeed { brand: 1, unit: 11, award: Some(21), ..Default::default() }),
        ];

        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &brands,
            units: &units,
            regionals: &[],
        };

        let filter = DashboardFilter {
            brand_id: Some(id(1)),
            ..Default::default()
        };

        let report = DashboardReport::compute(&input, &filter, date(2024, 6, 15));

        assert_eq!(report.kpis.total, 2);
        assert_eq!(report.kpis.brands_count, 1);
        assert_eq!(report.kpis.units_count, 2);
        assert_eq!(report.pie_chart.len(), 1);
        assert_eq!(report.pie_chart[0].name, "Ser Educacional");
        assert_eq!(report.pie_chart[0].count, 2);
    }

    #[test]
    fn test_empty_honorees_yield_zeroes_not_errors() {
        let input = ReportInput {
            honorees: &[],
            awards: &[],
            brands: &[],
            units: &[],
            regionals: &[],
        };

        let report = DashboardReport::compute(&input, &DashboardFilter::default(), date(2024, 6, 15));

        assert_eq!(report.kpis.total, 0);
        assert_eq!(report.kpis.brands_count, 0);
        assert_eq!(report.kpis.units_count, 0);
        assert!(report.kpis.top_brand.is_none());
        assert!(report.kpis.top_unit.is_none());
        assert!(report.bar_chart.is_empty());
        assert!(report.pie_chart.is_empty());
        assert!(report.award_ranking.is_empty());
        assert!(report.regional_ranking.is_empty());
    }

    #[test]
    fn test_compute_is_deterministic() {
        let brands = vec![brand(1, "A"), brand(2, "B")];
        let units = vec![unit(10, "U1", 1, None), unit(11, "U2", 2, None)];
        let honorees = vec![
            honoree(100, HonoreeSeed::default()),
            honoree(101, HonoreeSeed { brand: 2, unit: 11, ..Default::default() }),
        ];

        let input = ReportInput {
            honorees: &honorees,
            awards: &[],
            brands: &brands,
            units: &units,
            regionals: &[],
        };

        let filter = DashboardFilter::default();
        let a = DashboardReport::compute(&input, &filter, date(2024, 6, 15));
        let b = DashboardReport::compute(&input, &filter, date(2024, 6, 15));

        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
    }
}
