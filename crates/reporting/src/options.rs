//! Cascading filter options for the dashboard controls
//!
//! The option lists narrow as the user drills down: a selected regional
//! restricts brands to those with a unit there, a selected regional or
//! brand restricts units, a selected unit restricts awards to those
//! actually granted in it. Narrowing never enlarges a list.

use crate::{DashboardFilter, ReportInput};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: Uuid,
    pub name: String,
}

/// Option lists for every dashboard control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regionals: Vec<OptionItem>,
    pub brands: Vec<OptionItem>,
    pub units: Vec<OptionItem>,
    pub awards: Vec<OptionItem>,
    /// Distinct award years present in the data, newest first
    pub years: Vec<i32>,
}

/// Derive the option lists for the current selection. Options follow the
/// geography and award links of the full dataset, not the time window.
pub fn filter_options(input: &ReportInput<'_>, filter: &DashboardFilter) -> FilterOptions {
    let regionals = sorted_options(
        input
            .regionals
            .iter()
            .map(|r| OptionItem { id: r.id, name: r.name.clone() }),
    );

    // Brands with at least one unit in the selected regional
    let brands = sorted_options(
        input
            .brands
            .iter()
            .filter(|b| match filter.regional_id {
                Some(regional_id) => input
                    .units
                    .iter()
                    .any(|u| u.brand_id == b.id && u.regional_id == Some(regional_id)),
                None => true,
            })
            .map(|b| OptionItem { id: b.id, name: b.name.clone() }),
    );

    // Units matching the selected regional and/or brand
    let units = sorted_options(
        input
            .units
            .iter()
            .filter(|u| match filter.regional_id {
                Some(regional_id) => u.regional_id == Some(regional_id),
                None => true,
            })
            .filter(|u| match filter.brand_id {
                Some(brand_id) => u.brand_id == brand_id,
                None => true,
            })
            .map(|u| OptionItem { id: u.id, name: u.name.clone() }),
    );

    // Awards actually granted in the selected unit
    let awarded_in_unit: HashSet<Uuid> = match filter.unit_id {
        Some(unit_id) => input
            .honorees
            .iter()
            .filter(|h| h.is_published && h.unit_id == unit_id)
            .filter_map(|h| h.award_id)
            .collect(),
        None => input.awards.iter().map(|a| a.id).collect(),
    };

    let awards = sorted_options(
        input
            .awards
            .iter()
            .filter(|a| awarded_in_unit.contains(&a.id))
            .map(|a| OptionItem { id: a.id, name: a.name.clone() }),
    );

    let mut years: Vec<i32> = input
        .honorees
        .iter()
        .filter(|h| h.is_published)
        .map(|h| h.awarded_at.year())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));

    FilterOptions {
        regionals,
        brands,
        units,
        awards,
        years,
    }
}

fn sorted_options(items: impl Iterator<Item = OptionItem>) -> Vec<OptionItem> {
    let mut options: Vec<OptionItem> = items.collect();
    options.sort_by(|a, b| a.name.cmp(&b.name));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    fn fixture() -> (
        Vec<premiacoes_common::db::models::Honoree>,
        Vec<premiacoes_common::db::models::Award>,
        Vec<premiacoes_common::db::models::Brand>,
        Vec<premiacoes_common::db::models::Unit>,
        Vec<premiacoes_common::db::models::Regional>,
    ) {
        let regionals = vec![regional(30, "Nordeste"), regional(31, "Sudeste")];
        let brands = vec![brand(1, "Marca A"), brand(2, "Marca B"), brand(3, "Marca C")];
        let units = vec![
            unit(10, "Campus A", 1, Some(30)),
            unit(11, "Campus B", 2, Some(30)),
            unit(12, "Campus C", 3, Some(31)),
        ];
        let awards = vec![award(20, "Destaque"), award(21, "Inovação")];
        let honorees = vec![
            honoree(100, HonoreeSeed {
                brand: 1, unit: 10, award: Some(20), regional: Some(30),
                awarded_at: date(2023, 5, 1), ..Default::default()
            }),
            honoree(101, HonoreeSeed {
                brand: 3, unit: 12, award: Some(21), regional: Some(31),
                awarded_at: date(2024, 9, 1), ..Default::default()
            }),
        ];

        (honorees, awards, brands, units, regionals)
    }

    #[test]
    fn test_regional_narrows_brands_and_units() {
        let (honorees, awards, brands, units, regionals) = fixture();
        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &brands,
            units: &units,
            regionals: &regionals,
        };

        let all = filter_options(&input, &DashboardFilter::default());
        assert_eq!(all.brands.len(), 3);
        assert_eq!(all.units.len(), 3);

        let narrowed = filter_options(
            &input,
            &DashboardFilter { regional_id: Some(id(30)), ..Default::default() },
        );

        // Only brands with a unit in Nordeste remain
        let names: Vec<_> = narrowed.brands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Marca A", "Marca B"]);
        assert_eq!(narrowed.units.len(), 2);

        // Narrowing never enlarges the lists
        assert!(narrowed.brands.len() <= all.brands.len());
        assert!(narrowed.units.len() <= all.units.len());
    }

    #[test]
    fn test_brand_narrows_units_within_regional() {
        let (honorees, awards, brands, units, regionals) = fixture();
        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &brands,
            units: &units,
            regionals: &regionals,
        };

        let narrowed = filter_options(
            &input,
            &DashboardFilter {
                regional_id: Some(id(30)),
                brand_id: Some(id(2)),
                ..Default::default()
            },
        );

        assert_eq!(narrowed.units.len(), 1);
        assert_eq!(narrowed.units[0].name, "Campus B");
    }

    #[test]
    fn test_unit_narrows_awards_to_those_granted_there() {
        let (honorees, awards, brands, units, regionals) = fixture();
        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &brands,
            units: &units,
            regionals: &regionals,
        };

        let narrowed = filter_options(
            &input,
            &DashboardFilter { unit_id: Some(id(10)), ..Default::default() },
        );

        assert_eq!(narrowed.awards.len(), 1);
        assert_eq!(narrowed.awards[0].name, "Destaque");
    }

    #[test]
    fn test_years_are_distinct_and_descending() {
        let (honorees, awards, brands, units, regionals) = fixture();
        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &brands,
            units: &units,
            regionals: &regionals,
        };

        let options = filter_options(&input, &DashboardFilter::default());
        assert_eq!(options.years, vec![2024, 2023]);
    }

    #[test]
    fn test_unpublished_honorees_do_not_feed_options() {
        let awards = vec![award(20, "Oculto")];
        let honorees = vec![honoree(100, HonoreeSeed {
            unit: 10,
            award: Some(20),
            published: false,
            ..Default::default()
        })];
        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &[],
            units: &[],
            regionals: &[],
        };

        let narrowed = filter_options(
            &input,
            &DashboardFilter { unit_id: Some(id(10)), ..Default::default() },
        );
        assert!(narrowed.awards.is_empty());
        assert!(narrowed.years.is_empty());
    }
}
