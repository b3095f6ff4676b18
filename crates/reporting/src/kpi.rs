//! KPI block: totals, distinct counts, and the leading brand/unit

use crate::{count_by, ranked, NamedCount};
use premiacoes_common::db::models::{Brand, Honoree, Unit};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Aggregate counters shown at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    pub total: usize,
    pub brands_count: usize,
    pub units_count: usize,
    pub top_brand: Option<NamedCount>,
    pub top_unit: Option<NamedCount>,
}

/// Compute the KPI block for a filtered honoree set. Top entries break
/// count ties by name so input order cannot change the result; ids that
/// resolve to no reference row are left out of the top rankings.
pub fn compute_kpis(filtered: &[&Honoree], brands: &[Brand], units: &[Unit]) -> Kpis {
    let total = filtered.len();

    let brands_count = filtered
        .iter()
        .map(|h| h.brand_id)
        .collect::<HashSet<_>>()
        .len();

    let units_count = filtered
        .iter()
        .map(|h| h.unit_id)
        .collect::<HashSet<_>>()
        .len();

    let brand_counts = count_by(filtered.iter().map(|h| h.brand_id));
    let top_brand = ranked(brand_counts, |id| {
        brands.iter().find(|b| b.id == id).map(|b| b.name.clone())
    })
    .into_iter()
    .next();

    let unit_counts = count_by(filtered.iter().map(|h| h.unit_id));
    let top_unit = ranked(unit_counts, |id| {
        units.iter().find(|u| u.id == id).map(|u| u.name.clone())
    })
    .into_iter()
    .next();

    Kpis {
        total,
        brands_count,
        units_count,
        top_brand,
        top_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    #[test]
    fn test_total_equals_filtered_length() {
        let brands = vec![brand(1, "A")];
        let units = vec![unit(10, "U", 1, None)];
        let honorees = vec![
            honoree(100, HonoreeSeed::default()),
            honoree(101, HonoreeSeed::default()),
            honoree(102, HonoreeSeed::default()),
        ];
        let refs: Vec<&_> = honorees.iter().collect();

        let kpis = compute_kpis(&refs, &brands, &units);
        assert_eq!(kpis.total, 3);
        assert_eq!(kpis.brands_count, 1);
        assert_eq!(kpis.units_count, 1);
    }

    #[test]
    fn test_distinct_counts() {
        let brands = vec![brand(1, "A"), brand(2, "B")];
        let units = vec![
            unit(10, "U1", 1, None),
            unit(11, "U2", 1, None),
            unit(12, "U3", 2, None),
        ];
        let honorees = vec![
            honoree(100, HonoreeSeed { brand: 1, unit: 10, ..Default::default() }),
            honoree(101, HonoreeSeed { brand: 1, unit: 11, ..Default::default() }),
            honoree(102, HonoreeSeed { brand: 2, unit: 12, ..Default::default() }),
            honoree(103, HonoreeSeed { brand: 2, unit: 12, ..Default::default() }),
        ];
        let refs: Vec<&_> = honorees.iter().collect();

        let kpis = compute_kpis(&refs, &brands, &units);
        assert_eq!(kpis.total, 4);
        assert_eq!(kpis.brands_count, 2);
        assert_eq!(kpis.units_count, 3);
    }

    #[test]
    fn test_top_brand_and_unit() {
        let brands = vec![brand(1, "Menor"), brand(2, "Maior")];
        let units = vec![unit(10, "U1", 1, None), unit(11, "U2", 2, None)];
        let honorees = vec![
            honoree(100, HonoreeSeed { brand: 1, unit: 10, ..Default::default() }),
            honoree(101, HonoreeSeed { brand: 2, unit: 11, ..Default::default() }),
            honoree(102, HonoreeSeed { brand: 2, unit: 11, ..Default::default() }),
        ];
        let refs: Vec<&_> = honorees.iter().collect();

        let kpis = compute_kpis(&refs, &brands, &units);
        assert_eq!(kpis.top_brand.as_ref().unwrap().name, "Maior");
        assert_eq!(kpis.top_brand.as_ref().unwrap().count, 2);
        assert_eq!(kpis.top_unit.as_ref().unwrap().name, "U2");
    }

    #[test]
    fn test_top_tie_breaks_by_name_not_input_order() {
        let brands = vec![brand(2, "Zeta"), brand(1, "Alfa")];
        let units = vec![unit(10, "U1", 1, None), unit(11, "U2", 2, None)];

        // One honoree each: the tie must resolve to the alphabetically
        // first brand regardless of which row comes first.
        let forward = vec![
            honoree(100, HonoreeSeed { brand: 1, unit: 10, ..Default::default() }),
            honoree(101, HonoreeSeed { brand: 2, unit: 11, ..Default::default() }),
        ];
        let backward: Vec<_> = forward.iter().rev().cloned().collect();

        let refs_a: Vec<&_> = forward.iter().collect();
        let refs_b: Vec<&_> = backward.iter().collect();

        let kpis_a = compute_kpis(&refs_a, &brands, &units);
        let kpis_b = compute_kpis(&refs_b, &brands, &units);

        assert_eq!(kpis_a.top_brand.as_ref().unwrap().name, "Alfa");
        assert_eq!(kpis_a.top_brand, kpis_b.top_brand);
    }

    #[test]
    fn test_dangling_brand_excluded_from_top_but_counted_distinct() {
        // Brand 9 was deleted; its honorees still count as a distinct id
        // but cannot appear as the named top brand.
        let brands = vec![brand(1, "Viva")];
        let units = vec![unit(10, "U1", 1, None)];
        let honorees = vec![
            honoree(100, HonoreeSeed { brand: 9, unit: 10, ..Default::default() }),
            honoree(101, HonoreeSeed { brand: 9, unit: 10, ..Default::default() }),
            honoree(102, HonoreeSeed { brand: 1, unit: 10, ..Default::default() }),
        ];
        let refs: Vec<&_> = honorees.iter().collect();

        let kpis = compute_kpis(&refs, &brands, &units);
        assert_eq!(kpis.brands_count, 2);
        assert_eq!(kpis.top_brand.as_ref().unwrap().name, "Viva");
        assert_eq!(kpis.top_brand.as_ref().unwrap().count, 1);
    }

    #[test]
    fn test_empty_set() {
        let kpis = compute_kpis(&[], &[], &[]);
        assert_eq!(kpis.total, 0);
        assert_eq!(kpis.brands_count, 0);
        assert_eq!(kpis.units_count, 0);
        assert!(kpis.top_brand.is_none());
        assert!(kpis.top_unit.is_none());
    }
}
