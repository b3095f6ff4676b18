//! Award and regional rankings with nested breakdowns

use crate::{count_by, ranked, NamedCount, ReportInput};
use premiacoes_common::db::models::Honoree;
use serde::{Deserialize, Serialize};

/// Maximum entries in the award ranking
pub const AWARD_RANKING_LIMIT: usize = 5;

/// One award with the distribution of its honorees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRankingEntry {
    pub award: NamedCount,
    pub by_regional: Vec<NamedCount>,
    pub by_brand: Vec<NamedCount>,
    pub by_unit: Vec<NamedCount>,
}

/// One regional with the distribution of its honorees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalRankingEntry {
    pub regional: NamedCount,
    pub by_brand: Vec<NamedCount>,
    pub by_unit: Vec<NamedCount>,
    pub by_award: Vec<NamedCount>,
}

fn breakdown_by_brand(group: &[&Honoree], input: &ReportInput<'_>) -> Vec<NamedCount> {
    let counts = count_by(group.iter().map(|h| h.brand_id));
    ranked(counts, |id| {
        input.brands.iter().find(|b| b.id == id).map(|b| b.name.clone())
    })
}

fn breakdown_by_unit(group: &[&Honoree], input: &ReportInput<'_>) -> Vec<NamedCount> {
    let counts = count_by(group.iter().map(|h| h.unit_id));
    ranked(counts, |id| {
        input.units.iter().find(|u| u.id == id).map(|u| u.name.clone())
    })
}

fn breakdown_by_regional(group: &[&Honoree], input: &ReportInput<'_>) -> Vec<NamedCount> {
    let counts = count_by(group.iter().filter_map(|h| h.regional_id));
    ranked(counts, |id| {
        input.regionals.iter().find(|r| r.id == id).map(|r| r.name.clone())
    })
}

fn breakdown_by_award(group: &[&Honoree], input: &ReportInput<'_>) -> Vec<NamedCount> {
    let counts = count_by(group.iter().filter_map(|h| h.award_id));
    ranked(counts, |id| {
        input.awards.iter().find(|a| a.id == id).map(|a| a.name.clone())
    })
}

fn group_of<'a>(filtered: &[&'a Honoree], key: impl Fn(&Honoree) -> bool) -> Vec<&'a Honoree> {
    filtered.iter().copied().filter(|h| key(h)).collect()
}

/// Top awards by honoree count, each carrying its regional/brand/unit
/// distribution. Honorees referencing a deleted award are left out.
pub fn award_ranking(filtered: &[&Honoree], input: &ReportInput<'_>) -> Vec<AwardRankingEntry> {
    let counts = count_by(filtered.iter().filter_map(|h| h.award_id));

    let mut entries = ranked(counts, |id| {
        input.awards.iter().find(|a| a.id == id).map(|a| a.name.clone())
    });
    entries.truncate(AWARD_RANKING_LIMIT);

    entries
        .into_iter()
        .map(|award| {
            let group = group_of(filtered, |h| h.award_id == Some(award.id));
            AwardRankingEntry {
                by_regional: breakdown_by_regional(&group, input),
                by_brand: breakdown_by_brand(&group, input),
                by_unit: breakdown_by_unit(&group, input),
                award,
            }
        })
        .collect()
}

/// All regionals with at least one filtered honoree, no cap, each carrying
/// its brand/unit/award distribution.
pub fn regional_ranking(filtered: &[&Honoree], input: &ReportInput<'_>) -> Vec<RegionalRankingEntry> {
    let counts = count_by(filtered.iter().filter_map(|h| h.regional_id));

    let entries = ranked(counts, |id| {
        input.regionals.iter().find(|r| r.id == id).map(|r| r.name.clone())
    });

    entries
        .into_iter()
        .map(|regional| {
            let group = group_of(filtered, |h| h.regional_id == Some(regional.id));
            RegionalRankingEntry {
                by_brand: breakdown_by_brand(&group, input),
                by_unit: breakdown_by_unit(&group, input),
                by_award: breakdown_by_award(&group, input),
                regional,
            }
        })
        .collect()
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
        let awards: Vec<_> = (20..=27).map(|n| award(n, &format!("Prêmio {}", n))).collect();
        let brands = vec![brand(1, "Marca A"), brand(2, "Marca B")];
        let regionals = vec![regional(30, "Nordeste"), regional(31, "Sudeste")];
        let units = vec![
            unit(10, "Campus A", 1, Some(30)),
            unit(11, "Campus B", 2, Some(31)),
        ];

        // Award 20+n receives 8-n honorees, alternating geography
        let mut honorees = Vec::new();
        let mut next = 1000u128;
        for (i, a) in (20u128..=27).enumerate() {
            for j in 0..(8 - i) {
                let (b, u, r) = if j % 2 == 0 { (1, 10, 30) } else { (2, 11, 31) };
                honorees.push(honoree(
                    next,
                    HonoreeSeed {
                        brand: b,
                        unit: u,
                        award: Some(a),
                        regional: Some(r),
                        ..Default::default()
                    },
                ));
                next += 1;
            }
        }

        (honorees, awards, brands, units, regionals)
    }

    #[test]
    fn test_award_ranking_capped_and_ordered() {
        let (honorees, awards, brands, units, regionals) = fixture();
        let refs: Vec<&_> = honorees.iter().collect();
        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &brands,
            units: &units,
            regionals: &regionals,
        };

        let ranking = award_ranking(&refs, &input);

        assert_eq!(ranking.len(), AWARD_RANKING_LIMIT);
        assert_eq!(ranking[0].award.name, "Prêmio 20");
        assert_eq!(ranking[0].award.count, 8);
        for pair in ranking.windows(2) {
            assert!(pair[0].award.count >= pair[1].award.count);
        }
    }

    #[test]
    fn test_award_breakdowns_sum_to_award_count() {
        let (honorees, awards, brands, units, regionals) = fixture();
        let refs: Vec<&_> = honorees.iter().collect();
        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &brands,
            units: &units,
            regionals: &regionals,
        };

        for entry in award_ranking(&refs, &input) {
            let brand_sum: usize = entry.by_brand.iter().map(|c| c.count).sum();
            let unit_sum: usize = entry.by_unit.iter().map(|c| c.count).sum();
            let regional_sum: usize = entry.by_regional.iter().map(|c| c.count).sum();
            assert_eq!(brand_sum, entry.award.count);
            assert_eq!(unit_sum, entry.award.count);
            assert_eq!(regional_sum, entry.award.count);
        }
    }

    #[test]
    fn test_regional_ranking_not_capped() {
        let (honorees, awards, brands, units, regionals) = fixture();
        let refs: Vec<&_> = honorees.iter().collect();
        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &brands,
            units: &units,
            regionals: &regionals,
        };

        let ranking = regional_ranking(&refs, &input);
        assert_eq!(ranking.len(), 2);

        let total: usize = ranking.iter().map(|r| r.regional.count).sum();
        assert_eq!(total, refs.len());
    }

    #[test]
    fn test_dangling_award_excluded() {
        let awards = vec![award(20, "Vivo")];
        let brands = vec![brand(1, "A")];
        let units = vec![unit(10, "U", 1, None)];
        let honorees = vec![
            honoree(100, HonoreeSeed { award: Some(20), ..Default::default() }),
            // References an award that no longer exists
            honoree(101, HonoreeSeed { award: Some(99), ..Default::default() }),
            honoree(102, HonoreeSeed { award: None, ..Default::default() }),
        ];
        let refs: Vec<&_> = honorees.iter().collect();
        let input = ReportInput {
            honorees: &honorees,
            awards: &awards,
            brands: &brands,
            units: &units,
            regionals: &[],
        };

        let ranking = award_ranking(&refs, &input);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].award.name, "Vivo");
        assert_eq!(ranking[0].award.count, 1);
    }

    #[test]
    fn test_honorees_without_regional_do_not_rank() {
        let brands = vec![brand(1, "A")];
        let units = vec![unit(10, "U", 1, None)];
        let honorees = vec![honoree(100, HonoreeSeed::default())];
        let refs: Vec<&_> = honorees.iter().collect();
        let input = ReportInput {
            honorees: &honorees,
            awards: &[],
            brands: &brands,
            units: &units,
            regionals: &[],
        };

        assert!(regional_ranking(&refs, &input).is_empty());
    }
}
