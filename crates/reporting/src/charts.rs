//! Chart series: unit bars and brand shares

use crate::{count_by, ranked, NamedCount};
use premiacoes_common::db::models::{Brand, Honoree, Unit};

/// Maximum bars on the unit chart
pub const BAR_CHART_LIMIT: usize = 10;

/// Top units by honoree count, capped for the bar chart
pub fn unit_bar_chart(filtered: &[&Honoree], units: &[Unit]) -> Vec<NamedCount> {
    let counts = count_by(filtered.iter().map(|h| h.unit_id));

    let mut entries = ranked(counts, |id| {
        units.iter().find(|u| u.id == id).map(|u| u.name.clone())
    });
    entries.truncate(BAR_CHART_LIMIT);
    entries
}

/// Honoree share per brand for the pie chart, all resolvable brands
pub fn brand_pie_chart(filtered: &[&Honoree], brands: &[Brand]) -> Vec<NamedCount> {
    let counts = count_by(filtered.iter().map(|h| h.brand_id));

    ranked(counts, |id| {
        brands.iter().find(|b| b.id == id).map(|b| b.name.clone())
    })
}
