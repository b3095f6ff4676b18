//! Serializable dashboard export
//!
//! Bundles the filter state, the computed aggregates, and the raw filtered
//! rows for the client-triggered JSON download.

use crate::{filtered_honorees, DashboardFilter, DashboardReport, ReportInput};
use chrono::{DateTime, NaiveDate, Utc};
use premiacoes_common::db::models::Honoree;
use serde::{Deserialize, Serialize};

/// The downloadable dashboard snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardExport {
    pub generated_at: DateTime<Utc>,
    pub filter: DashboardFilter,
    pub report: DashboardReport,
    pub honorees: Vec<Honoree>,
}

/// Build the export bundle for the current filter state
pub fn build_export(
    input: &ReportInput<'_>,
    filter: &DashboardFilter,
    reference: NaiveDate,
    generated_at: DateTime<Utc>,
) -> DashboardExport {
    let report = DashboardReport::compute(input, filter, reference);
    let honorees = filtered_honorees(input.honorees, filter, reference)
        .into_iter()
        .cloned()
        .collect();

    DashboardExport {
        generated_at,
        filter: *filter,
        report,
        honorees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    #[test]
    fn test_export_carries_filtered_rows() {
        let brands = vec![brand(1, "A"), brand(2, "B")];
        let units = vec![unit(10, "U1", 1, None), unit(11, "U2", 2, None)];
        let honorees = vec![
            honoree(100, HonoreeSeed { brand: 1, unit: 10, ..Default::default() }),
            honoree(101, HonoreeSeed { brand: 2, unit: 11, ..Default::default() }),
        ];
        let input = ReportInput {
            honorees: &honorees,
            awards: &[],
            brands: &brands,
            units: &units,
            regionals: &[],
        };

        let filter = DashboardFilter { brand_id: Some(id(1)), ..Default::default() };
        let generated_at = DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let export = build_export(&input, &filter, date(2024, 6, 15), generated_at);

        assert_eq!(export.honorees.len(), 1);
        assert_eq!(export.honorees[0].id, id(100));
        assert_eq!(export.report.kpis.total, 1);

        // The bundle serializes cleanly for download
        let json = serde_json::to_value(&export).unwrap();
        assert!(json.get("report").is_some());
        assert!(json.get("honorees").is_some());
    }
}
