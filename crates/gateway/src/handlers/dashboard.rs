//! Executive dashboard handlers
//!
//! The page model is a full-table fetch followed by in-memory
//! aggregation: all reference tables and the published honorees are
//! loaded, then handed as plain rows to the reporting crate. Acceptable
//! at this data volume; server-side grouping is the known scale-up path.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::AppState;
use premiacoes_common::{
    auth::AuthContext,
    db::{
        models::{Award, Brand, Honoree, Regional, Unit},
        Repository,
    },
    errors::Result,
    metrics,
};
use premiacoes_reporting::{
    build_export, filter_options, DashboardFilter, DashboardReport, FilterOptions, ReportInput,
};

/// Everything the dashboard page renders in one response
#[derive(Serialize)]
pub struct DashboardResponse {
    pub filter: DashboardFilter,
    pub report: DashboardReport,
    pub options: FilterOptions,
}

struct Tables {
    honorees: Vec<Honoree>,
    awards: Vec<Award>,
    brands: Vec<Brand>,
    units: Vec<Unit>,
    regionals: Vec<Regional>,
}

impl Tables {
    fn input(&self) -> ReportInput<'_> {
        ReportInput {
            honorees: &self.honorees,
            awards: &self.awards,
            brands: &self.brands,
            units: &self.units,
            regionals: &self.regionals,
        }
    }
}

async fn fetch_tables(repo: &Repository) -> Result<Tables> {
    Ok(Tables {
        honorees: repo.list_honorees(true).await?,
        awards: repo.list_awards().await?,
        brands: repo.list_brands().await?,
        units: repo.list_units().await?,
        regionals: repo.list_regionals().await?,
    })
}

/// Compute the dashboard for the given filter state
pub async fn dashboard(
    State(state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> Result<Json<DashboardResponse>> {
    let repo = Repository::new(state.db.clone());
    let tables = fetch_tables(&repo).await?;

    let start = std::time::Instant::now();
    let reference = chrono::Utc::now().date_naive();

    let input = tables.input();
    let report = DashboardReport::compute(&input, &filter, reference);
    let options = filter_options(&input, &filter);

    metrics::record_dashboard(start.elapsed().as_secs_f64(), tables.honorees.len());

    Ok(Json(DashboardResponse {
        filter,
        report,
        options,
    }))
}

/// Download the aggregates plus the raw filtered rows as a JSON attachment
pub async fn export(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(filter): Query<DashboardFilter>,
) -> Result<impl IntoResponse> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());
    let tables = fetch_tables(&repo).await?;

    let now = chrono::Utc::now();
    let bundle = build_export(&tables.input(), &filter, now.date_naive(), now);

    tracing::info!(
        profile_id = %auth.profile_id,
        honorees = bundle.honorees.len(),
        "Dashboard export generated"
    );

    let filename = format!(
        "attachment; filename=\"premiacoes-dashboard-{}.json\"",
        now.format("%Y-%m-%d")
    );

    Ok((
        [(header::CONTENT_DISPOSITION, filename)],
        Json(bundle),
    ))
}
