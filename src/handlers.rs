use crate::config::Config;
use crate::engine::QuotaEngine;
use crate::errors::AppError;
use crate::feed::{FeedSnapshot, FeedStatus};
use crate::models::{
    DashboardReport, DateRange, FilterOptions, FilterSelection, SalespersonFilter,
};
use crate::months::Month;
use crate::policy::QuotaTier;
use crate::quota::MonthlyQuota;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

const FEED_CACHE_KEY: &str = "sales-feed";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Quota engine built from the compiled-in policy.
    pub engine: Arc<QuotaEngine>,
    /// Parsed feed snapshot. Single entry; expires after `feed_cache_ttl_secs`
    /// when that is non-zero, otherwise lives until refreshed.
    pub feed_cache: Cache<String, Arc<FeedSnapshot>>,
}

impl AppState {
    pub fn new(config: Config, engine: QuotaEngine) -> Self {
        let mut builder = Cache::builder().max_capacity(8);
        if config.feed_cache_ttl_secs > 0 {
            builder = builder.time_to_live(Duration::from_secs(config.feed_cache_ttl_secs));
        }

        Self {
            config,
            engine: Arc::new(engine),
            feed_cache: builder.build(),
        }
    }

    /// Returns the cached snapshot, loading it on first use.
    ///
    /// Concurrent callers share a single load.
    pub async fn snapshot(&self) -> Result<Arc<FeedSnapshot>, AppError> {
        let path = self.config.feed_path.clone();
        let engine = Arc::clone(&self.engine);

        self.feed_cache
            .try_get_with(FEED_CACHE_KEY.to_string(), async move {
                FeedSnapshot::load(&path, &engine).await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<AppError>| (*e).clone())
    }

    /// Drops the cached snapshot and loads the feed again.
    pub async fn refresh_snapshot(&self) -> Result<Arc<FeedSnapshot>, AppError> {
        self.feed_cache.invalidate(FEED_CACHE_KEY).await;
        self.snapshot().await
    }
}

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<i32>,
    /// Comma-separated month names, e.g. `Junho,Julho`.
    pub months: Option<String>,
    /// Canonical name, or `Todos` for the whole team.
    pub salesperson: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuotaQuery {
    pub months: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub report: DashboardReport,
    pub fingerprint: String,
}

#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    #[serde(flatten)]
    pub options: FilterOptions,
    pub fingerprint: String,
}

#[derive(Debug, Serialize)]
pub struct SalespersonQuotaResponse {
    pub salesperson: String,
    /// Whether the name is in the alias table's canonical set.
    pub recognized: bool,
    pub tier: QuotaTier,
    pub daily_quota: u32,
    pub months: Vec<MonthlyQuota>,
    pub total: u64,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "sales-quota-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /api/v1/filters
///
/// Years, months and salespeople available in the current snapshot.
pub async fn get_filter_options(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilterOptionsResponse>, AppError> {
    let snapshot = state.snapshot().await?;
    let options = state.engine.filter_options(&snapshot.records);

    Ok(Json(FilterOptionsResponse {
        options,
        fingerprint: snapshot.fingerprint.clone(),
    }))
}

/// GET /api/v1/dashboard
///
/// Team summary and per-salesperson attainment for one filter selection.
/// Missing filters default to the first year in the feed, every month in
/// the feed and the whole team.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    tracing::info!("GET /dashboard - params: {:?}", params);

    let snapshot = state.snapshot().await?;
    let options = state.engine.filter_options(&snapshot.records);
    let selection = resolve_selection(&params, &options)?;

    let report = state.engine.report(&snapshot.records, &selection);

    tracing::info!(
        "Dashboard computed: realized {} / quota {} ({}%)",
        report.summary.total_realized,
        report.summary.total_quota,
        report.summary.percent_attained
    );

    Ok(Json(DashboardResponse {
        report,
        fingerprint: snapshot.fingerprint.clone(),
    }))
}

/// GET /api/v1/quotas/:salesperson
///
/// Month-by-month quota for one salesperson. The name goes through the
/// alias table first, so `thais mendonca` resolves to `Thaís`.
pub async fn get_salesperson_quota(
    State(state): State<Arc<AppState>>,
    Path(salesperson): Path<String>,
    Query(params): Query<QuotaQuery>,
) -> Result<Json<SalespersonQuotaResponse>, AppError> {
    let name = state.engine.standardize(salesperson.trim());
    let months = match params.months.as_deref() {
        Some(raw) => parse_months(raw)?,
        None => state.engine.policy().known_months().into_iter().collect(),
    };

    let resolver = state.engine.resolver();
    let recognized = state.engine.aliases().canonical_names().contains(name.as_str());
    if !recognized {
        tracing::debug!("Quota requested for unrecognized salesperson '{}'", name);
    }

    Ok(Json(SalespersonQuotaResponse {
        recognized,
        tier: resolver.tier(&name),
        daily_quota: resolver.daily_quota(&name),
        months: resolver.monthly_breakdown(&name, &months),
        total: resolver.person_quota(&name, &months),
        salesperson: name,
    }))
}

/// POST /api/v1/feed/refresh
///
/// Reloads the feed file, replacing the cached snapshot.
pub async fn refresh_feed(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeedStatus>, AppError> {
    tracing::info!("Refreshing sales feed snapshot");
    let snapshot = state.refresh_snapshot().await?;
    Ok(Json(snapshot.status()))
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Parses a comma-separated month list. Blank entries are skipped.
pub fn parse_months(raw: &str) -> Result<BTreeSet<Month>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(|m| {
            m.parse::<Month>()
                .map_err(|e| AppError::BadRequest(e.to_string()))
        })
        .collect()
}

/// Turns query parameters into a filter selection, filling defaults from the snapshot.
pub fn resolve_selection(
    params: &DashboardQuery,
    options: &FilterOptions,
) -> Result<FilterSelection, AppError> {
    let year = params
        .year
        .or_else(|| options.years.first().copied())
        .unwrap_or_else(|| Utc::now().year());

    let months = match params.months.as_deref() {
        Some(raw) => parse_months(raw)?,
        None => options.months.iter().copied().collect(),
    };

    let date_range = match (params.start, params.end) {
        (Some(start), Some(end)) if start <= end => Some(DateRange { start, end }),
        (Some(start), Some(end)) => {
            return Err(AppError::BadRequest(format!(
                "start ({}) must not be after end ({})",
                start, end
            )))
        }
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "start and end must be given together".to_string(),
            ))
        }
    };

    Ok(FilterSelection::new(year, months)
        .with_salesperson(SalespersonFilter::parse(params.salesperson.as_deref()))
        .with_date_range(date_range))
}
