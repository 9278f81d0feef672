//! HTTP request handlers

use super::state::AppState;
use crate::export::{export_filename, to_csv_string};
use crate::search::{all_months, parse_months, recent_start_months, SearchCriteria, SearchError};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tera::Context;

/// Submitted search form
///
/// Parsed by hand because the month checkboxes repeat the same field name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchForm {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub title: String,
    pub company: String,
    pub months: Vec<String>,
    pub year: String,
    pub contacts: bool,
    pub template: String,
    pub view: String,
}

impl SearchForm {
    /// Parse an `application/x-www-form-urlencoded` body
    pub fn parse(body: &[u8]) -> Self {
        let mut form = SearchForm {
            view: "table".to_string(),
            ..Default::default()
        };

        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "api_key" => form.api_key = value.into_owned(),
                "title" => form.title = value.trim().to_string(),
                "company" => form.company = value.trim().to_string(),
                "month" => form.months.push(value.into_owned()),
                "year" => form.year = value.trim().to_string(),
                "contacts" => form.contacts = matches!(value.as_ref(), "on" | "true" | "1"),
                "template" => form.template = value.into_owned(),
                "view" => form.view = value.into_owned(),
                _ => {}
            }
        }

        form
    }

    /// Validate the form into search criteria
    pub fn criteria(&self) -> Result<SearchCriteria, SearchError> {
        let months = parse_months(&self.months)?;
        let year = self
            .year
            .parse()
            .map_err(|_| SearchError::YearNotANumber(self.year.clone()))?;
        SearchCriteria::new(&self.title, &self.company, months, year, self.contacts)
    }

    fn note_template(&self) -> Option<&str> {
        Some(self.template.as_str()).filter(|t| !t.trim().is_empty())
    }
}

/// One checkbox of the month picker
#[derive(Debug, Serialize)]
struct MonthOption {
    name: &'static str,
    checked: bool,
}

fn month_options(selected: &[String]) -> Vec<MonthOption> {
    all_months()
        .into_iter()
        .map(|month| MonthOption {
            name: month.name(),
            checked: selected.iter().any(|s| s.eq_ignore_ascii_case(month.name())),
        })
        .collect()
}

/// Form pre-filled with the configured defaults and the recent window
fn default_form(state: &AppState) -> SearchForm {
    let today = chrono::Local::now().date_naive();
    let window = recent_start_months(today);
    let outreach = &state.settings.outreach;

    SearchForm {
        api_key: String::new(),
        title: outreach.default_title.clone(),
        company: outreach.default_company.clone(),
        months: window.iter().map(|(m, _)| m.name().to_string()).collect(),
        year: window
            .first()
            .map(|(_, year)| year.to_string())
            .unwrap_or_default(),
        contacts: outreach.extract_contacts,
        template: outreach.note_template.clone(),
        view: "table".to_string(),
    }
}

fn render_form(state: &AppState, form: &SearchForm, error: Option<String>) -> Response {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("form", form);
    ctx.insert("month_options", &month_options(&form.months));
    ctx.insert("has_configured_key", &state.has_configured_key());
    ctx.insert("error", &error);

    let status = if error.is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    match state.templates.render_with_context("index.html", &ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> Response {
    let form = default_form(&state);
    render_form(&state, &form, None)
}

/// Search handler
pub async fn search(State(state): State<AppState>, body: String) -> Response {
    let form = SearchForm::parse(body.as_bytes());

    let criteria = match form.criteria() {
        Ok(criteria) => criteria,
        Err(e) => return render_form(&state, &form, Some(e.to_string())),
    };

    let api_key = state
        .settings
        .resolve_api_key(Some(&form.api_key))
        .unwrap_or_default();

    let report = match state
        .pipeline
        .run(&criteria, &api_key, form.note_template())
        .await
    {
        Ok(report) => report,
        Err(e) => {
            tracing::info!("Search not started: {}", e);
            return render_form(&state, &form, Some(e.to_string()));
        }
    };

    let view = if form.view == "notes" { "notes" } else { "table" };
    let export_id = state.reports.insert(report.clone()).await;

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("report", &report);
    ctx.insert("result_count", &report.candidates.len());
    ctx.insert("view", view);
    ctx.insert("show_contacts", &criteria.extract_contacts());
    ctx.insert("show_notes", &form.note_template().is_some());
    ctx.insert("export_id", &export_id);

    match state.templates.render_with_context("results.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// CSV download of a cached report
pub async fn export_csv(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = id.trim_end_matches(".csv");

    let Some(report) = state.reports.get(id).await else {
        return (
            StatusCode::NOT_FOUND,
            "This result set has expired. Run the search again to download it.",
        )
            .into_response();
    };

    match to_csv_string(&report.candidates) {
        Ok(csv) => {
            let filename = export_filename(chrono::Local::now().naive_local());
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("CSV export failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "CSV export failed").into_response()
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
