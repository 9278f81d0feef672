//! Search execution across the selected months

use super::models::{SearchCriteria, SearchError, SearchReport};
use crate::engines::{Provider, RequestParams, ResponseError};
use crate::outreach::render_note;
use crate::query::build_query;
use crate::results::{
    extract_emails, extract_phones, parse_candidate, Candidate, EngineError, MonthFailure,
    MonthTiming, RawResult, ResultContainer,
};
use chrono::Month;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Turns criteria into one provider query per month and collects candidates
///
/// Months run one after another in selection order. A month whose provider
/// call fails is recorded and skipped; the remaining months still run.
pub struct SearchPipeline {
    provider: Arc<dyn Provider>,
    num_results: u32,
}

impl SearchPipeline {
    /// Create a new pipeline on top of a provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            num_results: 10,
        }
    }

    /// Set the result count hint sent with every query
    pub fn with_num_results(mut self, num_results: u32) -> Self {
        self.num_results = num_results;
        self
    }

    /// Run a full search
    ///
    /// A blank `api_key` or an empty month selection fails before any
    /// provider call. When `note_template` is given every candidate gets a
    /// rendered note.
    pub async fn run(
        &self,
        criteria: &SearchCriteria,
        api_key: &str,
        note_template: Option<&str>,
    ) -> Result<SearchReport, SearchError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(SearchError::MissingCredential);
        }
        if criteria.months().is_empty() {
            return Err(SearchError::NoMonthsSelected);
        }

        info!(
            "Searching {} month(s) for '{}' at '{}'",
            criteria.months().len(),
            criteria.title(),
            criteria.company()
        );

        let mut container = ResultContainer::new();
        let mut queries = Vec::with_capacity(criteria.months().len());

        for &month in criteria.months() {
            let label = criteria.month_label(month);
            let query = self.month_query(criteria, month);
            queries.push(query.clone());

            let start = Instant::now();
            match self.run_month_search(&query, api_key, &label).await {
                Ok(raw_results) => {
                    container.add_timing(MonthTiming {
                        month: label.clone(),
                        time_ms: start.elapsed().as_millis() as u64,
                        result_count: raw_results.len(),
                    });
                    debug!("{} returned {} results", label, raw_results.len());

                    for raw in &raw_results {
                        let candidate = self.build_candidate(raw, criteria, month, note_template);
                        container.add_candidate(candidate);
                    }
                }
                Err(failure) => {
                    warn!("{}", failure);
                    container.add_failure(failure);
                }
            }
        }

        let duplicates = container.duplicate_count();
        let (candidates, failures, timings) = container.into_parts();

        if candidates.is_empty() {
            info!("No profiles found");
        } else {
            info!(
                "Found {} profiles ({} duplicates dropped, {} month(s) failed)",
                candidates.len(),
                duplicates,
                failures.len()
            );
        }

        Ok(SearchReport {
            title: criteria.title().to_string(),
            company: criteria.company().to_string(),
            year: criteria.year(),
            queries,
            candidates,
            failures,
            timings,
            duplicates,
        })
    }

    /// Query issued for one month of `criteria`
    pub fn month_query(&self, criteria: &SearchCriteria, month: Month) -> String {
        build_query(
            criteria.title(),
            criteria.company(),
            month.name(),
            criteria.year(),
            criteria.extract_contacts(),
        )
    }

    /// One provider call; failures come back as a value for this month only
    pub async fn run_month_search(
        &self,
        query: &str,
        api_key: &str,
        month_label: &str,
    ) -> Result<Vec<RawResult>, MonthFailure> {
        let params = RequestParams::new(query, api_key).with_num(self.num_results);

        self.provider
            .search(&params)
            .await
            .map_err(|e| MonthFailure {
                month: month_label.to_string(),
                error: classify_error(&e),
                message: e.to_string(),
            })
    }

    fn build_candidate(
        &self,
        raw: &RawResult,
        criteria: &SearchCriteria,
        month: Month,
        note_template: Option<&str>,
    ) -> Candidate {
        let mut candidate = parse_candidate(raw, &criteria.month_label(month));

        if criteria.extract_contacts() {
            candidate.emails = Some(extract_emails(raw.snippet()));
            candidate.phones = Some(extract_phones(raw.snippet()));
        }

        if let Some(template) = note_template {
            candidate.note = Some(render_note(
                template,
                &candidate.name,
                criteria.company(),
                month.name(),
                criteria.year(),
            ));
        }

        candidate
    }
}

/// Map a provider error onto an [`EngineError`] kind
fn classify_error(error: &anyhow::Error) -> EngineError {
    if let Some(response_error) = error.downcast_ref::<ResponseError>() {
        return match response_error {
            ResponseError::Status { code: 429, .. } => EngineError::TooManyRequests,
            ResponseError::Status { code: 401 | 403, .. } => EngineError::AccessDenied,
            ResponseError::Status { code, .. } => EngineError::HttpError(*code),
            ResponseError::Provider(_) => EngineError::ProviderError,
            ResponseError::Parse(_) => EngineError::ParseError,
        };
    }

    if let Some(reqwest_error) = error.downcast_ref::<reqwest::Error>() {
        return if reqwest_error.is_timeout() {
            EngineError::Timeout
        } else {
            EngineError::NetworkError
        };
    }

    EngineError::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Provider answering from canned results keyed by the month in the query
    #[derive(Default)]
    struct FakeProvider {
        responses: HashMap<&'static str, Vec<RawResult>>,
        failing: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn respond(mut self, month: &'static str, results: Vec<RawResult>) -> Self {
            self.responses.insert(month, results);
            self
        }

        fn fail(mut self, month: &'static str) -> Self {
            self.failing.push(month);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Provider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn search(&self, params: &RequestParams) -> anyhow::Result<Vec<RawResult>> {
            self.calls.lock().unwrap().push(params.query.clone());

            if let Some(month) = self.failing.iter().find(|m| params.query.contains(*m)) {
                let err = ResponseError::Status {
                    code: 503,
                    message: None,
                };
                return Err(anyhow::Error::from(err).context(format!("{} unavailable", month)));
            }

            Ok(self
                .responses
                .iter()
                .find(|(month, _)| params.query.contains(*month))
                .map(|(_, results)| results.clone())
                .unwrap_or_default())
        }
    }

    fn profile(name: &str, slug: &str) -> RawResult {
        RawResult::new(
            format!("{} - Product Manager - Google", name),
            format!("https://www.linkedin.com/in/{}", slug),
            format!("{} started at Google. Reach me at {}@example.com", name, slug),
        )
    }

    fn criteria(months: Vec<Month>, contacts: bool) -> SearchCriteria {
        SearchCriteria::new("Product Manager", "Google", months, 2025, contacts).unwrap()
    }

    #[tokio::test]
    async fn test_duplicates_across_months_are_dropped() {
        let provider = Arc::new(
            FakeProvider::default()
                .respond(
                    "August",
                    vec![profile("Ann", "ann"), profile("Bob", "bob"), profile("Cy", "shared")],
                )
                .respond("September", vec![profile("Cy again", "shared"), profile("Di", "di")]),
        );
        let pipeline = SearchPipeline::new(provider.clone());

        let report = pipeline
            .run(
                &criteria(vec![Month::August, Month::September], false),
                "key",
                None,
            )
            .await
            .unwrap();

        assert_eq!(report.candidates.len(), 4);
        assert_eq!(report.duplicates, 1);
        let names: Vec<_> = report.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cy", "Di"]);
        assert_eq!(report.candidates[2].started, "August 2025");
        assert!(report.failures.is_empty());
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_calls() {
        let provider = Arc::new(FakeProvider::default().respond("August", vec![profile("Ann", "ann")]));
        let pipeline = SearchPipeline::new(provider.clone());

        for key in ["", "   "] {
            let err = pipeline
                .run(&criteria(vec![Month::August], false), key, None)
                .await
                .unwrap_err();
            assert_eq!(err, SearchError::MissingCredential);
        }
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_no_months_makes_no_calls() {
        let provider = Arc::new(FakeProvider::default());
        let pipeline = SearchPipeline::new(provider.clone());

        let err = pipeline
            .run(&criteria(vec![], false), "key", None)
            .await
            .unwrap_err();

        assert_eq!(err, SearchError::NoMonthsSelected);
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_month_is_reported_and_skipped() {
        let provider = Arc::new(
            FakeProvider::default()
                .respond("August", vec![profile("Ann", "ann"), profile("Bob", "bob")])
                .fail("September"),
        );
        let pipeline = SearchPipeline::new(provider.clone());

        let report = pipeline
            .run(
                &criteria(vec![Month::September, Month::August], false),
                "key",
                None,
            )
            .await
            .unwrap();

        assert_eq!(report.candidates.len(), 2);
        assert!(report.candidates.iter().all(|c| c.started == "August 2025"));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].month, "September 2025");
        assert_eq!(report.failures[0].error, EngineError::HttpError(503));
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_set_is_not_an_error() {
        let pipeline = SearchPipeline::new(Arc::new(FakeProvider::default()));

        let report = pipeline
            .run(&criteria(vec![Month::May], false), "key", None)
            .await
            .unwrap();

        assert!(report.is_empty());
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_months_are_searched_in_selection_order() {
        let provider = Arc::new(FakeProvider::default());
        let pipeline = SearchPipeline::new(provider.clone());

        pipeline
            .run(
                &criteria(vec![Month::October, Month::April, Month::July], false),
                "key",
                None,
            )
            .await
            .unwrap();

        let calls = provider.calls();
        assert!(calls[0].contains("\"Started October 2025\""));
        assert!(calls[1].contains("\"Started April 2025\""));
        assert!(calls[2].contains("\"Started July 2025\""));
    }

    #[tokio::test]
    async fn test_contacts_and_notes_are_filled() {
        let provider = Arc::new(FakeProvider::default().respond("May", vec![profile("Ann Lee", "ann")]));
        let pipeline = SearchPipeline::new(provider.clone());

        let report = pipeline
            .run(
                &criteria(vec![Month::May], true),
                "key",
                Some("Hi {Name}, welcome to {Company} since {Month} {Year}"),
            )
            .await
            .unwrap();

        let candidate = &report.candidates[0];
        assert_eq!(
            candidate.emails.as_ref().unwrap().iter().next().map(String::as_str),
            Some("ann@example.com")
        );
        assert!(candidate.phones.as_ref().unwrap().is_empty());
        assert_eq!(
            candidate.note.as_deref(),
            Some("Hi Ann Lee, welcome to Google since May 2025")
        );
        assert!(provider.calls()[0].contains("OR"));
    }

    #[test]
    fn test_classify_error() {
        let err = anyhow::Error::from(ResponseError::Status {
            code: 429,
            message: None,
        });
        assert_eq!(classify_error(&err), EngineError::TooManyRequests);

        let err = anyhow::Error::from(ResponseError::Status {
            code: 403,
            message: Some("Forbidden".into()),
        });
        assert_eq!(classify_error(&err), EngineError::AccessDenied);

        let err = anyhow::Error::from(ResponseError::Provider("Invalid API key".into()));
        assert_eq!(classify_error(&err), EngineError::ProviderError);

        assert_eq!(classify_error(&anyhow::anyhow!("boom")), EngineError::Unknown);
    }
}
