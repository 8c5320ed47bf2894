//! Correlation pipeline: fetch both datasets, reduce to ratios, align, correlate.

pub mod align;
pub mod pearson;
pub mod ratio;

use crate::error::CorrError;
use crate::upstream::{Dataset, ScopeKind, StatsClient};

/// Field names of the upstream per-country records.
pub const VACCINATED_FIELD: &str = "people_vaccinated";
pub const DEATHS_FIELD: &str = "deaths";
pub const POPULATION_FIELD: &str = "population";

/// Correlate vaccination coverage against death rate for one scope.
///
/// Both datasets are fetched concurrently, reduced to per-country ratios,
/// intersected on country and fed through Pearson. Every failure mode is a
/// typed [`CorrError`]; mapping those onto the numeric wire contract is the
/// route layer's job, not ours.
pub async fn correlation_for_scope(
    stats: &StatsClient,
    scope: ScopeKind,
    value: &str,
) -> Result<f64, CorrError> {
    tracing::info!(scope = %scope, value, "computing vaccination/death-rate correlation");

    let (vaccine_rows, case_rows) = tokio::try_join!(
        stats.fetch_rows(Dataset::Vaccines, scope, value),
        stats.fetch_rows(Dataset::Cases, scope, value),
    )?;

    let vaccinated = ratio::ratio_by_country(&vaccine_rows, VACCINATED_FIELD, POPULATION_FIELD);
    let deaths = ratio::ratio_by_country(&case_rows, DEATHS_FIELD, POPULATION_FIELD);

    let aligned = align::align(&vaccinated, &deaths);
    if aligned.is_empty() {
        tracing::warn!(
            vaccinated = vaccinated.len(),
            deaths = deaths.len(),
            "no countries common to both datasets"
        );
        return Err(CorrError::NoOverlap);
    }

    match pearson::pearson(&aligned.series_a, &aligned.series_b) {
        Ok(r) => {
            tracing::info!(countries = aligned.len(), coefficient = r, "correlation computed");
            Ok(r)
        }
        Err(err) => {
            tracing::warn!(
                countries = aligned.len(),
                %err,
                "aligned series unusable for correlation"
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::time::Duration;

    fn vaccine_row(country: &str, population: f64, vaccinated: f64) -> Value {
        json!({"all": {
            "country": country,
            "population": population,
            "people_vaccinated": vaccinated,
        }})
    }

    fn case_row(country: &str, population: f64, deaths: f64) -> Value {
        json!({"all": {
            "country": country,
            "population": population,
            "deaths": deaths,
        }})
    }

    async fn mock_dataset(
        server: &mut mockito::ServerGuard,
        path_and_query: &str,
        rows: Vec<Value>,
    ) -> mockito::Mock {
        server
            .mock("GET", path_and_query)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(rows).to_string())
            .create_async()
            .await
    }

    fn client_for(server: &mockito::ServerGuard) -> StatsClient {
        StatsClient::new(server.url(), Duration::from_secs(2))
    }

    #[tokio::test]
    async fn correlates_vaccination_against_death_rate() {
        let mut server = mockito::Server::new_async().await;
        // Estonia only exists in the vaccine dataset and Finland's case row
        // has no deaths field; both must drop out of the aligned series.
        let _vaccines = mock_dataset(
            &mut server,
            "/vaccines?continent=Europe",
            vec![
                vaccine_row("Austria", 100.0, 20.0),
                vaccine_row("Belgium", 100.0, 40.0),
                vaccine_row("Croatia", 100.0, 60.0),
                vaccine_row("Denmark", 100.0, 80.0),
                vaccine_row("Estonia", 100.0, 50.0),
            ],
        )
        .await;
        let _cases = mock_dataset(
            &mut server,
            "/cases?continent=Europe",
            vec![
                case_row("Austria", 100.0, 5.0),
                case_row("Belgium", 100.0, 4.0),
                case_row("Croatia", 100.0, 2.0),
                case_row("Denmark", 100.0, 1.0),
                json!({"all": {"country": "Finland", "population": 100.0}}),
            ],
        )
        .await;

        let stats = client_for(&server);
        let r = correlation_for_scope(&stats, ScopeKind::Continent, "Europe")
            .await
            .unwrap();
        // Hand-computed over the four common countries: r = -1.4 / sqrt(2).
        assert!((r - (-1.4 / 2.0_f64.sqrt())).abs() < 1e-9);
    }

    #[tokio::test]
    async fn single_common_country_is_insufficient_data() {
        let mut server = mockito::Server::new_async().await;
        let _vaccines = mock_dataset(
            &mut server,
            "/vaccines?country=Malta",
            vec![vaccine_row("Malta", 500_000.0, 400_000.0)],
        )
        .await;
        let _cases = mock_dataset(
            &mut server,
            "/cases?country=Malta",
            vec![case_row("Malta", 500_000.0, 600.0)],
        )
        .await;

        let stats = client_for(&server);
        let err = correlation_for_scope(&stats, ScopeKind::Country, "Malta")
            .await
            .unwrap_err();
        assert!(matches!(err, CorrError::InsufficientData(_)));
    }

    #[tokio::test]
    async fn disjoint_datasets_are_no_overlap() {
        let mut server = mockito::Server::new_async().await;
        let _vaccines = mock_dataset(
            &mut server,
            "/vaccines?continent=Oceania",
            vec![vaccine_row("Fiji", 900_000.0, 500_000.0)],
        )
        .await;
        let _cases = mock_dataset(
            &mut server,
            "/cases?continent=Oceania",
            vec![case_row("Tonga", 100_000.0, 12.0)],
        )
        .await;

        let stats = client_for(&server);
        let err = correlation_for_scope(&stats, ScopeKind::Continent, "Oceania")
            .await
            .unwrap_err();
        assert!(matches!(err, CorrError::NoOverlap));
    }

    #[tokio::test]
    async fn empty_datasets_are_no_overlap() {
        let mut server = mockito::Server::new_async().await;
        let _vaccines = mock_dataset(&mut server, "/vaccines?continent=Atlantis", vec![]).await;
        let _cases = mock_dataset(&mut server, "/cases?continent=Atlantis", vec![]).await;

        let stats = client_for(&server);
        let err = correlation_for_scope(&stats, ScopeKind::Continent, "Atlantis")
            .await
            .unwrap_err();
        assert!(matches!(err, CorrError::NoOverlap));
    }

    #[tokio::test]
    async fn upstream_failure_propagates_as_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        let _vaccines = server
            .mock("GET", "/vaccines?continent=Europe")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;
        let _cases = mock_dataset(
            &mut server,
            "/cases?continent=Europe",
            vec![case_row("Austria", 100.0, 5.0)],
        )
        .await;

        let stats = client_for(&server);
        let err = correlation_for_scope(&stats, ScopeKind::Continent, "Europe")
            .await
            .unwrap_err();
        assert!(matches!(err, CorrError::Upstream(_)));
    }

    #[tokio::test]
    async fn malformed_upstream_body_propagates() {
        let mut server = mockito::Server::new_async().await;
        let _vaccines = server
            .mock("GET", "/vaccines?continent=Europe")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": "object"}"#)
            .create_async()
            .await;
        let _cases = mock_dataset(
            &mut server,
            "/cases?continent=Europe",
            vec![case_row("Austria", 100.0, 5.0)],
        )
        .await;

        let stats = client_for(&server);
        let err = correlation_for_scope(&stats, ScopeKind::Continent, "Europe")
            .await
            .unwrap_err();
        assert!(matches!(err, CorrError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn aligned_order_does_not_depend_on_upstream_order() {
        let mut server = mockito::Server::new_async().await;
        let _vaccines = mock_dataset(
            &mut server,
            "/vaccines?continent=Europe",
            vec![
                vaccine_row("Denmark", 100.0, 80.0),
                vaccine_row("Austria", 100.0, 20.0),
                vaccine_row("Croatia", 100.0, 60.0),
                vaccine_row("Belgium", 100.0, 40.0),
            ],
        )
        .await;
        let _cases = mock_dataset(
            &mut server,
            "/cases?continent=Europe",
            vec![
                case_row("Croatia", 100.0, 2.0),
                case_row("Denmark", 100.0, 1.0),
                case_row("Belgium", 100.0, 4.0),
                case_row("Austria", 100.0, 5.0),
            ],
        )
        .await;

        let stats = client_for(&server);
        let r = correlation_for_scope(&stats, ScopeKind::Continent, "Europe")
            .await
            .unwrap();
        assert!((r - (-1.4 / 2.0_f64.sqrt())).abs() < 1e-9);
    }
}
