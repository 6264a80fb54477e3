// Backend REST repository implementation
use crate::application::measurement_repository::{MeasureQuery, MeasurementRepository};
use crate::domain::calendar::DateRange;
use crate::domain::sample::RawSample;
use crate::infrastructure::config::{prepare_query, BackendSettings};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Keys a wrapped payload may keep its record array under.
const PAYLOAD_KEYS: &[&str] = &["data", "items", "results", "measures"];

#[derive(Debug, Clone)]
pub struct BackendRepository {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    daily_energy_path: String,
    measures_path: String,
}

impl BackendRepository {
    pub fn new(settings: BackendSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.filter(|t| !t.is_empty()),
            daily_energy_path: settings.daily_energy_path,
            measures_path: settings.measures_path,
        })
    }

    fn build_url(&self, template: &str, vars: &[(&str, &str)]) -> String {
        let encoded: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), urlencoding::encode(v).into_owned()))
            .collect();
        let path = prepare_query(template, &encoded);
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch_records(&self, url: &str) -> Result<Vec<RawSample>> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to backend")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backend request failed with status {}: {}", status, body);
        }

        let payload = response
            .json::<Value>()
            .await
            .context("Failed to parse backend response")?;

        Self::records_from_payload(payload)
    }

    /// Accepts a bare array or an object wrapping one. Array entries that are
    /// not objects are skipped.
    fn records_from_payload(payload: Value) -> Result<Vec<RawSample>> {
        let items = match payload {
            Value::Array(items) => items,
            Value::Object(mut fields) => PAYLOAD_KEYS
                .iter()
                .find_map(|key| match fields.remove(*key) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                })
                .context("Backend response object has no record array")?,
            other => anyhow::bail!("Unexpected backend response: {}", other),
        };

        let total = items.len();
        let records: Vec<RawSample> = items.into_iter().filter_map(RawSample::from_value).collect();
        if records.len() < total {
            tracing::debug!("Skipped {} non-object entries in backend response", total - records.len());
        }

        Ok(records)
    }
}

#[async_trait]
impl MeasurementRepository for BackendRepository {
    async fn daily_energy(&self, plant_id: &str, range: &DateRange) -> Result<Vec<RawSample>> {
        let (start, end) = range.query_bounds();
        let url = self.build_url(
            &self.daily_energy_path,
            &[("plant", plant_id), ("start", start.as_str()), ("end", end.as_str())],
        );

        self.fetch_records(&url)
            .await
            .with_context(|| format!("daily energy for plant {}", plant_id))
    }

    async fn filtered_measures(&self, query: &MeasureQuery) -> Result<Vec<RawSample>> {
        let (start, end) = query.range.query_bounds();
        let url = self.build_url(
            &self.measures_path,
            &[
                ("plant", query.plant_id.as_str()),
                ("device", query.device_id.as_str()),
                ("variable", query.variable.as_str()),
                ("start", start.as_str()),
                ("end", end.as_str()),
            ],
        );

        self.fetch_records(&url).await.with_context(|| {
            format!("{} measures for device {}", query.variable, query.device_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repository() -> BackendRepository {
        BackendRepository::new(BackendSettings {
            base_url: "http://backend.local/api/".into(),
            token: Some(String::new()),
            timeout_secs: 5,
            daily_energy_path: "/plants/${plant}/daily-energy?start=${start}&end=${end}".into(),
            measures_path: "measures?device=${device}&variable=${variable}".into(),
        })
        .unwrap()
    }

    #[test]
    fn test_build_url_encodes_values() {
        let repo = repository();
        assert!(repo.token.is_none());

        let url = repo.build_url(
            &repo.daily_energy_path,
            &[
                ("plant", "north field"),
                ("start", "2025-01-01T00:00:00Z"),
                ("end", "2025-01-03T23:59:59Z"),
            ],
        );
        assert_eq!(
            url,
            "http://backend.local/api/plants/north%20field/daily-energy?start=2025-01-01T00%3A00%3A00Z&end=2025-01-03T23%3A59%3A59Z"
        );

        let url = repo.build_url(&repo.measures_path, &[("device", "inv/1"), ("variable", "Status")]);
        assert_eq!(url, "http://backend.local/api/measures?device=inv%2F1&variable=Status");
    }

    #[test]
    fn test_payload_shapes() {
        let bare = json!([{"date": "2025-01-01", "value": 1}, 7, {"date": "2025-01-02"}]);
        assert_eq!(BackendRepository::records_from_payload(bare).unwrap().len(), 2);

        let wrapped = json!({"count": 1, "data": [{"date": "2025-01-01"}]});
        assert_eq!(BackendRepository::records_from_payload(wrapped).unwrap().len(), 1);

        let measures = json!({"measures": []});
        assert!(BackendRepository::records_from_payload(measures).unwrap().is_empty());
    }

    #[test]
    fn test_unexpected_payloads() {
        assert!(BackendRepository::records_from_payload(json!({"data": "none"})).is_err());
        assert!(BackendRepository::records_from_payload(json!("oops")).is_err());
        assert!(BackendRepository::records_from_payload(Value::Null).is_err());
    }
}
