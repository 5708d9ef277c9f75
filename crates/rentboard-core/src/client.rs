//! HTTP client for the prediction/analytics service

use crate::config::ServiceConfig;
use crate::error::CoreError;
use crate::models::{
    FeatureImportanceResponse, Prediction, PropertyAttributes, RawFeatureRecord, RawTrendRecord,
    RentalTrendsResponse,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Service endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    FeatureImportance,
    RentalTrends,
    Predict,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::FeatureImportance => "feature_importance",
            Endpoint::RentalTrends => "rental_trends",
            Endpoint::Predict => "predict",
        }
    }
}

/// Client for the remote service; the base address is fixed at construction
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    config: ServiceConfig,
}

impl ServiceClient {
    pub fn new(config: ServiceConfig) -> Result<Self, CoreError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("rentboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::InvalidConfig {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// `GET /feature_importance`
    pub async fn feature_importance(&self) -> Result<Vec<RawFeatureRecord>, CoreError> {
        let envelope: FeatureImportanceResponse = self.get(Endpoint::FeatureImportance).await?;
        Ok(envelope.feature_importances)
    }

    /// `GET /rental_trends`
    pub async fn rental_trends(&self) -> Result<Vec<RawTrendRecord>, CoreError> {
        let envelope: RentalTrendsResponse = self.get(Endpoint::RentalTrends).await?;
        Ok(envelope.rental_trends)
    }

    /// `POST /predict` with the form's attributes forwarded unchanged
    pub async fn predict(&self, attrs: &PropertyAttributes) -> Result<Prediction, CoreError> {
        let url = self.config.endpoint_url(Endpoint::Predict.path());
        self.send(Endpoint::Predict, self.http.post(url).json(attrs))
            .await
    }

    /// GET an endpoint and decode its JSON envelope
    pub async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, CoreError> {
        let url = self.config.endpoint_url(endpoint.path());
        self.send(endpoint, self.http.get(url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<T, CoreError> {
        let name = endpoint.path();
        debug!(endpoint = name, "Sending request");

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::transport(name, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::transport(name, &e))?;

        if !status.is_success() {
            warn!(endpoint = name, status = status.as_u16(), "Service returned an error status");
            return Err(CoreError::service(
                name,
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                &body,
            ));
        }

        let parsed = serde_json::from_str(&body).map_err(|e| CoreError::MalformedPayload {
            endpoint: name.to_string(),
            message: e.to_string(),
            source: e,
        })?;

        info!(endpoint = name, bytes = body.len(), "Service response decoded");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        let client = ServiceClient::new(ServiceConfig::default()).unwrap();
        let url = client
            .config()
            .endpoint_url(Endpoint::FeatureImportance.path());
        assert_eq!(url, "http://127.0.0.1:5000/feature_importance");
        assert_eq!(Endpoint::RentalTrends.path(), "rental_trends");
        assert_eq!(Endpoint::Predict.path(), "predict");
    }
}
