use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ApiError, SaveError};
use crate::models::appointment::{Appointment, AvailableTimeSlot, ScheduledAppointment};
use crate::models::customer::Customer;
use crate::services::search::CustomerQuery;
use crate::services::validation::ValidationErrors;

/// Body of an HTTP 422 response
#[derive(Debug, Deserialize)]
struct ValidationFailure {
    #[serde(default)]
    errors: ValidationErrors,
}

/// Calls made to the salon API
#[async_trait]
pub trait SalonApi: Send + Sync {
    /// `POST /customers`
    async fn add_customer(&self, customer: &Customer) -> Result<Customer, SaveError>;

    /// `POST /appointments`
    async fn add_appointment(&self, appointment: &Appointment) -> Result<Appointment, SaveError>;

    /// `GET /customers` with the search cursor, term and page size
    async fn search_customers(&self, query: &CustomerQuery) -> Result<Vec<Customer>, ApiError>;

    /// `GET /availableTimeSlots`
    async fn available_time_slots(&self) -> Result<Vec<AvailableTimeSlot>, ApiError>;

    /// `GET /appointments/<from>-<to>` with both bounds in milliseconds
    async fn appointments_between(
        &self,
        from: i64,
        to: i64,
    ) -> Result<Vec<ScheduledAppointment>, ApiError>;
}

/// Client for the salon API
pub struct SalonClient {
    client: Client,
    endpoint: String,
}

impl SalonClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn post_record<R>(&self, path: &str, record: &R) -> Result<R, SaveError>
    where
        R: Serialize + DeserializeOwned + Sync,
    {
        let url = self.url(path);
        debug!("POST {}", url);

        let res = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(record)
            .send()
            .await?;
        let status = res.status();
        info!("Response received from POST {} with status: {}", path, status);

        if status.is_success() {
            return Ok(res.json::<R>().await?);
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let failure = res.json::<ValidationFailure>().await?;
            warn!(
                "Server rejected {} field(s) on POST {}",
                failure.errors.len(),
                path
            );
            return Err(SaveError::Validation(failure.errors));
        }

        let body = res.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body }.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let res = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = res.status();
        info!("Response received from GET {} with status: {}", path, status);

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(res.json::<T>().await?)
    }
}

#[async_trait]
impl SalonApi for SalonClient {
    async fn add_customer(&self, customer: &Customer) -> Result<Customer, SaveError> {
        self.post_record("/customers", customer).await
    }

    async fn add_appointment(&self, appointment: &Appointment) -> Result<Appointment, SaveError> {
        self.post_record("/appointments", appointment).await
    }

    async fn search_customers(&self, query: &CustomerQuery) -> Result<Vec<Customer>, ApiError> {
        self.get_json(&format!("/customers{}", query.to_query_string()))
            .await
    }

    async fn available_time_slots(&self) -> Result<Vec<AvailableTimeSlot>, ApiError> {
        self.get_json("/availableTimeSlots").await
    }

    async fn appointments_between(
        &self,
        from: i64,
        to: i64,
    ) -> Result<Vec<ScheduledAppointment>, ApiError> {
        self.get_json(&format!("/appointments/{}-{}", from, to)).await
    }
}
