use axum::{
    extract::{Json as ExtractJson, Query, RawQuery, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use crate::client::SalonApi;
use crate::error::ApiError;
use crate::models::appointment::{Appointment, ScheduledAppointment};
use crate::models::common::{DayViewParams, ErrorResponse, SubmissionResponse, TimeSlotParams};
use crate::models::customer::Customer;
use crate::models::FormRecord;
use crate::services::form::{FormController, Persist, SubmissionState, SAVE_ERROR_MESSAGE};
use crate::services::search::{SearchPage, SearchParams, ADD_APPOINTMENT_PATH};
use crate::services::time_slots::{
    build_grid, day_bounds, sort_by_start, SalonHours, ServiceCatalog, TimeSlotGrid,
};
use crate::services::validation::{FieldValidators, ValidationErrors};

pub const SEARCH_CUSTOMERS_PATH: &str = "/searchCustomers";

// AppState struct containing shared resources
pub struct AppState {
    pub client: Arc<dyn SalonApi>,
    pub customer_validators: FieldValidators,
    pub catalog: ServiceCatalog,
    pub hours: SalonHours,
    pub page_size: usize,
}

type ApiFailure = (StatusCode, Json<ErrorResponse>);

fn bad_gateway(context: &str, err: ApiError) -> ApiFailure {
    error!("{}: {}", context, err);
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: format!("{}: {}", context, err),
        }),
    )
}

fn submission_response<R, P>(
    form: &FormController<R, P>,
    next_path: Option<String>,
) -> (StatusCode, Json<SubmissionResponse<R>>)
where
    R: FormRecord,
    P: Persist<R> + ?Sized,
{
    let state = form.state();
    let mut response = SubmissionResponse {
        status: state.label().to_string(),
        record: None,
        validation_errors: ValidationErrors::new(),
        error: None,
        next_path: None,
    };

    let status = match state {
        SubmissionState::Succeeded => {
            response.record = Some(form.record().clone());
            response.next_path = next_path;
            StatusCode::OK
        }
        SubmissionState::FailedValidation(errors) => {
            response.validation_errors = errors.clone();
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SubmissionState::FailedGeneral => {
            response.error = Some(SAVE_ERROR_MESSAGE.to_string());
            StatusCode::BAD_GATEWAY
        }
        SubmissionState::Idle | SubmissionState::Submitting => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(response))
}

// Add customer endpoint
pub async fn add_customer(
    State(state): State<Arc<AppState>>,
    ExtractJson(customer): ExtractJson<Customer>,
) -> (StatusCode, Json<SubmissionResponse<Customer>>) {
    info!("Received request to add customer");

    let mut form = FormController::new(
        customer,
        state.customer_validators.clone(),
        Arc::clone(&state.client),
    );

    let mut next_path = None;
    form.submit(|saved| {
        if let Some(id) = saved.id {
            info!("Customer saved with id {}", id);
            next_path = Some(format!("{}?customer={}", ADD_APPOINTMENT_PATH, id));
        }
    })
    .await;

    submission_response(&form, next_path)
}

// Add appointment endpoint
pub async fn add_appointment(
    State(state): State<Arc<AppState>>,
    ExtractJson(appointment): ExtractJson<Appointment>,
) -> (StatusCode, Json<SubmissionResponse<Appointment>>) {
    info!(
        "Received request to add appointment for customer {:?}",
        appointment.customer
    );

    let mut form = FormController::new(
        appointment,
        FieldValidators::appointment(),
        Arc::clone(&state.client),
    );

    let mut next_path = None;
    form.submit(|saved| {
        info!("Appointment saved with id {:?}", saved.id);
        next_path = Some("/".to_string());
    })
    .await;

    submission_response(&form, next_path)
}

// Customer search endpoint
pub async fn search_customers(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<SearchPage>, ApiFailure> {
    let params = SearchParams::from_query(query.as_deref().unwrap_or_default());
    info!(
        "Received customer search for term '{}' with {} previous page(s)",
        params.search_term,
        params.last_row_ids.len()
    );

    let customers = state
        .client
        .search_customers(&params.api_query(state.page_size))
        .await
        .map_err(|err| bad_gateway("Failed to search customers", err))?;

    info!("Search returned {} customers", customers.len());
    Ok(Json(SearchPage::build(
        SEARCH_CUSTOMERS_PATH,
        &params,
        customers,
        state.page_size,
    )))
}

// Appointments day view endpoint
pub async fn day_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DayViewParams>,
) -> Result<Json<Vec<ScheduledAppointment>>, ApiFailure> {
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let (from, to) = day_bounds(date);
    info!("Received request for appointments on {}", date);

    let appointments = state
        .client
        .appointments_between(from, to)
        .await
        .map_err(|err| bad_gateway("Failed to load appointments", err))?;

    Ok(Json(sort_by_start(appointments)))
}

// Available time slots endpoint
pub async fn available_time_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TimeSlotParams>,
) -> Result<Json<TimeSlotGrid>, ApiFailure> {
    let today = params.today.unwrap_or_else(|| Utc::now().date_naive());
    info!(
        "Received request for time slots from {} (service '{}', stylist '{}')",
        today, params.service, params.stylist
    );

    let available = state
        .client
        .available_time_slots()
        .await
        .map_err(|err| bad_gateway("Failed to load time slots", err))?;

    Ok(Json(build_grid(
        today,
        state.hours,
        &available,
        &state.catalog,
        &params.service,
        &params.stylist,
    )))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
