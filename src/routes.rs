use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::api::{
    add_appointment, add_customer, available_time_slots, day_view, search_customers, AppState,
    SEARCH_CUSTOMERS_PATH,
};
use crate::handlers::health::health_check;
use crate::services::search::ADD_APPOINTMENT_PATH;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let form_routes = Router::new()
        .route("/addCustomer", post(add_customer))
        .route(ADD_APPOINTMENT_PATH, post(add_appointment));

    let view_routes = Router::new()
        .route(SEARCH_CUSTOMERS_PATH, get(search_customers))
        .route("/appointments", get(day_view))
        .route("/availableTimeSlots", get(available_time_slots));

    info!("Form and view routes enabled");

    Router::new()
        .route("/health", get(health_check))
        .merge(form_routes)
        .merge(view_routes)
        .with_state(app_state)
}
