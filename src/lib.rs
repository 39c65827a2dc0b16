//! Salon Appointments Front-End Service
//!
//! This library holds the form, search and scheduling logic behind the salon
//! appointments UI, and a web service exposing it as JSON views.
//!
//! # Modules
//!
//! - `client`: SalonClient for the salon API, behind the `SalonApi` trait
//! - `services::form`: the form submission controller shared by the
//!   customer and appointment forms
//! - `services::validation`: composable field validators
//! - `services::query_string`: query string encoding for search state
//! - `services::search`: customer search pagination
//! - `services::time_slots`: the appointment time slot grid
//!
//! # Submission
//!
//! Every field is validated before anything is sent. Records that pass are
//! posted to the salon API; a 422 response is shown as per-field errors and
//! any other failure as a single save error.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod client_mock;


// Re-export the main API types for ease of use
pub use client::{SalonApi, SalonClient};
pub use config::AppConfig;
pub use handlers::api::AppState;
pub use routes::create_router;
pub use services::form::{FormController, SubmissionState};
