use async_trait::async_trait;
use mockall::mock;
use std::sync::{Arc, Mutex};

use crate::client::SalonApi;
use crate::error::{ApiError, SaveError};
use crate::models::appointment::{Appointment, AvailableTimeSlot, ScheduledAppointment};
use crate::models::customer::Customer;
use crate::services::search::CustomerQuery;

// Define a mock client for the salon API
mock! {
    pub SalonApi {}

    #[async_trait]
    impl SalonApi for SalonApi {
        async fn add_customer(&self, customer: &Customer) -> Result<Customer, SaveError>;

        async fn add_appointment(&self, appointment: &Appointment) -> Result<Appointment, SaveError>;

        async fn search_customers(&self, query: &CustomerQuery) -> Result<Vec<Customer>, ApiError>;

        async fn available_time_slots(&self) -> Result<Vec<AvailableTimeSlot>, ApiError>;

        async fn appointments_between(
            &self,
            from: i64,
            to: i64,
        ) -> Result<Vec<ScheduledAppointment>, ApiError>;
    }
}

// A simple in-memory store for our mock client
pub struct MockDataStore {
    customers: Mutex<Vec<Customer>>,
    appointments: Mutex<Vec<Appointment>>,
}

impl MockDataStore {
    pub fn new() -> Self {
        Self {
            customers: Mutex::new(Vec::new()),
            appointments: Mutex::new(Vec::new()),
        }
    }

    pub fn add_customer(&self, customer: &Customer) -> Customer {
        let mut customers = self.customers.lock().unwrap();
        let saved = Customer {
            id: Some(customers.len() as u64 + 1),
            ..customer.clone()
        };
        customers.push(saved.clone());
        saved
    }

    pub fn add_appointment(&self, appointment: &Appointment) -> Appointment {
        let mut appointments = self.appointments.lock().unwrap();
        let saved = Appointment {
            id: Some(appointments.len() as u64 + 1),
            ..appointment.clone()
        };
        appointments.push(saved.clone());
        saved
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.customers.lock().unwrap().clone()
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }

    pub fn search(&self, query: &CustomerQuery) -> Vec<Customer> {
        let customers = self.customers.lock().unwrap();
        let after: Option<u64> = query.after.as_deref().and_then(|id| id.parse().ok());
        let term = query.search_term.to_lowercase();

        customers
            .iter()
            .filter(|c| after.map_or(true, |after| c.id.unwrap_or_default() > after))
            .filter(|c| {
                term.is_empty()
                    || c.first_name.to_lowercase().starts_with(&term)
                    || c.last_name.to_lowercase().starts_with(&term)
                    || c.phone_number.starts_with(&term)
            })
            .take(query.limit.unwrap_or(10))
            .cloned()
            .collect()
    }
}

// Helper function to set up a mock client backed by the in-memory store
pub fn setup_mock_client() -> (MockSalonApi, Arc<MockDataStore>) {
    let data_store = Arc::new(MockDataStore::new());
    let mut mock_client = MockSalonApi::new();

    let store_ref1 = Arc::clone(&data_store);
    mock_client
        .expect_add_customer()
        .returning(move |customer| Ok(store_ref1.add_customer(customer)));

    let store_ref2 = Arc::clone(&data_store);
    mock_client
        .expect_add_appointment()
        .returning(move |appointment| Ok(store_ref2.add_appointment(appointment)));

    let store_ref3 = Arc::clone(&data_store);
    mock_client
        .expect_search_customers()
        .returning(move |query| Ok(store_ref3.search(query)));

    mock_client
        .expect_available_time_slots()
        .returning(|| Ok(Vec::new()));

    mock_client
        .expect_appointments_between()
        .returning(|_, _| Ok(Vec::new()));

    (mock_client, data_store)
}
