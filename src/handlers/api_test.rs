#[cfg(test)]
mod api_tests {
    use axum::http::StatusCode;
    use axum_test::{TestServer, TestServerConfig};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::client::SalonApi;
    use crate::client_mock::{setup_mock_client, MockDataStore, MockSalonApi};
    use crate::error::{ApiError, SaveError};
    use crate::handlers::api::AppState;
    use crate::models::appointment::{AvailableTimeSlot, ScheduledAppointment};
    use crate::models::customer::Customer;
    use crate::routes::create_router;
    use crate::services::form::SAVE_ERROR_MESSAGE;
    use crate::services::time_slots::{SalonHours, ServiceCatalog};
    use crate::services::validation::{
        FieldValidators, ValidationErrors, FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED,
        PHONE_NUMBER_REQUIRED,
    };

    // Helper function to set up a test server around a given client
    fn server_with(client: MockSalonApi, page_size: usize) -> TestServer {
        let client: Arc<dyn SalonApi> = Arc::new(client);
        let app_state = Arc::new(AppState {
            client,
            customer_validators: FieldValidators::customer().unwrap(),
            catalog: ServiceCatalog::salon(),
            hours: SalonHours::default(),
            page_size,
        });

        let config = TestServerConfig::builder().mock_transport().build();
        TestServer::new_with_config(create_router(app_state), config).unwrap()
    }

    fn setup_test_server() -> (TestServer, Arc<MockDataStore>) {
        let (mock_client, store) = setup_mock_client();
        (server_with(mock_client, 10), store)
    }

    fn server_failure() -> ApiError {
        ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        }
    }

    fn customer(first_name: &str, last_name: &str) -> Customer {
        Customer {
            id: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone_number: "555 1234".to_string(),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let (server, _) = setup_test_server();

        let response = server.get("/health").await;

        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[tokio::test]
    async fn test_add_blank_customer_returns_validation_errors() {
        let (server, store) = setup_test_server();

        let response = server.post("/addCustomer").json(&json!({})).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["status"], "VALIDATION_FAILED");
        assert_eq!(body["validationErrors"]["firstName"], FIRST_NAME_REQUIRED);
        assert_eq!(body["validationErrors"]["lastName"], LAST_NAME_REQUIRED);
        assert_eq!(body["validationErrors"]["phoneNumber"], PHONE_NUMBER_REQUIRED);
        assert!(body.get("record").is_none());
        assert!(store.customers().is_empty());
    }

    #[tokio::test]
    async fn test_add_customer_success() {
        let (server, store) = setup_test_server();

        let response = server
            .post("/addCustomer")
            .json(&customer("Ashley", "Jones"))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "SUCCESSFUL");
        assert_eq!(body["record"]["id"], 1);
        assert_eq!(body["record"]["firstName"], "Ashley");
        assert_eq!(body["nextPath"], "/addAppointment?customer=1");
        assert!(body.get("validationErrors").is_none());
        assert_eq!(store.customers().len(), 1);

        let mut keys: Vec<&str> = body
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["nextPath", "record", "status"]);
    }

    #[tokio::test]
    async fn test_add_customer_server_validation_errors() {
        let mut mock_client = MockSalonApi::new();
        mock_client.expect_add_customer().times(1).returning(|_| {
            Err(SaveError::Validation(
                [("phoneNumber", "Phone number already exists in the system")]
                    .into_iter()
                    .collect::<ValidationErrors>(),
            ))
        });
        let server = server_with(mock_client, 10);

        let response = server
            .post("/addCustomer")
            .json(&customer("Ashley", "Jones"))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(
            body["validationErrors"]["phoneNumber"],
            "Phone number already exists in the system"
        );
        assert!(body.get("nextPath").is_none());
    }

    #[tokio::test]
    async fn test_add_customer_general_failure() {
        let mut mock_client = MockSalonApi::new();
        mock_client
            .expect_add_customer()
            .returning(|_| Err(SaveError::Transport(server_failure())));
        let server = server_with(mock_client, 10);

        let response = server
            .post("/addCustomer")
            .json(&customer("Ashley", "Jones"))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["status"], "FAILED");
        assert_eq!(body["error"], SAVE_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_add_appointment_success() {
        let (server, store) = setup_test_server();

        let response = server
            .post("/addAppointment")
            .json(&json!({
                "customer": 4,
                "service": "Cut",
                "stylist": "Jo",
                "startsAt": 1_700_000_000_000_i64
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["record"]["id"], 1);
        assert_eq!(body["record"]["customer"], 4);
        assert_eq!(body["nextPath"], "/");
        assert_eq!(store.appointments().len(), 1);
    }

    #[tokio::test]
    async fn test_search_customers_first_page() {
        let (mock_client, store) = setup_mock_client();
        for name in ["Ashley", "Jo", "Pat"] {
            store.add_customer(&customer(name, "Smith"));
        }
        let server = server_with(mock_client, 2);

        let response = server.get("/searchCustomers").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["customers"].as_array().unwrap().len(), 2);
        assert_eq!(body["hasNext"], true);
        assert_eq!(body["hasPrevious"], false);
        assert_eq!(body["nextPath"], "/searchCustomers?lastRowIds=2");
        assert_eq!(body["previousPath"], Value::Null);
        assert_eq!(body["customers"][0]["firstName"], "Ashley");
        assert_eq!(
            body["customers"][0]["createAppointmentPath"],
            "/addAppointment?customer=1"
        );
    }

    #[tokio::test]
    async fn test_search_customers_last_page() {
        let (mock_client, store) = setup_mock_client();
        for name in ["Ashley", "Jo", "Pat"] {
            store.add_customer(&customer(name, "Smith"));
        }
        let server = server_with(mock_client, 2);

        let response = server
            .get("/searchCustomers")
            .add_query_param("lastRowIds", "2")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let customers = body["customers"].as_array().unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0]["firstName"], "Pat");
        assert_eq!(body["hasNext"], false);
        assert_eq!(body["hasPrevious"], true);
        assert_eq!(body["nextPath"], Value::Null);
        assert_eq!(body["previousPath"], "/searchCustomers");
    }

    #[tokio::test]
    async fn test_search_customers_by_term() {
        let (mock_client, store) = setup_mock_client();
        store.add_customer(&customer("Ashley", "Jones"));
        store.add_customer(&customer("Jo", "Ashford"));
        store.add_customer(&customer("Pat", "Smith"));
        let server = server_with(mock_client, 10);

        let response = server
            .get("/searchCustomers")
            .add_query_param("searchTerm", "ash")
            .await;

        let body: Value = response.json();
        assert_eq!(body["customers"].as_array().unwrap().len(), 2);
        assert_eq!(body["hasNext"], false);
    }

    #[tokio::test]
    async fn test_search_customers_upstream_failure() {
        let mut mock_client = MockSalonApi::new();
        mock_client
            .expect_search_customers()
            .returning(|_| Err(server_failure()));
        let server = server_with(mock_client, 10);

        let response = server.get("/searchCustomers").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to search customers"));
    }

    #[tokio::test]
    async fn test_day_view_sorts_and_requests_whole_day() {
        let mut mock_client = MockSalonApi::new();
        let booked = |starts_at: i64| ScheduledAppointment {
            starts_at,
            customer: customer("Ashley", "Jones"),
            stylist: "Jo".to_string(),
            service: "Cut".to_string(),
            notes: String::new(),
        };
        // 2024-01-15T00:00:00Z
        let midnight = 1_705_276_800_000_i64;
        mock_client
            .expect_appointments_between()
            .withf(move |from, to| *from == midnight && *to == midnight + 86_400_000 - 1)
            .times(1)
            .returning(move |_, _| Ok(vec![booked(midnight + 7_200_000), booked(midnight)]));
        let server = server_with(mock_client, 10);

        let response = server
            .get("/appointments")
            .add_query_param("date", "2024-01-15")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body[0]["startsAt"], midnight);
        assert_eq!(body[1]["startsAt"], midnight + 7_200_000);
    }

    #[tokio::test]
    async fn test_available_time_slots_grid() {
        let mut mock_client = MockSalonApi::new();
        // 2024-01-15T09:00:00Z and 2024-01-16T09:30:00Z
        let first = 1_705_309_200_000_i64;
        let second = first + 86_400_000 + 1_800_000;
        mock_client.expect_available_time_slots().returning(move || {
            Ok(vec![
                AvailableTimeSlot {
                    starts_at: first,
                    stylists: vec!["Ashley".to_string()],
                },
                AvailableTimeSlot {
                    starts_at: second,
                    stylists: vec!["Jo".to_string()],
                },
            ])
        });
        let server = server_with(mock_client, 10);

        let response = server
            .get("/availableTimeSlots")
            .add_query_param("today", "2024-01-15")
            .add_query_param("service", "Cut & color")
            .add_query_param("stylist", "Ashley")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["dates"].as_array().unwrap().len(), 7);
        assert_eq!(body["dates"][0], "2024-01-15");
        assert_eq!(body["times"][0], "09:00");
        assert_eq!(body["times"].as_array().unwrap().len(), 20);
        assert_eq!(body["rows"][0][0], first);
        assert_eq!(body["rows"][1][1], Value::Null);
        assert_eq!(body["stylists"], json!(["Ashley", "Jo"]));
    }
}
