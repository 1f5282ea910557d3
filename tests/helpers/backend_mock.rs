//! Mock GeoHod backend for testing
//!
//! Wraps a wiremock server mounted under `/api/v1` and builds services
//! pointed at it, authenticated with the test init data.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use geohod::config::Settings;
use geohod::services::{EventService, NotificationService, ServiceFactory};

use super::test_data::TEST_INIT_DATA;

pub const API_PREFIX: &str = "/api/v1";

/// Mock backend server
pub struct BackendMockServer {
    pub server: MockServer,
    pub base_url: String,
}

impl BackendMockServer {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = format!("{}{}", server.uri(), API_PREFIX);
        Self { server, base_url }
    }

    /// Full request path for an endpoint below the api prefix
    pub fn path(endpoint: &str) -> String {
        format!("{}/{}", API_PREFIX, endpoint.trim_start_matches('/'))
    }

    /// Settings pointed at this server with the test user logged in
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = self.base_url.clone();
        settings.api.timeout_seconds = 5;
        settings.host.init_data = TEST_INIT_DATA.to_string();
        settings
    }

    pub fn services(&self) -> ServiceFactory {
        ServiceFactory::new(&self.settings()).expect("Failed to build services")
    }

    pub fn event_service(&self) -> EventService {
        self.services().event_service
    }

    pub fn notification_service(&self) -> NotificationService {
        self.services().notification_service
    }

    /// `GET /events/{id}` returning `body`
    pub async fn mock_event(&self, id: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(Self::path(&format!("events/{}", id))))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET /events/{id}/participants` returning a wrapped roster
    pub async fn mock_participants(&self, id: &str, participants: Value) {
        Mock::given(method("GET"))
            .and(path(Self::path(&format!("events/{}/participants", id))))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "participants": participants })))
            .mount(&self.server)
            .await;
    }

    /// Any method on `endpoint` answering with an empty success
    pub async fn mock_ok(&self, http_method: &str, endpoint: &str) {
        Mock::given(method(http_method))
            .and(path(Self::path(endpoint)))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Any method on `endpoint` failing with `status` and a `{message}` body
    pub async fn mock_failure(&self, http_method: &str, endpoint: &str, status: u16, message: &str) {
        Mock::given(method(http_method))
            .and(path(Self::path(endpoint)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
            .mount(&self.server)
            .await;
    }

    /// Requests the server has seen so far for `endpoint` and `http_method`
    pub async fn count_requests(&self, http_method: &str, endpoint: &str) -> usize {
        let full = Self::path(endpoint);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == full)
            .count()
    }
}
