//! Shared test fixtures for the portfolio client integration tests.
//!
//! Provides a scripted [`MockTransport`], a recording [`ScriptedHost`] and
//! `setup_app()`, which wires both into a `PortfolioApp` with a signed-in
//! in-memory session and a fixed clock.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use portfolio_client::config::TOKEN_KEY;
use portfolio_client::transport::{ApiRequest, ApiResponse, Method};
use portfolio_client::{Host, MemoryStore, PortfolioApp, Result, Transport};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

/// Transport answering from a script keyed by method and path.
///
/// A route with several queued responses hands them out in order and keeps
/// repeating the last one. Unscripted routes answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(ApiResponse::json_body(status, &body));
    }

    pub fn respond_bytes(&self, method: Method, path: &str, body: &[u8]) {
        let mut response = ApiResponse::new(200, body.to_vec());
        response.content_type = Some("application/pdf".into());
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Drop whatever is scripted for a route.
    pub fn reset(&self, method: Method, path: &str) {
        self.routes
            .lock()
            .unwrap()
            .remove(&(method, path.to_string()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests to `path` with `method`.
    pub fn calls(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn last(&self, method: Method, path: &str) -> Option<ApiRequest> {
        self.calls(method, path).pop()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let mut routes = self.routes.lock().unwrap();
        let response = match routes.get_mut(&(request.method, request.path.clone())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => ApiResponse::json_body(404, &json!({"detail": "Not found."})),
        };
        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// ScriptedHost
// ---------------------------------------------------------------------------

/// Everything the app asked of the window.
#[derive(Default)]
pub struct HostLog {
    pub alerts: Mutex<Vec<String>>,
    pub confirms: Mutex<Vec<String>>,
    pub redirects: Mutex<Vec<String>>,
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
    pub confirm_answer: Mutex<bool>,
    pub prompt_answer: Mutex<Option<String>>,
}

impl HostLog {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts().pop()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn answer_confirm(&self, answer: bool) {
        *self.confirm_answer.lock().unwrap() = answer;
    }

    pub fn answer_prompt(&self, answer: Option<&str>) {
        *self.prompt_answer.lock().unwrap() = answer.map(str::to_string);
    }
}

/// Host whose log stays readable after the app takes ownership of it.
pub struct ScriptedHost {
    log: Arc<HostLog>,
}

impl ScriptedHost {
    pub fn new() -> (Self, Arc<HostLog>) {
        let log = Arc::new(HostLog::default());
        *log.confirm_answer.lock().unwrap() = true;
        (Self { log: log.clone() }, log)
    }
}

impl Host for ScriptedHost {
    fn alert(&self, message: &str) {
        self.log.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.log.confirms.lock().unwrap().push(message.to_string());
        *self.log.confirm_answer.lock().unwrap()
    }

    fn prompt(&self, _message: &str) -> Option<String> {
        self.log.prompt_answer.lock().unwrap().clone()
    }

    fn redirect(&self, location: &str) {
        self.log.redirects.lock().unwrap().push(location.to_string());
    }

    fn save_file(&self, file_name: &str, bytes: &[u8]) {
        self.log
            .saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
    }
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

pub fn apartment_json() -> Value {
    json!({
        "id": 1,
        "portfolio": 10,
        "portfolio_name": "Мой портфель",
        "asset_type": "apartment",
        "name": "Квартира на Чиланзаре",
        "address": "Chilonzor tumani, Gavhar mahallasi",
        "current_value": "85000.00",
        "area": "75.00",
        "rooms": 3,
        "floor": 4,
        "total_floors": 9,
        "description": "{\"Район\":\"Chilonzor tumani\",\"Махалля\":\"Gavhar mahallasi\",\"Кол-во комнат\":\"3\",\"Площадь\":\"75 м²\",\"Этаж\":\"4\",\"Всего этажей\":\"9\",\"Тип здания\":\"Вторичный рынок\",\"Тип строения\":\"Панельный\",\"Ремонт\":\"Хороший\"}"
    })
}

pub fn car_json() -> Value {
    json!({
        "id": 2,
        "portfolio": 10,
        "portfolio_name": "Мой портфель",
        "asset_type": "car",
        "name": "Chevrolet Cobalt",
        "address": "Автомобиль (без фиксированного адреса)",
        "current_value": 12500,
        "year": 2020,
        "mileage": 45000,
        "brand": "Chevrolet",
        "model": "Cobalt",
        "description": "{\"Регион\":\"г. Ташкент\",\"Марка\":\"Chevrolet\",\"Модель\":\"Cobalt\",\"Год выпуска\":\"2020\",\"Объем двигателя\":\"1.5 л\",\"Пробег\":\"45000 км\",\"Владельцев\":\"4+\"}"
    })
}

pub fn portfolio_json() -> Value {
    json!({"id": 10, "name": "Мой портфель", "description": "Основной портфель активов"})
}

pub fn dashboard_json() -> Value {
    json!({
        "total_value": 97500,
        "total_change": 1500,
        "change_percent": 1.56,
        "asset_count": 2,
        "all_assets": [
            {
                "id": 1,
                "asset_type": "apartment",
                "name": "Квартира на Чиланзаре",
                "current_value": 85000,
                "change_percentage": 2.5
            },
            {
                "id": 2,
                "asset_type": "car",
                "name": "Chevrolet Cobalt",
                "current_value": 12500,
                "change_percentage": -1.2
            }
        ]
    })
}

pub fn profile_json() -> Value {
    json!({"id": 5, "email": "aziz.karimov@example.com", "username": "aziz", "plan": "Pro"})
}

/// Script the startup endpoints with the sample data.
pub fn script_startup(transport: &MockTransport) {
    transport.respond(Method::Get, "/auth/profile/", 200, profile_json());
    transport.respond(Method::Get, "/dashboard/", 200, dashboard_json());
    transport.respond(Method::Get, "/assets/", 200, json!([apartment_json(), car_json()]));
    transport.respond(Method::Get, "/portfolios/", 200, json!([portfolio_json()]));
}

// ---------------------------------------------------------------------------
// App factory
// ---------------------------------------------------------------------------

pub struct Fixture {
    pub app: PortfolioApp,
    pub transport: Arc<MockTransport>,
    pub host: Arc<HostLog>,
    pub store: Arc<MemoryStore>,
}

/// App over `transport` with a signed-in session; not yet initialized.
pub fn app_with(transport: Arc<MockTransport>) -> Fixture {
    let store = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, TOKEN)]));
    build(transport, store)
}

pub fn build(transport: Arc<MockTransport>, store: Arc<MemoryStore>) -> Fixture {
    let (host, log) = ScriptedHost::new();
    let app = PortfolioApp::builder()
        .base_url("http://api.test/api")
        .transport(transport.clone())
        .store(store.clone())
        .host(Box::new(host))
        .clock(today)
        .build()
        .unwrap();
    Fixture {
        app,
        transport,
        host: log,
        store,
    }
}

/// Initialized app on the dashboard with the sample data loaded.
pub fn setup_app() -> Fixture {
    let transport = MockTransport::new();
    script_startup(&transport);
    let mut fx = app_with(transport);
    assert!(fx.app.init());
    fx
}
