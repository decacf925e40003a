use std::path::PathBuf;

pub const API_BASE_URL: &str = "http://localhost:8000/api";
pub const LOGIN_PAGE: &str = "./login.html";

/// Canonical storage key for the auth token.
pub const TOKEN_KEY: &str = "auth_token";
/// Older writers stored the token under this key; read once and migrated.
pub const LEGACY_TOKEN_KEY: &str = "authToken";
pub const USER_DATA_KEY: &str = "user_data";

pub const STORAGE_FILE: &str = "storage.json";

pub const DEFAULT_PORTFOLIO_NAME: &str = "Мой портфель";
pub const DEFAULT_PORTFOLIO_DESCRIPTION: &str = "Основной портфель активов";

pub const CAR_ADDRESS: &str = "Автомобиль (без фиксированного адреса)";

pub const AVATAR_URL: &str = "https://placehold.co/100x100/4F46E5/FFFFFF";

pub const APARTMENT_MARKET_URL: &str = "https://app.powerbi.com/view?r=eyJrIjoiNWVhZmEwNjItYmE5NC00MjY1LTg2MGUtMGUyNmMxMmMzNWVlIiwidCI6ImI1OGVhYjJiLTA1YzYtNDcxYi1hYWRhLWNiNjMwY2MyMDJkYyIsImMiOjEwfQ%3D%3D";
pub const CAR_MARKET_URL: &str = "https://app.powerbi.com/view?r=eyJrIjoiMWE0Y2Q4ZDItZWY2Yi00OTczLWFiMjgtYTkyYzQzZTNkYWMxIiwidCI6ImI1OGVhYjJiLTA1YzYtNDcxYi1hYWRhLWNiNjMwY2MyMDJkYyIsImMiOjEwfQ%3D%3D";

/// Stated accuracy of the pricing model, shown under every evaluation.
pub const MODEL_ACCURACY: &str = "±3.61%";

pub fn default_storage_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("portfolio-client")
    } else {
        PathBuf::from(".portfolio-client")
    }
}
