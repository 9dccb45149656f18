#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests, and https://github.com/rust-lang/rust-clippy/issues/13981"
)]
#![allow(
    unused,
    reason = "Deeply nested uses in sub-modules are falsely flagged as being unused"
)]

use binance_client_sdk::auth::Credentials;
use binance_client_sdk::{Client, Config};
use httpmock::{Mock, MockServer};
use reqwest::StatusCode;
use serde_json::json;

// Published example credentials from the exchange's API documentation
pub const API_KEY: &str = "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";
pub const SECRET_KEY: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

pub const SERVER_TIME: i64 = 1_499_827_319_559;

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY.to_owned(), SECRET_KEY.to_owned())
}

/// Mocks `GET /api/v3/time` so signed requests carry [`SERVER_TIME`].
pub fn mock_server_time(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/api/v3/time");
        then.status(StatusCode::OK)
            .json_body(json!({ "serverTime": SERVER_TIME }));
    })
}

/// Client whose signed requests use the mocked server clock.
pub fn create_signed(server: &MockServer) -> anyhow::Result<Client> {
    let config = Config::builder().use_server_time(true).build();

    Ok(Client::with_credentials(
        &server.base_url(),
        config,
        credentials(),
    )?)
}
