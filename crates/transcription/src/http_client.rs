use std::time::Duration;

use reqwest::Client;

/// Connect timeout; the request timeout comes from configuration
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client used for upstream calls
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .tcp_nodelay(true)
        .build()
        .expect("Failed to build default HTTP client")
}
