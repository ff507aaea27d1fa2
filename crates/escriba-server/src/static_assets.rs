use escriba_config::StaticAssetsConfig;
use tower_http::services::ServeDir;

/// Build the fallback service serving the frontend bundle
///
/// `GET /` resolves to `index.html`; unknown paths get the service's 404.
pub(crate) fn asset_service(config: &StaticAssetsConfig) -> ServeDir {
    ServeDir::new(&config.directory).append_index_html_on_directories(true)
}
