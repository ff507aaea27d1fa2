use escriba_config::{AnyOrArray, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// Methods and headers are left open; the frontend is the only intended
/// caller and restricting origins is the meaningful knob.
pub(crate) fn cors_layer(config: &CorsConfig) -> CorsLayer {
    // tower-http rejects credentials combined with any wildcard, so
    // credentialed configurations mirror the request instead
    let credentials = config.credentials && !config.origins.is_any();

    let mut layer = if credentials {
        CorsLayer::new()
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    } else {
        CorsLayer::new()
            .allow_methods(AllowMethods::any())
            .allow_headers(AllowHeaders::any())
    };

    layer = match &config.origins {
        origins if origins.is_any() => layer.allow_origin(AllowOrigin::any()),
        AnyOrArray::Wildcard(origin) => {
            let origins: Vec<_> = origin.parse().ok().into_iter().collect();
            layer.allow_origin(origins)
        }
        AnyOrArray::List(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    layer
}
