//! CORS policy for browser clients

use axum::http::HeaderValue;
use reflect_common::{Error, Result};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Allow the configured origins with credentials
///
/// Methods and headers are mirrored from the preflight request, since
/// wildcards cannot be combined with credentials.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            if origin == "*" {
                return Err(Error::Config(
                    "wildcard CORS origin cannot be used with credentials".to_string(),
                ));
            }
            HeaderValue::from_str(origin)
                .map_err(|e| Error::Config(format!("invalid CORS origin {:?}: {}", origin, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
