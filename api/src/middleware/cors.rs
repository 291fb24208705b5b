//! CORS configuration middleware.

use actix_cors::Cors;
use actix_web::http::header;

use ss_shared::config::CorsConfig;

/// Build the CORS middleware from configuration.
/// An `allowed_origins` entry of `*` yields the permissive development
/// setup; otherwise only the listed origins are accepted.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(config.max_age as usize);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
