//! CORS middleware configuration for the browser front end.
//!
//! The voice changer UI runs in a browser on a different origin than the
//! API, so every endpoint answers preflight requests. Development allows
//! any origin; production allows only the configured ones.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use vc_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    if config.allow_any_origin {
        create_development_cors(config.max_age)
    } else {
        create_production_cors(config)
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![Method::GET, Method::POST, Method::OPTIONS]
}

/// Permissive configuration for local development
fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(max_age)
}

/// Restrictive configuration: only `allowed_origins` may call the API
fn create_production_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_development_cors_allows_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&CorsConfig::development()))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:8501"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[actix_web::test]
    async fn test_production_cors_rejects_unknown_origin() {
        let config = CorsConfig {
            allow_any_origin: false,
            allowed_origins: vec!["https://voice.example.com".to_string()],
            max_age: 600,
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://voice.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://voice.example.com"
        );

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example.com"))
            .to_request();
        let resp = test::try_call_service(&app, req).await;
        assert!(resp.map(|r| !r.status().is_success()).unwrap_or(true));
    }
}
