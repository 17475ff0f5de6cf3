mod config;
mod error;
mod inference;
mod routes;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use config::RelayConfig;
use inference::ml_service::MlService;
use routes::configure_routes;

/// Builds the relay application with its middleware, shared state and routes.
pub fn build_app(
    config: web::Data<RelayConfig>,
    ml_service: web::Data<MlService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    let frontend_dir = config.frontend_dir.clone();

    App::new()
        .wrap(
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                ])
                .max_age(3600),
        )
        .wrap(Logger::default())
        .app_data(config)
        .app_data(ml_service)
        .configure(|cfg| configure_routes(cfg, frontend_dir))
        .default_service(web::to(routes::not_found))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = RelayConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let ml_service = MlService::new(&config).map_err(|e| {
        log::error!("Failed to build inference client: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    log::info!(
        "Relaying predictions to {} (timeout {:?}, connect timeout {:?})",
        ml_service.predict_url(),
        config.request_timeout,
        config.connect_timeout
    );
    match config.max_upload_bytes {
        Some(limit) => log::info!("Server-side upload limit: {} bytes", limit),
        None => log::info!("No server-side upload limit"),
    }

    let bind_address = config.bind_address();
    log::info!("Starting server on {}", bind_address);

    let config = web::Data::new(config);
    let ml_service = web::Data::new(ml_service);

    HttpServer::new(move || build_app(config.clone(), ml_service.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
