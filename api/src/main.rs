use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use log::{error, info};

use cantina_core::services::{AuthService, TokenCleanupService, TokenService};
use cantina_infra::{create_pool, MySqlRoleRepository, MySqlTokenRepository, MySqlUserRepository};

use cantina_api::config::AppConfig;
use cantina_api::middleware::{cors, JwtVerifier};
use cantina_api::routes;
use cantina_api::routes::auth::AppState;

type MySqlAppState = AppState<MySqlUserRepository, MySqlRoleRepository, MySqlTokenRepository>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Cantina API server");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let role_repository = Arc::new(MySqlRoleRepository::new(pool.clone()));
    let token_repository = Arc::new(MySqlTokenRepository::new(pool));

    let token_service = match TokenService::new(
        token_repository.clone(),
        role_repository,
        config.token.clone(),
    ) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            error!("Token service initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    let auth_service = Arc::new(AuthService::new(user_repository, token_service));

    let cleanup_service = Arc::new(TokenCleanupService::new(
        token_repository,
        config.cleanup.clone(),
    ));
    cleanup_service.start_background_task();

    let state = web::Data::new(MySqlAppState { auth_service });
    let verifier = web::Data::new(JwtVerifier::new(&config.token));

    let bind_address = config.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors::create_cors())
            .app_data(state.clone())
            .app_data(verifier.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api/v1").service(
                    web::scope("/auth")
                        .route(
                            "/register",
                            web::post().to(routes::auth::register::register::<
                                MySqlUserRepository,
                                MySqlRoleRepository,
                                MySqlTokenRepository,
                            >),
                        )
                        .route(
                            "/login",
                            web::post().to(routes::auth::login::login::<
                                MySqlUserRepository,
                                MySqlRoleRepository,
                                MySqlTokenRepository,
                            >),
                        )
                        .route(
                            "/refresh",
                            web::post().to(routes::auth::refresh::refresh::<
                                MySqlUserRepository,
                                MySqlRoleRepository,
                                MySqlTokenRepository,
                            >),
                        )
                        .route(
                            "/logout",
                            web::post().to(routes::auth::logout::logout::<
                                MySqlUserRepository,
                                MySqlRoleRepository,
                                MySqlTokenRepository,
                            >),
                        ),
                ),
            )
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": "not_found",
                    "message": "The requested resource was not found"
                }))
            }))
    })
    .bind(&bind_address)?
    .run()
    .await
}
