use crate::configuration::Settings;
use crate::connectors;
use crate::helpers;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::Compress;
use actix_web::{dev::Server, error, http, web, App, HttpResponse, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let uploads_dir = settings.uploads.directory.clone();
    std::fs::create_dir_all(&uploads_dir)?;

    let frontend_origin = settings.frontend_url.clone();

    let promptly_connector = connectors::init_promptly(&settings.promptly)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;

    let json_config = web::JsonConfig::default()
        .limit(10 * 1024)
        .error_handler(|err, _req| {
            let body = helpers::json::error_body(&err);
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        });

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
            .supports_credentials();

        App::new()
            .wrap(TracingLogger::default())
            .wrap(Compress::default())
            .wrap(cors)
            .service(routes::health_check)
            .service(Files::new("/uploads", uploads_dir.clone()))
            .service(
                web::scope("/api/auth")
                    .service(routes::auth::register)
                    .service(routes::auth::login)
                    .service(routes::auth::logout),
            )
            .service(
                web::scope("/api/user")
                    .wrap(middleware::authentication::Manager::new())
                    .service(routes::user::balance),
            )
            .service(
                web::scope("/api/ai")
                    .wrap(middleware::authentication::Manager::new())
                    .service(routes::chat::send)
                    .service(crate::routes::conversation::get::list)
                    .service(crate::routes::conversation::get::item)
                    .service(crate::routes::conversation::update::item)
                    .service(crate::routes::conversation::assign::item)
                    .service(crate::routes::conversation::delete::item)
                    .service(crate::routes::project::add::item)
                    .service(crate::routes::project::get::list)
                    .service(crate::routes::project::update::item)
                    .service(crate::routes::project::delete::item),
            )
            .default_service(web::route().to(not_found))
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(settings.clone())
            .app_data(promptly_connector.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(helpers::json::error_body("Route not found"))
}
