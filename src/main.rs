use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers, Logger};
use actix_web::{App, HttpResponse, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::{Context, Tera};

use cct_console::db::establish_connection_pool;
use cct_console::domain::types::FormType;
use cct_console::models::config::ServerConfig;
use cct_console::notify::ChangeBus;
use cct_console::repository::DieselRepository;
use cct_console::routes::{auth, blog, categories, submissions};
use cct_console::services::store::SubmissionStore;
use cct_console::storage::FileStorage;

fn internal_error_page<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, _) = res.into_parts();
    let body = req
        .app_data::<web::Data<Tera>>()
        .and_then(|tera| tera.render("500.html", &Context::new()).ok())
        .unwrap_or_else(|| "Internal Server Error".to_string());
    let response = HttpResponse::InternalServerError()
        .content_type("text/html; charset=utf-8")
        .body(body);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database pool: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let tera = match Tera::new("templates/**/*.html") {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to load templates: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = Key::derive_from(config.secret_key.as_bytes());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let storage = web::Data::new(FileStorage::new(&config.uploads_root));
    let store = web::Data::new(SubmissionStore::new());
    let bus = web::Data::new(ChangeBus::new());

    // Any write to an intake table invalidates the dashboard snapshot.
    let dirty_store = store.clone();
    let _store_subscription = bus.subscribe(move |event| {
        if FormType::try_from(event.table).is_ok() {
            dirty_store.mark_dirty();
        }
    });

    let repo_data = web::Data::new(repo);
    let tera_data = web::Data::new(tera);
    let uploads_root = config.uploads_root.clone();

    log::info!("Starting server on {}:{}", config.bind_address, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(repo_data.clone())
            .app_data(tera_data.clone())
            .app_data(storage.clone())
            .app_data(store.clone())
            .app_data(bus.clone())
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::INTERNAL_SERVER_ERROR, internal_error_page),
            )
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .wrap(Logger::default())
            .service(auth::signin_page)
            .service(auth::signin)
            .service(auth::signout)
            .service(blog::console)
            .service(blog::show_posts)
            .service(blog::add_post_page)
            .service(blog::add_post)
            .service(blog::upload_image)
            .service(blog::show_post)
            .service(blog::edit_post_page)
            .service(blog::edit_post)
            .service(blog::publish_post)
            .service(blog::delete_post)
            .service(categories::show_categories)
            .service(categories::add_category)
            .service(submissions::dashboard)
            .service(submissions::export_submissions)
            .service(submissions::show_submission)
            .service(submissions::approve_submission)
            .service(submissions::download_summary)
            .service(Files::new("/files", uploads_root.clone()))
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
