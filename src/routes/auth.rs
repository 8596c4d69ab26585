use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::forms::auth::{SigninForm, SigninFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{alert_level_to_str, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::signin as signin_service;

#[derive(Deserialize)]
pub struct SigninQuery {
    pub next: Option<String>,
}

/// Only allow same-site destinations after sign-in.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") => next,
        _ => "/",
    }
}

#[get("/signin")]
pub async fn signin_page(
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    query: web::Query<SigninQuery>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if identity.is_some() {
        return redirect("/");
    }

    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();
    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", "signin");
    context.insert("next", safe_next(query.next.as_deref()));
    render_template(&tera, "auth/signin.html", &context)
}

#[post("/signin")]
pub async fn signin(
    request: HttpRequest,
    repo: web::Data<DieselRepository>,
    query: web::Query<SigninQuery>,
    web::Form(form): web::Form<SigninForm>,
) -> impl Responder {
    let payload: SigninFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/signin");
        }
    };

    match signin_service(payload, repo.get_ref()) {
        Ok(user) => {
            let session = match user.to_session_string() {
                Ok(session) => session,
                Err(e) => {
                    log::error!("Failed to serialize session identity: {e}");
                    return HttpResponse::InternalServerError().finish();
                }
            };
            if let Err(e) = Identity::login(&request.extensions(), session) {
                log::error!("Failed to establish session: {e}");
                return HttpResponse::InternalServerError().finish();
            }
            redirect(safe_next(query.next.as_deref()))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Invalid email or password").send();
            redirect("/signin")
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/signout")]
pub async fn signout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/signin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_destination_must_be_same_site() {
        assert_eq!(safe_next(Some("/dashboard")), "/dashboard");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }
}
