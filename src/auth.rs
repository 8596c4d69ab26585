//! Session-backed authentication for console routes.
//!
//! The signed-in user is stored as a JSON blob inside the identity cookie.
//! Extracting [`AuthenticatedUser`] from a request either yields the current
//! user or redirects the browser to the sign-in page.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header};
use serde::{Deserialize, Serialize};

/// Identity of the signed-in console operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl AuthenticatedUser {
    /// Serialize the user for storage in the identity cookie.
    pub fn to_session_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn redirect_to_signin(req: &HttpRequest) -> Error {
    let next = req.path().to_string();
    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/signin?next={next}")))
        .finish();
    InternalError::from_response("unauthenticated", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => identity,
            Err(_) => return ready(Err(redirect_to_signin(req))),
        };

        let result = identity
            .id()
            .map_err(|_| redirect_to_signin(req))
            .and_then(|raw| {
                serde_json::from_str::<AuthenticatedUser>(&raw).map_err(|e| {
                    log::error!("Failed to deserialize session identity: {e}");
                    redirect_to_signin(req)
                })
            });

        ready(result)
    }
}
