// demos/marketplace_app/src/web/extractors.rs

//! Authenticated-user extraction.
//!
//! Authentication itself is out of scope for this demo: in a deployment the
//! reverse proxy / auth gateway in front of this service validates the
//! session and forwards the identity as trusted headers. The extractor turns
//! those headers into the explicit `UserIdentity` the agrimart services
//! require. Requests without a usable identity fail with 401.

use actix_web::{FromRequest, HttpRequest};
use tracing::warn;
use uuid::Uuid;

use agrimart::{MarketError, Role, UserIdentity};

use crate::errors::ApiError;

#[derive(Debug)]
pub struct AuthenticatedUser {
  pub identity: UserIdentity,
}

fn header<'r>(req: &'r HttpRequest, name: &str) -> Option<&'r str> {
  req.headers().get(name).and_then(|value| value.to_str().ok())
}

fn identity_from_headers(req: &HttpRequest) -> Option<UserIdentity> {
  let id = Uuid::parse_str(header(req, "X-User-Id")?).ok()?;
  let name = header(req, "X-User-Name")?.to_string();
  let email = header(req, "X-User-Email")?.to_string();
  let role = match header(req, "X-User-Role") {
    Some("seller") => Role::Seller,
    _ => Role::Buyer,
  };
  Some(UserIdentity::new(id, name, email, role))
}

impl FromRequest for AuthenticatedUser {
  type Error = ApiError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    match identity_from_headers(req) {
      Some(identity) => futures_util::future::ready(Ok(AuthenticatedUser { identity })),
      None => {
        warn!("AuthenticatedUser extractor: missing or invalid X-User-* headers.");
        futures_util::future::ready(Err(ApiError::Market(MarketError::NotAuthenticated)))
      }
    }
  }
}
