// src/web/session.rs

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "olatech_session";

/// Opaque cart session token carried by a cookie. A request without a valid
/// token is handed a fresh one; cart handlers attach the cookie to their
/// response when `fresh` is set.
#[derive(Debug, Clone, Copy)]
pub struct CartSession {
  pub token: Uuid,
  pub fresh: bool,
}

impl CartSession {
  /// Cookie whose max-age matches the cart TTL, so client and server agree on
  /// when the session ends.
  pub fn issue_cookie(&self, ttl: chrono::Duration) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, self.token.to_string())
      .path("/")
      .http_only(true)
      .max_age(CookieDuration::seconds(ttl.num_seconds()))
      .finish()
  }
}

impl FromRequest for CartSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let session = req
      .cookie(SESSION_COOKIE)
      .and_then(|c| Uuid::parse_str(c.value()).ok())
      .map(|token| CartSession { token, fresh: false })
      .unwrap_or_else(|| CartSession {
        token: Uuid::new_v4(),
        fresh: true,
      });
    ready(Ok(session))
  }
}
