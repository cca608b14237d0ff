//! One-shot flash messages carried across a redirect in a cookie.
//!
//! Cookie value format: `<kind>:<urlencoded message>`.

use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Notice,
    Alert,
}

impl FlashKind {
    fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Notice => "notice",
            FlashKind::Alert => "alert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Notice,
            message: message.into(),
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Alert,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value storing this flash
    pub fn to_cookie(&self) -> String {
        format!(
            "{}={}:{}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.kind.as_str(),
            urlencoding::encode(&self.message)
        )
    }

    /// `Set-Cookie` value removing the flash
    pub fn clear_cookie() -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", FLASH_COOKIE)
    }

    /// Parse a single cookie value (the part after `flash=`)
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let (kind, encoded) = value.split_once(':')?;
        let kind = match kind {
            "notice" => FlashKind::Notice,
            "alert" => FlashKind::Alert,
            _ => return None,
        };
        let message = urlencoding::decode(encoded).ok()?.into_owned();
        Some(Self { kind, message })
    }

    /// Read the flash from request cookies, if present
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .and_then(|(_, value)| Self::from_cookie_value(value))
    }
}

/// 303 redirect carrying a flash message
pub fn redirect_with_flash(to: &str, flash: Flash) -> Response {
    let mut response = StatusCode::SEE_OTHER.into_response();
    let headers = response.headers_mut();

    match HeaderValue::from_str(to) {
        Ok(location) => {
            headers.insert(LOCATION, location);
        }
        Err(e) => {
            tracing::error!(error = %e, location = %to, "Invalid redirect location");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }
    if let Ok(cookie) = HeaderValue::from_str(&flash.to_cookie()) {
        headers.insert(SET_COOKIE, cookie);
    }

    response
}
