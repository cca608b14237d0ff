//! Authenticity tokens for state-changing form posts.
//!
//! A token is the hex HMAC-SHA256 of the user id keyed by the CSRF secret, so
//! it is stable for the lifetime of the secret and cannot be forged without it.

use anyhow::{anyhow, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::common::PartnerUserId;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the token on XHR posts
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Form field carrying the token on plain form posts
pub const AUTHENTICITY_TOKEN_FIELD: &str = "authenticity_token";

#[derive(Clone)]
pub struct CsrfService {
    mac: HmacSha256,
}

impl CsrfService {
    pub fn new(secret: &str) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| anyhow!("Invalid CSRF secret: {}", e))?;
        Ok(Self { mac })
    }

    fn digest(&self, user_id: PartnerUserId) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(user_id.to_string().as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Token a form rendered for `user_id` must echo back
    pub fn token_for(&self, user_id: PartnerUserId) -> String {
        hex::encode(self.digest(user_id))
    }

    /// Returns false for a missing, malformed, or foreign token
    pub fn verify(&self, user_id: PartnerUserId, token: Option<&str>) -> bool {
        let Some(token) = token else {
            return false;
        };
        let Ok(presented) = hex::decode(token.trim()) else {
            return false;
        };

        let expected = self.digest(user_id);
        if expected.len() != presented.len() {
            return false;
        }
        expected.ct_eq(presented.as_slice()).into()
    }
}
