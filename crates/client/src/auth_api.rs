//! Token issuance (`POST /auth/login`). The endpoint belongs to the backend;
//! this is only the client side of the call.

use serde::{Deserialize, Serialize};

use storefront_auth::{AccessToken, Session};
use storefront_core::UserId;

use crate::config::ClientConfig;
use crate::error::LoginError;
use crate::http::{build_client, rejection_message};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    user_id: String,
}

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: reqwest::Client,
    url: String,
}

impl AuthApi {
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            url: config.endpoint("/auth/login"),
        })
    }

    /// Exchange credentials for a session. The caller decides whether to
    /// make it current (`AuthContext::login`).
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, LoginError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| LoginError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LoginError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| LoginError::InvalidResponse(e.to_string()))?;

        let token =
            AccessToken::new(body.token).map_err(|e| LoginError::InvalidResponse(e.to_string()))?;
        let user_id =
            UserId::new(body.user_id).map_err(|e| LoginError::InvalidResponse(e.to_string()))?;

        Ok(Session::new(token, user_id))
    }
}
