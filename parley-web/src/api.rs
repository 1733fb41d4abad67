use once_cell::unsync::OnceCell;
use reqwest::{Client, Response};
use shared::models::{
    CreateAccountRequest, ErrorResponse, PasswordResetRequest, ResendVerificationRequest,
    SendResetRequest, ServerConfig, SessionRequest, SessionResponse,
};

use crate::config::FrontendConfig;

thread_local! {
    static SHARED_CLIENT: OnceCell<ParleyClient> = const { OnceCell::new() };
}

/// Lightweight API client for Parley web interactions.
#[derive(Clone, Debug)]
pub struct ParleyClient {
    base_url: String,
    client: Client,
}

impl ParleyClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Client shared across the app, bound to the configured base URL.
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(FrontendConfig::new().api_base_url()))
                .clone()
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetch the server configuration.
    pub async fn get_configuration(&self) -> Result<ServerConfig, ErrorResponse> {
        let url = self.api_url("configuration");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(connection_error)?;
        decode(response).await
    }

    /// Open a session with email/password credentials.
    pub async fn create_session(
        &self,
        payload: &SessionRequest,
    ) -> Result<SessionResponse, ErrorResponse> {
        let url = self.api_url("auth/session");
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(connection_error)?;
        decode(response).await
    }

    /// Register a new account.
    pub async fn create_account(
        &self,
        payload: &CreateAccountRequest,
    ) -> Result<(), ErrorResponse> {
        let url = self.api_url("auth/account");
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(connection_error)?;
        accept(response).await
    }

    /// Request a password-reset email.
    pub async fn send_password_reset(
        &self,
        payload: &SendResetRequest,
    ) -> Result<(), ErrorResponse> {
        let url = self.api_url("auth/account/reset_password");
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(connection_error)?;
        accept(response).await
    }

    /// Complete a password reset with the token from the reset email.
    pub async fn password_reset(&self, payload: &PasswordResetRequest) -> Result<(), ErrorResponse> {
        let url = self.api_url("auth/account/reset_password/confirm");
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(connection_error)?;
        accept(response).await
    }

    /// Request a fresh account-verification email.
    pub async fn resend_verification(
        &self,
        payload: &ResendVerificationRequest,
    ) -> Result<(), ErrorResponse> {
        let url = self.api_url("auth/account/reverify");
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(connection_error)?;
        accept(response).await
    }
}

/// Map a transport failure onto the error envelope.
fn connection_error(source: reqwest::Error) -> ErrorResponse {
    ErrorResponse::with_details("connection_failed", source.to_string())
}

/// Decode a JSON body, folding non-2xx statuses into the error envelope.
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ErrorResponse> {
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }
    response.json().await.map_err(connection_error)
}

/// Accept any 2xx response, folding failures into the error envelope.
async fn accept(response: Response) -> Result<(), ErrorResponse> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from(response).await)
    }
}

/// Decode the error envelope from a failed response, with a fallback for
/// bodies that are not in the expected shape.
async fn error_from(response: Response) -> ErrorResponse {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => body,
        Err(_) => ErrorResponse::with_details("http_error", format!("status {status}")),
    }
}
