// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated cloud wire client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::command::Command;
use crate::error::{Error, ProtocolError};
use crate::types::Channel;

/// Login endpoint path.
pub const LOGIN_ENDPOINT: &str = "/phoneuser/login";
/// Full-snapshot poll endpoint path.
pub const POLL_ENDPOINT: &str = "/data/querychangeddata2";
/// Device command endpoint path.
pub const OPERATE_ENDPOINT: &str = "/device/operate";

/// Configuration for a Keemple cloud connection.
///
/// # Examples
///
/// ```
/// use keemple_lib::protocol::CloudConfig;
/// use std::time::Duration;
///
/// let config = CloudConfig::new("48123456789", "secret")
///     .with_country_code("48")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct CloudConfig {
    username: String,
    password: String,
    country_code: String,
    base_url: String,
    timeout: Duration,
}

impl CloudConfig {
    /// Default cloud endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://webconsole.keemple.com/iremote";
    /// Default country code.
    pub const DEFAULT_COUNTRY_CODE: &'static str = "0";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Fixed platform identifier sent with every request.
    pub const PLATFORM: &'static str = "8";
    /// Language sent with the login request.
    pub const LANGUAGE: &'static str = "en_US";

    /// Creates a configuration for the given account credentials.
    ///
    /// The username is the phone number the account was registered with.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            country_code: Self::DEFAULT_COUNTRY_CODE.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the country code.
    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    /// Overrides the cloud endpoint. Trailing slashes are stripped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url = base_url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the cloud endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a [`CloudClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<CloudClient, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(CloudClient {
            http: client,
            base_url: self.base_url,
            username: self.username,
            password: self.password,
            country_code: self.country_code,
            authenticated: AtomicBool::new(false),
        })
    }
}

/// Result-code envelope present on every cloud response body.
///
/// A missing `resultCode` is treated as failure, never as success.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    /// Vendor result code; zero means success.
    #[serde(default = "missing_result_code", rename = "resultCode")]
    pub result_code: i64,
    /// Vendor result message accompanying failures.
    #[serde(default, rename = "resultMessage")]
    pub result_message: Option<String>,
}

const fn missing_result_code() -> i64 {
    -1
}

impl ApiEnvelope {
    /// Extracts the envelope from a parsed response body.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or(Self {
            result_code: missing_result_code(),
            result_message: None,
        })
    }

    /// Returns `true` when the cloud reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }

    /// Converts a failure envelope into a protocol error.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ResultCode` when the result code is non-zero.
    pub fn into_result(self) -> Result<(), ProtocolError> {
        if self.is_success() {
            return Ok(());
        }
        Err(ProtocolError::ResultCode {
            code: self.result_code,
            message: self.result_message.unwrap_or_default(),
        })
    }
}

/// Authenticated client for the Keemple cloud.
///
/// Owns the session state: a single authenticated flag, set by a successful
/// [`login`](Self::login) and consulted before every data or command
/// request. There is no token-expiry detection and no retry loop; a request
/// failing on an expired session surfaces as an ordinary failure and the
/// next call attempts a fresh login.
#[derive(Debug)]
pub struct CloudClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
    country_code: String,
    authenticated: AtomicBool,
}

impl CloudClient {
    /// Returns `true` once a login has succeeded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    /// Logs in against the cloud.
    ///
    /// Success is signaled by result code zero in the response body and sets
    /// the authenticated flag. Any other code or a transport failure is
    /// logged and reported as `false`; the caller retries on its next call.
    pub async fn login(&self) -> bool {
        let params = [
            ("platform", CloudConfig::PLATFORM),
            ("phonenumber", self.username.as_str()),
            ("countrycode", self.country_code.as_str()),
            ("password", self.password.as_str()),
            ("language", CloudConfig::LANGUAGE),
        ];

        match self.post_json(LOGIN_ENDPOINT, &params).await {
            Ok(body) => {
                let envelope = ApiEnvelope::from_value(&body);
                if envelope.is_success() {
                    self.authenticated.store(true, Ordering::Release);
                    tracing::debug!("login succeeded");
                    true
                } else {
                    tracing::error!(
                        code = envelope.result_code,
                        message = envelope.result_message.as_deref().unwrap_or(""),
                        "login failed"
                    );
                    false
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "login error");
                false
            }
        }
    }

    /// Sends an authenticated POST and returns the parsed JSON body.
    ///
    /// Attempts a transparent login first when the authenticated flag is
    /// unset. No retry: a failure is reported once.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport or HTTP-level failure and
    /// `ParseError` when the body is not valid JSON.
    pub async fn request<P: serde::Serialize + ?Sized + Sync>(
        &self,
        endpoint: &str,
        params: &P,
    ) -> Result<serde_json::Value, Error> {
        if !self.is_authenticated() {
            tracing::debug!("not authenticated, performing login");
            self.login().await;
        }
        self.post_json(endpoint, params).await
    }

    /// Sends a device command through the operate endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ResultCode` when the cloud rejects the
    /// command, or any transport/parse error from the request itself.
    pub async fn operate<C: Command + Sync>(
        &self,
        zwave_device_id: u64,
        command: &C,
        channel: Option<Channel>,
    ) -> Result<(), Error> {
        let encoded = command.encode().to_string();
        let mut params = vec![
            ("platform".to_string(), CloudConfig::PLATFORM.to_string()),
            ("zwavedeviceid".to_string(), zwave_device_id.to_string()),
            ("command".to_string(), encoded),
        ];
        if let Some(channel) = channel {
            params.push(("channel".to_string(), channel.to_string()));
        }

        let body = self.request(OPERATE_ENDPOINT, &params).await?;
        ApiEnvelope::from_value(&body).into_result()?;
        Ok(())
    }

    async fn post_json<P: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &P,
    ) -> Result<serde_json::Value, Error> {
        let url = format!("{}{endpoint}", self.base_url);
        tracing::debug!(url = %url, "sending cloud request");

        let response = self
            .http
            .post(&url)
            .query(params)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed.into());
        }
        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            ))
            .into());
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "received cloud response");
        Ok(body)
    }
}
