// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod service_key;
mod token;
pub mod cli;
pub mod edits_api;
pub mod publish;

use {
    reqwest::blocking::{Client, ClientBuilder, RequestBuilder, Response},
    serde_json::Value,
    std::{path::Path, sync::Mutex},
    thiserror::Error,
};

pub use crate::service_key::{InvalidPemPrivateKey, ServiceAccountKey};
pub use crate::token::{AccessToken, AccessTokenEncoder, AccessTokenResponse};

pub type Result<T> = anyhow::Result<T>;

/// OAuth2 scope covering every Android Publisher API operation used here.
pub const ANDROID_PUBLISHER_SCOPE: &str = "https://www.googleapis.com/auth/androidpublisher";

/// A client for the Google Play Developer Publishing API.
///
/// The client isn't generic. Don't get any ideas.
pub struct GooglePlayClient {
    client: Client,
    token_encoder: AccessTokenEncoder,
    token: Mutex<Option<AccessToken>>,
}

impl GooglePlayClient {
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let key = ServiceAccountKey::from_json_path(path)?;
        GooglePlayClient::new(key.try_into()?)
    }

    /// Create a new client to the Android Publisher API.
    pub fn new(token_encoder: AccessTokenEncoder) -> Result<Self> {
        let client = ClientBuilder::default()
            .user_agent("google-play-publish crate (https://crates.io/crates/google-play-publish)")
            .build()?;
        Ok(Self {
            client,
            token_encoder,
            token: Mutex::new(None),
        })
    }

    pub fn get_token(&self) -> Result<String> {
        let mut token = self.token.lock().unwrap();

        // TODO need to handle token expiration.
        if token.is_none() {
            let assertion = self
                .token_encoder
                .new_assertion(ANDROID_PUBLISHER_SCOPE, 3600)?;
            token.replace(self.exchange_assertion(&assertion)?);
        }

        Ok(token.as_ref().unwrap().clone())
    }

    /// Trade a signed JWT-bearer assertion for a short lived access token.
    fn exchange_assertion(&self, assertion: &str) -> Result<AccessToken> {
        let req = self.client.post(self.token_encoder.token_uri()).form(&[
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion),
        ]);

        let res: AccessTokenResponse = self.send_request(req)?.json()?;

        Ok(res.access_token)
    }

    pub fn send_request(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        let method = request.method().to_string();
        let url = request.url().to_string();

        log::debug!("{} {}", request.method(), url);

        let response = self.client.execute(request)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let body = response.bytes()?;

            let message = if let Ok(value) = serde_json::from_slice::<Value>(body.as_ref()) {
                serde_json::to_string_pretty(&value)?
            } else {
                String::from_utf8_lossy(body.as_ref()).into()
            };

            Err(GooglePlayError {
                method,
                url,
                message,
            }
            .into())
        }
    }
}

#[derive(Clone, Debug, Error)]
#[error("google play error:\n{method} {url}\n{message}")]
pub struct GooglePlayError {
    method: String,
    url: String,
    message: String,
}
