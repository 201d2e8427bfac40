// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Service account access tokens.

use {
    crate::Result,
    jsonwebtoken::{Algorithm, EncodingKey, Header},
    serde::{Deserialize, Serialize},
    std::time::SystemTime,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
struct TokenGrantClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

/// An OAuth2 bearer token for use with the Android Publisher API.
pub type AccessToken = String;

/// Body of a successful exchange at the OAuth2 token endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: AccessToken,
    pub expires_in: u64,
    pub token_type: String,
}

/// Represents a service account private key used to mint JWT-bearer grant
/// assertions for Google OAuth2.
///
/// See <https://developers.google.com/identity/protocols/oauth2/service-account>
/// for more details.
///
/// Google issues service account keys as a JSON document holding:
///
/// * A client email. This is the service account's identity, like
///   `publisher@my-project.iam.gserviceaccount.com`.
/// * A private key. PEM encoded PKCS#8 RSA.
/// * A token endpoint URI to exchange signed assertions at.
///
/// This entity holds the necessary metadata to issue new assertions; the
/// network exchange itself is performed by the client owning this encoder.
#[derive(Clone)]
pub struct AccessTokenEncoder {
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for AccessTokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // [EncodingKey] holds private key material and does not implement Debug.
        f.debug_struct("AccessTokenEncoder")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl AccessTokenEncoder {
    /// Construct an instance from an [EncodingKey] instance.
    ///
    /// This is the lowest level API and ultimately what all constructors use.
    pub fn from_jwt_encoding_key(
        client_email: String,
        token_uri: String,
        encoding_key: EncodingKey,
    ) -> Self {
        Self {
            client_email,
            token_uri,
            encoding_key,
        }
    }

    /// Construct an instance from a PEM encoded RSA private key.
    pub fn from_rsa_pem(client_email: String, token_uri: String, pem_data: &[u8]) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(pem_data)?;

        Ok(Self::from_jwt_encoding_key(
            client_email,
            token_uri,
            encoding_key,
        ))
    }

    /// The OAuth2 token endpoint signed assertions should be exchanged at.
    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    /// Mint a new signed JWT-bearer assertion.
    ///
    /// Using the private key and account metadata bound to this instance, we
    /// issue a new assertion for the requested scope and duration.
    pub fn new_assertion(&self, scope: &str, duration: u64) -> Result<String> {
        let header = Header {
            alg: Algorithm::RS256,
            ..Default::default()
        };

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("calculating UNIX time should never fail")
            .as_secs();

        let claims = TokenGrantClaims {
            iss: self.client_email.clone(),
            scope: scope.to_string(),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + duration,
        };

        let assertion = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;

        Ok(assertion)
    }
}
