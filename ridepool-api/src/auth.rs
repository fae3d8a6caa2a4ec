use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ridepool_core::Error;

/// Identity resolved from a request's credentials. Attached to the request
/// extensions by the auth middleware and scoped to that one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Turns opaque credentials into a resolved identity, or fails with
/// [`Error::Unauthorized`]. One implementation per credential scheme.
#[async_trait]
pub trait Validator: Send + Sync {
    async fn validate(&self, credentials: &str) -> Result<UserInfo, Error>;
}

/// Registered validators, keyed by lowercase scheme name ("basic",
/// "bearer", ...).
pub type ValidatorMap = HashMap<String, Arc<dyn Validator>>;

/// Splits an `Authorization` header of the form `"<scheme> <credentials>"`.
fn parse_header(header: &str) -> Result<(&str, &str), Error> {
    match header.split_once(' ') {
        Some((scheme, credentials)) if !scheme.is_empty() && !credentials.is_empty() => {
            Ok((scheme, credentials))
        }
        _ => Err(Error::unauthorized("failed to parse authorization header")),
    }
}

/// Resolves the identity behind an authorization header by dispatching to
/// the validator registered for its scheme. Unknown schemes and malformed
/// headers are unauthorized.
pub async fn resolve_identity(validators: &ValidatorMap, header: &str) -> Result<UserInfo, Error> {
    let (scheme, credentials) = parse_header(header)?;
    let scheme = scheme.to_ascii_lowercase();

    let validator = validators.get(&scheme).ok_or_else(|| {
        Error::unauthorized(format!("no validator found for scheme \"{scheme}\""))
    })?;

    validator.validate(credentials).await
}

/// Validates service-to-service callers against a shared configured
/// credential blob.
pub struct BasicValidator {
    credentials: String,
}

impl BasicValidator {
    pub fn new(credentials: impl Into<String>) -> Result<Self, Error> {
        let credentials = credentials.into();
        if credentials.is_empty() {
            return Err(Error::Internal(anyhow::anyhow!(
                "basic auth credentials are empty"
            )));
        }

        Ok(Self { credentials })
    }
}

#[async_trait]
impl Validator for BasicValidator {
    async fn validate(&self, credentials: &str) -> Result<UserInfo, Error> {
        if credentials != self.credentials {
            return Err(Error::unauthorized("invalid basic credentials"));
        }

        Ok(UserInfo {
            sub: "service".to_string(),
            email: None,
        })
    }
}

/// Validates bearer tokens by introspecting them against the identity
/// provider's userinfo endpoint.
pub struct TokenValidator {
    domain: String,
    client: reqwest::Client,
}

impl TokenValidator {
    pub fn new(domain: impl Into<String>) -> Result<Self, Error> {
        let domain = domain.into();
        if domain.is_empty() {
            return Err(Error::Internal(anyhow::anyhow!("auth domain is empty")));
        }

        Ok(Self {
            domain,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl Validator for TokenValidator {
    async fn validate(&self, credentials: &str) -> Result<UserInfo, Error> {
        let response = self
            .client
            .get(format!("https://{}/userinfo", self.domain))
            .bearer_auth(credentials)
            .send()
            .await
            .map_err(|e| Error::Request(format!("failed to reach identity provider: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::unauthorized("failed to validate token"));
        }

        response
            .json::<UserInfo>()
            .await
            .map_err(|_| Error::unauthorized("malformed userinfo response"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct CountingValidator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Validator for CountingValidator {
        async fn validate(&self, credentials: &str) -> Result<UserInfo, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(UserInfo {
                sub: format!("user-{credentials}"),
                email: None,
            })
        }
    }

    fn validators() -> (Arc<CountingValidator>, Arc<CountingValidator>, ValidatorMap) {
        let basic = Arc::new(CountingValidator::default());
        let bearer = Arc::new(CountingValidator::default());
        let mut map: ValidatorMap = HashMap::new();
        map.insert("basic".to_string(), basic.clone());
        map.insert("bearer".to_string(), bearer.clone());
        (basic, bearer, map)
    }

    #[tokio::test]
    async fn unknown_scheme_is_unauthorized() {
        let (basic, bearer, map) = validators();

        let err = resolve_identity(&map, "Digest abc").await.unwrap_err();

        assert!(matches!(err, Error::Unauthorized(_)));
        assert_eq!(basic.calls.load(Ordering::SeqCst), 0);
        assert_eq!(bearer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn bearer_header_routes_to_bearer_validator_exactly_once() {
        let (basic, bearer, map) = validators();

        let user = resolve_identity(&map, "Bearer xyz").await.unwrap();

        assert_eq!(user.sub, "user-xyz");
        assert_eq!(bearer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(basic.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn scheme_lookup_is_case_insensitive() {
        let (basic, _bearer, map) = validators();

        resolve_identity(&map, "BASIC abc").await.unwrap();

        assert_eq!(basic.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_header_is_unauthorized() {
        let (_basic, _bearer, map) = validators();

        for header in ["", "Bearer", "Bearer "] {
            let err = resolve_identity(&map, header).await.unwrap_err();
            assert!(matches!(err, Error::Unauthorized(_)), "header {header:?}");
        }
    }

    #[tokio::test]
    async fn basic_validator_compares_credential_blob() {
        let validator = BasicValidator::new("secret").unwrap();

        assert!(validator.validate("secret").await.is_ok());
        assert!(matches!(
            validator.validate("wrong").await.unwrap_err(),
            Error::Unauthorized(_)
        ));
    }

    #[test]
    fn constructors_reject_empty_configuration() {
        assert!(BasicValidator::new("").is_err());
        assert!(TokenValidator::new("").is_err());
    }
}
