//! Bearer-token authorizer for API-Gateway-style custom authorization.
//!
//! Verifies a JWT against a JSON Web Key Set and answers with an IAM policy
//! allowing or denying `execute-api:Invoke` on the requested method.

use std::collections::HashMap;

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet, KeyAlgorithm};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

const POLICY_VERSION: &str = "2012-10-17";
const INVOKE_ACTION: &str = "execute-api:Invoke";
const UNAUTHORIZED_PRINCIPAL: &str = "unauthorized";
const DEFAULT_PRINCIPAL: &str = "user";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub authorization_token: Option<String>,
    pub method_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub action: Vec<String>,
    pub effect: Effect,
    pub resource: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl AuthorizerResponse {
    fn new(principal_id: String, effect: Effect, method_arn: &str) -> Self {
        Self {
            principal_id,
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![Statement {
                    action: vec![INVOKE_ACTION.to_string()],
                    effect,
                    resource: vec![method_arn.to_string()],
                }],
            },
            context: None,
        }
    }

    pub fn allow(principal_id: String, method_arn: &str, role: Option<String>) -> Self {
        let mut response = Self::new(principal_id, Effect::Allow, method_arn);
        response.context = Some(
            role.into_iter()
                .map(|role| ("role".to_string(), role))
                .collect(),
        );
        response
    }

    pub fn deny(method_arn: &str) -> Self {
        Self::new(UNAUTHORIZED_PRINCIPAL.to_string(), Effect::Deny, method_arn)
    }

    pub fn effect(&self) -> Option<Effect> {
        self.policy_document.statement.first().map(|s| s.effect)
    }
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// A role claim may be a single string or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl RoleClaim {
    fn first(&self) -> Option<&str> {
        match self {
            RoleClaim::One(role) => Some(role.as_str()),
            RoleClaim::Many(roles) => roles.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    roles: Option<RoleClaim>,
    role: Option<RoleClaim>,
    #[serde(rename = "cognito:groups")]
    cognito_groups: Option<RoleClaim>,
}

impl Claims {
    fn role(&self) -> Option<String> {
        [&self.roles, &self.role, &self.cognito_groups]
            .into_iter()
            .flatten()
            .find_map(RoleClaim::first)
            .map(str::to_string)
    }
}

// ---------------------------------------------------------------------------
// Authorizer
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AuthorizerError {
    #[error("Failed to fetch JWKS: {0}")]
    Jwks(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
enum TokenError {
    #[error("no signing key matches the token")]
    UnknownKey,
    #[error("algorithm {0:?} is not accepted for the signing key")]
    AlgorithmNotAllowed(Algorithm),
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Validates bearer tokens against a lazily fetched key set.
pub struct Authorizer {
    issuer: String,
    jwks_uri: String,
    jwks: OnceCell<JwkSet>,
    http: reqwest::Client,
}

impl Authorizer {
    /// Authorizer that fetches its key set from `jwks_uri` on first use.
    pub fn new(issuer: impl Into<String>, jwks_uri: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            jwks_uri: jwks_uri.into(),
            jwks: OnceCell::new(),
            http: reqwest::Client::new(),
        }
    }

    /// Authorizer with a key set already in hand.
    pub fn with_jwks(issuer: impl Into<String>, jwks: JwkSet) -> Self {
        Self {
            issuer: issuer.into(),
            jwks_uri: String::new(),
            jwks: OnceCell::from(jwks),
            http: reqwest::Client::new(),
        }
    }

    /// Answer an authorization request with an Allow or Deny policy.
    ///
    /// Only an unreachable key set is an error; every token problem is a
    /// Deny.
    pub async fn authorize(
        &self,
        request: &AuthorizerRequest,
    ) -> Result<AuthorizerResponse, AuthorizerError> {
        let method_arn = request.method_arn.as_deref().unwrap_or("*");

        let token = request
            .authorization_token
            .as_deref()
            .map(|t| t.strip_prefix("Bearer ").unwrap_or(t).trim())
            .unwrap_or_default();
        if token.is_empty() {
            tracing::debug!("Missing authorization token");
            return Ok(AuthorizerResponse::deny(method_arn));
        }

        let jwks = self.jwks().await?;

        match self.verify(token, jwks) {
            Ok(claims) => {
                let principal = claims.sub.clone().unwrap_or_else(|| DEFAULT_PRINCIPAL.into());
                let role = claims.role();
                tracing::info!(principal = %principal, role = ?role, "Token authorized");
                Ok(AuthorizerResponse::allow(principal, method_arn, role))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Token rejected");
                Ok(AuthorizerResponse::deny(method_arn))
            }
        }
    }

    async fn jwks(&self) -> Result<&JwkSet, AuthorizerError> {
        self.jwks
            .get_or_try_init(|| async {
                tracing::info!(uri = %self.jwks_uri, "Fetching JWKS");
                self.http
                    .get(&self.jwks_uri)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<JwkSet>()
                    .await
            })
            .await
            .map_err(AuthorizerError::from)
    }

    fn verify(&self, token: &str, jwks: &JwkSet) -> Result<Claims, TokenError> {
        let header = decode_header(token)?;
        let jwk = match header.kid.as_deref() {
            Some(kid) => jwks.find(kid),
            None => jwks.keys.first(),
        }
        .ok_or(TokenError::UnknownKey)?;

        let allowed = allowed_algorithms(jwk);
        if !allowed.contains(&header.alg) {
            return Err(TokenError::AlgorithmNotAllowed(header.alg));
        }
        let key = DecodingKey::from_jwk(jwk)?;

        let mut validation = Validation::new(header.alg);
        validation.algorithms = allowed;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.validate_aud = false;

        Ok(decode::<Claims>(token, &key, &validation)?.claims)
    }
}

/// Algorithms a token may use with `jwk`.
///
/// A key that declares `alg` accepts only that algorithm; otherwise the key
/// family decides.
fn allowed_algorithms(jwk: &Jwk) -> Vec<Algorithm> {
    if let Some(declared) = &jwk.common.key_algorithm {
        return signing_algorithm(declared).into_iter().collect();
    }
    match &jwk.algorithm {
        AlgorithmParameters::RSA(_) => vec![
            Algorithm::RS256,
            Algorithm::RS384,
            Algorithm::RS512,
            Algorithm::PS256,
            Algorithm::PS384,
            Algorithm::PS512,
        ],
        AlgorithmParameters::EllipticCurve(_) => vec![Algorithm::ES256, Algorithm::ES384],
        AlgorithmParameters::OctetKey(_) => {
            vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512]
        }
        AlgorithmParameters::OctetKeyPair(_) => vec![Algorithm::EdDSA],
    }
}

fn signing_algorithm(declared: &KeyAlgorithm) -> Option<Algorithm> {
    match declared {
        KeyAlgorithm::HS256 => Some(Algorithm::HS256),
        KeyAlgorithm::HS384 => Some(Algorithm::HS384),
        KeyAlgorithm::HS512 => Some(Algorithm::HS512),
        KeyAlgorithm::ES256 => Some(Algorithm::ES256),
        KeyAlgorithm::ES384 => Some(Algorithm::ES384),
        KeyAlgorithm::RS256 => Some(Algorithm::RS256),
        KeyAlgorithm::RS384 => Some(Algorithm::RS384),
        KeyAlgorithm::RS512 => Some(Algorithm::RS512),
        KeyAlgorithm::PS256 => Some(Algorithm::PS256),
        KeyAlgorithm::PS384 => Some(Algorithm::PS384),
        KeyAlgorithm::PS512 => Some(Algorithm::PS512),
        KeyAlgorithm::EdDSA => Some(Algorithm::EdDSA),
        // Encryption algorithms never sign a token.
        _ => None,
    }
}
