use crate::{Error, config::GenerationConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap};

/// Headers attached to every envelope, whatever the outcome.
pub const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
    ),
    ("Access-Control-Allow-Methods", "OPTIONS,POST"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundInvocation {
    #[serde(default)]
    pub request_context: Option<RequestContext>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub authorizer: Option<Authorizer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authorizer {
    #[serde(default)]
    pub claims: Option<Claims>,
}

/// Identity attributes already verified by the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(pub HashMap<String, Value>);

impl Claims {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Best display name for logging: email, then the Cognito username.
    pub fn identity(&self) -> Option<&str> {
        self.get("email")
            .filter(|s| !s.is_empty())
            .or_else(|| self.get("cognito:username"))
    }
}

impl InboundInvocation {
    pub fn claims(&self) -> Option<&Claims> {
        self.request_context
            .as_ref()?
            .authorizer
            .as_ref()?
            .claims
            .as_ref()
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamPayload {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f64,
    pub top_p: f64,
}

impl UpstreamPayload {
    pub fn new(prompt: impl Into<String>, generation: &GenerationConfig) -> Self {
        Self {
            prompt: prompt.into(),
            max_new_tokens: generation.max_new_tokens,
            do_sample: generation.do_sample,
            temperature: generation.temperature,
            top_p: generation.top_p,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamResponse {
    #[serde(default)]
    pub generated_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    pub fn success(response: &str) -> Self {
        Self::new(200, json!({ "success": true, "response": response }))
    }

    pub fn failure(status_code: u16, error: &str) -> Self {
        Self::new(status_code, json!({ "success": false, "error": error }))
    }

    fn new(status_code: u16, body: Value) -> Self {
        Self {
            status_code,
            headers: default_headers(),
            body: body.to_string(),
        }
    }
}

impl From<&Error> for ResponseEnvelope {
    fn from(err: &Error) -> Self {
        Self::failure(err.status_code(), &err.client_message())
    }
}

pub fn default_headers() -> BTreeMap<String, String> {
    RESPONSE_HEADERS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
