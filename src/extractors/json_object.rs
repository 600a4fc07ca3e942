//! Lenient JSON body extractor: anything that is not a JSON object yields `None` so handlers
//! can answer with their own 400 message instead of axum's rejection.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default)]
pub struct JsonObject(pub Option<Map<String, Value>>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(JsonObject::parse(&bytes))
    }
}

impl JsonObject {
    pub fn parse(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(m)) => JsonObject(Some(m)),
            _ => JsonObject(None),
        }
    }

    /// String field; absent, null or non-string values count as missing.
    pub fn str_field(&self, key: &str) -> Option<String> {
        self.0
            .as_ref()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Raw field; explicit `null` counts as missing.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.as_ref()?.get(key).filter(|v| !v.is_null())
    }
}

/// Integer id from a JSON number (whole floats included) or a numeric string.
pub fn id_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
