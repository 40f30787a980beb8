//! Query request/response types.
//!
//! Both types are request-scoped: decoded once, forwarded or returned, then
//! dropped. Neither is interpreted beyond its JSON shape.

use serde::de::{value::MapAccessDeserializer, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use std::fmt;

/// Inbound query, forwarded verbatim to the downstream service.
///
/// Only a JSON object decodes; the positional `["text", 3]` form serde would
/// otherwise accept for structs is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    /// Free-form query text.
    pub query: String,
    /// Number of results requested. Omitted means zero; no range is enforced.
    #[serde(default)]
    pub top_k: i64,
}

/// Downstream answer relayed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The query, as echoed by the downstream service.
    pub query: String,
    /// Generated answer text.
    pub anthropic_response: String,
    /// Opaque result payload, kept as the exact JSON text the downstream sent.
    pub raw_results: Box<RawValue>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>, top_k: i64) -> Self {
        Self {
            query: query.into(),
            top_k,
        }
    }
}

#[derive(Deserialize)]
struct QueryFields {
    query: String,
    #[serde(default)]
    top_k: i64,
}

struct QueryObject;

impl<'de> Visitor<'de> for QueryObject {
    type Value = QueryFields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with a `query` string")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<QueryFields, A::Error> {
        QueryFields::deserialize(MapAccessDeserializer::new(map))
    }
}

impl<'de> Deserialize<'de> for QueryRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let QueryFields { query, top_k } = deserializer.deserialize_map(QueryObject)?;
        Ok(Self { query, top_k })
    }
}
