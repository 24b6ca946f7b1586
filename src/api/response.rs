use crate::error::{PachcaError, Result};
use serde::Serialize;
use serde_json::{json, Value};

/// The response shapes handlers can ask for. Anything else is a malformed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// A bare record or `{ "data": record }`.
    Singleton,
    /// A bare array or `{ "data": [...] }`.
    List,
    /// `{ "data": [...], "meta": { "paginate": { "next_page": cursor } } }`.
    CursorPage,
    /// A bare array or `{ "data": [...] }` fetched relative to a message id.
    AnchorPage,
}

impl ResponseShape {
    fn name(self) -> &'static str {
        match self {
            ResponseShape::Singleton => "a single record",
            ResponseShape::List => "a list",
            ResponseShape::CursorPage => "a cursor page",
            ResponseShape::AnchorPage => "a message page",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorPage {
    pub data: Vec<Value>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    pub message_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorPage {
    pub data: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
}

fn mismatch(shape: ResponseShape, body: Option<&Value>) -> PachcaError {
    let excerpt = match body {
        Some(value) => value.to_string().chars().take(200).collect(),
        None => "<no content>".to_string(),
    };
    PachcaError::MalformedResponse {
        status: if body.is_some() { 200 } else { 204 },
        excerpt: format!("expected {}, got {}", shape.name(), excerpt),
    }
}

fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub fn singleton(body: Option<Value>) -> Result<Value> {
    let body = body.ok_or_else(|| mismatch(ResponseShape::Singleton, None))?;
    match unwrap_data(body.clone()) {
        record @ Value::Object(_) => Ok(record),
        _ => Err(mismatch(ResponseShape::Singleton, Some(&body))),
    }
}

pub fn list(body: Option<Value>) -> Result<Vec<Value>> {
    let body = body.ok_or_else(|| mismatch(ResponseShape::List, None))?;
    match unwrap_data(body.clone()) {
        Value::Array(items) => Ok(items),
        _ => Err(mismatch(ResponseShape::List, Some(&body))),
    }
}

pub fn cursor_page(body: Option<Value>) -> Result<CursorPage> {
    let body = body.ok_or_else(|| mismatch(ResponseShape::CursorPage, None))?;
    let next_cursor = body
        .pointer("/meta/paginate/next_page")
        .and_then(Value::as_str)
        .map(str::to_string);
    match body.get("data") {
        Some(Value::Array(items)) => Ok(CursorPage {
            data: items.clone(),
            next_cursor,
        }),
        _ => Err(mismatch(ResponseShape::CursorPage, Some(&body))),
    }
}

pub fn anchor_page(body: Option<Value>, anchor: Option<Anchor>) -> Result<AnchorPage> {
    let body = body.ok_or_else(|| mismatch(ResponseShape::AnchorPage, None))?;
    match unwrap_data(body.clone()) {
        Value::Array(items) => Ok(AnchorPage {
            data: items,
            anchor,
        }),
        _ => Err(mismatch(ResponseShape::AnchorPage, Some(&body))),
    }
}

/// Decodes `body` as `shape` and returns the value handed back to the caller.
pub fn decode(shape: ResponseShape, body: Option<Value>) -> Result<Value> {
    match shape {
        ResponseShape::Singleton => singleton(body),
        ResponseShape::List => Ok(json!({ "data": list(body)? })),
        ResponseShape::CursorPage => Ok(serde_json::to_value(cursor_page(body)?)?),
        ResponseShape::AnchorPage => Ok(serde_json::to_value(anchor_page(body, None)?)?),
    }
}
