// src/api.rs
//
// Parts-database boundary: five operations, JSON over HTTP under a
// configurable base address. Transport trouble and store rejections
// both come out as one ApiError with a readable message.
//
// The MPN lookup tolerates an object or an array answer; an array with
// more than one element is an ambiguity, never a pick.

use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use serde_json::Value;

use crate::core::net::{self, JsonResponse};
use crate::record::{CategorySchemas, PartRecord};

#[derive(Clone, Debug)]
pub enum ApiError {
    /// Connect, timeout or IO on the way to the service.
    Transport(String),
    /// Non-success status from the service.
    Rejected { status: u16, message: String },
    /// Success status with a body this client cannot read.
    Malformed(String),
    /// One MPN maps to more than one stored record.
    Ambiguous { mpn: String, count: usize },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "network error: {msg}"),
            ApiError::Rejected { status, message } if message.is_empty() => {
                write!(f, "HTTP {status}")
            }
            ApiError::Rejected { status, message } => write!(f, "HTTP {status} - {message}"),
            ApiError::Malformed(msg) => write!(f, "malformed response: {msg}"),
            ApiError::Ambiguous { mpn, count } => {
                write!(f, "ambiguous match: {count} stored records share MPN {mpn}")
            }
        }
    }
}

impl Error for ApiError {}

/// The five operations the sync layer needs. Object-safe so tests can
/// stand in a scripted double.
pub trait PartsApi: Send + Sync {
    fn list_ipns(&self) -> Result<HashSet<String>, ApiError>;
    fn part_by_mpn(&self, mpn: &str) -> Result<Option<PartRecord>, ApiError>;
    fn create_part(&self, ipn: &str, record: &PartRecord) -> Result<(), ApiError>;
    fn update_part(&self, ipn: &str, fields: &PartRecord) -> Result<(), ApiError>;
    fn category_schemas(&self) -> Result<CategorySchemas, ApiError>;
}

pub struct HttpPartsApi {
    base: String,
}

impl HttpPartsApi {
    /// `base` is the service root; one trailing slash is enforced.
    pub fn new(base: &str) -> Self {
        let trimmed = base.trim().trim_end_matches('/');
        Self { base: join!(trimmed, "/") }
    }

    fn url(&self, path: &str) -> String {
        join!(&self.base, path)
    }
}

fn transport(e: Box<dyn Error>) -> ApiError {
    ApiError::Transport(e.to_string())
}

fn rejected(r: &JsonResponse) -> ApiError {
    let mut message = r.reason.clone();
    let text = r.text.trim();
    if !text.is_empty() && text.len() <= 300 {
        if !message.is_empty() {
            message.push_str(" - ");
        }
        message.push_str(text);
    }
    ApiError::Rejected { status: r.status, message }
}

fn success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn parse(r: &JsonResponse) -> Result<Value, ApiError> {
    serde_json::from_str(&r.text).map_err(|e| ApiError::Malformed(e.to_string()))
}

impl PartsApi for HttpPartsApi {
    fn list_ipns(&self) -> Result<HashSet<String>, ApiError> {
        let r = net::get_json(&self.url("parts")).map_err(transport)?;
        if !success(r.status) {
            return Err(rejected(&r));
        }
        let v = parse(&r)?;
        let arr = v
            .as_array()
            .ok_or_else(|| ApiError::Malformed(s!("expected an array of IPNs")))?;
        Ok(arr.iter().filter_map(|x| x.as_str().map(String::from)).collect())
    }

    fn part_by_mpn(&self, mpn: &str) -> Result<Option<PartRecord>, ApiError> {
        let path = join!("part-by-mpn/", &urlencoding::encode(mpn));
        let r = net::get_json(&self.url(&path)).map_err(transport)?;
        if r.status == 404 {
            return Ok(None);
        }
        if !success(r.status) {
            return Err(rejected(&r));
        }
        match parse(&r)? {
            Value::Null => Ok(None),
            Value::Array(items) => match items.len() {
                0 => Ok(None),
                1 => record_from(&items[0]).map(Some),
                n => Err(ApiError::Ambiguous { mpn: s!(mpn), count: n }),
            },
            other => record_from(&other).map(Some),
        }
    }

    fn create_part(&self, ipn: &str, record: &PartRecord) -> Result<(), ApiError> {
        let path = join!("part/", &urlencoding::encode(ipn));
        let r = net::post_json(&self.url(&path), &record.to_json()).map_err(transport)?;
        if !success(r.status) {
            return Err(rejected(&r));
        }
        Ok(())
    }

    fn update_part(&self, ipn: &str, fields: &PartRecord) -> Result<(), ApiError> {
        let path = join!("part/", &urlencoding::encode(ipn));
        let r = net::put_json(&self.url(&path), &fields.to_json()).map_err(transport)?;
        if !success(r.status) {
            return Err(rejected(&r));
        }
        Ok(())
    }

    fn category_schemas(&self) -> Result<CategorySchemas, ApiError> {
        let r = net::get_json(&self.url("schemas")).map_err(transport)?;
        if !success(r.status) {
            return Err(rejected(&r));
        }
        serde_json::from_str::<CategorySchemas>(&r.text)
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

fn record_from(v: &Value) -> Result<PartRecord, ApiError> {
    PartRecord::from_json(v).ok_or_else(|| ApiError::Malformed(s!("record is not an object")))
}
