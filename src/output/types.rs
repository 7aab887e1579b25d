use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::ingestion::types::SiteViewModel;

pub const SCHEMA_VERSION: &str = "sitecards.v1";

#[derive(Debug, Clone, Serialize, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
}

/// Plan produced by `check`: what `analyze` would do, without any network I/O.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckPlan {
    pub url: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// Typed payload handed to a presenter.
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Plan(&'a CheckPlan),
    Site(&'a SiteViewModel),
    Failure { kind: &'a str, message: &'a str },
}

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub request_id: Uuid,
    pub op: &'static str,
    pub apply: bool,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Envelope {
    fn base(op: &'static str, apply: bool, ok: bool, meta: Option<Meta>) -> Self {
        Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            apply,
            ok,
            plan: None,
            result: None,
            error: None,
            meta,
        }
    }

    pub fn from_report(op: &'static str, report: &Report<'_>, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        Ok(match report {
            Report::Plan(plan) => Envelope { plan: Some(serde_json::to_value(plan)?), ..Self::base(op, false, plan.valid, meta) },
            Report::Site(vm) => Envelope { result: Some(serde_json::to_value(vm)?), ..Self::base(op, true, true, meta) },
            Report::Failure { kind, message } => Envelope {
                error: Some(ErrorBody { kind: kind.to_string(), message: message.to_string() }),
                ..Self::base(op, true, false, meta)
            },
        })
    }
}
