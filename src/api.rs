//! Wire formats and request validation.
//!
//! Two front ends share the engine. The HTTP service takes PascalCase
//! request fields and answers in camelCase; the RPC service uses snake_case
//! throughout. Both are translated into `BetSpec` / `CheatConfig` here, and
//! nothing malformed gets past this module.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::config::{ServiceMetadata, TableConfig};
use crate::engine::wheel::is_valid_number;
use crate::types::{BetKind, BetSpec, CheatConfig, CheatType, Color, InnerBet, RouletteError, SpinResult};

/// `BetType` value that selects compound mode.
pub const COMPOUND_BET_TYPE: &str = "multiple";

/// Bet kind assumed when a simple request names none.
pub const DEFAULT_BET_TYPE: &str = "red";

// ---------------------------------------------------------------------------
// HTTP: POST /spin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpinRequest {
    #[serde(rename = "CheatActive", alias = "cheatActive", default)]
    pub cheat_active: bool,
    #[serde(rename = "CheatType", alias = "cheatType", default)]
    pub cheat_type: Option<String>,
    #[serde(rename = "BetType", alias = "betType", default)]
    pub bet_type: Option<String>,
    #[serde(rename = "BetValue", alias = "betValue", default)]
    pub bet_value: Option<Value>,
    #[serde(rename = "BetAmount", alias = "betAmount", default)]
    pub bet_amount: Option<Value>,
}

impl SpinRequest {
    /// Parse a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RouletteError> {
        serde_json::from_slice(body).map_err(|e| RouletteError::MalformedBody(e.to_string()))
    }

    /// Validate and translate into engine inputs.
    pub fn into_spin(self, table: &TableConfig) -> Result<(BetSpec, CheatConfig), RouletteError> {
        let cheat = cheat_config(self.cheat_active, self.cheat_type.as_deref());
        let bet_type = self.bet_type.as_deref().unwrap_or(DEFAULT_BET_TYPE);

        let bet = if bet_type == COMPOUND_BET_TYPE {
            let value = self
                .bet_value
                .as_ref()
                .ok_or_else(|| RouletteError::MissingField("BetValue".into()))?;
            parse_compound(value, table)?
        } else {
            let amount = simple_amount(self.bet_amount.as_ref(), self.bet_value.as_ref(), table)?;
            BetSpec::Simple {
                kind: BetKind::from_label(bet_type, None),
                amount,
            }
        };

        Ok((bet, cheat))
    }
}

/// Flat spin record returned by the HTTP service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResponse {
    pub winning_number: u8,
    pub color: Color,
    pub win: bool,
    pub payout: Decimal,
    pub timestamp: String,
    pub cheat_active: bool,
    pub cheat_type: Option<CheatType>,
    pub cheat_boosted: bool,
}

impl From<&SpinResult> for SpinResponse {
    fn from(result: &SpinResult) -> Self {
        Self {
            winning_number: result.winning_number,
            color: result.color,
            win: result.win,
            payout: result.payout,
            timestamp: timestamp(),
            cheat_active: result.cheat_active,
            cheat_type: result.cheat_type.clone(),
            cheat_boosted: result.cheat_boosted,
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP: GET /health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub service_metadata: HealthMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetadata {
    pub version: String,
    pub game_type: String,
    pub complexity: String,
    pub rtp: String,
    pub max_payout: String,
    pub owner: String,
    pub technology: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn new(service: &str, meta: &ServiceMetadata) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            service_metadata: HealthMetadata {
                version: meta.version.clone(),
                game_type: meta.game_type.clone(),
                complexity: meta.complexity.clone(),
                rtp: meta.rtp.clone(),
                max_payout: meta.max_payout.clone(),
                owner: meta.owner.clone(),
                technology: meta.technology.clone(),
                timestamp: timestamp(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// RPC: Spin / Health / GetGameAssets
// ---------------------------------------------------------------------------

/// RPC spin request. Zero values mean "unset" on this wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpcSpinRequest {
    pub bet_type: String,
    pub bet_amount: Option<Value>,
    pub cheat_active: bool,
    pub cheat_type: String,
    pub player_info: HashMap<String, String>,
}

impl RpcSpinRequest {
    /// Parse a raw request body. An empty body is an all-defaults request.
    pub fn from_slice(body: &[u8]) -> Result<Self, RouletteError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| RouletteError::MalformedBody(e.to_string()))
    }

    pub fn username(&self) -> &str {
        self.player_info
            .get("username")
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("Anonymous")
    }

    /// Always a simple bet: the RPC surface has no compound form.
    pub fn to_spin(&self, table: &TableConfig) -> Result<(BetSpec, CheatConfig), RouletteError> {
        let label = if self.bet_type.is_empty() { DEFAULT_BET_TYPE } else { self.bet_type.as_str() };
        let amount = match self.bet_amount.as_ref() {
            Some(value) => parse_amount(value, "bet_amount")?,
            None => Decimal::ZERO,
        };
        let amount = if amount.is_zero() { table.default_bet_amount } else { amount };
        let amount = check_stake(amount, "bet_amount", table)?;

        Ok((
            BetSpec::Simple { kind: BetKind::from_label(label, None), amount },
            cheat_config(self.cheat_active, Some(&self.cheat_type)),
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcSpinResponse {
    pub winning_number: u8,
    pub color: Color,
    pub win: bool,
    pub payout: Decimal,
    pub timestamp: String,
    pub cheat_active: bool,
    pub cheat_type: String,
    pub cheat_boosted: bool,
}

impl From<&SpinResult> for RpcSpinResponse {
    fn from(result: &SpinResult) -> Self {
        Self {
            winning_number: result.winning_number,
            color: result.color,
            win: result.win,
            payout: result.payout,
            timestamp: timestamp(),
            cheat_active: result.cheat_active,
            cheat_type: result
                .cheat_type
                .as_ref()
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
            cheat_boosted: result.cheat_boosted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcHealthResponse {
    pub status: String,
    pub service: String,
    pub metadata: BTreeMap<String, String>,
}

impl RpcHealthResponse {
    pub fn new(service: &str, meta: &ServiceMetadata) -> Self {
        let metadata = [
            ("version", &meta.version),
            ("gameType", &meta.game_type),
            ("gameCategory", &meta.game_category),
            ("complexity", &meta.complexity),
            ("rtp", &meta.rtp),
            ("maxPayout", &meta.max_payout),
            ("owner", &meta.owner),
            ("technology", &meta.technology),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();

        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            metadata,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameAssetsResponse {
    pub html: String,
    pub javascript: String,
    pub css: String,
    pub config: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn not_found() -> Self {
        Self { error: "Not found".to_string() }
    }
}

impl IntoResponse for RouletteError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: format!("Invalid request: {self}") };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// UTC timestamp in the `2025-01-01T00:00:00.000Z` form.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn cheat_config(active: bool, label: Option<&str>) -> CheatConfig {
    let cheat_type = label.filter(|l| !l.is_empty()).map(CheatType::from_label);
    CheatConfig::new(active, cheat_type)
}

/// Validate every inner bet before any is accepted.
fn parse_compound(value: &Value, table: &TableConfig) -> Result<BetSpec, RouletteError> {
    let entries = value.as_object().ok_or_else(|| {
        RouletteError::InvalidShape(format!("BetValue must be an object when BetType is \"{COMPOUND_BET_TYPE}\""))
    })?;

    entries
        .iter()
        .map(|(key, entry)| Ok((key.clone(), parse_inner(key, entry, table)?)))
        .collect::<Result<Vec<_>, RouletteError>>()
        .map(BetSpec::Compound)
}

fn parse_inner(key: &str, entry: &Value, table: &TableConfig) -> Result<InnerBet, RouletteError> {
    let fields = entry
        .as_object()
        .ok_or_else(|| RouletteError::InvalidShape(format!("BetValue.{key} must be an object")))?;

    let label = required(fields, key, "type")?
        .as_str()
        .ok_or_else(|| RouletteError::InvalidShape(format!("BetValue.{key}.type must be a string")))?;

    let target = if label == "straight" {
        let field = format!("BetValue.{key}.value");
        Some(parse_pocket(required(fields, key, "value")?, &field)?)
    } else {
        None
    };

    let field = format!("BetValue.{key}.amount");
    let amount = check_stake(parse_amount(required(fields, key, "amount")?, &field)?, &field, table)?;

    Ok(InnerBet {
        kind: BetKind::from_label(label, target),
        amount,
    })
}

fn required<'a>(fields: &'a Map<String, Value>, key: &str, name: &str) -> Result<&'a Value, RouletteError> {
    fields
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| RouletteError::MissingField(format!("BetValue.{key}.{name}")))
}

fn simple_amount(
    bet_amount: Option<&Value>,
    bet_value: Option<&Value>,
    table: &TableConfig,
) -> Result<Decimal, RouletteError> {
    let (value, field) = match (bet_amount.filter(|v| !v.is_null()), bet_value) {
        (Some(value), _) => (value, "BetAmount"),
        (None, None | Some(Value::Null)) => return Ok(table.default_bet_amount),
        (None, Some(Value::Object(fields))) => match fields.get("amount").filter(|v| !v.is_null()) {
            Some(value) => (value, "BetValue.amount"),
            None => return Ok(table.default_bet_amount),
        },
        (None, Some(value @ (Value::Number(_) | Value::String(_)))) => (value, "BetValue"),
        (None, Some(_)) => {
            return Err(RouletteError::InvalidShape(
                "BetValue must be a number or an object for a simple bet".into(),
            ))
        }
    };
    check_stake(parse_amount(value, field)?, field, table)
}

/// Positive stakes must sit inside the table limits. Zero and negative
/// stakes pass through; they are settled as bets that never pay.
fn check_stake(amount: Decimal, field: &str, table: &TableConfig) -> Result<Decimal, RouletteError> {
    if amount > Decimal::ZERO && (amount < table.min_bet || amount > table.max_bet) {
        return Err(RouletteError::OutOfRange {
            field: field.to_string(),
            value: amount.to_string(),
            expected: format!("{}-{}", table.min_bet, table.max_bet),
        });
    }
    Ok(amount)
}

/// Amounts are JSON numbers or numeric strings.
pub fn parse_amount(value: &Value, field: &str) -> Result<Decimal, RouletteError> {
    let invalid = || RouletteError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    };
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(invalid()),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid())
}

/// A pocket number given as an integer (or integral float/string).
fn parse_pocket(value: &Value, field: &str) -> Result<u8, RouletteError> {
    let number = parse_amount(value, field)?;
    if !number.fract().is_zero() {
        return Err(RouletteError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    number
        .to_i64()
        .and_then(|n| u8::try_from(n).ok())
        .filter(|&n| is_valid_number(n))
        .ok_or_else(|| RouletteError::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: "0-36".to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
