//! Shared types for the roulette service.
//!
//! The engine, the wire layer, and both routers all speak in terms of
//! these types. Bet and cheat labels arriving from the wire are parsed into
//! closed enums here, so nothing downstream branches on raw strings.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Wheel
// ---------------------------------------------------------------------------

/// Pocket color on a European wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Green => "green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Bets
// ---------------------------------------------------------------------------

/// What a bet is placed on.
///
/// `Straight(None)` is a straight-up bet with no target number, which is
/// what a simple (non-compound) request produces. It can never win.
/// `Unknown` keeps the unrecognised label around for logging and always
/// loses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BetKind {
    Straight(Option<u8>),
    Red,
    Black,
    Even,
    Odd,
    Low,
    High,
    Unknown(String),
}

impl BetKind {
    /// Parse a wire label. `target` is only consulted for `straight`.
    pub fn from_label(label: &str, target: Option<u8>) -> Self {
        match label {
            "straight" => BetKind::Straight(target),
            "red" => BetKind::Red,
            "black" => BetKind::Black,
            "even" => BetKind::Even,
            "odd" => BetKind::Odd,
            "low" => BetKind::Low,
            "high" => BetKind::High,
            other => BetKind::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BetKind::Straight(_) => "straight",
            BetKind::Red => "red",
            BetKind::Black => "black",
            BetKind::Even => "even",
            BetKind::Odd => "odd",
            BetKind::Low => "low",
            BetKind::High => "high",
            BetKind::Unknown(label) => label,
        }
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetKind::Straight(Some(n)) => write!(f, "straight({n})"),
            other => f.write_str(other.label()),
        }
    }
}

impl Serialize for BetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One entry of a compound bet.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerBet {
    pub kind: BetKind,
    pub amount: Decimal,
}

/// A validated bet, ready for the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum BetSpec {
    /// A single even-money style wager. Pays 2x on a win whatever the kind.
    Simple { kind: BetKind, amount: Decimal },
    /// Independent inner bets settled against the same number, in wire order.
    Compound(Vec<(String, InnerBet)>),
}

impl BetSpec {
    pub fn is_compound(&self) -> bool {
        matches!(self, BetSpec::Compound(_))
    }

    /// Total stake across all bets.
    pub fn total_stake(&self) -> Decimal {
        match self {
            BetSpec::Simple { amount, .. } => *amount,
            BetSpec::Compound(bets) => bets
                .iter()
                .fold(Decimal::ZERO, |total, (_, b)| total.saturating_add(b.amount)),
        }
    }
}

// ---------------------------------------------------------------------------
// Cheats
// ---------------------------------------------------------------------------

/// Cheat mechanism requested by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheatType {
    BallControl,
    WheelBias,
    MagneticField,
    SectorPrediction,
    Unrecognized(String),
}

impl CheatType {
    pub fn from_label(label: &str) -> Self {
        match label {
            "ballControl" => CheatType::BallControl,
            "wheelBias" => CheatType::WheelBias,
            "magneticField" => CheatType::MagneticField,
            "sectorPrediction" => CheatType::SectorPrediction,
            other => CheatType::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CheatType::BallControl => "ballControl",
            CheatType::WheelBias => "wheelBias",
            CheatType::MagneticField => "magneticField",
            CheatType::SectorPrediction => "sectorPrediction",
            CheatType::Unrecognized(label) => label,
        }
    }

    /// Chance that the cheat takes hold on a given spin.
    pub fn boost_chance(&self) -> f64 {
        match self {
            CheatType::BallControl => 0.30,
            CheatType::WheelBias => 0.25,
            CheatType::MagneticField => 0.40,
            CheatType::SectorPrediction => 0.35,
            CheatType::Unrecognized(_) => 0.0,
        }
    }
}

impl fmt::Display for CheatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CheatType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheatConfig {
    pub active: bool,
    pub cheat_type: Option<CheatType>,
}

impl CheatConfig {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn new(active: bool, cheat_type: Option<CheatType>) -> Self {
        Self { active, cheat_type }
    }

    /// Activation probability; zero when no type is set.
    pub fn boost_chance(&self) -> f64 {
        self.cheat_type.as_ref().map_or(0.0, CheatType::boost_chance)
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Settlement of one bet against the winning number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetResult {
    pub key: String,
    pub kind: BetKind,
    pub amount: Decimal,
    pub won: bool,
    pub payout: Decimal,
}

/// Everything the engine decides for one spin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinResult {
    pub winning_number: u8,
    pub color: Color,
    pub win: bool,
    pub payout: Decimal,
    pub cheat_active: bool,
    pub cheat_type: Option<CheatType>,
    pub cheat_boosted: bool,
    pub bets: Vec<BetResult>,
}

impl fmt::Display for SpinResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) win={} payout={}{}",
            self.winning_number,
            self.color,
            self.win,
            self.payout,
            if self.cheat_boosted { " [boosted]" } else { "" },
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Request validation failures. All of them are the client's fault.
#[derive(Debug, thiserror::Error)]
pub enum RouletteError {
    #[error("malformed body: {0}")]
    MalformedBody(String),

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("field `{field}` is not a number: {value}")]
    InvalidNumber { field: String, value: String },

    #[error("field `{field}` out of range: {value} (expected {expected})")]
    OutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    #[error("invalid bet shape: {0}")]
    InvalidShape(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
