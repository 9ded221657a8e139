//! Item schema: raw input records and validated pool items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Closed set of player positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    K,
    Dst,
}

impl Position {
    /// All positions in roster declaration order.
    pub const ALL: [Position; 6] = [
        Position::Qb,
        Position::Rb,
        Position::Wr,
        Position::Te,
        Position::K,
        Position::Dst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
            Position::K => "K",
            Position::Dst => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ();

    /// Case-insensitive parse. Accepts the common defense spellings
    /// (`D/ST`, `DEF`) seen in uploaded sheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QB" => Ok(Position::Qb),
            "RB" => Ok(Position::Rb),
            "WR" => Ok(Position::Wr),
            "TE" => Ok(Position::Te),
            "K" => Ok(Position::K),
            "DST" | "D/ST" | "DEF" => Ok(Position::Dst),
            _ => Err(()),
        }
    }
}

/// An externally supplied player record, prior to validation.
///
/// Field aliases cover the column spellings commonly found in uploaded
/// sheets; numeric fields accept either numbers or numeric strings
/// (`"$18"`, `"12.5"`). Anything unparseable deserializes to `None` and
/// the record is dropped during pool preparation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, alias = "Name", alias = "Player", alias = "player")]
    pub name: Option<String>,

    #[serde(default, alias = "Pos", alias = "pos", alias = "Position")]
    pub position: Option<String>,

    #[serde(
        default,
        alias = "Price",
        alias = "Cost",
        alias = "cost",
        deserialize_with = "lenient_number"
    )]
    pub price: Option<f64>,

    #[serde(
        default,
        alias = "Projection",
        alias = "Proj",
        alias = "proj",
        alias = "Points",
        alias = "points",
        deserialize_with = "lenient_number"
    )]
    pub projection: Option<f64>,

    /// Must appear in every produced solution.
    #[serde(default)]
    pub anchor: bool,

    /// Removed from the candidate pool before any solving.
    #[serde(default)]
    pub exclude: bool,
}

impl RawItem {
    /// Convenience constructor for a fully specified record.
    pub fn new(name: &str, position: &str, price: f64, projection: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            position: Some(position.to_string()),
            price: Some(price),
            projection: Some(projection),
            anchor: false,
            exclude: false,
        }
    }

    pub fn anchored(mut self) -> Self {
        self.anchor = true;
        self
    }

    pub fn excluded(mut self) -> Self {
        self.exclude = true;
        self
    }
}

/// A validated, immutable pool item.
///
/// Owned solely by the [`Pool`](super::Pool) for the duration of one
/// optimization request; engines refer to items by pool index.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Display name, unique within a pool after key normalization.
    pub name: String,
    /// Lowercased, ASCII-folded, whitespace-collapsed name.
    pub name_key: String,
    /// Alphanumeric-only key used for anchor substring matching.
    pub simple_key: String,
    pub position: Position,
    /// Auction price, clamped to be non-negative.
    pub price: f64,
    /// Projected value, clamped to be non-negative.
    pub projection: f64,
    pub anchor: bool,
    pub excluded: bool,
}

/// Accepts a JSON number, a numeric string, or nothing.
///
/// Strings tolerate a leading `$` and thousands separators, mirroring the
/// price columns of real auction sheets.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        None => None,
        Some(Lenient::Number(n)) => Some(n),
        Some(Lenient::Text(s)) => s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .ok(),
    })
}
