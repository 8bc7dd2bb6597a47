//! Standings models.
//!
//! The raw API types mirror the upstream JSON (conference → division → team
//! records) with every field optional. `to_team_standings` flattens them into
//! `TeamStanding`, the fully-populated record used by the cache, the view
//! builder, and the renderer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder for missing string fields.
pub const UNKNOWN: &str = "Unknown";

// ============================================================================
// API Response Types
// ============================================================================

/// Top-level body of `GET /standings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub records: Option<Vec<StandingsRecord>>,
}

/// One division block inside a conference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandingsRecord {
    #[serde(default, deserialize_with = "lenient_named")]
    pub conference: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient_named")]
    pub division: Option<NamedRef>,
    #[serde(rename = "teamRecords", default)]
    pub team_records: Option<Vec<TeamRecord>>,
}

/// `{ "name": ... }` objects used for teams, conferences and divisions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(default, deserialize_with = "lenient_named")]
    pub team: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub points: u32,
    #[serde(rename = "gamesPlayed", default, deserialize_with = "lenient_count")]
    pub games_played: u32,
    #[serde(rename = "regulationWins", default, deserialize_with = "lenient_count")]
    pub regulation_wins: u32,
}

/// Keeps `{ "name": "..." }` objects; any other shape, or a name that is
/// not a string, is treated as absent.
fn lenient_named<'de, D>(deserializer: D) -> Result<Option<NamedRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(named_from_value(&value))
}

fn named_from_value(value: &Value) -> Option<NamedRef> {
    let name = value.get("name")?.as_str()?;
    Some(NamedRef {
        name: Some(name.to_string()),
    })
}

/// Accepts numbers, numeric strings, booleans (true = 1) and null. Anything
/// negative or unparseable counts as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

fn count_from_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).unwrap_or(u32::MAX),
            None => count_from_float(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(count_from_float)
            .unwrap_or(0),
        Value::Bool(b) => u32::from(*b),
        _ => 0,
    }
}

fn count_from_float(f: f64) -> u32 {
    if f.is_finite() && f > 0.0 {
        // `as` saturates at u32::MAX
        f as u32
    } else {
        0
    }
}

// ============================================================================
// Domain Type
// ============================================================================

/// Normalized standing for one team. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_name: String,
    pub points: u32,
    pub games_played: u32,
    pub regulation_wins: u32,
    /// Full conference name, e.g. "Eastern"
    pub conference: String,
    /// "East"/"West" when the conference name starts with them, else the full name
    pub conference_short: String,
    pub division: String,
}

impl TeamStanding {
    /// Build a record, deriving `conference_short` from `conference`.
    pub fn new(
        team_name: impl Into<String>,
        points: u32,
        games_played: u32,
        regulation_wins: u32,
        conference: impl Into<String>,
        division: impl Into<String>,
    ) -> Self {
        let conference = conference.into();
        Self {
            team_name: team_name.into(),
            points,
            games_played,
            regulation_wins,
            conference_short: conference_short(&conference),
            conference,
            division: division.into(),
        }
    }
}

/// Short badge label for a conference name.
pub fn conference_short(conference: &str) -> String {
    if conference.starts_with("East") {
        "East".to_string()
    } else if conference.starts_with("West") {
        "West".to_string()
    } else {
        conference.to_string()
    }
}

fn or_unknown(name: Option<&str>) -> String {
    match name {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

fn name_of(named: Option<&NamedRef>) -> String {
    or_unknown(named.and_then(|n| n.name.as_deref()))
}

/// Flatten the raw response into normalized records, in the order they are
/// encountered (conference, then division, then team).
pub fn to_team_standings(response: &StandingsResponse) -> Vec<TeamStanding> {
    let mut out = Vec::new();
    for record in response.records.iter().flatten() {
        let conference = name_of(record.conference.as_ref());
        let division = name_of(record.division.as_ref());

        for team_record in record.team_records.iter().flatten() {
            out.push(TeamStanding::new(
                name_of(team_record.team.as_ref()),
                team_record.points,
                team_record.games_played,
                team_record.regulation_wins,
                conference.clone(),
                division.clone(),
            ));
        }
    }
    out
}
