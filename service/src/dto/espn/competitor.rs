//! Competitor shapes seen in the feed.
//!
//! Each provider schema version gets its own [`CompetitorParser`]. A parser only
//! pulls the raw text out of its shape; turning that text into scores and
//! positions happens in [`crate::parsing`], the same way for every variant.
use serde_json::Value;

/// Raw fields of one competitor, before any normalisation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawCompetitor {
    pub name: Option<String>,
    pub position: Option<String>,
    pub score: Option<String>,
    pub country: Option<String>,
    pub rounds_played: Option<i32>,
}

pub trait CompetitorParser: Send + Sync {
    /// Short name recorded on each [`crate::parsing::ParseDiagnostic`].
    fn variant(&self) -> &'static str;

    /// Whether `raw` looks like this schema.
    fn matches(&self, raw: &Value) -> bool;

    fn extract(&self, raw: &Value) -> RawCompetitor;
}

/// `{athlete: {displayName, flag: {alt}}, score, linescores?}`
pub struct AthleteCompetitor;

/// `{displayName, status: {position: {displayValue}, score: {displayValue}}}`
pub struct StatusCompetitor;

static PARSERS: [&dyn CompetitorParser; 2] = [&AthleteCompetitor, &StatusCompetitor];

/// Picks the parser by sniffing which fields are present.
pub fn parser_for(raw: &Value) -> Option<&'static dyn CompetitorParser> {
    PARSERS.iter().copied().find(|p| p.matches(raw))
}

impl CompetitorParser for AthleteCompetitor {
    fn variant(&self) -> &'static str {
        "athlete"
    }

    fn matches(&self, raw: &Value) -> bool {
        raw.get("athlete").is_some_and(Value::is_object)
    }

    fn extract(&self, raw: &Value) -> RawCompetitor {
        let athlete = &raw["athlete"];
        RawCompetitor {
            name: athlete.get("displayName").and_then(display_text),
            // Older payloads put a free-text status such as "CUT" here.
            position: raw.get("status").and_then(Value::as_str).map(str::to_string),
            score: raw.get("score").and_then(display_text),
            country: athlete.pointer("/flag/alt").and_then(display_text),
            rounds_played: rounds_from_linescores(raw),
        }
    }
}

impl CompetitorParser for StatusCompetitor {
    fn variant(&self) -> &'static str {
        "status"
    }

    fn matches(&self, raw: &Value) -> bool {
        raw.get("displayName").is_some_and(Value::is_string)
    }

    fn extract(&self, raw: &Value) -> RawCompetitor {
        RawCompetitor {
            name: raw.get("displayName").and_then(display_text),
            position: raw.pointer("/status/position").and_then(display_text),
            score: raw
                .pointer("/status/score")
                .or_else(|| raw.get("score"))
                .and_then(display_text),
            country: raw.pointer("/flag/alt").and_then(display_text),
            rounds_played: rounds_from_linescores(raw),
        }
    }
}

/// Text of a field that may be a string, a number or a `{displayValue}` object.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("displayValue").and_then(display_text),
        _ => None,
    }
}

/// Rounds with a recorded value, when the competitor carries per-round scores.
fn rounds_from_linescores(raw: &Value) -> Option<i32> {
    let rounds = raw.get("linescores")?.as_array()?;
    let played = rounds
        .iter()
        .filter(|round| {
            round
                .get("value")
                .or_else(|| round.get("displayValue"))
                .is_some_and(|v| !v.is_null())
        })
        .count();
    i32::try_from(played).ok()
}
