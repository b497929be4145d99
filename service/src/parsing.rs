//! Normalises raw competitors into score rows.
//!
//! Nothing in here fails. A bad field falls back to a default and leaves a
//! [`ParseDiagnostic`] behind; only a competitor without a name is dropped.
use log::warn;
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dto::espn::competitor::parser_for;
use crate::dto::{NewScoreEntry, MISSED_CUT, WITHDRAWN};

/// Rounds assumed when the feed does not say.
pub const DEFAULT_ROUNDS_PLAYED: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCompetitor {
    pub name: String,
    pub score: i32,
    pub position: i32,
    pub country: Option<String>,
    pub rounds_played: i32,
}

impl ParsedCompetitor {
    /// Upstream gives no prior rank, so `previous_position` is always empty.
    pub fn into_new_entry(self) -> NewScoreEntry {
        NewScoreEntry {
            player_name: self.name,
            current_score: self.score,
            position: self.position,
            previous_position: None,
            rounds_played: self.rounds_played,
            country: self.country,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// No parser recognised the record.
    UnknownShape,
    /// The display name was missing or blank; the record was dropped.
    MissingName,
    /// The score could not be read and was stored as even par.
    ScoreDefaulted,
    /// No usable position; the upstream order was used instead.
    PositionDefaulted,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParseDiagnostic {
    /// Index of the record in the upstream competitor list.
    pub index: usize,
    pub player: Option<String>,
    /// Competitor shape the record was read as, if any matched.
    pub variant: Option<String>,
    pub kind: DiagnosticKind,
    pub raw: Option<String>,
}

impl ParseDiagnostic {
    pub fn is_rejection(&self) -> bool {
        matches!(self.kind, DiagnosticKind::UnknownShape | DiagnosticKind::MissingName)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedBatch {
    pub accepted: Vec<ParsedCompetitor>,
    pub rejected: usize,
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Parses one competitor.
///
/// `index` is the record's place in the upstream list and is only used for
/// diagnostics. `fallback_index` is the 0-based place among accepted records,
/// used as the position when the record has none.
pub fn parse_competitor(
    raw: &Value,
    index: usize,
    fallback_index: usize,
) -> (Option<ParsedCompetitor>, Vec<ParseDiagnostic>) {
    let mut diagnostics = Vec::new();

    let Some(parser) = parser_for(raw) else {
        diagnostics.push(ParseDiagnostic {
            index,
            player: None,
            variant: None,
            kind: DiagnosticKind::UnknownShape,
            raw: Some(raw.to_string()),
        });
        return (None, diagnostics);
    };
    let variant = parser.variant();
    let fields = parser.extract(raw);

    let name = match fields.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            diagnostics.push(ParseDiagnostic {
                index,
                player: None,
                variant: Some(variant.to_string()),
                kind: DiagnosticKind::MissingName,
                raw: fields.name,
            });
            return (None, diagnostics);
        }
    };

    let position_token = fields.position.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let score_token = fields.score.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let sentinel = position_token
        .and_then(status_sentinel)
        .or_else(|| score_token.and_then(status_sentinel));

    let score = match (sentinel, score_token) {
        (Some(sentinel), _) => sentinel,
        (None, None) => 0,
        (None, Some(token)) => parse_score(token).unwrap_or_else(|| {
            diagnostics.push(ParseDiagnostic {
                index,
                player: Some(name.clone()),
                variant: Some(variant.to_string()),
                kind: DiagnosticKind::ScoreDefaulted,
                raw: Some(token.to_string()),
            });
            0
        }),
    };

    let fallback_position = i32::try_from(fallback_index + 1).unwrap_or(i32::MAX);
    let position = match (sentinel, position_token) {
        (Some(sentinel), _) => sentinel,
        (None, None) => fallback_position,
        (None, Some(token)) => parse_position(token).unwrap_or_else(|| {
            diagnostics.push(ParseDiagnostic {
                index,
                player: Some(name.clone()),
                variant: Some(variant.to_string()),
                kind: DiagnosticKind::PositionDefaulted,
                raw: Some(token.to_string()),
            });
            fallback_position
        }),
    };

    let parsed = ParsedCompetitor {
        name,
        score,
        position,
        country: fields
            .country
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        rounds_played: fields.rounds_played.unwrap_or(DEFAULT_ROUNDS_PLAYED),
    };
    (Some(parsed), diagnostics)
}

/// Parses every competitor, keeping upstream order.
pub fn parse_batch(competitors: &[Value]) -> ParsedBatch {
    let mut batch = ParsedBatch::default();
    for (index, raw) in competitors.iter().enumerate() {
        let (parsed, diagnostics) = parse_competitor(raw, index, batch.accepted.len());
        for diagnostic in &diagnostics {
            warn!(
                "Competitor {} ({:?}, {} shape): {:?}, raw value {:?}",
                diagnostic.index,
                diagnostic.player,
                diagnostic.variant.as_deref().unwrap_or("unknown"),
                diagnostic.kind,
                diagnostic.raw
            );
        }
        batch.diagnostics.extend(diagnostics);
        match parsed {
            Some(parsed) => batch.accepted.push(parsed),
            None => batch.rejected += 1,
        }
    }
    batch
}

/// Reads a to-par score such as `E`, `+3` or `-12`.
///
/// Anything else keeps only digits and minus signs and reads the leading
/// signed number, so `5-3` is 5. Returns `None` when nothing numeric can be
/// recovered.
pub fn parse_score(token: &str) -> Option<i32> {
    let token = token.trim().replace('\u{2212}', "-");
    if token.eq_ignore_ascii_case("e") || token.eq_ignore_ascii_case("even") || token == "0" {
        return Some(0);
    }
    if let Some(rest) = token.strip_prefix('+') {
        return leading_digits(rest).parse().ok();
    }
    if let Some(rest) = token.strip_prefix('-') {
        return leading_digits(rest).parse::<i32>().ok().map(|n| -n);
    }
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    match cleaned.strip_prefix('-') {
        Some(rest) => leading_digits(rest).parse::<i32>().ok().map(|n| -n),
        None => leading_digits(&cleaned).parse().ok(),
    }
}

/// Reads a position such as `1`, `T3` or `3rd`. Positions start at 1.
pub fn parse_position(token: &str) -> Option<i32> {
    if let Some(sentinel) = status_sentinel(token) {
        return Some(sentinel);
    }
    let start = token.find(|c: char| c.is_ascii_digit())?;
    leading_digits(&token[start..])
        .parse()
        .ok()
        .filter(|p: &i32| *p > 0)
}

/// Maps `cut` and `wd` markers, in any case, to their sentinel values.
pub fn status_sentinel(token: &str) -> Option<i32> {
    let token = token.to_ascii_lowercase();
    if token.contains("cut") {
        Some(MISSED_CUT)
    } else if token.contains("wd") {
        Some(WITHDRAWN)
    } else {
        None
    }
}

fn leading_digits(s: &str) -> &str {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn athlete(name: &str, score: &str) -> Value {
        json!({"athlete": {"displayName": name, "flag": {"alt": "Sweden"}}, "score": score})
    }

    #[test]
    fn even_par_spellings() {
        for token in ["E", "EVEN", "0", "even", " E "] {
            assert_eq!(parse_score(token), Some(0), "{token}");
        }
    }

    #[test]
    fn signed_scores() {
        for n in [1, 7, 12, 40] {
            assert_eq!(parse_score(&format!("+{n}")), Some(n));
            assert_eq!(parse_score(&format!("-{n}")), Some(-n));
        }
        assert_eq!(parse_score("\u{2212}4"), Some(-4));
        assert_eq!(parse_score("+3*"), Some(3));
    }

    #[test]
    fn other_scores_strip_noise() {
        assert_eq!(parse_score("71"), Some(71));
        assert_eq!(parse_score("(5)"), Some(5));
        assert_eq!(parse_score("(-2)"), Some(-2));
        assert_eq!(parse_score("5-3"), Some(5));
        assert_eq!(parse_score("12 - 1"), Some(12));
        assert_eq!(parse_score("+"), None);
        assert_eq!(parse_score("--"), None);
        assert_eq!(parse_score("F"), None);
    }

    #[test]
    fn positions() {
        assert_eq!(parse_position("1"), Some(1));
        assert_eq!(parse_position("T3"), Some(3));
        assert_eq!(parse_position("12th"), Some(12));
        assert_eq!(parse_position("CUT"), Some(MISSED_CUT));
        assert_eq!(parse_position("wd"), Some(WITHDRAWN));
        assert_eq!(parse_position("0"), None);
        assert_eq!(parse_position("-"), None);
    }

    #[test]
    fn sentinel_in_score_sets_both_fields() {
        let (parsed, diagnostics) = parse_competitor(&athlete("Jon Rahm", "CUT"), 4, 4);
        let parsed = parsed.unwrap();
        assert_eq!(parsed.score, MISSED_CUT);
        assert_eq!(parsed.position, MISSED_CUT);
        assert!(diagnostics.is_empty());

        let (parsed, _) = parse_competitor(&athlete("Tiger Woods", "WD"), 5, 5);
        let parsed = parsed.unwrap();
        assert_eq!((parsed.score, parsed.position), (WITHDRAWN, WITHDRAWN));
    }

    #[test]
    fn sentinel_in_position_sets_score() {
        let raw = json!({
            "displayName": "Brooks Koepka",
            "status": {"position": {"displayValue": "CUT"}, "score": {"displayValue": "+4"}}
        });
        let parsed = parse_competitor(&raw, 0, 0).0.unwrap();
        assert_eq!((parsed.score, parsed.position), (MISSED_CUT, MISSED_CUT));
    }

    #[test]
    fn athlete_without_position_uses_fallback_index() {
        let (parsed, diagnostics) = parse_competitor(&athlete("Ludvig Åberg", "-4"), 9, 2);
        let parsed = parsed.unwrap();
        assert_eq!(parsed.position, 3);
        assert_eq!(parsed.score, -4);
        assert_eq!(parsed.country.as_deref(), Some("Sweden"));
        assert_eq!(parsed.rounds_played, DEFAULT_ROUNDS_PLAYED);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn status_position_is_used() {
        let raw = json!({
            "displayName": "Collin Morikawa",
            "status": {"position": {"displayValue": "T5"}, "score": {"displayValue": "E"}}
        });
        let parsed = parse_competitor(&raw, 0, 0).0.unwrap();
        assert_eq!((parsed.position, parsed.score), (5, 0));
    }

    #[test]
    fn unreadable_fields_default_with_diagnostics() {
        let raw = json!({
            "displayName": "Max Homa",
            "status": {"position": {"displayValue": "-"}, "score": {"displayValue": "F"}}
        });
        let (parsed, diagnostics) = parse_competitor(&raw, 3, 1);
        let parsed = parsed.unwrap();
        assert_eq!((parsed.score, parsed.position), (0, 2));
        let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::ScoreDefaulted, DiagnosticKind::PositionDefaulted]);
        assert!(diagnostics.iter().all(|d| d.index == 3 && !d.is_rejection()));
        assert!(diagnostics.iter().all(|d| d.variant.as_deref() == Some("status")));
    }

    #[test]
    fn missing_score_is_even_without_diagnostic() {
        let raw = json!({"athlete": {"displayName": "Sam Burns"}});
        let (parsed, diagnostics) = parse_competitor(&raw, 0, 0);
        assert_eq!(parsed.unwrap().score, 0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn blank_names_are_rejected() {
        for name in ["", "   ", "\t"] {
            let (parsed, diagnostics) = parse_competitor(&athlete(name, "-1"), 0, 0);
            assert!(parsed.is_none());
            assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingName);
            assert_eq!(diagnostics[0].variant.as_deref(), Some("athlete"));
        }
        let (parsed, diagnostics) = parse_competitor(&json!({"athlete": {}, "score": "E"}), 0, 0);
        assert!(parsed.is_none());
        assert!(diagnostics[0].is_rejection());

        let (_, diagnostics) = parse_competitor(&json!({"unexpected": true}), 7, 0);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownShape);
        assert_eq!(diagnostics[0].variant, None);
    }

    #[test]
    fn batch_counts_add_up() {
        let competitors = vec![
            athlete("Player One", "-3"),
            athlete(" ", "-2"),
            json!({"unexpected": true}),
            athlete("Player Two", "E"),
            json!(null),
            athlete("Player Three", "+1"),
        ];
        let batch = parse_batch(&competitors);
        assert_eq!(batch.accepted.len() + batch.rejected, competitors.len());
        assert_eq!(batch.rejected, 3);
        let positions: Vec<_> = batch.accepted.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        let names: Vec<_> = batch.accepted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Player One", "Player Two", "Player Three"]);
    }

    #[test]
    fn new_entry_has_no_previous_position() {
        let entry = parse_competitor(&athlete("Player", "-1"), 0, 0).0.unwrap().into_new_entry();
        assert_eq!(entry.previous_position, None);
        assert_eq!(entry.current_score, -1);
    }
}
