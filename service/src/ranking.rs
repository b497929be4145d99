use crate::dto::{RankedEntry, ScoreEntry};

/// Orders scores into standings, lowest score first.
///
/// Equal scores share a position and keep their input order. The entry after a
/// tied group takes its 1-based index as position, so `[-8, -6, -6, -3]` ranks
/// as `1, 2, 2, 4`. Withdrawn and cut sentinels are ranked like any other score.
pub fn rank(entries: Vec<ScoreEntry>) -> Vec<RankedEntry> {
    let mut sorted = entries;
    // `sort_by_key` is stable, which keeps fetch order inside a tie.
    sorted.sort_by_key(|e| e.current_score);

    let scores: Vec<i32> = sorted.iter().map(|e| e.current_score).collect();
    let mut position = 1;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, mut entry)| {
            let tied_with_prev = i > 0 && scores[i - 1] == scores[i];
            let tied_with_next = scores.get(i + 1) == Some(&scores[i]);
            if !tied_with_prev {
                position = i as i32 + 1;
            }
            entry.position = position;
            RankedEntry {
                entry,
                is_tied: tied_with_prev || tied_with_next,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{TournamentId, MISSED_CUT, WITHDRAWN};

    fn entries(scores: &[i32]) -> Vec<ScoreEntry> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ScoreEntry {
                id: i as i32 + 1,
                tournament_id: TournamentId(1),
                player_name: format!("Player {}", i + 1),
                current_score: score,
                position: 50 - i as i32,
                previous_position: None,
                rounds_played: 2,
                country: None,
            })
            .collect()
    }

    fn positions(ranked: &[RankedEntry]) -> Vec<i32> {
        ranked.iter().map(|r| r.entry.position).collect()
    }

    fn ties(ranked: &[RankedEntry]) -> Vec<bool> {
        ranked.iter().map(|r| r.is_tied).collect()
    }

    #[test]
    fn shared_position_then_index() {
        let ranked = rank(entries(&[-8, -6, -6, -3]));
        assert_eq!(positions(&ranked), vec![1, 2, 2, 4]);
        assert_eq!(ties(&ranked), vec![false, true, true, false]);
    }

    #[test]
    fn everyone_tied() {
        let ranked = rank(entries(&[0, 0, 0]));
        assert_eq!(positions(&ranked), vec![1, 1, 1]);
        assert_eq!(ties(&ranked), vec![true, true, true]);
    }

    #[test]
    fn single_and_empty() {
        let ranked = rank(entries(&[5]));
        assert_eq!(positions(&ranked), vec![1]);
        assert_eq!(ties(&ranked), vec![false]);
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn sorts_unordered_input() {
        let ranked = rank(entries(&[2, -4, 0, -4, 7]));
        let scores: Vec<_> = ranked.iter().map(|r| r.entry.current_score).collect();
        assert_eq!(scores, vec![-4, -4, 0, 2, 7]);
        assert_eq!(positions(&ranked), vec![1, 1, 3, 4, 5]);
        // Equal scores keep input order: ids 2 then 4.
        assert_eq!(ranked[0].entry.id, 2);
        assert_eq!(ranked[1].entry.id, 4);
    }

    #[test]
    fn ranking_is_idempotent() {
        let first = rank(entries(&[3, -1, -1, 0, 3, 3, -7]));
        let again = rank(first.iter().map(|r| r.entry.clone()).collect());
        assert_eq!(first, again);
    }

    #[test]
    fn permuting_a_tie_only_moves_names() {
        let mut input = entries(&[-2, 1, -2, -2]);
        let forward = rank(input.clone());
        input.swap(0, 3);
        let swapped = rank(input);
        assert_eq!(positions(&forward), positions(&swapped));
        assert_eq!(ties(&forward), ties(&swapped));
        let ids: Vec<_> = swapped.iter().map(|r| r.entry.id).collect();
        assert_eq!(ids, vec![4, 3, 1, 2]);
    }

    #[test]
    fn sentinels_sort_last_and_can_tie() {
        let ranked = rank(entries(&[MISSED_CUT, -1, WITHDRAWN, MISSED_CUT]));
        let scores: Vec<_> = ranked.iter().map(|r| r.entry.current_score).collect();
        assert_eq!(scores, vec![-1, WITHDRAWN, MISSED_CUT, MISSED_CUT]);
        assert_eq!(positions(&ranked), vec![1, 2, 3, 3]);
        assert_eq!(ties(&ranked), vec![false, false, true, true]);
    }
}
