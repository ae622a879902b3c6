//! Role assignment: deals two private role views over one shared board.
//!
//! A single shuffled order of the 25 positions is cut into contiguous blocks
//! of 3 shared agents, 6 agents for each player alone, and 3 assassins for
//! each player. The last 4 positions stay bystanders for both. Because the
//! blocks never overlap, each view ends up with 9 agents and 3 assassins and
//! the two assassin sets are disjoint from each other and from every agent.

use duet_core::error::DomainError;
use duet_core::rng::{DeterministicRng, shuffle};

use super::board::{BOARD_SIZE, Role, RoleView, ensure_board_size};

/// Agents that appear in both views.
pub const SHARED_AGENTS: usize = 3;
/// Agents that appear in exactly one view, per player.
pub const SOLO_AGENTS: usize = 6;
/// Assassins per view.
pub const ASSASSINS: usize = 3;
/// Agents per view.
pub const AGENTS_PER_VIEW: usize = SHARED_AGENTS + SOLO_AGENTS;

/// Builds `view1` and `view2` for a 25-word board.
///
/// # Errors
///
/// Returns `DomainError::InvalidGameData` if `words` does not hold exactly 25
/// entries. No randomness is consumed in that case.
pub fn assign_roles(
    words: &[String],
    rng: &mut dyn DeterministicRng,
) -> Result<(RoleView, RoleView), DomainError> {
    ensure_board_size("board", words.len())?;

    let mut order: Vec<usize> = (0..BOARD_SIZE).collect();
    shuffle(&mut order, rng);

    let (shared, rest) = order.split_at(SHARED_AGENTS);
    let (p1_agents, rest) = rest.split_at(SOLO_AGENTS);
    let (p2_agents, rest) = rest.split_at(SOLO_AGENTS);
    let (p1_assassins, rest) = rest.split_at(ASSASSINS);
    let (p2_assassins, _) = rest.split_at(ASSASSINS);

    let mut roles1 = [Role::Bystander; BOARD_SIZE];
    let mut roles2 = [Role::Bystander; BOARD_SIZE];
    for &i in shared.iter().chain(p1_agents) {
        roles1[i] = Role::Agent;
    }
    for &i in shared.iter().chain(p2_agents) {
        roles2[i] = Role::Agent;
    }
    for &i in p1_assassins {
        roles1[i] = Role::Assassin;
    }
    for &i in p2_assassins {
        roles2[i] = Role::Assassin;
    }

    Ok((
        RoleView::from_roles(words, &roles1),
        RoleView::from_roles(words, &roles2),
    ))
}

/// Draws a 25-word board from a candidate list.
///
/// Candidates are trimmed and blank entries dropped; the remainder is fully
/// shuffled and the first 25 are kept. Duplicates are not removed.
///
/// # Errors
///
/// Returns `DomainError::InvalidGameData` if fewer than 25 usable words remain.
pub fn draw_board(
    candidates: Vec<String>,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<String>, DomainError> {
    let mut words: Vec<String> = candidates
        .into_iter()
        .map(|w| w.trim().to_owned())
        .filter(|w| !w.is_empty())
        .collect();

    if words.len() < BOARD_SIZE {
        return Err(DomainError::InvalidGameData(format!(
            "word list has {} usable words, {BOARD_SIZE} needed",
            words.len()
        )));
    }

    shuffle(&mut words, rng);
    words.truncate(BOARD_SIZE);
    Ok(words)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use duet_core::rng::StdGameRng;
    use duet_test_support::{IdentityRng, SequenceRng, sample_words};

    use super::*;

    fn set(indices: Vec<usize>) -> HashSet<usize> {
        indices.into_iter().collect()
    }

    #[test]
    fn test_assign_roles_identity_shuffle_yields_known_layout() {
        let words = sample_words(25);

        let (view1, view2) = assign_roles(&words, &mut IdentityRng).unwrap();

        assert_eq!(view1.indices_of(Role::Agent), (0..9).collect::<Vec<_>>());
        assert_eq!(
            view2.indices_of(Role::Agent),
            (0..3).chain(9..15).collect::<Vec<_>>()
        );
        assert_eq!(view1.indices_of(Role::Assassin), vec![15, 16, 17]);
        assert_eq!(view2.indices_of(Role::Assassin), vec![18, 19, 20]);
        for i in 21..25 {
            assert_eq!(view1.get(i).unwrap().role, Role::Bystander);
            assert_eq!(view2.get(i).unwrap().role, Role::Bystander);
        }
    }

    #[test]
    fn test_assign_roles_keeps_words_in_board_order() {
        let words = sample_words(25);

        let (view1, view2) = assign_roles(&words, &mut StdGameRng::seeded(3)).unwrap();

        for (i, word) in words.iter().enumerate() {
            assert_eq!(&view1.get(i).unwrap().word, word);
            assert_eq!(&view2.get(i).unwrap().word, word);
        }
    }

    #[test]
    fn test_assign_roles_partition_invariants_hold_across_seeds() {
        let words = sample_words(25);

        for seed in 0..200 {
            let (view1, view2) = assign_roles(&words, &mut StdGameRng::seeded(seed)).unwrap();

            let agents1 = set(view1.indices_of(Role::Agent));
            let agents2 = set(view2.indices_of(Role::Agent));
            let assassins1 = set(view1.indices_of(Role::Assassin));
            let assassins2 = set(view2.indices_of(Role::Assassin));

            assert_eq!(agents1.len(), AGENTS_PER_VIEW, "seed {seed}");
            assert_eq!(agents2.len(), AGENTS_PER_VIEW, "seed {seed}");
            assert_eq!(assassins1.len(), ASSASSINS, "seed {seed}");
            assert_eq!(assassins2.len(), ASSASSINS, "seed {seed}");
            assert_eq!(agents1.intersection(&agents2).count(), SHARED_AGENTS);
            assert!(assassins1.is_disjoint(&assassins2));
            for assassins in [&assassins1, &assassins2] {
                assert!(assassins.is_disjoint(&agents1));
                assert!(assassins.is_disjoint(&agents2));
            }
            assert_eq!(view1.indices_of(Role::Bystander).len(), 13);
            assert_eq!(view2.indices_of(Role::Bystander).len(), 13);
        }
    }

    #[test]
    fn test_assign_roles_rejects_24_words_without_consuming_randomness() {
        let words = sample_words(24);
        let mut rng = SequenceRng::new(vec![]);

        let result = assign_roles(&words, &mut rng);

        assert!(matches!(result, Err(DomainError::InvalidGameData(_))));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_draw_board_takes_25_trimmed_words() {
        let mut candidates: Vec<String> = sample_words(30)
            .into_iter()
            .map(|w| format!("  {w}\r"))
            .collect();
        candidates.push(String::new());
        candidates.push("   ".to_owned());

        let board = draw_board(candidates, &mut IdentityRng).unwrap();

        assert_eq!(board, sample_words(25));
    }

    #[test]
    fn test_draw_board_rejects_short_list() {
        let result = draw_board(sample_words(20), &mut IdentityRng);

        match result {
            Err(DomainError::InvalidGameData(msg)) => {
                assert_eq!(msg, "word list has 20 usable words, 25 needed");
            }
            other => panic!("expected InvalidGameData, got {other:?}"),
        }
    }

    #[test]
    fn test_draw_board_draws_from_whole_list() {
        let candidates = sample_words(30);
        let mut seen = HashSet::new();

        for seed in 0..50 {
            let board = draw_board(candidates.clone(), &mut StdGameRng::seeded(seed)).unwrap();
            assert_eq!(board.len(), BOARD_SIZE);
            seen.extend(board);
        }

        assert_eq!(seen.len(), 30);
    }
}
