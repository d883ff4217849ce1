//! Outcome resolution: the fixed dominance relation between choices.

use roshambo_protocol::Choice;

/// The result of comparing two submitted choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player in slot 0 won the round.
    PlayerOne,
    /// The player in slot 1 won the round.
    PlayerTwo,
    /// Equal choices; nobody scores.
    Tie,
}

/// Resolves one round from both players' choices.
///
/// The relation is cyclic: rock beats scissors, scissors beats paper,
/// paper beats rock. Callers must only invoke this once both choices are
/// actually in — the signature makes a missing choice unrepresentable.
pub fn resolve(first: Choice, second: Choice) -> Outcome {
    if first == second {
        Outcome::Tie
    } else if beats(first) == second {
        Outcome::PlayerOne
    } else {
        Outcome::PlayerTwo
    }
}

/// The choice that `choice` defeats.
fn beats(choice: Choice) -> Choice {
    match choice {
        Choice::Rock => Choice::Scissors,
        Choice::Scissors => Choice::Paper,
        Choice::Paper => Choice::Rock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHOICES: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    #[test]
    fn test_resolve_full_dominance_table() {
        // All 9 ordered pairs: 3 ties on the diagonal, 3 wins per side.
        use Choice::*;
        use Outcome::*;
        let table = [
            ((Rock, Rock), Tie),
            ((Rock, Paper), PlayerTwo),
            ((Rock, Scissors), PlayerOne),
            ((Paper, Rock), PlayerOne),
            ((Paper, Paper), Tie),
            ((Paper, Scissors), PlayerTwo),
            ((Scissors, Rock), PlayerTwo),
            ((Scissors, Paper), PlayerOne),
            ((Scissors, Scissors), Tie),
        ];
        for ((first, second), want) in table {
            assert_eq!(resolve(first, second), want, "{first} vs {second}");
        }
    }

    #[test]
    fn test_resolve_swapping_sides_swaps_winner() {
        for first in CHOICES {
            for second in CHOICES {
                if first == second {
                    continue;
                }
                let swapped = match resolve(first, second) {
                    Outcome::PlayerOne => Outcome::PlayerTwo,
                    Outcome::PlayerTwo => Outcome::PlayerOne,
                    Outcome::Tie => panic!("distinct choices cannot tie"),
                };
                assert_eq!(resolve(second, first), swapped);
            }
        }
    }
}
