//! Cheat-biased number draw.
//!
//! A spin always starts from an honest pocket. When a recognised cheat is
//! active and its activation roll succeeds, the draw is moved onto a pocket
//! that pays at least one of the player's bets.

use tracing::debug;

use super::evaluator::would_win;
use super::wheel::{color_of, POCKETS};
use super::Entropy;
use crate::types::{BetKind, BetSpec, CheatConfig};

/// A drawn pocket and whether a cheat decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub number: u8,
    pub cheat_boosted: bool,
}

impl Draw {
    fn honest(number: u8) -> Self {
        Self { number, cheat_boosted: false }
    }

    fn boosted(number: u8) -> Self {
        Self { number, cheat_boosted: true }
    }
}

/// Draw the winning number for `bet` under `cheat`.
///
/// The result is always a valid pocket. `cheat_boosted` is set only when the
/// cheat fired and at least one favourable pocket existed; if none did, the
/// honest draw stands and the spin is reported as not boosted.
pub fn draw_number<E: Entropy + ?Sized>(entropy: &mut E, bet: &BetSpec, cheat: &CheatConfig) -> Draw {
    let baseline = entropy.pocket();

    if !cheat.active || !has_target(bet) {
        return Draw::honest(baseline);
    }

    let chance = cheat.boost_chance();
    if chance <= 0.0 || entropy.roll() >= chance {
        return Draw::honest(baseline);
    }

    let pool = favourable_pockets(bet);
    debug!(
        cheat_type = ?cheat.cheat_type,
        baseline,
        candidates = pool.len(),
        "Cheat triggered"
    );

    if pool.is_empty() {
        return Draw::honest(baseline);
    }

    match bet {
        // A simple bet that already wins needs no help.
        BetSpec::Simple { .. } if pool.contains(&baseline) => Draw::boosted(baseline),
        _ => Draw::boosted(pool[entropy.pick(pool.len())]),
    }
}

/// Pockets that would pay at least one bet, ascending, without repeats.
pub fn favourable_pockets(bet: &BetSpec) -> Vec<u8> {
    (0..POCKETS)
        .filter(|&n| {
            let color = color_of(n);
            match bet {
                BetSpec::Simple { kind, .. } => would_win(n, color, kind),
                // First matching inner bet is enough to qualify the pocket.
                BetSpec::Compound(entries) => entries
                    .iter()
                    .any(|(_, inner)| would_win(n, color, &inner.kind)),
            }
        })
        .collect()
}

fn has_target(bet: &BetSpec) -> bool {
    match bet {
        BetSpec::Simple { kind, .. } => !matches!(kind, BetKind::Unknown(_)),
        BetSpec::Compound(entries) => !entries.is_empty(),
    }
}
