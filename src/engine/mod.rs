//! Outcome engine: draw a pocket, then settle the bet against it.
//!
//! Everything here is pure apart from the `Entropy` passed in. Callers build
//! a fresh source per spin, so concurrent spins share no state.

pub mod wheel;
pub mod evaluator;
pub mod cheat;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::types::{BetSpec, CheatConfig, SpinResult};
use cheat::draw_number;
use evaluator::settle;
use wheel::{color_of, POCKETS};

// ---------------------------------------------------------------------------
// Entropy
// ---------------------------------------------------------------------------

/// Source of randomness for a spin.
#[cfg_attr(test, mockall::automock)]
pub trait Entropy {
    /// Uniform pocket in `0..=36`.
    fn pocket(&mut self) -> u8;

    /// Uniform value in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// `Entropy` backed by any `rand` generator.
#[derive(Debug)]
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: Rng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngEntropy<StdRng> {
    /// Fresh OS-seeded generator, one per spin.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Entropy for RngEntropy<R> {
    fn pocket(&mut self) -> u8 {
        self.rng.gen_range(0..POCKETS)
    }

    fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

// ---------------------------------------------------------------------------
// Spin
// ---------------------------------------------------------------------------

/// Run one spin: draw (possibly cheat-biased), then settle every bet.
pub fn spin<E: Entropy + ?Sized>(entropy: &mut E, bet: &BetSpec, cheat: &CheatConfig) -> SpinResult {
    let draw = draw_number(entropy, bet, cheat);
    let settlement = settle(draw.number, bet);

    if draw.cheat_boosted {
        info!(
            cheat_type = ?cheat.cheat_type,
            winning_number = draw.number,
            "Cheat boost applied"
        );
    }

    let result = SpinResult {
        winning_number: draw.number,
        color: color_of(draw.number),
        win: settlement.win,
        payout: settlement.payout,
        cheat_active: cheat.active,
        cheat_type: cheat.cheat_type.clone(),
        cheat_boosted: draw.cheat_boosted,
        bets: settlement.bets,
    };

    debug!(
        compound = bet.is_compound(),
        stake = %bet.total_stake(),
        outcome = %result,
        "Spin settled"
    );

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
