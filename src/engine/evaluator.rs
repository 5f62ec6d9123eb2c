//! Bet evaluation and settlement.
//!
//! Payouts include the returned stake: a winning even-money bet of 10 pays
//! 20, a winning straight-up bet of 10 pays 360.

use rust_decimal::Decimal;

use super::wheel::color_of;
use crate::types::{BetKind, BetResult, BetSpec, Color};

/// Straight-up pays 35 to 1.
pub const STRAIGHT_MULTIPLIER: u32 = 35;

/// Colors, parity and halves pay 1 to 1.
pub const EVEN_MONEY_MULTIPLIER: u32 = 1;

/// Key reported for the single entry of a simple bet.
pub const SIMPLE_BET_KEY: &str = "bet";

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Whether `kind` wins when `number` (of `color`) comes up.
pub fn would_win(number: u8, color: Color, kind: &BetKind) -> bool {
    evaluate(number, color, kind).0
}

/// Win flag and odds multiplier for one bet kind.
pub fn evaluate(number: u8, color: Color, kind: &BetKind) -> (bool, u32) {
    match kind {
        BetKind::Straight(target) => (*target == Some(number), STRAIGHT_MULTIPLIER),
        BetKind::Red => (color == Color::Red, EVEN_MONEY_MULTIPLIER),
        BetKind::Black => (color == Color::Black, EVEN_MONEY_MULTIPLIER),
        BetKind::Even => (number > 0 && number % 2 == 0, EVEN_MONEY_MULTIPLIER),
        BetKind::Odd => (number > 0 && number % 2 == 1, EVEN_MONEY_MULTIPLIER),
        BetKind::Low => ((1..=18).contains(&number), EVEN_MONEY_MULTIPLIER),
        BetKind::High => ((19..=36).contains(&number), EVEN_MONEY_MULTIPLIER),
        BetKind::Unknown(_) => (false, 0),
    }
}

/// Stake plus winnings. Non-positive stakes pay nothing; results beyond the
/// `Decimal` range saturate at `Decimal::MAX`.
pub fn payout_for(amount: Decimal, multiplier: u32) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    amount.saturating_mul(Decimal::from(multiplier + 1))
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

/// Outcome of settling a bet against one winning number.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub win: bool,
    pub payout: Decimal,
    pub bets: Vec<BetResult>,
}

/// Settle every bet in `bet` against `number`.
///
/// Compound bets pay each winning entry at its own odds. Simple bets pay
/// 2x on a win regardless of kind.
pub fn settle(number: u8, bet: &BetSpec) -> Settlement {
    let color = color_of(number);

    let bets: Vec<BetResult> = match bet {
        BetSpec::Simple { kind, amount } => {
            let (wins, _) = evaluate(number, color, kind);
            vec![settle_one(SIMPLE_BET_KEY, kind, *amount, wins, EVEN_MONEY_MULTIPLIER)]
        }
        BetSpec::Compound(entries) => entries
            .iter()
            .map(|(key, inner)| {
                let (wins, multiplier) = evaluate(number, color, &inner.kind);
                settle_one(key, &inner.kind, inner.amount, wins, multiplier)
            })
            .collect(),
    };

    Settlement {
        win: bets.iter().any(|b| b.won),
        payout: bets
            .iter()
            .fold(Decimal::ZERO, |total, b| total.saturating_add(b.payout)),
        bets,
    }
}

fn settle_one(key: &str, kind: &BetKind, amount: Decimal, wins: bool, multiplier: u32) -> BetResult {
    let payout = if wins { payout_for(amount, multiplier) } else { Decimal::ZERO };
    BetResult {
        key: key.to_string(),
        kind: kind.clone(),
        amount,
        won: payout > Decimal::ZERO,
        payout,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::wheel::{MAX_NUMBER, POCKETS};
    use crate::types::InnerBet;
    use rust_decimal_macros::dec;

    fn eval(number: u8, kind: BetKind) -> (bool, u32) {
        evaluate(number, color_of(number), &kind)
    }

    fn compound(entries: Vec<(&str, BetKind, Decimal)>) -> BetSpec {
        BetSpec::Compound(
            entries
                .into_iter()
                .map(|(k, kind, amount)| (k.to_string(), InnerBet { kind, amount }))
                .collect(),
        )
    }

    #[test]
    fn test_zero_loses_every_outside_bet() {
        for kind in [BetKind::Red, BetKind::Black, BetKind::Even, BetKind::Odd, BetKind::Low, BetKind::High] {
            assert!(!eval(0, kind.clone()).0, "{kind} should lose on zero");
        }
    }

    #[test]
    fn test_parity_partitions_non_zero() {
        for n in 1..=MAX_NUMBER {
            let even = eval(n, BetKind::Even).0;
            let odd = eval(n, BetKind::Odd).0;
            assert!(even ^ odd, "pocket {n}");
        }
    }

    #[test]
    fn test_halves_partition_non_zero() {
        for n in 1..=MAX_NUMBER {
            let low = eval(n, BetKind::Low).0;
            let high = eval(n, BetKind::High).0;
            assert!(low ^ high, "pocket {n}");
            assert_eq!(low, n <= 18);
        }
    }

    #[test]
    fn test_straight_wins_only_on_target() {
        for target in 0..POCKETS {
            for n in 0..POCKETS {
                let (wins, multiplier) = eval(n, BetKind::Straight(Some(target)));
                assert_eq!(wins, n == target);
                assert_eq!(multiplier, 35);
            }
        }
    }

    #[test]
    fn test_straight_without_target_never_wins() {
        for n in 0..POCKETS {
            assert!(!eval(n, BetKind::Straight(None)).0);
        }
    }

    #[test]
    fn test_unknown_kind_loses() {
        assert_eq!(eval(17, BetKind::Unknown("split".into())), (false, 0));
    }

    #[test]
    fn test_payout_includes_stake() {
        assert_eq!(payout_for(dec!(10), 35), dec!(360));
        assert_eq!(payout_for(dec!(10), 1), dec!(20));
        assert_eq!(payout_for(dec!(2.5), 1), dec!(5.0));
    }

    #[test]
    fn test_non_positive_amount_pays_nothing() {
        assert_eq!(payout_for(Decimal::ZERO, 35), Decimal::ZERO);
        assert_eq!(payout_for(dec!(-10), 1), Decimal::ZERO);
    }

    #[test]
    fn test_oversized_stakes_saturate() {
        assert_eq!(payout_for(Decimal::MAX, 1), Decimal::MAX);
        assert_eq!(payout_for(Decimal::MAX, 35), Decimal::MAX);

        let simple = BetSpec::Simple { kind: BetKind::Red, amount: Decimal::MAX };
        let s = settle(32, &simple);
        assert!(s.win);
        assert_eq!(s.payout, Decimal::MAX);

        let bet = compound(vec![
            ("a", BetKind::Red, Decimal::MAX),
            ("b", BetKind::Even, Decimal::MAX),
            ("c", BetKind::High, Decimal::MAX),
            ("d", BetKind::Straight(Some(32)), Decimal::MAX),
        ]);
        let s = settle(32, &bet);
        assert_eq!(s.payout, Decimal::MAX);
        assert!(s.bets.iter().all(|b| b.won));
    }

    #[test]
    fn test_settle_straight_win() {
        let bet = compound(vec![("s", BetKind::Straight(Some(17)), dec!(10))]);
        let s = settle(17, &bet);
        assert!(s.win);
        assert_eq!(s.payout, dec!(360));
    }

    #[test]
    fn test_settle_red_on_32() {
        let bet = compound(vec![("r", BetKind::Red, dec!(10))]);
        let s = settle(32, &bet);
        assert!(s.win);
        assert_eq!(s.payout, dec!(20));
    }

    #[test]
    fn test_settle_compound_sums_payouts() {
        let bet = compound(vec![
            ("a", BetKind::Red, dec!(10)),
            ("b", BetKind::Straight(Some(5)), dec!(5)),
        ]);
        let s = settle(5, &bet);
        assert!(s.win);
        assert_eq!(s.bets[0].payout, dec!(20));
        assert_eq!(s.bets[1].payout, dec!(180));
        assert_eq!(s.payout, dec!(200));
    }

    #[test]
    fn test_settle_compound_partial_win() {
        let bet = compound(vec![
            ("a", BetKind::Black, dec!(10)),
            ("b", BetKind::Odd, dec!(10)),
            ("c", BetKind::Unknown("corner".into()), dec!(10)),
        ]);
        // 5 is red and odd
        let s = settle(5, &bet);
        assert!(s.win);
        assert_eq!(s.payout, dec!(20));
        assert_eq!(s.bets.iter().filter(|b| b.won).count(), 1);
        assert_eq!(s.bets[1].key, "b");
    }

    #[test]
    fn test_settle_compound_zero_amount_is_not_a_win() {
        let bet = compound(vec![("a", BetKind::Red, Decimal::ZERO)]);
        let s = settle(32, &bet);
        assert!(!s.win);
        assert_eq!(s.payout, Decimal::ZERO);
    }

    #[test]
    fn test_settle_compound_payout_is_sum_of_parts() {
        let bet = compound(vec![
            ("a", BetKind::Even, dec!(3)),
            ("b", BetKind::High, dec!(7)),
            ("c", BetKind::Straight(Some(20)), dec!(1)),
            ("d", BetKind::Black, dec!(4)),
        ]);
        for n in 0..POCKETS {
            let s = settle(n, &bet);
            let sum: Decimal = s.bets.iter().map(|b| b.payout).sum();
            assert_eq!(s.payout, sum);
            assert_eq!(s.win, s.bets.iter().any(|b| b.payout > Decimal::ZERO));
        }
    }

    #[test]
    fn test_settle_simple_pays_double() {
        let bet = BetSpec::Simple { kind: BetKind::High, amount: dec!(10) };
        let s = settle(30, &bet);
        assert!(s.win);
        assert_eq!(s.payout, dec!(20));
        assert_eq!(s.bets[0].key, SIMPLE_BET_KEY);

        let s = settle(3, &bet);
        assert!(!s.win);
        assert_eq!(s.payout, Decimal::ZERO);
    }

    #[test]
    fn test_settle_simple_zero_stake_is_not_a_win() {
        let bet = BetSpec::Simple { kind: BetKind::Red, amount: Decimal::ZERO };
        let s = settle(32, &bet);
        assert!(!s.win);
        assert!(!s.bets[0].won);
        assert_eq!(s.payout, Decimal::ZERO);
    }

    #[test]
    fn test_settle_simple_straight_never_wins() {
        let bet = BetSpec::Simple { kind: BetKind::Straight(None), amount: dec!(10) };
        for n in 0..POCKETS {
            let s = settle(n, &bet);
            assert!(!s.win);
            assert_eq!(s.payout, Decimal::ZERO);
        }
    }

    #[test]
    fn test_settle_empty_compound() {
        let s = settle(12, &BetSpec::Compound(Vec::new()));
        assert!(!s.win);
        assert_eq!(s.payout, Decimal::ZERO);
        assert!(s.bets.is_empty());
    }
}
