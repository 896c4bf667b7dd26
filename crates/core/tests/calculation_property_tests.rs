//! Property-based integration tests for month ranges and the calculation rules.
//!
//! These tests verify that the invariants hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use investfolio_core::goals::{project_goal, FinancialGoal, GoalInvestmentPlan};
use investfolio_core::months::build_month_range;
use investfolio_core::portfolio::performance::{Appreciation, Growth};
use investfolio_core::Month;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Generates a month between 1990-01 and 2060-12.
fn arb_month() -> impl Strategy<Value = Month> {
    (1990i32..=2060, 1u32..=12).prop_map(|(year, month)| Month::new(year, month).unwrap())
}

/// Generates a non-negative amount with two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generates a monthly rate in percent, between 0.00 and 5.00.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=500).prop_map(|basis| Decimal::new(basis, 2))
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A range is consecutive, inclusive on both ends and as long as the
    /// month distance allows.
    #[test]
    fn prop_month_range_is_consecutive(
        start in arb_month(),
        length in 0i32..240,
    ) {
        let end = start.plus_months(length);
        let months = build_month_range(start, end, 240).unwrap();

        prop_assert_eq!(months.len() as i32, length + 1);
        prop_assert_eq!(months.first().copied(), Some(start));
        prop_assert_eq!(months.last().copied(), Some(end));
        for pair in months.windows(2) {
            prop_assert_eq!(pair[0].next(), pair[1]);
        }
    }

    /// Ranges longer than the cap are always rejected.
    #[test]
    fn prop_month_range_respects_cap(
        start in arb_month(),
        max_months in 1u32..60,
        overrun in 0i32..24,
    ) {
        let end = start.plus_months(max_months as i32 + overrun);
        prop_assert!(build_month_range(start, end, max_months).is_err());
    }

    /// Growth always equals lenient appreciation plus net cash flow.
    #[test]
    fn prop_growth_is_appreciation_plus_net_flow(
        previous in arb_amount(),
        current in arb_amount(),
        contributions in arb_amount(),
        withdrawals in arb_amount(),
    ) {
        let appreciation =
            Appreciation::calculate_lenient(previous, current, contributions, withdrawals);
        let growth = Growth::calculate(previous, current, contributions, withdrawals);

        prop_assert_eq!(growth.value, appreciation.value + contributions - withdrawals);
        prop_assert_eq!(growth.value, current - previous);
    }

    /// Strict and lenient appreciation agree whenever a base exists.
    #[test]
    fn prop_strict_matches_lenient_with_base(
        previous in arb_amount(),
        current in arb_amount(),
        contributions in arb_amount(),
    ) {
        let lenient =
            Appreciation::calculate_lenient(previous, current, contributions, Decimal::ZERO);
        match Appreciation::calculate(previous, current, contributions, Decimal::ZERO) {
            Ok(strict) => prop_assert_eq!(strict, lenient),
            Err(_) => {
                prop_assert!(previous.is_zero() && contributions.is_zero());
                prop_assert!(lenient.percentage.is_zero());
            }
        }
    }

    /// Projections never exceed the horizon, are non-decreasing and stop at
    /// the first month that reaches the target.
    #[test]
    fn prop_projection_stops_at_target(
        contribution in (100i64..500_000).prop_map(|cents| Decimal::new(cents, 2)),
        rate in arb_rate(),
        initial in arb_amount(),
        target in (1i64..50_000_000).prop_map(|cents| Decimal::new(cents, 2)),
        max_months in 1u32..240,
    ) {
        let goal = FinancialGoal {
            id: 1,
            owner_id: 1,
            name: "Goal".to_string(),
            target_value: target,
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        let plan = GoalInvestmentPlan {
            goal_id: 1,
            monthly_contribution: contribution,
            monthly_return_rate: rate,
            initial_value: initial,
        };

        let entries = project_goal(&goal, &plan, goal.start_month(), max_months).unwrap();

        prop_assert!(!entries.is_empty());
        prop_assert!(entries.len() <= max_months as usize);
        for pair in entries.windows(2) {
            prop_assert!(pair[0].projected_value < goal.target_value);
            prop_assert!(pair[0].projected_value <= pair[1].projected_value);
            prop_assert_eq!(pair[0].month.next(), pair[1].month);
        }
        let last = entries.last().unwrap();
        prop_assert!(
            last.projected_value >= goal.target_value || entries.len() == max_months as usize
        );
    }
}
