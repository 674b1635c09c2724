use chrono::{Duration, NaiveDate};

use super::types::{Inputs, MonthResult};

/// One row per elapsed month. Contributions are credited before the month's
/// return is applied, so a contribution compounds in the month it is made.
pub fn run_simulation(inputs: &Inputs) -> Vec<MonthResult> {
    let mut total_investment = inputs.initial_investment;
    let mut total_value = inputs.initial_investment;

    let mut results = Vec::with_capacity(inputs.monthly_returns.len());
    for (index, monthly_return) in inputs.monthly_returns.iter().enumerate() {
        total_investment += inputs.monthly_investment;
        total_value += inputs.monthly_investment;

        let monthly_profit = total_value * (monthly_return / 100.0);
        total_value += monthly_profit;

        results.push(MonthResult {
            date: period_date(inputs.start_date, index),
            total_investment,
            total_value,
            total_profit: total_value - total_investment,
            monthly_profit,
        });
    }

    results
}

/// Label date for the period at `index` (0-based). Months advance by a flat
/// 30 days, not by calendar months, so labels drift over long ranges.
pub fn period_date(start_date: NaiveDate, index: usize) -> NaiveDate {
    start_date + Duration::days(30 * index as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date")
    }

    fn sample_inputs(monthly_returns: Vec<f64>) -> Inputs {
        Inputs {
            initial_investment: 1_000.0,
            monthly_investment: 0.0,
            monthly_returns,
            start_date: start_date(),
        }
    }

    #[test]
    fn empty_returns_produce_no_rows() {
        let results = run_simulation(&sample_inputs(Vec::new()));
        assert!(results.is_empty());
    }

    #[test]
    fn single_return_without_contributions_compounds_the_lump_sum_once() {
        let results = run_simulation(&sample_inputs(vec![7.5]));

        assert_eq!(results.len(), 1);
        assert_approx(results[0].total_value, 1_000.0 * 1.075);
        assert_approx(results[0].total_investment, 1_000.0);
    }

    #[test]
    fn gain_then_loss_matches_hand_computed_trajectory() {
        let results = run_simulation(&sample_inputs(vec![10.0, -10.0]));

        assert_eq!(results.len(), 2);

        assert_approx(results[0].total_value, 1_100.0);
        assert_approx(results[0].monthly_profit, 100.0);
        assert_approx(results[0].total_profit, 100.0);

        assert_approx(results[1].total_value, 990.0);
        assert_approx(results[1].monthly_profit, -110.0);
        assert_approx(results[1].total_profit, -10.0);
    }

    #[test]
    fn contribution_is_credited_before_the_return_applies() {
        let inputs = Inputs {
            initial_investment: 0.0,
            monthly_investment: 100.0,
            monthly_returns: vec![10.0],
            start_date: start_date(),
        };

        let results = run_simulation(&inputs);
        assert_approx(results[0].total_investment, 100.0);
        assert_approx(results[0].total_value, 110.0);
        assert_approx(results[0].monthly_profit, 10.0);
    }

    #[test]
    fn period_dates_step_thirty_days_from_the_start() {
        let results = run_simulation(&sample_inputs(vec![0.0, 0.0, 0.0]));

        let expected: Vec<NaiveDate> = (0..3)
            .map(|i| start_date() + Duration::days(30 * i))
            .collect();
        let actual: Vec<NaiveDate> = results.iter().map(|r| r.date).collect();
        assert_eq!(actual, expected);

        // 30-day stepping, not calendar months: the third label lands on
        // 2020-03-01 only because 2020 is a leap year.
        assert_eq!(
            results[2].date,
            NaiveDate::from_ymd_opt(2020, 3, 1).expect("valid date")
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_total_profit_is_value_minus_investment(
            initial in 0.0f64..100_000.0,
            monthly in 0.0f64..5_000.0,
            returns in proptest::collection::vec(-20.0f64..20.0, 1..36)
        ) {
            let inputs = Inputs {
                initial_investment: initial,
                monthly_investment: monthly,
                monthly_returns: returns,
                start_date: start_date(),
            };

            for row in run_simulation(&inputs) {
                let diff = row.total_profit - (row.total_value - row.total_investment);
                prop_assert!(diff.abs() <= 1e-9 * row.total_value.abs().max(1.0));
            }
        }

        #[test]
        fn prop_zero_returns_keep_value_equal_to_investment(
            initial in 0.0f64..100_000.0,
            monthly in 0.0f64..5_000.0,
            months in 1usize..48
        ) {
            let inputs = Inputs {
                initial_investment: initial,
                monthly_investment: monthly,
                monthly_returns: vec![0.0; months],
                start_date: start_date(),
            };

            for row in run_simulation(&inputs) {
                prop_assert!((row.total_value - row.total_investment).abs() <= EPS);
                prop_assert!(row.total_profit.abs() <= EPS);
                prop_assert!(row.monthly_profit.abs() <= EPS);
            }
        }

        #[test]
        fn prop_each_period_compounds_the_contributed_balance(
            initial in 0.0f64..100_000.0,
            monthly in 0.0f64..5_000.0,
            returns in proptest::collection::vec(-20.0f64..20.0, 1..36)
        ) {
            let inputs = Inputs {
                initial_investment: initial,
                monthly_investment: monthly,
                monthly_returns: returns.clone(),
                start_date: start_date(),
            };

            let results = run_simulation(&inputs);
            let mut previous_value = initial;
            for (row, monthly_return) in results.iter().zip(&returns) {
                let expected = (previous_value + monthly) * (1.0 + monthly_return / 100.0);
                let tolerance = 1e-9 * expected.abs().max(1.0);
                prop_assert!((row.total_value - expected).abs() <= tolerance);
                previous_value = row.total_value;
            }
        }

        #[test]
        fn prop_row_count_matches_return_count(
            returns in proptest::collection::vec(-20.0f64..20.0, 0..48)
        ) {
            let results = run_simulation(&sample_inputs(returns.clone()));
            prop_assert!(results.len() == returns.len());
        }
    }
}
