use crate::core::MonthResult;

/// Renders the five-column fixed-width table: month label, running
/// investment, running value, running profit, and the month's profit.
pub fn render_table(results: &[MonthResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10}{:<20}{:<20}{:<20}{:<20}\n",
        "Month", "Total Investment", "Total Value", "Total Profit", "Monthly Profit"
    ));
    out.push_str(&"=".repeat(90));
    out.push('\n');

    for row in results {
        out.push_str(&format!(
            "{:<10}{:<20.2}{:<20.2}{:<20.2}{:<20.2}\n",
            row.date.format("%m/%Y").to_string(),
            row.total_investment,
            row.total_value,
            row.total_profit,
            row.monthly_profit
        ));
    }

    out
}

pub fn print_table(results: &[MonthResult]) {
    print!("{}", render_table(results));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_rows() -> Vec<MonthResult> {
        vec![
            MonthResult {
                date: NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"),
                total_investment: 1_000.0,
                total_value: 1_100.0,
                total_profit: 100.0,
                monthly_profit: 100.0,
            },
            MonthResult {
                date: NaiveDate::from_ymd_opt(2020, 1, 31).expect("valid date"),
                total_investment: 1_000.0,
                total_value: 990.0,
                total_profit: -10.0,
                monthly_profit: -110.0,
            },
        ]
    }

    #[test]
    fn table_has_header_rule_and_one_row_per_period() {
        let table = render_table(&sample_rows());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Month"));
        assert_eq!(lines[1], "=".repeat(90));
        assert!(lines[2].starts_with("01/2020"));
        assert!(lines[3].starts_with("01/2020"));
    }

    #[test]
    fn numeric_columns_use_two_decimals_at_fixed_offsets() {
        let table = render_table(&sample_rows());
        let row = table.lines().nth(2).expect("first data row");

        assert_eq!(&row[0..10], "01/2020   ");
        assert!(row[10..30].starts_with("1000.00"));
        assert!(row[30..50].starts_with("1100.00"));
        assert!(row[50..70].starts_with("100.00"));
        assert!(row[70..].starts_with("100.00"));

        let loss_row = table.lines().nth(3).expect("second data row");
        assert!(loss_row[50..70].starts_with("-10.00"));
        assert!(loss_row[70..].starts_with("-110.00"));
    }

    #[test]
    fn empty_results_render_only_the_header() {
        let table = render_table(&[]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Month"));
    }
}
