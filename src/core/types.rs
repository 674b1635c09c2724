use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Inputs {
    pub initial_investment: f64,
    pub monthly_investment: f64,
    pub monthly_returns: Vec<f64>,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthResult {
    pub date: NaiveDate,
    pub total_investment: f64,
    pub total_value: f64,
    pub total_profit: f64,
    pub monthly_profit: f64,
}
