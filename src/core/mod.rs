mod engine;
mod types;

pub use engine::{period_date, run_simulation};
pub use types::{Inputs, MonthResult};
