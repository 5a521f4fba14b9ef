pub mod currency;
mod errors;
mod schedule;

pub use errors::{CurrencyError, ScheduleError};
pub use schedule::{TIER_COUNT, Tier, out_of_dept_rate, service_plan_rate};

pub type TransactionNumber = String;
