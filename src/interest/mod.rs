pub mod compound;
pub mod reinvest;
pub mod simple;

use crate::calendar::CalendarDay;
use crate::errors::Result;
use crate::state::ProjectionState;

pub use compound::{CompoundAccrual, CompoundingEngine, CompoundingFrequency};
pub use reinvest::ReinvestingAccrual;
pub use simple::{simple_interest, SimpleAccrual};

/// trait for the per-mode balance models driven by the projection walk
pub trait AccrualModel {
    /// advance the model by one calendar day
    fn accrue_day(&mut self, day: &CalendarDay) -> Result<()>;

    /// bring the state up to date with every day accrued so far
    fn settle(&mut self) -> Result<&ProjectionState>;

    /// short description used in logs and views
    fn calculation_method(&self) -> &'static str;
}
