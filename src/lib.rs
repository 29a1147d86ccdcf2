pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod form;
pub mod interest;
pub mod projection;
pub mod serialization;
pub mod state;
pub mod types;

// re-export key types
pub use calendar::{TradingDayPolicy, WeekdaySet};
pub use config::{CalculationMode, ProjectionInput, Span};
pub use decimal::{Money, Rate};
pub use errors::{ProjectionError, Result};
pub use form::ProjectionForm;
pub use interest::{CompoundingEngine, CompoundingFrequency};
pub use projection::{project, try_project, ProjectionBuilder};
pub use serialization::ProjectionView;
pub use types::{
    ContributionFrequency, ContributionPlan, ContributionSchedule, ProjectionResult, SeriesPoint,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
