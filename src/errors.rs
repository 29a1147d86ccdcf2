use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("invalid amount for {field}: {amount}")]
    InvalidAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("reinvest rate must be between 0% and 100%, got {rate}")]
    InvalidReinvestRate {
        rate: Rate,
    },

    #[error("projection span too long: {days} days exceeds maximum {max_days}")]
    SpanTooLong {
        days: u64,
        max_days: u32,
    },

    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid calculator form: {0}")]
    InvalidForm(#[from] serde_json::Error),

    #[error("balance overflow on day {day} of the projection")]
    Overflow {
        day: u32,
    },
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
