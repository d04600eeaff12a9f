//! Labor calendar: one entry per date, driving the piecewise labor cost
//! model (F4).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Labor rules in effect for a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaborDay {
    /// The date this entry applies to.
    pub date: NaiveDate,
    /// Hours paid at `regular_rate` without requiring overtime
    /// authorization. Typically 12 on weekdays, 0 otherwise.
    pub fixed_hours: f64,
    /// Maximum overtime hours available this day.
    pub max_overtime_hours: f64,
    /// Rate applied to hours within `fixed_hours`.
    pub regular_rate: f64,
    /// Rate applied to hours beyond `fixed_hours`, up to `max_overtime_hours`.
    pub overtime_rate: f64,
    /// Rate applied on a non-fixed day (weekends/holidays), including the
    /// minimum-payment floor.
    pub non_fixed_rate: f64,
    /// Whether this date has a standard fixed-hours shift at all.
    pub is_fixed_day: bool,
    /// Minimum hours paid on a non-fixed day if any production occurs.
    pub min_payment_hours: f64,
}

impl LaborDay {
    /// A typical weekday: 12 fixed hours, 2 hours of available overtime.
    pub fn weekday(date: NaiveDate, regular_rate: f64, overtime_rate: f64) -> Self {
        Self {
            date,
            fixed_hours: 12.0,
            max_overtime_hours: 2.0,
            regular_rate,
            overtime_rate,
            non_fixed_rate: 0.0,
            is_fixed_day: true,
            min_payment_hours: 0.0,
        }
    }

    /// A non-fixed day (e.g. weekend): no regular shift, a minimum-payment
    /// floor if any production occurs.
    pub fn non_fixed(date: NaiveDate, non_fixed_rate: f64, min_payment_hours: f64) -> Self {
        Self {
            date,
            fixed_hours: 0.0,
            max_overtime_hours: 0.0,
            regular_rate: 0.0,
            overtime_rate: 0.0,
            non_fixed_rate,
            is_fixed_day: false,
            min_payment_hours,
        }
    }

    /// Maximum total hours this day can legally be staffed for (F3).
    pub fn max_daily_hours(&self) -> f64 {
        self.fixed_hours + self.max_overtime_hours
    }
}
