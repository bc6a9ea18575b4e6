//! HTTP handlers for the WanderWise pages and JSON API

pub mod health;
pub mod openapi;
pub mod pages;
pub mod plans;

use chrono::NaiveDate;

/// The server's local calendar date; trip dates must lie after it
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
