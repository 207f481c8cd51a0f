use chrono::{Local, TimeZone};
use log::Level;

pub const EVENT_NAME: &str = "SpaceTech Hackathon";

// Simulated registration round trip.
pub const SUBMIT_DELAY_MS: u32 = 2_000;

pub const NEWSLETTER_SUCCESS_RESET_MS: u32 = 3_000;
pub const NEWSLETTER_ERROR_RESET_MS: u32 = 2_000;

/// Scroll distance after which the header switches to its compact look.
pub const HEADER_SCROLLED_AT: f64 = 50.0;

/// How far above a section its nav link is already considered current.
pub const NAV_SECTION_OFFSET: f64 = 100.0;

pub const FAQ_ANSWER_MAX_HEIGHT_PX: f64 = 300.0;

/// Event start in the visitor's local time, as epoch milliseconds.
pub fn event_start_millis() -> Option<i64> {
    Local
        .with_ymd_and_hms(2025, 8, 13, 10, 0, 0)
        .earliest()
        .map(|start| start.timestamp_millis())
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
