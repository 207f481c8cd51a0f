use chrono::Local;
use gloo_timers::callback::Interval;
use log::info;
use yew::prelude::*;

use crate::config;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until the event, split into display units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Splits a non-negative distance in milliseconds. Negative distances mean
    /// the event has started and yield `None`.
    pub fn from_millis(distance: i64) -> Option<Self> {
        if distance < 0 {
            return None;
        }
        Some(Self {
            days: distance / MS_PER_DAY,
            hours: (distance % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance % MS_PER_MINUTE) / MS_PER_SECOND,
        })
    }

    pub fn padded(&self) -> [String; 4] {
        [
            pad(self.days),
            pad(self.hours),
            pad(self.minutes),
            pad(self.seconds),
        ]
    }
}

pub fn pad(value: i64) -> String {
    format!("{:02}", value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownDisplay {
    Running(Remaining),
    Finished,
}

/// What the countdown shows at `now_ms`. A missing target counts as finished.
pub fn display_at(target_ms: Option<i64>, now_ms: i64) -> CountdownDisplay {
    target_ms
        .and_then(|target| Remaining::from_millis(target - now_ms))
        .map_or(CountdownDisplay::Finished, CountdownDisplay::Running)
}

fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

const UNITS: [(&str, &str); 4] = [
    ("days", "Days"),
    ("hours", "Hours"),
    ("minutes", "Minutes"),
    ("seconds", "Seconds"),
];

#[function_component(Countdown)]
pub fn countdown() -> Html {
    let display = use_state_eq(|| display_at(config::event_start_millis(), now_millis()));
    let finished = *display == CountdownDisplay::Finished;

    {
        let display = display.clone();
        use_effect_with_deps(
            move |finished| {
                // Once finished there is nothing left to tick; the handle from
                // the previous run is dropped by its cleanup.
                let interval = (!*finished).then(|| {
                    Interval::new(1_000, move || {
                        let next = display_at(config::event_start_millis(), now_millis());
                        if next == CountdownDisplay::Finished {
                            info!("Countdown reached zero, stopping updates");
                        }
                        display.set(next);
                    })
                });
                move || drop(interval)
            },
            finished,
        );
    }

    html! {
        <div class="countdown">
            {
                match *display {
                    CountdownDisplay::Running(remaining) => {
                        let values = remaining.padded();
                        html! {
                            <>
                                { for UNITS.iter().zip(values.iter()).map(|((id, label), value)| html! {
                                    <div class="countdown-item">
                                        <span id={*id} class="countdown-value">{value.clone()}</span>
                                        <span class="countdown-label">{*label}</span>
                                    </div>
                                }) }
                            </>
                        }
                    }
                    CountdownDisplay::Finished => html! {
                        <div class="event-started">{"The event has started!"}</div>
                    },
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_distance_into_units() {
        let distance = 3 * MS_PER_DAY + 4 * MS_PER_HOUR + 5 * MS_PER_MINUTE + 6 * MS_PER_SECOND + 999;
        assert_eq!(
            Remaining::from_millis(distance),
            Some(Remaining {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            })
        );
    }

    #[test]
    fn values_are_zero_padded() {
        let remaining = Remaining::from_millis(MS_PER_DAY + 9 * MS_PER_SECOND).unwrap();
        assert_eq!(remaining.padded(), ["01", "00", "00", "09"].map(String::from));
        assert_eq!(pad(123), "123");
    }

    #[test]
    fn zero_distance_is_still_running() {
        assert_eq!(
            display_at(Some(10_000), 10_000),
            CountdownDisplay::Running(Remaining {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0
            })
        );
    }

    #[test]
    fn negative_distance_is_finished() {
        assert_eq!(display_at(Some(10_000), 10_001), CountdownDisplay::Finished);
        assert_eq!(Remaining::from_millis(-1), None);
    }

    #[test]
    fn missing_target_is_finished() {
        assert_eq!(display_at(None, 0), CountdownDisplay::Finished);
    }

    #[test]
    fn sub_second_remainder_floors() {
        let remaining = Remaining::from_millis(59_999).unwrap();
        assert_eq!(remaining.minutes, 0);
        assert_eq!(remaining.seconds, 59);
    }
}
