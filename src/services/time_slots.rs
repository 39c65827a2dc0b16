use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::models::appointment::{AvailableTimeSlot, ScheduledAppointment};

const SLOT_MINUTES: i64 = 30;
const DAYS_SHOWN: i64 = 7;

/// Opening hours, as whole hours of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalonHours {
    pub opens_at: u32,
    pub closes_at: u32,
}

impl Default for SalonHours {
    fn default() -> Self {
        Self {
            opens_at: 9,
            closes_at: 19,
        }
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Services offered and which stylists can perform them
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    pub services: Vec<String>,
    pub stylists: Vec<String>,
    service_stylists: HashMap<String, Vec<String>>,
}

impl ServiceCatalog {
    pub fn new(
        services: Vec<String>,
        stylists: Vec<String>,
        service_stylists: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            services,
            stylists,
            service_stylists,
        }
    }

    pub fn salon() -> Self {
        let everyone = ["Ashley", "Jo", "Pat", "Sam"];

        let service_stylists = HashMap::from([
            ("Cut".to_string(), owned(&everyone)),
            ("Blow-dry".to_string(), owned(&everyone)),
            ("Cut & color".to_string(), owned(&["Ashley", "Jo"])),
            ("Beard trim".to_string(), owned(&["Pat", "Sam"])),
            ("Cut & beard trim".to_string(), owned(&["Pat", "Sam"])),
            ("Extensions".to_string(), owned(&["Ashley", "Pat"])),
        ]);

        Self::new(
            owned(&[
                "Cut",
                "Blow-dry",
                "Cut & color",
                "Beard trim",
                "Cut & beard trim",
                "Extensions",
            ]),
            owned(&everyone),
            service_stylists,
        )
    }

    /// Stylists able to perform the service; every stylist when the service
    /// is blank or has no restriction
    pub fn stylists_for(&self, service: &str) -> Vec<String> {
        match self.service_stylists.get(service) {
            Some(stylists) => self
                .stylists
                .iter()
                .filter(|stylist| stylists.contains(*stylist))
                .cloned()
                .collect(),
            None => self.stylists.clone(),
        }
    }
}

/// Start times of every half-hour slot between opening and closing
pub fn daily_time_slots(hours: SalonHours) -> Vec<NaiveTime> {
    let Some(open) = NaiveTime::from_hms_opt(hours.opens_at, 0, 0) else {
        return Vec::new();
    };
    let total_minutes = (i64::from(hours.closes_at) - i64::from(hours.opens_at)) * 60;
    if total_minutes <= 0 {
        return Vec::new();
    }

    (0..total_minutes / SLOT_MINUTES)
        .map(|i| open + Duration::minutes(i * SLOT_MINUTES))
        .collect()
}

/// `today` and the six days after it
pub fn week_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (0..DAYS_SHOWN).map(|i| today + Duration::days(i)).collect()
}

/// Milliseconds since the epoch for a date and time in UTC
pub fn slot_timestamp(date: NaiveDate, time: NaiveTime) -> i64 {
    date.and_time(time).and_utc().timestamp_millis()
}

/// Start and end of a day in milliseconds, for the day view
pub fn day_bounds(date: NaiveDate) -> (i64, i64) {
    let start = slot_timestamp(date, NaiveTime::default());
    let end = start + Duration::days(1).num_milliseconds() - 1;
    (start, end)
}

pub fn sort_by_start(mut appointments: Vec<ScheduledAppointment>) -> Vec<ScheduledAppointment> {
    appointments.sort_by_key(|appointment| appointment.starts_at);
    appointments
}

fn is_available(available: &[AvailableTimeSlot], starts_at: i64, stylist: &str) -> bool {
    available.iter().any(|slot| {
        slot.starts_at == starts_at
            && (stylist.is_empty() || slot.stylists.iter().any(|s| s == stylist))
    })
}

/// Week of selectable slots. Each row is one time of day; each cell holds the
/// slot's start time when it can be booked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotGrid {
    pub dates: Vec<NaiveDate>,
    pub times: Vec<String>,
    pub rows: Vec<Vec<Option<i64>>>,
    pub stylists: Vec<String>,
}

pub fn build_grid(
    today: NaiveDate,
    hours: SalonHours,
    available: &[AvailableTimeSlot],
    catalog: &ServiceCatalog,
    service: &str,
    stylist: &str,
) -> TimeSlotGrid {
    let dates = week_dates(today);
    let times = daily_time_slots(hours);

    let rows = times
        .iter()
        .map(|time| {
            dates
                .iter()
                .map(|date| {
                    let starts_at = slot_timestamp(*date, *time);
                    is_available(available, starts_at, stylist).then_some(starts_at)
                })
                .collect()
        })
        .collect();

    debug!(
        "Built time slot grid for {} days, {} slots a day",
        dates.len(),
        times.len()
    );

    TimeSlotGrid {
        times: times.iter().map(|t| t.format("%H:%M").to_string()).collect(),
        dates,
        rows,
        stylists: catalog.stylists_for(service),
    }
}

#[cfg(test)]
#[path = "time_slots_test.rs"]
mod time_slots_test;
