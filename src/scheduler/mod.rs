//! Auditorium availability.
//!
//! The scheduler is a pure function over already-loaded showtimes and
//! maintenance records. It never touches the store and never fails: an empty
//! result is the caller's cue to report that no auditorium is free.
//!
//! Showtimes are compared as calendar spans, so a show that runs past midnight
//! conflicts with an early show on the next day in the same auditorium.

use crate::config::{MaintenanceRule, SchedulingConfig};
use crate::core::Slot;
use crate::models::{MaintenanceRecord, Showtime};
use chrono::{Duration, NaiveDateTime};
use log::debug;
use std::fmt;

/// Why an auditorium was left out.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockReason {
    /// Another showtime is too close to the candidate slot.
    Showtime { showtime_id: String, slot: Slot },
    /// Equipment is under maintenance during the candidate slot.
    Maintenance { equipment: String, repair_done: Option<NaiveDateTime> },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::Showtime { showtime_id, slot } => write!(
                f,
                "showtime {} runs {} to {}",
                showtime_id,
                slot.start.format("%d-%m-%Y %H%M"),
                slot.end.format("%H%M")
            ),
            BlockReason::Maintenance { equipment, repair_done: Some(done) } => write!(
                f,
                "{} under maintenance until {}",
                equipment,
                done.format("%d-%m-%Y %I:%M%p")
            ),
            BlockReason::Maintenance { equipment, repair_done: None } => {
                write!(f, "{} under maintenance", equipment)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blocked {
    pub auditorium_id: String,
    pub reason: BlockReason,
}

/// Result of an availability check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Availability {
    /// Free auditoriums in configured order
    pub available: Vec<String>,

    /// Every conflict found; an auditorium may appear more than once
    pub blocked: Vec<Blocked>,
}

impl Availability {
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    pub fn is_available(&self, auditorium_id: &str) -> bool {
        self.available.iter().any(|id| id == auditorium_id)
    }
}

/// Auditoriums free for `slot`, in the order of `config.auditorium_ids`.
///
/// `exclude_showtime` names a showtime being edited; it never conflicts with
/// its own new slot.
pub fn available_auditoriums(
    slot: &Slot,
    exclude_showtime: Option<&str>,
    showtimes: &[Showtime],
    maintenance: &[MaintenanceRecord],
    config: &SchedulingConfig,
) -> Vec<String> {
    check_availability(slot, exclude_showtime, showtimes, maintenance, config).available
}

/// Like [`available_auditoriums`] but also reports what blocked the rest.
pub fn check_availability(
    slot: &Slot,
    exclude_showtime: Option<&str>,
    showtimes: &[Showtime],
    maintenance: &[MaintenanceRecord],
    config: &SchedulingConfig,
) -> Availability {
    let buffer = config.buffer();
    let mut blocked = Vec::new();

    for showtime in showtimes {
        if exclude_showtime == Some(showtime.id.as_str()) {
            continue;
        }
        let existing = showtime.slot();
        if slot.overlaps(&existing, buffer) {
            debug!(
                "{} blocked by showtime {} ({} - {})",
                showtime.auditorium_id, showtime.id, existing.start, existing.end
            );
            blocked.push(Blocked {
                auditorium_id: showtime.auditorium_id.clone(),
                reason: BlockReason::Showtime {
                    showtime_id: showtime.id.clone(),
                    slot: existing,
                },
            });
        }
    }

    for record in maintenance.iter().filter(|r| r.is_under_maintenance()) {
        if maintenance_blocks(record, slot, buffer, config.maintenance_rule) {
            debug!(
                "{} blocked by {} maintenance until {:?}",
                record.auditorium_id, record.equipment, record.repair_done
            );
            blocked.push(Blocked {
                auditorium_id: record.auditorium_id.clone(),
                reason: BlockReason::Maintenance {
                    equipment: record.equipment.to_string(),
                    repair_done: record.repair_done,
                },
            });
        }
    }

    let available: Vec<String> = config
        .auditorium_ids
        .iter()
        .filter(|id| !blocked.iter().any(|b| &b.auditorium_id == *id))
        .cloned()
        .collect();

    debug!(
        "Slot {} - {}: {} of {} auditorium(s) free",
        slot.start,
        slot.end,
        available.len(),
        config.auditorium_ids.len()
    );
    Availability { available, blocked }
}

/// Whether an Under Maintenance record makes its auditorium unusable for `slot`.
///
/// A record without a completion timestamp blocks every slot.
pub fn maintenance_blocks(
    record: &MaintenanceRecord,
    slot: &Slot,
    buffer: Duration,
    rule: MaintenanceRule,
) -> bool {
    let Some(done) = record.repair_done else {
        return true;
    };
    match rule {
        MaintenanceRule::CompletionOnly => {
            let candidate_date = slot.date();
            done.date() > candidate_date || (done.date() == candidate_date && done > slot.end)
        }
        MaintenanceRule::FullWindow => {
            let start = record.repair_start.unwrap_or(NaiveDateTime::MIN);
            slot.overlaps(&Slot::new(start, done), buffer)
        }
    }
}
