use super::optional;
use crate::core::time::{format_repair_timestamp, parse_repair_timestamp};
use crate::core::{CinemaError, Result};
use crate::storage::record::field;
use crate::storage::{Record, Row, Table};
use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equipment {
    Projector,
    Audio,
    AirConditioning,
}

impl Equipment {
    pub const ALL: [Equipment; 3] = [Equipment::Projector, Equipment::Audio, Equipment::AirConditioning];

    pub fn as_str(self) -> &'static str {
        match self {
            Equipment::Projector => "Projector",
            Equipment::Audio => "Audio",
            Equipment::AirConditioning => "Air Conditioning",
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(text))
            .ok_or_else(|| CinemaError::Format(format!("unknown equipment '{}'", text)))
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentStatus {
    Ready,
    UnderMaintenance,
}

impl EquipmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentStatus::Ready => "READY",
            EquipmentStatus::UnderMaintenance => "Under Maintenance",
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        match text.trim() {
            t if t.eq_ignore_ascii_case("READY") => Ok(EquipmentStatus::Ready),
            t if t.eq_ignore_ascii_case("Under Maintenance") => Ok(EquipmentStatus::UnderMaintenance),
            other => Err(CinemaError::Format(format!("unknown equipment status '{}'", other))),
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment state for one auditorium. Keyed by (auditorium, equipment).
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRecord {
    pub auditorium_id: String,
    pub equipment: Equipment,
    pub status: EquipmentStatus,
    pub repair_start: Option<NaiveDateTime>,
    pub repair_done: Option<NaiveDateTime>,
}

impl MaintenanceRecord {
    pub fn ready(auditorium_id: impl Into<String>, equipment: Equipment) -> Self {
        Self {
            auditorium_id: auditorium_id.into(),
            equipment,
            status: EquipmentStatus::Ready,
            repair_start: None,
            repair_done: None,
        }
    }

    pub fn under_maintenance(
        auditorium_id: impl Into<String>,
        equipment: Equipment,
        repair_start: NaiveDateTime,
        repair_done: NaiveDateTime,
    ) -> Self {
        Self {
            auditorium_id: auditorium_id.into(),
            equipment,
            status: EquipmentStatus::UnderMaintenance,
            repair_start: Some(repair_start),
            repair_done: Some(repair_done),
        }
    }

    pub fn is_under_maintenance(&self) -> bool {
        self.status == EquipmentStatus::UnderMaintenance
    }

    pub fn matches(&self, auditorium_id: &str, equipment: Equipment) -> bool {
        self.auditorium_id == auditorium_id && self.equipment == equipment
    }
}

fn parse_timestamp(text: &str) -> Result<Option<NaiveDateTime>> {
    optional(text).map(|t| parse_repair_timestamp(&t)).transpose()
}

impl Record for MaintenanceRecord {
    const TABLE: Table = Table::Maintenance;
    const KIND: &'static str = "maintenance record";

    fn from_fields(fields: &[String]) -> Result<Self> {
        let get = |i| field(fields, Self::TABLE, i);
        // READY rows are written with empty trailing columns.
        let get_or_empty = |i| fields.get(i).map(String::as_str).unwrap_or("");
        Ok(Self {
            auditorium_id: get(0)?.to_string(),
            equipment: Equipment::parse(get(1)?)?,
            status: EquipmentStatus::parse(get(2)?)?,
            repair_start: parse_timestamp(get_or_empty(3))?,
            repair_done: parse_timestamp(get_or_empty(4))?,
        })
    }

    fn to_fields(&self) -> Row {
        let stamp = |at: Option<NaiveDateTime>| at.map(format_repair_timestamp).unwrap_or_default();
        vec![
            self.auditorium_id.clone(),
            self.equipment.to_string(),
            self.status.to_string(),
            stamp(self.repair_start),
            stamp(self.repair_done),
        ]
    }

    /// Auditorium id; a table holds one row per equipment kind for it.
    fn id(&self) -> &str {
        &self.auditorium_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::codec::{format_row, split_line};

    #[test]
    fn test_parse_source_style_rows() {
        let ready = MaintenanceRecord::from_fields(&split_line("AUD3, Air Conditioning, READY, , ")).unwrap();
        assert_eq!(ready, MaintenanceRecord::ready("AUD3", Equipment::AirConditioning));

        let busy = MaintenanceRecord::from_fields(&split_line(
            "AUD01, Projector, Under Maintenance, \"05-06-2030 08:00AM\", \"05-06-2030 10:30AM\"",
        ))
        .unwrap();
        assert!(busy.is_under_maintenance());
        assert_eq!(
            busy.repair_done,
            Some(parse_repair_timestamp("05-06-2030 10:30AM").unwrap())
        );
    }

    #[test]
    fn test_record_survives_codec() {
        let record = MaintenanceRecord::under_maintenance(
            "AUD02",
            Equipment::Audio,
            parse_repair_timestamp("05-06-2030 11:00PM").unwrap(),
            parse_repair_timestamp("06-06-2030 01:00AM").unwrap(),
        );
        let line = format_row(&record.to_fields());
        assert_eq!(MaintenanceRecord::from_fields(&split_line(&line)).unwrap(), record);
    }

    #[test]
    fn test_unknown_equipment_is_rejected() {
        assert!(Equipment::parse("Popcorn machine").is_err());
        assert_eq!(Equipment::parse("audio").unwrap(), Equipment::Audio);
    }
}
