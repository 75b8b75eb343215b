use super::Cinema;
use crate::core::time::format_repair_timestamp;
use crate::core::{CinemaError, Result};
use crate::models::{Equipment, EquipmentStatus, MaintenanceRecord};
use crate::storage::{RecordStore, RecordStoreExt};
use chrono::{Duration, NaiveDateTime};
use log::info;

impl<S: RecordStore> Cinema<S> {
    /// Marks equipment as under maintenance from `start` for `duration`.
    ///
    /// Replaces any earlier record for the same auditorium and equipment.
    pub fn report_issue(
        &mut self,
        auditorium_id: &str,
        equipment: Equipment,
        start: NaiveDateTime,
        duration: Duration,
    ) -> Result<MaintenanceRecord> {
        self.check_known_auditorium(auditorium_id)?;
        if duration <= Duration::zero() {
            return Err(CinemaError::InvalidInput("repair duration must be positive".into()));
        }
        let record = MaintenanceRecord::under_maintenance(auditorium_id, equipment, start, start + duration);

        let mut records = self.maintenance_records()?;
        match records.iter_mut().find(|r| r.matches(auditorium_id, equipment)) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.store.save_all(&records)?;
        info!(
            "{} {} under maintenance until {}",
            auditorium_id,
            equipment,
            record.repair_done.map(format_repair_timestamp).unwrap_or_default()
        );
        Ok(record)
    }

    /// One entry per equipment kind; kinds without a record are READY.
    pub fn auditorium_status(&self, auditorium_id: &str) -> Result<Vec<MaintenanceRecord>> {
        self.check_known_auditorium(auditorium_id)?;
        let records = self.maintenance_records()?;
        Ok(Equipment::ALL
            .into_iter()
            .map(|equipment| {
                records
                    .iter()
                    .find(|r| r.matches(auditorium_id, equipment))
                    .cloned()
                    .unwrap_or_else(|| MaintenanceRecord::ready(auditorium_id, equipment))
            })
            .collect())
    }

    /// Sets an equipment record back to READY.
    ///
    /// Returns `false` when it already was READY.
    pub fn resolve_issue(&mut self, auditorium_id: &str, equipment: Equipment) -> Result<bool> {
        let mut records = self.maintenance_records()?;
        let record = records
            .iter_mut()
            .find(|r| r.matches(auditorium_id, equipment))
            .ok_or_else(|| {
                CinemaError::not_found("maintenance record", format!("{} {}", auditorium_id, equipment))
            })?;
        if record.status == EquipmentStatus::Ready {
            return Ok(false);
        }
        record.status = EquipmentStatus::Ready;
        self.store.save_all(&records)?;
        info!("{} {} marked READY", auditorium_id, equipment);
        Ok(true)
    }

    /// Rewrites the maintenance table with every equipment of every auditorium READY.
    pub fn reset_all_equipment(&mut self) -> Result<usize> {
        let records: Vec<MaintenanceRecord> = self
            .config
            .scheduling
            .auditorium_ids
            .iter()
            .flat_map(|id| Equipment::ALL.into_iter().map(move |e| MaintenanceRecord::ready(id.clone(), e)))
            .collect();
        self.store.save_all(&records)?;
        info!("All equipment reset to READY ({} records)", records.len());
        Ok(records.len())
    }

    pub fn maintenance_records(&self) -> Result<Vec<MaintenanceRecord>> {
        self.store.load_all_or_empty()
    }

    fn check_known_auditorium(&self, auditorium_id: &str) -> Result<()> {
        if self.config.scheduling.auditorium_ids.iter().any(|id| id == auditorium_id) {
            Ok(())
        } else {
            Err(CinemaError::not_found("auditorium", auditorium_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::testing::{at, cinema};

    #[test]
    fn test_report_rolls_over_midnight_and_upserts() {
        let mut cinema = cinema();
        let record = cinema
            .report_issue("AUD01", Equipment::Audio, at("05-06-2030", "2300"), Duration::minutes(150))
            .unwrap();
        assert_eq!(record.repair_done, Some(at("06-06-2030", "0130")));

        cinema
            .report_issue("AUD01", Equipment::Audio, at("07-06-2030", "0900"), Duration::hours(1))
            .unwrap();
        let records = cinema.maintenance_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].repair_start, Some(at("07-06-2030", "0900")));
    }

    #[test]
    fn test_status_defaults_to_ready() {
        let mut cinema = cinema();
        cinema
            .report_issue("AUD02", Equipment::Projector, at("05-06-2030", "0800"), Duration::hours(2))
            .unwrap();
        let status = cinema.auditorium_status("AUD02").unwrap();
        assert_eq!(status.len(), 3);
        assert!(status[0].is_under_maintenance());
        assert_eq!(status[1].status, EquipmentStatus::Ready);
        assert!(cinema.auditorium_status("AUD99").is_err());
    }

    #[test]
    fn test_resolve_and_reset() {
        let mut cinema = cinema();
        assert!(matches!(
            cinema.resolve_issue("AUD03", Equipment::Audio),
            Err(CinemaError::NotFound { .. })
        ));
        cinema
            .report_issue("AUD03", Equipment::Audio, at("05-06-2030", "0800"), Duration::hours(2))
            .unwrap();
        assert!(cinema.resolve_issue("AUD03", Equipment::Audio).unwrap());
        assert!(!cinema.resolve_issue("AUD03", Equipment::Audio).unwrap());

        assert_eq!(cinema.reset_all_equipment().unwrap(), 24);
        assert!(cinema.maintenance_records().unwrap().iter().all(|r| !r.is_under_maintenance()));
    }
}
