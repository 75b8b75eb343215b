use super::app::App;
use super::ui;
use cinemadb::RecordStore;
use cinemadb::core::time::{
    format_date, format_repair_timestamp, parse_date, parse_duration, parse_repair_timestamp,
};
use cinemadb::models::Equipment;
use std::io::{self, BufRead, Write};

const ACTIONS: [&str; 6] = [
    "Report equipment issue",
    "View auditorium status",
    "Mark issue resolved",
    "Reset all equipment",
    "View movie listings",
    "Back",
];

impl<S: RecordStore, R: BufRead, W: Write> App<S, R, W> {
    pub(super) fn technician_menu(&mut self) -> io::Result<()> {
        self.action_menu("Technician", &ACTIONS, false, |app, choice| match choice {
            0 => app.report_issue(),
            1 => app.auditorium_status(),
            2 => app.resolve_issue(),
            3 => app.reset_all_equipment(),
            _ => app.view_movies(),
        })
    }

    fn report_issue(&mut self) -> io::Result<()> {
        let auditorium = self.choose_configured_auditorium()?;
        let equipment = self.choose_equipment()?;
        let date = self.prompt.ask("Enter repair start date (DD-MM-YYYY): ", parse_date)?;
        let start = self.prompt.ask("Enter repair start time (eg. 08:00AM): ", |clock| {
            parse_repair_timestamp(&format!("{} {}", format_date(date), clock))
        })?;
        let duration = self.prompt.ask("Enter estimated duration (eg. 2h 30m): ", parse_duration)?;

        let result = self.cinema.report_issue(&auditorium, equipment, start, duration);
        if let Some(record) = self.attempt(result)? {
            let done = record.repair_done.map(format_repair_timestamp).unwrap_or_default();
            self.prompt.success(format!(
                "{} in {} under maintenance until {}.",
                equipment, auditorium, done
            ))?;
        }
        Ok(())
    }

    fn auditorium_status(&mut self) -> io::Result<()> {
        let auditorium = self.choose_configured_auditorium()?;
        let Some(records) = self.attempt(self.cinema.auditorium_status(&auditorium))? else {
            return Ok(());
        };
        self.show_all(
            &format!("{} equipment", auditorium),
            records.iter().map(ui::equipment_line).collect(),
        )
    }

    fn resolve_issue(&mut self) -> io::Result<()> {
        let auditorium = self.choose_configured_auditorium()?;
        let equipment = self.choose_equipment()?;
        let result = self.cinema.resolve_issue(&auditorium, equipment);
        match self.attempt(result)? {
            Some(true) => self.prompt.success(format!("{} in {} is READY.", equipment, auditorium)),
            Some(false) => self.prompt.say(format!("{} in {} was already READY.", equipment, auditorium)),
            None => Ok(()),
        }
    }

    fn reset_all_equipment(&mut self) -> io::Result<()> {
        if !self.prompt.yes_no("Set every equipment record to READY? [Y/N]: ")? {
            return Ok(());
        }
        let result = self.cinema.reset_all_equipment();
        if let Some(count) = self.attempt(result)? {
            self.prompt.success(format!("{} equipment records reset.", count))?;
        }
        Ok(())
    }

    fn choose_configured_auditorium(&mut self) -> io::Result<String> {
        let ids = self.cinema.config().scheduling.auditorium_ids.clone();
        let index = self.prompt.choose("Select auditorium: ", &ids)?;
        Ok(ids[index].clone())
    }

    fn choose_equipment(&mut self) -> io::Result<Equipment> {
        let index = self.prompt.choose("Select equipment: ", &Equipment::ALL)?;
        Ok(Equipment::ALL[index])
    }
}
