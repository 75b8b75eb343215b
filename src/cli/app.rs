use super::prompt::Prompt;
use chrono::NaiveDateTime;
use cinemadb::{Cinema, RecordStore};
use clap::ValueEnum;
use std::fmt;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Clerk,
    Manager,
    Technician,
    Customer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Clerk, Role::Manager, Role::Technician, Role::Customer];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Clerk => "Ticketing clerk",
            Role::Manager => "Cinema manager",
            Role::Technician => "Technician",
            Role::Customer => "Customer",
        })
    }
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Interactive shell: the main menu and the four role menus.
pub struct App<S: RecordStore, R: BufRead, W: Write> {
    pub(super) cinema: Cinema<S>,
    pub(super) prompt: Prompt<R, W>,
    clock: fn() -> NaiveDateTime,
}

impl<S: RecordStore, R: BufRead, W: Write> App<S, R, W> {
    pub fn new(cinema: Cinema<S>, prompt: Prompt<R, W>) -> Self {
        Self {
            cinema,
            prompt,
            clock: local_now,
        }
    }

    /// Replaces the wall clock; every action reads the time when it runs.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (Cinema<S>, Prompt<R, W>) {
        (self.cinema, self.prompt)
    }

    pub(super) fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub(super) fn currency(&self) -> String {
        self.cinema.config().currency.clone()
    }

    /// Runs until the operator quits or input ends.
    pub fn run(&mut self, role: Option<Role>) -> anyhow::Result<()> {
        let result = match role {
            Some(role) => self.role_menu(role),
            None => self.main_menu(),
        };
        match result {
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
            other => Ok(other?),
        }
    }

    fn main_menu(&mut self) -> io::Result<()> {
        let mut options: Vec<String> = Role::ALL.iter().map(Role::to_string).collect();
        options.push("Quit".to_string());
        loop {
            self.prompt.clear_screen()?;
            self.prompt.heading("Cinema Management System")?;
            let choice = self.prompt.choose("Select role (enter number): ", &options)?;
            let Some(role) = Role::ALL.get(choice).copied() else {
                self.prompt.say("Goodbye.")?;
                return Ok(());
            };
            let label = format!("Confirm role: {}? [Y/N]: ", role.to_string().to_lowercase());
            if self.prompt.yes_no(&label)? {
                self.role_menu(role)?;
            }
        }
    }

    fn role_menu(&mut self, role: Role) -> io::Result<()> {
        match role {
            Role::Clerk => self.clerk_menu(),
            Role::Manager => self.manager_menu(),
            Role::Technician => self.technician_menu(),
            Role::Customer => self.customer_menu(),
        }
    }

    /// Shows a library error and turns it into `None`.
    pub(super) fn attempt<T>(&mut self, result: cinemadb::Result<T>) -> io::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.prompt.report(&err)?;
                Ok(None)
            }
        }
    }

    pub(super) fn try_again(&mut self) -> io::Result<bool> {
        self.prompt.yes_no("Try again? [Y/N]: ")
    }

    /// Prints lines, or a note when there are none.
    pub(super) fn show_all(&mut self, title: &str, lines: Vec<String>) -> io::Result<()> {
        self.prompt.heading(title)?;
        if lines.is_empty() {
            self.prompt.say("No records found.")?;
        }
        for line in lines {
            self.prompt.say(line)?;
        }
        self.prompt.blank()
    }

    /// Runs a role's action menu. `act` gets the chosen index; the last
    /// option always returns to the previous menu.
    pub(super) fn action_menu(
        &mut self,
        title: &str,
        actions: &[&str],
        confirm: bool,
        mut act: impl FnMut(&mut Self, usize) -> io::Result<()>,
    ) -> io::Result<()> {
        loop {
            self.prompt.heading(title)?;
            let choice = self.prompt.choose("Select action (enter number): ", actions)?;
            if choice + 1 == actions.len() {
                return Ok(());
            }
            if confirm {
                let label = format!("Confirm action: {}? [Y/N]: ", actions[choice].to_lowercase());
                if !self.prompt.yes_no(&label)? {
                    continue;
                }
            }
            self.prompt.clear_screen()?;
            act(self, choice)?;
        }
    }
}

/// Splits operator input on commas or `|`.
pub(super) fn split_input(text: &str) -> Vec<String> {
    text.split([',', '|'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
