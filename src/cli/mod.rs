pub mod app;
mod clerk;
mod customer;
mod manager;
pub mod prompt;
mod technician;
pub mod ui;

pub use app::{App, Role};
pub use prompt::Prompt;
