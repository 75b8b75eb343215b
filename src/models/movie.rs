use super::{parse_count, parse_yes_no, yes_no};
use crate::core::time::{format_date, parse_date};
use crate::core::{CinemaError, Result, join_list, split_list};
use crate::storage::record::field;
use crate::storage::{Record, Row, Table};
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    U,
    P12,
    Thirteen,
    Sixteen,
    EighteenPlus,
    EighteenSg,
    EighteenSx,
}

impl Classification {
    pub const ALL: [Classification; 7] = [
        Classification::U,
        Classification::P12,
        Classification::Thirteen,
        Classification::Sixteen,
        Classification::EighteenPlus,
        Classification::EighteenSg,
        Classification::EighteenSx,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::U => "U",
            Classification::P12 => "P12",
            Classification::Thirteen => "13",
            Classification::Sixteen => "16",
            Classification::EighteenPlus => "18+",
            Classification::EighteenSg => "18SG",
            Classification::EighteenSx => "18SX",
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == text)
            .ok_or_else(|| CinemaError::Format(format!("unknown classification '{}'", text)))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: String,
    pub name: String,
    pub release_date: NaiveDate,
    pub running_time: u32,
    pub genres: Vec<String>,
    pub classification: Classification,
    pub spoken_language: String,
    pub subtitle_languages: Vec<String>,
    pub directors: Vec<String>,
    pub cast: Vec<String>,
    pub description: String,
    pub discount_eligible: bool,
}

impl Record for Movie {
    const TABLE: Table = Table::Movies;
    const KIND: &'static str = "movie";

    fn from_fields(fields: &[String]) -> Result<Self> {
        let get = |i| field(fields, Self::TABLE, i);
        Ok(Self {
            id: get(0)?.to_string(),
            name: get(1)?.to_string(),
            release_date: parse_date(get(2)?)?,
            running_time: parse_count(get(3)?, "running time")?,
            genres: split_list(get(4)?),
            classification: Classification::parse(get(5)?)?,
            spoken_language: get(6)?.to_string(),
            subtitle_languages: split_list(get(7)?),
            directors: split_list(get(8)?),
            cast: split_list(get(9)?),
            description: get(10)?.to_string(),
            discount_eligible: parse_yes_no(get(11)?)?,
        })
    }

    fn to_fields(&self) -> Row {
        vec![
            self.id.clone(),
            self.name.clone(),
            format_date(self.release_date),
            self.running_time.to_string(),
            join_list(&self.genres),
            self.classification.to_string(),
            self.spoken_language.clone(),
            join_list(&self.subtitle_languages),
            join_list(&self.directors),
            join_list(&self.cast),
            self.description.clone(),
            yes_no(self.discount_eligible),
        ]
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// An editable movie attribute together with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieField {
    Name(String),
    ReleaseDate(NaiveDate),
    RunningTime(u32),
    Genres(Vec<String>),
    Classification(Classification),
    SpokenLanguage(String),
    SubtitleLanguages(Vec<String>),
    Directors(Vec<String>),
    Cast(Vec<String>),
    Description(String),
    DiscountEligible(bool),
}

impl MovieField {
    pub const LABELS: [&'static str; 11] = [
        "Movie name",
        "Release date",
        "Running time",
        "Genres",
        "Classification",
        "Spoken language",
        "Subtitle languages",
        "Directors",
        "Cast",
        "Description",
        "Eligibility for discount",
    ];

    pub fn apply(self, movie: &mut Movie) {
        match self {
            MovieField::Name(v) => movie.name = v,
            MovieField::ReleaseDate(v) => movie.release_date = v,
            MovieField::RunningTime(v) => movie.running_time = v,
            MovieField::Genres(v) => movie.genres = v,
            MovieField::Classification(v) => movie.classification = v,
            MovieField::SpokenLanguage(v) => movie.spoken_language = v,
            MovieField::SubtitleLanguages(v) => movie.subtitle_languages = v,
            MovieField::Directors(v) => movie.directors = v,
            MovieField::Cast(v) => movie.cast = v,
            MovieField::Description(v) => movie.description = v,
            MovieField::DiscountEligible(v) => movie.discount_eligible = v,
        }
    }
}
