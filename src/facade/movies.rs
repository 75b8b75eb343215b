use super::Cinema;
use crate::core::{CinemaError, Result};
use crate::models::{Classification, Movie, MovieField};
use crate::storage::{IdKind, RecordStore, RecordStoreExt, next_id};
use chrono::NaiveDate;
use log::info;

/// Details of a movie to be listed; the id is generated on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
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

impl<S: RecordStore> Cinema<S> {
    pub fn list_movies(&self) -> Result<Vec<Movie>> {
        self.store.load_all_or_empty()
    }

    pub fn movie(&self, id: &str) -> Result<Movie> {
        self.store.get(id)
    }

    pub fn add_movie(&mut self, new: NewMovie) -> Result<Movie> {
        self.check_movie_name(&new.name)?;
        self.check_running_time(new.running_time)?;

        let movie = Movie {
            id: next_id(&mut self.store, IdKind::Movie)?,
            name: new.name.trim().to_string(),
            release_date: new.release_date,
            running_time: new.running_time,
            genres: new.genres,
            classification: new.classification,
            spoken_language: new.spoken_language,
            subtitle_languages: new.subtitle_languages,
            directors: new.directors,
            cast: new.cast,
            description: new.description,
            discount_eligible: new.discount_eligible,
        };
        self.store.insert(&movie)?;
        info!("Movie {} ({}) added", movie.id, movie.name);
        Ok(movie)
    }

    /// Changes one attribute of a movie.
    ///
    /// Existing showtimes keep their stored end times.
    pub fn update_movie(&mut self, id: &str, change: MovieField) -> Result<Movie> {
        match &change {
            MovieField::Name(name) => self.check_movie_name(name)?,
            MovieField::RunningTime(minutes) => self.check_running_time(*minutes)?,
            _ => {}
        }
        let mut movie: Movie = self.store.get(id)?;
        change.apply(&mut movie);
        self.store.replace(&movie)?;
        info!("Movie {} updated", movie.id);
        Ok(movie)
    }

    pub fn remove_movie(&mut self, id: &str) -> Result<()> {
        self.store.remove::<Movie>(id)?;
        info!("Movie {} removed", id);
        Ok(())
    }

    fn check_movie_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(CinemaError::InvalidInput("movie must have a name".into()));
        }
        Ok(())
    }

    fn check_running_time(&self, minutes: u32) -> Result<()> {
        let range = self.config.running_time_range();
        if !range.contains(&minutes) {
            return Err(CinemaError::InvalidInput(format!(
                "running time must be between {} and {} minutes",
                range.start(),
                range.end()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::time::parse_date;
    use crate::facade::testing::cinema;

    pub fn new_movie(name: &str, running_time: u32, discount_eligible: bool) -> NewMovie {
        NewMovie {
            name: name.into(),
            release_date: parse_date("01-01-2030").unwrap(),
            running_time,
            genres: vec!["Drama".into()],
            classification: Classification::P12,
            spoken_language: "English".into(),
            subtitle_languages: vec!["Malay".into()],
            directors: vec!["Someone".into()],
            cast: vec!["Lead".into()],
            description: "Quiet, long, sad.".into(),
            discount_eligible,
        }
    }

    #[test]
    fn test_add_movie_assigns_sequential_ids() {
        let mut cinema = cinema();
        let first = cinema.add_movie(new_movie("First", 110, true)).unwrap();
        let second = cinema.add_movie(new_movie("Second", 90, false)).unwrap();
        assert_eq!(first.id, "M0001");
        assert_eq!(second.id, "M0002");
        assert_eq!(cinema.list_movies().unwrap().len(), 2);
        assert_eq!(cinema.movie("M0002").unwrap().name, "Second");
    }

    #[test]
    fn test_add_movie_validates() {
        let mut cinema = cinema();
        assert!(matches!(
            cinema.add_movie(new_movie("  ", 110, true)),
            Err(CinemaError::InvalidInput(_))
        ));
        assert!(cinema.add_movie(new_movie("Too long", 500, true)).is_err());
        assert!(cinema.add_movie(new_movie("Zero", 0, true)).is_err());
        assert!(cinema.list_movies().unwrap().is_empty());
    }

    #[test]
    fn test_update_and_remove_movie() {
        let mut cinema = cinema();
        let movie = cinema.add_movie(new_movie("Draft", 100, true)).unwrap();

        let updated = cinema
            .update_movie(&movie.id, MovieField::Genres(vec!["Comedy".into(), "Family".into()]))
            .unwrap();
        assert_eq!(updated.genres, vec!["Comedy", "Family"]);
        assert!(cinema.update_movie(&movie.id, MovieField::RunningTime(600)).is_err());

        cinema.remove_movie(&movie.id).unwrap();
        assert!(matches!(cinema.movie(&movie.id), Err(CinemaError::NotFound { .. })));
        assert!(matches!(
            cinema.remove_movie(&movie.id),
            Err(CinemaError::NotFound { kind: "movie", .. })
        ));
    }
}
