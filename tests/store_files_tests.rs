//! On-disk behaviour of the flat-file tables

use cinemadb::core::time::{parse_date, parse_time};
use cinemadb::facade::NewMovie;
use cinemadb::models::{Classification, DiscountKind, DiscountPolicy, Showtime};
use cinemadb::storage::codec::split_line;
use cinemadb::storage::{RecordStoreExt, Table};
use cinemadb::{Cinema, CinemaConfig, CinemaError, FileStore, RecordStore};
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Cinema<FileStore> {
    let mut cinema = Cinema::open(CinemaConfig::new(dir.path()).password_cost(4)).unwrap();
    cinema.initialize().unwrap();
    cinema
}

fn short_movie() -> NewMovie {
    NewMovie {
        name: "Short".into(),
        release_date: parse_date("01-01-2030").unwrap(),
        running_time: 50,
        genres: Vec::new(),
        classification: Classification::U,
        spoken_language: "English".into(),
        subtitle_languages: Vec::new(),
        directors: Vec::new(),
        cast: Vec::new(),
        description: String::new(),
        discount_eligible: true,
    }
}

#[test]
fn test_policy_text_with_commas_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut cinema = open(&dir);
    let text = "Seniors, students, and staff; one per ticket";
    cinema
        .add_discount("Concession", DiscountKind::fixed(2.5).unwrap(), text)
        .unwrap();

    let raw = fs::read_to_string(dir.path().join(Table::Discounts.file_name())).unwrap();
    let line = raw.lines().nth(1).unwrap();
    assert!(line.contains(&format!("\"{}\"", text)));
    assert_eq!(split_line(line)[5], text);

    let store = FileStore::open(dir.path()).unwrap();
    let policies: Vec<DiscountPolicy> = store.load_all().unwrap();
    assert_eq!(policies[0].policy_text, text);
}

#[test]
fn test_showtime_row_layout() {
    let dir = TempDir::new().unwrap();
    let mut cinema = open(&dir);
    let now = parse_date("01-06-2030").unwrap().and_time(parse_time("0800").unwrap());
    let movie = cinema.add_movie(short_movie()).unwrap();
    let discount = cinema.add_discount("Flat", DiscountKind::fixed(3.0).unwrap(), "").unwrap();
    let plan = cinema
        .plan_showtime(&movie.id, parse_date("05-06-2030").unwrap(), parse_time("0907").unwrap(), now)
        .unwrap();
    cinema.add_showtime(&plan, "AUD02", Some(&discount.id)).unwrap();

    let raw = fs::read_to_string(dir.path().join(Table::Showtimes.file_name())).unwrap();
    assert_eq!(
        raw,
        format!(
            "{}\nST0001, M0001, AUD02, 05-06-2030, 0907, 1000, 15.00, 12.00, D01\n",
            Table::Showtimes.header_line()
        )
    );
}

#[test]
fn test_missing_maintenance_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let mut cinema = open(&dir);
    let movie = cinema.add_movie(short_movie()).unwrap();
    fs::remove_file(dir.path().join(Table::Maintenance.file_name())).unwrap();

    let now = parse_date("01-06-2030").unwrap().and_time(parse_time("0800").unwrap());
    let plan = cinema
        .plan_showtime(&movie.id, parse_date("05-06-2030").unwrap(), parse_time("1000").unwrap(), now)
        .unwrap();
    assert_eq!(plan.available().len(), 8);
    assert!(cinema.maintenance_records().unwrap().is_empty());
}

#[test]
fn test_corrupt_row_names_table_and_row() {
    let dir = TempDir::new().unwrap();
    let cinema = open(&dir);
    let path = dir.path().join(Table::Showtimes.file_name());
    fs::write(
        &path,
        format!(
            "{}\nST0001, M0001, AUD01, 31-31-2030, 1000, 1150, 15.00, , \n",
            Table::Showtimes.header_line()
        ),
    )
    .unwrap();

    match cinema.list_showtimes() {
        Err(CinemaError::Corrupt { table, row, .. }) => {
            assert_eq!(table, "movie_showtimes");
            assert_eq!(row, 1);
        }
        other => panic!("expected a corrupt row error, got {:?}", other),
    }
}

#[test]
fn test_counter_resumes_from_highest_id_when_file_is_lost() {
    let dir = TempDir::new().unwrap();
    let mut cinema = open(&dir);
    for _ in 0..3 {
        cinema.add_movie(short_movie()).unwrap();
    }
    cinema.remove_movie("M0002").unwrap();
    fs::remove_file(dir.path().join("COUNTER_movie_id.txt")).unwrap();

    let next = cinema.add_movie(short_movie()).unwrap();
    assert_eq!(next.id, "M0004");
}

#[test]
fn test_rewrite_keeps_existing_header() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    let path = store.path_of(Table::Auditoriums);
    fs::write(&path, "id, type, cap, r, c, price\nAUD01, IMAX, 100, 10, 10, 20.00\n").unwrap();

    let rows = store.read_all_rows(Table::Auditoriums).unwrap();
    store.rewrite(Table::Auditoriums, &rows).unwrap();

    assert_eq!(store.read_header(Table::Auditoriums).unwrap()[0], "id");
    assert_eq!(store.read_all_rows(Table::Auditoriums).unwrap(), rows);
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn test_unknown_showtime_is_not_found() {
    let dir = TempDir::new().unwrap();
    let cinema = open(&dir);
    let store = FileStore::open(dir.path()).unwrap();
    assert!(store.find::<Showtime>("ST0404").unwrap().is_none());
    assert!(matches!(
        cinema.showtime("ST0404"),
        Err(CinemaError::NotFound { kind: "showtime", .. })
    ));
}
