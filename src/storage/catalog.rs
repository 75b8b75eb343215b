/// The flat-file tables that make up a cinema data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Movies,
    Showtimes,
    Discounts,
    Auditoriums,
    Maintenance,
    Bookings,
    Customers,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Movies,
        Table::Showtimes,
        Table::Discounts,
        Table::Auditoriums,
        Table::Maintenance,
        Table::Bookings,
        Table::Customers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Movies => "movie_listings",
            Table::Showtimes => "movie_showtimes",
            Table::Discounts => "discount_policies",
            Table::Auditoriums => "auditorium_info",
            Table::Maintenance => "technician_issues",
            Table::Bookings => "movie_bookings",
            Table::Customers => "customer",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self.name())
    }

    pub fn header(self) -> &'static [&'static str] {
        match self {
            Table::Movies => &[
                "movie_id",
                "movie_name",
                "release_date",
                "running_time",
                "genre",
                "classification",
                "spoken_language",
                "subtitle_language",
                "directors",
                "casts",
                "description",
                "eligibility_for_discount",
            ],
            Table::Showtimes => &[
                "showtime_id",
                "movie_id",
                "auditorium_id",
                "date",
                "start_time",
                "end_time",
                "normal_price",
                "discounted_price",
                "discount_id",
            ],
            Table::Discounts => &[
                "discount_id",
                "discount_name",
                "discount_type",
                "discount_amount",
                "discount_rate",
                "discount_policies",
            ],
            Table::Auditoriums => &[
                "auditorium_id",
                "auditorium_type",
                "capacity",
                "rows",
                "columns",
                "normal_price",
            ],
            Table::Maintenance => &[
                "auditorium_id",
                "equipment",
                "status",
                "estimated_repair_date",
                "estimated_repaired_date",
            ],
            Table::Bookings => &[
                "booking_id",
                "showtime_id",
                "customer_id",
                "seats",
                "tickets",
                "total_price",
            ],
            Table::Customers => &["customer_id", "name", "phone", "email", "password"],
        }
    }

    pub fn header_line(self) -> String {
        self.header().join(", ")
    }
}
