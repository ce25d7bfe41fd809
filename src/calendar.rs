use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

// Minggu..Sabtu, as printed on the yearly table header.
pub const WEEKDAY_HEADER: [&str; 7] = ["M", "S", "S", "R", "K", "J", "S"];

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[month.clamp(1, 12) as usize - 1]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub year: i32,
    pub month: u32,
}

impl Cursor {
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    // Missing or out-of-range parameters fall back to the current month/year.
    pub fn from_params(month: Option<u32>, year: Option<i32>) -> Self {
        let now = Self::current();
        Self {
            year: year.unwrap_or(now.year),
            month: match month {
                Some(month) if (1..=12).contains(&month) => month,
                _ => now.month,
            },
        }
    }

    pub fn shift(&mut self, delta_months: i32) {
        let mut year = self.year;
        let mut month = self.month as i32 + delta_months;
        while month > 12 {
            year += 1;
            month -= 12;
        }
        while month < 1 {
            year -= 1;
            month += 12;
        }
        self.year = year;
        self.month = month as u32;
    }

    pub fn set_month(&mut self, month: u32) {
        if (1..=12).contains(&month) {
            self.month = month;
        }
    }

    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).expect("next year date should be valid")
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).expect("next month date should be valid")
    };
    (first_of_next - Duration::days(1)).day()
}

// Weekday of the 1st, counted from Sunday = 0.
pub fn first_weekday_offset(year: i32, month: u32) -> usize {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).expect("first day of month must be valid");
    first.weekday().num_days_from_sunday() as usize
}

// Up to 6 rows of 7 cells; None before the first day and after the last.
pub fn month_grid(year: i32, month: u32) -> Vec<Vec<Option<u32>>> {
    let offset = first_weekday_offset(year, month);
    let day_count = days_in_month(year, month);

    let mut weeks = Vec::new();
    let mut day = 1u32;
    for week in 0..6 {
        let mut cells = Vec::with_capacity(7);
        for weekday_index in 0..7 {
            let before_first = week == 0 && weekday_index < offset;
            if before_first || day > day_count {
                cells.push(None);
            } else {
                cells.push(Some(day));
                day += 1;
            }
        }
        weeks.push(cells);
        if day > day_count {
            break;
        }
    }

    weeks
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::{Cursor, days_in_month, first_weekday_offset, is_weekend, month_grid, month_name};
    use chrono::NaiveDate;

    #[test]
    fn navigation_round_trips_across_year_boundaries() {
        let mut cursor = Cursor {
            year: 2024,
            month: 1,
        };
        cursor.shift(-1);
        assert_eq!(
            cursor,
            Cursor {
                year: 2023,
                month: 12
            }
        );
        cursor.shift(1);
        assert_eq!(
            cursor,
            Cursor {
                year: 2024,
                month: 1
            }
        );

        for month in 1..=12 {
            let mut cursor = Cursor { year: 2022, month };
            cursor.shift(-1);
            cursor.shift(1);
            assert_eq!(cursor, Cursor { year: 2022, month });
        }
    }

    #[test]
    fn shift_wraps_multiple_months() {
        let mut cursor = Cursor {
            year: 2024,
            month: 11,
        };
        cursor.shift(3);
        assert_eq!(
            cursor,
            Cursor {
                year: 2025,
                month: 2
            }
        );
        cursor.shift(-14);
        assert_eq!(
            cursor,
            Cursor {
                year: 2023,
                month: 12
            }
        );
    }

    #[test]
    fn set_month_ignores_out_of_range_values() {
        let mut cursor = Cursor {
            year: 2024,
            month: 6,
        };
        cursor.set_month(0);
        assert_eq!(cursor.month, 6);
        cursor.set_month(13);
        assert_eq!(cursor.month, 6);
        cursor.set_month(2);
        assert_eq!(cursor.month, 2);
    }

    #[test]
    fn invalid_month_parameter_falls_back_to_current() {
        let now = Cursor::current();
        assert_eq!(Cursor::from_params(Some(0), Some(2024)).month, now.month);
        assert_eq!(Cursor::from_params(Some(13), Some(2024)).month, now.month);
        assert_eq!(Cursor::from_params(None, None), now);
        assert_eq!(Cursor::from_params(Some(7), Some(2021)).month, 7);
    }

    #[test]
    fn counts_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn january_2024_grid_starts_monday_with_31_days() {
        let weeks = month_grid(2024, 1);
        assert_eq!(first_weekday_offset(2024, 1), 1);

        let leading_blanks = weeks[0].iter().take_while(|cell| cell.is_none()).count();
        assert_eq!(leading_blanks, 1);

        let day_cells = weeks
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count();
        assert_eq!(day_cells, 31);
        assert!(weeks.len() <= 6);
        assert!(weeks.iter().all(|week| week.len() == 7));
    }

    #[test]
    fn grid_days_are_sequential() {
        let weeks = month_grid(2024, 6);
        let days = weeks
            .iter()
            .flatten()
            .flatten()
            .copied()
            .collect::<Vec<_>>();
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.last(), Some(&30));
        assert!(days.windows(2).all(|pair| pair[1] == pair[0] + 1));
    }

    #[test]
    fn weekend_covers_saturday_and_sunday() {
        let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).expect("date should be valid");
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 16).expect("date should be valid");
        let monday = NaiveDate::from_ymd_opt(2024, 6, 17).expect("date should be valid");
        assert!(is_weekend(saturday));
        assert!(is_weekend(sunday));
        assert!(!is_weekend(monday));
    }

    #[test]
    fn localized_month_names() {
        assert_eq!(month_name(1), "Januari");
        assert_eq!(month_name(6), "Juni");
        assert_eq!(month_name(12), "Desember");
    }
}
