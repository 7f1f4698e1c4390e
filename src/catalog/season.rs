//! League season date ranges.

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

type Ymd = (i32, u32, u32);

/// `(season, first game, last game)` for every known season.
const SEASONS: &[(&str, Ymd, Ymd)] = &[
    ("1995-96", (1995, 11, 3), (1996, 6, 16)),
    ("1996-97", (1996, 11, 1), (1997, 6, 13)),
    ("1997-98", (1997, 10, 31), (1998, 6, 14)),
    // Lockout
    ("1998-99", (1999, 2, 5), (1999, 6, 25)),
    ("1999-00", (1999, 11, 2), (2000, 6, 19)),
    ("2000-01", (2000, 10, 31), (2001, 6, 15)),
    ("2001-02", (2001, 10, 30), (2002, 6, 12)),
    ("2002-03", (2002, 10, 29), (2003, 6, 15)),
    ("2003-04", (2003, 10, 28), (2004, 6, 15)),
    ("2004-05", (2004, 11, 2), (2005, 6, 23)),
    ("2005-06", (2005, 11, 1), (2006, 6, 20)),
    ("2006-07", (2006, 10, 31), (2007, 6, 14)),
    ("2007-08", (2007, 10, 30), (2008, 6, 17)),
    ("2008-09", (2008, 10, 28), (2009, 6, 14)),
    ("2009-10", (2009, 10, 27), (2010, 6, 17)),
    ("2010-11", (2010, 10, 26), (2011, 6, 12)),
    // Lockout
    ("2011-12", (2011, 12, 25), (2012, 6, 21)),
    ("2012-13", (2012, 10, 30), (2013, 6, 20)),
    ("2013-14", (2013, 10, 29), (2014, 6, 15)),
    ("2014-15", (2014, 10, 28), (2015, 6, 16)),
    ("2015-16", (2015, 10, 27), (2016, 6, 19)),
    ("2016-17", (2016, 10, 25), (2017, 6, 12)),
    ("2017-18", (2017, 10, 17), (2018, 6, 8)),
    ("2018-19", (2018, 10, 16), (2019, 6, 13)),
    // Bubble restart ran into October.
    ("2019-20", (2019, 10, 22), (2020, 10, 11)),
    ("2020-21", (2020, 12, 22), (2021, 7, 20)),
    ("2021-22", (2021, 10, 19), (2022, 6, 16)),
    ("2022-23", (2022, 10, 18), (2023, 6, 12)),
    ("2023-24", (2023, 10, 17), (2024, 6, 17)),
    ("2024-25", (2024, 10, 22), (2025, 6, 22)),
];

/// Inclusive date range of one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonDates {
    pub name: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SeasonDates {
    fn from_entry(&(name, start, end): &(&'static str, Ymd, Ymd)) -> Option<Self> {
        Some(SeasonDates {
            name,
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2)?,
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2)?,
        })
    }

    /// First game date as `YYYY-MM-DD`.
    #[must_use]
    pub fn start_text(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Last game date as `YYYY-MM-DD`.
    #[must_use]
    pub fn end_text(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Looks up a season by name, e.g. `"1996-97"`.
#[must_use]
pub fn season_dates(name: &str) -> Option<SeasonDates> {
    SEASONS
        .iter()
        .find(|(season, _, _)| *season == name)
        .and_then(SeasonDates::from_entry)
}

#[must_use]
pub fn is_valid_season(name: &str) -> bool {
    season_dates(name).is_some()
}

/// Finds the season whose range contains the date.
#[must_use]
pub fn season_containing(date: NaiveDate) -> Option<SeasonDates> {
    SEASONS
        .iter()
        .filter_map(SeasonDates::from_entry)
        .find(|season| season.contains(date))
}

/// All known season names, oldest first.
pub fn season_names() -> impl Iterator<Item = &'static str> {
    SEASONS.iter().map(|(name, _, _)| *name)
}
