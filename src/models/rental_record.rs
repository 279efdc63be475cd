//! Rental record models for the daily bike-share dataset.

use chrono::NaiveDate;
use thiserror::Error;


/// A categorical code outside its fixed domain.
///
/// The dataset encodes day attributes as small integers; anything outside the
/// documented ranges means the source file is corrupt, so the loader turns
/// this into a fatal error instead of letting the code pass through unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("unknown weekday code {0} (expected 0-6)")]
    Weekday(u8),
    #[error("unknown season code {0} (expected 1-4)")]
    Season(u8),
    #[error("unknown month code {0} (expected 1-12)")]
    Month(u8),
    #[error("unknown year code {0} (expected 0-1)")]
    Year(u8),
}


/// Day of week as encoded in the dataset (0 = Sunday ... 6 = Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}


impl Weekday {
    pub fn from_code(code: u8) -> Result<Self, CodeError> {
        match code {
            0 => Ok(Self::Sunday),
            1 => Ok(Self::Monday),
            2 => Ok(Self::Tuesday),
            3 => Ok(Self::Wednesday),
            4 => Ok(Self::Thursday),
            5 => Ok(Self::Friday),
            6 => Ok(Self::Saturday),
            _ => Err(CodeError::Weekday(code)),
        }
    }

    /// Display label for chart axes and report rows.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}


/// Season as encoded in the dataset (1 = Spring ... 4 = Winter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}


impl Season {
    pub fn from_code(code: u8) -> Result<Self, CodeError> {
        match code {
            1 => Ok(Self::Spring),
            2 => Ok(Self::Summer),
            3 => Ok(Self::Fall),
            4 => Ok(Self::Winter),
            _ => Err(CodeError::Season(code)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}


/// Calendar month as encoded in the dataset (1-12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    June,
    July,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}


impl Month {
    pub fn from_code(code: u8) -> Result<Self, CodeError> {
        match code {
            1 => Ok(Self::Jan),
            2 => Ok(Self::Feb),
            3 => Ok(Self::Mar),
            4 => Ok(Self::Apr),
            5 => Ok(Self::May),
            6 => Ok(Self::June),
            7 => Ok(Self::July),
            8 => Ok(Self::Aug),
            9 => Ok(Self::Sep),
            10 => Ok(Self::Oct),
            11 => Ok(Self::Nov),
            12 => Ok(Self::Dec),
            _ => Err(CodeError::Month(code)),
        }
    }

    // June and July are spelled out; the rest abbreviate. Kept exactly as the
    // dashboard has always displayed them.
    pub fn label(self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }
}


/// Dataset year as encoded in the dataset (0 = 2011, 1 = 2012).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearCode {
    Y2011,
    Y2012,
}


impl YearCode {
    pub fn from_code(code: u8) -> Result<Self, CodeError> {
        match code {
            0 => Ok(Self::Y2011),
            1 => Ok(Self::Y2012),
            _ => Err(CodeError::Year(code)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Y2011 => "2011",
            Self::Y2012 => "2012",
        }
    }
}


/// One calendar day of rental activity.
///
/// The source file carries `total = casual + registered`; that relationship
/// is assumed from the source and not re-checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalRecord {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub season: Season,
    pub month: Month,
    pub year: YearCode,
    pub casual: i64,
    pub registered: i64,
    pub total: i64,
}


/// Immutable collection of rental records, loaded once at startup.
#[derive(Debug, Clone)]
pub struct RentalData {
    records: Vec<RentalRecord>,
}


impl RentalData {
    pub fn new(records: Vec<RentalRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest record date, the lower bound for the range selector.
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).min()
    }

    /// Latest record date, the upper bound for the range selector.
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, casual: i64, registered: i64) -> RentalRecord {
        RentalRecord {
            date: date.parse().unwrap(),
            weekday: Weekday::Saturday,
            season: Season::Spring,
            month: Month::Jan,
            year: YearCode::Y2011,
            casual,
            registered,
            total: casual + registered,
        }
    }

    #[test]
    fn test_weekday_codes_map_to_labels() {
        let labels: Vec<_> = (0..=6)
            .map(|c| Weekday::from_code(c).unwrap().label())
            .collect();
        assert_eq!(
            labels,
            ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        );
    }

    #[test]
    fn test_season_codes_map_to_labels() {
        let labels: Vec<_> = (1..=4)
            .map(|c| Season::from_code(c).unwrap().label())
            .collect();
        assert_eq!(labels, ["Spring", "Summer", "Fall", "Winter"]);
    }

    #[test]
    fn test_month_codes_map_to_labels() {
        let labels: Vec<_> = (1..=12)
            .map(|c| Month::from_code(c).unwrap().label())
            .collect();
        assert_eq!(
            labels,
            ["Jan", "Feb", "Mar", "Apr", "May", "June", "July", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
    }

    #[test]
    fn test_year_codes_map_to_labels() {
        assert_eq!(YearCode::from_code(0).unwrap().label(), "2011");
        assert_eq!(YearCode::from_code(1).unwrap().label(), "2012");
    }

    #[test]
    fn test_no_label_is_empty() {
        for c in 0..=6 {
            assert!(!Weekday::from_code(c).unwrap().label().is_empty());
        }
        for c in 1..=4 {
            assert!(!Season::from_code(c).unwrap().label().is_empty());
        }
        for c in 1..=12 {
            assert!(!Month::from_code(c).unwrap().label().is_empty());
        }
        for c in 0..=1 {
            assert!(!YearCode::from_code(c).unwrap().label().is_empty());
        }
    }

    #[test]
    fn test_out_of_domain_codes_are_errors() {
        assert_eq!(Weekday::from_code(7), Err(CodeError::Weekday(7)));
        assert_eq!(Season::from_code(0), Err(CodeError::Season(0)));
        assert_eq!(Season::from_code(5), Err(CodeError::Season(5)));
        assert_eq!(Month::from_code(13), Err(CodeError::Month(13)));
        assert_eq!(YearCode::from_code(2), Err(CodeError::Year(2)));
    }

    #[test]
    fn test_date_bounds() {
        let data = RentalData::new(vec![
            record("2011-03-05", 10, 20),
            record("2011-01-01", 5, 5),
            record("2011-02-10", 7, 3),
        ]);
        assert_eq!(data.records().len(), 3);
        assert_eq!(data.min_date(), Some("2011-01-01".parse().unwrap()));
        assert_eq!(data.max_date(), Some("2011-03-05".parse().unwrap()));
    }

    #[test]
    fn test_empty_data_has_no_bounds() {
        let data = RentalData::new(Vec::new());
        assert!(data.is_empty());
        assert_eq!(data.min_date(), None);
        assert_eq!(data.max_date(), None);
    }
}
