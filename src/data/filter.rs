use std::fmt;
use std::str::FromStr;

use super::model::{NurseryDataset, NurseryRecord, AGE_GROUPS};

// ---------------------------------------------------------------------------
// AgeYear – a single-year age selector (0–5)
// ---------------------------------------------------------------------------

/// A validated age between 0 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgeYear(u8);

impl AgeYear {
    pub fn new(age: u8) -> Option<Self> {
        ((age as usize) < AGE_GROUPS).then_some(AgeYear(age))
    }

    pub fn all() -> impl Iterator<Item = AgeYear> {
        (0..AGE_GROUPS as u8).map(AgeYear)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgeYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAge(pub String);

impl fmt::Display for InvalidAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not an age between 0 and 5", self.0)
    }
}

impl std::error::Error for InvalidAge {}

impl FromStr for AgeYear {
    type Err = InvalidAge;

    /// Accepts a single digit, as emitted by the age selector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
            (Some(d), None) => AgeYear::new(d as u8).ok_or_else(|| InvalidAge(s.to_string())),
            _ => Err(InvalidAge(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// The active filter selections. `None` / `false` mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub age: Option<AgeYear>,
    pub facility_type: Option<String>,
    pub availability_only: bool,
}

impl FilterCriteria {
    /// No active constraint at all.
    pub fn is_unrestricted(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Whether a record passes every active filter.
    ///
    /// Checked in order: age, facility type, availability.
    pub fn matches(&self, record: &NurseryRecord) -> bool {
        self.passes_age(record) && self.passes_facility_type(record) && self.passes_availability(record)
    }

    fn passes_age(&self, record: &NurseryRecord) -> bool {
        match self.age {
            None => true,
            Some(age) => record.slots_for_age(age.index()).is_some_and(|n| n > 0),
        }
    }

    fn passes_facility_type(&self, record: &NurseryRecord) -> bool {
        match &self.facility_type {
            None => true,
            Some(t) => record.facility_type == *t,
        }
    }

    fn passes_availability(&self, record: &NurseryRecord) -> bool {
        !self.availability_only || record.total_available() > 0
    }
}

/// Return indices of records that pass all active filters, in dataset order.
pub fn filtered_indices(dataset: &NurseryDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Records that pass all active filters, in dataset order.
pub fn visible_records<'a>(dataset: &'a NurseryDataset, criteria: &FilterCriteria) -> Vec<&'a NurseryRecord> {
    dataset
        .records()
        .iter()
        .filter(|r| criteria.matches(r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, facility_type: &str, slots: [u32; AGE_GROUPS]) -> NurseryRecord {
        NurseryRecord::new(
            id,
            "2025-06-01".into(),
            format!("N{id}"),
            facility_type.into(),
            "0-5".into(),
            slots,
            String::new(),
            35.6,
            139.7,
        )
    }

    fn dataset() -> NurseryDataset {
        NurseryDataset::from_records(vec![
            record(1, "Private", [2, 0, 1, 0, 0, 0]),
            record(2, "Public", [0, 0, 0, 0, 0, 0]),
            record(3, "Public", [0, 4, 0, 0, 0, 1]),
            record(5, "Certified", [0, 0, 0, 0, 0, 0]),
        ])
    }

    fn ids(records: Vec<&NurseryRecord>) -> Vec<u32> {
        records.into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_age_year_parse() {
        assert_eq!("2".parse::<AgeYear>(), Ok(AgeYear(2)));
        assert_eq!(" 0 ".parse::<AgeYear>(), Ok(AgeYear(0)));
        assert!("6".parse::<AgeYear>().is_err());
        assert!("12".parse::<AgeYear>().is_err());
        assert!("".parse::<AgeYear>().is_err());
        assert_eq!(AgeYear::all().count(), 6);
    }

    #[test]
    fn test_unrestricted_returns_everything_in_order() {
        let ds = dataset();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unrestricted());
        assert_eq!(ids(visible_records(&ds, &criteria)), vec![1, 2, 3, 5]);
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_age_filter() {
        let ds = dataset();
        let mut criteria = FilterCriteria {
            age: AgeYear::new(2),
            ..Default::default()
        };
        assert_eq!(ids(visible_records(&ds, &criteria)), vec![1]);
        criteria.age = AgeYear::new(1);
        assert_eq!(ids(visible_records(&ds, &criteria)), vec![3]);
    }

    #[test]
    fn test_type_and_availability_compose() {
        let ds = dataset();
        let criteria = FilterCriteria {
            facility_type: Some("Public".into()),
            availability_only: true,
            ..Default::default()
        };
        assert_eq!(ids(visible_records(&ds, &criteria)), vec![3]);

        let criteria = FilterCriteria {
            facility_type: Some("public".into()),
            ..Default::default()
        };
        assert!(visible_records(&ds, &criteria).is_empty());
    }

    #[test]
    fn test_availability_only() {
        let ds = dataset();
        let criteria = FilterCriteria {
            availability_only: true,
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 2]);
    }
}
