use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Availability – styling category for a record's total open slots
// ---------------------------------------------------------------------------

/// Total open slots at or above which a facility counts as amply available.
pub const AMPLE_THRESHOLD: u32 = 5;

/// Number of single-year age groups tracked per facility (ages 0 through 5).
pub const AGE_GROUPS: usize = 6;

/// Coarse availability category used to colour markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Availability {
    /// No open slots at all.
    None,
    /// Between 1 and `AMPLE_THRESHOLD - 1` open slots.
    Partial,
    /// `AMPLE_THRESHOLD` or more open slots.
    Ample,
}

impl Availability {
    pub const ALL: [Availability; 3] = [Availability::None, Availability::Partial, Availability::Ample];

    /// Classify a total open-slot count.
    pub fn from_total(total: u32) -> Self {
        if total == 0 {
            Availability::None
        } else if total >= AMPLE_THRESHOLD {
            Availability::Ample
        } else {
            Availability::Partial
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::None => write!(f, "No openings"),
            Availability::Partial => write!(f, "1–{} openings", AMPLE_THRESHOLD - 1),
            Availability::Ample => write!(f, "{AMPLE_THRESHOLD}+ openings"),
        }
    }
}

// ---------------------------------------------------------------------------
// NurseryRecord – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single nursery facility parsed from the dataset.
///
/// `total_available` is derived from `age_slots` at construction and cannot
/// drift from it afterwards; the dataset only hands out shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct NurseryRecord {
    /// 1-based data-line position in the source file (header excluded).
    pub id: u32,
    pub date: String,
    pub name: String,
    pub facility_type: String,
    pub age_group: String,
    /// Open slots per single year of age, index 0 = age 0.
    pub age_slots: [u32; AGE_GROUPS],
    /// Extended-care hours, verbatim (may be empty).
    pub extended_care: String,
    pub latitude: f64,
    pub longitude: f64,
    total_available: u32,
}

impl NurseryRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        date: String,
        name: String,
        facility_type: String,
        age_group: String,
        age_slots: [u32; AGE_GROUPS],
        extended_care: String,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let total_available = age_slots.iter().fold(0u32, |acc, n| acc.saturating_add(*n));
        Self {
            id,
            date,
            name,
            facility_type,
            age_group,
            age_slots,
            extended_care,
            latitude,
            longitude,
            total_available,
        }
    }

    /// Sum of the open slots across all six age groups.
    pub fn total_available(&self) -> u32 {
        self.total_available
    }

    /// Open slots for a given age, or `None` when the age is out of range.
    pub fn slots_for_age(&self, age: usize) -> Option<u32> {
        self.age_slots.get(age).copied()
    }

    pub fn availability(&self) -> Availability {
        Availability::from_total(self.total_available)
    }

    /// Both coordinates are present, finite and non-zero.
    ///
    /// A coordinate of exactly `0.0` is treated as missing geocoding.
    pub fn has_valid_coordinates(&self) -> bool {
        valid_coordinate(self.latitude) && valid_coordinate(self.longitude)
    }
}

fn valid_coordinate(v: f64) -> bool {
    v.is_finite() && v != 0.0
}

// ---------------------------------------------------------------------------
// NurseryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The parsed, immutable dataset plus a small index used by the filter UI.
#[derive(Debug, Clone, Default)]
pub struct NurseryDataset {
    records: Vec<NurseryRecord>,
    /// Sorted set of distinct facility types.
    facility_types: BTreeSet<String>,
}

impl NurseryDataset {
    /// Build the dataset and its facility-type index from parsed records.
    pub fn from_records(records: Vec<NurseryRecord>) -> Self {
        let facility_types = records
            .iter()
            .map(|r| r.facility_type.clone())
            .filter(|t| !t.is_empty())
            .collect();
        NurseryDataset {
            records,
            facility_types,
        }
    }

    /// All records in source order.
    pub fn records(&self) -> &[NurseryRecord] {
        &self.records
    }

    /// Look up a record by its id.
    pub fn get(&self, id: u32) -> Option<&NurseryRecord> {
        // Ids are assigned in increasing line order, so the records are sorted by id.
        self.records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|i| &self.records[i])
    }

    pub fn facility_types(&self) -> impl Iterator<Item = &str> {
        self.facility_types.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
