/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  20250601_hoikuen_utf8.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  quote-aware split → validated NurseryRecords
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ NurseryDataset  │  Vec<NurseryRecord>, facility-type index
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → visible records
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
