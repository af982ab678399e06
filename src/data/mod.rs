/// Data layer: core types, import, filtering and aggregation.
///
/// Architecture:
/// ```text
///  audit sheet .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  split rows → normalize cells → AuditRecord
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ AuditDataset  │  append-only Vec<AuditRecord>, id allocator
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  column selections + date range + search → indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  group-by column, reduce with metric → chart points
///   └───────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
