/// Data layer: record types, persistence, discovery and views.
///
/// Architecture:
/// ```text
///   sample dir            judgements.csv
///        │                      │
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │ scanner  │ new paths│  loader  │  existing rows (win on merge)
///   └──────────┘          └──────────┘
///        │                      │
///        └──────────┬───────────┘
///                   ▼
///       path → JudgementRecord (Dataset)
///                   │
///                   ▼
///   ┌──────────┐  ┌──────────┐  ┌──────────┐
///   │  filter  │  │  boxes   │  │   raw    │  views, box codec, pixels
///   └──────────┘  └──────────┘  └──────────┘
/// ```

pub mod boxes;
pub mod filter;
pub mod loader;
pub mod model;
pub mod raw;
pub mod scanner;
