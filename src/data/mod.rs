//! Data layer: record types, loading, filtering and export.
//!
//! Architecture:
//! ```text
//!  AI modules (mock)        .json / .csv / .parquet
//!        │                          │
//!        ▼                          ▼
//!   result records            ┌──────────┐
//!        │                    │  loader   │  parse file → Vec<MoleculeRecord>
//!        │                    └──────────┘
//!        ▼                          │
//!   ┌──────────┐ ◄──────────────────┘
//!   │  filter   │  criteria predicate → matching records (stable)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  flat records → unquoted CSV text
//!   └──────────┘
//! ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
