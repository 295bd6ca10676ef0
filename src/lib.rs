//! MolScout core: molecule records, the property filter, CSV export, batch
//! loading and the seeded mock AI modules behind the desktop viewer.

pub mod analysis;
pub mod config;
pub mod data;
