//! Domain model for the harvester
//!
//! # Components
//!
//! - `Product`: the canonical product record every raw hit is normalized into
//! - `RawRecord`: an untyped source record as delivered by the catalog API
//! - `HarvestReport`: summary counters for a completed run

mod product;

pub use product::{HarvestReport, Product, RawRecord};
