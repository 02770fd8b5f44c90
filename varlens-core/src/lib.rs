//! Core models for varlens.
//!
//! This crate holds the pieces every other varlens crate shares:
//!
//! - [`Variant`](models::Variant) records and their HGVS field
//! - [`FilterState`](models::FilterState), facet [`Selection`](models::Selection)s and per-call [`Overrides`](models::Overrides)
//! - [`VariantIndex`](models::VariantIndex), the per-analysis record collection
//! - the [`HgvsResolver`](resolver::HgvsResolver) and [`NotificationSink`](notify::NotificationSink) seams
//!
//! # Example
//!
//! ```no_run
//! use varlens_core::models::{Facet, FilterState, VariantIndex};
//!
//! let index = VariantIndex::try_from("variants.json").unwrap();
//! println!("patients: {:?}", index.values(Facet::Patient));
//!
//! let mut state = FilterState::new();
//! state.set(Facet::Quality, "PASS".into());
//! ```

pub mod errors;
pub mod models;
pub mod notify;
pub mod resolver;
pub mod utils;
