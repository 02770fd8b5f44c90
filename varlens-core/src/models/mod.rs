pub mod filter_state;
pub mod variant;
pub mod variant_index;

// re-export for cleaner imports
pub use self::filter_state::{ALL_LABEL, Facet, FilterState, Overrides, Selection};
pub use self::variant::{Hgvs, Variant};
pub use self::variant_index::VariantIndex;
