//! # varlens-session
//!
//! One user's view over a variant set: the filter state, the shared
//! annotation cache and the report marks of the open job, with every
//! displayed value derived from them on demand.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use varlens_annotate::client::HttpAnnotationService;
//! use varlens_core::models::{Facet, Selection, VariantIndex};
//! use varlens_core::notify::LogSink;
//! use varlens_session::ViewSession;
//!
//! # fn main() -> anyhow::Result<()> {
//! let index = VariantIndex::try_from("variants.json")?;
//! let service = Arc::new(HttpAnnotationService::builder().finish()?);
//! let mut session = ViewSession::new(index, service, Arc::new(LogSink)).with_job("job-7");
//!
//! session.set_facet(Facet::Quality, Selection::parse("PASS"));
//! println!("{} visible", session.visible().len());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod report;
pub mod session;

pub use errors::SessionError;
pub use report::{ReportMarks, ReportStore};
pub use session::{Derived, Input, ViewSession};
