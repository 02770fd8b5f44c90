//! The view session: explicit inputs, derived outputs recomputed on demand.
//!
//! | derived output          | inputs                                  |
//! |-------------------------|-----------------------------------------|
//! | `visible()`             | records, filters, annotation cache      |
//! | `facet_counts()`        | records, filters, annotation cache      |
//! | `hgvs_for()`            | annotation cache                        |
//! | `annotation_status()`   | annotation cache                        |
//! | `is_marked()`           | report marks, job                       |
//! | `marked_variants()`     | records, report marks, job              |
//!
//! The same table is available at runtime through [`Derived::inputs`] and
//! [`Input::invalidates`].

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};
use varlens_annotate::{AnnotationService, AnnotationStatus, Annotator, FetchOutcome, SkipReason};
use varlens_core::models::{Facet, FilterState, Overrides, Selection, Variant, VariantIndex};
use varlens_core::notify::{Notification, NotificationSink};
use varlens_filter::{AllFacetCounts, FacetCounter, FilterEngine, VisibilityReconciler};

use crate::errors::SessionError;
use crate::report::{ReportMarks, ReportStore};

/// A piece of session state that events change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Records,
    Filters,
    AnnotationCache,
    ReportMarks,
    Job,
}

/// A value the session derives from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derived {
    Visible,
    FacetCounts,
    Hgvs,
    AnnotationStatus,
    Marked,
    MarkedVariants,
}

impl Derived {
    pub const ALL: [Derived; 6] = [
        Derived::Visible,
        Derived::FacetCounts,
        Derived::Hgvs,
        Derived::AnnotationStatus,
        Derived::Marked,
        Derived::MarkedVariants,
    ];

    pub fn inputs(self) -> &'static [Input] {
        match self {
            Derived::Visible | Derived::FacetCounts => {
                &[Input::Records, Input::Filters, Input::AnnotationCache]
            }
            Derived::Hgvs | Derived::AnnotationStatus => &[Input::AnnotationCache],
            Derived::Marked => &[Input::ReportMarks, Input::Job],
            Derived::MarkedVariants => &[Input::Records, Input::ReportMarks, Input::Job],
        }
    }
}

impl Input {
    /// Derived outputs that must be recomputed after this input changes.
    pub fn invalidates(self) -> Vec<Derived> {
        Derived::ALL
            .into_iter()
            .filter(|derived| derived.inputs().contains(&self))
            .collect()
    }
}

pub struct ViewSession<S: ?Sized> {
    index: VariantIndex,
    state: FilterState,
    annotator: Annotator<S>,
    marks: ReportMarks,
    job_id: Option<String>,
    sink: Arc<dyn NotificationSink>,
    report_store: Option<Box<dyn ReportStore>>,
}

impl<S: AnnotationService + ?Sized> ViewSession<S> {
    pub fn new(index: VariantIndex, service: Arc<S>, sink: Arc<dyn NotificationSink>) -> Self {
        ViewSession {
            index,
            state: FilterState::default(),
            annotator: Annotator::new(service, Arc::clone(&sink)),
            marks: ReportMarks::new(),
            job_id: None,
            sink,
            report_store: None,
        }
    }

    /// Open a job: report marks and fetched alternatives are saved under it.
    pub fn with_job(mut self, job_id: &str) -> Self {
        self.annotator = self.annotator.with_job(job_id);
        self.job_id = Some(job_id.to_string());
        self
    }

    pub fn with_report_store(mut self, store: Box<dyn ReportStore>) -> Self {
        self.report_store = Some(store);
        self
    }

    /// Restore previously saved marks for the open job.
    pub fn with_marks(mut self, positions: impl IntoIterator<Item = u64>) -> Self {
        if let Some(job_id) = self.job_id.as_deref() {
            self.marks.load(job_id, positions);
        }
        self
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn index(&self) -> &VariantIndex {
        &self.index
    }

    pub fn annotator(&self) -> &Annotator<S> {
        &self.annotator
    }

    // ---- events ----

    pub fn set_facet(&mut self, facet: Facet, selection: Selection) -> bool {
        self.state.set(facet, selection)
    }

    pub fn set_search(&mut self, text: &str) -> bool {
        self.state.set_search(text)
    }

    pub fn reset_filters(&mut self) {
        self.state = FilterState::default();
    }

    ///
    /// Make `variant` visible by clearing exactly the filters that hide it.
    /// Returns whether any filter changed.
    ///
    pub fn select_variant(&mut self, variant: &Variant) -> bool {
        let cache = self.annotator.cache();
        let engine = FilterEngine::new(&*cache);
        VisibilityReconciler::new(&engine).ensure_visible(variant, &mut self.state)
    }

    /// [`ViewSession::select_variant`] for the record at `position`.
    pub fn select_position(
        &mut self,
        position: u64,
        patient: Option<&str>,
    ) -> Result<bool, SessionError> {
        let variant = self
            .index
            .find(position, patient)
            .cloned()
            .ok_or(SessionError::UnknownVariant(position))?;
        Ok(self.select_variant(&variant))
    }

    ///
    /// Fetch alternatives for `variant` unless a lookup for it is already
    /// loading. The in-flight check and the loading transition both happen
    /// before this returns.
    ///
    pub fn request_annotation<'a>(
        &'a self,
        variant: &Variant,
    ) -> impl Future<Output = FetchOutcome> + use<'a, S> {
        let fetch = if self.annotator.status(variant).loading {
            None
        } else {
            Some(self.annotator.fetch(variant))
        };
        async move {
            match fetch {
                Some(fetch) => fetch.await,
                None => FetchOutcome::Skipped(SkipReason::InFlight),
            }
        }
    }

    ///
    /// Flip the report mark on `position` for the open job and save the
    /// job's marks. Returns whether the position is marked afterwards.
    ///
    pub fn toggle_report_mark(&mut self, position: u64) -> Result<bool, SessionError> {
        let Some(job_id) = self.job_id.clone() else {
            self.sink.notify(Notification::info(
                "Open a job before marking variants for the report",
            ));
            return Err(SessionError::MissingJob("mark variants for the report"));
        };

        let marked = self.marks.toggle(&job_id, position);
        info!(
            "{} position {} for the report of {}",
            if marked { "Marked" } else { "Unmarked" },
            position,
            job_id
        );

        if let Some(store) = &self.report_store {
            let positions = self.marks.positions(&job_id);
            if let Err(err) = store.save_marks(&job_id, &positions) {
                warn!("Saving report marks for {} failed: {:#}", job_id, err);
                self.sink.notify(Notification::error(format!(
                    "Report marks could not be saved: {}",
                    err
                )));
            }
        }
        Ok(marked)
    }

    /// Swap in a freshly loaded record set; filters and caches are kept.
    pub fn refresh(&mut self, variants: Vec<Variant>) {
        self.index.replace(variants);
    }

    pub fn seed_alternatives(&self, persisted: HashMap<String, Vec<String>>) -> usize {
        self.annotator.seed(persisted)
    }

    // ---- derived outputs ----

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn visible(&self) -> Vec<&Variant> {
        let cache = self.annotator.cache();
        let engine = FilterEngine::new(&*cache);
        engine.apply(self.index.variants(), &self.state, &Overrides::none())
    }

    pub fn facet_counts(&self) -> AllFacetCounts {
        let cache = self.annotator.cache();
        let engine = FilterEngine::new(&*cache);
        FacetCounter::new(&engine).count_all(self.index.variants(), &self.state)
    }

    pub fn hgvs_for(&self, variant: &Variant) -> Vec<String> {
        self.annotator.resolve(variant)
    }

    pub fn annotation_status(&self, variant: &Variant) -> AnnotationStatus {
        self.annotator.status(variant)
    }

    pub fn is_marked(&self, position: u64) -> bool {
        self.job_id
            .as_deref()
            .is_some_and(|job_id| self.marks.is_marked(job_id, position))
    }

    /// Records of the open job marked for the report, in record order.
    pub fn marked_variants(&self) -> Vec<&Variant> {
        let Some(job_id) = self.job_id.as_deref() else {
            return Vec::new();
        };
        self.index
            .variants()
            .iter()
            .filter(|variant| self.marks.is_marked(job_id, variant.position))
            .collect()
    }
}
