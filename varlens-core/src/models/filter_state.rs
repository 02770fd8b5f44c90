use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Label used by the UI and the CLI for the unconstrained selection.
pub const ALL_LABEL: &str = "All";

///
/// One independently filterable dimension over the variant collection.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Type,
    Patient,
    Quality,
    Consequence,
}

impl Facet {
    pub const ALL: [Facet; 4] = [
        Facet::Type,
        Facet::Patient,
        Facet::Quality,
        Facet::Consequence,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Facet::Type => "type",
            Facet::Patient => "patient",
            Facet::Quality => "quality",
            Facet::Consequence => "consequence",
        }
    }
}

impl Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

///
/// A facet selection: either unconstrained or one concrete value.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    ///
    /// Parse a raw selection as emitted by a facet picker. `"All"` and the
    /// empty string both mean unconstrained.
    ///
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_LABEL {
            Selection::All
        } else {
            Selection::Value(raw.to_string())
        }
    }

    /// An empty `Value` is as unconstrained as `All`.
    pub fn is_all(&self) -> bool {
        self.value().is_none()
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::Value(v) if !v.is_empty() => Some(v.as_str()),
            _ => None,
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Selection::parse(&value)
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::parse(value)
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        match value {
            Selection::All => ALL_LABEL.to_string(),
            Selection::Value(v) => v,
        }
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{}", ALL_LABEL),
            Selection::Value(v) => write!(f, "{}", v),
        }
    }
}

///
/// Per-call replacement of facet selections. Lets callers ask "what would
/// be visible if this facet were set differently" without touching the
/// live [FilterState].
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    entries: Vec<(Facet, Selection)>,
}

impl Overrides {
    pub fn none() -> Self {
        Self::default()
    }

    /// Override a single facet to "All".
    pub fn clearing(facet: Facet) -> Self {
        Self::none().with(facet, Selection::All)
    }

    pub fn with(mut self, facet: Facet, selection: Selection) -> Self {
        self.entries.retain(|(f, _)| *f != facet);
        self.entries.push((facet, selection));
        self
    }

    pub fn get(&self, facet: Facet) -> Option<&Selection> {
        self.entries
            .iter()
            .find(|(f, _)| *f == facet)
            .map(|(_, selection)| selection)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// The live filter coordinate of one view: four facet selections plus the
/// free-text search string.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default, rename = "type")]
    pub variant_type: Selection,
    #[serde(default)]
    pub patient: Selection,
    #[serde(default)]
    pub quality: Selection,
    #[serde(default)]
    pub consequence: Selection,
    #[serde(default)]
    pub search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self, facet: Facet) -> &Selection {
        match facet {
            Facet::Type => &self.variant_type,
            Facet::Patient => &self.patient,
            Facet::Quality => &self.quality,
            Facet::Consequence => &self.consequence,
        }
    }

    fn selection_mut(&mut self, facet: Facet) -> &mut Selection {
        match facet {
            Facet::Type => &mut self.variant_type,
            Facet::Patient => &mut self.patient,
            Facet::Quality => &mut self.quality,
            Facet::Consequence => &mut self.consequence,
        }
    }

    ///
    /// Set a facet selection. Returns whether the state changed.
    ///
    pub fn set(&mut self, facet: Facet, selection: Selection) -> bool {
        let slot = self.selection_mut(facet);
        if *slot == selection {
            return false;
        }
        *slot = selection;
        true
    }

    /// Reset a facet to "All". Returns whether the state changed.
    pub fn clear(&mut self, facet: Facet) -> bool {
        self.set(facet, Selection::All)
    }

    pub fn set_search(&mut self, text: &str) -> bool {
        if self.search == text {
            return false;
        }
        self.search = text.to_string();
        true
    }

    pub fn clear_search(&mut self) -> bool {
        self.set_search("")
    }

    ///
    /// The normalized search query (trimmed and lowercased), or `None`
    /// when there is nothing to search for.
    ///
    pub fn search_query(&self) -> Option<String> {
        let query = self.search.trim();
        if query.is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        Facet::ALL.iter().all(|f| self.selection(*f).is_all()) && self.search_query().is_none()
    }

    ///
    /// The state a single evaluation should see once `overrides` are
    /// applied. `self` is left untouched.
    ///
    pub fn with_overrides(&self, overrides: &Overrides) -> FilterState {
        let mut effective = self.clone();
        for facet in Facet::ALL {
            if let Some(selection) = overrides.get(facet) {
                *effective.selection_mut(facet) = selection.clone();
            }
        }
        effective
    }
}
