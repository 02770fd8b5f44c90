use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// HGVS nomenclature attached to a variant. Upstream callers emit either a
/// single name or an ordered list (primary name first).
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hgvs {
    Single(String),
    Multiple(Vec<String>),
}

impl Hgvs {
    ///
    /// Normalize to an ordered list of names. An empty single name
    /// normalizes to an empty list.
    ///
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Hgvs::Single(name) if name.is_empty() => Vec::new(),
            Hgvs::Single(name) => vec![name.clone()],
            Hgvs::Multiple(names) => names.clone(),
        }
    }

    ///
    /// The primary (first) name, if there is a non-empty one.
    ///
    pub fn primary(&self) -> Option<&str> {
        let first = match self {
            Hgvs::Single(name) => Some(name.as_str()),
            Hgvs::Multiple(names) => names.first().map(String::as_str),
        };
        first.filter(|name| !name.is_empty())
    }
}

impl From<&str> for Hgvs {
    fn from(value: &str) -> Self {
        Hgvs::Single(value.to_string())
    }
}

impl From<Vec<String>> for Hgvs {
    fn from(value: Vec<String>) -> Self {
        Hgvs::Multiple(value)
    }
}

///
/// One genomic call: position plus ref/alt alleles, with the quality,
/// type and consequence metadata the facets filter on.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub position: u64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub alt: String,
    #[serde(rename = "type")]
    pub variant_type: String,
    pub patient: String,

    /// Quality flag, e.g. `PASS`. `None` means the caller reported no quality data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgvs: Option<Hgvs>,

    /// The same call observed in other patients.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polymorphism: Vec<Variant>,
}

impl Variant {
    pub fn new(
        position: u64,
        reference: &str,
        alt: &str,
        variant_type: &str,
        patient: &str,
    ) -> Self {
        Variant {
            position,
            reference: reference.to_string(),
            alt: alt.to_string(),
            variant_type: variant_type.to_string(),
            patient: patient.to_string(),
            filter: None,
            consequence: None,
            hgvs: None,
            polymorphism: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    pub fn with_consequence(mut self, consequence: &str) -> Self {
        self.consequence = Some(consequence.to_string());
        self
    }

    pub fn with_hgvs(mut self, hgvs: impl Into<Hgvs>) -> Self {
        self.hgvs = Some(hgvs.into());
        self
    }

    pub fn with_companion(mut self, companion: Variant) -> Self {
        self.polymorphism.push(companion);
        self
    }

    ///
    /// Every patient this call belongs to: the owning patient first, then
    /// the companions' patients in order, without repeats.
    ///
    pub fn involved_patients(&self) -> Vec<&str> {
        let mut patients: Vec<&str> = vec![self.patient.as_str()];
        for companion in &self.polymorphism {
            if !patients.contains(&companion.patient.as_str()) {
                patients.push(companion.patient.as_str());
            }
        }
        patients
    }

    ///
    /// The raw `hgvs` field normalized to a list, empty when absent.
    ///
    pub fn raw_hgvs(&self) -> Vec<String> {
        self.hgvs.as_ref().map(Hgvs::to_vec).unwrap_or_default()
    }

    pub fn primary_hgvs(&self) -> Option<&str> {
        self.hgvs.as_ref().and_then(Hgvs::primary)
    }

    ///
    /// Compact allele label, `ref` + `position` + `alt` (e.g. `A100G`).
    ///
    pub fn allele_label(&self) -> String {
        format!("{}{}{}", self.reference, self.position, self.alt)
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.patient, self.allele_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_deserialize_single_and_list_hgvs() {
        let raw = r#"[
            {"position": 100, "ref": "A", "alt": "G", "type": "SNV", "patient": "P1",
             "filter": "PASS", "hgvs": "NM_000088.3:c.10A>G"},
            {"position": 200, "ref": "AT", "alt": "A", "type": "Indel", "patient": "P2",
             "hgvs": ["NM_000088.3:c.20del", "NM_000088.4:c.20del"],
             "polymorphism": [{"position": 200, "ref": "AT", "alt": "A", "type": "Indel", "patient": "P3"}]}
        ]"#;
        let variants: Vec<Variant> = serde_json::from_str(raw).unwrap();

        assert_eq!(variants[0].raw_hgvs(), vec!["NM_000088.3:c.10A>G".to_string()]);
        assert_eq!(variants[0].filter.as_deref(), Some("PASS"));
        assert_eq!(variants[1].raw_hgvs().len(), 2);
        assert_eq!(variants[1].primary_hgvs(), Some("NM_000088.3:c.20del"));
        assert_eq!(variants[1].filter, None);
        assert_eq!(variants[1].involved_patients(), vec!["P2", "P3"]);
    }

    #[rstest]
    fn test_empty_hgvs_has_no_primary() {
        let variant = Variant::new(5, "C", "T", "SNV", "P1").with_hgvs("");
        assert_eq!(variant.primary_hgvs(), None);
        assert!(variant.raw_hgvs().is_empty());

        let variant = Variant::new(5, "C", "T", "SNV", "P1");
        assert!(variant.raw_hgvs().is_empty());
    }

    #[rstest]
    fn test_involved_patients_skips_repeats() {
        let variant = Variant::new(7, "G", "C", "SNV", "P1")
            .with_companion(Variant::new(7, "G", "C", "SNV", "P2"))
            .with_companion(Variant::new(7, "G", "C", "SNV", "P1"));
        assert_eq!(variant.involved_patients(), vec!["P1", "P2"]);
    }

    #[rstest]
    fn test_allele_label_and_display() {
        let variant = Variant::new(100, "A", "G", "SNV", "P1");
        assert_eq!(variant.allele_label(), "A100G");
        assert_eq!(variant.to_string(), "P1:A100G");
    }
}
