use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::VariantIndexError;
use crate::models::{Facet, Variant};
use crate::utils::get_dynamic_reader;

///
/// VariantIndex struct, the in-memory collection of variant records for one
/// analysis. The collection is only ever replaced wholesale.
///
#[derive(Clone, Debug, Default)]
pub struct VariantIndex {
    variants: Vec<Variant>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for VariantIndex {
    type Error = VariantIndexError;

    ///
    /// Create a new [VariantIndex] from a JSON array of variant records.
    ///
    /// # Arguments:
    /// - value: path to a `.json` or `.json.gz` file on disk.
    fn try_from(value: &Path) -> Result<Self, VariantIndexError> {
        if !value.is_file() {
            return Err(VariantIndexError::FileReadError(
                value.display().to_string(),
            ));
        }
        let reader = get_dynamic_reader(value)
            .map_err(|e| VariantIndexError::FileReadError(format!("{:#}", e)))?;
        let variants: Vec<Variant> = serde_json::from_reader(reader)?;

        if variants.is_empty() {
            return Err(VariantIndexError::EmptyVariantSet(
                value.display().to_string(),
            ));
        }
        info!("Loaded {} variants from {}", variants.len(), value.display());

        Ok(VariantIndex {
            variants,
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for VariantIndex {
    type Error = VariantIndexError;

    fn try_from(value: &str) -> Result<Self, VariantIndexError> {
        VariantIndex::try_from(Path::new(value))
    }
}

impl From<Vec<Variant>> for VariantIndex {
    fn from(variants: Vec<Variant>) -> Self {
        VariantIndex {
            variants,
            path: None,
        }
    }
}

impl VariantIndex {
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    ///
    /// Swap in the records of a new analysis run.
    ///
    pub fn replace(&mut self, variants: Vec<Variant>) {
        info!(
            "Refreshing variant index: {} -> {} records",
            self.variants.len(),
            variants.len()
        );
        self.variants = variants;
    }

    ///
    /// Look up a top-level record by position and owning patient.
    ///
    pub fn find(&self, position: u64, patient: Option<&str>) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.position == position && patient.is_none_or(|p| v.patient == p))
    }

    pub fn types(&self) -> Vec<String> {
        collect_distinct(self.variants.iter().map(|v| Some(v.variant_type.as_str())))
    }

    /// Distinct patients, including those only seen as companions.
    pub fn patients(&self) -> Vec<String> {
        collect_distinct(
            self.variants
                .iter()
                .flat_map(|v| v.involved_patients())
                .map(Some),
        )
    }

    pub fn qualities(&self) -> Vec<String> {
        collect_distinct(self.variants.iter().map(|v| v.filter.as_deref()))
    }

    pub fn consequences(&self) -> Vec<String> {
        collect_distinct(self.variants.iter().map(|v| v.consequence.as_deref()))
    }

    pub fn values(&self, facet: Facet) -> Vec<String> {
        match facet {
            Facet::Type => self.types(),
            Facet::Patient => self.patients(),
            Facet::Quality => self.qualities(),
            Facet::Consequence => self.consequences(),
        }
    }
}

fn collect_distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[fixture]
    fn index() -> VariantIndex {
        VariantIndex::from(vec![
            Variant::new(100, "A", "G", "SNV", "P1")
                .with_filter("PASS")
                .with_consequence("missense_variant"),
            Variant::new(200, "AT", "A", "Indel", "P2")
                .with_filter("LOW")
                .with_companion(Variant::new(200, "AT", "A", "Indel", "P3")),
            Variant::new(300, "C", "T", "SNV", "P1"),
        ])
    }

    #[rstest]
    fn test_facet_values(index: VariantIndex) {
        assert_eq!(index.types(), vec!["Indel", "SNV"]);
        assert_eq!(index.patients(), vec!["P1", "P2", "P3"]);
        assert_eq!(index.qualities(), vec!["LOW", "PASS"]);
        assert_eq!(index.consequences(), vec!["missense_variant"]);
        assert_eq!(index.values(Facet::Quality), index.qualities());
    }

    #[rstest]
    fn test_find(index: VariantIndex) {
        assert_eq!(index.find(300, None).map(|v| v.patient.as_str()), Some("P1"));
        assert!(index.find(300, Some("P2")).is_none());
        assert!(index.find(999, None).is_none());
    }

    #[rstest]
    fn test_replace_is_wholesale(mut index: VariantIndex) {
        index.replace(vec![Variant::new(1, "G", "A", "SNV", "P9")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.patients(), vec!["P9"]);
    }

    #[rstest]
    fn test_read_from_file() -> Result<(), Box<dyn std::error::Error + 'static>> {
        let mut file = NamedTempFile::with_suffix(".json")?;
        write!(
            file,
            r#"[{{"position": 42, "ref": "G", "alt": "T", "type": "SNV", "patient": "P1"}}]"#
        )?;
        let index = VariantIndex::try_from(file.path())?;
        assert_eq!(index.len(), 1);
        assert_eq!(index.variants()[0].position, 42);
        Ok(())
    }

    #[rstest]
    fn test_empty_file_is_an_error() -> Result<(), Box<dyn std::error::Error + 'static>> {
        let mut file = NamedTempFile::with_suffix(".json")?;
        write!(file, "[]")?;
        let result = VariantIndex::try_from(file.path());
        assert!(matches!(result, Err(VariantIndexError::EmptyVariantSet(_))));
        Ok(())
    }

    #[rstest]
    fn test_missing_file_is_an_error() {
        let result = VariantIndex::try_from("/definitely/not/here.json");
        assert!(matches!(result, Err(VariantIndexError::FileReadError(_))));
    }
}
