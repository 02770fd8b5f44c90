use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let inner: Box<dyn Read> = if path.extension() == Some(OsStr::new("gz")) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(BufReader::new(inner))
}

///
/// Read previously persisted HGVS alternatives: a JSON object mapping each
/// primary HGVS name to its list of alternative names.
///
/// # Arguments
///
/// - path: path to a `.json` or `.json.gz` file
///
pub fn read_alternatives(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    let reader = get_dynamic_reader(path)?;
    let alternatives: HashMap<String, Vec<String>> = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse alternatives from {}", path.display()))?;
    Ok(alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    fn test_read_alternatives_plain() -> Result<()> {
        let mut file = NamedTempFile::with_suffix(".json")?;
        write!(file, r#"{{"NM_1:c.1A>G": ["NM_1:c.1A>G", "NC_1:g.100A>G"]}}"#)?;
        let alternatives = read_alternatives(file.path())?;
        assert_eq!(alternatives["NM_1:c.1A>G"].len(), 2);
        Ok(())
    }

    #[rstest]
    fn test_read_alternatives_gzipped() -> Result<()> {
        let file = NamedTempFile::with_suffix(".json.gz")?;
        let mut encoder = GzEncoder::new(file.reopen()?, Compression::default());
        encoder.write_all(br#"{"NM_2:c.5del": ["NC_2:g.50del"]}"#)?;
        encoder.finish()?;

        let alternatives = read_alternatives(file.path())?;
        assert_eq!(alternatives["NM_2:c.5del"], vec!["NC_2:g.50del".to_string()]);
        Ok(())
    }

    #[rstest]
    fn test_missing_file_has_context() {
        let err = read_alternatives(Path::new("/no/such/alternatives.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open file"));
    }
}
