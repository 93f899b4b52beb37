use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::RegionSetError;

/// Extensions that are dropped from an input name when deriving output names.
const BED_LIKE_EXTENSIONS: [&str; 4] = ["bed", "narrowPeak", "tsv", "txt"];

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>, RegionSetError> {
    if !path.is_file() {
        return Err(RegionSetError::FileNotFound(path.display().to_string()));
    }

    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)
        .map_err(|e| RegionSetError::FileReadError(format!("{}: {}", path.display(), e)))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Strip `.gz` and one bed-like extension from the file name of `path`.
///
/// `data/wt.bed.gz` becomes `wt`, `runs/sample.1.bed` becomes `sample.1`.
/// Returns `None` when the path has no file name.
///
pub fn strip_bed_extensions(path: &Path) -> Option<String> {
    let mut name = path.file_name()?.to_string_lossy().to_string();

    if let Some(stripped) = name.strip_suffix(".gz") {
        name = stripped.to_string();
    }

    for ext in BED_LIKE_EXTENSIONS {
        if let Some(stripped) = name.strip_suffix(&format!(".{}", ext)) {
            name = stripped.to_string();
            break;
        }
    }

    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("wt.bed", "wt")]
    #[case("data/wt.bed.gz", "wt")]
    #[case("runs/sample.1.bed", "sample.1")]
    #[case("peaks.narrowPeak", "peaks")]
    #[case("fragments", "fragments")]
    fn test_strip_bed_extensions(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            strip_bed_extensions(Path::new(input)),
            Some(expected.to_string())
        );
    }

    #[rstest]
    fn test_missing_file_is_not_found() {
        let result = get_dynamic_reader(Path::new("does/not/exist.bed"));
        assert!(matches!(result, Err(RegionSetError::FileNotFound(_))));
    }

    #[rstest]
    fn test_gz_reader_roundtrip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frags.bed.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"chr1\t10\t160\n").unwrap();
        encoder.finish().unwrap();

        let mut line = String::new();
        get_dynamic_reader(&path)
            .unwrap()
            .read_line(&mut line)
            .unwrap();
        assert_eq!(line, "chr1\t10\t160\n");
    }
}
