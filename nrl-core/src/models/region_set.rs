use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::RegionSetError;
use crate::models::Region;
use crate::utils::get_dynamic_reader;

///
/// RegionSet struct, the representation of an interval file of aligned
/// fragments, such as a paired-end bed file.
///
#[derive(Clone, Debug, Default)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

pub struct RegionSetIterator<'a> {
    region_set: &'a RegionSet,
    index: usize,
}

/// Split a record into columns. Tab separated files keep empty columns,
/// anything else is split on runs of whitespace.
fn split_columns(line: &str) -> Vec<&str> {
    if line.contains('\t') {
        line.split('\t').collect()
    } else {
        line.split_whitespace().collect()
    }
}

fn parse_coordinate(value: &str, line: usize, column: usize) -> Result<u32, RegionSetError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| RegionSetError::RegionParseError {
            line,
            reason: format!("column {} is not a non-negative integer: {:?}", column, value),
        })
}

impl RegionSet {
    ///
    /// Read a [RegionSet] from any buffered reader of bed formatted text.
    ///
    /// Lines starting with `track`, `browser` or `#` are collected into the header,
    /// as is a column-name line at the top of the file. Blank lines are skipped.
    ///
    /// # Arguments:
    /// - reader: source of bed lines
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, RegionSetError> {
        let mut regions: Vec<Region> = Vec::new();
        let mut header: String = String::new();
        let mut first_line: bool = true;

        for (idx, line) in reader.lines().enumerate() {
            let line_number = idx + 1;
            let string_line = line?;

            if string_line.trim().is_empty() {
                continue;
            }

            if string_line.starts_with("browser")
                | string_line.starts_with("track")
                | string_line.starts_with('#')
            {
                push_header_line(&mut header, &string_line);
                first_line = false;
                continue;
            }

            let parts = split_columns(&string_line);

            if parts.len() < 3 {
                return Err(RegionSetError::RegionParseError {
                    line: line_number,
                    reason: format!("expected at least 3 columns, found {}", parts.len()),
                });
            }

            // Handling column headers like `chr start end etc` without #
            if first_line {
                first_line = false;
                if parts[1].trim().parse::<u32>().is_err() {
                    push_header_line(&mut header, &string_line);
                    continue;
                }
            }

            let start = parse_coordinate(parts[1], line_number, 2)?;
            let end = parse_coordinate(parts[2], line_number, 3)?;

            if end <= start {
                return Err(RegionSetError::RegionParseError {
                    line: line_number,
                    reason: format!("end ({}) must be greater than start ({})", end, start),
                });
            }

            regions.push(Region {
                chr: parts[0].to_owned(),
                start,
                end,
                rest: Some(parts[3..].join("\t")).filter(|s| !s.is_empty()),
            });
        }

        Ok(RegionSet {
            regions,
            header: match header.is_empty() {
                true => None,
                false => Some(header),
            },
            path: None,
        })
    }
}

fn push_header_line(header: &mut String, line: &str) {
    if !header.is_empty() {
        header.push('\n');
    }
    header.push_str(line);
}

impl TryFrom<&Path> for RegionSet {
    type Error = RegionSetError;

    ///
    /// Create a new [RegionSet] from a bed file.
    ///
    /// # Arguments:
    /// - value: path to bed file on disk, optionally gzipped.
    fn try_from(value: &Path) -> Result<Self, RegionSetError> {
        let reader = get_dynamic_reader(value)?;

        let mut rs = RegionSet::from_reader(reader)?;
        rs.path = Some(value.to_owned());

        debug!("Read {} regions from {}", rs.len(), value.display());

        Ok(rs)
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: &str) -> Result<Self, RegionSetError> {
        RegionSet::try_from(Path::new(value))
    }
}

impl TryFrom<String> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: String) -> Result<Self, RegionSetError> {
        RegionSet::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: PathBuf) -> Result<Self, RegionSetError> {
        RegionSet::try_from(value.as_path())
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            header: None,
            path: None,
        }
    }
}

impl<'a> Iterator for RegionSetIterator<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.region_set.regions.len() {
            let region = &self.region_set.regions[self.index];
            self.index += 1;
            Some(region)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = RegionSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        RegionSetIterator {
            region_set: self,
            index: 0,
        }
    }
}

impl RegionSet {
    ///
    /// Is regionSet empty?
    ///
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    ///
    /// Get number of regions in RegionSet
    ///
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    ///
    /// Calculate all regions width
    ///
    pub fn region_widths(&self) -> Vec<u32> {
        self.regions.iter().map(|region| region.width()).collect()
    }
}

impl Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionSet with {} regions.", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/regionset")
            .join(file_name)
    }

    #[rstest]
    fn test_open_from_path() {
        let file_path = get_test_path("dummy_fragments.bed");
        let region_set = RegionSet::try_from(file_path.as_path()).unwrap();
        assert_eq!(region_set.len(), 8);
        assert_eq!(region_set.path.unwrap(), file_path);
    }

    #[rstest]
    fn test_open_from_string() {
        let file_path = get_test_path("dummy_fragments.bed");
        assert!(RegionSet::try_from(file_path.to_str().unwrap()).is_ok());
    }

    #[rstest]
    fn test_read_headers() {
        let file_path = get_test_path("dummy_fragments.bed");
        let region_set = RegionSet::try_from(file_path).unwrap();

        let header = region_set.header.unwrap();
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("track name=dummy_fragments"));
        assert_eq!(lines[1], "browser position chr1:1-5000");
    }

    #[rstest]
    fn test_region_widths() {
        let file_path = get_test_path("dummy_fragments.bed");
        let region_set = RegionSet::try_from(file_path).unwrap();

        assert_eq!(
            region_set.region_widths(),
            vec![147, 150, 150, 60, 203, 340, 350, 150]
        );
    }

    #[rstest]
    fn test_column_name_header() {
        let text = "chrom\tstart\tend\nchr1\t10\t160\n";
        let region_set = RegionSet::from_reader(Cursor::new(text)).unwrap();

        assert_eq!(region_set.len(), 1);
        assert_eq!(region_set.header, Some("chrom\tstart\tend".to_string()));
    }

    #[rstest]
    fn test_space_separated_columns() {
        let text = "chr1 10 160 frag1\nchr1  200   380\n";
        let region_set = RegionSet::from_reader(Cursor::new(text)).unwrap();

        assert_eq!(region_set.region_widths(), vec![150, 180]);
        assert_eq!(region_set.regions[0].rest, Some("frag1".to_string()));
    }

    #[rstest]
    fn test_blank_lines_skipped() {
        let text = "\nchr1\t10\t160\n\n";
        let region_set = RegionSet::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(region_set.len(), 1);
    }

    #[rstest]
    fn test_empty_file_is_empty_set() {
        let region_set = RegionSet::from_reader(Cursor::new("track name=empty\n")).unwrap();
        assert!(region_set.is_empty());
    }

    #[rstest]
    #[case("chr1\t10\tabc\n", 1)]
    #[case("chr1\t10\t160\nchr1\t-5\t100\n", 2)]
    #[case("chr1\t10\t160\nchr1\t20\t20\n", 2)]
    #[case("chr1\t10\t160\nchr1\t10\n", 2)]
    fn test_malformed_lines(#[case] text: &str, #[case] bad_line: usize) {
        let result = RegionSet::from_reader(Cursor::new(text));
        match result {
            Err(RegionSetError::RegionParseError { line, .. }) => assert_eq!(line, bad_line),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[rstest]
    fn test_missing_file() {
        let result = RegionSet::try_from("not/a/real/file.bed");
        assert!(matches!(result, Err(RegionSetError::FileNotFound(_))));
    }

    #[rstest]
    fn test_iterate_regions() {
        let region_set = RegionSet::from(vec![
            Region {
                chr: "chr1".to_string(),
                start: 0,
                end: 10,
                rest: None,
            },
            Region {
                chr: "chr1".to_string(),
                start: 5,
                end: 30,
                rest: None,
            },
        ]);

        let widths: Vec<u32> = region_set.into_iter().map(|r| r.width()).collect();
        assert_eq!(widths, vec![10, 25]);
    }
}
