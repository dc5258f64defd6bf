use crate::ConfigError;
use ahash::AHashSet;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;

/// Everything needed to start a run: the field, how long to run it and which
/// cells are initially alive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    pub width: usize,
    pub height: usize,
    pub generations: u64,
    /// Alive cells as `(row, col)`.
    pub alive: Vec<(usize, usize)>,
}

/// Supported seed file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    /// The plain format:
    ///
    /// ```text
    /// <height> <width>
    /// <generations>
    /// <row> <col>
    /// <row> <col>
    /// ...
    /// ```
    ///
    /// The first number is the number of rows, matching the `(row, col)`
    /// order of the cell lines. Empty lines and lines starting with `#` are
    /// skipped.
    Plain,

    /// [Extended RLE](https://golly.sourceforge.io/Help/formats.html#rle) format.
    /// The header's `x` and `y` give the field size; only B3/S23 is accepted.
    /// RLE has no notion of a run length, so the generation count comes from
    /// the caller.
    RLE,
}

impl SeedFormat {
    /// Picks the format by file name; `.gz` is looked through.
    pub fn detect(path: &Path) -> Self {
        let name = path.to_string_lossy();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".rle") {
            SeedFormat::RLE
        } else {
            SeedFormat::Plain
        }
    }
}

impl SeedConfig {
    /// Checks dimensions and that every alive cell lies inside the field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::NonPositiveDimension {
                width: self.width as i64,
                height: self.height as i64,
            });
        }
        for &(row, col) in &self.alive {
            if row >= self.height || col >= self.width {
                return Err(ConfigError::CellOutOfBounds {
                    row: row as i64,
                    col: col as i64,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    /// Reads a seed from a file, decompressing it first if the name ends
    /// with `.gz`.
    ///
    /// # Arguments
    ///
    /// * `path` - Seed file; the format is chosen by [`SeedFormat::detect`].
    /// * `generations` - Overrides the generation count of a plain seed and
    ///   provides it for RLE, where it defaults to 0.
    pub fn from_file(path: impl AsRef<Path>, generations: Option<u64>) -> Result<Self> {
        let path = path.as_ref();
        let mut data =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        if path.extension().is_some_and(|ext| ext == "gz") {
            let mut decoder = GzDecoder::new(&data[..]);
            let mut decompressed_data = Vec::new();
            decoder
                .read_to_end(&mut decompressed_data)
                .with_context(|| format!("Failed to decompress {}", path.display()))?;
            data = decompressed_data;
        }

        let seed = match SeedFormat::detect(path) {
            SeedFormat::Plain => {
                let mut seed = Self::from_plain(&data)?;
                if let Some(generations) = generations {
                    seed.generations = generations;
                }
                seed
            }
            SeedFormat::RLE => Self::from_rle(&data, generations.unwrap_or(0))?,
        };
        log::info!(
            "loaded {}: {}x{} field, {} alive cells, {} generations",
            path.display(),
            seed.width,
            seed.height,
            seed.alive.len(),
            seed.generations
        );
        Ok(seed)
    }

    /// Parses a seed in the plain format. See [`SeedFormat::Plain`].
    ///
    /// Duplicate cells are collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a line is malformed, the field has a
    /// non-positive dimension, the generation count is negative or a cell
    /// lies outside the field.
    pub fn from_plain(data: &[u8]) -> Result<Self, ConfigError> {
        let text = std::str::from_utf8(data).map_err(|e| ConfigError::syntax(0, e.to_string()))?;
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (line_no, line) = lines
            .next()
            .ok_or_else(|| ConfigError::syntax(1, "missing field size"))?;
        let [height, width] = parse_numbers::<2>(line_no, line)?;
        if width <= 0 || height <= 0 {
            return Err(ConfigError::NonPositiveDimension { width, height });
        }
        let (width, height) = (width as usize, height as usize);

        let (line_no, line) = lines
            .next()
            .ok_or_else(|| ConfigError::syntax(line_no + 1, "missing generation count"))?;
        let [generations] = parse_numbers::<1>(line_no, line)?;
        if generations < 0 {
            return Err(ConfigError::NegativeGenerations(generations));
        }

        let mut seen = AHashSet::new();
        let mut alive = vec![];
        for (line_no, line) in lines {
            let [row, col] = parse_numbers::<2>(line_no, line)?;
            if row < 0 || col < 0 || row as usize >= height || col as usize >= width {
                return Err(ConfigError::CellOutOfBounds {
                    row,
                    col,
                    width,
                    height,
                });
            }
            let cell = (row as usize, col as usize);
            if seen.insert(cell) {
                alive.push(cell);
            } else {
                log::warn!("line {}: cell ({}, {}) is listed twice", line_no, row, col);
            }
        }

        Ok(Self {
            width,
            height,
            generations: generations as u64,
            alive,
        })
    }

    /// Parses a seed in the Extended RLE format. See [`SeedFormat::RLE`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - The header is missing or malformed, or its size is not positive
    /// - The rule is not B3/S23
    /// - The body contains an unknown character or runs outside the field
    pub fn from_rle(data: &[u8], generations: u64) -> Result<Self, ConfigError> {
        let text = std::str::from_utf8(data).map_err(|e| ConfigError::syntax(0, e.to_string()))?;
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        // Parse header
        let (line_no, header) = lines
            .next()
            .ok_or_else(|| ConfigError::syntax(1, "missing header"))?;
        let mut parts = header.split(',').map(str::trim);

        let parse_dimension = |value: &str| {
            value
                .parse::<i64>()
                .map_err(|e| ConfigError::syntax(line_no, format!("{}: {}", value, e)))
        };

        let width = parse_dimension(extract_value(line_no, parts.next(), "x")?)?;
        let height = parse_dimension(extract_value(line_no, parts.next(), "y")?)?;
        if width <= 0 || height <= 0 {
            return Err(ConfigError::NonPositiveDimension { width, height });
        }
        let (width, height) = (width as usize, height as usize);

        // rule is optional
        if let Some(part) = parts.next() {
            let rule = extract_value(line_no, Some(part), "rule")?;
            if !rule.eq_ignore_ascii_case("B3/S23") {
                return Err(ConfigError::syntax(line_no, "only B3/S23 rule is supported"));
            }
        }

        // Parse pattern data
        let mut alive = vec![];
        let (mut x, mut y, mut count) = (0usize, 0usize, 0usize);
        'body: for (line_no, line) in lines {
            let too_large = || ConfigError::syntax(line_no, "run count too large");
            for b in line.bytes() {
                match b {
                    b'0'..=b'9' => {
                        count = count
                            .checked_mul(10)
                            .and_then(|c| c.checked_add((b - b'0') as usize))
                            .ok_or_else(too_large)?;
                    }
                    b'b' => {
                        x = x.checked_add(count.max(1)).ok_or_else(too_large)?;
                        count = 0;
                    }
                    b'o' => {
                        let c = count.max(1);
                        let end = x.checked_add(c).ok_or_else(too_large)?;
                        if end > width || y >= height {
                            return Err(ConfigError::CellOutOfBounds {
                                row: y as i64,
                                col: (end - 1) as i64,
                                width,
                                height,
                            });
                        }
                        alive.extend((x..end).map(|col| (y, col)));
                        x = end;
                        count = 0;
                    }
                    b'$' => {
                        y = y.checked_add(count.max(1)).ok_or_else(too_large)?;
                        x = 0;
                        count = 0;
                    }
                    b'!' => break 'body,
                    b' ' | b'\t' => continue,
                    _ => {
                        return Err(ConfigError::syntax(
                            line_no,
                            format!("invalid RLE character: '{}'", b as char),
                        ))
                    }
                }
                if x > width {
                    return Err(ConfigError::syntax(
                        line_no,
                        format!("row {} is wider than {}", y, width),
                    ));
                }
            }
        }

        Ok(Self {
            width,
            height,
            generations,
            alive,
        })
    }
}

/// Splits a `key = value` header item and checks the key.
fn extract_value<'a>(
    line_no: usize,
    part: Option<&'a str>,
    expected_key: &str,
) -> Result<&'a str, ConfigError> {
    let part =
        part.ok_or_else(|| ConfigError::syntax(line_no, format!("missing \"{}\"", expected_key)))?;
    let mut items = part.split('=').map(str::trim);
    let key = items.next().unwrap_or_default();
    if key != expected_key {
        return Err(ConfigError::syntax(
            line_no,
            format!("expected {}, got {}", expected_key, key),
        ));
    }
    let value = items.next().unwrap_or_default();
    if items.next().is_some() {
        return Err(ConfigError::syntax(line_no, "missing ',' between '='"));
    }
    Ok(value)
}

/// Parses exactly `N` whitespace-separated integers.
fn parse_numbers<const N: usize>(line_no: usize, line: &str) -> Result<[i64; N], ConfigError> {
    let mut result = [0; N];
    let mut parts = line.split_whitespace();
    for value in result.iter_mut() {
        let part = parts
            .next()
            .ok_or_else(|| ConfigError::syntax(line_no, format!("expected {} numbers", N)))?;
        *value = part
            .parse::<i64>()
            .map_err(|e| ConfigError::syntax(line_no, format!("{}: {}", part, e)))?;
    }
    if parts.next().is_some() {
        return Err(ConfigError::syntax(
            line_no,
            format!("expected {} numbers", N),
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;
    use flate2::{read::GzEncoder, Compression};

    const PLAIN_BLOCK: &[u8] = b"5 5\n3\n1 1\n1 2\n2 1\n2 2\n";

    #[test]
    fn test_plain_block() {
        let seed = SeedConfig::from_plain(PLAIN_BLOCK).unwrap();
        assert_eq!(
            seed,
            SeedConfig {
                width: 5,
                height: 5,
                generations: 3,
                alive: vec![(1, 1), (1, 2), (2, 1), (2, 2)],
            }
        );
        assert_eq!(Grid::from_seed(&seed).unwrap().population(), 4);
    }

    #[test]
    fn test_plain_comments_and_duplicates() {
        let seed = SeedConfig::from_plain(b"# a blinker\n\n6 4\r\n0\n# row col\n2 1\n2 2\n2 3\n2 2\n")
            .unwrap();
        assert_eq!((seed.width, seed.height, seed.generations), (4, 6, 0));
        assert_eq!(seed.alive, vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_plain_rows_come_first() {
        let seed = SeedConfig::from_plain(b"4 2\n1\n3 1\n").unwrap();
        assert_eq!((seed.width, seed.height), (2, 4));
        assert_eq!(seed.alive, vec![(3, 1)]);

        let grid = Grid::from_seed(&seed).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 4));
        assert!(grid.get(3, 1).is_alive());
        assert_eq!(grid.population(), 1);

        assert!(matches!(
            SeedConfig::from_plain(b"4 2\n1\n1 3\n"),
            Err(ConfigError::CellOutOfBounds {
                row: 1,
                col: 3,
                width: 2,
                height: 4
            })
        ));
    }

    #[test]
    fn test_plain_rejects_invalid_input() {
        assert!(matches!(
            SeedConfig::from_plain(b"0 5\n1\n"),
            Err(ConfigError::NonPositiveDimension {
                width: 5,
                height: 0
            })
        ));
        assert!(matches!(
            SeedConfig::from_plain(b"5 -2\n1\n"),
            Err(ConfigError::NonPositiveDimension { .. })
        ));
        assert_eq!(
            SeedConfig::from_plain(b"5 5\n-1\n"),
            Err(ConfigError::NegativeGenerations(-1))
        );
        assert!(matches!(
            SeedConfig::from_plain(b"5 4\n1\n5 0\n"),
            Err(ConfigError::CellOutOfBounds { row: 5, col: 0, .. })
        ));
        assert!(matches!(
            SeedConfig::from_plain(b"5 4\n1\n0 -1\n"),
            Err(ConfigError::CellOutOfBounds { row: 0, col: -1, .. })
        ));
        assert!(matches!(
            SeedConfig::from_plain(b"5 4\n1\n1 2 3\n"),
            Err(ConfigError::Syntax { line: 3, .. })
        ));
        assert!(matches!(
            SeedConfig::from_plain(b"5 4\n"),
            Err(ConfigError::Syntax { .. })
        ));
        assert!(matches!(
            SeedConfig::from_plain(b"5 x\n1\n"),
            Err(ConfigError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_rle_glider() {
        let seed = SeedConfig::from_rle(b"#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!", 4)
            .unwrap();
        assert_eq!((seed.width, seed.height, seed.generations), (3, 3, 4));
        assert_eq!(seed.alive, vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);

        let mut expected = Grid::new(3, 3);
        expected.stamp_glider(0, 0);
        assert_eq!(Grid::from_seed(&seed).unwrap(), expected);
    }

    #[test]
    fn test_rle_multiline_and_blank_rows() {
        let seed = SeedConfig::from_rle(b"x = 4, y = 5\n2o$2o\n2$\n4o!", 0).unwrap();
        assert_eq!(
            seed.alive,
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (3, 0), (3, 1), (3, 2), (3, 3)]
        );
    }

    #[test]
    fn test_rle_rejects_invalid_input() {
        assert!(SeedConfig::from_rle(b"", 0).is_err());
        assert!(SeedConfig::from_rle(b"y = 3, x = 3\no!", 0).is_err());
        assert!(SeedConfig::from_rle(b"x = 3, y = 3, rule = B36/S23\no!", 0).is_err());
        assert!(matches!(
            SeedConfig::from_rle(b"x = 3, y = 3\n4o!", 0),
            Err(ConfigError::CellOutOfBounds { .. })
        ));
        assert!(matches!(
            SeedConfig::from_rle(b"x = 3, y = 1\nbo$o!", 0),
            Err(ConfigError::CellOutOfBounds { row: 1, .. })
        ));
        assert!(matches!(
            SeedConfig::from_rle(b"x = 3, y = 3\n2bz!", 0),
            Err(ConfigError::Syntax { line: 2, .. })
        ));
    }

    #[test]
    fn test_rle_huge_run_count() {
        assert!(matches!(
            SeedConfig::from_rle(b"x = 3, y = 3\n9999999999999999999999999o!", 0),
            Err(ConfigError::Syntax { line: 2, .. })
        ));
        assert!(matches!(
            SeedConfig::from_rle(b"x = 3, y = 3\n9999999999999999999999999b!", 0),
            Err(ConfigError::Syntax { line: 2, .. })
        ));
        assert!(matches!(
            SeedConfig::from_rle(b"x = 3, y = 3\n9999999999999999999999999$o!", 0),
            Err(ConfigError::Syntax { line: 2, .. })
        ));
        // large but representable runs are plain out-of-field errors
        assert!(matches!(
            SeedConfig::from_rle(b"x = 3, y = 3\n4000000000o!", 0),
            Err(ConfigError::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(SeedFormat::detect(Path::new("a/glider.rle")), SeedFormat::RLE);
        assert_eq!(SeedFormat::detect(Path::new("glider.rle.gz")), SeedFormat::RLE);
        assert_eq!(SeedFormat::detect(Path::new("input.in")), SeedFormat::Plain);
        assert_eq!(SeedFormat::detect(Path::new("input.in.gz")), SeedFormat::Plain);
    }

    #[test]
    fn test_from_file_gzip() {
        let mut encoder = GzEncoder::new(PLAIN_BLOCK, Compression::default());
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).unwrap();

        let dir = std::env::temp_dir().join(format!("life_census_loader_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("block.in.gz");
        std::fs::write(&path, compressed).unwrap();

        let seed = SeedConfig::from_file(&path, None).unwrap();
        assert_eq!(seed, SeedConfig::from_plain(PLAIN_BLOCK).unwrap());
        let seed = SeedConfig::from_file(&path, Some(10)).unwrap();
        assert_eq!(seed.generations, 10);

        std::fs::remove_dir_all(&dir).unwrap();
        assert!(SeedConfig::from_file(&path, None).is_err());
    }
}
