use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

use super::dataset::{Dataset, Sample};
use crate::error::{BenchErr, Result};

/// Zero-based column holding the age.
pub const AGE_COLUMN: usize = 2;
/// Zero-based column holding the income.
pub const INCOME_COLUMN: usize = 3;

/// Loads exactly `n` samples from the user-data CSV at `path`.
///
/// Reads at most `n` data rows (the header is skipped), stopping early at the
/// first blank line. When fewer rows are read, they are repeated in order
/// until `n` samples exist.
///
/// # Errors
/// - `BenchErr::Io` if the file cannot be opened or read.
/// - `BenchErr::Csv` if a row lacks the age/income columns or they are not numeric.
/// - `BenchErr::EmptyDataset` if the file has no data rows.
/// - `BenchErr::InvalidConfig` if `n` is zero.
pub fn load_samples(path: impl AsRef<Path>, n: usize) -> Result<Dataset> {
    let path = path.as_ref();
    if n == 0 {
        return Err(BenchErr::InvalidConfig(
            "sample count must be greater than 0".into(),
        ));
    }

    let file = File::open(path)?;
    let rows = read_rows(file, n)?;
    info!("read {} row(s) from {}", rows.len(), path.display());

    if rows.is_empty() {
        return Err(BenchErr::EmptyDataset);
    }
    if rows.len() < n {
        debug!("tiling {} row(s) up to {n} samples", rows.len());
    }

    Ok(Dataset::tiled(&rows, n))
}

/// Reads up to `limit` samples from a CSV stream with a header row.
///
/// The data block ends at the first blank line; anything after it is ignored.
pub fn read_rows<R: io::Read>(reader: R, limit: usize) -> Result<Vec<Sample>> {
    let block = data_block(BufReader::new(reader), limit)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(block.as_bytes());

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        rows.push(parse_record(&record)?);
    }

    Ok(rows)
}

/// Data lines after the header, up to `limit` of them or the first blank line.
fn data_block(mut reader: impl BufRead, limit: usize) -> io::Result<String> {
    let mut header = String::new();
    reader.read_line(&mut header)?;

    let mut block = String::new();
    let mut line = String::new();
    for _ in 0..limit {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 || line.trim_end_matches(['\r', '\n']).is_empty() {
            break;
        }
        block.push_str(&line);
        if !line.ends_with('\n') {
            block.push('\n');
        }
    }

    Ok(block)
}

fn parse_record(record: &StringRecord) -> Result<Sample> {
    // 1-based file line: the header sits above the block.
    let line = record.position().map(|p| p.line() + 1).unwrap_or_default();

    let field = |idx: usize, name: &str| -> Result<f64> {
        let raw = record.get(idx).ok_or_else(|| BenchErr::Csv {
            line,
            msg: format!("missing {name} column (index {idx})"),
        })?;

        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(BenchErr::Csv {
                line,
                msg: format!("{name} {raw:?} is not finite"),
            }),
            Err(e) => Err(BenchErr::Csv {
                line,
                msg: format!("{name} {raw:?} is not a number: {e}"),
            }),
        }
    };

    Ok(Sample {
        age: field(AGE_COLUMN, "age")?,
        income: field(INCOME_COLUMN, "income")?,
    })
}
