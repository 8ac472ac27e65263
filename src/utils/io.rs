use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::ForestError;
use crate::forest::forest::ForestConfig;
use crate::utils::structures::{Feature, Sample};

/// Column holding the sample name. Every other column is a feature.
pub const NAME_COLUMN: &str = "name";

/// Reads samples from a delimited file whose first row names the columns.
pub fn read_csv(path: impl AsRef<Path>, delimiter: u8) -> Result<Vec<Sample>, ForestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ForestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(BufReader::new(file));
    let csv_error = |source| ForestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let header = reader.headers().map_err(csv_error)?.clone();
    let name_column = header.iter().position(|column| column == NAME_COLUMN);
    if header.len() - name_column.map_or(0, |_| 1) == 0 {
        return Err(ForestError::EmptyHeader {
            path: path.to_path_buf(),
        });
    }

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let mut sample = Sample::new(name_column.and_then(|i| record.get(i)).unwrap_or(""));
        for (i, (column, cell)) in header.iter().zip(record.iter()).enumerate() {
            if Some(i) == name_column {
                continue;
            }
            let value = cell
                .trim()
                .parse::<u64>()
                .map_err(|_| ForestError::InvalidValue {
                    row,
                    column: column.to_string(),
                    value: cell.to_string(),
                })?;
            sample.add_feature(Feature::new(column, value));
        }
        samples.push(sample);
    }
    Ok(samples)
}

/// Reads a [`ForestConfig`] from the first data row of a file with an
/// `n_trees,max_depth` header.
pub fn read_config(path: impl AsRef<Path>) -> Result<ForestConfig, ForestError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| ForestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    match reader.deserialize::<ForestConfig>().next() {
        Some(config) => config.map_err(|source| ForestError::Csv {
            path: path.to_path_buf(),
            source,
        }),
        None => Err(ForestError::MissingConfig {
            path: path.to_path_buf(),
        }),
    }
}

/// Writes rows of displayable values, e.g. per-sample scores.
pub fn write_csv<T>(
    path: impl AsRef<Path>,
    data: Vec<Vec<T>>,
    header: Option<Vec<String>>,
) -> Result<(), ForestError>
where
    T: std::fmt::Display,
{
    let path = path.as_ref();
    let io_error = |source| ForestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_error = |source| ForestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    if let Some(header) = header {
        writer.write_record(header).map_err(csv_error)?;
    }
    for row in data {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(io_error)
}
