use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
    slice,
};

use serde::{Deserialize, Serialize};

use super::{Observation, ObservationParseError};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("failed to read dataset")]
    Io(io::Error),
    #[display("line {line}: {source}")]
    Parse {
        line: usize,
        source: ObservationParseError,
    },
    #[display("observation #{index}: {source}")]
    Invalid {
        index: usize,
        source: ObservationParseError,
    },
    #[display("failed to parse dataset JSON")]
    Json(serde_json::Error),
}

/// An ordered collection of historical observations.
///
/// # Example
///
/// ```
/// use awale_engine::Dataset;
///
/// let text = "# header\n4,4,4,4,4,4,4,4,4,4,4,4,3,G\n\n0,5,5,5,5,4,4,4,4,4,4,4,6,P\n";
/// let dataset = Dataset::from_reader(text.as_bytes()).unwrap();
/// assert_eq!(dataset.len(), 2);
/// assert!(dataset.iter().next().unwrap().won);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    #[must_use]
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Reads the comma-separated text format, one observation per line.
    pub fn from_reader<R>(reader: R) -> Result<Self, DatasetError>
    where
        R: BufRead,
    {
        let mut observations = vec![];
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(DatasetError::Io)?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let observation = line
                .parse()
                .map_err(|source| DatasetError::Parse { line: i + 1, source })?;
            observations.push(observation);
        }
        Ok(Self { observations })
    }

    /// Reads a JSON array of observations.
    pub fn from_json_reader<R>(reader: R) -> Result<Self, DatasetError>
    where
        R: Read,
    {
        let dataset: Self = serde_json::from_reader(reader).map_err(DatasetError::Json)?;
        for (index, observation) in dataset.iter().enumerate() {
            if observation.move_index().is_none() {
                return Err(DatasetError::Invalid {
                    index,
                    source: ObservationParseError::MoveOutOfRange(observation.move_number),
                });
            }
        }
        Ok(dataset)
    }

    /// Opens a dataset file; `.json` files are read as JSON, anything else as text.
    pub fn open<P>(path: P) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path).map_err(DatasetError::Io)?);
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_reader(reader)
        } else {
            Self::from_reader(reader)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
