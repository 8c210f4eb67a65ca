use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;

/// JSON sink: a file when a path is given, stdout otherwise.
pub struct Output {
    writer: Box<dyn Write>,
    label: String,
}

impl Output {
    pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        Self::from_path(path)?.write_json(value)
    }

    pub fn from_path(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::create(path.to_path_buf()),
            None => Ok(Self {
                writer: Box::new(io::stdout().lock()),
                label: "stdout".to_owned(),
            }),
        }
    }

    fn create(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            label: path.display().to_string(),
        })
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.label))?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to flush output to {}", self.label))?;
        Ok(())
    }
}

/// Parses a duration given in (possibly fractional) seconds.
pub fn parse_seconds(s: &str) -> anyhow::Result<Duration> {
    let secs = s
        .parse::<f64>()
        .with_context(|| format!("Invalid number of seconds: {s}"))?;
    Duration::try_from_secs_f64(secs).with_context(|| format!("Invalid duration: {s} seconds"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_seconds("0.25").unwrap(), Duration::from_millis(250));
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("soon").is_err());
    }
}
