//! CSV sinks for harvested rows.

use std::fs::{File, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// A row type with a fixed column order.
pub trait CsvRow: Serialize {
    /// Column names, in field order.
    const HEADER: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommenterRow {
    #[serde(rename = "linkedinUrl")]
    pub linkedin_url: String,
    pub name: String,
    pub company: String,
}

impl CsvRow for CommenterRow {
    const HEADER: &'static [&'static str] = &["linkedinUrl", "name", "company"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagerRow {
    pub name: String,
    pub url_profile: String,
    pub company: String,
}

impl CsvRow for EngagerRow {
    const HEADER: &'static [&'static str] = &["name", "url_profile", "company"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRow {
    pub name: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "profileUrl")]
    pub profile_url: String,
}

impl CsvRow for ProfileRow {
    const HEADER: &'static [&'static str] = &["name", "company", "location", "profileUrl"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRow {
    pub post_url: String,
}

impl CsvRow for PostRow {
    const HEADER: &'static [&'static str] = &["post_url"];
}

/// Writes rows of one type to a CSV file.
pub struct CsvSink<R> {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: usize,
    _row: PhantomData<R>,
}

impl<R: CsvRow> CsvSink<R> {
    /// Truncate `path` and write the header.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Self::open(file, path, true)
    }

    /// Append to `path`, writing the header only if the file is new.
    pub fn append(path: &Path) -> Result<Self> {
        let existed = path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {} for append", path.display()))?;
        Self::open(file, path, !existed)
    }

    fn open(file: File, path: &Path, write_header: bool) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if write_header {
            writer
                .write_record(R::HEADER)
                .with_context(|| format!("Failed to write header to {}", path.display()))?;
        }
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
            _row: PhantomData,
        })
    }

    pub fn write(&mut self, row: &R) -> Result<()> {
        self.writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", self.path.display()))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and return the number of rows written through this sink.
    pub fn finish(mut self) -> Result<usize> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        Ok(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commenter(name: &str) -> CommenterRow {
        CommenterRow {
            linkedin_url: format!("https://www.linkedin.com/in/{name}"),
            name: name.to_string(),
            company: "Acme, Inc".to_string(),
        }
    }

    #[test]
    fn create_writes_header_even_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let sink = CsvSink::<PostRow>::create(&path).unwrap();
        assert_eq!(sink.finish().unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "post_url\n");
    }

    #[test]
    fn create_truncates_and_quotes_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        std::fs::write(&path, "stale\n").unwrap();

        let mut sink = CsvSink::create(&path).unwrap();
        sink.write(&commenter("jane")).unwrap();
        assert_eq!(sink.finish().unwrap(), 1);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "linkedinUrl,name,company\nhttps://www.linkedin.com/in/jane,jane,\"Acme, Inc\"\n"
        );
    }

    #[test]
    fn append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.csv");
        let row = ProfileRow {
            name: "Jane".into(),
            company: "Initech".into(),
            location: "Austin".into(),
            profile_url: "https://www.linkedin.com/in/jane".into(),
        };

        for _ in 0..2 {
            let mut sink = CsvSink::append(&path).unwrap();
            sink.write(&row).unwrap();
            sink.finish().unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "name,company,location,profileUrl");
        assert_eq!(lines[1], lines[2]);
    }
}
