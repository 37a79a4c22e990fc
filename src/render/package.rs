//! Zip container for Open Packaging Convention documents.

use crate::error::Result;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// How package parts are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PackageCompression {
    /// Deflate every part
    #[default]
    Deflated,
    /// Store parts uncompressed
    Stored,
}

impl PackageCompression {
    fn method(&self) -> CompressionMethod {
        match self {
            PackageCompression::Deflated => CompressionMethod::Deflated,
            PackageCompression::Stored => CompressionMethod::Stored,
        }
    }
}

/// In-memory package builder; parts keep the order they were added in.
pub(crate) struct PackageWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PackageWriter {
    pub(crate) fn new(compression: PackageCompression, modified: DateTime<Utc>) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(compression.method())
            .last_modified_time(zip_timestamp(modified));
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options,
        }
    }

    /// Append one part.
    pub(crate) fn add_part(&mut self, name: &str, data: &[u8]) -> Result<()> {
        log::debug!("Package part {}: {} bytes", name, data.len());
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(data)?;
        Ok(())
    }

    /// Write the central directory and return the package bytes.
    pub(crate) fn finish(self) -> Result<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

/// Zip timestamps start in 1980; anything earlier becomes the format's epoch.
fn zip_timestamp(at: DateTime<Utc>) -> zip::DateTime {
    let Ok(year) = u16::try_from(at.year()) else {
        return zip::DateTime::default();
    };
    zip::DateTime::from_date_and_time(
        year,
        at.month() as u8,
        at.day() as u8,
        at.hour() as u8,
        at.minute() as u8,
        at.second() as u8,
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Read;
    use zip::ZipArchive;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 20).unwrap()
    }

    fn build(compression: PackageCompression) -> Vec<u8> {
        let mut writer = PackageWriter::new(compression, fixed_time());
        writer.add_part("a.xml", b"<a>hello hello hello</a>").unwrap();
        writer.add_part("dir/b.xml", b"<b/>").unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_parts_keep_order_and_content() {
        let bytes = build(PackageCompression::Deflated);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "a.xml");
        assert_eq!(first.compression(), CompressionMethod::Deflated);
        let mut content = String::new();
        first.read_to_string(&mut content).unwrap();
        assert_eq!(content, "<a>hello hello hello</a>");
        drop(first);

        assert_eq!(archive.by_index(1).unwrap().name(), "dir/b.xml");
    }

    #[test]
    fn test_stored_parts() {
        let bytes = build(PackageCompression::Stored);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let part = archive.by_name("dir/b.xml").unwrap();
        assert_eq!(part.compression(), CompressionMethod::Stored);
        assert_eq!(part.size(), 4);
    }

    #[test]
    fn test_part_timestamp() {
        let bytes = build(PackageCompression::Stored);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let modified = archive.by_index(0).unwrap().last_modified().unwrap();
        assert_eq!(
            (modified.year(), modified.month(), modified.day()),
            (2024, 3, 15)
        );
        assert_eq!((modified.hour(), modified.minute(), modified.second()), (10, 30, 20));
    }

    #[test]
    fn test_timestamp_before_1980() {
        let early = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(zip_timestamp(early), zip::DateTime::default());
    }
}
