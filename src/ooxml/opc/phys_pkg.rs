//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! The reader inflates every member once up front; packages produced by this
//! crate are small enough that lazy access buys nothing.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Read access to the members of a ZIP-based OPC package.
pub struct PhysPkgReader {
    /// Member name to decompressed content
    members: HashMap<String, Vec<u8>>,
}

impl PhysPkgReader {
    /// Open an OPC package from a file path.
    ///
    /// # Errors
    /// `PackageNotFound` when the path does not exist, `ZipError` when the
    /// file is not a readable ZIP archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let file = std::fs::File::open(path)?;
        Self::new(std::io::BufReader::new(file))
    }

    /// Read a package from any seekable reader.
    pub fn new<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut members = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let mut blob = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut blob)?;
            members.insert(entry.name().to_string(), blob);
        }

        Ok(Self { members })
    }

    /// Read a package held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::new(Cursor::new(data))
    }

    /// Binary content for a part.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<&[u8]> {
        self.members
            .get(pack_uri.membername())
            .map(Vec::as_slice)
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// The `[Content_Types].xml` member, required in every package.
    pub fn content_types_xml(&self) -> Result<&[u8]> {
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        self.blob_for(&content_types_uri)
    }

    /// Relationships XML for a source, or `None` when it has no `.rels` member.
    pub fn rels_xml_for(&self, source_uri: &PackURI) -> Result<Option<&[u8]>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        Ok(self.members.get(rels_uri.membername()).map(Vec::as_slice))
    }

    #[inline]
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.members.contains_key(pack_uri.membername())
    }

    /// Member names, sorted.
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Consume the reader, handing over the decompressed members.
    pub fn into_members(self) -> HashMap<String, Vec<u8>> {
        self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Writes parts into an in-memory ZIP archive with Deflate compression.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    /// Write one member.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.archive.start_file(pack_uri.membername(), self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new();
        let pack_uri = PackURI::new("/ppt/presentation.xml").unwrap();
        writer.write(&pack_uri, b"<p:presentation/>").unwrap();
        let zip_data = writer.finish().unwrap();

        let reader = PhysPkgReader::from_bytes(&zip_data).unwrap();
        assert_eq!(reader.blob_for(&pack_uri).unwrap(), b"<p:presentation/>");
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn test_rels_lookup() {
        let mut writer = PhysPkgWriter::new();

        let content_types = PackURI::new(CONTENT_TYPES_URI).unwrap();
        let pkg_rels = PackURI::new("/_rels/.rels").unwrap();
        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();

        writer.write(&content_types, b"<Types/>").unwrap();
        writer.write(&pkg_rels, b"<Relationships/>").unwrap();
        writer.write(&slide, b"<p:sld/>").unwrap();

        let reader = PhysPkgReader::from_bytes(&writer.finish().unwrap()).unwrap();

        assert_eq!(reader.content_types_xml().unwrap(), b"<Types/>");
        assert_eq!(
            reader.rels_xml_for(&PackURI::new("/").unwrap()).unwrap(),
            Some(&b"<Relationships/>"[..])
        );
        assert_eq!(reader.rels_xml_for(&slide).unwrap(), None);
        assert_eq!(
            reader.member_names(),
            vec!["[Content_Types].xml", "_rels/.rels", "ppt/slides/slide1.xml"]
        );
    }

    #[test]
    fn test_missing_member() {
        let reader = PhysPkgReader::from_bytes(&PhysPkgWriter::new().finish().unwrap()).unwrap();
        let uri = PackURI::new("/ppt/presentation.xml").unwrap();
        assert!(!reader.contains(&uri));
        assert!(matches!(reader.blob_for(&uri), Err(OpcError::PartNotFound(_))));
    }

    #[test]
    fn test_open_missing_file() {
        assert!(matches!(
            PhysPkgReader::open("/nonexistent/deck.pptx"),
            Err(OpcError::PackageNotFound(_))
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(PhysPkgReader::from_bytes(b"plain text").is_err());
    }
}
