use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;
use memchr::memmem;
use quick_xml::Reader;
/// Open Packaging Convention (OPC) objects related to package parts.
///
/// A part is a single member of the package: a partname, a content type,
/// its bytes and the relationships it owns.
use std::sync::Arc;

/// A part in an OPC package.
pub trait Part {
    fn partname(&self) -> &PackURI;

    fn content_type(&self) -> &str;

    /// Raw content of the part.
    fn blob(&self) -> &[u8];

    fn rels(&self) -> &Relationships;

    fn rels_mut(&mut self) -> &mut Relationships;

    /// Add or get an internal relationship to `target_partname` and return its rId.
    ///
    /// The target is stored relative to this part's base URI.
    fn relate_to(&mut self, target_partname: &PackURI, reltype: &str) -> String {
        let target_ref = target_partname.relative_ref(self.partname().base_uri());
        self.rels_mut().get_or_add(reltype, &target_ref)
    }

    /// Target reference for a relationship ID.
    fn target_ref(&self, r_id: &str) -> Result<&str> {
        self.rels()
            .get(r_id)
            .map(|rel| rel.target_ref())
            .ok_or_else(|| OpcError::RelationshipNotFound(format!("rId: {}", r_id)))
    }

    /// Count `r:id`/`r:embed` references to a relationship ID in the part content.
    fn rel_ref_count(&self, r_id: &str) -> usize {
        let blob = self.blob();
        [format!(r#"r:id="{}""#, r_id), format!(r#"r:embed="{}""#, r_id)]
            .iter()
            .map(|pattern| memmem::Finder::new(pattern.as_bytes()).find_iter(blob).count())
            .sum()
    }
}

/// Part holding opaque binary content, e.g. an image.
#[derive(Debug)]
pub struct BlobPart {
    partname: PackURI,
    content_type: String,
    blob: Arc<Vec<u8>>,
    rels: Relationships,
}

impl BlobPart {
    pub fn new(partname: PackURI, content_type: String, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self {
            partname,
            content_type,
            blob: Arc::new(blob),
            rels,
        }
    }

    /// Share the blob without copying it.
    #[inline]
    pub fn shared_blob(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.blob)
    }
}

impl Part for BlobPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> &[u8] {
        &self.blob
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// A part whose content is UTF-8 XML.
///
/// The bytes are validated on load and handed to quick-xml on demand,
/// so a part can be parsed any number of times without copying.
#[derive(Debug)]
pub struct XmlPart {
    partname: PackURI,
    content_type: String,
    xml_bytes: Arc<Vec<u8>>,
    rels: Relationships,
}

impl XmlPart {
    pub fn new(partname: PackURI, content_type: String, xml_bytes: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self::with_rels(partname, content_type, xml_bytes, rels)
    }

    /// Build a part together with relationships already allocated for it.
    pub fn with_rels(
        partname: PackURI,
        content_type: String,
        xml_bytes: Vec<u8>,
        rels: Relationships,
    ) -> Self {
        Self {
            partname,
            content_type,
            xml_bytes: Arc::new(xml_bytes),
            rels,
        }
    }

    /// Load an XML part from raw data, rejecting content that is not UTF-8.
    pub fn load(partname: PackURI, content_type: String, xml_bytes: Vec<u8>) -> Result<Self> {
        std::str::from_utf8(&xml_bytes)
            .map_err(|e| OpcError::XmlError(format!("Invalid UTF-8 in XML: {}", e)))?;

        Ok(Self::new(partname, content_type, xml_bytes))
    }

    /// A quick-xml reader over the part content.
    ///
    /// Text is not trimmed: whitespace inside `a:t` runs is significant.
    pub fn reader(&self) -> Reader<&[u8]> {
        Reader::from_reader(&**self.xml_bytes)
    }

    /// Replace the content, keeping the relationships.
    ///
    /// Lets a writer allocate rIds first and render the XML that cites them last.
    pub fn set_blob(&mut self, xml_bytes: Vec<u8>) {
        self.xml_bytes = Arc::new(xml_bytes);
    }

    pub fn xml_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.xml_bytes).map_err(Into::into)
    }
}

impl Part for XmlPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> &[u8] {
        &self.xml_bytes
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// Chooses the `Part` implementation from a content type.
pub struct PartFactory;

impl PartFactory {
    /// Load a part, as an `XmlPart` for XML content types and a `BlobPart` otherwise.
    pub fn load(partname: PackURI, content_type: String, blob: Vec<u8>) -> Result<Box<dyn Part>> {
        if Self::is_xml_content_type(&content_type) {
            Ok(Box::new(XmlPart::load(partname, content_type, blob)?))
        } else {
            Ok(Box::new(BlobPart::new(partname, content_type, blob)))
        }
    }

    #[inline]
    fn is_xml_content_type(content_type: &str) -> bool {
        content_type.ends_with("+xml") || content_type.ends_with("/xml")
    }
}
