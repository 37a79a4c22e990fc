//! WordprocessingML (DOCX) rendering for layout documents.
//!
//! Every placement becomes one paragraph carrying its left indentation,
//! space before and run size. Page margins are set to the offsets the layout
//! engine subtracted, so text lands where it sat in the scanned image.
//!
//! Run sizes are written in half-points (`w:sz`), so a 30px line gets 11.5pt
//! text. Documents from the legacy converter passed the same `height * 3 / 4`
//! value, integer-divided, as a size in whole points (22pt for that line).
//! [`GapMode::LegacyRescale`](crate::layout::GapMode::LegacyRescale) covers
//! indentation and spacing only; run sizes always follow the half-point rule.

use crate::error::Result;
use crate::layout::{LEFT_MARGIN_OFFSET, TOP_MARGIN_OFFSET};
use crate::model::{LayoutDocument, ParagraphPlacement};
use chrono::Utc;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use super::package::PackageWriter;
use super::{write_output, RenderOptions};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const RELATIONSHIPS_PART: &str = "_rels/.rels";
const DOCUMENT_PART: &str = "word/document.xml";
const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// Convert a document to DOCX bytes.
pub fn to_docx(doc: &LayoutDocument, options: &RenderOptions) -> Result<Vec<u8>> {
    DocxWriter::new(options.clone()).write(doc, Vec::new())
}

/// Write a document as DOCX into any writer.
pub fn write_docx<W: Write>(doc: &LayoutDocument, options: &RenderOptions, writer: W) -> Result<()> {
    DocxWriter::new(options.clone()).write(doc, writer)?;
    Ok(())
}

/// Render a document as DOCX and save it to `path`.
pub fn write_docx_file<P: AsRef<Path>>(
    doc: &LayoutDocument,
    options: &RenderOptions,
    path: P,
) -> Result<()> {
    let bytes = to_docx(doc, options)?;
    write_output(path.as_ref(), &bytes)
}

/// DOCX writer.
pub struct DocxWriter {
    options: RenderOptions,
}

impl DocxWriter {
    /// Create a new DOCX writer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Write the package and hand back the writer.
    pub fn write<W: Write>(&self, doc: &LayoutDocument, mut writer: W) -> Result<W> {
        let created = doc.metadata.created.unwrap_or_else(Utc::now);
        let mut package = PackageWriter::new(self.options.compression, created);

        package.add_part(CONTENT_TYPES_PART, self.content_types_xml().as_bytes())?;
        package.add_part(RELATIONSHIPS_PART, self.relationships_xml().as_bytes())?;
        package.add_part(DOCUMENT_PART, self.document_xml(doc).as_bytes())?;
        if self.options.include_metadata {
            package.add_part(CORE_PROPERTIES_PART, self.core_xml(doc).as_bytes())?;
        }

        writer.write_all(&package.finish()?)?;
        writer.flush()?;
        Ok(writer)
    }

    /// Main document part.
    pub fn document_xml(&self, doc: &LayoutDocument) -> String {
        let mut xml = String::with_capacity(256 + doc.paragraphs.len() * 256);
        xml.push_str(XML_DECLARATION);
        xml.push_str(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
        );

        for paragraph in &doc.paragraphs {
            self.write_paragraph(&mut xml, paragraph);
        }

        let page = &doc.page;
        let _ = write!(
            xml,
            r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}" w:orient="{}"/><w:pgMar w:top="{top}" w:right="{left}" w:bottom="{top}" w:left="{left}" w:header="0" w:footer="0" w:gutter="0"/></w:sectPr>"#,
            page.width_units,
            page.height_units,
            page.orientation.as_str(),
            top = TOP_MARGIN_OFFSET,
            left = LEFT_MARGIN_OFFSET,
        );
        xml.push_str("</w:body></w:document>");
        xml
    }

    fn write_paragraph(&self, xml: &mut String, paragraph: &ParagraphPlacement) {
        let size = paragraph.font_size_half_points();
        let _ = write!(
            xml,
            r#"<w:p><w:pPr><w:spacing w:before="{}"/><w:ind w:left="{}"/></w:pPr><w:r><w:rPr>"#,
            paragraph.spacing_before_units, paragraph.indentation_units
        );
        if let Some(ref font) = self.options.font_family {
            let font = escape_xml(font);
            let _ = write!(
                xml,
                r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:eastAsia="{0}" w:cs="{0}"/>"#,
                font
            );
        }
        let _ = write!(
            xml,
            r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/></w:rPr><w:t xml:space="preserve">{1}</w:t></w:r></w:p>"#,
            size,
            escape_xml(&paragraph.text)
        );
    }

    /// Core properties part (title, creation date).
    pub fn core_xml(&self, doc: &LayoutDocument) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push_str(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        );

        let title = self
            .options
            .title
            .as_deref()
            .or_else(|| doc.metadata.display_title());
        if let Some(title) = title {
            let _ = write!(xml, "<dc:title>{}</dc:title>", escape_xml(title));
        }
        if let Some(log_id) = doc.metadata.log_id {
            let _ = write!(xml, "<dc:identifier>{}</dc:identifier>", log_id);
        }
        if let Some(created) = doc.metadata.created {
            let _ = write!(
                xml,
                r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
                created.format("%Y-%m-%dT%H:%M:%SZ")
            );
        }
        xml.push_str("</cp:coreProperties>");
        xml
    }

    fn content_types_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        xml.push_str(r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#);
        if self.options.include_metadata {
            xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
        }
        xml.push_str("</Types>");
        xml
    }

    fn relationships_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
        xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#);
        if self.options.include_metadata {
            xml.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#);
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// Escape text for XML content and attribute values.
///
/// Control characters that XML 1.0 cannot carry are dropped.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Orientation, PageSpec};

    fn sample() -> LayoutDocument {
        LayoutDocument::new(
            PageSpec::new(20200, 13397, Orientation::Landscape),
            vec![
                ParagraphPlacement::new("A", -764, 0, 22.5),
                ParagraphPlacement::new("B & <C>", -764, 800, 22.5),
            ],
        )
    }

    #[test]
    fn test_document_xml_paragraphs() {
        let xml = DocxWriter::new(RenderOptions::default()).document_xml(&sample());
        assert!(xml.contains(
            r#"<w:p><w:pPr><w:spacing w:before="800"/><w:ind w:left="-764"/></w:pPr>"#
        ));
        assert!(xml.contains(r#"<w:sz w:val="23"/>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve">B &amp; &lt;C&gt;</w:t>"#));
        assert_eq!(xml.matches("<w:p>").count(), 2);
        assert!(xml.find(">A<").unwrap() < xml.find(">B &amp;").unwrap());
    }

    #[test]
    fn test_document_xml_section() {
        let xml = DocxWriter::new(RenderOptions::default()).document_xml(&sample());
        assert!(xml.contains(r#"<w:pgSz w:w="20200" w:h="13397" w:orient="landscape"/>"#));
        assert!(xml.contains(r#"w:top="1397""#));
        assert!(xml.contains(r#"w:left="1764""#));
    }

    #[test]
    fn test_font_family() {
        let options = RenderOptions::new().with_font("Song \"Ti\"");
        let xml = DocxWriter::new(options).document_xml(&sample());
        assert!(xml.contains(r#"w:ascii="Song &quot;Ti&quot;""#));
    }

    #[test]
    fn test_core_xml_title() {
        let mut doc = sample();
        doc.metadata.source = Some("scan.png".to_string());
        doc.metadata.log_id = Some(42);

        let xml = DocxWriter::new(RenderOptions::default()).core_xml(&doc);
        assert!(xml.contains("<dc:title>scan.png</dc:title>"));
        assert!(xml.contains("<dc:identifier>42</dc:identifier>"));

        let xml = DocxWriter::new(RenderOptions::new().with_title("Form")).core_xml(&doc);
        assert!(xml.contains("<dc:title>Form</dc:title>"));
    }

    #[test]
    fn test_escape_xml_drops_control_chars() {
        assert_eq!(escape_xml("a\u{0001}b\tc"), "ab\tc");
        assert_eq!(escape_xml("'x'"), "&apos;x&apos;");
    }

    #[test]
    fn test_to_docx_is_zip() {
        let bytes = to_docx(&sample(), &RenderOptions::default()).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
