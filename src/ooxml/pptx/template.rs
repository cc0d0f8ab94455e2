//! Presentation template module.
//!
//! Renders the fixed parts every new presentation carries: the slide master,
//! the Office theme, presentation/view properties, table styles and the
//! document property parts.

use crate::common::Geometry;
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::layout::{PlaceholderKind, write_group_root, write_ph};
use chrono::{DateTime, Utc};
use std::fmt::Write as FmtWrite;

pub(crate) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub(crate) const PML_NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

/// Master placeholders: the title and the body text frame.
const MASTER_PLACEHOLDERS: [(PlaceholderKind, u32, &str, Geometry); 2] = [
    (
        PlaceholderKind::Title,
        0,
        "Title Placeholder 1",
        Geometry::new(457200, 274638, 8229600, 1143000),
    ),
    (
        PlaceholderKind::Body,
        1,
        "Text Placeholder 2",
        Geometry::new(457200, 1600200, 8229600, 4525963),
    ),
];

/// Font size in hundredths of a point and left margin/indent for each
/// body outline level.
const BODY_LEVELS: [(u32, i64, i64, char); 5] = [
    (3200, 342900, -342900, '•'),
    (2800, 742950, -285750, '–'),
    (2400, 1143000, -228600, '•'),
    (2000, 1600200, -228600, '–'),
    (2000, 2057400, -228600, '»'),
];

/// Render the slideMaster part. `layout_rel_ids` are the rIds of the seven
/// layouts in layout order.
pub(crate) fn slide_master_xml(layout_rel_ids: &[String]) -> Result<String> {
    let mut xml = String::with_capacity(8192);

    xml.push_str(XML_DECLARATION);
    write!(xml, "<p:sldMaster {}>", PML_NAMESPACES)?;
    xml.push_str("<p:cSld>");
    xml.push_str(r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str("<p:spTree>");
    write_group_root(&mut xml);

    for (i, (kind, idx, name, geometry)) in MASTER_PLACEHOLDERS.iter().enumerate() {
        xml.push_str("<p:sp><p:nvSpPr>");
        write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, i + 2, name)?;
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>"#);
        write_ph(&mut xml, *kind, *idx)?;
        xml.push_str("</p:nvPr></p:nvSpPr><p:spPr>");
        geometry.write_xfrm(&mut xml);
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
        xml.push_str("<p:txBody>");
        if kind.is_title() {
            xml.push_str(r#"<a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0" anchor="ctr"><a:normAutofit/></a:bodyPr>"#);
        } else {
            xml.push_str(r#"<a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0"><a:normAutofit/></a:bodyPr>"#);
        }
        xml.push_str(r#"<a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#);
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
        r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" "#,
        r#"hlink="hlink" folHlink="folHlink"/>"#
    ));

    xml.push_str("<p:sldLayoutIdLst>");
    for (i, r_id) in layout_rel_ids.iter().enumerate() {
        write!(
            xml,
            r#"<p:sldLayoutId id="{}" r:id="{}"/>"#,
            2147483649u32 + i as u32,
            r_id
        )?;
    }
    xml.push_str("</p:sldLayoutIdLst>");

    write_text_styles(&mut xml)?;
    xml.push_str("</p:sldMaster>");

    Ok(xml)
}

fn write_text_styles(xml: &mut String) -> Result<()> {
    xml.push_str("<p:txStyles>");

    xml.push_str("<p:titleStyle>");
    xml.push_str(r#"<a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#);
    xml.push_str(r#"<a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/>"#);
    xml.push_str(r#"<a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#);
    xml.push_str(r#"<a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr>"#);
    xml.push_str("</a:lvl1pPr>");
    xml.push_str("</p:titleStyle>");

    xml.push_str("<p:bodyStyle>");
    for (level, (sz, mar_l, indent, bullet)) in BODY_LEVELS.iter().enumerate() {
        write!(
            xml,
            r#"<a:lvl{}pPr marL="{}" indent="{}" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
            level + 1,
            mar_l,
            indent
        )?;
        write!(
            xml,
            r#"<a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="{}"/>"#,
            bullet
        )?;
        write!(
            xml,
            r#"<a:defRPr sz="{}" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
            sz
        )?;
        xml.push_str(r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#);
        write!(xml, "</a:lvl{}pPr>", level + 1)?;
    }
    xml.push_str("</p:bodyStyle>");

    xml.push_str("<p:otherStyle>");
    xml.push_str(r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#);
    xml.push_str(r#"<a:lvl1pPr marL="0" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#);
    xml.push_str(r#"<a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#);
    xml.push_str(r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#);
    xml.push_str("</a:lvl1pPr>");
    xml.push_str("</p:otherStyle>");

    xml.push_str("</p:txStyles>");
    Ok(())
}

/// The "Office Theme": color scheme, Calibri font scheme and a minimal
/// format scheme with three entries per list.
pub(crate) fn theme_xml() -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">"#);
    xml.push_str("<a:themeElements>");

    xml.push_str(r#"<a:clrScheme name="Office">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    for (name, hex) in [
        ("dk2", "1F497D"),
        ("lt2", "EEECE1"),
        ("accent1", "4F81BD"),
        ("accent2", "C0504D"),
        ("accent3", "9BBB59"),
        ("accent4", "8064A2"),
        ("accent5", "4BACC6"),
        ("accent6", "F79646"),
        ("hlink", "0000FF"),
        ("folHlink", "800080"),
    ] {
        xml.push_str(&format!(r#"<a:{0}><a:srgbClr val="{1}"/></a:{0}>"#, name, hex));
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Office">"#);
    xml.push_str(r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#);
    xml.push_str(r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#);
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Office">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:fillStyleLst>");
    xml.push_str("<a:lnStyleLst>");
    for w in [9525, 25400, 38100] {
        xml.push_str(&format!(
            r#"<a:ln w="{}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#,
            w
        ));
    }
    xml.push_str("</a:lnStyleLst>");
    xml.push_str("<a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst>");
    xml.push_str("<a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:bgFillStyleLst>");
    xml.push_str("</a:fmtScheme>");

    xml.push_str("</a:themeElements>");
    xml.push_str("<a:objectDefaults/><a:extraClrSchemeLst/>");
    xml.push_str("</a:theme>");

    xml
}

pub(crate) fn pres_props_xml() -> String {
    format!(
        "{}<p:presentationPr {}/>",
        XML_DECLARATION, PML_NAMESPACES
    )
}

pub(crate) fn view_props_xml() -> String {
    format!(
        concat!(
            "{}<p:viewPr {}>",
            r#"<p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr>"#,
            r#"<p:gridSpacing cx="76200" cy="76200"/>"#,
            "</p:viewPr>"
        ),
        XML_DECLARATION, PML_NAMESPACES
    )
}

pub(crate) fn table_styles_xml() -> String {
    format!(
        r#"{}<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
        XML_DECLARATION
    )
}

/// Render docProps/core.xml.
pub(crate) fn core_props_xml(
    title: Option<&str>,
    author: Option<&str>,
    modified: DateTime<Utc>,
) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    let timestamp = modified.format("%Y-%m-%dT%H:%M:%SZ");

    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    write!(xml, "<dc:title>{}</dc:title>", escape_xml(title.unwrap_or("")))?;
    let author = escape_xml(author.unwrap_or(""));
    write!(xml, "<dc:creator>{}</dc:creator>", author)?;
    write!(xml, "<cp:lastModifiedBy>{}</cp:lastModifiedBy>", author)?;
    xml.push_str("<cp:revision>1</cp:revision>");
    write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
        timestamp
    )?;
    write!(
        xml,
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        timestamp
    )?;
    xml.push_str("</cp:coreProperties>");

    Ok(xml)
}

/// Render docProps/app.xml.
pub(crate) fn app_props_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(512);

    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    write!(xml, "<Application>{}</Application>", env!("CARGO_PKG_NAME"))?;
    xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
    write!(xml, "<Slides>{}</Slides>", slide_count)?;
    xml.push_str("<Notes>0</Notes><HiddenSlides>0</HiddenSlides>");
    write!(xml, "<AppVersion>{}</AppVersion>", env!("CARGO_PKG_VERSION"))?;
    xml.push_str("</Properties>");

    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slide_master_lists_layouts() {
        let rel_ids: Vec<String> = (1..=7).map(|n| format!("rId{}", n)).collect();
        let xml = slide_master_xml(&rel_ids).unwrap();

        assert!(xml.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483655" r:id="rId7"/>"#));
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
        assert!(xml.contains("<p:titleStyle>"));
        assert!(xml.contains("<a:lvl5pPr"));
    }

    #[test]
    fn test_theme_has_scheme() {
        let xml = theme_xml();
        assert!(xml.contains(r#"<a:accent1><a:srgbClr val="4F81BD"/></a:accent1>"#));
        assert!(xml.contains(r#"<a:latin typeface="Calibri"/>"#));
        assert_eq!(xml.matches("<a:effectStyle>").count(), 3);
    }

    #[test]
    fn test_core_props() {
        let when = Utc.with_ymd_and_hms(2025, 3, 20, 9, 30, 0).unwrap();
        let xml = core_props_xml(Some("A & B"), Some("山田 太郎"), when).unwrap();

        assert!(xml.contains("<dc:title>A &amp; B</dc:title>"));
        assert!(xml.contains("<dc:creator>山田 太郎</dc:creator>"));
        assert!(xml.contains(">2025-03-20T09:30:00Z</dcterms:modified>"));
    }

    #[test]
    fn test_app_props() {
        let xml = app_props_xml(5).unwrap();
        assert!(xml.contains("<Slides>5</Slides>"));
    }
}
