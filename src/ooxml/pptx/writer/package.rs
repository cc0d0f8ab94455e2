/// Assemble a `MutablePresentation` into an OPC package.
///
/// Every XML part that cites relationship IDs is built the same way: create
/// the part empty, relate it to its targets to allocate the rIds, then render
/// the XML with those rIds and store it.
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::part::{BlobPart, Part, XmlPart};
use crate::ooxml::opc::{OpcPackage, PackURI};
use crate::ooxml::pptx::layout::SlideLayout;
use crate::ooxml::pptx::template;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use super::pres::MutablePresentation;
use super::relmap::RelationshipMapper;

const PRESENTATION_URI: &str = "/ppt/presentation.xml";
const SLIDE_MASTER_URI: &str = "/ppt/slideMasters/slideMaster1.xml";
const THEME_URI: &str = "/ppt/theme/theme1.xml";
const PRES_PROPS_URI: &str = "/ppt/presProps.xml";
const VIEW_PROPS_URI: &str = "/ppt/viewProps.xml";
const TABLE_STYLES_URI: &str = "/ppt/tableStyles.xml";
const CORE_PROPS_URI: &str = "/docProps/core.xml";
const APP_PROPS_URI: &str = "/docProps/app.xml";

fn pack_uri(uri: impl Into<String>) -> Result<PackURI> {
    Ok(PackURI::new(uri).map_err(OpcError::InvalidPackUri)?)
}

fn xml_part(partname: PackURI, content_type: &str, xml: String) -> Box<dyn Part> {
    Box::new(XmlPart::new(partname, content_type.to_string(), xml.into_bytes()))
}

/// Build the complete package for `pres`, stamping core properties with `modified`.
pub(crate) fn build_package(pres: &MutablePresentation, modified: DateTime<Utc>) -> Result<OpcPackage> {
    let mut package = OpcPackage::new();

    let pres_uri = pack_uri(PRESENTATION_URI)?;
    let master_uri = pack_uri(SLIDE_MASTER_URI)?;
    let theme_uri = pack_uri(THEME_URI)?;
    let core_uri = pack_uri(CORE_PROPS_URI)?;
    let app_uri = pack_uri(APP_PROPS_URI)?;

    package.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);
    package.relate_to(&core_uri, rt::CORE_PROPERTIES);
    package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

    let mut pres_part = XmlPart::new(pres_uri, ct::PML_PRESENTATION_MAIN.to_string(), Vec::new());
    let master_rel_id = pres_part.relate_to(&master_uri, rt::SLIDE_MASTER);

    add_master_and_layouts(&mut package, &master_uri, &theme_uri)?;

    // Slides and their media
    let media = add_media(&mut package, pres)?;
    let mut rel_mapper = RelationshipMapper::new();
    let mut slide_rel_ids = Vec::with_capacity(pres.slide_count());
    for (index, slide) in pres.slides().iter().enumerate() {
        let slide_uri = pack_uri(format!("/ppt/slides/slide{}.xml", index + 1))?;
        let mut slide_part = XmlPart::new(slide_uri.clone(), ct::PML_SLIDE.to_string(), Vec::new());
        slide_part.relate_to(&pack_uri(slide.layout().partname())?, rt::SLIDE_LAYOUT);

        let image_count = slide.collect_images().len();
        for image_index in 0..image_count {
            if let Some(media_uri) = media.get(&(index, image_index)) {
                let rid = slide_part.relate_to(media_uri, rt::IMAGE);
                rel_mapper.add_image(index, image_index, rid);
            }
        }

        slide_part.set_blob(slide.to_xml(index, &rel_mapper)?.into_bytes());
        debug!(partname = %slide_uri, shapes = slide.shape_count(), "rendered slide");
        package.add_part(Box::new(slide_part));

        slide_rel_ids.push(pres_part.relate_to(&slide_uri, rt::SLIDE));
    }

    let ancillary = [
        (PRES_PROPS_URI, ct::PML_PRES_PROPS, rt::PRES_PROPS, template::pres_props_xml()),
        (VIEW_PROPS_URI, ct::PML_VIEW_PROPS, rt::VIEW_PROPS, template::view_props_xml()),
        (THEME_URI, ct::OFC_THEME, rt::THEME, template::theme_xml()),
        (TABLE_STYLES_URI, ct::PML_TABLE_STYLES, rt::TABLE_STYLES, template::table_styles_xml()),
    ];
    for (uri, content_type, reltype, xml) in ancillary {
        let partname = pack_uri(uri)?;
        pres_part.relate_to(&partname, reltype);
        // The theme part is shared with the master and already present.
        if !package.contains_part(&partname) {
            package.add_part(xml_part(partname, content_type, xml));
        }
    }

    pres_part.set_blob(
        pres.generate_presentation_xml(&master_rel_id, &slide_rel_ids)?
            .into_bytes(),
    );
    package.add_part(Box::new(pres_part));

    let core = pres.core_properties();
    package.add_part(xml_part(
        core_uri,
        ct::OPC_CORE_PROPERTIES,
        template::core_props_xml(core.title.as_deref(), core.author.as_deref(), modified)?,
    ));
    package.add_part(xml_part(
        app_uri,
        ct::OFC_EXTENDED_PROPERTIES,
        template::app_props_xml(pres.slide_count())?,
    ));

    debug!(parts = package.part_count(), "assembled presentation package");
    Ok(package)
}

/// The slide master, its theme relationship and the seven layouts.
fn add_master_and_layouts(package: &mut OpcPackage, master_uri: &PackURI, theme_uri: &PackURI) -> Result<()> {
    let mut master_part =
        XmlPart::new(master_uri.clone(), ct::PML_SLIDE_MASTER.to_string(), Vec::new());

    let mut layout_rel_ids = Vec::with_capacity(SlideLayout::ALL.len());
    for layout in SlideLayout::ALL {
        let layout_uri = pack_uri(layout.partname())?;
        layout_rel_ids.push(master_part.relate_to(&layout_uri, rt::SLIDE_LAYOUT));

        let mut layout_part =
            XmlPart::new(layout_uri, ct::PML_SLIDE_LAYOUT.to_string(), Vec::new());
        layout_part.relate_to(master_uri, rt::SLIDE_MASTER);
        layout_part.set_blob(layout.to_xml()?.into_bytes());
        package.add_part(Box::new(layout_part));
    }
    master_part.relate_to(theme_uri, rt::THEME);

    master_part.set_blob(template::slide_master_xml(&layout_rel_ids)?.into_bytes());
    package.add_part(Box::new(master_part));
    package.add_part(xml_part(theme_uri.clone(), ct::OFC_THEME, template::theme_xml()));

    Ok(())
}

/// Add one media part per distinct image.
///
/// Returns the media partname of every picture, keyed by
/// (slide index, image index in slide). Identical bytes share a media part.
fn add_media(
    package: &mut OpcPackage,
    pres: &MutablePresentation,
) -> Result<HashMap<(usize, usize), PackURI>> {
    let mut by_content: HashMap<&[u8], PackURI> = HashMap::new();
    let mut targets = HashMap::new();

    for (slide_index, slide) in pres.slides().iter().enumerate() {
        for (image_index, (data, format)) in slide.collect_images().into_iter().enumerate() {
            let media_uri = match by_content.get(data.as_slice()) {
                Some(uri) => uri.clone(),
                None => {
                    let uri = pack_uri(format!(
                        "/ppt/media/image{}.{}",
                        by_content.len() + 1,
                        format.extension()
                    ))?;
                    package.add_part(Box::new(BlobPart::new(
                        uri.clone(),
                        format.mime_type().to_string(),
                        data.to_vec(),
                    )));
                    debug!(partname = %uri, bytes = data.len(), "added media part");
                    by_content.insert(data.as_slice(), uri.clone());
                    uri
                },
            };
            targets.insert((slide_index, image_index), media_uri);
        }
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Geometry;
    use chrono::TimeZone;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    fn modified() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_package_parts() {
        let mut pres = MutablePresentation::new();
        pres.add_slide(SlideLayout::TitleSlide);
        pres.add_slide(SlideLayout::TitleAndContent);

        let package = build_package(&pres, modified()).unwrap();
        let names: Vec<&str> = package.iter_parts().map(|p| p.partname().as_str()).collect();

        assert!(names.contains(&"/ppt/presentation.xml"));
        assert!(names.contains(&"/ppt/slides/slide2.xml"));
        assert!(names.contains(&"/ppt/slideLayouts/slideLayout7.xml"));
        assert!(names.contains(&"/docProps/core.xml"));
        assert_eq!(package.main_document_part().unwrap().partname().as_str(), PRESENTATION_URI);
        // presentation, master, 7 layouts, theme, 3 props parts, 2 slides, core, app
        assert_eq!(package.part_count(), 17);
    }

    #[test]
    fn test_presentation_rels() {
        let mut pres = MutablePresentation::new();
        pres.add_slide(SlideLayout::TitleSlide);

        let package = build_package(&pres, modified()).unwrap();
        let pres_part = package.get_part(&pack_uri(PRESENTATION_URI).unwrap()).unwrap();

        assert_eq!(pres_part.target_ref("rId1").unwrap(), "slideMasters/slideMaster1.xml");
        assert_eq!(pres_part.target_ref("rId2").unwrap(), "slides/slide1.xml");
        let xml = std::str::from_utf8(pres_part.blob()).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));

        let slide_part = package.related_part(pres_part, "rId2").unwrap();
        assert_eq!(
            slide_part.target_ref("rId1").unwrap(),
            "../slideLayouts/slideLayout1.xml"
        );
    }

    #[test]
    fn test_identical_images_share_media() {
        let mut pres = MutablePresentation::new();
        for _ in 0..2 {
            let slide = pres.add_slide(SlideLayout::Blank);
            slide
                .add_picture_from_bytes(PNG_BYTES.to_vec(), Geometry::new(0, 0, 10, 10))
                .unwrap();
            slide
                .add_picture_from_bytes(PNG_BYTES.to_vec(), Geometry::new(20, 0, 10, 10))
                .unwrap();
        }

        let package = build_package(&pres, modified()).unwrap();
        let media: Vec<&str> = package
            .iter_parts()
            .map(|p| p.partname().as_str())
            .filter(|name| name.starts_with("/ppt/media/"))
            .collect();
        assert_eq!(media, vec!["/ppt/media/image1.png"]);

        let slide = package.get_part(&pack_uri("/ppt/slides/slide2.xml").unwrap()).unwrap();
        assert_eq!(slide.rels().len(), 2);
        assert_eq!(slide.rel_ref_count("rId2"), 2);
    }
}
