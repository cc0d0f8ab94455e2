/// Main presentation object - the high-level API for reading presentations.
use crate::ooxml::error::Result;
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::pptx::parts::{PresentationPart, SlidePart};
use crate::ooxml::pptx::slide::Slide;

/// A PowerPoint presentation opened for reading.
///
/// Not intended to be constructed directly. Use `Package::presentation()` to
/// access a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use deckweave::ooxml::pptx::Package;
///
/// let pkg = Package::open("presentation.pptx")?;
/// let pres = pkg.presentation()?;
///
/// if let (Some(width), Some(height)) = (pres.slide_width()?, pres.slide_height()?) {
///     println!("Slide size: {}x{} EMUs", width, height);
/// }
///
/// for slide in pres.slides()? {
///     println!("{}", slide.text()?);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Presentation<'a> {
    /// The underlying presentation part
    part: PresentationPart<'a>,
    /// Reference to the OPC package for accessing related parts
    package: &'a OpcPackage,
}

impl<'a> Presentation<'a> {
    #[inline]
    pub(crate) fn new(part: PresentationPart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    /// Get the number of slides in the presentation.
    pub fn slide_count(&self) -> Result<usize> {
        Ok(self.part.slide_rids()?.len())
    }

    /// Get the slide width in EMUs (English Metric Units).
    ///
    /// Returns None if the slide size is not defined.
    pub fn slide_width(&self) -> Result<Option<i64>> {
        Ok(self.part.slide_size()?.map(|(cx, _)| cx))
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> Result<Option<i64>> {
        Ok(self.part.slide_size()?.map(|(_, cy)| cy))
    }

    /// Slides in presentation order, as listed by `<p:sldIdLst>`.
    pub fn slides(&self) -> Result<Vec<Slide<'a>>> {
        self.part
            .slide_rids()?
            .iter()
            .map(|rid| {
                let slide_part = self.package.related_part(self.part.part(), rid)?;
                Ok(Slide::new(SlidePart::from_part(slide_part)?))
            })
            .collect()
    }
}
