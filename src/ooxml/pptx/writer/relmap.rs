/// Relationship ID mapper for tracking relationships during presentation generation.
///
/// Relationships are created first; the mapper then hands the actual IDs to
/// the XML generators. Each slide has its own set of relationships.
use std::collections::HashMap;

/// Maps pictures to the relationship IDs of their media parts.
#[derive(Debug, Default)]
pub(crate) struct RelationshipMapper {
    /// Maps (slide_index, image_index_in_slide) to relationship ID
    image_ids: HashMap<(usize, usize), String>,
}

impl RelationshipMapper {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add an image relationship mapping for a specific slide.
    ///
    /// # Arguments
    /// * `slide_index` - The index of the slide (0-based)
    /// * `image_index_in_slide` - The index of the image within that slide (0-based)
    /// * `rel_id` - The relationship ID (e.g., "rId2")
    pub(crate) fn add_image(&mut self, slide_index: usize, image_index_in_slide: usize, rel_id: String) {
        self.image_ids
            .insert((slide_index, image_index_in_slide), rel_id);
    }

    /// Get the relationship ID for an image in a specific slide.
    pub(crate) fn get_image_id(&self, slide_index: usize, image_index_in_slide: usize) -> Option<&str> {
        self.image_ids
            .get(&(slide_index, image_index_in_slide))
            .map(|s| s.as_str())
    }
}
