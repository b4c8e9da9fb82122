use crate::error::CoreError;

/// A page element whose text content can be read and replaced.
pub trait Element {
    fn text_content(&self) -> &str;

    /// Replace the element's entire text content.
    fn set_text_content(&mut self, text: String);
}

/// Page document trait: resolves elements by their `id` attribute.
///
/// The document owns its elements. Callers hold identifiers, never element
/// handles, and look the element up again each time they need it.
pub trait Document {
    /// Resolve an element by identifier. Returns `None` if absent.
    fn get_element_by_id(&mut self, id: &str) -> Option<&mut dyn Element>;

    /// Like [`Document::get_element_by_id`], but absence is a
    /// [`CoreError::Lookup`].
    fn require_element(&mut self, id: &str) -> Result<&mut dyn Element, CoreError> {
        self.get_element_by_id(id).ok_or_else(|| CoreError::Lookup { id: id.to_string() })
    }
}
