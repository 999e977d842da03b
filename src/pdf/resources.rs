//! Page font resource registration

use lopdf::{Dictionary, Document, Object, ObjectId};
use crate::error::Result;
use crate::font::StandardFont;
use crate::pdf::page::inherited_attribute;

/// Where a dictionary entry of a page lives
enum Slot {
    /// Stored directly in the parent dictionary
    Inline,
    /// Stored as a separate object
    Indirect(ObjectId),
    /// Not present yet
    Missing,
}

fn slot_of(dict: &Dictionary, key: &[u8]) -> Slot {
    match dict.get(key) {
        Ok(Object::Dictionary(_)) => Slot::Inline,
        Ok(Object::Reference(id)) => Slot::Indirect(*id),
        _ => Slot::Missing,
    }
}

/// Create a Type1 font dictionary for one of the standard fonts
fn standard_font_dictionary(font: StandardFont) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"Font".to_vec()));
    dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    dict.set("BaseFont", Object::Name(font.base_font().as_bytes().to_vec()));
    dict
}

/// Get the page's own Resources dictionary for mutation
///
/// A page without its own `/Resources` receives a copy of the inherited one
/// (or an empty dictionary), so changes never leak to sibling pages through a
/// shared `/Pages` node.
fn page_resources_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary> {
    let slot = slot_of(doc.get_dictionary(page_id)?, b"Resources");

    match slot {
        Slot::Indirect(id) => return Ok(doc.get_dictionary_mut(id)?),
        Slot::Inline => {}
        Slot::Missing => {
            let inherited = match inherited_attribute(doc, page_id, b"Resources")? {
                Some(Object::Dictionary(dict)) => dict.clone(),
                Some(Object::Reference(id)) => doc.get_dictionary(*id)?.clone(),
                _ => Dictionary::new(),
            };
            doc.get_dictionary_mut(page_id)?
                .set("Resources", Object::Dictionary(inherited));
        }
    }

    Ok(doc
        .get_dictionary_mut(page_id)?
        .get_mut(b"Resources")?
        .as_dict_mut()?)
}

/// Get the `/Font` table from the page's resources, creating it if missing
pub fn font_table_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary> {
    let slot = slot_of(page_resources_mut(doc, page_id)?, b"Font");

    match slot {
        Slot::Indirect(id) => return Ok(doc.get_dictionary_mut(id)?),
        Slot::Inline => {}
        Slot::Missing => {
            page_resources_mut(doc, page_id)?.set("Font", Object::Dictionary(Dictionary::new()));
        }
    }

    Ok(page_resources_mut(doc, page_id)?
        .get_mut(b"Font")?
        .as_dict_mut()?)
}

/// Ensure `font` is declared in the page's font resources
///
/// Returns the resource name content streams use to select the font. When an
/// entry already exists under that name the document is left untouched.
pub fn ensure_font(doc: &mut Document, page_id: ObjectId, font: StandardFont) -> Result<String> {
    let name = font.resource_name();

    if font_table_mut(doc, page_id)?.has(name.as_bytes()) {
        log::trace!("Font /{} already registered on page {:?}", name, page_id);
        return Ok(name.to_string());
    }

    let font_id = doc.add_object(Object::Dictionary(standard_font_dictionary(font)));
    font_table_mut(doc, page_id)?.set(name, Object::Reference(font_id));

    log::trace!("Registered font /{} as object {:?} on page {:?}", name, font_id, page_id);
    Ok(name.to_string())
}
