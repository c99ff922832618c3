use crate::{
    foundation::core::{ItemIndex, TraitCategory, strip_extension},
    foundation::error::{ForgeError, ForgeResult},
    generate::config::CollectionInfo,
    generate::select::TraitSelection,
};

/// Attributes per item: rarity, six traits, shiny, full set.
pub const ATTRIBUTE_COUNT: usize = 1 + TraitCategory::ALL.len() + 2;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-item metadata document.
pub struct Metadata {
    /// `"<prefix> #0007"`.
    pub name: String,
    /// Collection description.
    pub description: String,
    /// Collection link.
    pub external_url: String,
    /// Archive file name of the item's image.
    pub image: String,
    /// Rarity, traits, shiny and full-set entries, in that order.
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How marketplaces should render an attribute value.
pub enum DisplayType {
    /// Free text.
    String,
    /// Boolean flag.
    Bool,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Attribute payload.
pub enum AttributeValue {
    /// Text value.
    Text(String),
    /// Boolean value.
    Flag(bool),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One `{display_type, trait_type, value}` entry.
pub struct Attribute {
    /// Rendering hint.
    pub display_type: DisplayType,
    /// Attribute label.
    pub trait_type: String,
    /// Attribute value.
    pub value: AttributeValue,
}

impl Attribute {
    fn text(trait_type: &str, value: impl Into<String>) -> Self {
        Self {
            display_type: DisplayType::String,
            trait_type: trait_type.to_string(),
            value: AttributeValue::Text(value.into()),
        }
    }

    fn flag(trait_type: &str, value: bool) -> Self {
        Self {
            display_type: DisplayType::Bool,
            trait_type: trait_type.to_string(),
            value: AttributeValue::Flag(value),
        }
    }
}

/// Build the metadata document of item `index`.
pub fn build_metadata(
    index: ItemIndex,
    selection: &TraitSelection,
    collection: &CollectionInfo,
) -> Metadata {
    let mut attributes = Vec::with_capacity(ATTRIBUTE_COUNT);
    attributes.push(Attribute::text("Rarity", selection.rarity().as_str()));
    for category in TraitCategory::ALL {
        let value = selection.key(category).map(strip_extension).unwrap_or("");
        attributes.push(Attribute::text(category.display_name(), value));
    }
    attributes.push(Attribute::flag("Shiny", selection.is_shiny));
    attributes.push(Attribute::flag("Full Set", selection.is_full_set));

    Metadata {
        name: collection.item_name(index),
        description: collection.description.clone(),
        external_url: collection.external_url.clone(),
        image: collection.image_file_name(index),
        attributes,
    }
}

impl Metadata {
    /// Pretty JSON with 4-space indentation.
    pub fn to_json_pretty(&self) -> ForgeResult<String> {
        use serde::Serialize as _;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .map_err(|err| ForgeError::serde(format!("serialize metadata '{}': {err}", self.name)))?;
        String::from_utf8(buf)
            .map_err(|err| ForgeError::serde(format!("metadata is not utf-8: {err}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/metadata.rs"]
mod tests;
