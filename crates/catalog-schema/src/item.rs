use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Deserializer};
use serde_with::{serde_as, DefaultOnError};

/// A catalog item, as returned by the upstream.
///
/// Only the fields below are kept. A field that is missing upstream, or holds a value of
/// the wrong type, reads as null.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub item_id: Option<i32>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub location: Option<Location>,
}

/// Where an item is kept.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub location_id: Option<i32>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub state: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub address: Option<String>,
    /// Numeric upstream values are rendered as their decimal string.
    #[serde(default, deserialize_with = "phone_number")]
    pub phone_number: Option<String>,
}

/// An upstream item list. Entries that are not item objects read as null.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub(crate) struct ItemList(#[serde_as(as = "Vec<DefaultOnError>")] pub(crate) Vec<Option<Item>>);

/// A complete item as sent on create and update. The location is part of it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub item_id: i32,
    pub item_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: LocationInput,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub location_id: i32,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

fn phone_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(phone_number) => Some(phone_number),
        serde_json::Value::Number(phone_number) => Some(phone_number.to_string()),
        _ => None,
    })
}
