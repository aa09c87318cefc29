//! Raw CMS documents, exactly as the query API returns them.
//!
//! Every field is optional. Structurally incomplete content is tolerated here and
//! resolved to defaults by `content::transform`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Envelope of a Sanity query response.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub result: T,
}

/// `{ "_type": "image", "asset": { "_ref": "image-<id>-<w>x<h>-<ext>" } }`.
/// Queries may also dereference the asset, which fills `url` directly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSource {
    #[serde(default)]
    pub asset: Option<AssetReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetReference {
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Slugs come either as the Sanity slug object or as a projected string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SlugField {
    Text(String),
    Object {
        #[serde(default)]
        current: Option<String>,
    },
}

impl SlugField {
    pub fn current(&self) -> Option<&str> {
        match self {
            SlugField::Text(s) => Some(s.as_str()),
            SlugField::Object { current } => current.as_deref(),
        }
    }
}

/// String lists keep their string entries; `null` or any other shape is `None`.
fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        )),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// A string or an array of rich-text blocks; kept untyped so that odd shapes
    /// degrade instead of failing the whole collection.
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub image: Option<ImageSource>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub slug: Option<SlugField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExperience {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "string_list")]
    pub responsibilities: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub technologies: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTechStackItem {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub icon: Option<ImageSource>,
    #[serde(default)]
    pub order: Option<i64>,
}
