//! Portable-text rich text: blocks of inline spans.
//!
//! Blocks are parsed leniently (every field optional) and then viewed through
//! `Node`, a closed set of kinds with a total conversion to plain text.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(
        rename = "_type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub list_item: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_spans",
        skip_serializing_if = "Option::is_none"
    )]
    pub children: Option<Vec<Span>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(
        rename = "_type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<String>,
}

/// A field of the wrong shape becomes its default instead of failing the block.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the spans that parse; `children` that is not an array counts as absent.
fn lenient_spans<'de, D>(deserializer: D) -> Result<Option<Vec<Span>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// What a block means for text extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// A block carrying inline children.
    Text(&'a [Span]),
    /// Anything without children (embedded images, malformed blocks).
    Opaque,
}

impl Block {
    pub fn node(&self) -> Node<'_> {
        match &self.children {
            Some(children) => Node::Text(children),
            None => Node::Opaque,
        }
    }

    /// Concatenated span text of this block, `""` for opaque blocks.
    pub fn plain_text(&self) -> String {
        match self.node() {
            Node::Text(spans) => spans.iter().filter_map(|s| s.text.as_deref()).collect(),
            Node::Opaque => String::new(),
        }
    }

    pub fn is_list_item(&self) -> bool {
        self.list_item.is_some()
    }
}

/// Joins block texts with a single space, dropping blocks that contribute nothing.
pub fn blocks_to_plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::plain_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A description field that is either plain text or rich text blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RichText {
    Plain(String),
    Blocks(Vec<Block>),
}

impl RichText {
    /// Interprets an arbitrary CMS value. Shapes that are neither a string nor an
    /// array yield `None`; array elements that are not blocks become opaque.
    pub fn from_value(value: &Value) -> Option<RichText> {
        match value {
            Value::String(s) => Some(RichText::Plain(s.clone())),
            Value::Array(items) => Some(RichText::Blocks(
                items
                    .iter()
                    .map(|item| serde_json::from_value::<Block>(item.clone()).unwrap_or_default())
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn to_plain_text(&self) -> String {
        match self {
            RichText::Plain(s) => s.clone(),
            RichText::Blocks(blocks) => blocks_to_plain_text(blocks),
        }
    }
}

/// Flattens any CMS description value; unknown shapes degrade to `""`.
pub fn flatten_description(value: Option<&Value>) -> String {
    value
        .and_then(RichText::from_value)
        .map(|rt| rt.to_plain_text())
        .unwrap_or_default()
}
