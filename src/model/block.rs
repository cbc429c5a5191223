//! Blocks: nodes of the page content tree.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{ResponsiveStyle, StyleMap};

/// Opaque block identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered child list. Most containers hold a handful of children.
pub type Children = SmallVec<[BlockId; 4]>;

/// Heading level, `h1` through `h6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }
}

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldInput {
    Text,
    Email,
    Textarea,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input: FieldInput,
    #[serde(default)]
    pub required: bool,
}

/// Type tag of a block, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Container,
    Text,
    Image,
    Video,
    Button,
    Html,
    Paragraph,
    Heading,
    Form,
    Quote,
    Code,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Container => "container",
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Video => "video",
            BlockKind::Button => "button",
            BlockKind::Html => "html",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::Form => "form",
            BlockKind::Quote => "quote",
            BlockKind::Code => "code",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed content payload. The variant is the block's type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "kebab-case")]
pub enum BlockContent {
    Container,
    Text { text: String },
    Image { src: String, #[serde(default)] alt: String },
    Video {
        src: String,
        #[serde(default)]
        autoplay: bool,
        #[serde(default = "default_true")]
        controls: bool,
    },
    Button { label: String, #[serde(default)] href: Option<String> },
    Html { markup: String },
    Paragraph { text: String },
    Heading { level: HeadingLevel, text: String },
    Form { #[serde(default)] fields: Vec<FormField>, submit_label: String },
    Quote { text: String, #[serde(default)] cite: Option<String> },
    Code { #[serde(default)] language: Option<String>, source: String },
}

fn default_true() -> bool { true }

impl BlockContent {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Container => BlockKind::Container,
            BlockContent::Text { .. } => BlockKind::Text,
            BlockContent::Image { .. } => BlockKind::Image,
            BlockContent::Video { .. } => BlockKind::Video,
            BlockContent::Button { .. } => BlockKind::Button,
            BlockContent::Html { .. } => BlockKind::Html,
            BlockContent::Paragraph { .. } => BlockKind::Paragraph,
            BlockContent::Heading { .. } => BlockKind::Heading,
            BlockContent::Form { .. } => BlockKind::Form,
            BlockContent::Quote { .. } => BlockKind::Quote,
            BlockContent::Code { .. } => BlockKind::Code,
        }
    }

    /// Placeholder content the editor drops in when a block is inserted
    /// from the palette.
    pub fn placeholder(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Container => BlockContent::Container,
            BlockKind::Text => BlockContent::Text { text: "Text".into() },
            BlockKind::Image => BlockContent::Image { src: String::new(), alt: String::new() },
            BlockKind::Video => BlockContent::Video { src: String::new(), autoplay: false, controls: true },
            BlockKind::Button => BlockContent::Button { label: "Button".into(), href: None },
            BlockKind::Html => BlockContent::Html { markup: String::new() },
            BlockKind::Paragraph => BlockContent::Paragraph { text: "Paragraph".into() },
            BlockKind::Heading => BlockContent::Heading { level: HeadingLevel::H2, text: "Heading".into() },
            BlockKind::Form => BlockContent::Form { fields: Vec::new(), submit_label: "Submit".into() },
            BlockKind::Quote => BlockContent::Quote { text: "Quote".into(), cite: None },
            BlockKind::Code => BlockContent::Code { language: None, source: String::new() },
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, BlockContent::Container)
    }
}

/// A node in the page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(default)]
    pub parent: Option<BlockId>,
    #[serde(flatten)]
    pub content: BlockContent,
    #[serde(default)]
    pub styles: StyleMap,
    /// Only containers carry children.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub children: Children,
}

impl Block {
    pub fn new(id: BlockId, content: BlockContent) -> Self {
        Self {
            id,
            parent: None,
            content,
            styles: StyleMap::new(),
            children: Children::new(),
        }
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<ResponsiveStyle>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    pub fn is_container(&self) -> bool {
        self.content.is_container()
    }

    pub fn style(&self, key: &str) -> Option<&ResponsiveStyle> {
        self.styles.get(key)
    }

    /// CSS class the exported stylesheet targets for this block.
    pub fn class_name(&self) -> String {
        format!("block-{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_is_adjacently_tagged() {
        let content = BlockContent::Heading { level: HeadingLevel::H1, text: "Hi".into() };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "heading", "content": {"level": "h1", "text": "Hi"}})
        );
    }

    #[test]
    fn test_block_json_shape() {
        let block = Block::new(BlockId(7), BlockContent::Text { text: "x".into() })
            .with_style("color", "red");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["content"]["text"], "x");
        assert_eq!(json["styles"]["color"], "red");
        assert!(json.get("children").is_none());

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_placeholder_matches_kind() {
        for kind in [
            BlockKind::Container, BlockKind::Text, BlockKind::Image, BlockKind::Video,
            BlockKind::Button, BlockKind::Html, BlockKind::Paragraph, BlockKind::Heading,
            BlockKind::Form, BlockKind::Quote, BlockKind::Code,
        ] {
            assert_eq!(BlockContent::placeholder(kind).kind(), kind);
        }
    }
}
