//! # Block
//!
//! A single content node in the page tree, plus the layout-specific
//! column structure.
//!
//! The persisted shape mirrors the editor protocol exactly: `type` is
//! the kind tag, `data` is the kind-specific settings object, and the
//! cross-cutting fields (`anchorId`, `styles`, `animation`,
//! `block_theme`) are optional on every block.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::preset::Preset;

/// Upper bound for spacing overrides, in pixels.
pub const MAX_PADDING: u32 = 200;

/// Opaque block identifier, unique across one page's tree.
///
/// Ids are never reused, even after deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Mint a fresh id for a newly created block.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BlockId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of block kinds, with a lossless fallback for tags this
/// build does not know about yet.
///
/// A tree saved by a newer editor must still load here; unrecognized
/// tags are carried through `Unknown` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Text,
    Hero,
    Image,
    Button,
    Layout,
    Categories,
    CatalogGrid,
    Features,
    Form,
    Video,
    Map,
    Accordion,
    SocialIcons,
    Divider,
    Spacer,
    Quote,
    Testimonials,
    Header,
    Unknown(String),
}

impl BlockKind {
    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Hero => "hero",
            BlockKind::Image => "image",
            BlockKind::Button => "button",
            BlockKind::Layout => "layout",
            BlockKind::Categories => "categories",
            BlockKind::CatalogGrid => "catalog_grid",
            BlockKind::Features => "features",
            BlockKind::Form => "form",
            BlockKind::Video => "video",
            BlockKind::Map => "map",
            BlockKind::Accordion => "accordion",
            BlockKind::SocialIcons => "social_icons",
            BlockKind::Divider => "divider",
            BlockKind::Spacer => "spacer",
            BlockKind::Quote => "quote",
            BlockKind::Testimonials => "testimonials",
            BlockKind::Header => "header",
            BlockKind::Unknown(tag) => tag,
        }
    }

    pub fn is_layout(&self) -> bool {
        matches!(self, BlockKind::Layout)
    }
}

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => BlockKind::Text,
            "hero" => BlockKind::Hero,
            "image" => BlockKind::Image,
            "button" => BlockKind::Button,
            "layout" => BlockKind::Layout,
            "categories" => BlockKind::Categories,
            "catalog_grid" => BlockKind::CatalogGrid,
            "features" => BlockKind::Features,
            "form" => BlockKind::Form,
            "video" => BlockKind::Video,
            "map" => BlockKind::Map,
            "accordion" => BlockKind::Accordion,
            "social_icons" => BlockKind::SocialIcons,
            "divider" => BlockKind::Divider,
            "spacer" => BlockKind::Spacer,
            "quote" => BlockKind::Quote,
            "testimonials" => BlockKind::Testimonials,
            "header" => BlockKind::Header,
            _ => BlockKind::Unknown(tag),
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific configuration.
///
/// Layout blocks carry a structured column set; every other kind keeps
/// a free-form settings object so that settings added by newer editors
/// survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockData {
    Layout(LayoutData),
    Settings(Map<String, Value>),
}

impl Default for BlockData {
    fn default() -> Self {
        BlockData::Settings(Map::new())
    }
}

impl BlockData {
    pub fn as_layout(&self) -> Option<&LayoutData> {
        match self {
            BlockData::Layout(layout) => Some(layout),
            BlockData::Settings(_) => None,
        }
    }

    pub fn as_settings(&self) -> Option<&Map<String, Value>> {
        match self {
            BlockData::Settings(settings) => Some(settings),
            BlockData::Layout(_) => None,
        }
    }
}

/// Column-set configuration of a layout block.
///
/// Invariant: `columns.len() == preset.column_count()`. The preset
/// engine in `stencil-editor` is the only code that changes the column
/// count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutData {
    pub preset: Preset,
    pub columns: Vec<Column>,
    #[serde(
        default,
        rename = "verticalAlign",
        skip_serializing_if = "Option::is_none"
    )]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl LayoutData {
    /// Empty column set for the given preset.
    pub fn empty(preset: Preset) -> Self {
        let columns = (0..preset.column_count()).map(|_| Column::default()).collect();
        Self {
            preset,
            columns,
            vertical_align: None,
            direction: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Row,
    RowReverse,
}

/// Ordered sequence of blocks owned by one layout block.
///
/// Children sit behind `Arc` so that tree snapshots share untouched
/// columns; a single tree never aliases a block through two paths.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Column(pub Vec<Arc<Block>>);

impl Column {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Block>> {
        self.0.iter()
    }
}

/// Spacing overrides. Field-wise optional so a partial edit merges
/// with whatever the block already carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockStyles {
    #[serde(
        default,
        rename = "paddingTop",
        skip_serializing_if = "Option::is_none"
    )]
    pub padding_top: Option<u32>,
    #[serde(
        default,
        rename = "paddingBottom",
        skip_serializing_if = "Option::is_none"
    )]
    pub padding_bottom: Option<u32>,
}

impl BlockStyles {
    /// Overlay `patch` on `self`, clamping paddings into range.
    pub fn merged(&self, patch: &BlockStyles) -> BlockStyles {
        BlockStyles {
            padding_top: clamp_padding(patch.padding_top.or(self.padding_top)),
            padding_bottom: clamp_padding(patch.padding_bottom.or(self.padding_bottom)),
        }
    }
}

fn clamp_padding(value: Option<u32>) -> Option<u32> {
    value.map(|v| {
        if v > MAX_PADDING {
            tracing::warn!(value = v, max = MAX_PADDING, "padding clamped to range");
            MAX_PADDING
        } else {
            v
        }
    })
}

/// Entrance animation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: u64,
    pub delay: u64,
    pub repeat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockTheme {
    Auto,
    Light,
    Dark,
}

/// A node in the page tree.
///
/// A block's `kind` never changes after creation; only `data`,
/// `styles`, `animation` and `anchor_id` mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub data: BlockData,
    #[serde(default, rename = "anchorId", skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<BlockStyles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_theme: Option<BlockTheme>,
}

impl Block {
    /// New block with a fresh id and kind-appropriate default data,
    /// as created by dropping a palette entry onto the tree.
    pub fn new(kind: BlockKind) -> Self {
        let data = crate::defaults::initial_data(&kind);
        Self {
            id: BlockId::fresh(),
            kind,
            data,
            anchor_id: None,
            styles: None,
            animation: None,
            block_theme: None,
        }
    }

    pub fn layout_data(&self) -> Option<&LayoutData> {
        self.data.as_layout()
    }

    pub fn settings(&self) -> Option<&Map<String, Value>> {
        self.data.as_settings()
    }
}

/// Reduce a user-chosen anchor to `[a-z0-9-_]`.
///
/// Whitespace becomes `-`; anything else outside the set is dropped.
pub fn sanitize_anchor(raw: &str) -> String {
    raw.chars()
        .flat_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else {
                let lower = c.to_ascii_lowercase();
                match lower {
                    'a'..='z' | '0'..='9' | '-' | '_' => Some(lower),
                    _ => None,
                }
            }
        })
        .collect()
}
