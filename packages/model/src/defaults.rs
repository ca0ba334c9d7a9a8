//! # Defaults
//!
//! Per-kind default settings and the forward-compatible merge used
//! when a settings panel opens: a block saved before a setting existed
//! still resolves every value, because defaults sit underneath the
//! block's own data.

use serde_json::{json, Map, Value};

use crate::block::{Block, BlockData, BlockKind, LayoutData};
use crate::preset::Preset;

/// Default settings object for a block kind.
///
/// Unknown kinds default to an empty object; the settings registry
/// falls back to the raw inspector for those.
pub fn default_settings(kind: &BlockKind) -> Map<String, Value> {
    let value = match kind {
        BlockKind::Text => json!({
            "content": "",
            "align": "left",
            "size": "medium",
        }),
        BlockKind::Hero => json!({
            "title": "",
            "subtitle": "",
            "image": null,
            "overlay": 0.4,
            "height": "large",
        }),
        BlockKind::Image => json!({
            "src": null,
            "alt": "",
            "fit": "cover",
            "rounded": false,
        }),
        BlockKind::Button => json!({
            "label": "Button",
            "url": "",
            "variant": "primary",
            "align": "left",
        }),
        BlockKind::Categories => json!({
            "source": "all",
            "columns": 3,
            "show_titles": true,
        }),
        BlockKind::CatalogGrid => json!({
            "category": null,
            "columns": 3,
            "limit": 12,
            "show_prices": true,
        }),
        BlockKind::Features => json!({
            "items": [],
            "columns": 3,
            "icon_style": "outline",
        }),
        BlockKind::Form => json!({
            "fields": [],
            "submit_label": "Send",
            "success_message": "Thank you!",
        }),
        BlockKind::Video => json!({
            "url": "",
            "autoplay": false,
            "loop": false,
            "controls": true,
        }),
        BlockKind::Map => json!({
            "address": "",
            "zoom": 14,
        }),
        BlockKind::Accordion => json!({
            "items": [],
            "allow_multiple": false,
        }),
        BlockKind::SocialIcons => json!({
            "links": [],
            "size": "medium",
        }),
        BlockKind::Divider => json!({
            "style": "solid",
            "width": "full",
        }),
        BlockKind::Spacer => json!({
            "height": 32,
        }),
        BlockKind::Quote => json!({
            "text": "",
            "attribution": "",
        }),
        BlockKind::Testimonials => json!({
            "items": [],
            "layout": "carousel",
        }),
        BlockKind::Header => json!({
            "title": "",
            "level": 2,
            "align": "left",
        }),
        BlockKind::Layout | BlockKind::Unknown(_) => json!({}),
    };
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Starting `data` for a freshly created block of `kind`.
pub fn initial_data(kind: &BlockKind) -> BlockData {
    if kind.is_layout() {
        BlockData::Layout(LayoutData::empty(Preset::fifty_fifty()))
    } else {
        BlockData::Settings(default_settings(kind))
    }
}

/// Shallow merge of `overlay` on top of `base`, in place.
pub fn merge_settings(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        base.insert(key.clone(), value.clone());
    }
}

/// Settings as the panel should show them: kind defaults underneath,
/// the block's own values on top.
///
/// Layout blocks keep their structured `LayoutData`; this returns the
/// serialized view of it unchanged.
pub fn settings_with_defaults(block: &Block) -> Map<String, Value> {
    match &block.data {
        BlockData::Settings(settings) => {
            let mut merged = default_settings(&block.kind);
            merge_settings(&mut merged, settings);
            merged
        }
        BlockData::Layout(layout) => match serde_json::to_value(layout) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockId;

    #[test]
    fn defaults_fill_missing_settings() {
        let mut data = Map::new();
        data.insert("content".to_string(), json!("hello"));
        let block = Block {
            id: BlockId::from("t"),
            kind: BlockKind::Text,
            data: BlockData::Settings(data),
            anchor_id: None,
            styles: None,
            animation: None,
            block_theme: None,
        };

        let settings = settings_with_defaults(&block);
        // Block value wins over the default.
        assert_eq!(settings["content"], json!("hello"));
        // Setting the block predates still resolves.
        assert_eq!(settings["align"], json!("left"));
    }

    #[test]
    fn unknown_kind_has_empty_defaults() {
        let kind = BlockKind::Unknown("holo_banner".to_string());
        assert!(default_settings(&kind).is_empty());
    }

    #[test]
    fn initial_layout_data_is_two_empty_columns() {
        let data = initial_data(&BlockKind::Layout);
        let layout = data.as_layout().expect("layout data");
        assert_eq!(layout.preset, Preset::fifty_fifty());
        assert!(layout.columns.iter().all(|c| c.is_empty()));
    }
}
