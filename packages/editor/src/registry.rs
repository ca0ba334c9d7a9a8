//! # Settings Registry
//!
//! Maps a block kind to the capability that describes its settings
//! panel. Unknown or future kinds fall back to a raw-data inspector
//! instead of failing to render.

use std::collections::HashMap;

use serde_json::{Map, Value};
use stencil_model::{settings_with_defaults, Block, BlockKind};

/// What a settings panel renders from: the resolved values (defaults
/// underneath the block's own data) plus the provider that produced
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub provider: &'static str,
    pub values: Map<String, Value>,
}

/// Capability: describe the settings panel for one block kind.
pub trait SettingsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn describe(&self, block: &Block) -> SettingsView;
}

/// Standard provider: kind defaults merged under the block's data.
pub struct DefaultsProvider;

impl SettingsProvider for DefaultsProvider {
    fn name(&self) -> &'static str {
        "defaults"
    }

    fn describe(&self, block: &Block) -> SettingsView {
        SettingsView {
            provider: self.name(),
            values: settings_with_defaults(block),
        }
    }
}

/// Fallback for unrecognized kinds: show the raw data object as-is.
pub struct RawInspector;

impl SettingsProvider for RawInspector {
    fn name(&self) -> &'static str {
        "raw_inspector"
    }

    fn describe(&self, block: &Block) -> SettingsView {
        let values = match serde_json::to_value(&block.data) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        SettingsView {
            provider: self.name(),
            values,
        }
    }
}

/// Registry of settings providers keyed by block kind.
pub struct SettingsRegistry {
    providers: HashMap<BlockKind, Box<dyn SettingsProvider>>,
    fallback: Box<dyn SettingsProvider>,
}

impl SettingsRegistry {
    /// Empty registry with the raw inspector as fallback.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            fallback: Box::new(RawInspector),
        }
    }

    /// Registry with the defaults provider wired for every stock kind.
    pub fn with_stock_providers() -> Self {
        let mut registry = Self::new();
        for kind in [
            BlockKind::Text,
            BlockKind::Hero,
            BlockKind::Image,
            BlockKind::Button,
            BlockKind::Layout,
            BlockKind::Categories,
            BlockKind::CatalogGrid,
            BlockKind::Features,
            BlockKind::Form,
            BlockKind::Video,
            BlockKind::Map,
            BlockKind::Accordion,
            BlockKind::SocialIcons,
            BlockKind::Divider,
            BlockKind::Spacer,
            BlockKind::Quote,
            BlockKind::Testimonials,
            BlockKind::Header,
        ] {
            registry.register(kind, Box::new(DefaultsProvider));
        }
        registry
    }

    pub fn register(&mut self, kind: BlockKind, provider: Box<dyn SettingsProvider>) {
        self.providers.insert(kind, provider);
    }

    /// Provider for a kind; unknown kinds get the fallback.
    pub fn provider_for(&self, kind: &BlockKind) -> &dyn SettingsProvider {
        self.providers
            .get(kind)
            .map(|boxed| boxed.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    pub fn describe(&self, block: &Block) -> SettingsView {
        self.provider_for(&block.kind).describe(block)
    }
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        Self::with_stock_providers()
    }
}
