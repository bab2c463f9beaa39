#![forbid(unsafe_code)]

//! JSON configuration feed.
//!
//! A configuration document carries the catalog plus the startup selection,
//! the initial view transform, static note labels shown beside the toggles,
//! and the log level. Everything except `bases` and `attributes` is optional.
//!
//! ```json
//! {
//!   "bases": [{ "id": "Base_1", "supported": ["Tarasenko"], "src": "./img/Base_1.svg" }],
//!   "attributes": [{ "tag": "Tarasenko", "label": "Тарасенко", "color": "#5c90ce", "src": "./img/Tarasenko.svg" }],
//!   "initial": { "base": "Base_1", "active": ["Tarasenko"] },
//!   "view": { "scale": 0.17, "offset_x": -200.0, "offset_y": 100.0 },
//!   "notes": [{ "text": "Кудрик", "background": "rgba(250, 100, 102, 0.45)" }],
//!   "log_level": "info"
//! }
//! ```

use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::warn;

use crate::catalog::{AttributeDef, AttributeTag, BaseId, BaseVariant, Catalog};
use crate::error::ConfigError;
use crate::selection::SelectionState;

const BUILTIN_JSON: &str = include_str!("../assets/default_catalog.json");

/// Startup selection. Defaults to the first declared base with nothing active.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InitialSelection {
    pub base: BaseId,
    #[serde(default)]
    pub active: Vec<AttributeTag>,
}

/// Initial pan/zoom and zoom limits.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Scale change per wheel event.
    pub zoom_step: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scale: 0.17,
            offset_x: -200.0,
            offset_y: 100.0,
            zoom_step: 0.1,
            min_scale: 0.125,
            max_scale: 4.0,
        }
    }
}

/// A static text label rendered below the attribute toggles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoteDef {
    pub text: String,
    /// CSS background color.
    pub background: String,
}

#[derive(Deserialize)]
struct RawConfig {
    bases: Vec<BaseVariant>,
    attributes: Vec<AttributeDef>,
    #[serde(default)]
    initial: Option<InitialSelection>,
    #[serde(default)]
    view: ViewConfig,
    #[serde(default)]
    notes: Vec<NoteDef>,
    #[serde(default = "default_log_level")]
    log_level: String,
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// Validated compositor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositorConfig {
    pub catalog: Catalog,
    pub initial: InitialSelection,
    pub view: ViewConfig,
    pub notes: Vec<NoteDef>,
    pub log_level: String,
}

impl CompositorConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let catalog = Catalog::new(raw.bases, raw.attributes);

        let first = catalog.bases().first().ok_or(ConfigError::NoBases)?;
        let initial = raw.initial.unwrap_or_else(|| InitialSelection {
            base: first.id.clone(),
            active: Vec::new(),
        });
        if catalog.base(&initial.base).is_none() {
            return Err(ConfigError::UnknownInitialBase(initial.base));
        }
        if let Some(tag) = initial.active.iter().find(|t| !catalog.contains_tag(t)) {
            return Err(ConfigError::UnknownInitialTag(tag.clone()));
        }

        let view = raw.view;
        let bounds_ok = view.min_scale.is_finite()
            && view.max_scale.is_finite()
            && view.min_scale > 0.0
            && view.min_scale <= view.max_scale;
        if !bounds_ok {
            return Err(ConfigError::InvalidZoomBounds {
                min: view.min_scale,
                max: view.max_scale,
            });
        }
        if !(view.zoom_step.is_finite() && view.zoom_step > 0.0) {
            return Err(ConfigError::InvalidZoomStep(view.zoom_step));
        }
        if !(view.scale.is_finite() && view.scale > 0.0) {
            return Err(ConfigError::InvalidScale(view.scale));
        }

        Ok(Self {
            catalog,
            initial,
            view,
            notes: raw.notes,
            log_level: raw.log_level,
        })
    }

    /// The embedded default catalog.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_JSON)
    }

    /// Starting selection state.
    #[must_use]
    pub fn initial_selection(&self) -> SelectionState {
        SelectionState::new(self.initial.base.clone(), self.initial.active.iter().cloned())
    }

    /// Maximum log level, falling back to `INFO` for unrecognized values.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or_else(|_| {
            warn!(level = %self.log_level, "unrecognized log level, using info");
            LevelFilter::INFO
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r##"{
        "bases": [{ "id": "B1", "supported": ["a"], "src": "b1.png" }],
        "attributes": [{ "tag": "a", "label": "A", "color": "#010203", "src": "a.png" }]
    }"##;

    #[test]
    fn builtin_catalog_loads() {
        let cfg = CompositorConfig::builtin().unwrap();
        assert_eq!(cfg.catalog.bases().len(), 4);
        assert_eq!(cfg.catalog.attributes().len(), 11);
        assert_eq!(cfg.notes.len(), 4);
        let state = cfg.initial_selection();
        assert_eq!(state.current_base().as_str(), "Base_1");
        assert!(state.is_active(&"Tarasenko".into()));
        assert!(state.is_consistent(&cfg.catalog));
    }

    #[test]
    fn builtin_hosts_every_tag_somewhere() {
        let cfg = CompositorConfig::builtin().unwrap();
        for def in cfg.catalog.attributes() {
            assert!(
                cfg.catalog.bases().iter().any(|b| b.supports(&def.tag)),
                "{} is not hosted by any base",
                def.tag
            );
        }
    }

    #[test]
    fn optional_sections_default() {
        let cfg = CompositorConfig::from_json_str(MINIMAL).unwrap();
        assert_eq!(cfg.initial.base, BaseId::from("B1"));
        assert!(cfg.initial.active.is_empty());
        assert_eq!(cfg.view, ViewConfig::default());
        assert!(cfg.notes.is_empty());
        assert_eq!(cfg.max_level(), LevelFilter::INFO);
    }

    #[test]
    fn partial_view_section_fills_defaults() {
        let json = MINIMAL.replacen('{', r#"{ "view": { "scale": 1.0 },"#, 1);
        let cfg = CompositorConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg.view.scale, 1.0);
        assert_eq!(cfg.view.max_scale, 4.0);
    }

    #[test]
    fn rejects_empty_bases() {
        let json = r#"{ "bases": [], "attributes": [] }"#;
        assert_eq!(
            CompositorConfig::from_json_str(json),
            Err(ConfigError::NoBases)
        );
    }

    #[test]
    fn rejects_unknown_initial_base_and_tag() {
        let json = MINIMAL.replacen('{', r#"{ "initial": { "base": "B9" },"#, 1);
        assert_eq!(
            CompositorConfig::from_json_str(&json),
            Err(ConfigError::UnknownInitialBase("B9".into()))
        );

        let json = MINIMAL.replacen('{', r#"{ "initial": { "base": "B1", "active": ["z"] },"#, 1);
        assert_eq!(
            CompositorConfig::from_json_str(&json),
            Err(ConfigError::UnknownInitialTag("z".into()))
        );
    }

    #[test]
    fn rejects_bad_zoom_settings() {
        let json = MINIMAL.replacen(
            '{',
            r#"{ "view": { "min_scale": 2.0, "max_scale": 1.0 },"#,
            1,
        );
        assert!(matches!(
            CompositorConfig::from_json_str(&json),
            Err(ConfigError::InvalidZoomBounds { .. })
        ));

        let json = MINIMAL.replacen('{', r#"{ "view": { "zoom_step": 0.0 },"#, 1);
        assert_eq!(
            CompositorConfig::from_json_str(&json),
            Err(ConfigError::InvalidZoomStep(0.0))
        );

        let json = MINIMAL.replacen('{', r#"{ "view": { "scale": -1.0 },"#, 1);
        assert_eq!(
            CompositorConfig::from_json_str(&json),
            Err(ConfigError::InvalidScale(-1.0))
        );
    }

    #[test]
    fn rejects_bad_color() {
        let json = MINIMAL.replace("#010203", "blue");
        assert!(matches!(
            CompositorConfig::from_json_str(&json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unknown_log_level_falls_back() {
        let json = MINIMAL.replacen('{', r#"{ "log_level": "chatty","#, 1);
        let cfg = CompositorConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg.max_level(), LevelFilter::INFO);

        let json = MINIMAL.replacen('{', r#"{ "log_level": "debug","#, 1);
        let cfg = CompositorConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg.max_level(), LevelFilter::DEBUG);
    }
}
