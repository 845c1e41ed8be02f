//! Model for the parameterized route.

use serde::Deserialize;
use std::fmt;

use super::archive::{self, ArchiveMap};
use super::{Model, Reserved};

const KEY_IS_WIDGET: &str = "isWidget";
const KEY_MAX_WIDGETS: &str = "maxWidgets";
const KEY_WIDGET_RATIO: &str = "widgetRatio";
const KEY_WIDGETS: &str = "widgets";

/// Response of `POST /route2`.
///
/// Wire keys: `isWidget`, `widget-count`, `widgetRatio`, `widgets`, plus
/// the reserved `error` and `version`. Domain fields are required unless
/// the response carries a non-empty `error`, in which case missing domain
/// fields take their zero values.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "Route2Wire")]
pub struct Route2Model {
    is_widget: bool,
    max_widgets: i64,
    widget_ratio: f32,
    widgets: Vec<String>,
    reserved: Reserved,
}

#[derive(Deserialize)]
struct Route2Wire {
    #[serde(rename = "isWidget")]
    is_widget: Option<bool>,
    #[serde(rename = "widget-count")]
    max_widgets: Option<i64>,
    #[serde(rename = "widgetRatio")]
    widget_ratio: Option<f32>,
    widgets: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

impl TryFrom<Route2Wire> for Route2Model {
    type Error = String;

    fn try_from(wire: Route2Wire) -> Result<Self, Self::Error> {
        let reported = wire.error.as_deref().is_some_and(|e| !e.is_empty());
        let missing = [
            (wire.is_widget.is_none(), "isWidget"),
            (wire.max_widgets.is_none(), "widget-count"),
            (wire.widget_ratio.is_none(), "widgetRatio"),
            (wire.widgets.is_none(), "widgets"),
        ]
        .into_iter()
        .filter_map(|(absent, key)| absent.then_some(key))
        .collect::<Vec<_>>();

        if !reported && !missing.is_empty() {
            return Err(format!("missing field(s): {}", missing.join(", ")));
        }

        Ok(Self {
            is_widget: wire.is_widget.unwrap_or_default(),
            max_widgets: wire.max_widgets.unwrap_or_default(),
            widget_ratio: wire.widget_ratio.unwrap_or_default(),
            widgets: wire.widgets.unwrap_or_default(),
            reserved: Reserved::new(wire.error, wire.version),
        })
    }
}

impl Route2Model {
    pub fn is_widget(&self) -> bool {
        self.is_widget
    }

    pub fn max_widgets(&self) -> i64 {
        self.max_widgets
    }

    pub fn widget_ratio(&self) -> f32 {
        self.widget_ratio
    }

    pub fn widgets(&self) -> &[String] {
        &self.widgets
    }
}

impl Model for Route2Model {
    const NAME: &'static str = "Route2Model";

    fn error(&self) -> &str {
        self.reserved.error()
    }

    fn version(&self) -> &str {
        self.reserved.version()
    }

    fn upgraded(mut self) -> Self {
        self.reserved.upgrade();
        self
    }

    fn archive(&self) -> ArchiveMap {
        let mut map = ArchiveMap::new();
        map.insert(KEY_IS_WIDGET.to_string(), self.is_widget.into());
        map.insert(KEY_MAX_WIDGETS.to_string(), self.max_widgets.into());
        map.insert(KEY_WIDGET_RATIO.to_string(), f64::from(self.widget_ratio).into());
        map.insert(KEY_WIDGETS.to_string(), self.widgets.clone().into());
        self.reserved.archive_into(&mut map);
        map
    }

    fn restore(map: &ArchiveMap) -> Self {
        Self {
            is_widget: archive::get_bool(map, KEY_IS_WIDGET),
            max_widgets: archive::get_i64(map, KEY_MAX_WIDGETS),
            widget_ratio: archive::get_f32(map, KEY_WIDGET_RATIO),
            widgets: archive::get_strings(map, KEY_WIDGETS),
            reserved: Reserved::restore(map),
        }
        .upgraded()
    }
}

impl PartialEq for Route2Model {
    fn eq(&self, other: &Self) -> bool {
        self.is_widget == other.is_widget
            && self.max_widgets == other.max_widgets
            && self.widget_ratio == other.widget_ratio
            && self.widgets == other.widgets
    }
}

impl fmt::Display for Route2Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::NAME)?;
        writeln!(f, "> isWidget: {}", self.is_widget)?;
        writeln!(f, "> maxWidgets: {}", self.max_widgets)?;
        writeln!(f, "> widgetRatio: {}", self.widget_ratio)?;
        writeln!(f, "> widgets: [{}]", self.widgets.join(", "))?;
        writeln!(f, "> error: {:?}", self.error())?;
        write!(f, "> version: {}", self.version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CURRENT_VERSION;

    const FULL: &str = r#"{
        "isWidget": true,
        "widget-count": 3,
        "widgetRatio": 0.5,
        "widgets": ["alpha", "beta", "gamma"]
    }"#;

    fn decode(json: &str) -> Result<Route2Model, serde_json::Error> {
        serde_json::from_str::<Route2Model>(json).map(Model::upgraded)
    }

    #[test]
    fn test_decode_full() {
        let model = decode(FULL).unwrap();
        assert!(model.is_widget());
        assert_eq!(model.max_widgets(), 3);
        assert_eq!(model.widget_ratio(), 0.5);
        assert_eq!(model.widgets(), ["alpha", "beta", "gamma"]);
        assert_eq!(model.error(), "");
        assert_eq!(model.version(), CURRENT_VERSION);
    }

    #[test]
    fn test_missing_domain_field_fails() {
        let err = decode(r#"{"isWidget": true, "widgetRatio": 0.1, "widgets": []}"#).unwrap_err();
        assert!(err.to_string().contains("widget-count"));
    }

    #[test]
    fn test_wrong_type_fails() {
        assert!(decode(r#"{"isWidget":"yes","widget-count":1,"widgetRatio":1,"widgets":[]}"#).is_err());
    }

    #[test]
    fn test_error_only_response_decodes_with_defaults() {
        let model = decode(r#"{"error":"token expired"}"#).unwrap();
        assert_eq!(model.error(), "token expired");
        assert!(!model.is_widget());
        assert_eq!(model.max_widgets(), 0);
        assert!(model.widgets().is_empty());
        assert_eq!(model.version(), CURRENT_VERSION);
    }

    #[test]
    fn test_empty_error_does_not_excuse_missing_fields() {
        assert!(decode(r#"{"error":""}"#).is_err());
    }

    #[test]
    fn test_plain_serde_decode_is_versioned() {
        let model: Route2Model = serde_json::from_str(FULL).unwrap();
        assert_eq!(model.version(), CURRENT_VERSION);

        let model: Route2Model =
            serde_json::from_str(r#"{"error":"denied","version":"1.0"}"#).unwrap();
        assert_eq!(model.version(), "1.00");
    }

    #[test]
    fn test_unknown_version_kept() {
        let json = r#"{"isWidget":false,"widget-count":0,"widgetRatio":0,"widgets":[],"version":"9.10"}"#;
        assert_eq!(decode(json).unwrap().version(), "9.10");
    }

    #[test]
    fn test_equality_ignores_reserved_fields() {
        let plain = decode(FULL).unwrap();
        let with_error = decode(
            r#"{"isWidget":true,"widget-count":3,"widgetRatio":0.5,
                "widgets":["alpha","beta","gamma"],"error":"x","version":"2.00"}"#,
        )
        .unwrap();
        assert_eq!(plain, with_error);

        let different = decode(
            r#"{"isWidget":true,"widget-count":4,"widgetRatio":0.5,"widgets":["alpha","beta","gamma"]}"#,
        )
        .unwrap();
        assert_ne!(plain, different);
    }

    #[test]
    fn test_archive_uses_local_keys() {
        let archive = decode(FULL).unwrap().archive();
        assert_eq!(archive["isWidget"], true);
        assert_eq!(archive["maxWidgets"], 3);
        assert_eq!(archive["widgetRatio"], 0.5);
        assert_eq!(archive["widgets"][1], "beta");
        assert_eq!(archive["version"], "1.00");
    }

    #[test]
    fn test_restore_preserves_fields() {
        let model = decode(FULL).unwrap();
        let restored = Route2Model::restore(&model.archive());
        assert_eq!(restored, model);
        assert_eq!(restored.widgets(), model.widgets());
        assert_eq!(restored.version(), model.version());
    }

    #[test]
    fn test_restore_defaults_missing_entries() {
        let restored = Route2Model::restore(&ArchiveMap::new());
        assert!(!restored.is_widget());
        assert_eq!(restored.widget_ratio(), 0.0);
        assert_eq!(restored.version(), CURRENT_VERSION);
    }
}
