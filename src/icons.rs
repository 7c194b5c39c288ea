// ABOUTME: Icon source extraction for the deck-blocks library
// ABOUTME: Looks up icons by family and name and decodes them into primitive trees

use crate::errors::{DeckError, IconError, Result};
use log::info;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Coordinate frame used when an icon does not declare one.
pub const DEFAULT_VIEW_BOX: &str = "0 0 24 24";

/// Family used when a deck names an icon without one.
pub const DEFAULT_ICON_FAMILY: &str = "hi";

/// Family files compiled into the binary, keyed by family.
const BUNDLED_FAMILIES: [(&str, &str); 2] = [
    ("hi", include_str!("../assets/icons/hi.json")),
    ("fi", include_str!("../assets/icons/fi.json")),
];

/// Raw, undecoded form of one icon as it appears in a family file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IconSource {
    /// Serialized source of an icon component built through the shared
    /// `GenIcon({...})(props)` generator call.
    Generator(String),
    /// Pre-extracted generator argument, already structured.
    Tree(Value),
}

/// Shape of a node inside the generator's configuration literal.
#[derive(Debug, Deserialize)]
struct RawNode {
    tag: String,
    #[serde(default)]
    attr: BTreeMap<String, Value>,
    #[serde(default)]
    child: Vec<RawNode>,
}

/// One drawable primitive. Numeric attributes keep their source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Path {
        d: Option<String>,
        fill_rule: Option<String>,
        clip_rule: Option<String>,
    },
    Circle {
        cx: Option<String>,
        cy: Option<String>,
        r: Option<String>,
    },
    Rect {
        x: Option<String>,
        y: Option<String>,
        width: Option<String>,
        height: Option<String>,
        rx: Option<String>,
    },
    Line {
        x1: Option<String>,
        y1: Option<String>,
        x2: Option<String>,
        y2: Option<String>,
    },
    Polyline {
        points: Option<String>,
    },
    Polygon {
        points: Option<String>,
    },
    /// A tag this crate does not draw (groups, masks, ...).
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub children: Vec<Primitive>,
}

/// Root of one icon: its coordinate frame and top-level primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct IconDocument {
    pub view_box: String,
    pub children: Vec<Primitive>,
}

fn generator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)GenIcon\((\{.*?\})\)\(props\)").expect("generator pattern is valid")
    })
}

fn attr_text(attr: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    match attr.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Primitive {
    fn from_raw(node: RawNode) -> Self {
        let a = &node.attr;
        let shape = match node.tag.as_str() {
            "path" => Shape::Path {
                d: attr_text(a, "d"),
                fill_rule: attr_text(a, "fillRule"),
                clip_rule: attr_text(a, "clipRule"),
            },
            "circle" => Shape::Circle {
                cx: attr_text(a, "cx"),
                cy: attr_text(a, "cy"),
                r: attr_text(a, "r"),
            },
            "rect" => Shape::Rect {
                x: attr_text(a, "x"),
                y: attr_text(a, "y"),
                width: attr_text(a, "width"),
                height: attr_text(a, "height"),
                rx: attr_text(a, "rx"),
            },
            "line" => Shape::Line {
                x1: attr_text(a, "x1"),
                y1: attr_text(a, "y1"),
                x2: attr_text(a, "x2"),
                y2: attr_text(a, "y2"),
            },
            "polyline" => Shape::Polyline {
                points: attr_text(a, "points"),
            },
            "polygon" => Shape::Polygon {
                points: attr_text(a, "points"),
            },
            other => Shape::Unknown(other.to_string()),
        };

        Primitive {
            shape,
            children: node.child.into_iter().map(Primitive::from_raw).collect(),
        }
    }
}

impl IconDocument {
    fn from_raw(root: RawNode) -> Self {
        let view_box =
            attr_text(&root.attr, "viewBox").unwrap_or_else(|| DEFAULT_VIEW_BOX.to_string());
        IconDocument {
            view_box,
            children: root.child.into_iter().map(Primitive::from_raw).collect(),
        }
    }

    /// Decode an icon source into a document.
    pub fn parse(icon: &str, source: &IconSource) -> std::result::Result<Self, IconError> {
        let unparseable = |reason: String| IconError::UnparseableSource {
            icon: icon.to_string(),
            reason,
        };

        let raw: RawNode = match source {
            IconSource::Generator(text) => {
                let literal = generator_pattern()
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .ok_or_else(|| unparseable("no generator call found".to_string()))?;
                serde_json::from_str(literal.as_str()).map_err(|e| unparseable(e.to_string()))?
            }
            IconSource::Tree(value) => {
                RawNode::deserialize(value).map_err(|e| unparseable(e.to_string()))?
            }
        };

        Ok(IconDocument::from_raw(raw))
    }
}

/// Read-only collection of icon families.
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    families: HashMap<String, BTreeMap<String, IconSource>>,
}

impl IconCatalog {
    /// An empty catalog; every lookup reports an unavailable family.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the families compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        for (family, text) in BUNDLED_FAMILIES {
            catalog.add_family_json(family, text)?;
        }
        Ok(catalog)
    }

    /// Built-in families, overlaid with the families found in `dir` if given.
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self> {
        let mut catalog = Self::builtin()?;
        if let Some(dir) = dir {
            catalog.load_dir(dir)?;
        }
        Ok(catalog)
    }

    /// Load every `<family>.json` in `dir`. Returns the number of families read.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Err(DeckError::PathNotFoundError(dir.to_path_buf()));
        }

        let pattern = format!("{}/*.json", dir.to_string_lossy());
        let mut loaded = 0;
        for path in (glob::glob(&pattern)
            .map_err(|e| DeckError::IconCatalogError(format!("Invalid glob pattern: {}", e)))?)
        .flatten()
        {
            let Some(family) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            let text = fs::read_to_string(&path)?;
            self.add_family_json(&family, &text)?;
            info!("Loaded icon family '{}' from {:?}", family, path);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Register a family from the text of a family file (a JSON object
    /// mapping icon names to sources). Replaces any family with the same key.
    pub fn add_family_json(&mut self, family: &str, text: &str) -> Result<()> {
        let entries: BTreeMap<String, IconSource> = serde_json::from_str(text).map_err(|e| {
            DeckError::IconCatalogError(format!("Family '{}' is malformed: {}", family, e))
        })?;
        self.families.insert(family.to_string(), entries);
        Ok(())
    }

    /// Register or replace a single icon.
    pub fn insert(&mut self, family: &str, icon: &str, source: IconSource) {
        self.families
            .entry(family.to_string())
            .or_default()
            .insert(icon.to_string(), source);
    }

    pub fn families(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.families.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn icon_names(&self, family: &str) -> Option<Vec<&str>> {
        self.families
            .get(family)
            .map(|icons| icons.keys().map(String::as_str).collect())
    }

    /// Decode one icon. Nothing is cached: every call parses its source again.
    pub fn extract(&self, family: &str, icon: &str) -> std::result::Result<IconDocument, IconError> {
        let icons = self
            .families
            .get(family)
            .ok_or_else(|| IconError::FamilyUnavailable {
                family: family.to_string(),
            })?;
        let source = icons.get(icon).ok_or_else(|| IconError::NotFound {
            family: family.to_string(),
            icon: icon.to_string(),
        })?;
        IconDocument::parse(icon, source)
    }
}
