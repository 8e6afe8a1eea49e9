//! Recolourable vector shapes normalized at load time
//!
//! Asset authors either wrap their paths in a single `<g>` or leave them
//! directly under the root `<svg>`. Both layouts are normalized into one
//! group element whose `fill` is the only thing recolouring touches, so the
//! live renderer and the exporter share a single substitution path.

use resvg::usvg;
use resvg::usvg::roxmltree::{Document, Node, ParsingOptions};

use crate::canvas::color::Rgb;
use crate::io::configuration::{ASSET_VIEWBOX_SIZE, BLACK};
use crate::io::error::{Result, malformed};

/// SVG namespace declared on every generated document
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
/// XLink namespace, declared so `xlink:href` in asset bodies stays valid
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

// Root attributes describing the document frame rather than presentation
const FRAME_ATTRIBUTES: &[&str] = &[
    "version",
    "baseProfile",
    "id",
    "x",
    "y",
    "width",
    "height",
    "viewBox",
    "preserveAspectRatio",
    "enable-background",
    "xml:space",
];

/// How the author laid out the shape's top level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeStructure {
    /// A single `<g>` is the root's only element child
    Grouped,
    /// Paths (or several elements) sit directly under the root
    Ungrouped,
}

/// The coordinate frame a shape is authored in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    /// Left edge
    pub min_x: f32,
    /// Top edge
    pub min_y: f32,
    /// Width in user units
    pub width: f32,
    /// Height in user units
    pub height: f32,
}

impl ViewBox {
    /// The `0 0 100 100` frame assets are authored in by convention
    pub const STANDARD: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        width: ASSET_VIEWBOX_SIZE,
        height: ASSET_VIEWBOX_SIZE,
    };

    fn parse(value: &str) -> Option<Self> {
        let numbers: Vec<f32> = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .ok()?;

        match numbers.as_slice() {
            &[min_x, min_y, width, height] => Some(Self {
                min_x,
                min_y,
                width,
                height,
            }),
            _ => None,
        }
    }

    /// Transform mapping this frame onto a square of side `size` at `(x, y)`
    pub fn placement(&self, x: f32, y: f32, size: f32) -> String {
        let offset = if self.min_x.abs() > f32::EPSILON || self.min_y.abs() > f32::EPSILON {
            format!(" translate({},{})", -self.min_x, -self.min_y)
        } else {
            String::new()
        };
        format!(
            "translate({x},{y}) scale({},{}){offset}",
            size / self.width,
            size / self.height
        )
    }

    /// Attribute form, `min_x min_y width height`
    pub fn attribute(&self) -> String {
        format!(
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

/// One immutable variant geometry, ready for recolouring
#[derive(Debug, Clone, PartialEq)]
pub struct VectorShape {
    view_box: ViewBox,
    structure: ShapeStructure,
    group: GroupTag,
    body: String,
}

impl VectorShape {
    /// Normalize an asset document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not well-formed XML, has no
    /// `<svg>` root, or its frame has a non-positive size.
    pub fn parse(document: &str) -> Result<Self> {
        let tree = parse_markup(document)?;
        let root = tree.root_element();
        if root.tag_name().name() != "svg" {
            return Err(malformed(&format!(
                "root element is <{}>, expected <svg>",
                root.tag_name().name()
            )));
        }

        let view_box = frame_of(root)?;
        let significant: Vec<Node<'_, '_>> = root
            .children()
            .filter(|node| {
                node.is_element()
                    || (node.is_text() && node.text().is_some_and(|t| !t.trim().is_empty()))
            })
            .collect();

        // The group that is recoloured, and whose content becomes the body
        let (structure, scope) = match significant.as_slice() {
            [only] if only.tag_name().name() == "g" => (ShapeStructure::Grouped, *only),
            _ => (ShapeStructure::Ungrouped, root),
        };
        let mut group = match structure {
            ShapeStructure::Grouped => GroupTag::from_element(scope, document),
            ShapeStructure::Ungrouped => GroupTag::default(),
        };
        let body = inner_markup(scope, document);

        for (key, value) in raw_attributes(root, document) {
            if !FRAME_ATTRIBUTES.contains(&key) {
                group.inherit(key, value);
            }
        }
        group.declare_namespaces(scope);
        group.strip_fill();

        Ok(Self {
            view_box,
            structure,
            group,
            body: body.to_string(),
        })
    }

    /// Coordinate frame of the shape
    pub const fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Layout detected when the asset was loaded
    pub const fn structure(&self) -> ShapeStructure {
        self.structure
    }

    /// The normalized group filled with `color`
    ///
    /// Every descendant without its own fill inherits the colour.
    pub fn recolored_group(&self, color: Rgb) -> String {
        format!("{}{}</g>", self.group.open(&color.css()), self.body)
    }

    /// A self-contained document of the recoloured shape at its native size
    pub fn standalone_document(&self, color: Rgb) -> String {
        format!(
            "<svg xmlns=\"{SVG_NAMESPACE}\" xmlns:xlink=\"{XLINK_NAMESPACE}\" width=\"{}\" height=\"{}\" viewBox=\"{}\">{}</svg>",
            self.view_box.width,
            self.view_box.height,
            self.view_box.attribute(),
            self.recolored_group(color)
        )
    }

    /// Check that the recoloured shape is accepted by the renderer
    ///
    /// Recolouring only swaps the group fill, so a shape that passes here
    /// renders in every colour.
    ///
    /// # Errors
    ///
    /// Returns `MalformedAsset` if the standalone document does not parse
    /// into a render tree.
    pub fn verify(&self) -> Result<()> {
        render_tree(&self.standalone_document(BLACK)).map(drop)
    }
}

/// Parse XML markup, accepting entities declared in a document type
///
/// # Errors
///
/// Returns `MalformedAsset` if the markup is not well-formed.
pub fn parse_markup(document: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(document, options).map_err(|e| malformed(&e))
}

/// Parse an SVG document into a render tree
///
/// # Errors
///
/// Returns `MalformedAsset` if usvg rejects the document.
pub fn render_tree(document: &str) -> Result<usvg::Tree> {
    usvg::Tree::from_str(document, &usvg::Options::default()).map_err(|e| malformed(&e))
}

/// Attributes of the normalized group, values kept exactly as written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct GroupTag {
    attributes: Vec<(String, String)>,
}

impl GroupTag {
    fn from_element(node: Node<'_, '_>, document: &str) -> Self {
        Self {
            attributes: raw_attributes(node, document)
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key.to_string(), value));
        }
    }

    fn remove(&mut self, key: &str) {
        self.attributes.retain(|(k, _)| k != key);
    }

    // Presentation set on the root is inherited; the group's own value wins,
    // per declaration for inline styles
    fn inherit(&mut self, key: &str, value: &str) {
        let merged = match self.get(key) {
            None => value.to_string(),
            Some(own) if key == "style" => merge_styles(value, own),
            Some(_) => return,
        };
        self.set(key, merged);
    }

    // Prefixes used in the body must stay bound once it is moved under a
    // new root
    fn declare_namespaces(&mut self, scope: Node<'_, '_>) {
        for namespace in scope.namespaces() {
            let Some(prefix) = namespace.name() else {
                continue;
            };
            if prefix == "xlink" && namespace.uri() == XLINK_NAMESPACE {
                continue;
            }
            let uri = namespace.uri().replace('&', "&amp;").replace('<', "&lt;");
            self.set(&format!("xmlns:{prefix}"), uri);
        }
    }

    fn strip_fill(&mut self) {
        self.remove("fill");
        let kept = {
            let Some(style) = self.get("style") else {
                return;
            };
            let kept: Vec<&str> = declarations(style)
                .filter(|(name, _)| name != "fill")
                .map(|(_, declaration)| declaration)
                .collect();
            (!kept.is_empty()).then(|| kept.join(";"))
        };
        match kept {
            Some(style) => self.set("style", style),
            None => self.remove("style"),
        }
    }

    fn open(&self, fill: &str) -> String {
        let attributes: String = self
            .attributes
            .iter()
            .map(|(key, value)| format!(" {key}=\"{}\"", value.replace('"', "&quot;")))
            .collect();
        format!("<g{attributes} fill=\"{fill}\">")
    }
}

// Declarations of an inline style with their lowercased property names
fn declarations(style: &str) -> impl Iterator<Item = (String, &str)> {
    style
        .split(';')
        .map(str::trim)
        .filter(|declaration| !declaration.is_empty())
        .map(|declaration| {
            let name = declaration
                .split_once(':')
                .map_or(declaration, |(name, _)| name);
            (name.trim().to_ascii_lowercase(), declaration)
        })
}

fn merge_styles(inherited: &str, own: &str) -> String {
    let overridden: Vec<String> = declarations(own).map(|(name, _)| name).collect();
    declarations(inherited)
        .filter(|(name, _)| !overridden.contains(name))
        .chain(declarations(own))
        .map(|(_, declaration)| declaration)
        .collect::<Vec<_>>()
        .join(";")
}

// Attributes as written in the source, qualified names and entity
// references intact
fn raw_attributes<'d>(
    node: Node<'_, '_>,
    document: &'d str,
) -> impl Iterator<Item = (&'d str, &'d str)> {
    node.attributes().filter_map(move |attribute| {
        Some((
            document.get(attribute.range_qname())?,
            document.get(attribute.range_value())?,
        ))
    })
}

// Markup between an element's start and end tags, exactly as written
fn inner_markup<'d>(node: Node<'_, '_>, document: &'d str) -> &'d str {
    let range = node.range();
    let Some(outer) = document.get(range.clone()) else {
        return "";
    };
    if outer.ends_with("/>") {
        return "";
    }

    // Attribute values may hold '>', so the start tag closes after the last one
    let scan_from = node
        .attributes()
        .map(|attribute| attribute.range().end.saturating_sub(range.start))
        .max()
        .unwrap_or(0);
    let start = outer
        .get(scan_from..)
        .and_then(|rest| rest.find('>'))
        .map(|offset| scan_from + offset + 1);
    match (start, outer.rfind("</")) {
        (Some(start), Some(end)) if start <= end => outer.get(start..end).unwrap_or_default(),
        _ => "",
    }
}

// Frame from viewBox, falling back to width/height, then the asset convention
fn frame_of(root: Node<'_, '_>) -> Result<ViewBox> {
    let view_box = if let Some(value) = root.attribute("viewBox") {
        ViewBox::parse(value).ok_or_else(|| malformed(&format!("invalid viewBox '{value}'")))?
    } else {
        let length = |key: &str| {
            root.attribute(key)
                .map(|v| v.trim().trim_end_matches("px").parse::<f32>().ok())
        };
        match (length("width"), length("height")) {
            (Some(Some(width)), Some(Some(height))) => ViewBox {
                min_x: 0.0,
                min_y: 0.0,
                width,
                height,
            },
            (None, None) => ViewBox::STANDARD,
            _ => return Err(malformed(&"root size is not a plain pixel length")),
        }
    };

    if view_box.width > 0.0 && view_box.height > 0.0 {
        Ok(view_box)
    } else {
        Err(malformed(&"shape frame has non-positive size"))
    }
}
