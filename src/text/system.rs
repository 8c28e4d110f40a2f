use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use usvg::tiny_skia_path::PathSegment;

use crate::{
    foundation::{
        core::{Affine, BezPath, Point},
        error::{BurstError, BurstResult},
    },
    text::outline::{FontDescriptor, GlyphOutlineProvider, OutlinePath},
};

/// Families tried first when the rounded style hint is set.
const ROUNDED_FAMILIES: &[&str] = &[
    "SF Pro Rounded",
    "Arial Rounded MT Bold",
    "Nunito",
    "Varela Round",
    "M PLUS Rounded 1c",
];

/// Outline provider backed by installed fonts: usvg shapes a one-line `<text>` element and
/// flattens it to glyph paths.
pub struct SystemFontOutlines {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SystemFontOutlines {
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self { fontdb: Arc::new(db) }
    }

    /// Additionally load every font file under `dir`.
    pub fn with_font_dir(mut self, dir: &Path) -> Self {
        let db = Arc::make_mut(&mut self.fontdb);
        let before = db.len();
        db.load_fonts_dir(dir);
        tracing::debug!(dir = %dir.display(), added = db.len() - before, "loaded font dir");
        self
    }

    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    fn svg_document(text: &str, font: &FontDescriptor) -> String {
        let mut families: Vec<String> = Vec::new();
        if font.rounded {
            families.extend(ROUNDED_FAMILIES.iter().map(|f| format!("'{f}'")));
        }
        families.push(format!("'{}'", escape_xml(&font.family)));
        families.push("sans-serif".to_string());

        let size = font.size_px;
        let width = size * (text.chars().count() as f64 + 1.0);
        let height = size * 1.5;
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="0" y="{size}" font-family="{families}" font-weight="{weight}" font-size="{size}">{text}</text></svg>"#,
            families = families.join(", "),
            weight = font.weight,
            text = escape_xml(text),
        )
    }
}

impl Default for SystemFontOutlines {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphOutlineProvider for SystemFontOutlines {
    #[tracing::instrument(skip(self), fields(faces = self.face_count()))]
    fn outline(&self, text: &str, font: &FontDescriptor) -> BurstResult<OutlinePath> {
        font.validate()?;
        if self.fontdb.is_empty() {
            return Err(BurstError::outline("no font faces are installed"));
        }

        let svg = Self::svg_document(text, font);
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: face_resolver(font),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .context("parse generated text svg")
            .map_err(|e| BurstError::outline(format!("{e:#}")))?;

        let mut path = BezPath::new();
        collect_paths(tree.root(), &mut path);
        let outline = OutlinePath::new(path);
        if outline.is_empty() {
            return Err(BurstError::outline(format!(
                "text '{text}' produced no glyph outlines"
            )));
        }
        Ok(outline)
    }
}

fn collect_paths(group: &usvg::Group, out: &mut BezPath) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => collect_paths(g.as_ref(), out),
            usvg::Node::Text(t) => collect_paths(t.flattened(), out),
            usvg::Node::Path(p) => append_path(p, out),
            usvg::Node::Image(_) => {}
        }
    }
}

fn append_path(path: &usvg::Path, out: &mut BezPath) {
    let ts = path.abs_transform();
    let affine = Affine::new([
        f64::from(ts.sx),
        f64::from(ts.ky),
        f64::from(ts.kx),
        f64::from(ts.sy),
        f64::from(ts.tx),
        f64::from(ts.ty),
    ]);
    let pt = |p: usvg::tiny_skia_path::Point| affine * Point::new(f64::from(p.x), f64::from(p.y));

    for seg in path.data().segments() {
        match seg {
            PathSegment::MoveTo(p) => out.move_to(pt(p)),
            PathSegment::LineTo(p) => out.line_to(pt(p)),
            PathSegment::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathSegment::CubicTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathSegment::Close => out.close_path(),
        }
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Face wish list for one outline request: the rounded families when hinted, then the
/// requested family, all at the requested weight.
struct FaceRequest {
    families: Vec<String>,
    weight: u16,
}

impl FaceRequest {
    fn new(font: &FontDescriptor) -> Self {
        let mut families: Vec<String> = Vec::new();
        if font.rounded {
            families.extend(ROUNDED_FAMILIES.iter().map(|f| f.to_string()));
        }
        families.push(font.family.clone());
        Self {
            families,
            weight: font.weight,
        }
    }

    fn find(
        &self,
        db: &usvg::fontdb::Database,
        family: usvg::fontdb::Family<'_>,
    ) -> Option<usvg::fontdb::ID> {
        db.query(&usvg::fontdb::Query {
            families: &[family],
            weight: usvg::fontdb::Weight(self.weight),
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        })
    }

    /// First wished-for family that is installed, then generic sans-serif, then the heaviest
    /// installed face. Only an empty database yields `None`.
    fn pick(&self, db: &usvg::fontdb::Database) -> Option<usvg::fontdb::ID> {
        self.families
            .iter()
            .find_map(|name| self.find(db, usvg::fontdb::Family::Name(name)))
            .or_else(|| self.find(db, usvg::fontdb::Family::SansSerif))
            .or_else(|| db.faces().max_by_key(|f| f.weight.0).map(|f| f.id))
    }
}

fn face_resolver(font: &FontDescriptor) -> usvg::FontResolver<'static> {
    let request = FaceRequest::new(font);
    usvg::FontResolver {
        select_font: Box::new(move |_, fontdb| request.pick(fontdb)),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/system.rs"]
mod tests;
