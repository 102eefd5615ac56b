// Typeface-JSON fonts and glyph outline shaping.
//
// The format is the one produced by facetype.js: a `glyphs` table keyed by
// single characters, each carrying an advance (`ha`) and an outline string
// (`o`) of space-separated commands in font units.

use fnv::FnvHashMap;
use glam::Vec2;
use lyon::algorithms::area::approximate_signed_area;
use lyon::algorithms::hit_test::hit_test_path;
use lyon::geom::{point, CubicBezierSegment, QuadraticBezierSegment};
use lyon::path::{FillRule, Path};
use serde::Deserialize;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("invalid typeface json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("font resolution must be positive, got {0}")]
    Resolution(f32),
    #[error("glyph {glyph:?}: malformed outline near token {token:?}")]
    Outline { glyph: char, token: String },
}

#[derive(Deserialize)]
struct TypefaceJson {
    glyphs: HashMap<String, GlyphJson>,
    #[serde(rename = "familyName", default)]
    family_name: String,
    resolution: f32,
    #[serde(rename = "boundingBox")]
    bounding_box: BoundsJson,
    #[serde(rename = "underlineThickness", default)]
    underline_thickness: f32,
}

#[derive(Deserialize)]
struct GlyphJson {
    #[serde(default)]
    ha: f32,
    #[serde(default)]
    o: Option<String>,
}

#[derive(Deserialize)]
struct BoundsJson {
    #[serde(rename = "yMin")]
    y_min: f32,
    #[serde(rename = "yMax")]
    y_max: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutlineCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    CubicTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Glyph {
    pub advance: f32,
    pub outline: Vec<OutlineCommand>,
}

#[derive(Clone, Debug)]
pub struct Font {
    pub family_name: String,
    pub resolution: f32,
    line_height: f32,
    glyphs: FnvHashMap<char, Glyph>,
}

/// A filled region: outer contour plus holes, points in text units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub contour: Vec<Vec2>,
    pub holes: SmallVec<[Vec<Vec2>; 2]>,
}

/// Progress of a streamed download.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl LoadProgress {
    /// Percentage when the total is known and non-zero.
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some(self.loaded as f64 / total as f64 * 100.0),
            _ => None,
        }
    }
}

impl Font {
    pub fn parse(json: &str) -> Result<Self, FontError> {
        let raw: TypefaceJson = serde_json::from_str(json)?;
        if !(raw.resolution > 0.0) {
            return Err(FontError::Resolution(raw.resolution));
        }
        let mut glyphs = FnvHashMap::default();
        for (key, glyph) in raw.glyphs {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                log::debug!("[font] skipping multi-char glyph key {:?}", key);
                continue;
            };
            let outline = match glyph.o.as_deref() {
                Some(o) => parse_outline(ch, o)?,
                None => Vec::new(),
            };
            glyphs.insert(
                ch,
                Glyph {
                    advance: glyph.ha,
                    outline,
                },
            );
        }
        Ok(Self {
            family_name: raw.family_name,
            resolution: raw.resolution,
            line_height: raw.bounding_box.y_max - raw.bounding_box.y_min + raw.underline_thickness,
            glyphs,
        })
    }

    #[inline]
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    #[inline]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Lay out `text` at `size` (text units per em) and return filled shapes.
    /// Each curve is flattened into `curve_segments` points.
    pub fn generate_shapes(&self, text: &str, size: f32, curve_segments: u32) -> Vec<Shape> {
        let scale = size / self.resolution;
        let divisions = curve_segments.max(1);
        let mut shapes = Vec::new();
        let mut offset = Vec2::ZERO;
        for ch in text.chars() {
            if ch == '\n' {
                offset.x = 0.0;
                offset.y -= self.line_height * scale;
                continue;
            }
            let Some(glyph) = self.glyph(ch).or_else(|| self.glyph('?')) else {
                log::warn!(
                    "[font] character {:?} does not exist in font family {}",
                    ch,
                    self.family_name
                );
                continue;
            };
            let contours = flatten_outline(&glyph.outline, scale, offset, divisions);
            shapes.extend(contours_to_shapes(contours));
            offset.x += glyph.advance * scale;
        }
        shapes
    }
}

fn parse_outline(glyph: char, outline: &str) -> Result<Vec<OutlineCommand>, FontError> {
    let mut tokens = outline.split_whitespace();
    let mut cmds = Vec::new();
    while let Some(action) = tokens.next() {
        let cmd = match action {
            "m" => OutlineCommand::MoveTo(next_point(&mut tokens, glyph, action)?),
            "l" => OutlineCommand::LineTo(next_point(&mut tokens, glyph, action)?),
            // End point comes first, then the control point(s).
            "q" => {
                let to = next_point(&mut tokens, glyph, action)?;
                let ctrl = next_point(&mut tokens, glyph, action)?;
                OutlineCommand::QuadTo { ctrl, to }
            }
            "b" => {
                let to = next_point(&mut tokens, glyph, action)?;
                let ctrl1 = next_point(&mut tokens, glyph, action)?;
                let ctrl2 = next_point(&mut tokens, glyph, action)?;
                OutlineCommand::CubicTo { ctrl1, ctrl2, to }
            }
            "z" => continue,
            other => {
                return Err(FontError::Outline {
                    glyph,
                    token: other.to_string(),
                })
            }
        };
        cmds.push(cmd);
    }
    Ok(cmds)
}

fn next_point(
    tokens: &mut std::str::SplitWhitespace<'_>,
    glyph: char,
    action: &str,
) -> Result<Vec2, FontError> {
    let mut coord = || {
        let tok = tokens.next().unwrap_or_default();
        tok.parse::<f32>().map_err(|_| FontError::Outline {
            glyph,
            token: format!("{action} {tok}"),
        })
    };
    let x = coord()?;
    let y = coord()?;
    Ok(Vec2::new(x, y))
}

fn flatten_outline(
    outline: &[OutlineCommand],
    scale: f32,
    offset: Vec2,
    divisions: u32,
) -> Vec<Vec<Vec2>> {
    let map = |p: Vec2| p * scale + offset;
    let to_lyon = |p: Vec2| point(p.x, p.y);
    let mut contours: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    let mut pen = Vec2::ZERO;
    for cmd in outline {
        match *cmd {
            OutlineCommand::MoveTo(p) => {
                if current.len() > 2 {
                    contours.push(std::mem::take(&mut current));
                }
                current.clear();
                pen = map(p);
                current.push(pen);
            }
            OutlineCommand::LineTo(p) => {
                pen = map(p);
                current.push(pen);
            }
            OutlineCommand::QuadTo { ctrl, to } => {
                let seg = QuadraticBezierSegment {
                    from: to_lyon(pen),
                    ctrl: to_lyon(map(ctrl)),
                    to: to_lyon(map(to)),
                };
                for j in 1..=divisions {
                    let s = seg.sample(j as f32 / divisions as f32);
                    current.push(Vec2::new(s.x, s.y));
                }
                pen = map(to);
            }
            OutlineCommand::CubicTo { ctrl1, ctrl2, to } => {
                let seg = CubicBezierSegment {
                    from: to_lyon(pen),
                    ctrl1: to_lyon(map(ctrl1)),
                    ctrl2: to_lyon(map(ctrl2)),
                    to: to_lyon(map(to)),
                };
                for j in 1..=divisions {
                    let s = seg.sample(j as f32 / divisions as f32);
                    current.push(Vec2::new(s.x, s.y));
                }
                pen = map(to);
            }
        }
    }
    if current.len() > 2 {
        contours.push(current);
    }
    for c in &mut contours {
        dedup_closed(c);
    }
    contours.retain(|c| c.len() > 2);
    contours
}

// Drop consecutive duplicates and a closing point equal to the first.
fn dedup_closed(points: &mut Vec<Vec2>) {
    points.dedup_by(|a, b| a.distance_squared(*b) <= f32::EPSILON);
    while points.len() > 1 {
        let (first, last) = (points[0], points[points.len() - 1]);
        if first.distance_squared(last) <= f32::EPSILON {
            points.pop();
        } else {
            break;
        }
    }
}

// Contours are flat polylines; the tolerance only applies to curves.
const POLYGON_TOLERANCE: f32 = 0.01;

fn polygon_path(points: &[Vec2]) -> Path {
    let mut builder = Path::builder();
    if let Some((first, rest)) = points.split_first() {
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    builder.build()
}

/// Signed polygon area; positive for counter-clockwise contours.
pub fn signed_area(points: &[Vec2]) -> f32 {
    approximate_signed_area(POLYGON_TOLERANCE, polygon_path(points).iter())
}

fn path_contains(path: &Path, p: Vec2) -> bool {
    hit_test_path(
        &point(p.x, p.y),
        path.iter(),
        FillRule::EvenOdd,
        POLYGON_TOLERANCE,
    )
}

/// Even-odd point-in-polygon test.
pub fn contains_point(polygon: &[Vec2], p: Vec2) -> bool {
    path_contains(&polygon_path(polygon), p)
}

/// Group contours into shapes. Clockwise contours are solids (TrueType
/// convention); the rest are holes assigned to the first solid holding one
/// of their points. Holes outside every solid are dropped.
/// A glyph with no clockwise contour is treated with the opposite convention.
pub fn contours_to_shapes(contours: Vec<Vec<Vec2>>) -> Vec<Shape> {
    if contours.is_empty() {
        return Vec::new();
    }
    let cw_solid = contours.iter().any(|c| signed_area(c) < 0.0);
    let is_solid = |c: &[Vec2]| {
        let a = signed_area(c);
        if cw_solid {
            a < 0.0
        } else {
            a > 0.0
        }
    };

    let (solids, holes): (Vec<_>, Vec<_>) = contours.into_iter().partition(|c| is_solid(c));
    let mut shapes: Vec<Shape> = solids
        .into_iter()
        .map(|contour| Shape {
            contour,
            holes: SmallVec::new(),
        })
        .collect();
    let solid_paths: Vec<Path> = shapes.iter().map(|s| polygon_path(&s.contour)).collect();
    for hole in holes {
        let owner = solid_paths
            .iter()
            .position(|path| hole.iter().any(|&p| path_contains(path, p)));
        match owner {
            Some(i) => shapes[i].holes.push(hole),
            None => log::debug!("[font] dropping orphan hole contour"),
        }
    }
    shapes
}
