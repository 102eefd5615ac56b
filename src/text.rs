use crate::font::{signed_area, Font, Shape};
use crate::geometry::MeshData;
use glam::{Vec2, Vec3};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};

/// Extrusion parameters for [`text_geometry`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextGeometryParams {
    pub size: f32,
    pub depth: f32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for TextGeometryParams {
    fn default() -> Self {
        Self {
            size: 100.0,
            depth: 50.0,
            curve_segments: 12,
            bevel_enabled: false,
            bevel_thickness: 10.0,
            bevel_size: 8.0,
            bevel_offset: 0.0,
            bevel_segments: 3,
        }
    }
}

/// Build an extruded mesh for `text`. Without a font this logs and returns
/// an empty mesh so callers can keep rendering.
pub fn text_geometry(text: &str, font: Option<&Font>, params: &TextGeometryParams) -> MeshData {
    let Some(font) = font else {
        log::error!("[text] font parameter is required");
        return MeshData::default();
    };
    let shapes = font.generate_shapes(text, params.size, params.curve_segments);
    extrude_shapes(&shapes, params)
}

/// Turn a settled font load into the mesh handed to the frame loop. A failed
/// load is logged and yields no mesh, so the scene keeps rendering without text.
pub fn text_from_font_load<E: std::fmt::Display>(
    result: Result<Font, E>,
    text: &str,
    params: &TextGeometryParams,
) -> Option<MeshData> {
    match result {
        Ok(font) => Some(text_geometry(text, Some(&font), params)),
        Err(e) => {
            log::error!("[font] load failed: {}", e);
            None
        }
    }
}

/// Extrude shapes along +Z from 0 to `depth`, plus bevel layers when enabled.
pub fn extrude_shapes(shapes: &[Shape], params: &TextGeometryParams) -> MeshData {
    let layers = extrusion_layers(params);
    let mut mesh = MeshData::default();
    for shape in shapes {
        extrude_shape(&mut mesh, shape, &layers);
    }
    mesh
}

// (z, outward offset) per ring of the side walls, bottom to top.
fn extrusion_layers(params: &TextGeometryParams) -> Vec<(f32, f32)> {
    let depth = params.depth.max(0.0);
    if !params.bevel_enabled || params.bevel_segments == 0 {
        return vec![(0.0, 0.0), (depth, 0.0)];
    }
    let segs = params.bevel_segments;
    let profile = |b: u32| {
        let t = b as f32 / segs as f32 * std::f32::consts::FRAC_PI_2;
        (
            params.bevel_thickness * t.cos(),
            params.bevel_size * t.sin() + params.bevel_offset,
        )
    };
    let mut layers = Vec::with_capacity(2 * (segs as usize + 1));
    for b in 0..=segs {
        let (z, off) = profile(b);
        layers.push((-z, off));
    }
    for b in (0..=segs).rev() {
        let (z, off) = profile(b);
        layers.push((depth + z, off));
    }
    layers
}

fn extrude_shape(mesh: &mut MeshData, shape: &Shape, layers: &[(f32, f32)]) {
    // Outer contour counter-clockwise, holes clockwise: the outward side of
    // every ring edge is then on its right.
    let contour = oriented(&shape.contour, true);
    let holes: Vec<Vec<Vec2>> = shape.holes.iter().map(|h| oriented(h, false)).collect();

    for ring in std::iter::once(&contour).chain(holes.iter()) {
        let normals = vertex_offsets(ring);
        for pair in layers.windows(2) {
            let (z0, off0) = pair[0];
            let (z1, off1) = pair[1];
            for i in 0..ring.len() {
                let j = (i + 1) % ring.len();
                let at = |k: usize, z: f32, off: f32| (ring[k] + normals[k] * off).extend(z);
                mesh.push_quad(at(i, z0, off0), at(j, z0, off0), at(j, z1, off1), at(i, z1, off1));
            }
        }
    }

    if let (Some(&(z_bottom, off_bottom)), Some(&(z_top, off_top))) = (layers.first(), layers.last()) {
        let inset = |ring: &[Vec2], off: f32| -> Vec<Vec2> {
            let normals = vertex_offsets(ring);
            ring.iter().zip(&normals).map(|(p, n)| *p + *n * off).collect()
        };
        let bottom_rings: Vec<Vec<Vec2>> = std::iter::once(inset(&contour, off_bottom))
            .chain(holes.iter().map(|h| inset(h, off_bottom)))
            .collect();
        let top_rings: Vec<Vec<Vec2>> = std::iter::once(inset(&contour, off_top))
            .chain(holes.iter().map(|h| inset(h, off_top)))
            .collect();
        push_cap(mesh, &bottom_rings, z_bottom, false);
        push_cap(mesh, &top_rings, z_top, true);
    }
}

fn oriented(points: &[Vec2], ccw: bool) -> Vec<Vec2> {
    let mut out = points.to_vec();
    if (signed_area(&out) > 0.0) != ccw {
        out.reverse();
    }
    out
}

// Per-vertex outward miter directions.
fn vertex_offsets(ring: &[Vec2]) -> Vec<Vec2> {
    let n = ring.len();
    let edge_normal = |a: Vec2, b: Vec2| {
        let d = (b - a).normalize_or_zero();
        Vec2::new(d.y, -d.x)
    };
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let n0 = edge_normal(prev, cur);
            let n1 = edge_normal(cur, next);
            let bisector = (n0 + n1).normalize_or_zero();
            let cos = bisector.dot(n1).max(0.25);
            bisector / cos
        })
        .collect()
}

fn push_cap(mesh: &mut MeshData, rings: &[Vec<Vec2>], z: f32, facing_up: bool) {
    let mut builder = Path::builder();
    for ring in rings.iter().filter(|r| r.len() > 2) {
        builder.begin(point(ring[0].x, ring[0].y));
        for p in &ring[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    let result = tessellator.tessellate_path(
        &path,
        &FillOptions::even_odd(),
        &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| {
            let p = v.position();
            Vec2::new(p.x, p.y)
        }),
    );
    if let Err(e) = result {
        log::warn!("[text] cap tessellation failed: {:?}", e);
        return;
    }

    for tri in buffers.indices.chunks_exact(3) {
        let [a, b, c] = [0, 1, 2].map(|k| buffers.vertices[tri[k] as usize]);
        let ccw = (b - a).perp_dot(c - a) > 0.0;
        let (b, c) = if ccw == facing_up { (b, c) } else { (c, b) };
        mesh.push_triangle(a.extend(z), b.extend(z), c.extend(z));
    }
}

/// Translation that centers the text on x/y the way the scene places it:
/// half the extent to the left and down, depth left as is.
pub fn centering_offset(mesh: &MeshData) -> Vec3 {
    match mesh.bounding_box() {
        Some(bb) => {
            let size = bb.size();
            Vec3::new(-0.5 * size.x, -0.5 * size.y, 0.0)
        }
        None => Vec3::ZERO,
    }
}
