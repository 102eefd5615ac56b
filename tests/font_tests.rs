// Host-side tests for typeface parsing and glyph shaping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod font {
    include!("../src/font.rs");
}

use font::*;
use glam::Vec2;

// Square "o" with a square hole, a thin "l", a curved "d" and a "?".
const TYPEFACE: &str = r#"{
    "familyName": "Test Sans",
    "resolution": 1000,
    "boundingBox": { "yMin": -100, "yMax": 900, "xMin": 0, "xMax": 1000 },
    "underlineThickness": 50,
    "glyphs": {
        "o": { "ha": 120, "o": "m 0 0 l 0 100 l 100 100 l 100 0 z m 25 25 l 75 25 l 75 75 l 25 75 z" },
        "l": { "ha": 30, "o": "m 0 0 l 0 100 l 20 100 l 20 0 z" },
        "d": { "ha": 110, "o": "m 0 0 l 0 100 q 100 0 100 100 z" },
        "?": { "ha": 60, "o": "m 0 0 l 0 50 l 50 50 l 50 0 z" },
        " ": { "ha": 40 }
    }
}"#;

fn font() -> Font {
    Font::parse(TYPEFACE).expect("test typeface parses")
}

fn max_x(points: &[Vec2]) -> f32 {
    points.iter().map(|p| p.x).fold(f32::MIN, f32::max)
}

fn min_x(points: &[Vec2]) -> f32 {
    points.iter().map(|p| p.x).fold(f32::MAX, f32::min)
}

#[test]
fn parses_metadata_and_glyphs() {
    let f = font();
    assert_eq!(f.family_name, "Test Sans");
    assert_eq!(f.resolution, 1000.0);
    assert_eq!(f.glyph_count(), 5);
    assert_eq!(f.glyph('o').map(|g| g.advance), Some(120.0));
    assert_eq!(f.glyph('o').map(|g| g.outline.len()), Some(8));
    assert!(f.glyph(' ').is_some_and(|g| g.outline.is_empty()));
}

#[test]
fn quadratic_command_lists_end_point_first() {
    let f = font();
    let outline = &f.glyph('d').map(|g| g.outline.clone()).unwrap_or_default();
    assert_eq!(
        outline.last(),
        Some(&OutlineCommand::QuadTo {
            ctrl: Vec2::new(100.0, 100.0),
            to: Vec2::new(100.0, 0.0),
        })
    );
}

#[test]
fn counter_becomes_a_hole() {
    let shapes = font().generate_shapes("o", 1000.0, 12);
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].contour.len(), 4);
    assert_eq!(shapes[0].holes.len(), 1);
    assert!(signed_area(&shapes[0].contour) < 0.0);
    assert!(signed_area(&shapes[0].holes[0]) > 0.0);
}

#[test]
fn curves_flatten_into_curve_segments_points() {
    let shapes = font().generate_shapes("d", 1000.0, 4);
    assert_eq!(shapes.len(), 1);
    // Two line points plus four curve samples, the last landing on (100, 0).
    assert_eq!(shapes[0].contour.len(), 6);
    let last = shapes[0].contour[5];
    assert!((last - Vec2::new(100.0, 0.0)).length() < 1e-4);
}

#[test]
fn advance_and_size_scale_layout() {
    let shapes = font().generate_shapes("ol", 10.0, 12);
    assert_eq!(shapes.len(), 2);
    // scale = 10 / 1000
    assert!((max_x(&shapes[0].contour) - 1.0).abs() < 1e-5);
    assert!((min_x(&shapes[1].contour) - 1.2).abs() < 1e-5);
}

#[test]
fn newline_resets_x_and_moves_down_one_line() {
    let shapes = font().generate_shapes("l\nl", 1000.0, 12);
    assert_eq!(shapes.len(), 2);
    assert_eq!(min_x(&shapes[1].contour), 0.0);
    let top = |s: &Shape| s.contour.iter().map(|p| p.y).fold(f32::MIN, f32::max);
    assert!((top(&shapes[0]) - top(&shapes[1]) - 1050.0).abs() < 1e-3);
}

#[test]
fn missing_glyph_falls_back_to_question_mark() {
    let shapes = font().generate_shapes("x", 1000.0, 12);
    assert_eq!(shapes.len(), 1);
    assert_eq!(max_x(&shapes[0].contour), 50.0);
}

#[test]
fn missing_glyph_without_fallback_is_skipped() {
    let json = TYPEFACE.replace(r#""?": { "ha": 60, "o": "m 0 0 l 0 50 l 50 50 l 50 0 z" },"#, "");
    let f = Font::parse(&json).expect("typeface without ? parses");
    let shapes = f.generate_shapes("xl", 1000.0, 12);
    assert_eq!(shapes.len(), 1);
    // The skipped glyph does not advance the pen.
    assert_eq!(min_x(&shapes[0].contour), 0.0);
}

#[test]
fn whitespace_advances_without_shapes() {
    let shapes = font().generate_shapes(" l", 1000.0, 12);
    assert_eq!(shapes.len(), 1);
    assert_eq!(min_x(&shapes[0].contour), 40.0);
}

#[test]
fn invalid_json_is_an_error() {
    assert!(matches!(Font::parse("{ nope"), Err(FontError::Json(_))));
}

#[test]
fn non_positive_resolution_is_rejected() {
    let json = TYPEFACE.replace(r#""resolution": 1000"#, r#""resolution": 0"#);
    assert!(matches!(Font::parse(&json), Err(FontError::Resolution(r)) if r == 0.0));
}

#[test]
fn unknown_outline_command_is_rejected() {
    let json = TYPEFACE.replace("m 0 0 l 0 100 l 20 100 l 20 0 z", "m 0 0 k 1 2");
    match Font::parse(&json) {
        Err(FontError::Outline { glyph, token }) => {
            assert_eq!(glyph, 'l');
            assert_eq!(token, "k");
        }
        other => panic!("expected outline error, got {:?}", other.map(|f| f.glyph_count())),
    }
}

#[test]
fn truncated_coordinates_are_rejected() {
    let json = TYPEFACE.replace("m 0 0 l 0 100 l 20 100 l 20 0 z", "m 0 0 l 0");
    assert!(matches!(Font::parse(&json), Err(FontError::Outline { glyph: 'l', .. })));
}

#[test]
fn progress_percent_needs_a_known_total() {
    let known = LoadProgress {
        loaded: 50,
        total: Some(200),
    };
    assert_eq!(known.percent(), Some(25.0));
    let unknown = LoadProgress {
        loaded: 50,
        total: None,
    };
    assert_eq!(unknown.percent(), None);
    let empty = LoadProgress {
        loaded: 0,
        total: Some(0),
    };
    assert_eq!(empty.percent(), None);
}

#[test]
fn holes_go_to_the_solid_that_contains_them() {
    let square = |x0: f32, size: f32, cw: bool| {
        let mut pts = vec![
            Vec2::new(x0, 0.0),
            Vec2::new(x0 + size, 0.0),
            Vec2::new(x0 + size, size),
            Vec2::new(x0, size),
        ];
        if cw {
            pts.reverse();
        }
        pts
    };
    let shapes = contours_to_shapes(vec![
        square(0.0, 10.0, true),
        square(20.0, 10.0, true),
        square(22.0, 4.0, false),
    ]);
    assert_eq!(shapes.len(), 2);
    assert!(shapes[0].holes.is_empty());
    assert_eq!(shapes[1].holes.len(), 1);
    assert!(contains_point(&shapes[1].contour, Vec2::new(25.0, 5.0)));
}

#[test]
fn holes_outside_every_solid_are_dropped() {
    let solid = vec![
        Vec2::new(0.0, 10.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(0.0, 0.0),
    ];
    let stray_hole = vec![
        Vec2::new(40.0, 40.0),
        Vec2::new(44.0, 40.0),
        Vec2::new(44.0, 44.0),
        Vec2::new(40.0, 44.0),
    ];
    let shapes = contours_to_shapes(vec![solid, stray_hole]);
    assert_eq!(shapes.len(), 1);
    assert!(shapes[0].holes.is_empty());
}

#[test]
fn polygon_queries_follow_winding_and_interior() {
    let ccw = [
        Vec2::new(0.0, 0.0),
        Vec2::new(4.0, 0.0),
        Vec2::new(4.0, 2.0),
        Vec2::new(0.0, 2.0),
    ];
    assert!((signed_area(&ccw) - 8.0).abs() < 1e-4);
    let mut cw = ccw;
    cw.reverse();
    assert!((signed_area(&cw) + 8.0).abs() < 1e-4);
    assert!(contains_point(&ccw, Vec2::new(1.0, 1.0)));
    assert!(contains_point(&cw, Vec2::new(3.0, 1.5)));
    assert!(!contains_point(&ccw, Vec2::new(5.0, 1.0)));
}
