//! Integration tests for the layout engine.

use ocr2docx::layout::{LEFT_MARGIN_OFFSET, TOP_MARGIN_OFFSET, UNITS_PER_PIXEL};
use ocr2docx::{
    compute_page_spec, compute_placements, layout, BoundingBox, Error, LayoutEngine,
    LayoutOptions, Orientation, Point, Quadrilateral, Token, TokenSequence,
};

fn quad_token(text: &str, left: i32, top: i32, width: i32, height: i32) -> Token {
    let bbox = BoundingBox::new(left, top, width, height);
    let quad = Quadrilateral::new(
        Point::new(left, top),
        Point::new(left + width, top),
        Point::new(left + width, top + height),
        Point::new(left, top + height),
    );
    Token::new(text, bbox, quad)
}

/// Deterministic pseudo-random token lists.
fn generated_tokens(seed: u64, count: usize) -> TokenSequence {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = |bound: u64| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % bound) as i32
    };

    (0..count)
        .map(|i| {
            let left = next(2000);
            let top = next(3000);
            let width = next(800) + 1;
            let height = next(120) + 1;
            quad_token(&format!("token {}", i), left, top, width, height)
        })
        .collect()
}

// ==================== Concrete Scenario ====================

#[test]
fn test_two_line_scenario() {
    let tokens: TokenSequence = vec![
        quad_token("A", 50, 10, 40, 30),
        quad_token("B", 50, 80, 40, 30),
    ]
    .into();

    let doc = layout(1000, 600, &tokens).unwrap();

    assert_eq!(doc.page.width_units, 20200);
    assert_eq!(doc.page.height_units, 13397);
    assert_eq!(doc.page.orientation, Orientation::Landscape);

    let a = &doc.paragraphs[0];
    assert_eq!(a.text, "A");
    assert_eq!(a.indentation_units, -764);
    assert_eq!(a.spacing_before_units, 0);
    assert_eq!(a.font_size_units, 22.5);

    let b = &doc.paragraphs[1];
    assert_eq!(b.text, "B");
    assert_eq!(b.indentation_units, -764);
    assert_eq!(b.spacing_before_units, 800);
    assert_eq!(b.font_size_units, 22.5);

    assert_eq!(doc.metadata.image_width, 1000);
    assert_eq!(doc.metadata.image_height, 600);
}

#[test]
fn test_offsets_cancel_page_margins() {
    let tokens: TokenSequence = vec![quad_token("A", 200, 300, 40, 30)].into();
    let placements = compute_placements(&tokens, 600).unwrap();

    assert_eq!(
        i64::from(placements[0].indentation_units) + LEFT_MARGIN_OFFSET,
        200 * UNITS_PER_PIXEL
    );
    assert_eq!(
        i64::from(placements[0].spacing_before_units) + TOP_MARGIN_OFFSET,
        300 * UNITS_PER_PIXEL
    );
}

// ==================== Properties ====================

#[test]
fn test_placements_follow_tokens() {
    for seed in 0..20 {
        let tokens = generated_tokens(seed, 25);
        let placements = compute_placements(&tokens, 3200).unwrap();

        assert_eq!(placements.len(), tokens.len());
        for (placement, token) in placements.iter().zip(tokens.iter()) {
            assert_eq!(placement.text, token.text);
        }
    }
}

#[test]
fn test_font_size_tracks_box_height() {
    let tokens = generated_tokens(99, 50);
    let placements = compute_placements(&tokens, 3200).unwrap();

    for (placement, token) in placements.iter().zip(tokens.iter()) {
        assert_eq!(
            placement.font_size_units,
            token.bounding_box.height as f32 * 3.0 / 4.0
        );
    }
}

#[test]
fn test_spacing_is_gap_magnitude() {
    let tokens = generated_tokens(3, 60);
    let placements = compute_placements(&tokens, 3200).unwrap();
    let tokens = tokens.as_slice();

    for i in 1..tokens.len() {
        let top = tokens[i].bounding_box.top;
        let previous_bottom = tokens[i - 1].bounding_box.bottom();
        let expected = (i64::from(top - previous_bottom)).abs() * UNITS_PER_PIXEL;
        assert_eq!(i64::from(placements[i].spacing_before_units), expected);
    }
}

#[test]
fn test_collapse_zeroes_only_overlaps() {
    let engine = LayoutEngine::with_options(LayoutOptions::new().collapse_overlaps());
    let tokens = generated_tokens(11, 60);
    let placements = engine.compute_placements(&tokens, 3200).unwrap();
    let tokens = tokens.as_slice();

    for i in 1..tokens.len() {
        let gap = tokens[i].bounding_box.top - tokens[i - 1].bounding_box.bottom();
        if gap < 0 {
            assert_eq!(placements[i].spacing_before_units, 0);
        } else {
            assert_eq!(i64::from(placements[i].spacing_before_units), i64::from(gap) * UNITS_PER_PIXEL);
        }
    }
}

#[test]
fn test_legacy_rescale_close_to_direct() {
    let legacy = LayoutEngine::with_options(LayoutOptions::new().legacy_rescale());
    let tokens = generated_tokens(5, 60);

    let direct = layout(2000, 3200, &tokens).unwrap();
    let rescaled = legacy.layout(2000, 3200, &tokens).unwrap();

    for (d, r) in direct.paragraphs.iter().zip(&rescaled.paragraphs) {
        let diff = i64::from(d.spacing_before_units) - i64::from(r.spacing_before_units);
        assert!(diff.abs() <= UNITS_PER_PIXEL, "{} vs {}", d.spacing_before_units, r.spacing_before_units);

        // truncation can only lose one pixel of left edge
        let shift = i64::from(d.indentation_units) - i64::from(r.indentation_units);
        assert!(shift == 0 || shift == UNITS_PER_PIXEL, "{} vs {}", d.indentation_units, r.indentation_units);
    }
}

#[test]
fn test_legacy_rescale_left_edge() {
    let legacy = LayoutEngine::with_options(LayoutOptions::new().legacy_rescale());
    let tokens: TokenSequence = vec![Token::boxed("A", BoundingBox::new(53, 10, 40, 30))].into();

    let doc = legacy.layout(100, 600, &tokens).unwrap();
    assert_eq!(doc.paragraphs[0].indentation_units, -724);
    assert_eq!(layout(100, 600, &tokens).unwrap().paragraphs[0].indentation_units, -704);
}

#[test]
fn test_page_spec_strictly_monotonic() {
    for size in [1u32, 2, 10, 599, 600, 4096] {
        let base = compute_page_spec(size, size).unwrap();
        let wider = compute_page_spec(size + 1, size).unwrap();
        let taller = compute_page_spec(size, size + 1).unwrap();

        assert!(wider.width_units > base.width_units);
        assert_eq!(wider.height_units, base.height_units);
        assert!(taller.height_units > base.height_units);
        assert_eq!(taller.width_units, base.width_units);
    }
}

#[test]
fn test_layout_is_idempotent() {
    let tokens = generated_tokens(7, 40);
    let engine = LayoutEngine::new();

    let first = engine.layout(2000, 3200, &tokens).unwrap();
    let second = engine.layout(2000, 3200, &tokens).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_tokens() {
    let tokens = TokenSequence::new();
    let doc = layout(1000, 600, &tokens).unwrap();

    assert!(doc.is_empty());
    assert_eq!(doc.page.width_units, 20200);
}

// ==================== Errors ====================

#[test]
fn test_three_point_quadrilateral_rejected() {
    let mut tokens: TokenSequence = vec![quad_token("A", 50, 10, 40, 30)].into();
    tokens.push(Token::new(
        "B",
        BoundingBox::new(50, 80, 40, 30),
        Quadrilateral::from_points(vec![
            Point::new(50, 80),
            Point::new(90, 80),
            Point::new(90, 110),
        ]),
    ));

    let result = compute_placements(&tokens, 600);
    assert!(matches!(
        result,
        Err(Error::MalformedQuadrilateral { index: 1, points: 3 })
    ));
}

#[test]
fn test_zero_dimensions_rejected() {
    let tokens: TokenSequence = vec![quad_token("A", 50, 10, 40, 30)].into();
    assert!(matches!(
        layout(1000, 0, &tokens),
        Err(Error::InvalidImageDimensions { width: 1000, height: 0 })
    ));
}
