//! Integration tests for provider responses feeding the layout engine.

use ocr2docx::recognition::{Granularity, RecognitionRequest};
use ocr2docx::{
    layout, layout_response, parse_general_response, Error, GeneralResponse, Point,
};

const RESPONSE: &str = r#"{
    "log_id": 1631548223870398762,
    "words_result_num": 3,
    "direction": 0,
    "words_result": [
        {
            "words": "Purchase Order",
            "location": {"top": 42, "left": 310, "width": 380, "height": 48},
            "vertexes_location": [
                {"x": 310, "y": 42}, {"x": 690, "y": 42},
                {"x": 690, "y": 90}, {"x": 310, "y": 90}
            ],
            "finegrained_vertexes_location": [
                {"x": 310, "y": 42}, {"x": 500, "y": 42}, {"x": 690, "y": 42},
                {"x": 690, "y": 90}, {"x": 500, "y": 90}, {"x": 310, "y": 90}
            ]
        },
        {
            "words": "No. 2024-118",
            "location": {"top": 120, "left": 64, "width": 210, "height": 28},
            "vertexes_location": [
                {"x": 64, "y": 120}, {"x": 274, "y": 120},
                {"x": 274, "y": 148}, {"x": 64, "y": 148}
            ]
        },
        {
            "words": "Qty 12",
            "location": {"top": 140, "left": 64, "width": 120, "height": 28},
            "vertexes_location": [
                {"x": 64, "y": 140}, {"x": 184, "y": 140},
                {"x": 184, "y": 168}, {"x": 64, "y": 168}
            ]
        }
    ]
}"#;

#[test]
fn test_response_to_tokens_preserves_order() {
    let response = parse_general_response(RESPONSE).unwrap();
    let tokens = response.tokens();

    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Purchase Order", "No. 2024-118", "Qty 12"]);

    let first = &tokens.as_slice()[0];
    assert_eq!(first.quadrilateral.len(), 4);
    assert_eq!(first.quadrilateral.bottom_left(), Some(Point::new(310, 90)));
    assert_eq!(
        response.words_result[0]
            .finegrained_vertexes_location
            .as_ref()
            .map(Vec::len),
        Some(6)
    );
}

#[test]
fn test_response_layout() {
    let doc = layout_response(800, 400, RESPONSE).unwrap();

    assert_eq!(doc.metadata.log_id, Some(1631548223870398762));
    assert_eq!(doc.metadata.direction, Some(0));
    assert_eq!(doc.paragraph_count(), 3);

    // 310 * 20 - 1764
    assert_eq!(doc.paragraphs[0].indentation_units, 4436);
    // 42 * 20 - 1397 < 0
    assert_eq!(doc.paragraphs[0].spacing_before_units, 0);
    // 120 - 90 = 30px
    assert_eq!(doc.paragraphs[1].spacing_before_units, 600);
    // overlapping by 8px keeps its magnitude
    assert_eq!(doc.paragraphs[2].spacing_before_units, 160);
    assert_eq!(doc.paragraphs[0].font_size_units, 36.0);
}

#[test]
fn test_response_without_vertexes_is_malformed() {
    let json = r#"{
        "log_id": 1,
        "words_result_num": 1,
        "words_result": [
            {"words": "A", "location": {"top": 10, "left": 50, "width": 40, "height": 30}}
        ]
    }"#;
    let response = parse_general_response(json).unwrap();
    let result = layout(1000, 600, &response.tokens());
    assert!(matches!(
        result,
        Err(Error::MalformedQuadrilateral { index: 0, points: 0 })
    ));
}

#[test]
fn test_filled_vertexes_lay_out() {
    let json = r#"{
        "words_result": [
            {"words": "A", "location": {"top": 10, "left": 50, "width": 40, "height": 30}},
            {"words": "B", "location": {"top": 80, "left": 50, "width": 40, "height": 30}}
        ]
    }"#;
    let mut response = parse_general_response(json).unwrap();
    response.fill_missing_vertexes();

    let doc = layout(1000, 600, &response.into_tokens()).unwrap();
    assert_eq!(doc.paragraphs[1].spacing_before_units, 800);
    assert_eq!(doc.paragraphs[1].indentation_units, -764);
}

#[test]
fn test_filled_vertexes_with_absurd_box() {
    let json = r#"{
        "words_result": [
            {"words": "A", "location": {"top": 2147483600, "left": 10, "width": 40, "height": 900}}
        ]
    }"#;
    let mut response = parse_general_response(json).unwrap();
    response.fill_missing_vertexes();

    let bottom = response.words_result[0].vertexes_location[3];
    assert_eq!(bottom, Point::new(10, i32::MAX));
    assert!(layout(1000, 600, &response.into_tokens()).is_ok());
}

#[test]
fn test_provider_error() {
    let json = r#"{"error_code": 18, "error_msg": "Open api qps request limit reached"}"#;
    match parse_general_response(json) {
        Err(Error::Provider { code, message }) => {
            assert_eq!(code, 18);
            assert!(message.contains("qps"));
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[test]
fn test_response_serializes_back() {
    let response = parse_general_response(RESPONSE).unwrap();
    let json = serde_json::to_string(&response).unwrap();
    let back: GeneralResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(back, response);
}

#[test]
fn test_request_params_match_provider_names() {
    let params = RecognitionRequest::default().to_params();
    let names: Vec<&str> = params.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        vec![
            "recognize_granularity",
            "detect_direction",
            "vertexes_location",
            "probability"
        ]
    );
    assert_eq!(
        RecognitionRequest::new().granularity,
        Granularity::Big
    );
}
