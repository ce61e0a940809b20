use tsl_common::comments::{comments_in_range, scan_trivia_comments};
use tsl_common::{LineMap, Position, TextRange};

#[test]
fn test_line_map_mixed_line_endings() {
    let text = "a\nbc\r\nd\re";
    let map = LineMap::build(text);

    assert_eq!(map.line_count(), 4);
    assert_eq!(map.offset_to_position(0), Position::new(0, 0));
    assert_eq!(map.offset_to_position(3), Position::new(1, 1));
    assert_eq!(map.offset_to_position(6), Position::new(2, 0));
    assert_eq!(map.offset_to_position(8), Position::new(3, 0));
}

#[test]
fn test_line_map_round_trip() {
    let text = "const a = 1;\nconst b = 2;\n";
    let map = LineMap::build(text);

    for offset in 0..=text.len() as u32 {
        let position = map.offset_to_position(offset);
        assert_eq!(map.position_to_offset(position), Some(offset));
    }
}

#[test]
fn test_line_map_clamps_past_end() {
    let map = LineMap::build("ab");
    assert_eq!(map.offset_to_position(99), Position::new(0, 2));
    assert_eq!(map.position_to_offset(Position::new(5, 0)), None);
}

#[test]
fn test_text_range_helpers() {
    let range = TextRange::new(2, 5);
    assert_eq!(range.len(), 3);
    assert!(range.contains(2));
    assert!(!range.contains(5));
    assert!(range.overlaps(&TextRange::new(4, 9)));
    assert!(!range.overlaps(&TextRange::new(5, 9)));
    assert_eq!(range.slice("0123456"), "234");
    assert_eq!(TextRange::new(5, 50).slice("0123456"), "");
}

#[test]
fn test_scan_trivia_comments() {
    let text = "  // one\n  /* two */ x";
    let comments = scan_trivia_comments(text, 0, 21);

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].get_text(text), "// one");
    assert!(!comments[0].is_multi_line);
    assert!(comments[0].has_trailing_new_line);
    assert_eq!(comments[1].get_text(text), "/* two */");
    assert_eq!(comments[1].get_body(text), " two ");
    assert!(comments[1].is_multi_line);
}

#[test]
fn test_comments_in_range() {
    let text = "/*a*/ /*b*/ /*c*/";
    let comments = scan_trivia_comments(text, 0, text.len() as u32);
    assert_eq!(comments.len(), 3);

    let middle = comments_in_range(&comments, 5, 12);
    assert_eq!(middle.len(), 1);
    assert_eq!(middle[0].get_text(text), "/*b*/");

    assert!(comments_in_range(&comments, 13, 14).is_empty());
}
