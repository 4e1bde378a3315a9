//! Tests for Position, Span and SourceFile

use crate::util::span::{Position, SourceFile, Span};

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_position_with_offset() {
        let pos = Position::with_offset(1, 5, 100);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.offset, 100);
    }

    #[test]
    fn test_position_display() {
        let pos = Position::new(10, 20);
        assert_eq!(format!("{}", pos), "10:20");
    }
}

#[cfg(test)]
mod span_tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(
            Position::with_offset(1, 1, 4),
            Position::with_offset(1, 4, 7),
        );
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_dummy_span() {
        assert!(Span::dummy().is_dummy());
        assert!(Span::dummy().is_empty());
    }
}

#[cfg(test)]
mod source_file_tests {
    use super::*;

    #[test]
    fn test_position_from_offset() {
        let file = SourceFile::new("a.shll", "let x\nlet y = 2\n");
        assert_eq!(file.position_from_offset(0), Position::with_offset(1, 1, 0));
        assert_eq!(file.position_from_offset(6), Position::with_offset(2, 1, 6));
        assert_eq!(file.position_from_offset(10), Position::with_offset(2, 5, 10));
    }

    #[test]
    fn test_position_counts_chars_not_bytes() {
        let file = SourceFile::new("a.shll", "\"é\" x");
        assert_eq!(file.position_from_offset(5).column, 5);
    }

    #[test]
    fn test_line_text() {
        let file = SourceFile::new("a.shll", "first\r\nsecond\nthird");
        assert_eq!(file.line_text(1), Some("first"));
        assert_eq!(file.line_text(2), Some("second"));
        assert_eq!(file.line_text(3), Some("third"));
        assert_eq!(file.line_text(4), None);
        assert_eq!(file.line_text(0), None);
        assert_eq!(file.line_count(), 3);
    }

    #[test]
    fn test_source_text() {
        let file = SourceFile::new("a.shll", "let answer = 42");
        let span = file.span_from_range(4, 10);
        assert_eq!(file.source_text(span), Some("answer"));
    }
}
