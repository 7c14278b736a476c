// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parser module tests
//!
//! Tests for classifying and parsing key/value content:
//! - Comment and blank line detection
//! - Indented comment markers
//! - Key/value extraction with escapes
//! - Empty values and missing separators
//! - Duplicate keys, partition and idempotence over whole buffers

use crate::core::{
    parser::*,
    types::{Classification, InvalidLine, LineError, Syntax},
};
use crate::loader::SAMPLE_CONTENT;

fn kv(key: &str, value: &str) -> Classification {
    Classification::Kv {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn test_simple_key_value() {
    let parser = KvParser::new();
    assert_eq!(parser.classify_line("host:localhost", 1), kv("host", "localhost"));
    assert_eq!(parser.classify_line("a:name", 1), kv("a", "name"));
}

#[test]
fn test_value_whitespace_preserved() {
    let parser = KvParser::new();
    assert_eq!(
        parser.classify_line("greeting:  hello   world  ", 1),
        kv("greeting", "  hello   world  ")
    );
}

#[test]
fn test_value_keeps_reserved_characters() {
    let parser = KvParser::new();
    assert_eq!(
        parser.classify_line("url:http://x#frag", 1),
        kv("url", "http://x#frag")
    );
    // Escapes are not processed in the value
    assert_eq!(
        parser.classify_line("adr:C:\\\\User\\\\admin", 1),
        kv("adr", "C:\\\\User\\\\admin")
    );
}

#[test]
fn test_comment_lines() {
    let parser = KvParser::new();
    assert_eq!(
        parser.classify_line("# a comment  ", 1),
        Classification::Comment("# a comment".to_string())
    );
    assert_eq!(
        parser.classify_line("#normal:commented_value", 1),
        Classification::Comment("#normal:commented_value".to_string())
    );
}

#[test]
fn test_blank_lines_are_empty_comments() {
    let parser = KvParser::new();
    for line in ["", " ", "\t", "   \t  "] {
        assert_eq!(
            parser.classify_line(line, 3),
            Classification::Comment(String::new()),
            "blank line {:?} should be an empty comment",
            line
        );
    }
}

#[test]
fn test_indented_comment_is_invalid() {
    let parser = KvParser::new();
    let line = " # spaced:comment:illegal";

    match parser.classify_line(line, 7) {
        Classification::Invalid { raw, reason } => {
            assert_eq!(raw, line, "raw text must be unmodified");
            assert_eq!(reason, LineError::IndentedComment { line: 7 });
        }
        other => panic!("Expected Invalid, got: {:?}", other),
    }

    assert!(matches!(
        parser.classify_line("\t#tabbed", 1),
        Classification::Invalid { .. }
    ));
}

#[test]
fn test_escaped_separator_in_key() {
    let parser = KvParser::new();
    assert_eq!(
        parser.classify_line("key\\:with:colon:value", 1),
        kv("key:with", "colon:value")
    );
    assert_eq!(
        parser.classify_line("server\\:port:8080", 1),
        kv("server:port", "8080")
    );
    assert_eq!(
        parser.classify_line("server:port:9090", 1),
        kv("server", "port:9090")
    );
}

#[test]
fn test_escaped_backslash_and_hash() {
    let parser = KvParser::new();
    assert_eq!(
        parser.classify_line("key\\\\with:backslash:value2", 1),
        kv("key\\with", "backslash:value2")
    );
    assert_eq!(
        parser.classify_line("key\\#with:hash:value3", 1),
        kv("key#with", "hash:value3")
    );
    // Any character may be escaped; the backslash is dropped
    assert_eq!(parser.classify_line("\\a\\b:c", 1), kv("ab", "c"));
}

#[test]
fn test_trailing_backslash_is_literal() {
    let parser = KvParser::new();
    // Nothing follows the backslash, so it stays in the key and the
    // line still lacks a separator
    assert_eq!(
        parser.extract_key_value("key\\", 4),
        Err(LineError::MissingSeparator { line: 4 })
    );

    // A backslash right before the separator escapes it instead
    assert_eq!(
        parser.extract_key_value("key\\:", 4),
        Err(LineError::MissingSeparator { line: 4 })
    );
}

#[test]
fn test_missing_separator() {
    let parser = KvParser::new();
    match parser.classify_line("just some text", 9) {
        Classification::Invalid { raw, reason } => {
            assert_eq!(raw, "just some text");
            assert_eq!(reason, LineError::MissingSeparator { line: 9 });
            assert_eq!(reason.to_string(), "line 9: missing key/value separator");
        }
        other => panic!("Expected Invalid, got: {:?}", other),
    }
}

#[test]
fn test_empty_values() {
    let parser = KvParser::new();
    assert_eq!(
        parser.extract_key_value("empty_value:", 2),
        Err(LineError::EmptyValue { line: 2 })
    );
    assert_eq!(
        parser.extract_key_value("whitespace_value:   ", 3),
        Err(LineError::EmptyValue { line: 3 })
    );
    assert!(LineError::EmptyValue { line: 3 }
        .to_string()
        .contains("empty value"));
}

#[test]
fn test_empty_key_is_accepted() {
    let parser = KvParser::new();
    assert_eq!(parser.classify_line(":value", 1), kv("", "value"));
}

#[test]
fn test_key_keeps_surrounding_whitespace() {
    let parser = KvParser::new();
    assert_eq!(parser.classify_line("  key : v", 1), kv("  key ", " v"));
}

#[test]
fn test_unicode_keys_and_values() {
    let parser = KvParser::new();
    assert_eq!(
        parser.classify_line("路径:/home/test", 1),
        kv("路径", "/home/test")
    );
    assert_eq!(parser.classify_line("名字:值", 1), kv("名字", "值"));
}

#[test]
fn test_custom_syntax() {
    let parser = KvParser::with_syntax(Syntax {
        escape: '%',
        comment: ';',
        separator: '=',
    });

    assert_eq!(parser.classify_line("a%=b=c", 1), kv("a=b", "c"));
    assert_eq!(
        parser.classify_line("; note", 2),
        Classification::Comment("; note".to_string())
    );
    assert!(matches!(
        parser.classify_line("a:b", 3),
        Classification::Invalid { .. }
    ));
}

#[test]
fn test_duplicate_key_first_wins() {
    let result = parse_content("database:host1\ndatabase:host2");

    assert_eq!(result.records.get("database"), Some("host1"));
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.kv_lines, 2);
    assert_eq!(
        result.errors,
        vec!["duplicate key 'database' at line 2, first value retained".to_string()]
    );
}

#[test]
fn test_case_sensitive_keys() {
    let result = parse_content("a:name\nA:name");
    assert_eq!(result.records.len(), 2);
    assert!(result.errors.is_empty());
}

#[test]
fn test_invalid_lines_are_recorded_with_numbers() {
    let result = parse_content("ok:1\nbroken\n # indented\nempty:");

    assert_eq!(
        result.invalid_lines,
        vec![
            InvalidLine { line: 2, raw: "broken".to_string() },
            InvalidLine { line: 3, raw: " # indented".to_string() },
            InvalidLine { line: 4, raw: "empty:".to_string() },
        ]
    );
    assert_eq!(
        result.errors,
        vec![
            "line 2: missing key/value separator".to_string(),
            "line 3: comment marker preceded by whitespace".to_string(),
            "line 4: empty value".to_string(),
        ]
    );
}

#[test]
fn test_every_line_invalid_still_completes() {
    let result = parse_content("a\nb\nc");
    assert!(result.records.is_empty());
    assert_eq!(result.invalid_lines.len(), 3);
    assert_eq!(result.errors.len(), 3);
}

#[test]
fn test_line_endings_normalised() {
    let result = parse_content("a:1\r\nb:2\rc:3\n");

    let keys: Vec<&str> = result.records.keys().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(result.records.get("a"), Some("1"));
    // Trailing terminator yields one trailing blank line
    assert_eq!(result.comments, vec![String::new()]);
    assert_eq!(result.line_count(), 4);
}

#[test]
fn test_insertion_order_is_first_definition() {
    let result = parse_content("z:1\na:2\nz:3\nm:4");
    let keys: Vec<&str> = result.records.keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_empty_buffer_is_one_blank_line() {
    let result = parse_content("");
    assert_eq!(result.comments, vec![String::new()]);
    assert_eq!(result.line_count(), 1);
    assert!(!result.has_errors());
}

#[test]
fn test_parse_sample_content() {
    let result = parse_content(SAMPLE_CONTENT);

    assert_eq!(result.line_count(), 30);
    assert_eq!(result.records.len(), 11);
    assert_eq!(result.kv_lines, 12);
    assert_eq!(result.comments.len(), 14);
    assert_eq!(result.comments[0], "# normal comment");

    let invalid: Vec<usize> = result.invalid_lines.iter().map(|l| l.line).collect();
    assert_eq!(invalid, vec![5, 19, 20, 29]);

    assert_eq!(result.records.get("database"), Some("host1"));
    assert_eq!(result.records.get("key:with"), Some("colon:value1"));
    assert_eq!(result.records.get("key\\with"), Some("backslash:value2"));
    assert_eq!(result.records.get("key#with"), Some("hash:value3"));
    assert_eq!(result.records.get("server:port"), Some("8080"));
    assert_eq!(result.records.get("server"), Some("port:9090"));
    assert_eq!(result.records.get("路径"), Some("/home/test"));
    assert_eq!(result.records.get("adr"), Some("C:\\\\User\\\\admin"));

    assert_eq!(
        result.errors,
        vec![
            "line 5: comment marker preceded by whitespace".to_string(),
            "duplicate key 'database' at line 16, first value retained".to_string(),
            "line 19: empty value".to_string(),
            "line 20: empty value".to_string(),
            "line 29: comment marker preceded by whitespace".to_string(),
        ]
    );
}

#[test]
fn test_partition_covers_every_line() {
    let content = "# c\n\nk:v\nk:w\nbad\n  #x\nq:  \n";
    let total = content.split('\n').count();
    let result = parse_content(content);

    assert_eq!(result.line_count(), total);

    let duplicates = result
        .errors
        .iter()
        .filter(|e| e.starts_with("duplicate key"))
        .count();
    assert_eq!(result.kv_lines, result.records.len() + duplicates);
}

#[test]
fn test_reparse_is_idempotent() {
    let parser = KvParser::new();
    let first = parser.parse_content(SAMPLE_CONTENT);
    let second = parser.parse_content(SAMPLE_CONTENT);

    assert_eq!(first, second);
}

#[test]
fn test_no_diagnostics_leak_between_calls() {
    let parser = KvParser::new();
    let noisy = parser.parse_content("bad line\ndup:1\ndup:2");
    assert_eq!(noisy.errors.len(), 2);

    let clean = parser.parse_content("ok:1");
    assert!(clean.errors.is_empty());
    assert!(clean.invalid_lines.is_empty());
}

#[test]
fn test_parser_shared_across_threads() {
    let parser = KvParser::new();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let parser = &parser;
                s.spawn(move || parser.parse_content(&format!("k{i}:v\nbroken{i}")))
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap();
            assert_eq!(result.records.get(&format!("k{i}")), Some("v"));
            assert_eq!(result.errors.len(), 1);
        }
    });
}
