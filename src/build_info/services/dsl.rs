//! Comment- and string-aware scanning of Groovy / Kotlin build scripts.
//!
//! Both DSLs share the same lexical conventions for what matters here:
//! `//` line comments, `/* */` block comments and `'` / `"` delimited
//! literals with backslash escapes. The scanner classifies every character
//! into one of those regions so brace matching and comment stripping only
//! ever look at real code.

const DEPENDENCIES_KEYWORD: &str = "dependencies";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    LineComment,
    BlockComment,
    Literal(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Code,
    Comment,
    Literal,
}

#[derive(Debug, Clone, Copy)]
struct ScannedChar {
    offset: usize,
    ch: char,
    class: CharClass,
}

struct CodeScanner {
    chars: Vec<(usize, char)>,
    pos: usize,
    state: ScanState,
    /// Characters already classified but not yet yielded (two-character tokens).
    queued: Option<ScannedChar>,
}

impl CodeScanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.char_indices().collect(),
            pos: 0,
            state: ScanState::Code,
            queued: None,
        }
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).map(|&(_, c)| c)
    }

    /// Classifies the current and the following character together.
    fn pair(&mut self, offset: usize, ch: char, class: CharClass) -> ScannedChar {
        if let Some(&(next_offset, next_ch)) = self.chars.get(self.pos + 1) {
            self.queued = Some(ScannedChar {
                offset: next_offset,
                ch: next_ch,
                class,
            });
            self.pos += 2;
        } else {
            self.pos += 1;
        }
        ScannedChar { offset, ch, class }
    }

    fn single(&mut self, offset: usize, ch: char, class: CharClass) -> ScannedChar {
        self.pos += 1;
        ScannedChar { offset, ch, class }
    }
}

impl Iterator for CodeScanner {
    type Item = ScannedChar;

    fn next(&mut self) -> Option<ScannedChar> {
        if let Some(queued) = self.queued.take() {
            return Some(queued);
        }

        let &(offset, ch) = self.chars.get(self.pos)?;
        let next = self.peek_next();

        let scanned = match self.state {
            ScanState::Code => match (ch, next) {
                ('/', Some('/')) => {
                    self.state = ScanState::LineComment;
                    self.pair(offset, ch, CharClass::Comment)
                }
                ('/', Some('*')) => {
                    self.state = ScanState::BlockComment;
                    self.pair(offset, ch, CharClass::Comment)
                }
                ('\'' | '"', _) => {
                    self.state = ScanState::Literal(ch);
                    self.single(offset, ch, CharClass::Literal)
                }
                _ => self.single(offset, ch, CharClass::Code),
            },
            ScanState::LineComment => {
                if ch == '\n' {
                    self.state = ScanState::Code;
                    self.single(offset, ch, CharClass::Code)
                } else {
                    self.single(offset, ch, CharClass::Comment)
                }
            }
            ScanState::BlockComment => {
                if ch == '*' && next == Some('/') {
                    self.state = ScanState::Code;
                    self.pair(offset, ch, CharClass::Comment)
                } else {
                    self.single(offset, ch, CharClass::Comment)
                }
            }
            ScanState::Literal(quote) => {
                if ch == '\\' {
                    self.pair(offset, ch, CharClass::Literal)
                } else {
                    if ch == quote {
                        self.state = ScanState::Code;
                    }
                    self.single(offset, ch, CharClass::Literal)
                }
            }
        };

        Some(scanned)
    }
}

/// Removes `//` and `/* */` comments while keeping string literals intact.
///
/// Newlines inside comments are kept so line-oriented scans see the same
/// line structure as the original text.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for scanned in CodeScanner::new(text) {
        match scanned.class {
            CharClass::Code | CharClass::Literal => out.push(scanned.ch),
            CharClass::Comment if scanned.ch == '\n' => out.push('\n'),
            CharClass::Comment => {}
        }
    }
    out
}

/// Keeps only code outside any `{ }` block, with comments removed.
///
/// Braces and nested bodies are dropped but newlines are kept, so an
/// assignment inside `tasks.register(...) { }` or `pom { }` never shows up
/// as a line of its own.
pub fn top_level_code(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for scanned in CodeScanner::new(text) {
        if scanned.ch == '\n' {
            out.push('\n');
            continue;
        }
        match scanned.class {
            CharClass::Comment => {}
            CharClass::Code if scanned.ch == '{' => depth += 1,
            CharClass::Code if scanned.ch == '}' => depth = depth.saturating_sub(1),
            CharClass::Code | CharClass::Literal if depth == 0 => out.push(scanned.ch),
            CharClass::Code | CharClass::Literal => {}
        }
    }
    out
}

/// Returns the body of the first top-level `dependencies { ... }` block.
///
/// The body is the raw text between the braces, comments included. An empty
/// string is returned when there is no such block or its braces never
/// balance.
pub fn extract_dependencies_block(text: &str) -> String {
    let mut depth = 0usize;
    let mut awaiting_brace = false;
    let mut skip_until = 0usize;
    let mut body_start: Option<usize> = None;

    for scanned in CodeScanner::new(text) {
        if scanned.class != CharClass::Code || scanned.offset < skip_until {
            continue;
        }
        let ch = scanned.ch;

        if let Some(start) = body_start {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return text[start..scanned.offset].to_string();
                    }
                }
                _ => {}
            }
            continue;
        }

        if awaiting_brace {
            if ch.is_whitespace() {
                continue;
            }
            awaiting_brace = false;
            if ch == '{' {
                body_start = Some(scanned.offset + ch.len_utf8());
                depth = 1;
                continue;
            }
        }

        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }

        if depth == 0 && is_keyword_at(text, scanned.offset, DEPENDENCIES_KEYWORD) {
            awaiting_brace = true;
            skip_until = scanned.offset + DEPENDENCIES_KEYWORD.len();
        }
    }

    if body_start.is_some() {
        tracing::warn!("Unbalanced braces in dependencies block; ignoring it");
    }
    String::new()
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

fn is_keyword_at(text: &str, offset: usize, keyword: &str) -> bool {
    if !text[offset..].starts_with(keyword) {
        return false;
    }
    let before_ok = text[..offset]
        .chars()
        .next_back()
        .map_or(true, |c| !is_identifier_char(c));
    let after_ok = text[offset + keyword.len()..]
        .chars()
        .next()
        .map_or(true, |c| !is_identifier_char(c));
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_and_block_comments() {
        let text = "group = 'a' // trailing\n/* block\nspanning */version = '1'\n";
        let stripped = strip_comments(text);
        assert_eq!(stripped, "group = 'a' \n\nversion = '1'\n");
    }

    #[test]
    fn test_strip_keeps_comment_markers_inside_strings() {
        let text = r#"url = "https://repo.example.com/*" // real comment"#;
        assert_eq!(
            strip_comments(text),
            r#"url = "https://repo.example.com/*" "#
        );
    }

    #[test]
    fn test_strip_handles_escaped_quotes() {
        let text = r#"name = 'it\'s // not a comment' // comment"#;
        assert_eq!(strip_comments(text), r#"name = 'it\'s // not a comment' "#);
    }

    #[test]
    fn test_extract_simple_block() {
        let text = "plugins { id 'java' }\ndependencies {\n    implementation 'a:b:1'\n}\n";
        assert_eq!(
            extract_dependencies_block(text),
            "\n    implementation 'a:b:1'\n"
        );
    }

    #[test]
    fn test_extract_with_nested_braces() {
        let text = "dependencies {\n  implementation('a:b:1') { exclude group: 'x' }\n}";
        let block = extract_dependencies_block(text);
        assert!(block.contains("exclude group: 'x' }"));
        assert!(block.trim_end().ends_with('}'));
    }

    #[test]
    fn test_extract_ignores_braces_in_strings_and_comments() {
        let text = r#"dependencies {
    implementation "a:b:1" // closing } in comment
    /* { unbalanced open in block comment */
    testImplementation 'weird:{name:2'
    runtimeOnly "url://x/*not-a-comment*/:y:3"
}
version = '1'"#;
        let block = extract_dependencies_block(text);
        assert!(block.contains("testImplementation 'weird:{name:2'"));
        assert!(block.contains("runtimeOnly \"url://x/*not-a-comment*/:y:3\""));
        assert!(!block.contains("version = '1'"));
    }

    #[test]
    fn test_extract_skips_nested_buildscript_dependencies() {
        let text = r#"buildscript {
    dependencies { classpath 'com.android.tools.build:gradle:8.0.0' }
}
dependencies {
    implementation 'a:b:1'
}"#;
        let block = extract_dependencies_block(text);
        assert!(block.contains("a:b:1"));
        assert!(!block.contains("classpath"));
    }

    #[test]
    fn test_extract_requires_whole_word() {
        let text = "allDependencies { x }\ndependencyManagement { y }\n";
        assert_eq!(extract_dependencies_block(text), "");
    }

    #[test]
    fn test_extract_skips_keyword_in_comment() {
        let text = "// dependencies { fake }\ndependencies { implementation 'a:b:1' }";
        assert_eq!(
            extract_dependencies_block(text),
            " implementation 'a:b:1' "
        );
    }

    #[test]
    fn test_extract_unbalanced_returns_empty() {
        let text = "dependencies {\n implementation 'a:b:1'\n";
        assert_eq!(extract_dependencies_block(text), "");
    }

    #[test]
    fn test_top_level_code_drops_block_bodies() {
        let text = "plugins { id 'java' }\ntasks.register('lint') {\n    group = 'x'\n}\n// c\ngroup = '}'\n";
        assert_eq!(
            top_level_code(text),
            "plugins \ntasks.register('lint') \n\n\n\ngroup = '}'\n"
        );
    }

    #[test]
    fn test_extract_missing_block_returns_empty() {
        assert_eq!(extract_dependencies_block("plugins { id 'java' }"), "");
    }
}
