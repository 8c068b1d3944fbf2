//! Lightweight SQL tokenizer.
//!
//! Splits a statement into words, numbers, string/comment literals,
//! quoted identifiers, `#NAME#` markers, and punctuation, tracking byte
//! spans and parenthesis depth. Not a parser: just enough structure for
//! the rule scan to never be confused by marker-like substrings inside
//! quotes or write verbs inside comments.

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword, as written.
    Word,
    Number,
    /// `'...'` literal, with `''` escapes.
    StringLit,
    /// `"..."` or backtick-quoted identifier.
    QuotedIdent,
    /// `#NAME#` annotation; `text` is the name without the hashes.
    Marker,
    /// `-- ...` comment.
    LineComment,
    /// `/* ... */` comment.
    BlockComment,
    /// Any other single character.
    Symbol,
}

/// One token with its byte span and nesting depth.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Parenthesis nesting depth at the token position. Top-level is 0.
    pub depth: u32,
}

impl Token {
    pub fn is_word_ci(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(word)
    }

    pub fn is_symbol(&self, sym: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == sym
    }

    /// Comments are insignificant for every structural rule.
    pub fn is_significant(&self) -> bool {
        !matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// Tokenization result. `errors` is non-empty when the input has an
/// unterminated literal or comment; tokens up to that point are kept.
#[derive(Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<String>,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize a SQL string. Never fails; malformed input is reported
/// through `LexOutput::errors`.
pub fn tokenize(sql: &str) -> LexOutput {
    let chars: Vec<(usize, char)> = sql.char_indices().collect();
    let n = chars.len();
    let total = sql.len();
    let byte_at = |idx: usize| if idx < n { chars[idx].0 } else { total };

    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut depth: u32 = 0;
    let mut i = 0;

    while i < n {
        let (start, c) = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Line comment.
        if c == '-' && i + 1 < n && chars[i + 1].1 == '-' {
            let mut j = i + 2;
            while j < n && chars[j].1 != '\n' {
                j += 1;
            }
            tokens.push(Token {
                kind: TokenKind::LineComment,
                text: sql[byte_at(i + 2)..byte_at(j)].to_string(),
                start,
                end: byte_at(j),
                depth,
            });
            i = j;
            continue;
        }

        // Block comment.
        if c == '/' && i + 1 < n && chars[i + 1].1 == '*' {
            let mut j = i + 2;
            let mut closed = false;
            while j + 1 < n {
                if chars[j].1 == '*' && chars[j + 1].1 == '/' {
                    closed = true;
                    break;
                }
                j += 1;
            }
            if closed {
                tokens.push(Token {
                    kind: TokenKind::BlockComment,
                    text: sql[byte_at(i + 2)..byte_at(j)].to_string(),
                    start,
                    end: byte_at(j + 2),
                    depth,
                });
                i = j + 2;
            } else {
                errors.push("unterminated block comment".to_string());
                tokens.push(Token {
                    kind: TokenKind::BlockComment,
                    text: sql[byte_at(i + 2)..total].to_string(),
                    start,
                    end: total,
                    depth,
                });
                i = n;
            }
            continue;
        }

        // String literal with '' escapes.
        if c == '\'' {
            let mut j = i + 1;
            let mut closed = false;
            while j < n {
                if chars[j].1 == '\'' {
                    if j + 1 < n && chars[j + 1].1 == '\'' {
                        j += 2;
                        continue;
                    }
                    closed = true;
                    break;
                }
                j += 1;
            }
            if closed {
                tokens.push(Token {
                    kind: TokenKind::StringLit,
                    text: sql[byte_at(i + 1)..byte_at(j)].to_string(),
                    start,
                    end: byte_at(j + 1),
                    depth,
                });
                i = j + 1;
            } else {
                errors.push("unterminated string literal".to_string());
                tokens.push(Token {
                    kind: TokenKind::StringLit,
                    text: sql[byte_at(i + 1)..total].to_string(),
                    start,
                    end: total,
                    depth,
                });
                i = n;
            }
            continue;
        }

        // Quoted identifier.
        if c == '"' || c == '`' {
            let quote = c;
            let mut j = i + 1;
            let mut closed = false;
            while j < n {
                if chars[j].1 == quote {
                    closed = true;
                    break;
                }
                j += 1;
            }
            if closed {
                tokens.push(Token {
                    kind: TokenKind::QuotedIdent,
                    text: sql[byte_at(i + 1)..byte_at(j)].to_string(),
                    start,
                    end: byte_at(j + 1),
                    depth,
                });
                i = j + 1;
            } else {
                errors.push(format!("unterminated quoted identifier ({quote})"));
                tokens.push(Token {
                    kind: TokenKind::QuotedIdent,
                    text: sql[byte_at(i + 1)..total].to_string(),
                    start,
                    end: total,
                    depth,
                });
                i = n;
            }
            continue;
        }

        // Marker: # followed by word chars followed by #.
        if c == '#' {
            let mut j = i + 1;
            while j < n && is_word_char(chars[j].1) {
                j += 1;
            }
            if j > i + 1 && j < n && chars[j].1 == '#' {
                tokens.push(Token {
                    kind: TokenKind::Marker,
                    text: sql[byte_at(i + 1)..byte_at(j)].to_string(),
                    start,
                    end: byte_at(j + 1),
                    depth,
                });
                i = j + 1;
                continue;
            }
            tokens.push(Token {
                kind: TokenKind::Symbol,
                text: "#".to_string(),
                start,
                end: byte_at(i + 1),
                depth,
            });
            i += 1;
            continue;
        }

        // Number.
        if c.is_ascii_digit() {
            let mut j = i + 1;
            while j < n && (chars[j].1.is_ascii_digit() || chars[j].1 == '.') {
                j += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Number,
                text: sql[start..byte_at(j)].to_string(),
                start,
                end: byte_at(j),
                depth,
            });
            i = j;
            continue;
        }

        // Word.
        if c.is_ascii_alphabetic() || c == '_' {
            let mut j = i + 1;
            while j < n && is_word_char(chars[j].1) {
                j += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Word,
                text: sql[start..byte_at(j)].to_string(),
                start,
                end: byte_at(j),
                depth,
            });
            i = j;
            continue;
        }

        // Parentheses adjust depth; the opening token carries the outer
        // depth so both delimiters of a pair report the same level.
        if c == '(' {
            tokens.push(Token {
                kind: TokenKind::Symbol,
                text: "(".to_string(),
                start,
                end: byte_at(i + 1),
                depth,
            });
            depth += 1;
            i += 1;
            continue;
        }
        if c == ')' {
            depth = depth.saturating_sub(1);
            tokens.push(Token {
                kind: TokenKind::Symbol,
                text: ")".to_string(),
                start,
                end: byte_at(i + 1),
                depth,
            });
            i += 1;
            continue;
        }

        tokens.push(Token {
            kind: TokenKind::Symbol,
            text: c.to_string(),
            start,
            end: byte_at(i + 1),
            depth,
        });
        i += 1;
    }

    LexOutput { tokens, errors }
}
