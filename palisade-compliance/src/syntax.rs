//! Light well-formedness check, independent of the compliance rules.
//!
//! Catches unterminated literals, unbalanced delimiters, and statements
//! that do not start with a recognizable SQL keyword. Informational:
//! the compliance flags, not this check, drive the terminal status.

use crate::lexer::{self, TokenKind};

/// Keywords a statement may legally start with, read-only or not.
/// The read-only rule is enforced separately by the analyzer.
const LEADING_KEYWORDS: &[&str] = &[
    "SELECT", "WITH", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP", "TRUNCATE",
    "EXPLAIN", "DESCRIBE", "SHOW",
];

/// Outcome of the well-formedness check.
#[derive(Debug, Clone)]
pub struct SyntaxCheck {
    pub valid: bool,
    pub message: Option<String>,
}

impl SyntaxCheck {
    fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Check one SQL string for basic well-formedness.
pub fn check(sql: &str) -> SyntaxCheck {
    if sql.trim().is_empty() {
        return SyntaxCheck::invalid("empty statement");
    }

    let lex = lexer::tokenize(sql);
    if let Some(err) = lex.errors.first() {
        return SyntaxCheck::invalid(err.clone());
    }

    let mut open = 0i64;
    for tok in &lex.tokens {
        if tok.is_symbol("(") {
            open += 1;
        } else if tok.is_symbol(")") {
            open -= 1;
            if open < 0 {
                return SyntaxCheck::invalid("unbalanced parentheses: ')' without '('");
            }
        }
    }
    if open != 0 {
        return SyntaxCheck::invalid("unbalanced parentheses: '(' left open");
    }

    let leading = lex
        .tokens
        .iter()
        .find(|t| t.is_significant() && !t.is_symbol("("));
    match leading {
        Some(tok)
            if tok.kind == TokenKind::Word
                && LEADING_KEYWORDS
                    .iter()
                    .any(|k| tok.text.eq_ignore_ascii_case(k)) =>
        {
            SyntaxCheck {
                valid: true,
                message: None,
            }
        }
        Some(tok) => SyntaxCheck::invalid(format!(
            "statement starts with '{}', not a SQL keyword",
            tok.text
        )),
        None => SyntaxCheck::invalid("no SQL tokens found"),
    }
}
