//! Pure SQL-text → compliance-report analysis. No I/O, no side effects,
//! never fails: malformed input yields a report with every flag false.

use palisade_core::config::FrameworkRules;
use palisade_core::models::ComplianceReport;

use crate::lexer::{self, Token, TokenKind};

/// Verbs that force rejection when found at a statement-start position.
const WRITE_VERBS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "DROP", "TRUNCATE", "ALTER", "CREATE", "REPLACE", "MERGE",
    "GRANT", "REVOKE", "EXEC", "EXECUTE", "CALL",
];

/// Words that can never be a table alias.
const NON_ALIAS_WORDS: &[&str] = &[
    "ON", "WHERE", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "CROSS", "NATURAL", "GROUP",
    "ORDER", "HAVING", "UNION", "LIMIT", "OFFSET", "FETCH", "USING", "SET", "AS",
];

/// Analyzes SQL text against the access-isolation rule set.
pub struct ComplianceAnalyzer<'a> {
    rules: &'a FrameworkRules,
}

impl<'a> ComplianceAnalyzer<'a> {
    pub fn new(rules: &'a FrameworkRules) -> Self {
        Self { rules }
    }

    /// Analyze one SQL string. The read-only check runs first; the alias
    /// table built here feeds every other rule.
    pub fn analyze(&self, sql: &str) -> ComplianceReport {
        if sql.trim().is_empty() {
            return ComplianceReport::malformed("empty statement");
        }

        let lex = lexer::tokenize(sql);
        if !lex.errors.is_empty() {
            return ComplianceReport::malformed(format!(
                "statement could not be tokenized: {}",
                lex.errors.join("; ")
            ));
        }

        let sig: Vec<&Token> = lex.tokens.iter().filter(|t| t.is_significant()).collect();

        let mut report = ComplianceReport::default();

        let read_only_diag = check_read_only(&sig);
        report.is_read_only = read_only_diag.is_none();

        let (anchor_aliases, fact_aliases) = scan_aliases(&sig, self.rules);
        report.has_anchor_table = !anchor_aliases.is_empty();
        report.anchor_aliases = anchor_aliases;
        report.fact_aliases = fact_aliases;

        report.has_user_filter = has_bound_user_filter(sql, &sig, &report.anchor_aliases, self.rules);

        report.markers_found = trailing_markers(&sig);
        report.has_required_markers = report
            .markers_found
            .iter()
            .any(|m| marker_names_anchor(m, &report.anchor_aliases, self.rules));

        if let Some(diag) = read_only_diag {
            report.diagnostics.push(diag);
        }
        if !report.has_anchor_table {
            report.diagnostics.push(format!(
                "anchor table '{}' with an alias not found in any FROM/JOIN clause",
                self.rules.anchor_table
            ));
        }
        if !report.has_user_filter {
            match report.anchor_aliases.first() {
                Some(alias) => report.diagnostics.push(format!(
                    "tenant filter '{}' bound to an anchor alias not found",
                    self.rules.user_filter(alias)
                )),
                None => report.diagnostics.push(
                    "tenant filter missing and no anchor alias exists to bind it to".to_string(),
                ),
            }
        }
        if !report.has_required_markers {
            match report.anchor_aliases.first() {
                Some(alias) => report.diagnostics.push(format!(
                    "trailing marker '#{}#' not found",
                    self.rules.anchor_marker(alias)
                )),
                None => report
                    .diagnostics
                    .push("trailing markers missing and no anchor alias was discovered".to_string()),
            }
        }

        report
    }
}

/// Read-only rule: the leading keyword of every `;`-separated statement
/// must be SELECT or WITH. Returns a diagnostic on violation.
fn check_read_only(sig: &[&Token]) -> Option<String> {
    let mut statement_start = true;
    let mut saw_statement = false;

    for tok in sig {
        if tok.is_symbol(";") {
            statement_start = true;
            continue;
        }
        if !statement_start {
            continue;
        }
        // Trailing markers are annotations, not statements; a leading
        // parenthesis belongs to a parenthesized select.
        if tok.kind == TokenKind::Marker || tok.is_symbol("(") {
            continue;
        }
        statement_start = false;
        saw_statement = true;

        if tok.kind != TokenKind::Word {
            return Some(format!(
                "statement starts with '{}', expected a read-only verb",
                tok.text
            ));
        }
        let upper = tok.text.to_ascii_uppercase();
        if WRITE_VERBS.contains(&upper.as_str()) {
            return Some(format!("write verb '{upper}' at statement start"));
        }
        if upper != "SELECT" && upper != "WITH" {
            return Some(format!(
                "statement starts with '{upper}', expected SELECT or WITH"
            ));
        }
    }

    if !saw_statement {
        return Some("no SQL statement found".to_string());
    }
    None
}

/// Build the alias table: a table-name word directly preceded by FROM,
/// JOIN, or a from-list comma, followed by an identifier (optional AS),
/// records an alias.
fn scan_aliases(sig: &[&Token], rules: &FrameworkRules) -> (Vec<String>, Vec<String>) {
    let mut anchor = Vec::new();
    let mut fact = Vec::new();

    for i in 0..sig.len() {
        let tok = sig[i];
        if !matches!(tok.kind, TokenKind::Word | TokenKind::QuotedIdent) {
            continue;
        }
        let is_anchor = tok.text.eq_ignore_ascii_case(&rules.anchor_table);
        let is_fact = tok.text.eq_ignore_ascii_case(&rules.fact_table);
        if !is_anchor && !is_fact {
            continue;
        }

        let in_from_clause = i > 0
            && (sig[i - 1].is_word_ci("FROM") || sig[i - 1].is_word_ci("JOIN")
                || sig[i - 1].is_symbol(","));
        if !in_from_clause {
            continue;
        }

        let mut j = i + 1;
        if j < sig.len() && sig[j].is_word_ci("AS") {
            j += 1;
        }
        let Some(next) = sig.get(j) else { continue };
        if !matches!(next.kind, TokenKind::Word | TokenKind::QuotedIdent) {
            continue;
        }
        let upper = next.text.to_ascii_uppercase();
        if NON_ALIAS_WORDS.contains(&upper.as_str()) {
            continue;
        }

        let alias = next.text.clone();
        if is_anchor {
            if !anchor.contains(&alias) {
                anchor.push(alias);
            }
        } else if !fact.contains(&alias) {
            fact.push(alias);
        }
    }

    (anchor, fact)
}

/// Tenant-filter rule: a predicate of the exact shape
/// `<alias>.<user_id_column> = <placeholder>` where `<alias>` is a
/// discovered anchor alias. A filter bound to any other alias does not
/// isolate tenants and does not count.
fn has_bound_user_filter(
    sql: &str,
    sig: &[&Token],
    anchor_aliases: &[String],
    rules: &FrameworkRules,
) -> bool {
    if anchor_aliases.is_empty() {
        return false;
    }

    for w in sig.windows(4) {
        let [alias, dot, column, eq] = w else { continue };
        if !matches!(alias.kind, TokenKind::Word | TokenKind::QuotedIdent) {
            continue;
        }
        if !dot.is_symbol(".") || !eq.is_symbol("=") {
            continue;
        }
        if !column.is_word_ci(&rules.user_id_column) {
            continue;
        }
        if !anchor_aliases
            .iter()
            .any(|a| a.eq_ignore_ascii_case(&alias.text))
        {
            continue;
        }
        // The right-hand side must be the configured bind placeholder.
        if sql[eq.end..].trim_start().starts_with(&rules.placeholder) {
            return true;
        }
    }
    false
}

/// Markers in trailing position: everything after the final semicolon,
/// or the trailing marker run when the statement has no terminator.
fn trailing_markers(sig: &[&Token]) -> Vec<String> {
    if let Some(idx) = sig.iter().rposition(|t| t.is_symbol(";")) {
        return sig[idx + 1..]
            .iter()
            .filter(|t| t.kind == TokenKind::Marker)
            .map(|t| t.text.clone())
            .collect();
    }

    let mut tail: Vec<String> = sig
        .iter()
        .rev()
        .take_while(|t| t.kind == TokenKind::Marker)
        .map(|t| t.text.clone())
        .collect();
    tail.reverse();
    tail
}

/// Whether a marker names the anchor table together with one of its
/// discovered aliases. The table part is matched case-insensitively,
/// the alias part exactly as written.
fn marker_names_anchor(marker: &str, anchor_aliases: &[String], rules: &FrameworkRules) -> bool {
    for alias in anchor_aliases {
        let table_len = rules.anchor_table.len();
        let Some(table_part) = marker.get(..table_len) else {
            continue;
        };
        if !table_part.eq_ignore_ascii_case(&rules.anchor_table) {
            continue;
        }
        let Some(rest) = marker.get(table_len..) else {
            continue;
        };
        if let Some(alias_part) = rest.strip_prefix('_') {
            if alias_part == alias {
                return true;
            }
        }
    }
    false
}
