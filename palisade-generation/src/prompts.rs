//! Prompt assembly and completion post-processing.
//!
//! Prompts embed the schema, the framework rules, and up to a handful
//! of similar historical queries as in-context examples.

use palisade_core::config::FrameworkRules;
use palisade_core::constants::{SENTINEL_IMPOSSIBLE, SENTINEL_READONLY_VIOLATION};
use palisade_core::models::{CandidateMatch, ChatMessage};

/// Messages for SQL generation.
pub fn sql_messages(
    question: &str,
    schema: &str,
    examples: &[CandidateMatch],
    rules: &FrameworkRules,
) -> Vec<ChatMessage> {
    let system = "You are an expert SQL generator. Return ONLY the SQL statement, \
                  with no explanations and no markdown formatting. Do your best to \
                  understand the user's intent even when the question is vague.";

    let mut prompt = format!(
        "Translate this question into SQL against the schema below.\n\n\
         Question: {question}\n\n\
         Schema:\n{schema}\n\n\
         You MUST follow these rules:\n\
         1. Join the {anchor} table with an alias and filter it with \
         WHERE <alias>.{column} = {placeholder}\n\
         2. Append trailing markers after the final semicolon naming each \
         table and its alias, e.g. #{anchor_upper}_<alias>#\n\
         3. If the question cannot be answered from the schema, reply \
         exactly {impossible}\n\
         4. If the question asks to modify data, reply exactly {readonly}\n",
        anchor = rules.anchor_table,
        column = rules.user_id_column,
        placeholder = rules.placeholder,
        anchor_upper = rules.anchor_table.to_uppercase(),
        impossible = SENTINEL_IMPOSSIBLE,
        readonly = SENTINEL_READONLY_VIOLATION,
    );

    if !examples.is_empty() {
        prompt.push_str("\nSimilar validated queries:\n");
        for (i, example) in examples.iter().enumerate() {
            prompt.push_str(&format!(
                "{}. Question: {}\n   SQL: {}\n",
                i + 1,
                example.text,
                example.sql
            ));
        }
    }

    prompt.push_str("\nSQL:");

    vec![ChatMessage::system(system), ChatMessage::user(prompt)]
}

/// Messages for the domain relevance pre-check.
pub fn relevance_messages(question: &str, domain: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "You decide whether a question concerns a {domain} database. \
             Answer with exactly YES or NO."
        )),
        ChatMessage::user(format!("Question: {question}\nAnswer:")),
    ]
}

/// Messages for the natural-language explanation.
pub fn explanation_messages(sql: &str, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a SQL expert who explains queries simply, for a \
             non-technical audience.",
        ),
        ChatMessage::user(format!(
            "Explain in one or two sentences what this SQL query does, in \
             the context of the original question.\n\n\
             Question: {question}\n\nSQL:\n{sql}"
        )),
    ]
}

/// Strip markdown code fences a model may wrap its SQL in.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let mut lines: Vec<&str> = trimmed.lines().collect();
    // Drop the opening fence (possibly "```sql") and a closing fence.
    lines.remove(0);
    if matches!(lines.last(), Some(l) if l.trim_start().starts_with("```")) {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}
