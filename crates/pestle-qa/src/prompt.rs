//! Prompt assembly and reply handling for the query translator.
//!
//! Two prompts: one turns a question into a single SurrealQL SELECT under
//! fixed schema rules, the other turns the question plus query results into
//! a grounded answer. Replies are fence-stripped and validated before
//! anything reaches the store.

use pestle_llm::ChatMessage;

/// Parameter name the generation prompt tells the model to use for vector
/// search. The chain only embeds the question when the generated query
/// references it.
pub const QUESTION_EMBEDDING_PARAM: &str = "$question_embedding";

/// Statements a generated query must not contain, matched word-wise and
/// case-insensitively.
const WRITE_KEYWORDS: [&str; 9] = [
    "create", "update", "upsert", "delete", "insert", "relate", "define", "remove", "kill",
];

/// Build the query-generation conversation.
pub fn build_query_prompt(schema: &str, question: &str, top_k: usize) -> Vec<ChatMessage> {
    let system = format!(
        "You translate questions about drugs, medical conditions, side effects, drug classes, \
         and brands into SurrealQL read queries.\n\
         \n\
         Schema:\n{schema}\n\
         \n\
         Rules:\n\
         - Reply with exactly one SELECT statement and nothing else. No explanation, no markdown.\n\
         - Use only the tables and fields in the schema above.\n\
         - Match names case-insensitively: compare ci_name to the lowercased name, \
           e.g. WHERE ci_name = 'aspirin'.\n\
         - For short keyword lookups such as 'cold', prefer the full-text operator on ci_name: \
           WHERE ci_name @1@ 'cold'. It is available on the drug and condition tables only, \
           and only when they are the table being selected from.\n\
         - For broader or conceptual phrases with no obvious keyword, use vector search on drug \
           or condition: WHERE embedding <|{top_k}|> {embedding_param}. The parameter is bound \
           for you.\n\
         - To combine a search with a relation, filter through a subquery, e.g. \
           SELECT drug.name FROM treats WHERE condition IN \
           (SELECT VALUE id FROM condition WHERE ci_name @1@ 'cold').\n\
         - Traverse relations through their link fields: \
           SELECT drug.name FROM treats WHERE condition.ci_name = 'pain'.\n\
         - Return display fields such as name, rating, or reviews. Never return id or embedding.\n\
         - End with LIMIT {top_k} unless the question asks for a specific number.",
        schema = schema,
        top_k = top_k,
        embedding_param = QUESTION_EMBEDDING_PARAM,
    );

    vec![ChatMessage::system(system), ChatMessage::user(question)]
}

/// Build the answer-synthesis conversation.
pub fn build_answer_prompt(question: &str, context: &str) -> Vec<ChatMessage> {
    let system = "You answer questions about drugs using only the provided query results. \
                  The results are authoritative; repeat their values as given. If the results \
                  are empty, say you do not have that information. Never invent drugs, \
                  conditions, or numbers."
        .to_string();
    let user = format!("Results:\n{context}\n\nQuestion: {question}");

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Pull the query text out of a model reply.
///
/// Accepts a bare statement or one wrapped in a fenced code block with an
/// optional language tag. A trailing semicolon is dropped.
pub fn extract_query(reply: &str) -> String {
    let trimmed = reply.trim();

    let body = match trimmed.find("```") {
        Some(start) => {
            let after_fence = &trimmed[start + 3..];
            // Skip the language tag, if any, up to the end of the line.
            let content_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
            let content = &after_fence[content_start..];
            match content.find("```") {
                Some(end) => &content[..end],
                None => content,
            }
        }
        None => trimmed,
    };

    body.trim().trim_end_matches(';').trim().to_string()
}

/// Check that a generated query is a single read statement.
pub fn validate_query(query: &str) -> Result<(), String> {
    if query.is_empty() {
        return Err("the model returned no query".to_string());
    }

    let mut words = query
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty());

    match words.next() {
        Some(first) if first.eq_ignore_ascii_case("select") => {}
        _ => return Err(format!("expected a SELECT statement, got: {}", excerpt(query))),
    }

    if query.contains(';') {
        return Err("multiple statements are not allowed".to_string());
    }

    for word in words {
        if WRITE_KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k)) {
            return Err(format!("write operation '{}' is not allowed", word));
        }
    }

    Ok(())
}

fn excerpt(text: &str) -> String {
    const MAX: usize = 80;
    if text.len() <= MAX {
        text.to_string()
    } else {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}
