//! Keyword retrieval over the help-article table.
//!
//! The matching strategy is a deliberate placeholder: lowercase tokens from
//! the query are substring-matched against the title, content, and keywords
//! columns, and the most recently updated rows win. Everything downstream
//! only depends on the [`ArticleRetriever`] trait (query string in, at most
//! K articles out), so a smarter ranking can replace this module without
//! touching prompt composition or generation.
//!
//! # Fail-open
//!
//! A data-access failure is logged and absorbed into an empty result. The
//! chat still answers, with reduced context, instead of failing the whole
//! request.

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::models::Article;

/// Strategy interface for turning a free-text query into context articles.
///
/// Implementations must be infallible: lookup errors are handled internally
/// and surface as an empty list.
#[async_trait]
pub trait ArticleRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Vec<Article>;
}

/// Substring-matching retriever backed by the pooled MySQL connection.
pub struct KeywordRetriever {
    pool: MySqlPool,
    max_articles: i64,
}

impl KeywordRetriever {
    pub fn new(pool: MySqlPool, max_articles: i64) -> Self {
        Self { pool, max_articles }
    }

    async fn run_query(&self, terms: &[String]) -> anyhow::Result<Vec<Article>> {
        let sql = build_search_sql(terms.len());
        let mut query = sqlx::query_as::<_, Article>(&sql);

        for term in terms {
            let pattern = format!("%{}%", term);
            // One bind per searched column
            query = query
                .bind(pattern.clone())
                .bind(pattern.clone())
                .bind(pattern);
        }
        query = query.bind(self.max_articles);

        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl ArticleRetriever for KeywordRetriever {
    async fn retrieve(&self, query: &str) -> Vec<Article> {
        let terms = search_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        match self.run_query(&terms).await {
            Ok(articles) => articles,
            Err(e) => {
                eprintln!("Warning: article lookup failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Extract searchable terms from a raw query: lowercase, whitespace-split,
/// tokens longer than two characters. Short tokens carry too little signal
/// for substring matching and would match almost every row.
pub fn search_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|t| t.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Build the parameterized search statement for `term_count` terms.
///
/// Each term contributes `(title LIKE ? OR content LIKE ? OR keywords LIKE ?)`;
/// the clauses are OR-joined. The `id` tiebreak keeps ordering deterministic
/// when several rows share a `last_updated` value.
fn build_search_sql(term_count: usize) -> String {
    let clause = "(title LIKE ? OR content LIKE ? OR keywords LIKE ?)";
    let condition = vec![clause; term_count].join(" OR ");

    format!(
        "SELECT title, content FROM help_articles WHERE {} \
         ORDER BY last_updated DESC, id ASC LIMIT ?",
        condition
    )
}

/// First `max_chars` characters of a body, with a trailing ellipsis when
/// truncated. Used by the CLI search output.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let flattened = content.replace('\n', " ");
    let trimmed = flattened.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
