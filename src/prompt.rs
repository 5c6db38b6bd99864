//! Prompt assembly for the generation call.
//!
//! Pure formatting, no state: retrieved articles (or a fixed notice when
//! none matched) are combined with the behavioral rules and the user's
//! question into a single instruction string.

use crate::models::Article;

/// Substituted for the documentation section when retrieval found nothing.
pub const NO_CONTEXT_NOTICE: &str = "No relevant documentation was found for this question. \
     Tell the user you could not find an answer in the help center, and suggest \
     contacting the support team directly or browsing the help pages.";

const RULES: &str = "You are a support assistant for our help center. Follow these rules:\n\
     1. Answer using only the documentation provided below.\n\
     2. If the documentation does not contain the answer, say that you do not \
     know rather than guessing.\n\
     3. Keep a friendly, professional support tone.";

/// Render the full instruction string for one chat turn.
pub fn compose(query: &str, articles: &[Article]) -> String {
    let documentation = if articles.is_empty() {
        NO_CONTEXT_NOTICE.to_string()
    } else {
        articles
            .iter()
            .map(|a| format!("### {}\n{}", a.title, a.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!(
        "{}\n\nDocumentation:\n\n{}\n\nQuestion: {}",
        RULES, documentation, query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, content: &str) -> Article {
        Article {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_rules_always_present() {
        let prompt = compose("anything", &[]);
        assert!(prompt.contains("only the documentation provided"));
        assert!(prompt.contains("do not"));
        assert!(prompt.contains("support tone"));
    }

    #[test]
    fn test_articles_rendered_in_order() {
        let articles = vec![
            article("Refunds", "Full refund within 30 days."),
            article("Shipping times", "3-5 business days."),
        ];
        let prompt = compose("how do refunds work", &articles);

        let refunds = prompt.find("### Refunds").unwrap();
        let shipping = prompt.find("### Shipping times").unwrap();
        assert!(refunds < shipping);
        assert!(prompt.contains("Full refund within 30 days."));
    }

    #[test]
    fn test_empty_context_uses_notice() {
        let prompt = compose("xyzzy", &[]);
        assert!(prompt.contains(NO_CONTEXT_NOTICE));
        assert!(!prompt.contains("###"));
    }

    #[test]
    fn test_query_comes_last() {
        let prompt = compose("where is my order", &[article("Shipping times", "...")]);
        assert!(prompt.ends_with("Question: where is my order"));
    }

    #[test]
    fn test_deterministic() {
        let articles = vec![article("Refunds", "Full refund within 30 days.")];
        assert_eq!(
            compose("refund policy", &articles),
            compose("refund policy", &articles)
        );
    }
}
