use anyhow::Result;
use sqlx::MySqlPool;

pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
    // Create the help_articles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS help_articles (
            id INT AUTO_INCREMENT PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            content TEXT NOT NULL,
            keywords VARCHAR(512) NOT NULL DEFAULT '',
            last_updated TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                ON UPDATE CURRENT_TIMESTAMP,
            UNIQUE KEY uq_help_articles_title (title)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Index for the recency ordering used by retrieval
    // CREATE INDEX IF NOT EXISTS is not available on MySQL, so check first
    let index_count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM information_schema.statistics
        WHERE table_schema = DATABASE()
          AND table_name = 'help_articles'
          AND index_name = 'idx_help_articles_last_updated'
        "#,
    )
    .fetch_one(pool)
    .await?;

    if index_count == 0 {
        sqlx::query(
            "CREATE INDEX idx_help_articles_last_updated ON help_articles (last_updated DESC)",
        )
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Sample articles for local development. Rows are keyed by title, so
/// re-seeding updates content in place instead of duplicating.
const SEED_ARTICLES: &[(&str, &str, &str)] = &[
    (
        "Refunds",
        "We offer a full refund within 30 days of purchase. To request one, \
         open the Orders page, pick the order, and choose Request refund. \
         Refunds are returned to the original payment method within 5 business days.",
        "refund, money back, return, reimbursement",
    ),
    (
        "Shipping times",
        "Standard shipping takes 3-5 business days inside the EU and 7-14 days \
         elsewhere. Express options are shown at checkout when available for \
         your address.",
        "shipping, delivery, postage, tracking",
    ),
    (
        "Resetting your password",
        "Use the Forgot password link on the sign-in page. We will email you a \
         reset link that stays valid for one hour. If the mail does not arrive, \
         check your spam folder before requesting another.",
        "password, reset, login, account, locked out",
    ),
    (
        "Contacting support",
        "Our support team answers email at support@example.com within one \
         business day. For urgent billing issues, live chat is open weekdays \
         from 9:00 to 17:00 CET.",
        "support, contact, help, email, chat",
    ),
];

pub async fn seed_articles(pool: &MySqlPool) -> Result<usize> {
    for (i, (title, content, keywords)) in SEED_ARTICLES.iter().enumerate() {
        // Stagger last_updated so recency ordering is stable across seeds
        let age_days = SEED_ARTICLES.len() - i;
        sqlx::query(
            r#"
            INSERT INTO help_articles (title, content, keywords, last_updated)
            VALUES (?, ?, ?, NOW() - INTERVAL ? DAY)
            ON DUPLICATE KEY UPDATE
                content = VALUES(content),
                keywords = VALUES(keywords),
                last_updated = VALUES(last_updated)
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(keywords)
        .bind(age_days as i64)
        .execute(pool)
        .await?;
    }

    Ok(SEED_ARTICLES.len())
}
