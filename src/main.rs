//! # Helpdesk Chat CLI (`deskchat`)
//!
//! The `deskchat` binary wraps the retrieval-augmented chat pipeline:
//! schema setup, one-off searches and questions from the terminal, and the
//! HTTP chat server.
//!
//! ## Usage
//!
//! ```bash
//! deskchat --config ./config/deskchat.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `deskchat init` | Create the help_articles table (add `--seed` for sample rows) |
//! | `deskchat search "<query>"` | Run keyword retrieval and print matching articles |
//! | `deskchat ask "<query>"` | Retrieve, compose, and generate one answer |
//! | `deskchat serve` | Start the HTTP chat server |
//!
//! Database credentials come from `DB_HOST`, `DB_PORT`, `DB_USER`,
//! `DB_PASSWORD`, and `DB_NAME`; the generation key from `GEMINI_API_KEY`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use helpdesk_chat::retrieval::{self, ArticleRetriever, KeywordRetriever};
use helpdesk_chat::{config, db, llm, migrate, prompt, server};

/// Helpdesk Chat — a retrieval-augmented chat service for help-center
/// articles.
#[derive(Parser)]
#[command(
    name = "deskchat",
    about = "Helpdesk Chat — a retrieval-augmented chat service for help-center articles",
    version,
    long_about = "Helpdesk Chat answers free-text questions by keyword-matching a table of \
    help articles, assembling the hits into a prompt, and forwarding the prompt to a \
    generation API. Ships a JSON HTTP endpoint, a bundled chat page, and CLI commands \
    for setup and one-off queries."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Missing files fall back to built-in defaults, so the binary runs
    /// with environment variables alone.
    #[arg(long, global = true, default_value = "./config/deskchat.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the help_articles table and its recency index. This command
    /// is idempotent — running it multiple times is safe.
    Init {
        /// Also insert a small set of sample help articles.
        #[arg(long)]
        seed: bool,
    },

    /// Search help articles from the terminal.
    ///
    /// Runs the same keyword retrieval the chat endpoint uses and prints
    /// the matching titles with a short excerpt.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of results to return.
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Ask one question through the full pipeline.
    ///
    /// Retrieves context, composes the prompt, calls the generation API,
    /// and prints the answer together with the articles used.
    Ask {
        /// The question to answer.
        query: String,
    },

    /// Start the HTTP chat server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// chat endpoint, the health check, and the chat page.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init { seed } => {
            let pool = db::connect().await?;
            migrate::run_migrations(&pool).await?;
            println!("Database initialized successfully.");
            if seed {
                let count = migrate::seed_articles(&pool).await?;
                println!("Seeded {} sample articles.", count);
            }
            pool.close().await;
        }
        Commands::Search { query, limit } => {
            let pool = db::connect().await?;
            let retriever =
                KeywordRetriever::new(pool.clone(), limit.unwrap_or(cfg.retrieval.max_articles));

            let articles = retriever.retrieve(&query).await;
            if articles.is_empty() {
                println!("No results.");
            } else {
                for (i, article) in articles.iter().enumerate() {
                    println!("{}. {}", i + 1, article.title);
                    println!(
                        "    excerpt: \"{}\"",
                        retrieval::excerpt(&article.content, 160)
                    );
                }
            }
            pool.close().await;
        }
        Commands::Ask { query } => {
            let pool = db::connect().await?;
            let retriever = KeywordRetriever::new(pool.clone(), cfg.retrieval.max_articles);
            let client = llm::create_client(&cfg.model)?;

            let articles = retriever.retrieve(&query).await;
            let instruction = prompt::compose(&query, &articles);
            let answer = client.generate(&instruction).await?;

            println!("{}", answer);
            if articles.is_empty() {
                println!("\nContext used: (none)");
            } else {
                println!("\nContext used:");
                for article in &articles {
                    println!("  - {}", article.title);
                }
            }
            pool.close().await;
        }
        Commands::Serve => {
            let pool = db::connect().await?;
            server::run_server(&cfg, pool).await?;
        }
    }

    Ok(())
}
