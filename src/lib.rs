//! # Helpdesk Chat
//!
//! A retrieval-augmented chat service for help-center articles.
//!
//! Helpdesk Chat answers free-text questions in three steps: keyword
//! retrieval over a relational table of help articles, prompt assembly from
//! the retrieved rows, and a single call to an external generation API. The
//! answer comes back with the titles of the articles used as context.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────────┐   ┌────────────┐
//! │ Chat UI  │──▶│  HTTP API  │──▶│ Keyword  │──▶│   MySQL    │
//! │ (static) │   │ POST /chat │   │ retrieval│   │ help table │
//! └──────────┘   └─────┬──────┘   └──────────┘   └────────────┘
//!                      │
//!                      ▼
//!                ┌──────────┐    ┌────────────┐
//!                │  Prompt  │──▶ │ Generation │
//!                │ composer │    │    API     │
//!                └──────────┘    └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! deskchat init --seed          # create and seed the article table
//! deskchat search "refunds"     # check what retrieval finds
//! deskchat ask "refund policy"  # one answer from the terminal
//! deskchat serve                # start the HTTP server + chat page
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`db`] | Pooled MySQL connection |
//! | [`migrate`] | Schema setup and sample data |
//! | [`retrieval`] | Keyword search over help articles |
//! | [`prompt`] | Prompt assembly |
//! | [`llm`] | Generation client abstraction |
//! | [`server`] | HTTP chat server |

pub mod config;
pub mod db;
pub mod llm;
pub mod migrate;
pub mod models;
pub mod prompt;
pub mod retrieval;
pub mod server;
