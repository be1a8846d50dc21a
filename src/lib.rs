//! # Cinerank
//!
//! A small movie and show recommendation service. A fixed catalog of
//! titles is loaded once from a JSON dataset, vectorized with TF-IDF,
//! and ranked against free-text queries by cosine similarity. Results
//! can be narrowed by genre, year, language, and media type.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌───────────┐
//! │ JSON dataset │──▶│    Catalog      │──▶│  TF-IDF    │
//! │ (~4,700 rec) │   │ (in-memory)    │   │  vectors  │
//! └──────────────┘   └───────┬────────┘   └────┬──────┘
//!                            │                 │
//!              query ──▶ preprocess ──▶ rank ──▶ filter ──▶ top-K
//!                            │
//!              ┌─────────────┴───────────┐
//!              ▼                         ▼
//!         ┌──────────┐            ┌──────────┐
//!         │   CLI    │            │   HTTP   │
//!         │  (cine)  │            │  (JSON)  │
//!         └──────────┘            └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cine search "romantic bollywood movie 2015"
//! cine get 550                  # one title by id
//! cine filters                  # available filter values
//! cine stats                    # catalog overview
//! cine serve                    # start the JSON HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`preprocess`] | Text normalization and tokenization |
//! | [`vectorizer`] | TF-IDF vocabulary and weighting |
//! | [`catalog`] | Read-only in-memory catalog store |
//! | [`rank`] | Cosine similarity ranking |
//! | [`filters`] | Filter criteria and query keyword extraction |
//! | [`recommend`] | The query-to-ranking pipeline |
//! | [`server`] | JSON HTTP server |

pub mod catalog;
pub mod config;
pub mod filters;
pub mod get;
pub mod models;
pub mod preprocess;
pub mod rank;
pub mod recommend;
pub mod search;
pub mod server;
pub mod stats;
pub mod vectorizer;
