//! # Auto FB Poster
//!
//! A content-repurposing pipeline that scrapes article listings from
//! configured news pages, rewrites each article into social-post variants
//! with Gemini, and publishes the result (with the best available image or
//! video) to a Facebook Page.
//!
//! ## Architecture
//!
//! One run walks a linear pipeline, strictly sequentially:
//! 1. **Scrape**: fetch each listing page and extract candidate articles,
//!    excluding URLs already in the posted history
//! 2. **Select media**: pick the largest image by declared byte size and the
//!    first video
//! 3. **Generate**: ask Gemini for a short and a long rewrite, falling back
//!    to a raw-text excerpt when both fail
//! 4. **Publish**: post to the Page (video over image over plain text)
//! 5. **Record**: append the URL to `posted_history.json` and the outcome to
//!    `dashboard.json`
//!
//! Periodic execution is an external concern; each invocation is one run.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod pipeline;
pub mod publish;
pub mod scrape;
pub mod store;
pub mod utils;
