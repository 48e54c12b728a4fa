//! HTML scraping for the newswire listing and its article pages.
//!
//! Scraping happens in two phases:
//!
//! 1. **Listing**: [`listing::parse_listing`] turns the listing page into
//!    [`Candidate`](crate::models::Candidate)s (link, headline, raw date text)
//! 2. **Articles**: [`article::ContentExtractor`] fetches each surviving
//!    candidate and pulls out its body text
//!
//! Both phases tolerate partial failure: a malformed listing element or an
//! unreachable article is logged and skipped, never fatal.

pub mod article;
pub mod listing;
