//! Integration tests for Site-Lingo
//!
//! These tests use wiremock to serve both the site being crawled and the
//! translation API, and run the full page-load cycle end-to-end.

mod crawl_tests;
