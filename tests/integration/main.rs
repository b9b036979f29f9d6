//! Router-level integration tests against the in-memory store

mod api_tests;
