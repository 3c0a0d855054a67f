//! Integration tests for tonekit crates.
//!
//! This crate contains end-to-end tests that drive the adjustment engine,
//! histogram and history together the way an editor front end does.
