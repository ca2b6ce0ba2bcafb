//! Core types shared across goldentest facilities
//!
//! This crate provides the canonical schema constants used by the logging
//! facility and by tests asserting on captured events.

pub mod schema;
