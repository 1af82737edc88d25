//! # glance-core
//!
//! Core types and error types for Paperglance.
//!
//! This crate provides the foundational types shared across all Paperglance crates:
//! - Entity structs for persisted and displayed results (session records,
//!   summaries, chat turns, dictionary definitions)
//! - Enums for document kinds, summary length, and the session machine's
//!   state tag with its allowed transitions
//! - The staged in-memory document
//! - The opaque record identifier assigned by the history store
//! - Cross-cutting error types

pub mod document;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
