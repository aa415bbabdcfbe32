//! Strata Core Types
//!
//! This crate provides the foundational types shared by the Strata layout
//! engine and its front ends:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::Id`])
//! - **Geometry**: Points and sizes in layout space ([`geometry`] module)
//! - **Semantic**: Input nodes and edges ([`semantic`] module)

pub mod geometry;
pub mod identifier;
pub mod semantic;
