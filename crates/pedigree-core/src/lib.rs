//! Pedigree Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Pedigree family
//! tree tools. It includes:
//!
//! - **Records**: The input contract for family trees ([`record::FamilyRecord`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Visual primitives rendered to SVG ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod record;
