//! Tax Return Engine
//!
//! This crate turns a set of uploaded tax documents (W-2, 1099-NEC, 1099-INT)
//! into a federal income-tax summary and a filled Form 1040. Document field
//! extraction and PDF template filling are external collaborators behind the
//! [`extract::FormExtractor`] and [`render::FormRenderer`] traits. Everything
//! between them lives here: monetary normalization, the progressive-bracket
//! tax calculation, document aggregation, and the submission pipeline.

#![warn(missing_docs)]

pub mod aggregation;
pub mod api;
pub mod calculation;
pub mod error;
pub mod extract;
pub mod models;
pub mod money;
pub mod pipeline;
pub mod policy;
pub mod render;
pub mod store;
