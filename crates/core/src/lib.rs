//! Core library for triviaviz
//!
//! This crate implements the **Functional Core** of the triviaviz application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`triviaviz_core`** (this crate): Pure transformation functions with zero I/O
//! - **`triviaviz`**: HTTP fetching, terminal rendering and the JSON API server (the Imperative Shell)
//!
//! Every function here is a pure function of its input: no I/O, no shared
//! state, same input same output. Grouping and sorting are also total: they
//! never fail, whatever the batch looks like.
//!
//! # Module Organization
//!
//! - [`error`]: The error-as-value contract of the question source
//! - [`opentdb`]: Open Trivia DB payload model, validation and entity decoding
//! - [`grouping`]: Category and difficulty aggregates
//! - [`sorting`]: Deterministic ordering of category aggregates
//! - [`collate`]: Locale-style string comparison used for name ordering
//! - [`chart`]: Filter + group + sort, packaged for rendering
//! - [`text`]: Small label helpers
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use triviaviz_core::grouping::group_by_category;
//! use triviaviz_core::sorting::{get_sorted_category_grouping, SortingOptions};
//!
//! let questions = triviaviz_core::opentdb::parse_question_response(body)?;
//! let grouping = group_by_category(&questions);
//! let sorted = get_sorted_category_grouping(&grouping, "count:desc".parse()?);
//! ```

pub mod chart;
pub mod collate;
pub mod error;
pub mod grouping;
pub mod opentdb;
pub mod sorting;
pub mod text;
