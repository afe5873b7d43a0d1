//! MindSpark Core Library
//!
//! Resurfaces a weighted random batch of notes: eligibility filtering by
//! folder, recency/novelty/age weighting, weighted sampling without
//! replacement, and the view history that feeds back into the weights.

pub mod config;
pub mod data;
pub mod error;
pub mod exclusion;
pub mod history;
pub mod logging;
pub mod note;
pub mod sample;
pub mod select;
pub mod session;
pub mod text;
pub mod vault;
pub mod weight;
