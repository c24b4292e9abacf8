//! Core data types for signature evidence.
//!
//! List-style evidence lives in [`container`] and [`entry`]; revision-style
//! evidence in [`revision`] and its merged form in [`consolidated`].

pub mod consolidated;
pub mod container;
pub mod entry;
pub mod revision;
pub mod timestamp;
