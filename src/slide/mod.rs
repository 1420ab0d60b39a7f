//! Slide service abstraction.
//!
//! This module describes the slide service the pipelines run against.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │                Pipelines                │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           SlideService Trait            │
//! │  slide info, ROIs, image regions,       │
//! │  annotation classes and annotations     │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │     Remote service (out of crate)       │
//! └─────────────────────────────────────────┘
//! ```

mod info;
mod service;

pub use info::SlideInfo;
pub use service::SlideService;
