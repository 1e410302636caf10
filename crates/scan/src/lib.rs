//! Textual scan for `dojo.provide` declarations in JavaScript source.
//!
//! This crate deliberately does not parse JavaScript. A single compiled
//! regex is applied line by line to recognize the one declaration shape
//! that matters, and a bounded lookahead window keeps the scan from
//! crawling through entire files: declarations live at the top of a
//! module file, so after a short quiet stretch the scan gives up.
//!
//! Two entry points: [`scan_source`] for an in-memory buffer (an editor's
//! unsaved view) and [`scan_file`] for a file on disk, which decodes
//! UTF-8 with a Windows-1252 fallback for legacy sources.

mod consts;
pub mod error;
mod scan;

pub use crate::scan::{Provide, ScanWindow, scan_file, scan_source, short_name};
