// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Structural editing of CAM-generated G-code programs.
//!
//! A program is split into *operations* (started by a line number such as
//! `N10`, or by a tool change `M6`), and each operation into a header, one
//! block per work coordinate system selection (`G54` ... `G59`, `G54.1 Pn`)
//! and a footer.  The split is lossless: rebuilding the text from the model
//! gives back every input line exactly once.
//!
//! On top of this, the zig-zag optimizer reverses the order of the WCS blocks
//! in every second operation, so that a machine working on several fixtures
//! does not travel back to the first one each time.
//!
//! ## Basic usage
//!
//! ```rust
//! use ngc_zigzag::{segment, optimize, preview};
//!
//! let input = "N1 T1\nG54\nG1 X1\nM9\nN2 T2\nG54\nG1 X2\nG55\nG1 X3\nM9";
//! let prog = segment(input);
//! assert_eq!(prog.operations.len(), 2);
//! assert!(preview(&prog).operations[1].will_reverse);
//! assert_eq!(optimize(&prog),
//!            "N1 T1\nG54\nG1 X1\nM9\nN2 T2\nG55\nG1 X3\nG54\nG1 X2\nM9");
//! ```
//!
//! ## Limitations
//!
//! Boundaries are found heuristically.  Programs that number every line would
//! be split into one operation per line; use `BoundaryStrategy::Annotated`
//! for those.

pub mod ast;
pub mod config;
pub mod error;
pub mod lex;
pub mod classify;
pub mod segment;
pub mod zigzag;

// internal helpers
pub(crate) mod util;

pub use crate::ast::{Program, OperationBlock, WcsBlock, rebuild};
pub use crate::config::{SegmentOptions, BoundaryStrategy, TrailingCapture};
pub use crate::segment::{segment, segment_with};
pub use crate::zigzag::{optimize, optimize_text, preview, Preview, OperationSummary};
