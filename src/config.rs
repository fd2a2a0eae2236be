// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Options steering the operation segmenter.
//!
//! The defaults reproduce the plain CAM-style heuristic: every line starting
//! with a line number, and every tool change, opens a new operation.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which lines open a new operation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BoundaryStrategy {
    /// Any line starting with `N<digits>`, or containing `M6`.
    LineNumberOrToolChange,
    /// Like `LineNumberOrToolChange`, but a numbered line only counts if it
    /// also carries a comment.  Use this for programs that number every line.
    Annotated,
}

impl Default for BoundaryStrategy {
    fn default() -> Self {
        BoundaryStrategy::LineNumberOrToolChange
    }
}

/// What ends up in `Program::trailing_lines`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrailingCapture {
    /// The last operation keeps every remaining line.
    None,
    /// A closing `%` tape marker at the very end, and any blank lines after
    /// it, are split off the last operation.
    Sentinel,
}

impl Default for TrailingCapture {
    fn default() -> Self {
        TrailingCapture::None
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SegmentOptions {
    pub boundary: BoundaryStrategy,
    pub trailing: TrailingCapture,
}
