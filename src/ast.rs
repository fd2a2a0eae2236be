// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};

/// A whole G-code program, split into operations.
///
/// Displaying a program yields its text again: leading lines, each
/// operation in turn, then trailing lines, joined by `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Lines before the first operation (`%`, program number, ...).
    pub leading_lines: Vec<String>,
    pub operations: Vec<OperationBlock>,
    pub trailing_lines: Vec<String>,
}

/// One machining operation, usually one tool doing one job.
///
/// `ordinal`, `name`, the tool fields and the line positions are
/// informational only; the text is rebuilt from the line regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationBlock {
    /// Value of the line number that opened the block, or 0.
    pub ordinal: u32,
    pub name: Option<String>,
    pub tool_number: Option<String>,
    pub tool_description: Option<String>,
    /// 1-based, inclusive.
    pub start_line: usize,
    pub end_line: usize,
    pub header_lines: Vec<String>,
    pub wcs_blocks: Vec<WcsBlock>,
    pub footer_lines: Vec<String>,
    /// All lines of the block, in input order.
    pub raw_lines: Vec<String>,
}

/// The lines following one work coordinate system selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WcsBlock {
    /// E.g. `G55` or `G54.1 P2`.
    pub wcs_code: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Starts with the selecting line itself.
    pub lines: Vec<String>,
}

impl OperationBlock {
    /// Lines in emission order: header, WCS blocks as currently ordered,
    /// footer.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.header_lines.iter()
            .chain(self.wcs_blocks.iter().flat_map(|wcs| wcs.lines.iter()))
            .chain(self.footer_lines.iter())
            .map(String::as_str)
    }

    /// Check that header, WCS blocks and footer together are exactly
    /// `raw_lines`, in order.  Reordering WCS blocks leaves `raw_lines` alone,
    /// so this only holds for a freshly parsed block.
    pub fn is_partitioned(&self) -> bool {
        self.lines().eq(self.raw_lines.iter().map(String::as_str))
    }
}

impl Program {
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.leading_lines.iter().map(String::as_str)
            .chain(self.operations.iter().flat_map(|op| op.lines()))
            .chain(self.trailing_lines.iter().map(String::as_str))
    }

    /// Whether every operation's regions partition its raw lines.
    pub fn verify(&self) -> bool {
        self.operations.iter().all(OperationBlock::is_partitioned)
    }
}

/// Reassemble the program text.
pub fn rebuild(program: &Program) -> String {
    program.to_string()
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

impl Display for OperationBlock {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Op{}", self.ordinal)?;
        if let Some(name) = &self.name {
            write!(f, ": {}", name)?;
        }
        if let Some(tool) = &self.tool_number {
            write!(f, " ({})", tool)?;
        }
        Ok(())
    }
}

impl Display for WcsBlock {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} (lines {}-{})", self.wcs_code, self.start_line, self.end_line)
    }
}
