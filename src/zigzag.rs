// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Zig-zag reordering of WCS blocks.
//!
//! When an operation visits several fixtures (G54, G55, ...), the next
//! operation can save a long rapid move by visiting them in reverse.  So
//! every second operation gets its WCS blocks reversed; nothing else moves.

use std::fmt::{self, Display, Formatter};
use fixedbitset::FixedBitSet as BitSet;
use serde::Serialize;

use crate::ast::{Program, rebuild};
use crate::config::SegmentOptions;
use crate::segment::segment_with;

/// Indices of the operations whose WCS blocks get reversed: every
/// even-numbered one (counting from 1) with more than one WCS block.
pub fn plan(program: &Program) -> BitSet {
    let mut set = BitSet::with_capacity(program.operations.len());
    for (i, op) in program.operations.iter().enumerate() {
        if (i + 1) % 2 == 0 && op.wcs_blocks.len() > 1 {
            set.insert(i);
        }
    }
    set
}

/// Return a copy of the program with the planned operations reversed.
pub fn apply(program: &Program) -> Program {
    let selected = plan(program);
    let mut result = program.clone();
    for (i, op) in result.operations.iter_mut().enumerate() {
        if selected.contains(i) {
            op.wcs_blocks.reverse();
        }
    }
    log::info!("zig-zag: reversed {} of {} operations",
               selected.count_ones(..), program.operations.len());
    result
}

/// Optimized program text.
pub fn optimize(program: &Program) -> String {
    rebuild(&apply(program))
}

/// Parse, optimize and rebuild.  Text without operations comes back as is,
/// line endings included.
pub fn optimize_text(input: &str, options: &SegmentOptions) -> String {
    let program = segment_with(input, options);
    if program.operations.is_empty() {
        return input.into();
    }
    optimize(&program)
}

/// What `optimize` would do, per operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub total_operations: usize,
    pub operations: Vec<OperationSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSummary {
    /// The operation's line number, or its 1-based position if it has none.
    pub ordinal: u32,
    pub name: Option<String>,
    pub tool_number: Option<String>,
    pub wcs_count: usize,
    pub will_reverse: bool,
}

pub fn preview(program: &Program) -> Preview {
    let selected = plan(program);
    let operations = program.operations.iter().enumerate().map(|(i, op)| OperationSummary {
        ordinal: if op.ordinal > 0 { op.ordinal } else { i as u32 + 1 },
        name: op.name.clone(),
        tool_number: op.tool_number.clone(),
        wcs_count: op.wcs_blocks.len(),
        will_reverse: selected.contains(i),
    }).collect();
    Preview { total_operations: program.operations.len(), operations }
}

impl Display for Preview {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "{:>6}  {:<24} {:<6} {:>4}  {}", "OP", "NAME", "TOOL", "WCS", "ORDER")?;
        for op in &self.operations {
            writeln!(f, "{:>6}  {:<24} {:<6} {:>4}  {}",
                     format!("N{}", op.ordinal),
                     op.name.as_deref().unwrap_or("-"),
                     op.tool_number.as_deref().unwrap_or("-"),
                     op.wcs_count,
                     if op.will_reverse { "reversed" } else { "kept" })?;
        }
        write!(f, "{} operation(s)", self.total_operations)
    }
}
