// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use crate::ast::*;
use crate::classify::classify;
use crate::config::{SegmentOptions, TrailingCapture};
use crate::lex::Line;
use crate::util::split_lines;

/// Parse program text with the default options.
pub fn segment(input: &str) -> Program {
    segment_with(input, &SegmentOptions::default())
}

/// Parse program text into operations and their WCS blocks.
///
/// This never fails: text without any operation boundary simply ends up in
/// `leading_lines`.
pub fn segment_with(input: &str, options: &SegmentOptions) -> Program {
    let mut prog = Program::default();
    let mut current: Option<OperationBlock> = None;

    for (n, text) in split_lines(input).into_iter().enumerate() {
        let lineno = n + 1;
        let line = Line::lex(text);

        if line.is_boundary(options.boundary) {
            if let Some(block) = current.take() {
                prog.operations.push(close(block));
            }
            log::debug!("line {}: operation N{} starts", lineno, line.ordinal());
            current = Some(OperationBlock {
                ordinal: line.ordinal(),
                start_line: lineno,
                ..Default::default()
            });
        }

        let block = match current.as_mut() {
            Some(block) => block,
            None => {
                prog.leading_lines.push(text.into());
                continue;
            }
        };
        block.raw_lines.push(text.into());
        block.end_line = lineno;

        if let Some((number, description)) = line.tool_comment() {
            block.tool_number = Some(number);
            block.tool_description = Some(description.into());
        } else if block.tool_number.is_none() {
            block.tool_number = line.tool_word();
        }
        if let Some(name) = line.operation_name() {
            block.name = Some(name.into());
        }
    }

    if let Some(mut block) = current {
        if options.trailing == TrailingCapture::Sentinel {
            prog.trailing_lines = split_sentinel(&mut block);
        }
        prog.operations.push(close(block));
    }
    prog
}

fn close(mut block: OperationBlock) -> OperationBlock {
    classify(&mut block);
    log::debug!("lines {}-{}: {}, {} WCS block(s)", block.start_line, block.end_line,
                block, block.wcs_blocks.len());
    block
}

/// Remove a closing `%` marker, and blank lines after it, from the end of the
/// block.  The boundary line itself is never taken.
fn split_sentinel(block: &mut OperationBlock) -> Vec<String> {
    let tail = block.raw_lines.iter().skip(1).rev()
        .take_while(|line| line.trim().is_empty() || line.trim() == "%")
        .count();
    let first = block.raw_lines.len() - tail;
    let cut = match block.raw_lines[first..].iter().position(|line| line.trim() == "%") {
        Some(pos) => first + pos,
        None => return vec![],
    };
    block.end_line -= block.raw_lines.len() - cut;
    block.raw_lines.split_off(cut)
}
