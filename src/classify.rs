// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Splitting an operation into header, WCS blocks and footer.

use strum_macros::Display;

use crate::ast::{OperationBlock, WcsBlock};
use crate::lex::Line;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
enum State {
    BeforeWcs,
    InWcs,
    InFooter,
}

/// Fill `header_lines`, `wcs_blocks` and `footer_lines` from `raw_lines`.
///
/// Everything up to the first WCS selection is header.  Each selection opens
/// a new WCS block.  Once a WCS block exists, a footer trigger (stop, spindle
/// or coolant off, reference return, program end) starts the footer, which
/// then takes all remaining lines.  A line that is both a WCS selection and
/// a footer trigger is treated as a footer trigger.
pub fn classify(block: &mut OperationBlock) {
    block.header_lines.clear();
    block.wcs_blocks.clear();
    block.footer_lines.clear();

    let mut state = State::BeforeWcs;
    let mut current: Option<WcsBlock> = None;

    for (offset, text) in block.raw_lines.iter().enumerate() {
        let lineno = block.start_line + offset;
        if state != State::InFooter {
            let line = Line::lex(text);
            let footer = line.is_footer_trigger();
            match line.wcs_code() {
                Some(code) if !footer => {
                    block.wcs_blocks.extend(current.take());
                    log::debug!("line {}: {} block", lineno, code);
                    current = Some(WcsBlock {
                        wcs_code: code,
                        start_line: lineno,
                        end_line: lineno,
                        lines: vec![],
                    });
                    state = State::InWcs;
                }
                _ if footer && state == State::InWcs => {
                    block.wcs_blocks.extend(current.take());
                    log::debug!("line {}: footer starts", lineno);
                    state = State::InFooter;
                }
                _ => (),
            }
        }

        log::trace!("line {}: {}", lineno, state);
        match (state, current.as_mut()) {
            (State::BeforeWcs, _) => block.header_lines.push(text.clone()),
            (State::InWcs, Some(wcs)) => {
                wcs.end_line = lineno;
                wcs.lines.push(text.clone());
            }
            // an open WCS block should always exist here
            (State::InWcs, None) |
            (State::InFooter, _) => block.footer_lines.push(text.clone()),
        }
    }

    block.wcs_blocks.extend(current);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> OperationBlock {
        let mut block = OperationBlock {
            start_line: 1,
            raw_lines: text.lines().map(String::from).collect(),
            ..Default::default()
        };
        classify(&mut block);
        assert!(block.is_partitioned());
        block
    }

    #[test]
    fn test_regions() {
        let op = block("N1 T1 M6\nG0 X0\nG54 G0 X1\nG1 X2\nG55\nG1 X3\nM5\nG28 Z0");
        assert_eq!(op.header_lines, ["N1 T1 M6", "G0 X0"]);
        assert_eq!(op.wcs_blocks.len(), 2);
        assert_eq!(op.wcs_blocks[0].wcs_code, "G54");
        assert_eq!(op.wcs_blocks[0].lines, ["G54 G0 X1", "G1 X2"]);
        assert_eq!((op.wcs_blocks[0].start_line, op.wcs_blocks[0].end_line), (3, 4));
        assert_eq!(op.wcs_blocks[1].lines, ["G55", "G1 X3"]);
        assert_eq!((op.wcs_blocks[1].start_line, op.wcs_blocks[1].end_line), (5, 6));
        assert_eq!(op.footer_lines, ["M5", "G28 Z0"]);
    }

    #[test]
    fn test_footer_before_wcs_is_header() {
        let op = block("N1\nM5\nG54\nX1");
        assert_eq!(op.header_lines, ["N1", "M5"]);
        assert_eq!(op.wcs_blocks[0].lines, ["G54", "X1"]);
        assert!(op.footer_lines.is_empty());
    }

    #[test]
    fn test_footer_wins_over_wcs() {
        let op = block("N1\nG54\nX1\nG55 M9\nX2");
        assert_eq!(op.wcs_blocks.len(), 1);
        assert_eq!(op.footer_lines, ["G55 M9", "X2"]);
        // ...and before any WCS block, such a line is header
        let op = block("N1\nG54 M1\nX1");
        assert!(op.wcs_blocks.is_empty());
        assert_eq!(op.header_lines.len(), 3);
    }

    #[test]
    fn test_footer_is_terminal() {
        let op = block("N1\nG54\nX1\nM9\nG55\nX2");
        assert_eq!(op.wcs_blocks.len(), 1);
        assert_eq!(op.footer_lines, ["M9", "G55", "X2"]);
    }

    #[test]
    fn test_no_wcs() {
        let op = block("N1 T3 M6\nG0 X1\nM30");
        assert_eq!(op.header_lines.len(), 3);
        assert!(op.wcs_blocks.is_empty());
        assert!(op.footer_lines.is_empty());
    }

    #[test]
    fn test_reclassify() {
        let mut op = block("N1\nG54\nX1\nM5");
        classify(&mut op);
        assert_eq!(op.header_lines, ["N1"]);
        assert_eq!(op.wcs_blocks.len(), 1);
        assert_eq!(op.footer_lines, ["M5"]);
    }
}
