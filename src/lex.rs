// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Tokenizing single lines of G-code, and the predicates built on top.
//!
//! Only whole words count: `G540` or `1G54` never yield a `G54` word, while
//! glued codes like `G90G54` are split up as usual.  Codes inside comments
//! are ignored.

use itertools::Itertools;
use pest_derive::Parser;
use pest::{Parser, iterators::Pair};

use crate::config::BoundaryStrategy;

#[derive(Parser)]
#[grammar = "gcode.pest"]
pub struct LineParser;

/// A letter with its number, e.g. `G54.1` or `X-10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    /// Always upper case.
    pub letter: char,
    pub value: &'a str,
}

impl<'a> Word<'a> {
    /// The value as an integer, if it is written with plain digits only.
    pub fn int_value(&self) -> Option<u32> {
        if self.value.bytes().all(|b| b.is_ascii_digit()) {
            self.value.parse().ok()
        } else {
            None
        }
    }

    fn is_code(&self, letter: char, codes: &[u32]) -> bool {
        self.letter == letter && self.int_value().map_or(false, |n| codes.contains(&n))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Word(Word<'a>),
    /// Text of a `(...)` or `;...` comment.
    Comment(&'a str),
    /// A `(TOOL n: description)` comment.
    ToolComment { number: &'a str, description: &'a str },
    Other(&'a str),
}

/// One lexed line of G-code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line<'a> {
    /// Digits of a leading `N` word.
    pub number: Option<&'a str>,
    pub tokens: Vec<Token<'a>>,
}

const TOOL_CHANGE: &[u32] = &[6];
const FOOTER_MCODES: &[u32] = &[0, 1, 2, 5, 9, 30, 99];
const FOOTER_GCODES: &[u32] = &[28, 30];
const WCS_GCODES: &[u32] = &[54, 55, 56, 57, 58, 59];

fn make_token(pair: Pair<'_, Rule>) -> Option<Token<'_>> {
    Some(match pair.as_rule() {
        Rule::word => {
            let (letter, value) = pair.into_inner().collect_tuple()?;
            Token::Word(Word {
                letter: letter.as_str().chars().next()?.to_ascii_uppercase(),
                value: value.as_str(),
            })
        }
        Rule::tool_comment => {
            let (number, description) = pair.into_inner().collect_tuple()?;
            Token::ToolComment { number: number.as_str(), description: description.as_str().trim() }
        }
        Rule::comment | Rule::line_comment => {
            Token::Comment(pair.into_inner().next().map_or("", |text| text.as_str()))
        }
        Rule::bare | Rule::other => Token::Other(pair.as_str()),
        _ => return None,
    })
}

impl<'a> Line<'a> {
    /// Tokenize a line.  The grammar accepts anything, but should pest still
    /// refuse a line, it is treated as carrying no codes at all.
    pub fn lex(text: &'a str) -> Self {
        let mut line = Line::default();
        let pairs = match LineParser::parse(Rule::line, text) {
            Ok(mut pairs) => match pairs.next() {
                Some(pair) => pair.into_inner(),
                None => return line,
            },
            Err(e) => {
                log::warn!("could not tokenize line {:?}: {}", text, e);
                return line;
            }
        };
        for pair in pairs {
            match pair.as_rule() {
                Rule::line_number => line.number = pair.into_inner().next().map(|n| n.as_str()),
                Rule::EOI => (),
                _ => line.tokens.extend(make_token(pair)),
            }
        }
        line
    }

    pub fn words(&self) -> impl Iterator<Item = &Word<'a>> + '_ {
        self.tokens.iter().filter_map(|tok| match tok {
            Token::Word(w) => Some(w),
            _ => None,
        })
    }

    pub fn comments(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.iter().filter_map(|tok| match *tok {
            Token::Comment(text) => Some(text),
            _ => None,
        })
    }

    /// Value of the leading line number, 0 if absent or out of range.
    pub fn ordinal(&self) -> u32 {
        self.number.and_then(|n| n.parse().ok()).unwrap_or(0)
    }

    pub fn has_tool_change(&self) -> bool {
        self.words().any(|w| w.is_code('M', TOOL_CHANGE))
    }

    pub fn is_boundary(&self, strategy: BoundaryStrategy) -> bool {
        let numbered = match strategy {
            BoundaryStrategy::LineNumberOrToolChange => self.number.is_some(),
            BoundaryStrategy::Annotated =>
                self.number.is_some() && self.tokens.iter().any(|tok| match tok {
                    Token::Comment(_) | Token::ToolComment { .. } => true,
                    _ => false,
                }),
        };
        numbered || self.has_tool_change()
    }

    /// Stops, spindle/coolant off, reference returns and program ends.
    pub fn is_footer_trigger(&self) -> bool {
        self.words().any(|w| w.is_code('M', FOOTER_MCODES) || w.is_code('G', FOOTER_GCODES))
    }

    /// The coordinate system selected on this line, like `G55` or `G54.1 P3`.
    pub fn wcs_code(&self) -> Option<String> {
        let words = self.words().collect_vec();
        let (pos, code) = words.iter().enumerate().find_map(|(i, w)| {
            if w.is_code('G', WCS_GCODES) {
                w.int_value().map(|n| (i, n.to_string()))
            } else if w.letter == 'G' && is_g54_1(w.value) {
                Some((i, "54.1".into()))
            } else {
                None
            }
        })?;
        match words.get(pos + 1) {
            Some(next) if next.letter == 'P' && next.int_value().is_some() =>
                Some(format!("G{} P{}", code, next.value)),
            _ => Some(format!("G{}", code)),
        }
    }

    /// Tool number and description from a `(TOOL n: ...)` comment.
    pub fn tool_comment(&self) -> Option<(String, &'a str)> {
        self.tokens.iter().find_map(|tok| match *tok {
            Token::ToolComment { number, description } => Some((format!("T{}", number), description)),
            _ => None,
        })
    }

    /// A bare tool selection word like `T12`.
    pub fn tool_word(&self) -> Option<String> {
        self.words()
            .find(|w| w.letter == 'T' && w.int_value().is_some())
            .map(|w| format!("T{}", w.value))
    }

    /// The operation name from a comment like `(OPERATION 3: POCKET)`.
    pub fn operation_name(&self) -> Option<&'a str> {
        self.comments().find_map(|text| {
            if !text.to_ascii_uppercase().contains("OPERATION") {
                return None;
            }
            let name = text.splitn(2, ':').nth(1)?.trim();
            if name.is_empty() { None } else { Some(name) }
        })
    }
}

fn is_g54_1(value: &str) -> bool {
    let mut parts = value.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");
    whole.trim_start_matches('0') == "54" && frac.trim_end_matches('0') == "1"
}

/// Does this line open a new operation (default boundary strategy)?
pub fn is_operation_boundary(line: &str) -> bool {
    Line::lex(line).is_boundary(BoundaryStrategy::default())
}

pub fn is_footer_trigger(line: &str) -> bool {
    Line::lex(line).is_footer_trigger()
}

pub fn wcs_start_of(line: &str) -> Option<String> {
    Line::lex(line).wcs_code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        let line = Line::lex("  n10 g90G54 x-1.5(G55) ; M30");
        assert_eq!(line.number, Some("10"));
        assert_eq!(line.ordinal(), 10);
        let words = line.words().map(|w| format!("{}{}", w.letter, w.value)).collect_vec();
        assert_eq!(words, ["G90", "G54", "X-1.5"]);
        assert_eq!(line.comments().collect_vec(), ["G55", " M30"]);
    }

    #[test]
    fn test_whole_tokens() {
        for text in &["G540", "X1054.5", "1G54", "AG54", "G154", "(G54)", "G5.4", "G54.2"] {
            assert_eq!(wcs_start_of(text), None, "{}", text);
        }
        for text in &["M60", "M300", "M05.5", "G280", "G28.1", "(M30)", "1M9", "M3"] {
            assert!(!is_footer_trigger(text), "{}", text);
        }
        for text in &["M16", "M600", "XM6", "(M6)", "G6"] {
            assert!(!is_operation_boundary(text), "{}", text);
        }
    }

    #[test]
    fn test_predicates() {
        assert_eq!(wcs_start_of("G0 G55 X1"), Some("G55".into()));
        assert_eq!(wcs_start_of("g90g59"), Some("G59".into()));
        assert_eq!(wcs_start_of("G54.1 P12"), Some("G54.1 P12".into()));
        assert_eq!(wcs_start_of("G54.1P2 X0"), Some("G54.1 P2".into()));
        assert_eq!(wcs_start_of("G57 X0"), Some("G57".into()));
        for text in &["M0", "M00", "M01", "M2", "m5", "M09", "M30", "M99", "G28 G91 Z0", "G30", "G0M5"] {
            assert!(is_footer_trigger(text), "{}", text);
        }
        for text in &["N1", " N20 G0", "T1 M6", "M06", "T2M06"] {
            assert!(is_operation_boundary(text), "{}", text);
        }
        assert!(!is_operation_boundary("G1 N5"));
    }

    #[test]
    fn test_annotated_boundary() {
        assert!(!Line::lex("N10 G1 X5").is_boundary(BoundaryStrategy::Annotated));
        assert!(Line::lex("N10 (FACE MILL)").is_boundary(BoundaryStrategy::Annotated));
        assert!(Line::lex("T3 M6").is_boundary(BoundaryStrategy::Annotated));
    }

    #[test]
    fn test_metadata() {
        let line = Line::lex("(TOOL 12 : 3.4 DRILL )");
        assert_eq!(line.tool_comment(), Some(("T12".into(), "3.4 DRILL")));
        assert_eq!(Line::lex("(TOOL CHANGE)").tool_comment(), None);
        assert_eq!(Line::lex("T07 M6").tool_word(), Some("T07".into()));
        assert_eq!(Line::lex("(TOOL 5: X)").tool_word(), None);
        assert_eq!(Line::lex("(Operation 2: HOLES )").operation_name(), Some("HOLES"));
        assert_eq!(Line::lex("(OPERATION 2)").operation_name(), None);
        assert_eq!(Line::lex("(CONTOUR: X)").operation_name(), None);
    }

    #[test]
    fn test_total() {
        for text in &["", "   ", "(", "((", ")", ";", "%", "#1=[2*3]", "ÄÖ\u{feff}", "N", "N99999999999"] {
            let line = Line::lex(text);
            assert!(line.wcs_code().is_none());
        }
        assert_eq!(Line::lex("N99999999999").ordinal(), 0);
    }
}
