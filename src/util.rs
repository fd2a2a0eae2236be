// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


/// Split text into lines at `\r\n`, `\r` or `\n`, keeping everything else
/// verbatim.  Empty input has no lines; a final line ending yields a final
/// empty line, so joining with `\n` gives the text back.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => (),
        }
        i += 1;
    }
    lines.push(&text[start..]);
    lines
}
