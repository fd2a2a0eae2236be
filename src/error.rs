// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Errors at the file boundary.  Parsing itself cannot fail.

use std::{fs, io, path::{Path, PathBuf}};
use thiserror::Error;

use crate::config::SegmentOptions;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid options in {}: {}", .path.display(), .source)]
    Config { path: PathBuf, source: serde_json::Error },

    #[error("cannot serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn usage<T>(msg: impl Into<String>) -> Result<T> {
        Err(Error::Usage(msg.into()))
    }
}

pub fn read_program(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| Error::Io { path: path.into(), source })
}

/// Load segmenter options from a JSON file; missing fields take defaults.
pub fn load_options(path: impl AsRef<Path>) -> Result<SegmentOptions> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io { path: path.into(), source })?;
    serde_json::from_str(&text).map_err(|source| Error::Config { path: path.into(), source })
}
