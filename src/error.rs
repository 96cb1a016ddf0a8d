//! Errors raised while collecting input for an edit distance computation.
//!
//! The table builder and the aligner are total over every pair of finite
//! sequences, so nothing in `cs::dynamic` returns these. They describe the
//! ways the command-line driver can fail to obtain its two strings or to
//! print the result.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read the {what} string: {source}")]
    Io {
        what: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("the {what} string is not valid UTF-8: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("failed to write the result: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
