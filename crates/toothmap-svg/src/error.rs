use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("Failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("XML parse error near byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Unbound namespace prefix '{0}'")]
    UnknownPrefix(String),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("Unexpected end tag </{0}>")]
    UnexpectedEnd(String),

    #[error("Found element <{0}> after the root element")]
    MultipleRoots(String),

    #[error("XML serialization error: {0}")]
    Serialize(#[from] io::Error),

    #[error("Serialized document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, SvgError>;

/// Wrap anything quick-xml reports (attribute, escape or encoding errors) with
/// the reader position it happened at.
pub(crate) fn xml_error(position: u64, err: impl Into<quick_xml::Error>) -> SvgError {
    SvgError::Xml {
        position,
        source: err.into(),
    }
}
