/// Errors that can occur while reading or writing a peak list document
#[derive(Debug, thiserror::Error)]
pub enum PeakListError {
    /// I/O error reading or writing the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Element or attribute names that are not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The document has no root element
    #[error("Document has no root element")]
    EmptyDocument,

    /// A numeric or timestamp attribute is present but cannot be coerced
    #[error("Invalid value {value:?} for attribute '{attribute}' on <{element}>: {reason}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        reason: String,
    },
}

impl From<quick_xml::events::attributes::AttrError> for PeakListError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        PeakListError::Xml(quick_xml::Error::from(e))
    }
}

pub type Result<T> = std::result::Result<T, PeakListError>;
