use thiserror::Error;

/// Error decoding or encoding a hosts file.
#[derive(Debug, Error)]
pub enum HostsError {
    /// A line that is neither blank nor a comment, but lacks a valid leading IP address or any
    /// hostname. Holds the offending line with surrounding whitespace trimmed.
    #[error("Invalid hostsfile entry: {0}")]
    MalformedEntry(String),
    /// The underlying stream failed while reading or writing.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
