//! Error types for resource parsing, table insertion and artifact resolution.
//!
//! Every fallible operation returns [`crate::Result`]. Parsers build
//! [`Error::Malformed`] through `malformed_error!`, which records where the error was raised.

use thiserror::Error;

use crate::resource::{ResourceId, ResourceName};

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Library operations never abort; they report failures through this enum. Only the fixture
/// builders in [`crate::testing`] turn errors into panics.
///
/// # Error Categories
///
/// ## Input Errors
/// - [`Error::Malformed`] - Structurally invalid input (XML, argument files, formats)
/// - [`Error::InvalidResourceName`] - A resource name that does not parse or validate
/// - [`Error::InvalidConfig`] - A configuration qualifier string that does not parse
/// - [`Error::InvalidResourceId`] - An identifier with a zero type id
///
/// ## Table Errors
/// - [`Error::DuplicateValue`] - Two strong values for the same name and configuration
/// - [`Error::ConflictingId`] - An identifier that clashes with an existing assignment
/// - [`Error::IdInUse`] - An identifier already owned by another entry
/// - [`Error::DuplicateOverlayable`] - A second overlayable declaration for one entry
///
/// ## Post-processing Errors
/// - [`Error::Artifact`] - A configured artifact that can not be resolved
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// # Examples
///
/// ```rust
/// use restable::{Error, resource::ResourceName};
///
/// match ResourceName::parse("string") {
///     Ok(name) => println!("parsed {name}"),
///     Err(Error::InvalidResourceName(name)) => eprintln!("not a resource name: {name}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The string is not a valid `[package:]type/entry` resource name, or the entry name
    /// contains characters that are not allowed.
    #[error("invalid resource name '{0}'")]
    InvalidResourceName(String),

    /// The string is not a valid sequence of configuration qualifiers.
    #[error("invalid configuration '{0}'")]
    InvalidConfig(String),

    /// The resource identifier has a zero type id.
    #[error("invalid resource id {0}")]
    InvalidResourceId(ResourceId),

    /// A second strong value was added for a name and configuration that already has one.
    #[error("duplicate value for resource '{name}' with config '{config}'")]
    DuplicateValue {
        /// The resource that already holds a value
        name: ResourceName,
        /// Qualifier string of the conflicting configuration
        config: String,
    },

    /// The identifier differs from the one already assigned to the entry.
    #[error("resource '{name}' has conflicting id {incoming} (already {existing})")]
    ConflictingId {
        /// The resource being added
        name: ResourceName,
        /// The identifier that was already present
        existing: ResourceId,
        /// The identifier that was requested
        incoming: ResourceId,
    },

    /// The identifier is already assigned to a different entry.
    #[error("resource '{name}' can not take id {id}, it is used by '{owner}'")]
    IdInUse {
        /// The identifier that was requested
        id: ResourceId,
        /// The resource being added
        name: ResourceName,
        /// The resource that already owns the identifier
        owner: ResourceName,
    },

    /// The entry was already declared overlayable.
    #[error("duplicate overlayable declaration for resource '{0}'")]
    DuplicateOverlayable(ResourceName),

    /// A configured artifact referenced a missing group or produced an invalid name.
    #[error("{0}")]
    Artifact(String),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur during file operations
    /// such as reading from disk, permission issues, or filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
