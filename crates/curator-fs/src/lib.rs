//! Filesystem primitives for Curator
//!
//! Provides non-recursive folder scanning with inclusion rules, natural
//! filename ordering, content fingerprints, and atomic I/O.

pub mod error;
pub mod fingerprint;
pub mod io;
pub mod natural;
pub mod scan;

pub use error::{Error, Result};
pub use fingerprint::{content_fingerprint, file_fingerprint};
pub use io::read_text;
pub use natural::natural_cmp;
pub use scan::{DEFAULT_EXTENSIONS, FileRecord, ScanFilter, ScanOutcome, expand_inputs, scan_folder};
