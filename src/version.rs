//! SDK version identification.
//!
//! [`VERSION`] is fixed at compile time. [`user_agent`] builds the
//! User-Agent string future transports will send, so the API can attribute
//! traffic to SDK releases.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// SDK name used in the User-Agent string.
pub const SDK_NAME: &str = "reshadx-rust";

/// SDK version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cached User-Agent string (computed once on first access).
static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Error returned when a version string is not a `MAJOR.MINOR.PATCH` triple.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// The string does not have exactly three dot-separated components.
    #[error("expected MAJOR.MINOR.PATCH, got {0:?}")]
    Shape(String),

    /// A component is empty, non-numeric, has a leading zero, or overflows.
    #[error("invalid {component} component {value:?}")]
    Component {
        /// Which component failed (`major`, `minor` or `patch`).
        component: &'static str,
        /// The offending text.
        value: String,
    },
}

impl From<VersionError> for crate::Error {
    fn from(err: VersionError) -> Self {
        crate::Error::validation(err.to_string()).with_source(err)
    }
}

/// A semantic version triple.
///
/// Pre-release and build metadata (`-rc.1`, `+build.5`) are accepted and
/// ignored.
///
/// ```rust
/// use reshadx::Version;
///
/// let v: Version = "1.4.2-rc.1".parse().unwrap();
/// assert_eq!((v.major, v.minor, v.patch), (1, 4, 2));
/// assert!("1.4".parse::<Version>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    /// Incompatible API changes.
    pub major: u64,
    /// Backwards-compatible additions.
    pub minor: u64,
    /// Backwards-compatible fixes.
    pub patch: u64,
}

impl Version {
    /// Creates a version from its components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns the version of this SDK build.
    pub fn current() -> Result<Self, VersionError> {
        VERSION.parse()
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let without_build = s.split_once('+').map_or(s, |(core, _build)| core);
        let core = without_build
            .split_once('-')
            .map_or(without_build, |(core, _pre)| core);

        let mut parts = core.split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(VersionError::Shape(s.to_owned()));
        };

        Ok(Self {
            major: parse_component("major", major)?,
            minor: parse_component("minor", minor)?,
            patch: parse_component("patch", patch)?,
        })
    }
}

fn parse_component(component: &'static str, value: &str) -> Result<u64, VersionError> {
    let invalid = || VersionError::Component {
        component,
        value: value.to_owned(),
    };

    if value.is_empty()
        || !value.bytes().all(|b| b.is_ascii_digit())
        || (value.len() > 1 && value.starts_with('0'))
    {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Returns the User-Agent string for SDK requests.
///
/// Format: `reshadx-rust/1.0.0 (rust/1.92; linux/x86_64)`
///
/// The string is computed once and cached for subsequent calls.
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} ({}; {}/{})",
            SDK_NAME,
            VERSION,
            rust_version(),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

/// Returns a short SDK identifier for contexts with length limits.
///
/// Format: `reshadx-rust/1.0.0`
pub fn short_user_agent() -> String {
    format!("{}/{}", SDK_NAME, VERSION)
}

fn rust_version() -> &'static str {
    concat!("rust/", env!("CARGO_PKG_RUST_VERSION"))
}

fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}
