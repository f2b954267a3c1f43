//! Fault taxonomy for client operations.
//!
//! Raw status codes from the service are classified into [`Status`], which
//! keeps a catch-all variant so a newer service reporting codes this build
//! has never seen still maps to a well-formed error instead of a crash.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use service_traits::codes::status;
use service_traits::{MediaService, RawStatus};

pub type Result<T> = std::result::Result<T, Error>;

/// Classified service status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    BadApiVersion,
    InitFailed,
    InvalidArgument,
    PermissionDenied,
    NetworkDisabled,
    ServiceUnavailable,
    OtherTransient,
    OtherPermanent,
    IsLoading,
    NoCredentials,
    RateLimited,
    NoSuchObject,
    ReadOnly,
    SystemFailure,
    /// A code not present in the headers this build was compiled against.
    Unknown(i32),
}

impl Status {
    pub fn from_raw(raw: RawStatus) -> Self {
        match raw.code() {
            status::OK => Status::Ok,
            status::BAD_API_VERSION => Status::BadApiVersion,
            status::INIT_FAILED => Status::InitFailed,
            status::INVALID_ARGUMENT => Status::InvalidArgument,
            status::PERMISSION_DENIED => Status::PermissionDenied,
            status::NETWORK_DISABLED => Status::NetworkDisabled,
            status::SERVICE_UNAVAILABLE => Status::ServiceUnavailable,
            status::OTHER_TRANSIENT => Status::OtherTransient,
            status::OTHER_PERMANENT => Status::OtherPermanent,
            status::IS_LOADING => Status::IsLoading,
            status::NO_CREDENTIALS => Status::NoCredentials,
            status::RATE_LIMITED => Status::RateLimited,
            status::NO_SUCH_OBJECT => Status::NoSuchObject,
            status::READ_ONLY => Status::ReadOnly,
            status::SYSTEM_FAILURE => Status::SystemFailure,
            code => Status::Unknown(code),
        }
    }

    /// The numeric code as the service reported it.
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => status::OK,
            Status::BadApiVersion => status::BAD_API_VERSION,
            Status::InitFailed => status::INIT_FAILED,
            Status::InvalidArgument => status::INVALID_ARGUMENT,
            Status::PermissionDenied => status::PERMISSION_DENIED,
            Status::NetworkDisabled => status::NETWORK_DISABLED,
            Status::ServiceUnavailable => status::SERVICE_UNAVAILABLE,
            Status::OtherTransient => status::OTHER_TRANSIENT,
            Status::OtherPermanent => status::OTHER_PERMANENT,
            Status::IsLoading => status::IS_LOADING,
            Status::NoCredentials => status::NO_CREDENTIALS,
            Status::RateLimited => status::RATE_LIMITED,
            Status::NoSuchObject => status::NO_SUCH_OBJECT,
            Status::ReadOnly => status::READ_ONLY,
            Status::SystemFailure => status::SYSTEM_FAILURE,
            Status::Unknown(code) => code,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Unknown(code) => write!(f, "unknown status {code}"),
            other => write!(f, "{:?} ({})", other, other.code()),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The service reported a non-OK status.
    #[error("service call failed: {message} ({status})")]
    Service { status: Status, message: String },

    /// An object did not finish loading within the allotted time.
    #[error("object not loaded after {waited:?}")]
    LoadTimeout { waited: Duration },

    /// Index past the end of a container.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The URI did not resolve, or the object it names cannot be linked.
    #[error("invalid link: {0}")]
    InvalidLink(String),

    /// The service answered outside its documented contract.
    #[error("service contract violation: {0}")]
    ContractViolation(String),
}

impl Error {
    /// Builds a [`Error::Service`] for `raw`, asking the service for the
    /// human-readable message text.
    pub(crate) fn from_raw(svc: &Arc<dyn MediaService>, raw: RawStatus) -> Self {
        Error::Service {
            status: Status::from_raw(raw),
            message: svc.status_message(raw.code()),
        }
    }
}

/// Maps an OK status to `Ok(())` and everything else to a fault.
pub(crate) fn check(svc: &Arc<dyn MediaService>, raw: RawStatus) -> Result<()> {
    if raw.is_ok() {
        Ok(())
    } else {
        Err(Error::from_raw(svc, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_classify_by_name() {
        assert_eq!(Status::from_raw(RawStatus(status::OK)), Status::Ok);
        assert_eq!(
            Status::from_raw(RawStatus(status::RATE_LIMITED)),
            Status::RateLimited
        );
    }

    #[test]
    fn unknown_codes_survive_classification() {
        let status = Status::from_raw(RawStatus(999));
        assert_eq!(status, Status::Unknown(999));
        assert_eq!(status.code(), 999);
        assert_eq!(status.to_string(), "unknown status 999");
    }

    #[test]
    fn code_round_trips_for_every_named_variant() {
        for code in 0..=14 {
            assert_eq!(Status::from_raw(RawStatus(code)).code(), code);
        }
    }
}
