//! Domain types, ports and services.
//!
//! Nothing here knows about HTTP, SQL or provider wire formats. Inbound
//! adapters call the driving ports ([`ports::IdentificationPipeline`],
//! [`ports::Authenticator`], [`ports::CaptureCommand`],
//! [`ports::CaptureQuery`]); outbound adapters implement the driven ones.

pub mod account;
pub mod account_service;
pub mod capture;
pub mod capture_service;
pub mod error;
pub mod identification;
pub mod identification_service;
pub mod normalizer;
pub mod ports;
pub mod trace_id;

pub use self::account::{
    Credentials, CredentialsValidationError, DEFAULT_TIER, UserAccount, UserId,
};
pub use self::account_service::AccountService;
pub use self::capture::CaptureRecord;
pub use self::capture_service::CaptureService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identification::{
    Confidence, DEFAULT_ORGANS, IdentificationResult, ImagePayload, ImagePayloadError,
    ProviderKind, ProviderOptions, ProviderRawReply,
};
pub use self::identification_service::IdentificationService;
pub use self::normalizer::{NormalizeError, normalize};
pub use self::trace_id::TraceId;
