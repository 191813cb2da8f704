/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_credential_types::provider::error::CredentialsError;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
use aws_sdk_sns::operation::publish::PublishError;
use aws_smithy_types::error::metadata::{ErrorMetadata, ProvideErrorMetadata};

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// When the error originated from an AWS service call the service's error code and message are
/// available through [`ProvideErrorMetadata`].
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
    meta: ErrorMetadata,
}

/// General categories of scanner errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required setting is missing or empty
    ConfigurationInvalid,

    /// The bucket could not be listed
    StorageAccess(StorageAccess),

    /// Generic failure talking to an AWS service (network, throttling, unclassified service error)
    Transport,

    /// Credentials could not be resolved or were rejected
    CredentialsUnavailable,

    /// Operation input is incomplete or malformed
    ValidationFailed,

    /// The notification topic does not exist
    TopicNotFound,

    /// The scan hit the configured page ceiling before the listing was exhausted
    ScanIncomplete,
}

/// Reason a bucket listing was refused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum StorageAccess {
    /// The bucket does not exist
    NoSuchBucket,

    /// The caller is not allowed to list the bucket
    AccessDenied,

    /// The bucket name is not a valid S3 bucket name
    InvalidBucketName,
}

impl Error {
    /// Creates a new scanner [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
            meta: ErrorMetadata::default(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Replace the service error code/message attached to this error.
    pub(crate) fn with_metadata(mut self, meta: ErrorMetadata) -> Self {
        self.meta = meta;
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::ConfigurationInvalid => write!(f, "invalid configuration"),
            ErrorKind::StorageAccess(StorageAccess::NoSuchBucket) => write!(f, "bucket not found"),
            ErrorKind::StorageAccess(StorageAccess::AccessDenied) => {
                write!(f, "access denied to bucket")
            }
            ErrorKind::StorageAccess(StorageAccess::InvalidBucketName) => {
                write!(f, "invalid bucket name")
            }
            ErrorKind::Transport => write!(f, "service request failed"),
            ErrorKind::CredentialsUnavailable => write!(f, "credentials unavailable"),
            ErrorKind::ValidationFailed => write!(f, "validation failed"),
            ErrorKind::TopicNotFound => write!(f, "topic not found"),
            ErrorKind::ScanIncomplete => write!(f, "scan incomplete"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl ProvideErrorMetadata for Error {
    fn meta(&self) -> &ErrorMetadata {
        &self.meta
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::ValidationFailed, value)
    }
}

pub(crate) fn invalid_configuration<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ConfigurationInvalid, err)
}

pub(crate) fn validation_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ValidationFailed, err)
}

pub(crate) fn scan_incomplete<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ScanIncomplete, err)
}

/// Service error codes that mean the request was signed with missing, expired or unknown credentials.
const CREDENTIAL_ERROR_CODES: &[&str] = &[
    "InvalidAccessKeyId",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "UnrecognizedClientException",
    "MissingAuthenticationToken",
];

fn is_credentials_failure<E, R>(err: &SdkError<E, R>) -> bool
where
    E: std::error::Error + ProvideErrorMetadata + 'static,
    R: fmt::Debug + 'static,
{
    if matches!(err.code(), Some(code) if CREDENTIAL_ERROR_CODES.contains(&code)) {
        return true;
    }

    // identity resolution failures surface as a `CredentialsError` somewhere in the chain
    let mut next: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(err) = next {
        if err.is::<CredentialsError>() {
            return true;
        }
        next = err.source();
    }
    false
}

fn metadata_of<E: ProvideErrorMetadata>(err: &E) -> ErrorMetadata {
    let mut builder = ErrorMetadata::builder();
    if let Some(code) = err.code() {
        builder = builder.code(code);
    }
    if let Some(message) = err.message() {
        builder = builder.message(message);
    }
    builder.build()
}

impl<R> From<SdkError<ListObjectsV2Error, R>> for Error
where
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: SdkError<ListObjectsV2Error, R>) -> Self {
        let meta = metadata_of(&value);
        let kind = if is_credentials_failure(&value) {
            ErrorKind::CredentialsUnavailable
        } else {
            match value.code() {
                Some("NoSuchBucket") => ErrorKind::StorageAccess(StorageAccess::NoSuchBucket),
                Some("AccessDenied" | "AllAccessDisabled") => {
                    ErrorKind::StorageAccess(StorageAccess::AccessDenied)
                }
                Some("InvalidBucketName") => {
                    ErrorKind::StorageAccess(StorageAccess::InvalidBucketName)
                }
                _ if value
                    .as_service_error()
                    .is_some_and(ListObjectsV2Error::is_no_such_bucket) =>
                {
                    ErrorKind::StorageAccess(StorageAccess::NoSuchBucket)
                }
                _ => ErrorKind::Transport,
            }
        };

        Error::new(kind, value).with_metadata(meta)
    }
}

impl<R> From<SdkError<PublishError, R>> for Error
where
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: SdkError<PublishError, R>) -> Self {
        let meta = metadata_of(&value);
        let kind = if is_credentials_failure(&value) {
            ErrorKind::CredentialsUnavailable
        } else if value.code() == Some("NotFound")
            || value
                .as_service_error()
                .is_some_and(PublishError::is_not_found_exception)
        {
            ErrorKind::TopicNotFound
        } else {
            ErrorKind::Transport
        };

        Error::new(kind, value).with_metadata(meta)
    }
}

#[cfg(test)]
mod tests {
    use aws_credential_types::provider::error::CredentialsError;
    use aws_sdk_s3::error::SdkError;
    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
    use aws_sdk_sns::operation::publish::PublishError;
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;
    use aws_smithy_types::error::metadata::{ErrorMetadata, ProvideErrorMetadata};

    use super::{Error, ErrorKind, StorageAccess};

    fn http_resp(status: u16) -> HttpResponse {
        HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    fn list_error(code: &str, message: &str, status: u16) -> Error {
        let err = ListObjectsV2Error::generic(
            ErrorMetadata::builder().code(code).message(message).build(),
        );
        SdkError::service_error(err, http_resp(status)).into()
    }

    fn publish_error(code: &str) -> Error {
        let err = PublishError::generic(ErrorMetadata::builder().code(code).build());
        SdkError::service_error(err, http_resp(404)).into()
    }

    #[test]
    fn test_list_error_classification() {
        let err = list_error("NoSuchBucket", "The specified bucket does not exist", 404);
        assert_eq!(
            &ErrorKind::StorageAccess(StorageAccess::NoSuchBucket),
            err.kind()
        );
        assert_eq!(Some("NoSuchBucket"), err.code());
        assert_eq!(Some("The specified bucket does not exist"), err.message());

        let err = list_error("AccessDenied", "Access Denied", 403);
        assert_eq!(
            &ErrorKind::StorageAccess(StorageAccess::AccessDenied),
            err.kind()
        );

        let err = list_error("InvalidBucketName", "The specified bucket is not valid.", 400);
        assert_eq!(
            &ErrorKind::StorageAccess(StorageAccess::InvalidBucketName),
            err.kind()
        );

        let err = list_error("SlowDown", "Please reduce your request rate.", 503);
        assert_eq!(&ErrorKind::Transport, err.kind());
        assert_eq!(Some("SlowDown"), err.code());
    }

    #[test]
    fn test_credential_codes_are_detected() {
        let err = list_error("InvalidAccessKeyId", "The AWS Access Key Id does not exist", 403);
        assert_eq!(&ErrorKind::CredentialsUnavailable, err.kind());

        let err = publish_error("InvalidClientTokenId");
        assert_eq!(&ErrorKind::CredentialsUnavailable, err.kind());
    }

    #[test]
    fn test_missing_credentials_in_source_chain() {
        let sdk_err: SdkError<ListObjectsV2Error, HttpResponse> = SdkError::construction_failure(
            CredentialsError::not_loaded("no providers in chain provided credentials"),
        );
        let err: Error = sdk_err.into();
        assert_eq!(&ErrorKind::CredentialsUnavailable, err.kind());
        assert_eq!(None, err.code());
    }

    #[test]
    fn test_publish_not_found_is_topic_not_found() {
        assert_eq!(&ErrorKind::TopicNotFound, publish_error("NotFound").kind());
        assert_eq!(&ErrorKind::Transport, publish_error("Throttling").kind());
    }

    #[test]
    fn test_build_error_is_validation_failure() {
        let err: Error =
            aws_smithy_types::error::operation::BuildError::missing_field("bucket", "required")
                .into();
        assert_eq!(&ErrorKind::ValidationFailed, err.kind());
        assert!(std::error::Error::source(&err).is_some());
    }
}
