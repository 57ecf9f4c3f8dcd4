//! Validation of names and limits before anything is added to a stack.
//!
//! Bucket naming follows the
//! [Amazon S3 rules](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html);
//! function limits follow the Lambda quotas page.

use std::net::Ipv4Addr;

use stackgen_model::resources::logs::VALID_RETENTION_DAYS;

use crate::error::{SynthError, SynthResult};

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Maximum stack name length.
const MAX_STACK_NAME_LEN: usize = 128;

/// Maximum construct ID length. Leaves room for the 8-digit hash suffix
/// inside CloudFormation's 255-character logical ID limit.
const MAX_CONSTRUCT_ID_LEN: usize = 200;

/// Lambda timeout bounds, in seconds.
pub const TIMEOUT_RANGE: (u32, u32) = (1, 900);

/// Lambda memory bounds, in megabytes.
pub const MEMORY_RANGE: (u32, u32) = (128, 10_240);

/// Reserved prefixes and suffixes S3 refuses in bucket names.
const RESERVED_PREFIXES: [&str; 2] = ["xn--", "sthree-"];
const RESERVED_SUFFIXES: [&str; 2] = ["-s3alias", "--ol-s3"];

/// Validate an S3 bucket name.
///
/// # Examples
///
/// ```
/// use stackgen_synth::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("translate-input-bucket").is_ok());
/// assert!(validate_bucket_name("Translate_Input").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> SynthResult<()> {
    let reject = |reason: String| {
        Err(SynthError::InvalidBucketName {
            name: name.to_owned(),
            reason,
        })
    };

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&name.len()) {
        return reject(format!(
            "must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
        ));
    }

    let bytes = name.as_bytes();
    let allowed = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !bytes.iter().all(|&b| allowed(b) || b == b'-' || b == b'.') {
        return reject("must only contain lowercase letters, numbers, hyphens, and dots".into());
    }
    if !allowed(bytes[0]) || !allowed(bytes[bytes.len() - 1]) {
        return reject("must start and end with a letter or number".into());
    }
    if name.contains("..") {
        return reject("must not contain consecutive dots".into());
    }
    if name.parse::<Ipv4Addr>().is_ok() {
        return reject("must not be formatted as an IP address".into());
    }
    if let Some(prefix) = RESERVED_PREFIXES.iter().find(|p| name.starts_with(*p)) {
        return reject(format!("must not start with '{prefix}'"));
    }
    if let Some(suffix) = RESERVED_SUFFIXES.iter().find(|s| name.ends_with(*s)) {
        return reject(format!("must not end with '{suffix}'"));
    }

    Ok(())
}

/// Validate a CloudFormation stack name: a letter followed by letters,
/// digits, or hyphens, at most 128 characters.
pub fn validate_stack_name(name: &str) -> SynthResult<()> {
    let reason = if name.is_empty() || name.len() > MAX_STACK_NAME_LEN {
        Some(format!("must be 1-{MAX_STACK_NAME_LEN} characters long"))
    } else if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Some("must start with a letter".to_owned())
    } else if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Some("must only contain letters, digits, and hyphens".to_owned())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SynthError::InvalidStackName {
            name: name.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validate a construct or output ID: ASCII alphanumeric, starting with a
/// letter. Logical IDs are derived from it, so nothing else is allowed.
pub fn validate_construct_id(id: &str) -> SynthResult<()> {
    let reason = if id.is_empty() || id.len() > MAX_CONSTRUCT_ID_LEN {
        Some(format!("must be 1-{MAX_CONSTRUCT_ID_LEN} characters long"))
    } else if !id.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Some("must start with a letter".to_owned())
    } else if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some("must only contain letters and digits".to_owned())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SynthError::InvalidConstructId {
            id: id.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validate a function timeout in seconds.
pub fn validate_timeout(function: &str, seconds: u32) -> SynthResult<()> {
    let (min, max) = TIMEOUT_RANGE;
    if (min..=max).contains(&seconds) {
        Ok(())
    } else {
        Err(SynthError::InvalidTimeout {
            function: function.to_owned(),
            seconds,
            min,
            max,
        })
    }
}

/// Validate a function memory size in megabytes.
pub fn validate_memory_size(function: &str, megabytes: u32) -> SynthResult<()> {
    let (min, max) = MEMORY_RANGE;
    if (min..=max).contains(&megabytes) {
        Ok(())
    } else {
        Err(SynthError::InvalidMemorySize {
            function: function.to_owned(),
            megabytes,
            min,
            max,
        })
    }
}

/// Validate a handler entry point: non-empty, no whitespace, at most 128
/// characters.
pub fn validate_handler(function: &str, handler: &str) -> SynthResult<()> {
    if handler.is_empty() || handler.len() > 128 || handler.chars().any(char::is_whitespace) {
        return Err(SynthError::InvalidHandler {
            function: function.to_owned(),
            handler: handler.to_owned(),
        });
    }
    Ok(())
}

/// Validate a log retention period against the values CloudWatch accepts.
pub fn validate_retention_days(days: u32) -> SynthResult<()> {
    if VALID_RETENTION_DAYS.contains(&days) {
        Ok(())
    } else {
        Err(SynthError::InvalidRetention(days))
    }
}
