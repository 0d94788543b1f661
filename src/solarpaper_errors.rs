use thiserror::Error;

use crate::constants::JulianDate;

#[derive(Error, Debug)]
pub enum SolarpaperError {
    #[error(
        "Truncated record {} at byte offset {offset}: not enough bytes for field `{field}`",
        .spkid.as_deref().unwrap_or("?")
    )]
    TruncatedRecord {
        offset: usize,
        /// Known once the identifier itself has been read.
        spkid: Option<String>,
        field: &'static str,
    },

    #[error("Dataset header is missing or shorter than 8 bytes")]
    InvalidHeader,

    #[error("Unknown orbit kind {value} in record {spkid} at byte offset {offset}")]
    UnknownKind {
        offset: usize,
        spkid: String,
        value: u32,
    },

    #[error("Reference body {center} of {spkid} (byte offset {offset}) has not been seen yet")]
    MissingReferenceBody {
        offset: usize,
        spkid: String,
        center: String,
    },

    #[error("Dataset is stale: valid until JD {valid_until}, now is JD {now}")]
    StaleDataset {
        valid_until: JulianDate,
        now: JulianDate,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to read the system clock: {0}")]
    TimeError(#[from] hifitime::HifitimeError),

    #[error("Unable to serialize drawing commands: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SolarpaperError {
    /// Whether the error is local to one record, the pass can continue with the next one.
    pub fn is_record_local(&self) -> bool {
        matches!(self, SolarpaperError::MissingReferenceBody { .. })
    }
}

impl PartialEq for SolarpaperError {
    fn eq(&self, other: &Self) -> bool {
        use SolarpaperError::*;
        match (self, other) {
            (
                TruncatedRecord {
                    offset: a,
                    spkid: sa,
                    field: fa,
                },
                TruncatedRecord {
                    offset: b,
                    spkid: sb,
                    field: fb,
                },
            ) => a == b && sa == sb && fa == fb,
            (InvalidHeader, InvalidHeader) => true,
            (
                UnknownKind {
                    offset: a,
                    spkid: sa,
                    value: va,
                },
                UnknownKind {
                    offset: b,
                    spkid: sb,
                    value: vb,
                },
            ) => a == b && sa == sb && va == vb,
            (
                MissingReferenceBody {
                    offset: a,
                    spkid: sa,
                    center: ca,
                },
                MissingReferenceBody {
                    offset: b,
                    spkid: sb,
                    center: cb,
                },
            ) => a == b && sa == sb && ca == cb,
            (
                StaleDataset {
                    valid_until: a,
                    now: na,
                },
                StaleDataset {
                    valid_until: b,
                    now: nb,
                },
            ) => a == b && na == nb,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,

            // not comparable: equal when same variant
            (TomlError(_), TomlError(_)) => true,
            (IoError(_), IoError(_)) => true,
            (TimeError(_), TimeError(_)) => true,
            (JsonError(_), JsonError(_)) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod solarpaper_errors_test {
    use super::*;

    #[test]
    fn test_record_context_in_messages() {
        let err = SolarpaperError::TruncatedRecord {
            offset: 96,
            spkid: Some("2000001".into()),
            field: "x",
        };
        assert_eq!(
            err.to_string(),
            "Truncated record 2000001 at byte offset 96: not enough bytes for field `x`"
        );

        let err = SolarpaperError::MissingReferenceBody {
            offset: 8,
            spkid: "501".into(),
            center: "599".into(),
        };
        assert!(err.is_record_local());
        assert_eq!(
            err.to_string(),
            "Reference body 599 of 501 (byte offset 8) has not been seen yet"
        );
    }
}
