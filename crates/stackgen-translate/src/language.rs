//! Language codes accepted by Amazon Translate.
//!
//! A code is a two or three letter ISO 639 language, optionally followed by
//! an ISO 3166 region (`pt-PT`, `zh-TW`, `fr-CA`). The source language may
//! also be `auto`, which asks the function to detect it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{TranslateStackError, TranslateStackResult};

/// Source language value that requests language detection.
pub const AUTO: &str = "auto";

static LANGUAGE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Z]{2})?$").expect("language code pattern is valid"));

fn is_language_code(value: &str) -> bool {
    LANGUAGE_CODE.is_match(value)
}

/// A validated source language: `auto` or a language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLanguage(String);

impl SourceLanguage {
    /// Parse a source language.
    ///
    /// # Errors
    ///
    /// [`TranslateStackError::InvalidSourceLanguage`] for anything else.
    pub fn parse(value: &str) -> TranslateStackResult<Self> {
        if value == AUTO || is_language_code(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(TranslateStackError::InvalidSourceLanguage(value.to_owned()))
        }
    }

    /// Whether the language is detected at runtime.
    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.0 == AUTO
    }

    /// The code as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated target language. Never `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetLanguage(String);

impl TargetLanguage {
    /// Parse a target language.
    ///
    /// # Errors
    ///
    /// [`TranslateStackError::InvalidTargetLanguage`] for `auto` or a
    /// malformed code.
    pub fn parse(value: &str) -> TranslateStackResult<Self> {
        if is_language_code(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(TranslateStackError::InvalidTargetLanguage(value.to_owned()))
        }
    }

    /// The code as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source and target language of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    /// Source language.
    pub source: SourceLanguage,
    /// Target language.
    pub target: TargetLanguage,
}

impl LanguagePair {
    /// Parse and cross-check a language pair.
    ///
    /// # Errors
    ///
    /// Either code is invalid, or a fixed source equals the target
    /// ([`TranslateStackError::SameLanguage`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use stackgen_translate::language::LanguagePair;
    ///
    /// assert!(LanguagePair::parse("auto", "es").is_ok());
    /// assert!(LanguagePair::parse("en", "en").is_err());
    /// assert!(LanguagePair::parse("en", "auto").is_err());
    /// ```
    pub fn parse(source: &str, target: &str) -> TranslateStackResult<Self> {
        let source = SourceLanguage::parse(source)?;
        let target = TargetLanguage::parse(target)?;
        if source.as_str() == target.as_str() {
            return Err(TranslateStackError::SameLanguage(target.0));
        }
        Ok(Self { source, target })
    }
}
