// Copyright (C) 2025 The Telenum Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

use crate::regex_cache::InvalidRegexError;

/// The five ways parsing can fail. These are values to branch on, never
/// panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    /// No `+`, no recognizable IDD, and the default region supplied no
    /// usable country code — or the digits after a `+` match no known
    /// country code.
    #[error("Invalid country code")]
    InvalidCountryCode,
    /// The input does not look like a phone number at all (or carries an
    /// invalid RFC 3966 phone-context).
    #[error("The string supplied did not seem to be a phone number")]
    NotANumber,
    /// An IDD was stripped but fewer digits remain than any plausible
    /// phone number has.
    #[error("Too short after IDD")]
    TooShortAfterIdd,
    /// The national significant number came out shorter than two digits.
    #[error("Too short NSN")]
    TooShortNsn,
    /// More digits than any phone number can have.
    #[error("Too long")]
    TooLong,
}

/// Negative outcomes of the possibility check. The positive outcomes are
/// [`super::enums::NumberLengthType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The number has an invalid country calling code.
    #[error("The number has an invalid country calling code")]
    InvalidCountryCode,
    /// Shorter than all valid numbers for this region.
    #[error("The number is shorter than all valid numbers for this region")]
    TooShort,
    /// Between the shortest and the longest valid lengths, but matching
    /// none of them exactly. Also returned when the queried type has no
    /// numbers at all in this region.
    #[error("The number length does not match any valid length for this region")]
    InvalidLength,
    /// Longer than all valid numbers for this region.
    #[error("The number is longer than all valid numbers for this region")]
    TooLong,
}

/// Failures of the example-number lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GetExampleNumberError {
    #[error("Parse error: {0}")]
    FailedToParse(#[from] ParseError),
    #[error("No example number in the metadata")]
    NoExampleNumber,
    #[error("Could not derive a number")]
    CouldNotGetNumber,
    #[error("Invalid region code provided")]
    InvalidRegionCode,
}

/// Internal fallible result: operations that consult regexes compiled
/// from metadata can also fail on a malformed metadata pattern. The
/// public facade treats that case as a library bug.
#[derive(Debug, PartialEq, Error)]
pub(crate) enum InternalError<E> {
    #[error("{0}")]
    Inner(E),
    #[error("{0}")]
    InvalidRegex(#[from] InvalidRegexError),
}

impl<E> InternalError<E> {
    /// Unwraps the domain error, panicking on the regex case: metadata
    /// regexes are validated by their provider, so a failure to compile
    /// one can only be a bug.
    pub fn into_public(self) -> E {
        match self {
            InternalError::Inner(err) => err,
            InternalError::InvalidRegex(err) => panic!(
                "A valid regex is expected in metadata; this indicates a library bug! {}",
                err
            ),
        }
    }
}

impl From<ParseError> for InternalError<ParseError> {
    fn from(value: ParseError) -> Self {
        InternalError::Inner(value)
    }
}

impl From<GetExampleNumberError> for InternalError<GetExampleNumberError> {
    fn from(value: GetExampleNumberError) -> Self {
        InternalError::Inner(value)
    }
}

impl From<InternalError<ParseError>> for InternalError<GetExampleNumberError> {
    fn from(value: InternalError<ParseError>) -> Self {
        match value {
            InternalError::Inner(err) => InternalError::Inner(err.into()),
            InternalError::InvalidRegex(err) => InternalError::InvalidRegex(err),
        }
    }
}
