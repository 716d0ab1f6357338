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

use strum::EnumIter;

use crate::phonenumber::PhoneNumber;

/// The renderings a [`PhoneNumber`] can be formatted into.
///
/// `INTERNATIONAL` and `NATIONAL` follow ITU-T E.123 with local
/// separator conventions. For the Google Switzerland office:
/// - **International**: `+41 44 668 1800`
/// - **National**: `044 668 1800`
/// - **E164**: `+41446681800`
/// - **RFC3966**: `tel:+41-44-668-1800`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    /// `+` and country code, then the bare national number. No
    /// separators, no extension.
    E164,
    /// Country code and nationally formatted number, space separated.
    International,
    /// The form dialled within the number's own country, including any
    /// national prefix.
    National,
    /// A `tel:` URI with hyphen separators and an `;ext=` parameter for
    /// the extension.
    RFC3966,
}

/// Number classes a region's numbering plan distinguishes.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    FixedLine,
    Mobile,
    /// Used where fixed-line and mobile ranges overlap and the number
    /// itself cannot tell you which one it is (e.g. the USA).
    FixedLineOrMobile,
    /// Freephone lines.
    TollFree,
    PremiumRate,
    /// Call cost split between caller and recipient.
    SharedCost,
    VoIP,
    /// A number tied to a person rather than a line; routed wherever the
    /// owner configured.
    PersonalNumber,
    Pager,
    /// "Universal access numbers" / company numbers.
    UAN,
    VoiceMail,
    /// Matches no known pattern of its region.
    Unknown,
}

/// Degree of similarity between two numbers, as decided by
/// `is_number_match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// At least one input could not be parsed at all.
    NotANumber,
    NoMatch,
    /// One national number is a trailing part of the other, e.g.
    /// `6502530000` against `16502530000`.
    ShortNsnMatch,
    /// Same NSN, with the country code missing on at least one side or
    /// inferred rather than written.
    NsnMatch,
    /// Identical in country code, NSN, leading zeros, and extension.
    ExactMatch,
}

/// Outcomes of the length-driven possibility check, positive side.
/// The negative outcomes are [`super::errors::ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberLengthType {
    /// Length matches a dialable number of the region.
    IsPossible,
    /// Length only matches numbers dialable within a local area (e.g. a
    /// US number without its area code).
    IsPossibleLocalOnly,
}

/// Heterogeneous operand for `is_number_match`: either an already parsed
/// number or raw text still to be parsed.
#[derive(Debug, Clone, Copy)]
pub enum NumberOrStr<'a> {
    Number(&'a PhoneNumber),
    Str(&'a str),
}

impl<'a> From<&'a PhoneNumber> for NumberOrStr<'a> {
    fn from(number: &'a PhoneNumber) -> Self {
        NumberOrStr::Number(number)
    }
}

impl<'a> From<&'a str> for NumberOrStr<'a> {
    fn from(s: &'a str) -> Self {
        NumberOrStr::Str(s)
    }
}

/// How much scrutiny the free-text matcher applies to a candidate before
/// reporting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Leniency {
    /// Candidate parses and is possible (length checks only).
    Possible,
    /// Candidate is valid, and the surrounding text does not disqualify
    /// it (no Latin letters or currency symbols hugging the match).
    Valid,
    /// Additionally, the digit grouping of the candidate is consistent
    /// with how the number would be formatted, and the national prefix
    /// is present when the formatting rules require one.
    StrictGrouping,
    /// Like `StrictGrouping`, but the candidate's groups must match the
    /// formatted groups exactly rather than merely stay contiguous.
    ExactGrouping,
}
