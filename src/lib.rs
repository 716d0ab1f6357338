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

//! Parsing, formatting and validating international phone numbers,
//! plus an as-you-type formatter and a free-text number finder.
//!
//! All functionality hangs off a [`PhoneNumberUtil`] instance built from
//! a [`metadata::MetadataCollection`] supplied by a metadata provider;
//! the crate itself ships no region data.

pub mod metadata;
pub mod region_code;

mod aytf;
mod find;
mod matcher_api;
mod phonenumber;
mod regex_cache;
mod regex_util;
mod util;

pub use aytf::AsYouTypeFormatter;
pub use find::{PhoneNumberMatch, PhoneNumberMatcher};
pub use phonenumber::{CountryCodeSource, PhoneNumber};
pub use util::{
    GetExampleNumberError, Leniency, MatchType, NumberLengthType, NumberOrStr, ParseError,
    PhoneNumberFormat, PhoneNumberType, PhoneNumberUtil, ValidationError,
};

#[cfg(test)]
mod tests;
