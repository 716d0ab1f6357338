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

use std::hash::{Hash, Hasher};

/// Where the country calling code of a parsed number came from. Only
/// populated by `parse_and_keep_raw_input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(non_camel_case_types)]
pub enum CountryCodeSource {
    #[default]
    UNSPECIFIED,
    FROM_NUMBER_WITH_PLUS_SIGN,
    FROM_NUMBER_WITH_IDD,
    FROM_NUMBER_WITHOUT_PLUS_SIGN,
    FROM_DEFAULT_COUNTRY,
}

/// A parsed phone number.
///
/// The national significant number is stored as an integer; leading
/// zeros that an integer cannot carry are recorded through
/// `italian_leading_zero` and `number_of_leading_zeros`.
///
/// Equality is structural on the five identity fields (country code,
/// national number, extension, leading-zero flag and count). The context
/// captured by `parse_and_keep_raw_input` — `raw_input`,
/// `country_code_source`, `preferred_domestic_carrier_code` — never
/// takes part in comparisons.
#[derive(Debug, Clone, Default)]
pub struct PhoneNumber {
    country_code: Option<i32>,
    national_number: Option<u64>,
    extension: Option<String>,
    italian_leading_zero: Option<bool>,
    number_of_leading_zeros: Option<i32>,
    raw_input: Option<String>,
    country_code_source: Option<CountryCodeSource>,
    preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field to its unset state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn country_code(&self) -> i32 {
        self.country_code.unwrap_or(0)
    }

    pub fn has_country_code(&self) -> bool {
        self.country_code.is_some()
    }

    pub fn set_country_code(&mut self, country_code: i32) -> &mut Self {
        self.country_code = Some(country_code);
        self
    }

    pub fn clear_country_code(&mut self) -> &mut Self {
        self.country_code = None;
        self
    }

    pub fn national_number(&self) -> u64 {
        self.national_number.unwrap_or(0)
    }

    pub fn has_national_number(&self) -> bool {
        self.national_number.is_some()
    }

    pub fn set_national_number(&mut self, national_number: u64) -> &mut Self {
        self.national_number = Some(national_number);
        self
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or("")
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    pub fn set_extension(&mut self, extension: impl Into<String>) -> &mut Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn clear_extension(&mut self) -> &mut Self {
        self.extension = None;
        self
    }

    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.unwrap_or(false)
    }

    pub fn has_italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.is_some()
    }

    pub fn set_italian_leading_zero(&mut self, has_zero: bool) -> &mut Self {
        self.italian_leading_zero = Some(has_zero);
        self
    }

    /// Defaults to 1, which is the overwhelmingly common case.
    pub fn number_of_leading_zeros(&self) -> i32 {
        self.number_of_leading_zeros.unwrap_or(1)
    }

    pub fn has_number_of_leading_zeros(&self) -> bool {
        self.number_of_leading_zeros.is_some()
    }

    pub fn set_number_of_leading_zeros(&mut self, count: i32) -> &mut Self {
        self.number_of_leading_zeros = Some(count);
        self
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or("")
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn set_raw_input(&mut self, raw_input: impl Into<String>) -> &mut Self {
        self.raw_input = Some(raw_input.into());
        self
    }

    pub fn clear_raw_input(&mut self) -> &mut Self {
        self.raw_input = None;
        self
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source.unwrap_or_default()
    }

    pub fn has_country_code_source(&self) -> bool {
        self.country_code_source.is_some()
    }

    pub fn set_country_code_source(&mut self, source: CountryCodeSource) -> &mut Self {
        self.country_code_source = Some(source);
        self
    }

    pub fn clear_country_code_source(&mut self) -> &mut Self {
        self.country_code_source = None;
        self
    }

    pub fn preferred_domestic_carrier_code(&self) -> &str {
        self.preferred_domestic_carrier_code.as_deref().unwrap_or("")
    }

    pub fn has_preferred_domestic_carrier_code(&self) -> bool {
        self.preferred_domestic_carrier_code.is_some()
    }

    pub fn set_preferred_domestic_carrier_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.preferred_domestic_carrier_code = Some(code.into());
        self
    }

    pub fn clear_preferred_domestic_carrier_code(&mut self) -> &mut Self {
        self.preferred_domestic_carrier_code = None;
        self
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.country_code() == other.country_code()
            && self.national_number() == other.national_number()
            && self.extension() == other.extension()
            && self.italian_leading_zero() == other.italian_leading_zero()
            && self.number_of_leading_zeros() == other.number_of_leading_zeros()
    }
}

impl Eq for PhoneNumber {}

impl Hash for PhoneNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.country_code().hash(state);
        self.national_number().hash(state);
        self.extension().hash(state);
        self.italian_leading_zero().hash(state);
        self.number_of_leading_zeros().hash(state);
    }
}
