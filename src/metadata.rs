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

//! Typed phone metadata.
//!
//! The library does not ship a metadata payload; a metadata provider
//! constructs these types (one [`PhoneMetadata`] per region) and hands a
//! [`MetadataCollection`] to [`crate::PhoneNumberUtil::new`]. How the
//! provider stores or serializes its data is its own business — only the
//! typed shape below is part of the contract.
//!
//! Accessors follow the value-or-default convention: `field()` returns
//! the value or the field's default, `has_field()` tells the two apart.

/// Description of one class of numbers (fixed line, mobile, toll free,
/// ...) within a region.
///
/// A desc with an empty `possible_length` inherits the lengths of the
/// region's general desc. A desc whose `possible_length` is exactly
/// `[-1]` marks a type with no numbers at all in the region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneNumberDesc {
    pub(crate) national_number_pattern: Option<String>,
    pub(crate) possible_length: Vec<i32>,
    pub(crate) possible_length_local_only: Vec<i32>,
    pub(crate) example_number: Option<String>,
}

impl PhoneNumberDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn national_number_pattern(&self) -> &str {
        self.national_number_pattern.as_deref().unwrap_or("")
    }

    pub fn has_national_number_pattern(&self) -> bool {
        self.national_number_pattern.is_some()
    }

    pub fn set_national_number_pattern(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.national_number_pattern = Some(pattern.into());
        self
    }

    pub fn possible_length(&self) -> &[i32] {
        &self.possible_length
    }

    pub fn set_possible_length(&mut self, lengths: impl Into<Vec<i32>>) -> &mut Self {
        self.possible_length = lengths.into();
        self
    }

    pub fn possible_length_local_only(&self) -> &[i32] {
        &self.possible_length_local_only
    }

    pub fn set_possible_length_local_only(&mut self, lengths: impl Into<Vec<i32>>) -> &mut Self {
        self.possible_length_local_only = lengths.into();
        self
    }

    pub fn example_number(&self) -> &str {
        self.example_number.as_deref().unwrap_or("")
    }

    pub fn has_example_number(&self) -> bool {
        self.example_number.is_some()
    }

    pub fn set_example_number(&mut self, example: impl Into<String>) -> &mut Self {
        self.example_number = Some(example.into());
        self
    }
}

/// One formatting rule of a region: a pattern over the national
/// significant number plus the substitution template to render it with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberFormat {
    pub(crate) pattern: Option<String>,
    pub(crate) format: Option<String>,
    /// Prefix discriminators; the last entry is the most specific and is
    /// the one consulted during format selection.
    pub(crate) leading_digits_pattern: Vec<String>,
    pub(crate) national_prefix_formatting_rule: Option<String>,
    pub(crate) national_prefix_optional_when_formatting: bool,
    pub(crate) domestic_carrier_code_formatting_rule: Option<String>,
}

impl NumberFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or("")
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or("")
    }

    pub fn set_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.format = Some(format.into());
        self
    }

    pub fn leading_digits_pattern(&self) -> &[String] {
        &self.leading_digits_pattern
    }

    pub fn add_leading_digits_pattern(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.leading_digits_pattern.push(pattern.into());
        self
    }

    pub fn national_prefix_formatting_rule(&self) -> &str {
        self.national_prefix_formatting_rule.as_deref().unwrap_or("")
    }

    pub fn has_national_prefix_formatting_rule(&self) -> bool {
        self.national_prefix_formatting_rule.is_some()
    }

    /// The rule may contain the `$NP` (national prefix) and `$FG` (first
    /// group) placeholders; they are resolved when the metadata is handed
    /// to the engine, or at call time for user-supplied formats.
    pub fn set_national_prefix_formatting_rule(&mut self, rule: impl Into<String>) -> &mut Self {
        self.national_prefix_formatting_rule = Some(rule.into());
        self
    }

    pub fn clear_national_prefix_formatting_rule(&mut self) -> &mut Self {
        self.national_prefix_formatting_rule = None;
        self
    }

    pub fn national_prefix_optional_when_formatting(&self) -> bool {
        self.national_prefix_optional_when_formatting
    }

    pub fn set_national_prefix_optional_when_formatting(&mut self, optional: bool) -> &mut Self {
        self.national_prefix_optional_when_formatting = optional;
        self
    }

    pub fn domestic_carrier_code_formatting_rule(&self) -> &str {
        self.domestic_carrier_code_formatting_rule
            .as_deref()
            .unwrap_or("")
    }

    pub fn has_domestic_carrier_code_formatting_rule(&self) -> bool {
        self.domestic_carrier_code_formatting_rule.is_some()
    }

    pub fn set_domestic_carrier_code_formatting_rule(&mut self, rule: impl Into<String>) -> &mut Self {
        self.domestic_carrier_code_formatting_rule = Some(rule.into());
        self
    }
}

/// Everything the engine knows about one region (or one non-geographical
/// calling code, in which case `id` is `"001"`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneMetadata {
    pub(crate) id: Option<String>,
    pub(crate) country_code: Option<i32>,
    pub(crate) international_prefix: Option<String>,
    pub(crate) preferred_international_prefix: Option<String>,
    pub(crate) national_prefix: Option<String>,
    pub(crate) preferred_extn_prefix: Option<String>,
    pub(crate) national_prefix_for_parsing: Option<String>,
    pub(crate) national_prefix_transform_rule: Option<String>,
    /// Discriminates among regions sharing one country calling code.
    pub(crate) leading_digits: Option<String>,
    pub(crate) main_country_for_code: bool,

    pub(crate) general_desc: PhoneNumberDesc,
    pub(crate) fixed_line: PhoneNumberDesc,
    pub(crate) mobile: PhoneNumberDesc,
    pub(crate) toll_free: PhoneNumberDesc,
    pub(crate) premium_rate: PhoneNumberDesc,
    pub(crate) shared_cost: PhoneNumberDesc,
    pub(crate) personal_number: PhoneNumberDesc,
    pub(crate) voip: PhoneNumberDesc,
    pub(crate) pager: PhoneNumberDesc,
    pub(crate) uan: PhoneNumberDesc,
    pub(crate) voicemail: PhoneNumberDesc,
    pub(crate) no_international_dialling: PhoneNumberDesc,
    pub(crate) emergency: PhoneNumberDesc,
    pub(crate) short_code: PhoneNumberDesc,
    pub(crate) standard_rate: PhoneNumberDesc,
    pub(crate) carrier_specific: PhoneNumberDesc,
    pub(crate) sms_services: PhoneNumberDesc,

    pub(crate) number_format: Vec<NumberFormat>,
    pub(crate) intl_number_format: Vec<NumberFormat>,

    /// Set during engine construction when the fixed-line and mobile
    /// patterns are literally identical, so the two types can never be
    /// told apart for this region.
    pub(crate) same_mobile_and_fixed_line_pattern: bool,
}

macro_rules! desc_accessors {
    ($($field:ident, $setter:ident);* $(;)?) => {
        $(
            pub fn $field(&self) -> &PhoneNumberDesc {
                &self.$field
            }

            pub fn $setter(&mut self, desc: PhoneNumberDesc) -> &mut Self {
                self.$field = desc;
                self
            }
        )*
    };
}

impl PhoneMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    pub fn country_code(&self) -> i32 {
        self.country_code.unwrap_or(0)
    }

    pub fn set_country_code(&mut self, country_code: i32) -> &mut Self {
        self.country_code = Some(country_code);
        self
    }

    pub fn international_prefix(&self) -> &str {
        self.international_prefix.as_deref().unwrap_or("")
    }

    pub fn has_international_prefix(&self) -> bool {
        self.international_prefix.is_some()
    }

    pub fn set_international_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.international_prefix = Some(prefix.into());
        self
    }

    pub fn preferred_international_prefix(&self) -> &str {
        self.preferred_international_prefix.as_deref().unwrap_or("")
    }

    pub fn has_preferred_international_prefix(&self) -> bool {
        self.preferred_international_prefix.is_some()
    }

    pub fn set_preferred_international_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.preferred_international_prefix = Some(prefix.into());
        self
    }

    pub fn national_prefix(&self) -> &str {
        self.national_prefix.as_deref().unwrap_or("")
    }

    pub fn has_national_prefix(&self) -> bool {
        self.national_prefix.is_some()
    }

    pub fn set_national_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.national_prefix = Some(prefix.into());
        self
    }

    pub fn preferred_extn_prefix(&self) -> &str {
        self.preferred_extn_prefix.as_deref().unwrap_or("")
    }

    pub fn has_preferred_extn_prefix(&self) -> bool {
        self.preferred_extn_prefix.is_some()
    }

    pub fn set_preferred_extn_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.preferred_extn_prefix = Some(prefix.into());
        self
    }

    pub fn national_prefix_for_parsing(&self) -> &str {
        self.national_prefix_for_parsing.as_deref().unwrap_or("")
    }

    pub fn has_national_prefix_for_parsing(&self) -> bool {
        self.national_prefix_for_parsing.is_some()
    }

    pub fn set_national_prefix_for_parsing(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.national_prefix_for_parsing = Some(prefix.into());
        self
    }

    pub fn clear_national_prefix_for_parsing(&mut self) -> &mut Self {
        self.national_prefix_for_parsing = None;
        self
    }

    pub fn national_prefix_transform_rule(&self) -> &str {
        self.national_prefix_transform_rule.as_deref().unwrap_or("")
    }

    pub fn has_national_prefix_transform_rule(&self) -> bool {
        self.national_prefix_transform_rule.is_some()
    }

    pub fn set_national_prefix_transform_rule(&mut self, rule: impl Into<String>) -> &mut Self {
        self.national_prefix_transform_rule = Some(rule.into());
        self
    }

    pub fn leading_digits(&self) -> &str {
        self.leading_digits.as_deref().unwrap_or("")
    }

    pub fn has_leading_digits(&self) -> bool {
        self.leading_digits.is_some()
    }

    pub fn set_leading_digits(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.leading_digits = Some(pattern.into());
        self
    }

    pub fn main_country_for_code(&self) -> bool {
        self.main_country_for_code
    }

    pub fn set_main_country_for_code(&mut self, main: bool) -> &mut Self {
        self.main_country_for_code = main;
        self
    }

    pub fn same_mobile_and_fixed_line_pattern(&self) -> bool {
        self.same_mobile_and_fixed_line_pattern
    }

    pub fn number_format(&self) -> &[NumberFormat] {
        &self.number_format
    }

    pub fn add_number_format(&mut self, format: NumberFormat) -> &mut Self {
        self.number_format.push(format);
        self
    }

    pub fn intl_number_format(&self) -> &[NumberFormat] {
        &self.intl_number_format
    }

    pub fn add_intl_number_format(&mut self, format: NumberFormat) -> &mut Self {
        self.intl_number_format.push(format);
        self
    }

    desc_accessors! {
        general_desc, set_general_desc;
        fixed_line, set_fixed_line;
        mobile, set_mobile;
        toll_free, set_toll_free;
        premium_rate, set_premium_rate;
        shared_cost, set_shared_cost;
        personal_number, set_personal_number;
        voip, set_voip;
        pager, set_pager;
        uan, set_uan;
        voicemail, set_voicemail;
        no_international_dialling, set_no_international_dialling;
        emergency, set_emergency;
        short_code, set_short_code;
        standard_rate, set_standard_rate;
        carrier_specific, set_carrier_specific;
        sms_services, set_sms_services;
    }
}

/// The full metadata table handed to the engine: one entry per region
/// plus one per non-geographical calling code.
#[derive(Debug, Clone, Default)]
pub struct MetadataCollection {
    pub(crate) metadata: Vec<PhoneMetadata>,
}

impl MetadataCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, metadata: PhoneMetadata) -> &mut Self {
        self.metadata.push(metadata);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhoneMetadata> {
        self.metadata.iter()
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }
}

impl FromIterator<PhoneMetadata> for MetadataCollection {
    fn from_iter<T: IntoIterator<Item = PhoneMetadata>>(iter: T) -> Self {
        Self {
            metadata: iter.into_iter().collect(),
        }
    }
}
