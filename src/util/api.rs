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

//! The public entry point for parsing, formatting, validating and
//! comparing phone numbers.
//!
//! A [`PhoneNumberUtil`] is an explicit instance built from a
//! [`MetadataCollection`]; there is no process-wide singleton. The
//! instance is immutable and safe to share between threads.

use std::collections::HashSet;

use crate::aytf::AsYouTypeFormatter;
use crate::find::PhoneNumberMatcher;
use crate::metadata::{MetadataCollection, NumberFormat, PhoneMetadata};
use crate::phonenumber::PhoneNumber;

use super::core::PhoneNumberUtilCore;
use super::enums::{Leniency, MatchType, NumberLengthType, NumberOrStr, PhoneNumberFormat, PhoneNumberType};
use super::errors::{GetExampleNumberError, ParseError, ValidationError};

const METADATA_BUG: &str = "A valid regex is expected in metadata; this indicates a library bug.";

/// The main struct for all phone number operations.
pub struct PhoneNumberUtil {
    pub(crate) core: PhoneNumberUtilCore,
}

impl PhoneNumberUtil {
    /// Builds an instance over the given metadata table.
    pub fn new(collection: MetadataCollection) -> Self {
        Self {
            core: PhoneNumberUtilCore::new(collection),
        }
    }

    /// Parses a string into a [`PhoneNumber`].
    ///
    /// `default_region` supplies the country when the number itself does
    /// not carry one (no leading `+` or IDD); pass `"ZZ"` when unknown,
    /// in which case only internationally written numbers parse.
    pub fn parse(
        &self,
        number_to_parse: impl AsRef<str>,
        default_region: impl AsRef<str>,
    ) -> Result<PhoneNumber, ParseError> {
        self.core
            .parse(number_to_parse.as_ref(), default_region.as_ref())
            .map_err(|err| err.into_public())
    }

    /// Like [`parse`](Self::parse) but additionally records the raw
    /// input, where the country code came from, and any carrier code.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: impl AsRef<str>,
        default_region: impl AsRef<str>,
    ) -> Result<PhoneNumber, ParseError> {
        self.core
            .parse_and_keep_raw_input(number_to_parse.as_ref(), default_region.as_ref())
            .map_err(|err| err.into_public())
    }

    /// Formats a number in the given style. Formatting never fails: a
    /// number whose country code is unknown comes back as its bare
    /// national significant number.
    pub fn format(&self, number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        self.core.format(number, number_format).expect(METADATA_BUG)
    }

    /// Formats a number with caller-supplied formatting rules instead of
    /// the metadata ones. Rules may carry `$NP`/`$FG` placeholders.
    pub fn format_by_pattern(
        &self,
        number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> String {
        self.core
            .format_by_pattern(number, number_format, user_defined_formats)
            .expect(METADATA_BUG)
    }

    /// National format with a carrier selection code spliced in where
    /// the region's rules put one.
    pub fn format_national_number_with_carrier_code(
        &self,
        number: &PhoneNumber,
        carrier_code: impl AsRef<str>,
    ) -> String {
        self.core
            .format_national_number_with_carrier_code(number, carrier_code.as_ref())
            .expect(METADATA_BUG)
    }

    /// Same, preferring the carrier code captured at parse time and
    /// falling back to the supplied one.
    pub fn format_national_number_with_preferred_carrier_code(
        &self,
        number: &PhoneNumber,
        fallback_carrier_code: impl AsRef<str>,
    ) -> String {
        self.core
            .format_national_number_with_preferred_carrier_code(number, fallback_carrier_code.as_ref())
            .expect(METADATA_BUG)
    }

    /// How the number is dialled from `region_calling_from`: with that
    /// region's IDD, nationally when the regions share a country code.
    pub fn format_out_of_country_calling_number(
        &self,
        number: &PhoneNumber,
        region_calling_from: impl AsRef<str>,
    ) -> String {
        self.core
            .format_out_of_country_calling_number(number, region_calling_from.as_ref())
            .expect(METADATA_BUG)
    }

    /// Renders the number the way the user originally entered it, as far
    /// as the formatting rules can reproduce it; falls back to the raw
    /// input when they cannot.
    pub fn format_in_original_format(
        &self,
        number: &PhoneNumber,
        region_calling_from: impl AsRef<str>,
    ) -> String {
        self.core
            .format_in_original_format(number, region_calling_from.as_ref())
            .expect(METADATA_BUG)
    }

    /// Out-of-country formatting that keeps keypad letters (and their
    /// grouping) from the raw input.
    pub fn format_out_of_country_keeping_alpha_chars(
        &self,
        number: &PhoneNumber,
        region_calling_from: impl AsRef<str>,
    ) -> String {
        self.core
            .format_out_of_country_keeping_alpha_chars(number, region_calling_from.as_ref())
            .expect(METADATA_BUG)
    }

    /// The number as one would dial it from a mobile in
    /// `region_calling_from`. Returns an empty string for numbers that
    /// cannot be dialled from there.
    pub fn format_number_for_mobile_dialing(
        &self,
        number: &PhoneNumber,
        region_calling_from: impl AsRef<str>,
        with_formatting: bool,
    ) -> String {
        self.core
            .format_number_for_mobile_dialing(number, region_calling_from.as_ref(), with_formatting)
            .expect(METADATA_BUG)
    }

    /// Full pattern-based validation against the number's own region.
    pub fn is_valid_number(&self, number: &PhoneNumber) -> bool {
        self.core.is_valid_number(number).expect(METADATA_BUG)
    }

    /// Validation pinned to one region, which matters for country codes
    /// shared between regions.
    pub fn is_valid_number_for_region(
        &self,
        number: &PhoneNumber,
        region_code: impl AsRef<str>,
    ) -> bool {
        self.core
            .is_valid_number_for_region(number, region_code.as_ref())
    }

    /// Quick length-driven plausibility check.
    pub fn is_possible_number(&self, number: &PhoneNumber) -> bool {
        self.core.is_possible_number(number)
    }

    pub fn is_possible_number_with_reason(
        &self,
        number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError> {
        self.core.is_possible_number_with_reason(number)
    }

    /// Length check restricted to one number type.
    pub fn is_possible_number_for_type_with_reason(
        &self,
        number: &PhoneNumber,
        number_type: PhoneNumberType,
    ) -> Result<NumberLengthType, ValidationError> {
        self.core
            .is_possible_number_for_type_with_reason(number, number_type)
    }

    pub fn get_number_type(&self, number: &PhoneNumber) -> PhoneNumberType {
        self.core.get_number_type(number).expect(METADATA_BUG)
    }

    /// The region a number belongs to, resolved through leading-digits
    /// patterns and type matching for shared country codes.
    pub fn get_region_code_for_number(&self, number: &PhoneNumber) -> Option<&str> {
        self.core.get_region_code_for_number(number).expect(METADATA_BUG)
    }

    /// Chops digits off the end of an overlong number until it becomes
    /// valid. Returns whether that succeeded; the number is only
    /// modified on success.
    pub fn truncate_too_long_number(&self, number: &mut PhoneNumber) -> bool {
        self.core.truncate_too_long_number(number).expect(METADATA_BUG)
    }

    /// Compares two numbers, each given either parsed or as text.
    pub fn is_number_match<'a>(
        &self,
        first: impl Into<NumberOrStr<'a>>,
        second: impl Into<NumberOrStr<'a>>,
    ) -> MatchType {
        self.core.is_number_match(first.into(), second.into())
    }

    /// A formatter for digit-by-digit input from `region`.
    pub fn get_as_you_type_formatter(&self, region_code: impl AsRef<str>) -> AsYouTypeFormatter<'_> {
        AsYouTypeFormatter::new(self, region_code.as_ref())
    }

    /// Iterates phone numbers found in free text.
    pub fn find_numbers<'u, 't>(
        &'u self,
        text: &'t str,
        default_region: impl AsRef<str>,
        leniency: Leniency,
        max_tries: u64,
    ) -> PhoneNumberMatcher<'u, 't> {
        PhoneNumberMatcher::new(self, text, default_region.as_ref(), leniency, max_tries)
    }

    // --- Supplementary lookups -------------------------------------------

    pub fn get_national_significant_number(&self, number: &PhoneNumber) -> String {
        self.core.get_national_significant_number(number)
    }

    pub fn get_country_code_for_region(&self, region_code: impl AsRef<str>) -> Option<i32> {
        self.core.get_country_code_for_region(region_code.as_ref())
    }

    /// The main region for a calling code ("US" for 1); `"ZZ"` when the
    /// code is unknown.
    pub fn get_region_code_for_country_code(&self, country_code: i32) -> &str {
        self.core.get_region_code_for_country_code(country_code)
    }

    pub fn get_region_codes_for_country_calling_code(
        &self,
        country_code: i32,
    ) -> Option<impl ExactSizeIterator<Item = &str>> {
        self.core.get_region_codes_for_country_calling_code(country_code)
    }

    pub fn get_supported_regions(&self) -> impl ExactSizeIterator<Item = &str> {
        self.core.get_supported_regions()
    }

    pub fn get_supported_calling_codes(&self) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.core.get_supported_calling_codes()
    }

    /// Calling codes that belong to the world rather than one country
    /// (800, 979, ...).
    pub fn get_supported_global_network_calling_codes(
        &self,
    ) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.core.get_supported_global_network_calling_codes()
    }

    pub fn get_supported_types_for_region(
        &self,
        region_code: impl AsRef<str>,
    ) -> Option<HashSet<PhoneNumberType>> {
        self.core.get_supported_types_for_region(region_code.as_ref())
    }

    pub fn get_supported_types_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        self.core
            .get_supported_types_for_non_geo_entity(country_calling_code)
    }

    pub fn get_metadata_for_region(&self, region_code: impl AsRef<str>) -> Option<&PhoneMetadata> {
        self.core.get_metadata_for_region(region_code.as_ref())
    }

    pub fn get_ndd_prefix_for_region(
        &self,
        region_code: impl AsRef<str>,
        strip_non_digits: bool,
    ) -> Option<String> {
        self.core
            .get_ndd_prefix_for_region(region_code.as_ref(), strip_non_digits)
    }

    pub fn is_nanpa_country(&self, region_code: impl AsRef<str>) -> bool {
        self.core.is_nanpa_country(region_code.as_ref())
    }

    /// At least three keypad letters and otherwise viable, e.g.
    /// "1800 MICROSOFT".
    pub fn is_alpha_number(&self, number: impl AsRef<str>) -> bool {
        self.core.is_alpha_number(number.as_ref())
    }

    /// Converts keypad letters to digits, keeping the rest:
    /// "1-800-FLOWERS" becomes "1-800-3569377".
    pub fn convert_alpha_characters_in_number(&self, number: impl AsRef<str>) -> String {
        self.core.convert_alpha_characters_in_number(number.as_ref())
    }

    /// Whether the input could be a phone number at all, before any
    /// region rules apply.
    pub fn is_viable_phone_number(&self, number: impl AsRef<str>) -> bool {
        self.core.is_viable_phone_number(number.as_ref())
    }

    pub fn can_be_internationally_dialled(&self, number: &PhoneNumber) -> bool {
        self.core.can_be_internationally_dialled(number).expect(METADATA_BUG)
    }

    /// Whether the number is tied to a geographic area (fixed lines, and
    /// mobiles in countries that assign them geographically).
    pub fn is_number_geographical(&self, number: &PhoneNumber) -> bool {
        self.core.is_number_geographical(number).expect(METADATA_BUG)
    }

    pub fn get_length_of_geographical_area_code(&self, number: &PhoneNumber) -> usize {
        self.core
            .get_length_of_geographical_area_code(number)
            .expect(METADATA_BUG)
    }

    pub fn get_length_of_national_destination_code(&self, number: &PhoneNumber) -> usize {
        self.core
            .get_length_of_national_destination_code(number)
            .expect(METADATA_BUG)
    }

    pub fn get_country_mobile_token(&self, country_calling_code: i32) -> String {
        self.core.get_country_mobile_token(country_calling_code)
    }

    pub fn get_example_number(
        &self,
        region_code: impl AsRef<str>,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        self.core
            .get_example_number(region_code.as_ref())
            .map_err(|err| err.into_public())
    }

    pub fn get_example_number_for_type_and_region_code(
        &self,
        region_code: impl AsRef<str>,
        number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        self.core
            .get_example_number_for_type_and_region_code(region_code.as_ref(), number_type)
            .map_err(|err| err.into_public())
    }

    pub fn get_example_number_for_type(
        &self,
        number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        self.core
            .get_example_number_for_type(number_type)
            .map_err(|err| err.into_public())
    }

    pub fn get_example_number_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        self.core
            .get_example_number_for_non_geo_entity(country_calling_code)
            .map_err(|err| err.into_public())
    }

    /// An example number that is plausible but not valid, useful as test
    /// fixture data for validation UIs.
    pub fn get_invalid_example_number(
        &self,
        region_code: impl AsRef<str>,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        self.core
            .get_invalid_example_number(region_code.as_ref())
            .map_err(|err| err.into_public())
    }

    /// Exposed for testing the national-prefix stripping contract.
    pub fn maybe_strip_national_prefix_and_carrier_code<'b>(
        &self,
        metadata: &PhoneMetadata,
        number: &'b str,
    ) -> (std::borrow::Cow<'b, str>, Option<String>) {
        self.core
            .maybe_strip_national_prefix_and_carrier_code(metadata, number)
            .expect(METADATA_BUG)
    }
}
