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

//! The engine behind [`crate::PhoneNumberUtil`]: normalization, parsing,
//! validation and formatting against the metadata table. Everything that
//! evaluates a regex compiled from a metadata string is fallible here;
//! the facade decides what a compilation failure means.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::matcher_api::{MatcherApi, RegexBasedMatcher};
use crate::metadata::{MetadataCollection, NumberFormat, PhoneMetadata, PhoneNumberDesc};
use crate::phonenumber::{CountryCodeSource, PhoneNumber};
use crate::regex_cache::InvalidRegexError;
use crate::regex_util::{RegexConsume, RegexFullMatch};
use crate::region_code::RegionCode;

use super::consts::{
    DEFAULT_EXTN_PREFIX, MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN,
    MIN_LENGTH_FOR_NSN, NANPA_COUNTRY_CODE, REGION_CODE_FOR_NON_GEO_ENTITY, RFC3966_EXTN_PREFIX,
    RFC3966_ISDN_SUBADDRESS, RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
};
use super::enums::{MatchType, NumberLengthType, NumberOrStr, PhoneNumberFormat, PhoneNumberType};
use super::errors::{GetExampleNumberError, InternalError, ParseError, ValidationError};
use super::helpers::{
    copy_core_fields_only, get_number_desc_by_type, get_supported_types_for_metadata,
    is_national_number_suffix_of_the_other, normalize_helper,
    prefix_number_with_country_calling_code, test_number_length,
    test_number_length_with_unknown_type,
};
use super::patterns::PhonePatterns;

const NP_PLACEHOLDER: &str = "$NP";
const FG_PLACEHOLDER: &str = "$FG";

type ParseResult<T> = Result<T, InternalError<ParseError>>;
type RegexResult<T> = Result<T, InvalidRegexError>;

/// Records leading zeros that the integer national number cannot carry.
fn set_italian_leading_zeros_for_phone_number(national_number: &str, phone_number: &mut PhoneNumber) {
    if national_number.len() > 1 && national_number.starts_with('0') {
        phone_number.set_italian_leading_zero(true);
        let bytes = national_number.as_bytes();
        let mut number_of_leading_zeros = 1;
        while number_of_leading_zeros < national_number.len() - 1
            && bytes[number_of_leading_zeros] == b'0'
        {
            number_of_leading_zeros += 1;
        }
        if number_of_leading_zeros != 1 {
            phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
        }
    }
}

/// Resolves the `$NP` and `$FG` placeholders of a formatting rule
/// against the region's national prefix.
fn resolve_formatting_rule(rule: &str, national_prefix: &str) -> String {
    rule.replace(NP_PLACEHOLDER, national_prefix)
        .replace(FG_PLACEHOLDER, "$1")
}

pub(crate) struct PhoneNumberUtilCore {
    pub(crate) patterns: PhonePatterns,
    pub(crate) matcher_api: RegexBasedMatcher,
    region_to_metadata: HashMap<String, PhoneMetadata>,
    non_geo_metadata: HashMap<i32, PhoneMetadata>,
    /// Country calling code to the regions using it, main country first.
    country_code_to_region_codes: HashMap<i32, Vec<String>>,
    nanpa_regions: HashSet<String>,
}

impl PhoneNumberUtilCore {
    pub fn new(collection: MetadataCollection) -> Self {
        let mut core = Self {
            patterns: PhonePatterns::new(),
            matcher_api: RegexBasedMatcher::new(),
            region_to_metadata: HashMap::with_capacity(collection.len()),
            non_geo_metadata: HashMap::new(),
            country_code_to_region_codes: HashMap::new(),
            nanpa_regions: HashSet::new(),
        };
        for mut metadata in collection.metadata {
            Self::finish_metadata(&mut metadata);
            let country_code = metadata.country_code();
            let region_id = metadata.id().to_owned();
            let regions = core
                .country_code_to_region_codes
                .entry(country_code)
                .or_default();
            if metadata.main_country_for_code() {
                regions.insert(0, region_id.clone());
            } else {
                regions.push(region_id.clone());
            }
            if region_id == REGION_CODE_FOR_NON_GEO_ENTITY {
                core.non_geo_metadata.insert(country_code, metadata);
            } else {
                if country_code == NANPA_COUNTRY_CODE {
                    core.nanpa_regions.insert(region_id.clone());
                }
                core.region_to_metadata.insert(region_id, metadata);
            }
        }
        core
    }

    /// Applies the normalizations a metadata loader performs before the
    /// table is used: national-prefix-for-parsing inheritance, `$NP`/`$FG`
    /// resolution, and the identical fixed-line/mobile pattern flag.
    fn finish_metadata(metadata: &mut PhoneMetadata) {
        if !metadata.has_national_prefix_for_parsing() && metadata.has_national_prefix() {
            metadata.national_prefix_for_parsing = metadata.national_prefix.clone();
        }
        let national_prefix = metadata.national_prefix().to_owned();
        for format in metadata
            .number_format
            .iter_mut()
            .chain(metadata.intl_number_format.iter_mut())
        {
            if let Some(rule) = format.national_prefix_formatting_rule.take() {
                format.national_prefix_formatting_rule =
                    Some(resolve_formatting_rule(&rule, &national_prefix));
            }
            if let Some(rule) = format.domestic_carrier_code_formatting_rule.take() {
                format.domestic_carrier_code_formatting_rule =
                    Some(resolve_formatting_rule(&rule, &national_prefix));
            }
        }
        metadata.same_mobile_and_fixed_line_pattern = metadata.fixed_line.has_national_number_pattern()
            && metadata.fixed_line.national_number_pattern()
                == metadata.mobile.national_number_pattern();
    }

    // --- Metadata access -------------------------------------------------

    pub(crate) fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.region_to_metadata.get(region_code)
    }

    pub(crate) fn get_metadata_for_non_geographical_region(
        &self,
        country_code: i32,
    ) -> Option<&PhoneMetadata> {
        self.non_geo_metadata.get(&country_code)
    }

    pub(crate) fn get_metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        if region_code == REGION_CODE_FOR_NON_GEO_ENTITY {
            self.get_metadata_for_non_geographical_region(country_calling_code)
        } else {
            self.get_metadata_for_region(region_code)
        }
    }

    pub(crate) fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.region_to_metadata.contains_key(region_code)
    }

    pub(crate) fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_code_to_region_codes
            .contains_key(&country_calling_code)
    }

    pub(crate) fn get_region_code_for_country_code<'a>(&'a self, country_code: i32) -> &'a str {
        let region: Option<&'a str> = self
            .country_code_to_region_codes
            .get(&country_code)
            .and_then(|regions| regions.first())
            .map(|region| region.as_str());
        region.unwrap_or_else(|| RegionCode::get_unknown())
    }

    pub(crate) fn get_region_codes_for_country_calling_code(
        &self,
        country_code: i32,
    ) -> Option<impl ExactSizeIterator<Item = &str>> {
        self.country_code_to_region_codes
            .get(&country_code)
            .map(|regions| regions.iter().map(|region| region.as_str()))
    }

    pub(crate) fn get_country_code_for_region(&self, region_code: &str) -> Option<i32> {
        self.get_metadata_for_region(region_code)
            .map(|metadata| metadata.country_code())
    }

    pub(crate) fn get_supported_regions(&self) -> impl ExactSizeIterator<Item = &str> {
        self.region_to_metadata.keys().map(|region| region.as_str())
    }

    pub(crate) fn get_supported_calling_codes(&self) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.country_code_to_region_codes.keys().copied()
    }

    pub(crate) fn get_supported_global_network_calling_codes(
        &self,
    ) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.non_geo_metadata.keys().copied()
    }

    pub(crate) fn get_supported_types_for_region(
        &self,
        region_code: &str,
    ) -> Option<HashSet<PhoneNumberType>> {
        let metadata = self.get_metadata_for_region(region_code)?;
        let mut types = HashSet::new();
        get_supported_types_for_metadata(metadata, &mut types);
        Some(types)
    }

    pub(crate) fn get_supported_types_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        let metadata = self.get_metadata_for_non_geographical_region(country_calling_code)?;
        let mut types = HashSet::new();
        get_supported_types_for_metadata(metadata, &mut types);
        Some(types)
    }

    pub(crate) fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.nanpa_regions.contains(region_code)
    }

    /// The national dialling prefix of a region, with `~` (wait for
    /// dial tone) optionally removed.
    pub(crate) fn get_ndd_prefix_for_region(
        &self,
        region_code: &str,
        strip_non_digits: bool,
    ) -> Option<String> {
        let metadata = self.get_metadata_for_region(region_code)?;
        if !metadata.has_national_prefix() || metadata.national_prefix().is_empty() {
            return None;
        }
        let mut national_prefix = metadata.national_prefix().to_owned();
        if strip_non_digits {
            national_prefix = national_prefix.replace('~', "");
        }
        Some(national_prefix)
    }

    // --- Normalization ---------------------------------------------------

    /// Folds every Unicode decimal digit to ASCII and drops everything
    /// else.
    pub(crate) fn normalize_digits_only(&self, number: &str) -> String {
        let folded = dec_from_char::normalize_decimals(number);
        folded.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Keeps only the characters meaningful when dialling: digits, `+`,
    /// `*` and `#`.
    pub(crate) fn normalize_diallable_chars_only(&self, number: &str) -> String {
        let mut result = number.to_owned();
        normalize_helper(&self.patterns.diallable_char_mappings, true, &mut result);
        result
    }

    /// Canonicalizes a number string in place. With three or more
    /// letters the E.161 keypad mapping applies; otherwise letters and
    /// punctuation are dropped and digits folded to ASCII.
    pub(crate) fn normalize(&self, number: &mut String) {
        if self.patterns.valid_alpha_phone_pattern.full_match(number) {
            normalize_helper(&self.patterns.alpha_phone_mappings, true, number);
        } else {
            *number = self.normalize_digits_only(number);
        }
    }

    /// Converts keypad letters to digits while keeping all other
    /// characters, e.g. "1-800-FLOWERS" to "1-800-3569377".
    pub(crate) fn convert_alpha_characters_in_number(&self, number: &str) -> String {
        let mut result = number.to_owned();
        normalize_helper(&self.patterns.alpha_phone_mappings, false, &mut result);
        result
    }

    pub(crate) fn is_viable_phone_number(&self, number: &str) -> bool {
        if number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.patterns.valid_phone_number_pattern.full_match(number)
    }

    pub(crate) fn is_alpha_number(&self, number: &str) -> bool {
        if !self.is_viable_phone_number(number) {
            return false;
        }
        let mut stripped = number.to_owned();
        self.maybe_strip_extension(&mut stripped);
        self.patterns.valid_alpha_phone_pattern.full_match(&stripped)
    }

    /// Finds the part of the input that could plausibly be a phone
    /// number: from the first digit or plus sign, with trailing junk and
    /// any trailing second number removed.
    pub(crate) fn extract_possible_number<'b>(&self, number: &'b str) -> Result<&'b str, ParseError> {
        let Some(start_match) = self.patterns.valid_start_char_pattern.find(number) else {
            return Err(ParseError::NotANumber);
        };
        let mut candidate = &number[start_match.start()..];
        // Chop trailing characters that are neither letters, digits nor a
        // closing '#'.
        while let Some(last) = candidate.chars().next_back() {
            let mut buf = [0u8; 4];
            if self
                .patterns
                .unwanted_end_char_pattern
                .is_match(last.encode_utf8(&mut buf))
            {
                candidate = &candidate[..candidate.len() - last.len_utf8()];
            } else {
                break;
            }
        }
        if let Some(second_number) = self.patterns.second_number_start_pattern.find(candidate) {
            candidate = &candidate[..second_number.start()];
        }
        Ok(candidate)
    }

    // --- NSN -------------------------------------------------------------

    pub(crate) fn get_national_significant_number(&self, number: &PhoneNumber) -> String {
        let mut national_number = String::new();
        if number.italian_leading_zero() && number.number_of_leading_zeros() > 0 {
            for _ in 0..number.number_of_leading_zeros() {
                national_number.push('0');
            }
        }
        let mut buf = itoa::Buffer::new();
        national_number.push_str(buf.format(number.national_number()));
        national_number
    }

    // --- Prefix stripping ------------------------------------------------

    /// Pops a recognized extension off the end of `number` and returns
    /// it, or an empty string when none was found.
    pub(crate) fn maybe_strip_extension(&self, number: &mut String) -> String {
        let Some(captures) = self.patterns.extn_pattern.captures(number.as_str()) else {
            return String::new();
        };
        let match_start = captures.get(0).map(|m| m.start()).unwrap_or(0);
        // The number before the extension must itself be viable, or the
        // "extension" is more likely part of the number proper.
        if !self.is_viable_phone_number(&number[..match_start]) {
            return String::new();
        }
        for group_index in 1..captures.len() {
            if let Some(group) = captures.get(group_index) {
                let extension = group.as_str().to_owned();
                number.truncate(match_start);
                return extension;
            }
        }
        String::new()
    }

    /// Strips a leading plus or the region's IDD, normalizing the rest,
    /// and reports which of the two (if either) was found.
    pub(crate) fn maybe_strip_international_prefix_and_normalize(
        &self,
        number: &mut String,
        possible_idd_prefix: &str,
    ) -> RegexResult<CountryCodeSource> {
        if number.is_empty() {
            return Ok(CountryCodeSource::FROM_DEFAULT_COUNTRY);
        }
        if let Some(plus_match) = self.patterns.plus_chars_pattern.find_start(number) {
            let match_end = plus_match.end();
            number.drain(..match_end);
            // Can now normalize the rest of the number since a plus was
            // found at the start.
            self.normalize(number);
            return Ok(CountryCodeSource::FROM_NUMBER_WITH_PLUS_SIGN);
        }
        let idd_pattern = self.patterns.regexp_cache.get_regex(possible_idd_prefix)?;
        self.normalize(number);
        Ok(if self.parse_prefix_as_idd(&idd_pattern, number) {
            CountryCodeSource::FROM_NUMBER_WITH_IDD
        } else {
            CountryCodeSource::FROM_DEFAULT_COUNTRY
        })
    }

    fn parse_prefix_as_idd(&self, idd_pattern: &regex::Regex, number: &mut String) -> bool {
        if let Some(idd_match) = idd_pattern.find_start(number) {
            let match_end = idd_match.end();
            // A zero right after the IDD would start the national number
            // of some country, not a country code.
            if let Some(digit_captures) = self
                .patterns
                .capturing_digit_pattern
                .captures(&number[match_end..])
            {
                let normalized_group =
                    self.normalize_digits_only(digit_captures.get(1).map(|m| m.as_str()).unwrap_or(""));
                if normalized_group == "0" {
                    return false;
                }
            }
            number.drain(..match_end);
            return true;
        }
        false
    }

    /// Strips the national prefix or carrier selection code off the
    /// start of `number`, returning the remainder and any captured
    /// carrier code. The number comes back untouched when stripping
    /// would break a previously matching national number.
    pub(crate) fn maybe_strip_national_prefix_and_carrier_code<'b>(
        &self,
        metadata: &PhoneMetadata,
        number: &'b str,
    ) -> RegexResult<(Cow<'b, str>, Option<String>)> {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if number.is_empty() || possible_national_prefix.is_empty() {
            return Ok((Cow::Borrowed(number), None));
        }
        let prefix_regex = self
            .patterns
            .regexp_cache
            .get_regex(possible_national_prefix)?;
        let Some(prefix_captures) = prefix_regex.captures_start(number) else {
            return Ok((Cow::Borrowed(number), None));
        };
        let general_desc = &metadata.general_desc;
        let is_viable_original_number =
            self.matcher_api
                .match_national_number(number, general_desc, false);
        let num_of_groups = prefix_captures.len() - 1;
        let transform_rule = metadata.national_prefix_transform_rule();
        if transform_rule.is_empty() || prefix_captures.get(num_of_groups).is_none() {
            // No transform: just drop the matched prefix, unless doing so
            // turns a matching number into a non-matching one.
            let match_end = prefix_captures.get(0).map(|m| m.end()).unwrap_or(0);
            if is_viable_original_number
                && !self
                    .matcher_api
                    .match_national_number(&number[match_end..], general_desc, false)
            {
                return Ok((Cow::Borrowed(number), None));
            }
            let carrier_code = if num_of_groups > 0 && prefix_captures.get(num_of_groups).is_some() {
                prefix_captures.get(1).map(|m| m.as_str().to_owned())
            } else {
                None
            };
            Ok((Cow::Owned(number[match_end..].to_owned()), carrier_code))
        } else {
            // The whole prefix is rewritten by the transform rule.
            let transformed = prefix_regex.replace(number, transform_rule);
            if is_viable_original_number
                && !self
                    .matcher_api
                    .match_national_number(&transformed, general_desc, false)
            {
                return Ok((Cow::Borrowed(number), None));
            }
            let carrier_code = if num_of_groups > 1 {
                prefix_captures.get(1).map(|m| m.as_str().to_owned())
            } else {
                None
            };
            Ok((Cow::Owned(transformed.into_owned()), carrier_code))
        }
    }

    /// Reads 1–3 leading digits off an already normalized number and
    /// returns the first known country calling code among them, with the
    /// remaining national number.
    pub(crate) fn extract_country_code<'b>(&self, full_number: &'b str) -> Option<(i32, &'b str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country calling codes never begin with a zero.
            return None;
        }
        for length in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            if !full_number.is_char_boundary(length) {
                break;
            }
            let Ok(potential_country_code) = full_number[..length].parse::<i32>() else {
                break;
            };
            if self.has_valid_country_calling_code(potential_country_code) {
                return Some((potential_country_code, &full_number[length..]));
            }
        }
        None
    }

    /// Works out the country calling code of `number`, stripping plus
    /// signs, IDDs, or the default region's own country code as needed.
    /// Returns the code (0 when the number is simply national) and the
    /// national number that remains.
    pub(crate) fn maybe_extract_country_code(
        &self,
        number: &str,
        default_region_metadata: Option<&PhoneMetadata>,
        keep_raw_input: bool,
        phone_number: &mut PhoneNumber,
    ) -> ParseResult<(i32, String)> {
        if number.is_empty() {
            return Ok((0, String::new()));
        }
        let mut full_number = number.to_owned();
        let possible_idd_prefix = default_region_metadata
            .map(|metadata| metadata.international_prefix())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or("NonMatch");
        let country_code_source =
            self.maybe_strip_international_prefix_and_normalize(&mut full_number, possible_idd_prefix)?;
        if keep_raw_input {
            phone_number.set_country_code_source(country_code_source);
        }
        if country_code_source != CountryCodeSource::FROM_DEFAULT_COUNTRY {
            if full_number.chars().count() <= MIN_LENGTH_FOR_NSN {
                return Err(ParseError::TooShortAfterIdd.into());
            }
            if let Some((country_code, rest)) = self.extract_country_code(&full_number) {
                phone_number.set_country_code(country_code);
                return Ok((country_code, rest.to_owned()));
            }
            // A plus or IDD was present but no recognizable country code
            // followed it.
            return Err(ParseError::InvalidCountryCode.into());
        }
        if let Some(metadata) = default_region_metadata {
            let default_country_code = metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            if let Some(rest) = full_number.strip_prefix(default_country_code_str) {
                let general_desc = &metadata.general_desc;
                let (potential_national_number, _carrier) =
                    self.maybe_strip_national_prefix_and_carrier_code(metadata, rest)?;
                // The country-code-stripped reading wins when it turns a
                // non-matching number into a matching one, or when the
                // full reading is outright too long.
                if (!self
                    .matcher_api
                    .match_national_number(&full_number, general_desc, false)
                    && self.matcher_api.match_national_number(
                        &potential_national_number,
                        general_desc,
                        false,
                    ))
                    || test_number_length_with_unknown_type(&full_number, metadata)
                        == Err(ValidationError::TooLong)
                {
                    if keep_raw_input {
                        phone_number
                            .set_country_code_source(CountryCodeSource::FROM_NUMBER_WITHOUT_PLUS_SIGN);
                    }
                    phone_number.set_country_code(default_country_code);
                    return Ok((default_country_code, potential_national_number.into_owned()));
                }
            }
        }
        phone_number.set_country_code(0);
        Ok((0, String::new()))
    }

    // --- Parsing ---------------------------------------------------------

    pub(crate) fn parse(&self, number_to_parse: &str, default_region: &str) -> ParseResult<PhoneNumber> {
        self.parse_helper(number_to_parse, Some(default_region), false, true)
    }

    pub(crate) fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> ParseResult<PhoneNumber> {
        self.parse_helper(number_to_parse, Some(default_region), true, true)
    }

    fn extract_phone_context<'b>(&self, number_to_parse: &'b str, index_of_phone_context: usize) -> &'b str {
        let context_start = index_of_phone_context + RFC3966_PHONE_CONTEXT.len();
        let context = &number_to_parse[context_start..];
        match context.find(';') {
            Some(end) => &context[..end],
            None => context,
        }
    }

    fn is_phone_context_valid(&self, phone_context: &str) -> bool {
        if phone_context.is_empty() {
            return false;
        }
        if phone_context.starts_with('+') {
            self.patterns
                .rfc3966_global_number_digits_pattern
                .is_match(phone_context)
        } else {
            self.patterns.rfc3966_domainname_pattern.is_match(phone_context)
        }
    }

    /// Converts `number_to_parse` into the string that actually gets
    /// parsed, honouring any RFC 3966 `phone-context` and discarding an
    /// ISDN subaddress.
    fn build_national_number_for_parsing(&self, number_to_parse: &str) -> Result<String, ParseError> {
        let mut national_number = String::new();
        if let Some(index_of_phone_context) = number_to_parse.find(RFC3966_PHONE_CONTEXT) {
            let phone_context = self.extract_phone_context(number_to_parse, index_of_phone_context);
            if !self.is_phone_context_valid(phone_context) {
                return Err(ParseError::NotANumber);
            }
            if phone_context.starts_with('+') {
                // The descriptor is international; the local part carries
                // the rest of the digits.
                national_number.push_str(phone_context);
            }
            let index_of_national_number = match number_to_parse.find(RFC3966_PREFIX) {
                Some(index) => index + RFC3966_PREFIX.len(),
                None => 0,
            };
            national_number
                .push_str(&number_to_parse[index_of_national_number..index_of_phone_context]);
        } else {
            national_number.push_str(self.extract_possible_number(number_to_parse)?);
        }
        if let Some(index_of_isub) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            national_number.truncate(index_of_isub);
        }
        Ok(national_number)
    }

    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: Option<&str>) -> bool {
        let region_known = default_region
            .map(|region| self.is_valid_region_code(region))
            .unwrap_or(false);
        if !region_known {
            // Without a usable region the number must carry its own
            // country code behind a plus sign.
            if number_to_parse.is_empty()
                || self
                    .patterns
                    .plus_chars_pattern
                    .find_start(number_to_parse)
                    .is_none()
            {
                return false;
            }
        }
        true
    }

    pub(crate) fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
        keep_raw_input: bool,
        check_region: bool,
    ) -> ParseResult<PhoneNumber> {
        let mut phone_number = PhoneNumber::new();
        if number_to_parse.chars().count() > MAX_INPUT_STRING_LENGTH {
            return Err(ParseError::TooLong.into());
        }
        let mut national_number = self
            .build_national_number_for_parsing(number_to_parse)
            .map_err(InternalError::Inner)?;
        if !self.is_viable_phone_number(&national_number) {
            return Err(ParseError::NotANumber.into());
        }
        if check_region && !self.check_region_for_parsing(&national_number, default_region) {
            return Err(ParseError::InvalidCountryCode.into());
        }
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse.to_owned());
        }
        let extension = self.maybe_strip_extension(&mut national_number);
        if !extension.is_empty() {
            phone_number.set_extension(extension);
        }
        let mut region_metadata = default_region.and_then(|region| self.get_metadata_for_region(region));

        let (mut country_code, mut normalized_national_number) = match self.maybe_extract_country_code(
            &national_number,
            region_metadata,
            keep_raw_input,
            &mut phone_number,
        ) {
            Ok(result) => result,
            Err(InternalError::Inner(ParseError::InvalidCountryCode)) => {
                // A plus was typed before something that is not a country
                // code — maybe an IDD meant for the default region.
                let Some(plus_match) = self.patterns.plus_chars_pattern.find_start(&national_number)
                else {
                    return Err(ParseError::InvalidCountryCode.into());
                };
                let result = self.maybe_extract_country_code(
                    &national_number[plus_match.end()..],
                    region_metadata,
                    keep_raw_input,
                    &mut phone_number,
                )?;
                if result.0 == 0 {
                    return Err(ParseError::InvalidCountryCode.into());
                }
                result
            }
            Err(err) => return Err(err),
        };

        if country_code != 0 {
            let phone_number_region = self.get_region_code_for_country_code(country_code);
            if default_region != Some(phone_number_region) {
                region_metadata =
                    self.get_metadata_for_region_or_calling_code(country_code, phone_number_region);
            }
        } else {
            // No country code was extracted; the number is national to the
            // default region.
            self.normalize(&mut national_number);
            normalized_national_number = national_number;
            if let Some(metadata) = region_metadata {
                country_code = metadata.country_code();
                phone_number.set_country_code(country_code);
            } else if keep_raw_input {
                phone_number.clear_country_code_source();
            }
        }

        if normalized_national_number.chars().count() < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn.into());
        }
        if let Some(metadata) = region_metadata {
            // Only accept the stripped reading when what remains is still a
            // plausible length; the original may be a valid short number.
            let stripped = {
                let (potential_national_number, carrier_code) = self
                    .maybe_strip_national_prefix_and_carrier_code(
                        metadata,
                        &normalized_national_number,
                    )?;
                match test_number_length_with_unknown_type(&potential_national_number, metadata) {
                    Err(ValidationError::TooShort)
                    | Err(ValidationError::InvalidLength)
                    | Ok(NumberLengthType::IsPossibleLocalOnly) => None,
                    _ => match potential_national_number {
                        Cow::Owned(stripped_number) => Some((stripped_number, carrier_code)),
                        Cow::Borrowed(_) => None,
                    },
                }
            };
            if let Some((stripped_number, carrier_code)) = stripped {
                normalized_national_number = stripped_number;
                if keep_raw_input {
                    if let Some(code) = carrier_code.filter(|code| !code.is_empty()) {
                        phone_number.set_preferred_domestic_carrier_code(code);
                    }
                }
            }
        }
        let length_of_national_number = normalized_national_number.chars().count();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn.into());
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            return Err(ParseError::TooLong.into());
        }
        set_italian_leading_zeros_for_phone_number(&normalized_national_number, &mut phone_number);
        let national_number_value: u64 = normalized_national_number
            .parse()
            .map_err(|_| InternalError::Inner(ParseError::NotANumber))?;
        phone_number.set_national_number(national_number_value);
        Ok(phone_number)
    }

    // --- Validation ------------------------------------------------------

    fn is_number_matching_desc(&self, national_number: &str, desc: &PhoneNumberDesc) -> bool {
        let actual_length = national_number.chars().count() as i32;
        if !desc.possible_length.is_empty() && !desc.possible_length.contains(&actual_length) {
            return false;
        }
        self.matcher_api
            .match_national_number(national_number, desc, false)
    }

    pub(crate) fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, &metadata.general_desc) {
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, &metadata.premium_rate) {
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, &metadata.toll_free) {
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, &metadata.shared_cost) {
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, &metadata.voip) {
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, &metadata.personal_number) {
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, &metadata.pager) {
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, &metadata.uan) {
            return PhoneNumberType::UAN;
        }
        if self.is_number_matching_desc(national_number, &metadata.voicemail) {
            return PhoneNumberType::VoiceMail;
        }
        if self.is_number_matching_desc(national_number, &metadata.fixed_line) {
            if metadata.same_mobile_and_fixed_line_pattern {
                return PhoneNumberType::FixedLineOrMobile;
            }
            if self.is_number_matching_desc(national_number, &metadata.mobile) {
                return PhoneNumberType::FixedLineOrMobile;
            }
            return PhoneNumberType::FixedLine;
        }
        if !metadata.same_mobile_and_fixed_line_pattern
            && self.is_number_matching_desc(national_number, &metadata.mobile)
        {
            return PhoneNumberType::Mobile;
        }
        PhoneNumberType::Unknown
    }

    pub(crate) fn get_region_code_for_number(
        &self,
        number: &PhoneNumber,
    ) -> RegexResult<Option<&str>> {
        let country_code = number.country_code();
        let Some(regions) = self.country_code_to_region_codes.get(&country_code) else {
            return Ok(None);
        };
        if regions.len() == 1 {
            return Ok(Some(regions[0].as_str()));
        }
        let national_number = self.get_national_significant_number(number);
        for region_code in regions {
            let Some(metadata) = self.get_metadata_for_region(region_code) else {
                continue;
            };
            if metadata.has_leading_digits() {
                let leading_digits = self
                    .patterns
                    .regexp_cache
                    .get_regex(metadata.leading_digits())?;
                if leading_digits.find_start(&national_number).is_some() {
                    return Ok(Some(region_code.as_str()));
                }
            } else if self.get_number_type_helper(&national_number, metadata)
                != PhoneNumberType::Unknown
            {
                return Ok(Some(region_code.as_str()));
            }
        }
        Ok(None)
    }

    pub(crate) fn get_number_type(&self, number: &PhoneNumber) -> RegexResult<PhoneNumberType> {
        let region_code = self.get_region_code_for_number(number)?;
        let Some(metadata) = region_code.and_then(|region| {
            self.get_metadata_for_region_or_calling_code(number.country_code(), region)
        }) else {
            return Ok(PhoneNumberType::Unknown);
        };
        let national_number = self.get_national_significant_number(number);
        Ok(self.get_number_type_helper(&national_number, metadata))
    }

    pub(crate) fn is_valid_number(&self, number: &PhoneNumber) -> RegexResult<bool> {
        let Some(region_code) = self.get_region_code_for_number(number)? else {
            return Ok(false);
        };
        Ok(self.is_valid_number_for_region(number, region_code))
    }

    pub(crate) fn is_valid_number_for_region(&self, number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = number.country_code();
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if region_code != REGION_CODE_FOR_NON_GEO_ENTITY
            && self.get_country_code_for_region(region_code) != Some(country_code)
        {
            // The country code does not belong to the region at all.
            return false;
        }
        let national_number = self.get_national_significant_number(number);
        self.get_number_type_helper(&national_number, metadata) != PhoneNumberType::Unknown
    }

    pub(crate) fn is_possible_number(&self, number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(number).is_ok()
    }

    pub(crate) fn is_possible_number_with_reason(
        &self,
        number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError> {
        self.is_possible_number_for_type_with_reason(number, PhoneNumberType::Unknown)
    }

    pub(crate) fn is_possible_number_for_type_with_reason(
        &self,
        number: &PhoneNumber,
        number_type: PhoneNumberType,
    ) -> Result<NumberLengthType, ValidationError> {
        let national_number = self.get_national_significant_number(number);
        let country_code = number.country_code();
        if !self.has_valid_country_calling_code(country_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let region_code = self.get_region_code_for_country_code(country_code);
        let metadata = self
            .get_metadata_for_region_or_calling_code(country_code, region_code)
            .expect("metadata must exist for a valid calling code");
        test_number_length(&national_number, metadata, number_type)
    }

    pub(crate) fn truncate_too_long_number(&self, number: &mut PhoneNumber) -> RegexResult<bool> {
        if self.is_valid_number(number)? {
            return Ok(true);
        }
        let mut number_copy = number.clone();
        let mut national_number = number.national_number();
        loop {
            national_number /= 10;
            number_copy.set_national_number(national_number);
            if national_number == 0
                || self.is_possible_number_with_reason(&number_copy) == Err(ValidationError::TooShort)
            {
                return Ok(false);
            }
            if self.is_valid_number(&number_copy)? {
                break;
            }
        }
        number.set_national_number(national_number);
        Ok(true)
    }

    pub(crate) fn is_number_geographical(&self, number: &PhoneNumber) -> RegexResult<bool> {
        let number_type = self.get_number_type(number)?;
        Ok(self.is_number_type_geographical(number_type, number.country_code()))
    }

    pub(crate) fn is_number_type_geographical(
        &self,
        number_type: PhoneNumberType,
        country_calling_code: i32,
    ) -> bool {
        number_type == PhoneNumberType::FixedLine
            || number_type == PhoneNumberType::FixedLineOrMobile
            || (self
                .patterns
                .geo_mobile_countries
                .contains(&country_calling_code)
                && number_type == PhoneNumberType::Mobile)
    }

    pub(crate) fn can_be_internationally_dialled(&self, number: &PhoneNumber) -> RegexResult<bool> {
        let region_code = self.get_region_code_for_number(number)?;
        let Some(metadata) = region_code.and_then(|region| self.get_metadata_for_region(region))
        else {
            // Unknown regions (and non-geographical entities) are assumed
            // diallable from abroad.
            return Ok(true);
        };
        let national_number = self.get_national_significant_number(number);
        Ok(!self.is_number_matching_desc(&national_number, &metadata.no_international_dialling))
    }

    // --- Area code and NDC lengths ---------------------------------------

    pub(crate) fn get_country_mobile_token(&self, country_calling_code: i32) -> String {
        self.patterns
            .mobile_token_mappings
            .get(&country_calling_code)
            .map(|token| token.to_string())
            .unwrap_or_default()
    }

    /// Splits the INTERNATIONAL format on its separators; the digit runs
    /// are country code, NDC, and the rest.
    fn digit_groups_of_international_format(&self, number: &PhoneNumber) -> RegexResult<Vec<String>> {
        let mut number_no_extension = number.clone();
        number_no_extension.clear_extension();
        let formatted = self.format(&number_no_extension, PhoneNumberFormat::International)?;
        let mut groups: Vec<String> = Vec::new();
        let mut current = String::new();
        for c in formatted.chars() {
            if c.is_ascii_digit() {
                current.push(c);
            } else if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            groups.push(current);
        }
        Ok(groups)
    }

    pub(crate) fn get_length_of_national_destination_code(
        &self,
        number: &PhoneNumber,
    ) -> RegexResult<usize> {
        let groups = self.digit_groups_of_international_format(number)?;
        // groups[0] is the country code; an NDC needs at least one group
        // after it that is not the subscriber number.
        if groups.len() <= 2 {
            return Ok(0);
        }
        if self.get_number_type(number)? == PhoneNumberType::Mobile {
            // The mobile token is written before the area code and dialled
            // together with it.
            let mobile_token = self.get_country_mobile_token(number.country_code());
            if !mobile_token.is_empty() {
                return Ok(groups[1].len() + groups[2].len());
            }
        }
        Ok(groups[1].len())
    }

    pub(crate) fn get_length_of_geographical_area_code(
        &self,
        number: &PhoneNumber,
    ) -> RegexResult<usize> {
        let Some(region_code) = self.get_region_code_for_number(number)? else {
            return Ok(0);
        };
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Ok(0);
        };
        let country_calling_code = number.country_code();
        // Unless the plan writes area codes without a national prefix
        // (Mexico), a prefix-less region has no area code to speak of.
        if !metadata.has_national_prefix()
            && !number.italian_leading_zero()
            && !self
                .patterns
                .countries_without_national_prefix_with_area_codes
                .contains(&country_calling_code)
        {
            return Ok(0);
        }
        let number_type = self.get_number_type(number)?;
        if number_type == PhoneNumberType::Mobile
            && self
                .patterns
                .geo_mobile_countries_without_mobile_area_codes
                .contains(&country_calling_code)
        {
            return Ok(0);
        }
        if !self.is_number_type_geographical(number_type, country_calling_code) {
            return Ok(0);
        }
        self.get_length_of_national_destination_code(number)
    }

    // --- Formatting ------------------------------------------------------

    pub(crate) fn choose_formatting_pattern_for_number<'m>(
        &self,
        available_formats: &'m [NumberFormat],
        national_number: &str,
    ) -> RegexResult<Option<&'m NumberFormat>> {
        for number_format in available_formats {
            if let Some(last_leading_digits) = number_format.leading_digits_pattern.last() {
                let leading_digits_regex =
                    self.patterns.regexp_cache.get_regex(last_leading_digits)?;
                if leading_digits_regex.find_start(national_number).is_none() {
                    continue;
                }
            }
            let pattern = self.patterns.regexp_cache.get_regex(number_format.pattern())?;
            if pattern.full_match(national_number) {
                return Ok(Some(number_format));
            }
        }
        Ok(None)
    }

    pub(crate) fn format_nsn_using_pattern(
        &self,
        national_number: &str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        carrier_code: Option<&str>,
    ) -> RegexResult<String> {
        let number_format_rule = formatting_pattern.format();
        let pattern = self
            .patterns
            .regexp_cache
            .get_regex(formatting_pattern.pattern())?;
        let mut formatted_national_number;
        let carrier_code = carrier_code.filter(|code| !code.is_empty());
        if number_format == PhoneNumberFormat::National
            && carrier_code.is_some()
            && !formatting_pattern
                .domestic_carrier_code_formatting_rule()
                .is_empty()
        {
            // Replace the $CC in the carrier formatting rule, then splice
            // that rule in place of the first group of the format.
            let carrier_code_formatting_rule = self
                .patterns
                .carrier_code_pattern
                .replace(
                    formatting_pattern.domestic_carrier_code_formatting_rule(),
                    carrier_code.unwrap_or(""),
                )
                .into_owned();
            let rule_applied = self
                .patterns
                .first_group_capturing_pattern
                .replace(number_format_rule, carrier_code_formatting_rule.as_str());
            formatted_national_number = pattern
                .replace(national_number, rule_applied.as_ref())
                .into_owned();
        } else {
            let national_prefix_formatting_rule =
                formatting_pattern.national_prefix_formatting_rule();
            if number_format == PhoneNumberFormat::National
                && !national_prefix_formatting_rule.is_empty()
            {
                let rule_applied = self
                    .patterns
                    .first_group_capturing_pattern
                    .replace(number_format_rule, national_prefix_formatting_rule);
                formatted_national_number = pattern
                    .replace(national_number, rule_applied.as_ref())
                    .into_owned();
            } else {
                formatted_national_number = pattern
                    .replace(national_number, number_format_rule)
                    .into_owned();
            }
        }
        if number_format == PhoneNumberFormat::RFC3966 {
            // Strip leading punctuation, then turn separator runs into
            // single hyphens.
            if let Some(leading_separator) = self
                .patterns
                .separator_pattern
                .find_start(&formatted_national_number)
            {
                let end = leading_separator.end();
                formatted_national_number.drain(..end);
            }
            formatted_national_number = self
                .patterns
                .separator_pattern
                .replace_all(&formatted_national_number, "-")
                .into_owned();
        }
        Ok(formatted_national_number)
    }

    pub(crate) fn format_nsn(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        carrier_code: Option<&str>,
    ) -> RegexResult<String> {
        // International formats are only used when they exist and the
        // requested format is not NATIONAL.
        let available_formats = if metadata.intl_number_format.is_empty()
            || number_format == PhoneNumberFormat::National
        {
            &metadata.number_format
        } else {
            &metadata.intl_number_format
        };
        match self.choose_formatting_pattern_for_number(available_formats, national_number)? {
            Some(formatting_pattern) => self.format_nsn_using_pattern(
                national_number,
                formatting_pattern,
                number_format,
                carrier_code,
            ),
            None => Ok(national_number.to_owned()),
        }
    }

    fn maybe_append_formatted_extension(
        &self,
        number: &PhoneNumber,
        metadata: Option<&PhoneMetadata>,
        number_format: PhoneNumberFormat,
        formatted_number: &mut String,
    ) {
        if !number.has_extension() || number.extension().is_empty() {
            return;
        }
        if number_format == PhoneNumberFormat::RFC3966 {
            formatted_number.push_str(RFC3966_EXTN_PREFIX);
        } else if metadata.map(|m| m.has_preferred_extn_prefix()).unwrap_or(false) {
            formatted_number.push_str(metadata.map(|m| m.preferred_extn_prefix()).unwrap_or(""));
        } else {
            formatted_number.push_str(DEFAULT_EXTN_PREFIX);
        }
        formatted_number.push_str(number.extension());
    }

    pub(crate) fn format(
        &self,
        number: &PhoneNumber,
        number_format: PhoneNumberFormat,
    ) -> RegexResult<String> {
        if number.national_number() == 0 && number.has_raw_input() {
            // Unparseable numbers that kept their raw input are rendered
            // as entered.
            let raw_input = number.raw_input();
            if !raw_input.is_empty() {
                return Ok(raw_input.to_owned());
            }
        }
        let country_calling_code = number.country_code();
        let national_significant_number = self.get_national_significant_number(number);
        if number_format == PhoneNumberFormat::E164 {
            // E164 needs no formatting rules, only the minimum viable
            // assembly.
            let mut formatted_number = national_significant_number;
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::E164,
                &mut formatted_number,
            );
            return Ok(formatted_number);
        }
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(national_significant_number);
        }
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(national_significant_number);
        };
        let mut formatted_number =
            self.format_nsn(&national_significant_number, metadata, number_format, None)?;
        self.maybe_append_formatted_extension(
            number,
            Some(metadata),
            number_format,
            &mut formatted_number,
        );
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        Ok(formatted_number)
    }

    pub(crate) fn format_by_pattern(
        &self,
        number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> RegexResult<String> {
        let country_calling_code = number.country_code();
        let national_significant_number = self.get_national_significant_number(number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(national_significant_number);
        }
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(national_significant_number);
        };
        let mut formatted_number = match self
            .choose_formatting_pattern_for_number(user_defined_formats, &national_significant_number)?
        {
            None => national_significant_number.clone(),
            Some(formatting_pattern) => {
                let mut format_copy = formatting_pattern.clone();
                let national_prefix_formatting_rule =
                    formatting_pattern.national_prefix_formatting_rule();
                if !national_prefix_formatting_rule.is_empty() {
                    let national_prefix = metadata.national_prefix();
                    if !national_prefix.is_empty() {
                        // Caller-supplied rules still carry their raw
                        // placeholders.
                        format_copy.set_national_prefix_formatting_rule(resolve_formatting_rule(
                            national_prefix_formatting_rule,
                            national_prefix,
                        ));
                    } else {
                        format_copy.clear_national_prefix_formatting_rule();
                    }
                }
                self.format_nsn_using_pattern(
                    &national_significant_number,
                    &format_copy,
                    number_format,
                    None,
                )?
            }
        };
        self.maybe_append_formatted_extension(
            number,
            Some(metadata),
            number_format,
            &mut formatted_number,
        );
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        Ok(formatted_number)
    }

    pub(crate) fn format_national_number_with_carrier_code(
        &self,
        number: &PhoneNumber,
        carrier_code: &str,
    ) -> RegexResult<String> {
        let country_calling_code = number.country_code();
        let national_significant_number = self.get_national_significant_number(number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(national_significant_number);
        }
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(national_significant_number);
        };
        let mut formatted_number = self.format_nsn(
            &national_significant_number,
            metadata,
            PhoneNumberFormat::National,
            Some(carrier_code),
        )?;
        self.maybe_append_formatted_extension(
            number,
            Some(metadata),
            PhoneNumberFormat::National,
            &mut formatted_number,
        );
        Ok(formatted_number)
    }

    pub(crate) fn format_national_number_with_preferred_carrier_code(
        &self,
        number: &PhoneNumber,
        fallback_carrier_code: &str,
    ) -> RegexResult<String> {
        let carrier_code = if number.has_preferred_domestic_carrier_code() {
            number.preferred_domestic_carrier_code()
        } else {
            fallback_carrier_code
        };
        self.format_national_number_with_carrier_code(number, carrier_code)
    }

    pub(crate) fn format_out_of_country_calling_number(
        &self,
        number: &PhoneNumber,
        region_calling_from: &str,
    ) -> RegexResult<String> {
        if !self.is_valid_region_code(region_calling_from) {
            return self.format(number, PhoneNumberFormat::International);
        }
        let country_calling_code = number.country_code();
        let national_significant_number = self.get_national_significant_number(number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(national_significant_number);
        }
        if country_calling_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(region_calling_from) {
                // Within NANPA the country code is dialled in front of the
                // national format.
                let formatted = self.format(number, PhoneNumberFormat::National)?;
                let mut buf = itoa::Buffer::new();
                return Ok(fast_cat::concat_str!(
                    buf.format(country_calling_code),
                    " ",
                    &formatted
                ));
            }
        } else if Some(country_calling_code) == self.get_country_code_for_region(region_calling_from)
        {
            // Regions sharing a country calling code dial each other
            // nationally.
            return self.format(number, PhoneNumberFormat::National);
        }
        let metadata_calling_from = self
            .get_metadata_for_region(region_calling_from)
            .expect("metadata must exist for a valid region");
        let international_prefix = metadata_calling_from.international_prefix();
        // Only a unique IDD can be written out; otherwise fall back to the
        // preferred one, or to the bare international format.
        let international_prefix_for_formatting = if self
            .patterns
            .single_international_prefix
            .full_match(international_prefix)
        {
            international_prefix
        } else {
            metadata_calling_from.preferred_international_prefix()
        };
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata_for_region) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(national_significant_number);
        };
        let mut formatted_number = self.format_nsn(
            &national_significant_number,
            metadata_for_region,
            PhoneNumberFormat::International,
            None,
        )?;
        self.maybe_append_formatted_extension(
            number,
            Some(metadata_for_region),
            PhoneNumberFormat::International,
            &mut formatted_number,
        );
        if !international_prefix_for_formatting.is_empty() {
            let mut buf = itoa::Buffer::new();
            formatted_number = fast_cat::concat_str!(
                international_prefix_for_formatting,
                " ",
                buf.format(country_calling_code),
                " ",
                &formatted_number
            );
        } else {
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
        }
        Ok(formatted_number)
    }

    fn has_formatting_pattern_for_number(&self, number: &PhoneNumber) -> RegexResult<bool> {
        let country_calling_code = number.country_code();
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(false);
        };
        let national_number = self.get_national_significant_number(number);
        Ok(self
            .choose_formatting_pattern_for_number(&metadata.number_format, &national_number)?
            .is_some())
    }

    fn raw_input_contains_national_prefix(
        &self,
        raw_input: &str,
        national_prefix: &str,
        region_code: &str,
    ) -> RegexResult<bool> {
        let normalized_national_number = self.normalize_digits_only(raw_input);
        let Some(rest) = normalized_national_number.strip_prefix(national_prefix) else {
            return Ok(false);
        };
        // Some numbers legitimately start with the national prefix digits;
        // only treat the prefix as present when removing it still leaves a
        // valid number.
        match self.parse(rest, region_code) {
            Ok(parsed) => self.is_valid_number(&parsed),
            Err(InternalError::Inner(_)) => Ok(false),
            Err(InternalError::InvalidRegex(err)) => Err(err),
        }
    }

    fn format_original_from_default_country(
        &self,
        number: &PhoneNumber,
    ) -> RegexResult<String> {
        let region_code = self.get_region_code_for_country_code(number.country_code());
        let national_format = self.format(number, PhoneNumberFormat::National)?;
        let Some(national_prefix) = self
            .get_ndd_prefix_for_region(region_code, true)
            .filter(|prefix| !prefix.is_empty())
        else {
            return Ok(national_format);
        };
        if self.raw_input_contains_national_prefix(number.raw_input(), &national_prefix, region_code)? {
            return Ok(national_format);
        }
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Ok(national_format);
        };
        let national_number = self.get_national_significant_number(number);
        let Some(format_rule) =
            self.choose_formatting_pattern_for_number(&metadata.number_format, &national_number)?
        else {
            return Ok(national_format);
        };
        // When the rule both exists and actually writes digits before the
        // first group, the user omitted the national prefix, so format
        // without it.
        let candidate_national_prefix_rule = format_rule.national_prefix_formatting_rule();
        let Some(index_of_first_group) = candidate_national_prefix_rule.find("$1") else {
            return Ok(national_format);
        };
        if index_of_first_group == 0 {
            return Ok(national_format);
        }
        let candidate_prefix =
            self.normalize_digits_only(&candidate_national_prefix_rule[..index_of_first_group]);
        if candidate_prefix.is_empty() {
            return Ok(national_format);
        }
        let mut format_copy = format_rule.clone();
        format_copy.clear_national_prefix_formatting_rule();
        self.format_by_pattern(
            number,
            PhoneNumberFormat::National,
            std::slice::from_ref(&format_copy),
        )
    }

    pub(crate) fn format_in_original_format(
        &self,
        number: &PhoneNumber,
        region_calling_from: &str,
    ) -> RegexResult<String> {
        if number.has_raw_input() && !self.has_formatting_pattern_for_number(number)? {
            return Ok(number.raw_input().to_owned());
        }
        if !number.has_country_code_source() {
            return self.format(number, PhoneNumberFormat::National);
        }
        let formatted_number = match number.country_code_source() {
            CountryCodeSource::FROM_NUMBER_WITH_PLUS_SIGN => {
                self.format(number, PhoneNumberFormat::International)?
            }
            CountryCodeSource::FROM_NUMBER_WITH_IDD => {
                self.format_out_of_country_calling_number(number, region_calling_from)?
            }
            CountryCodeSource::FROM_NUMBER_WITHOUT_PLUS_SIGN => self
                .format(number, PhoneNumberFormat::International)?
                .trim_start_matches('+')
                .to_owned(),
            _ => self.format_original_from_default_country(number)?,
        };
        // If the reformatted number no longer agrees with the raw input,
        // the raw input wins.
        let raw_input = number.raw_input();
        if !formatted_number.is_empty() && !raw_input.is_empty() {
            let normalized_formatted = self.normalize_diallable_chars_only(&formatted_number);
            let normalized_raw_input = self.normalize_diallable_chars_only(raw_input);
            if normalized_formatted != normalized_raw_input {
                return Ok(raw_input.to_owned());
            }
        }
        Ok(formatted_number)
    }

    pub(crate) fn format_out_of_country_keeping_alpha_chars(
        &self,
        number: &PhoneNumber,
        region_calling_from: &str,
    ) -> RegexResult<String> {
        let mut raw_input = number.raw_input().to_owned();
        if raw_input.is_empty() {
            // Nothing to keep; fall through to the ordinary rendering.
            return self.format_out_of_country_calling_number(number, region_calling_from);
        }
        let country_code = number.country_code();
        if !self.has_valid_country_calling_code(country_code) {
            return Ok(raw_input);
        }
        // Strip the prefixes the user typed, keeping letters and grouping
        // symbols, then cut everything before the national number.
        normalize_helper(
            &self.patterns.all_plus_number_grouping_symbols,
            true,
            &mut raw_input,
        );
        let national_number = self.get_national_significant_number(number);
        if national_number.len() > 3 {
            if let Some(first_national_number_digit) = raw_input.find(&national_number[..3]) {
                raw_input = raw_input[first_national_number_digit..].to_owned();
            }
        }
        let metadata_for_region_calling_from = self.get_metadata_for_region(region_calling_from);
        if country_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(region_calling_from) {
                let mut buf = itoa::Buffer::new();
                return Ok(fast_cat::concat_str!(buf.format(country_code), " ", &raw_input));
            }
        } else if metadata_for_region_calling_from.is_some()
            && Some(country_code) == self.get_country_code_for_region(region_calling_from)
        {
            let Some(formatting_pattern) = self.choose_formatting_pattern_for_number(
                &metadata_for_region_calling_from
                    .expect("checked above")
                    .number_format,
                &national_number,
            )?
            else {
                return Ok(raw_input);
            };
            // Keep the punctuation the user typed: match everything and
            // reuse the grouping of the raw input.
            let mut new_format = formatting_pattern.clone();
            new_format.set_pattern("(\\d+)(.*)");
            new_format.set_format("$1$2");
            return self.format_nsn_using_pattern(
                &raw_input,
                &new_format,
                PhoneNumberFormat::National,
                None,
            );
        }
        let international_prefix_for_formatting = metadata_for_region_calling_from
            .map(|metadata| {
                let international_prefix = metadata.international_prefix();
                if self
                    .patterns
                    .single_international_prefix
                    .full_match(international_prefix)
                {
                    international_prefix
                } else {
                    metadata.preferred_international_prefix()
                }
            })
            .unwrap_or("");
        let region_code = self.get_region_code_for_country_code(country_code);
        let metadata_for_region =
            self.get_metadata_for_region_or_calling_code(country_code, region_code);
        let mut formatted_number = raw_input;
        self.maybe_append_formatted_extension(
            number,
            metadata_for_region,
            PhoneNumberFormat::International,
            &mut formatted_number,
        );
        if !international_prefix_for_formatting.is_empty() {
            let mut buf = itoa::Buffer::new();
            formatted_number = fast_cat::concat_str!(
                international_prefix_for_formatting,
                " ",
                buf.format(country_code),
                " ",
                &formatted_number
            );
        } else {
            prefix_number_with_country_calling_code(
                country_code,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
        }
        Ok(formatted_number)
    }

    pub(crate) fn format_number_for_mobile_dialing(
        &self,
        number: &PhoneNumber,
        region_calling_from: &str,
        with_formatting: bool,
    ) -> RegexResult<String> {
        let country_calling_code = number.country_code();
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(number.raw_input().to_owned());
        }
        let mut number_no_extension = number.clone();
        number_no_extension.clear_extension();
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let number_type = self.get_number_type(&number_no_extension)?;
        let is_valid_number = number_type != PhoneNumberType::Unknown;
        let formatted_number = if region_calling_from == region_code {
            if number.has_raw_input() && number.raw_input().starts_with('*') {
                // Star-prefixed service numbers are dialled exactly as
                // entered.
                number.raw_input().to_owned()
            } else {
                self.format(&number_no_extension, PhoneNumberFormat::National)?
            }
        } else if is_valid_number && self.can_be_internationally_dialled(&number_no_extension)? {
            return if with_formatting {
                self.format(&number_no_extension, PhoneNumberFormat::International)
            } else {
                self.format(&number_no_extension, PhoneNumberFormat::E164)
            };
        } else {
            // Not diallable from the caller's region.
            String::new()
        };
        Ok(if with_formatting {
            formatted_number
        } else {
            self.normalize_diallable_chars_only(&formatted_number)
        })
    }

    // --- Example numbers -------------------------------------------------

    pub(crate) fn get_example_number(
        &self,
        region_code: &str,
    ) -> Result<PhoneNumber, InternalError<GetExampleNumberError>> {
        self.get_example_number_for_type_and_region_code(region_code, PhoneNumberType::FixedLine)
    }

    pub(crate) fn get_example_number_for_type_and_region_code(
        &self,
        region_code: &str,
        number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, InternalError<GetExampleNumberError>> {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Err(GetExampleNumberError::InvalidRegionCode.into());
        };
        let desc = get_number_desc_by_type(metadata, number_type);
        if !desc.has_example_number() {
            return Err(GetExampleNumberError::NoExampleNumber.into());
        }
        self.parse(desc.example_number(), region_code)
            .map_err(InternalError::<GetExampleNumberError>::from)
    }

    pub(crate) fn get_example_number_for_type(
        &self,
        number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, InternalError<GetExampleNumberError>> {
        for region_code in self.get_supported_regions() {
            if let Ok(number) = self.get_example_number_for_type_and_region_code(region_code, number_type)
            {
                return Ok(number);
            }
        }
        // Fall back to the non-geographical entities.
        for (country_calling_code, metadata) in &self.non_geo_metadata {
            let desc = get_number_desc_by_type(metadata, number_type);
            if desc.has_example_number() {
                let mut buf = itoa::Buffer::new();
                let candidate = fast_cat::concat_str!(
                    "+",
                    buf.format(*country_calling_code),
                    desc.example_number()
                );
                match self.parse_helper(&candidate, None, false, false) {
                    Ok(number) => return Ok(number),
                    Err(InternalError::InvalidRegex(err)) => {
                        return Err(InternalError::InvalidRegex(err))
                    }
                    Err(InternalError::Inner(_)) => continue,
                }
            }
        }
        Err(GetExampleNumberError::CouldNotGetNumber.into())
    }

    pub(crate) fn get_example_number_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Result<PhoneNumber, InternalError<GetExampleNumberError>> {
        let Some(metadata) = self.get_metadata_for_non_geographical_region(country_calling_code)
        else {
            return Err(GetExampleNumberError::InvalidRegionCode.into());
        };
        // Try the types a non-geographical plan commonly fills.
        for desc in [
            &metadata.mobile,
            &metadata.toll_free,
            &metadata.shared_cost,
            &metadata.voip,
            &metadata.voicemail,
            &metadata.uan,
            &metadata.premium_rate,
        ] {
            if desc.has_example_number() {
                let mut buf = itoa::Buffer::new();
                let candidate = fast_cat::concat_str!(
                    "+",
                    buf.format(country_calling_code),
                    desc.example_number()
                );
                match self.parse_helper(&candidate, None, false, false) {
                    Ok(number) => return Ok(number),
                    Err(InternalError::InvalidRegex(err)) => {
                        return Err(InternalError::InvalidRegex(err))
                    }
                    Err(InternalError::Inner(_)) => continue,
                }
            }
        }
        Err(GetExampleNumberError::CouldNotGetNumber.into())
    }

    pub(crate) fn get_invalid_example_number(
        &self,
        region_code: &str,
    ) -> Result<PhoneNumber, InternalError<GetExampleNumberError>> {
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Err(GetExampleNumberError::InvalidRegionCode.into());
        };
        // Start from a valid fixed-line example and shorten it until it
        // stops being valid. There is no guarantee such a number exists;
        // give up below MIN_LENGTH_FOR_NSN.
        let desc = &metadata.fixed_line;
        if !desc.has_example_number() {
            return Err(GetExampleNumberError::CouldNotGetNumber.into());
        }
        let example_number = desc.example_number();
        for length in (MIN_LENGTH_FOR_NSN..example_number.len()).rev() {
            let number_to_try = &example_number[..length];
            match self.parse(number_to_try, region_code) {
                Ok(potentially_invalid_number) => {
                    if !self
                        .is_valid_number(&potentially_invalid_number)
                        .map_err(InternalError::<GetExampleNumberError>::InvalidRegex)?
                    {
                        return Ok(potentially_invalid_number);
                    }
                }
                Err(InternalError::InvalidRegex(err)) => {
                    return Err(InternalError::InvalidRegex(err))
                }
                Err(InternalError::Inner(_)) => continue,
            }
        }
        Err(GetExampleNumberError::CouldNotGetNumber.into())
    }

    // --- Number matching -------------------------------------------------

    fn is_number_match_numbers(&self, first: &PhoneNumber, second: &PhoneNumber) -> MatchType {
        let mut first_number = PhoneNumber::new();
        copy_core_fields_only(first, &mut first_number);
        let mut second_number = PhoneNumber::new();
        copy_core_fields_only(second, &mut second_number);
        if first_number.has_extension()
            && second_number.has_extension()
            && first_number.extension() != second_number.extension()
        {
            return MatchType::NoMatch;
        }
        let first_number_country_code = first_number.country_code();
        let second_number_country_code = second_number.country_code();
        if first_number_country_code != 0 && second_number_country_code != 0 {
            if first_number == second_number {
                return MatchType::ExactMatch;
            }
            if first_number_country_code == second_number_country_code
                && is_national_number_suffix_of_the_other(&first_number, &second_number)
            {
                return MatchType::ShortNsnMatch;
            }
            return MatchType::NoMatch;
        }
        // With a country code missing on one side, compare with it copied
        // over.
        first_number.set_country_code(second_number_country_code);
        if first_number == second_number {
            return MatchType::NsnMatch;
        }
        if is_national_number_suffix_of_the_other(&first_number, &second_number) {
            return MatchType::ShortNsnMatch;
        }
        MatchType::NoMatch
    }

    fn is_number_match_number_with_string(
        &self,
        first: &PhoneNumber,
        second: &str,
    ) -> MatchType {
        match self.parse(second, RegionCode::get_unknown()) {
            Ok(second_number) => self.is_number_match_numbers(first, &second_number),
            Err(InternalError::Inner(ParseError::InvalidCountryCode)) => {
                let first_number_region =
                    self.get_region_code_for_country_code(first.country_code());
                if first_number_region != RegionCode::get_unknown() {
                    match self.parse(second, first_number_region) {
                        Ok(second_number_with_first_number_region) => {
                            let match_type = self.is_number_match_numbers(
                                first,
                                &second_number_with_first_number_region,
                            );
                            if match_type == MatchType::ExactMatch {
                                // The country code was inferred rather than
                                // written, so this cannot be exact.
                                return MatchType::NsnMatch;
                            }
                            match_type
                        }
                        Err(_) => MatchType::NotANumber,
                    }
                } else {
                    // Region unknown on both sides: compare without
                    // region-dependent stripping.
                    match self.parse_helper(second, None, false, false) {
                        Ok(second_number) => self.is_number_match_numbers(first, &second_number),
                        Err(_) => MatchType::NotANumber,
                    }
                }
            }
            Err(_) => MatchType::NotANumber,
        }
    }

    fn is_number_match_strings(&self, first: &str, second: &str) -> MatchType {
        match self.parse(first, RegionCode::get_unknown()) {
            Ok(first_number) => self.is_number_match_number_with_string(&first_number, second),
            Err(InternalError::Inner(ParseError::InvalidCountryCode)) => {
                match self.parse(second, RegionCode::get_unknown()) {
                    Ok(second_number) => {
                        self.is_number_match_number_with_string(&second_number, first)
                    }
                    Err(InternalError::Inner(ParseError::InvalidCountryCode)) => {
                        let first_parsed = self.parse_helper(first, None, false, false);
                        let second_parsed = self.parse_helper(second, None, false, false);
                        match (first_parsed, second_parsed) {
                            (Ok(first_number), Ok(second_number)) => {
                                self.is_number_match_numbers(&first_number, &second_number)
                            }
                            _ => MatchType::NotANumber,
                        }
                    }
                    Err(_) => MatchType::NotANumber,
                }
            }
            Err(_) => MatchType::NotANumber,
        }
    }

    pub(crate) fn is_number_match(&self, first: NumberOrStr, second: NumberOrStr) -> MatchType {
        match (first, second) {
            (NumberOrStr::Number(first_number), NumberOrStr::Number(second_number)) => {
                self.is_number_match_numbers(first_number, second_number)
            }
            (NumberOrStr::Number(first_number), NumberOrStr::Str(second_string)) => {
                self.is_number_match_number_with_string(first_number, second_string)
            }
            (NumberOrStr::Str(first_string), NumberOrStr::Number(second_number)) => {
                self.is_number_match_number_with_string(second_number, first_string)
            }
            (NumberOrStr::Str(first_string), NumberOrStr::Str(second_string)) => {
                self.is_number_match_strings(first_string, second_string)
            }
        }
    }

    /// True when the formatting rule renders nothing but the first group
    /// (possibly parenthesised), i.e. does not write a national prefix.
    pub(crate) fn formatting_rule_has_first_group_only(&self, national_prefix_formatting_rule: &str) -> bool {
        national_prefix_formatting_rule.is_empty()
            || self
                .patterns
                .formatting_rule_first_group_only_pattern
                .is_match(national_prefix_formatting_rule)
    }
}
