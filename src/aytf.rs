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

//! Formats phone numbers on the fly, one keystroke at a time.
//!
//! The formatter keeps a template built from the region's number formats
//! with a placeholder per digit; each entered digit overwrites the next
//! placeholder. When the input stops matching every candidate format the
//! formatter degrades to echoing the raw input — no digit is ever lost.

use crate::metadata::{NumberFormat, PhoneMetadata};
use crate::regex_util::{RegexConsume, RegexFullMatch};
use crate::util::consts::REGION_CODE_FOR_NON_GEO_ENTITY;
use crate::util::PhoneNumberUtil;

/// Stands in for a digit that has not been typed yet. U+2008
/// (punctuation space) never occurs in number formats themselves.
const DIGIT_PLACEHOLDER: char = '\u{2008}';
const SEPARATOR_BEFORE_NATIONAL_NUMBER: char = ' ';
/// Formatting only starts once this many digits are known.
const MIN_LEADING_DIGITS_LENGTH: usize = 3;
/// The pattern probe: enough nines to satisfy any national number
/// pattern.
const LONGEST_PHONE_NUMBER: &str = "999999999999999";

/// Rewrites a number pattern so it matches plain digit strings: every
/// character class and every standalone digit (quantifier bounds stay)
/// becomes `\d`.
fn discard_character_classes_and_digits(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;
    let mut in_braces = false;
    while let Some(c) = chars.next() {
        if in_class {
            if c == ']' {
                in_class = false;
            }
            continue;
        }
        match c {
            '[' => {
                in_class = true;
                out.push_str("\\d");
            }
            '{' => {
                in_braces = true;
                out.push(c);
            }
            '}' => {
                in_braces = false;
                out.push(c);
            }
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            c if c.is_ascii_digit() && !in_braces => out.push_str("\\d"),
            c => out.push(c),
        }
    }
    out
}

fn rule_contains_national_prefix_separator(national_prefix_formatting_rule: &str) -> bool {
    national_prefix_formatting_rule
        .chars()
        .any(|c| c == '-' || c == ' ')
}

/// A stateful per-input-session formatter obtained from
/// [`PhoneNumberUtil::get_as_you_type_formatter`].
pub struct AsYouTypeFormatter<'a> {
    util: &'a PhoneNumberUtil,
    default_region: String,
    current_metadata: Option<&'a PhoneMetadata>,

    current_output: String,
    formatting_template: String,
    /// The pattern of the number format the template was built from.
    current_formatting_pattern: String,
    accrued_input: String,
    accrued_input_without_formatting: String,
    /// Cleared by an unexpected character; from then on the raw input is
    /// echoed back for the rest of the session.
    able_to_format: bool,
    /// Set when the user typed formatting characters themselves.
    input_has_formatting: bool,
    /// Set when a `+`, an IDD, or a NANPA national prefix `1` shows the
    /// input to be a complete (internationally routable) number.
    is_complete_number: bool,
    is_expecting_country_calling_code: bool,
    last_match_position: usize,
    /// Byte length of the accrued input at the remembered caret, and the
    /// raw caret as typed.
    position_to_remember: usize,
    original_position: usize,
    /// IDD and/or country code, with the separators they are displayed
    /// with.
    prefix_before_national_number: String,
    should_add_space_after_national_prefix: bool,
    extracted_national_prefix: String,
    national_number: String,
    possible_formats: Vec<NumberFormat>,
}

impl<'a> AsYouTypeFormatter<'a> {
    pub(crate) fn new(util: &'a PhoneNumberUtil, region_code: &str) -> Self {
        Self {
            util,
            default_region: region_code.to_owned(),
            current_metadata: util.core.get_metadata_for_region(region_code),
            current_output: String::new(),
            formatting_template: String::new(),
            current_formatting_pattern: String::new(),
            accrued_input: String::new(),
            accrued_input_without_formatting: String::new(),
            able_to_format: true,
            input_has_formatting: false,
            is_complete_number: false,
            is_expecting_country_calling_code: false,
            last_match_position: 0,
            position_to_remember: 0,
            original_position: 0,
            prefix_before_national_number: String::new(),
            should_add_space_after_national_prefix: false,
            extracted_national_prefix: String::new(),
            national_number: String::new(),
            possible_formats: Vec::new(),
        }
    }

    /// Resets the session, keeping the default region.
    pub fn clear(&mut self) {
        self.current_output.clear();
        self.accrued_input.clear();
        self.accrued_input_without_formatting.clear();
        self.formatting_template.clear();
        self.last_match_position = 0;
        self.current_formatting_pattern.clear();
        self.prefix_before_national_number.clear();
        self.extracted_national_prefix.clear();
        self.national_number.clear();
        self.able_to_format = true;
        self.input_has_formatting = false;
        self.position_to_remember = 0;
        self.original_position = 0;
        self.is_complete_number = false;
        self.is_expecting_country_calling_code = false;
        self.possible_formats.clear();
        self.should_add_space_after_national_prefix = false;
        self.current_metadata = self.util.core.get_metadata_for_region(&self.default_region);
    }

    /// Feeds the next typed character and returns the best formatting of
    /// everything typed so far.
    pub fn input_digit(&mut self, next_char: char) -> String {
        let output = self.input_digit_with_option_to_remember_position(next_char, false);
        self.current_output = output.clone();
        output
    }

    /// Like [`input_digit`](Self::input_digit), additionally marking the
    /// caret right after this character so
    /// [`get_remembered_position`](Self::get_remembered_position) can
    /// find it again in later output.
    pub fn input_digit_and_remember_position(&mut self, next_char: char) -> String {
        let output = self.input_digit_with_option_to_remember_position(next_char, true);
        self.current_output = output.clone();
        output
    }

    /// Convenience wrapper feeding a whole string; returns the output
    /// after the last character.
    pub fn input_string(&mut self, text: &str) -> String {
        let mut output = self.current_output.clone();
        for c in text.chars() {
            output = self.input_digit(c);
        }
        output
    }

    /// Translates the remembered raw-input caret into an index (in
    /// characters) within the current output.
    pub fn get_remembered_position(&self) -> usize {
        if !self.able_to_format {
            return self.original_position;
        }
        let accrued: Vec<char> = self.accrued_input_without_formatting.chars().collect();
        let output: Vec<char> = self.current_output.chars().collect();
        let mut accrued_input_index = 0;
        let mut current_output_index = 0;
        // Walk the two strings in lockstep over matching characters.
        while accrued_input_index < self.position_to_remember
            && current_output_index < output.len()
        {
            if accrued.get(accrued_input_index) == output.get(current_output_index) {
                accrued_input_index += 1;
            }
            current_output_index += 1;
        }
        current_output_index
    }

    fn input_digit_with_option_to_remember_position(
        &mut self,
        next_char: char,
        remember_position: bool,
    ) -> String {
        self.accrued_input.push(next_char);
        if remember_position {
            self.original_position = self.accrued_input.chars().count();
        }
        // Formatting stays on only while each character is a digit or a
        // leading plus sign.
        let next_char = if !self.is_digit_or_leading_plus_sign(next_char) {
            self.able_to_format = false;
            self.input_has_formatting = true;
            next_char
        } else {
            self.normalize_and_accrue_digits_and_plus_sign(next_char, remember_position)
        };
        if !self.able_to_format {
            // Once the user typed their own formatting we echo; but a
            // long IDD or NDD may still be extractable, making the rest
            // formattable again.
            if self.input_has_formatting {
                return self.accrued_input.clone();
            } else if self.attempt_to_extract_idd() {
                if self.attempt_to_extract_country_calling_code() {
                    return self.attempt_to_choose_pattern_with_prefix_extracted();
                }
            } else if self.able_to_extract_longer_ndd() {
                self.prefix_before_national_number
                    .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
                return self.attempt_to_choose_pattern_with_prefix_extracted();
            }
            return self.accrued_input.clone();
        }
        match self.accrued_input_without_formatting.chars().count() {
            0..=2 => self.accrued_input.clone(),
            3 => {
                if self.attempt_to_extract_idd() {
                    self.is_expecting_country_calling_code = true;
                    self.input_digit_after_leading(next_char)
                } else {
                    // No IDD typed, so the leading digits may carry a
                    // national prefix instead.
                    self.extracted_national_prefix =
                        self.remove_national_prefix_from_national_number();
                    self.attempt_to_choose_formatting_pattern()
                }
            }
            _ => self.input_digit_after_leading(next_char),
        }
    }

    fn input_digit_after_leading(&mut self, next_char: char) -> String {
        if self.is_expecting_country_calling_code {
            if self.attempt_to_extract_country_calling_code() {
                self.is_expecting_country_calling_code = false;
            }
            return fast_cat::concat_str!(&self.prefix_before_national_number, &self.national_number);
        }
        if !self.possible_formats.is_empty() {
            // The formatting template is in play.
            let temp_national_number = self.input_digit_helper(next_char);
            let formatted_number = self.attempt_to_format_accrued_digits();
            if !formatted_number.is_empty() {
                return formatted_number;
            }
            let leading_digits = self.national_number.clone();
            self.narrow_down_possible_formats(&leading_digits);
            if self.maybe_create_new_template() {
                return self.input_accrued_national_number();
            }
            if self.able_to_format {
                self.append_national_number(&temp_national_number)
            } else {
                self.accrued_input.clone()
            }
        } else {
            self.attempt_to_choose_formatting_pattern()
        }
    }

    fn is_digit_or_leading_plus_sign(&self, next_char: char) -> bool {
        let mut buf = [0u8; 4];
        let as_str: &str = next_char.encode_utf8(&mut buf);
        if self
            .util
            .core
            .patterns
            .capturing_digit_pattern
            .full_match(as_str)
        {
            return true;
        }
        self.accrued_input.chars().count() == 1
            && self.util.core.patterns.plus_chars_pattern.full_match(as_str)
    }

    fn normalize_and_accrue_digits_and_plus_sign(
        &mut self,
        next_char: char,
        remember_position: bool,
    ) -> char {
        let normalized_char = if next_char == '+' {
            self.accrued_input_without_formatting.push(next_char);
            next_char
        } else {
            let folded = dec_from_char::normalize_decimals(next_char.to_string().as_str());
            let normalized_char = folded.chars().next().unwrap_or(next_char);
            self.accrued_input_without_formatting.push(normalized_char);
            self.national_number.push(normalized_char);
            normalized_char
        };
        if remember_position {
            self.position_to_remember = self.accrued_input_without_formatting.chars().count();
        }
        normalized_char
    }

    fn attempt_to_choose_pattern_with_prefix_extracted(&mut self) -> String {
        self.able_to_format = true;
        self.is_expecting_country_calling_code = false;
        self.possible_formats.clear();
        self.last_match_position = 0;
        self.formatting_template.clear();
        self.current_formatting_pattern.clear();
        self.attempt_to_choose_formatting_pattern()
    }

    /// Puts a previously extracted NDD back and retries extraction; a
    /// longer prefix may have become recognizable with more digits.
    fn able_to_extract_longer_ndd(&mut self) -> bool {
        if !self.extracted_national_prefix.is_empty() {
            self.national_number
                .insert_str(0, &self.extracted_national_prefix);
            if let Some(index) = self
                .prefix_before_national_number
                .rfind(&self.extracted_national_prefix)
            {
                self.prefix_before_national_number.truncate(index);
            }
        }
        let national_prefix = self.remove_national_prefix_from_national_number();
        self.extracted_national_prefix != national_prefix
    }

    fn attempt_to_choose_formatting_pattern(&mut self) -> String {
        if self.national_number.chars().count() >= MIN_LEADING_DIGITS_LENGTH {
            self.get_available_formats();
            let formatted_number = self.attempt_to_format_accrued_digits();
            if !formatted_number.is_empty() {
                return formatted_number;
            }
            if self.maybe_create_new_template() {
                self.input_accrued_national_number()
            } else {
                self.accrued_input.clone()
            }
        } else {
            let national_number = self.national_number.clone();
            self.append_national_number(&national_number)
        }
    }

    fn get_available_formats(&mut self) {
        self.possible_formats.clear();
        let Some(metadata) = self.current_metadata else {
            return;
        };
        // A number entered with its country code is formatted with the
        // international rules when the region distinguishes them.
        let is_international_number =
            self.is_complete_number && self.extracted_national_prefix.is_empty();
        let format_list: &[NumberFormat] =
            if is_international_number && !metadata.intl_number_format().is_empty() {
                metadata.intl_number_format()
            } else {
                metadata.number_format()
            };
        for format in format_list {
            let rule = format.national_prefix_formatting_rule();
            if !self.extracted_national_prefix.is_empty()
                && !rule.is_empty()
                && self.util.core.formatting_rule_has_first_group_only(rule)
                && !format.national_prefix_optional_when_formatting()
                && !format.has_domestic_carrier_code_formatting_rule()
            {
                // A national prefix was typed but this format deliberately
                // writes the number without one.
                continue;
            } else if self.extracted_national_prefix.is_empty()
                && !self.is_complete_number
                && !self.util.core.formatting_rule_has_first_group_only(rule)
                && !format.national_prefix_optional_when_formatting()
            {
                // This format insists on a national prefix the user did
                // not type.
                continue;
            }
            if self
                .util
                .core
                .patterns
                .aytf_eligible_format_pattern
                .is_match(format.format())
            {
                self.possible_formats.push(format.clone());
            }
        }
        let leading_digits = self.national_number.clone();
        self.narrow_down_possible_formats(&leading_digits);
    }

    fn narrow_down_possible_formats(&mut self, leading_digits: &str) {
        let leading_digits_length = leading_digits.chars().count();
        if leading_digits_length < MIN_LEADING_DIGITS_LENGTH {
            return;
        }
        let index_of_leading_digits_pattern = leading_digits_length - MIN_LEADING_DIGITS_LENGTH;
        let cache = &self.util.core.patterns.regexp_cache;
        self.possible_formats.retain(|format| {
            if format.leading_digits_pattern().is_empty() {
                // The format fits all lengths.
                return true;
            }
            let last_index =
                index_of_leading_digits_pattern.min(format.leading_digits_pattern().len() - 1);
            let leading_digits_pattern = &format.leading_digits_pattern()[last_index];
            match cache.get_regex(leading_digits_pattern) {
                Ok(regex) => regex.find_start(leading_digits).is_some(),
                Err(_) => false,
            }
        });
    }

    fn attempt_to_format_accrued_digits(&mut self) -> String {
        let formats = self.possible_formats.clone();
        for format in &formats {
            let Ok(regex) = self.util.core.patterns.regexp_cache.get_regex(format.pattern())
            else {
                continue;
            };
            if regex.full_match(&self.national_number) {
                self.should_add_space_after_national_prefix =
                    rule_contains_national_prefix_separator(format.national_prefix_formatting_rule());
                let formatted_number = regex
                    .replace(&self.national_number, format.format())
                    .into_owned();
                let full_output = self.append_national_number(&formatted_number);
                let formatted_number_digits =
                    self.util.core.normalize_diallable_chars_only(&full_output);
                if formatted_number_digits == self.accrued_input_without_formatting {
                    // The candidate rendering contains every typed digit;
                    // it is safe to show.
                    return full_output;
                }
            }
        }
        String::new()
    }

    fn append_national_number(&self, national_number: &str) -> String {
        let prefix = &self.prefix_before_national_number;
        if self.should_add_space_after_national_prefix
            && !prefix.is_empty()
            && !prefix.ends_with(SEPARATOR_BEFORE_NATIONAL_NUMBER)
        {
            return fast_cat::concat_str!(prefix, " ", national_number);
        }
        fast_cat::concat_str!(prefix, national_number)
    }

    fn maybe_create_new_template(&mut self) -> bool {
        let index = 0;
        while index < self.possible_formats.len() {
            let format = self.possible_formats[index].clone();
            if self.current_formatting_pattern == format.pattern() {
                return false;
            }
            if self.create_formatting_template(&format) {
                self.current_formatting_pattern = format.pattern().to_owned();
                self.should_add_space_after_national_prefix =
                    rule_contains_national_prefix_separator(format.national_prefix_formatting_rule());
                // With a new template, digits are refilled from scratch.
                self.last_match_position = 0;
                return true;
            }
            // Removal shifts the next candidate into place.
            self.possible_formats.remove(index);
        }
        self.able_to_format = false;
        false
    }

    fn create_formatting_template(&mut self, format: &NumberFormat) -> bool {
        let number_pattern = format.pattern();
        if number_pattern.contains('|') {
            // Alternations make the digit count ambiguous.
            return false;
        }
        let number_pattern = discard_character_classes_and_digits(number_pattern);
        match self.get_formatting_template(&number_pattern, format.format()) {
            Some(template) if !template.is_empty() => {
                self.formatting_template = template;
                true
            }
            _ => false,
        }
    }

    fn get_formatting_template(&self, number_pattern: &str, number_format: &str) -> Option<String> {
        let regex = self
            .util
            .core
            .patterns
            .regexp_cache
            .get_regex(number_pattern)
            .ok()?;
        // Probe with the longest possible run of nines and keep the first
        // (greedy) match as the synthetic number.
        let matched = regex.find(LONGEST_PHONE_NUMBER)?;
        let a_phone_number = matched.as_str();
        if a_phone_number.len() < self.national_number.len() {
            // Template cannot hold the digits already typed.
            return None;
        }
        let template = regex.replace(a_phone_number, number_format).into_owned();
        Some(template.replace('9', &DIGIT_PLACEHOLDER.to_string()))
    }

    fn input_accrued_national_number(&mut self) -> String {
        if self.national_number.is_empty() {
            return self.prefix_before_national_number.clone();
        }
        let digits: Vec<char> = self.national_number.chars().collect();
        let mut temp_national_number = String::new();
        for digit in digits {
            temp_national_number = self.input_digit_helper(digit);
        }
        if self.able_to_format {
            self.append_national_number(&temp_national_number)
        } else {
            self.accrued_input.clone()
        }
    }

    fn input_digit_helper(&mut self, next_char: char) -> String {
        if let Some(relative_position) =
            self.formatting_template[self.last_match_position..].find(DIGIT_PLACEHOLDER)
        {
            let position = self.last_match_position + relative_position;
            self.formatting_template.replace_range(
                position..position + DIGIT_PLACEHOLDER.len_utf8(),
                next_char.encode_utf8(&mut [0u8; 4]),
            );
            self.last_match_position = position;
            return self.formatting_template[..position + next_char.len_utf8()].to_owned();
        }
        if self.possible_formats.len() == 1 {
            // More digits are entered than the only format can hold.
            self.able_to_format = false;
        }
        self.current_formatting_pattern.clear();
        self.accrued_input.clone()
    }

    /// NANPA numbers beginning `1` carry the national prefix; `10x` and
    /// `11x` are service prefixes, not that.
    fn is_nanpa_number_with_national_prefix(&self) -> bool {
        let Some(metadata) = self.current_metadata else {
            return false;
        };
        if metadata.country_code() != 1 {
            return false;
        }
        let bytes = self.national_number.as_bytes();
        bytes.first() == Some(&b'1') && bytes.get(1) != Some(&b'0') && bytes.get(1) != Some(&b'1')
    }

    /// Returns the stripped national prefix, leaving the national number
    /// without it.
    fn remove_national_prefix_from_national_number(&mut self) -> String {
        let mut start_of_national_number = 0;
        if self.is_nanpa_number_with_national_prefix() {
            start_of_national_number = 1;
            self.prefix_before_national_number.push('1');
            self.prefix_before_national_number
                .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
            self.is_complete_number = true;
        } else if let Some(metadata) = self.current_metadata {
            if metadata.has_national_prefix_for_parsing() {
                if let Ok(regex) = self
                    .util
                    .core
                    .patterns
                    .regexp_cache
                    .get_regex(metadata.national_prefix_for_parsing())
                {
                    // The prefix pattern may be fully optional; only an
                    // actual consumption counts.
                    if let Some(prefix_match) = regex.find_start(&self.national_number) {
                        if prefix_match.end() > 0 {
                            // Use international formatting rules from here
                            // on: national rules may expect the number
                            // without its area code.
                            self.is_complete_number = true;
                            start_of_national_number = prefix_match.end();
                            self.prefix_before_national_number
                                .push_str(&self.national_number[..start_of_national_number]);
                        }
                    }
                }
            }
        }
        let national_prefix = self.national_number[..start_of_national_number].to_owned();
        self.national_number.drain(..start_of_national_number);
        national_prefix
    }

    fn attempt_to_extract_idd(&mut self) -> bool {
        let idd = self
            .current_metadata
            .map(|metadata| metadata.international_prefix())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or("NA");
        let international_prefix = fast_cat::concat_str!("\\+|", idd);
        let Ok(regex) = self
            .util
            .core
            .patterns
            .regexp_cache
            .get_regex(&international_prefix)
        else {
            return false;
        };
        let Some(idd_match) = regex.find_start(&self.accrued_input_without_formatting) else {
            return false;
        };
        self.is_complete_number = true;
        let start_of_country_calling_code = idd_match.end();
        self.national_number =
            self.accrued_input_without_formatting[start_of_country_calling_code..].to_owned();
        self.prefix_before_national_number =
            self.accrued_input_without_formatting[..start_of_country_calling_code].to_owned();
        if !self.accrued_input_without_formatting.starts_with('+') {
            self.prefix_before_national_number
                .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
        }
        true
    }

    fn attempt_to_extract_country_calling_code(&mut self) -> bool {
        if self.national_number.is_empty() {
            return false;
        }
        let util = self.util;
        let Some((country_code, rest)) = util.core.extract_country_code(&self.national_number)
        else {
            return false;
        };
        let number_without_country_calling_code = rest.to_owned();
        self.national_number = number_without_country_calling_code;
        let new_region_code = util.core.get_region_code_for_country_code(country_code);
        if new_region_code == REGION_CODE_FOR_NON_GEO_ENTITY {
            self.current_metadata = util.core.get_metadata_for_non_geographical_region(country_code);
        } else if new_region_code != self.default_region {
            self.current_metadata = util.core.get_metadata_for_region(new_region_code);
        }
        let mut buf = itoa::Buffer::new();
        self.prefix_before_national_number
            .push_str(buf.format(country_code));
        self.prefix_before_national_number
            .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
        // A prefix extracted before the country code was part of some
        // other reading of the input.
        self.extracted_national_prefix.clear();
        true
    }
}
