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

//! The semantic checks behind each [`Leniency`] level. POSSIBLE and
//! VALID are cheap; the grouping levels re-format the parsed number and
//! compare its digit groups with what actually appears in the text.

use std::borrow::Cow;

use crate::phonenumber::{CountryCodeSource, PhoneNumber};
use crate::util::enums::{Leniency, MatchType, NumberOrStr, PhoneNumberFormat};
use crate::util::PhoneNumberUtil;

pub(super) fn verify(
    util: &PhoneNumberUtil,
    leniency: Leniency,
    number: &PhoneNumber,
    candidate: &str,
) -> bool {
    match leniency {
        Leniency::Possible => util.core.is_possible_number(number),
        Leniency::Valid => util.core.is_valid_number(number).unwrap_or(false),
        Leniency::StrictGrouping => {
            verify_strict(util, number, candidate, all_number_groups_remain_grouped)
        }
        Leniency::ExactGrouping => {
            verify_strict(util, number, candidate, all_number_groups_are_exactly_present)
        }
    }
}

type GroupChecker = fn(&PhoneNumberUtil, &PhoneNumber, &str, &[String]) -> bool;

fn verify_strict(
    util: &PhoneNumberUtil,
    number: &PhoneNumber,
    candidate: &str,
    checker: GroupChecker,
) -> bool {
    if !util.core.is_valid_number(number).unwrap_or(false)
        || !contains_only_valid_x_chars(util, number, candidate)
        || contains_more_than_one_slash_in_national_number(util, number, candidate)
        || !is_national_prefix_present_if_required(util, number)
    {
        return false;
    }
    check_number_grouping_is_valid(util, number, candidate, checker)
}

/// An `x` may only appear as a carrier-code marker ("xx" followed by the
/// number again) or as the extension label.
fn contains_only_valid_x_chars(
    util: &PhoneNumberUtil,
    number: &PhoneNumber,
    candidate: &str,
) -> bool {
    let chars: Vec<(usize, char)> = candidate.char_indices().collect();
    let mut index = 0;
    while index + 1 < chars.len() {
        let (byte_index, c) = chars[index];
        if c == 'x' || c == 'X' {
            let (next_byte_index, next_char) = chars[index + 1];
            if next_char == 'x' || next_char == 'X' {
                // "xx" carrier marker: what follows must be this number
                // again.
                index += 1;
                if util.core.is_number_match(
                    NumberOrStr::Number(number),
                    NumberOrStr::Str(&candidate[next_byte_index..]),
                ) != MatchType::NsnMatch
                {
                    return false;
                }
            } else if util.core.normalize_digits_only(&candidate[byte_index..])
                != number.extension()
            {
                return false;
            }
        }
        index += 1;
    }
    true
}

/// Numbers written without their mandatory national prefix are usually
/// something else (a local fragment, a serial number).
fn is_national_prefix_present_if_required(util: &PhoneNumberUtil, number: &PhoneNumber) -> bool {
    // Internationally written numbers carry no national prefix by
    // definition.
    if number.country_code_source() != CountryCodeSource::FROM_DEFAULT_COUNTRY {
        return true;
    }
    let phone_number_region = util
        .core
        .get_region_code_for_country_code(number.country_code());
    let Some(metadata) = util.core.get_metadata_for_region(phone_number_region) else {
        return true;
    };
    let national_number = util.core.get_national_significant_number(number);
    let Ok(format_rule) = util
        .core
        .choose_formatting_pattern_for_number(metadata.number_format(), &national_number)
    else {
        return true;
    };
    let Some(format_rule) = format_rule else {
        return true;
    };
    let national_prefix_formatting_rule = format_rule.national_prefix_formatting_rule();
    if national_prefix_formatting_rule.is_empty()
        || format_rule.national_prefix_optional_when_formatting()
        || util
            .core
            .formatting_rule_has_first_group_only(national_prefix_formatting_rule)
    {
        return true;
    }
    let raw_input_copy = util.core.normalize_digits_only(number.raw_input());
    match util
        .core
        .maybe_strip_national_prefix_and_carrier_code(metadata, &raw_input_copy)
    {
        // An owned result means something was actually stripped.
        Ok((Cow::Owned(_), _)) => true,
        Ok((Cow::Borrowed(_), _)) => false,
        Err(_) => true,
    }
}

fn contains_more_than_one_slash_in_national_number(
    util: &PhoneNumberUtil,
    number: &PhoneNumber,
    candidate: &str,
) -> bool {
    let Some(first_slash_index) = candidate.find('/') else {
        return false;
    };
    let Some(second_slash_offset) = candidate[first_slash_index + 1..].find('/') else {
        return false;
    };
    let second_slash_index = first_slash_index + 1 + second_slash_offset;
    // A "+44/2087654321" style candidate legitimately splits the country
    // code off with one slash.
    let candidate_has_country_code = matches!(
        number.country_code_source(),
        CountryCodeSource::FROM_NUMBER_WITH_PLUS_SIGN
            | CountryCodeSource::FROM_NUMBER_WITHOUT_PLUS_SIGN
    );
    if candidate_has_country_code {
        let mut buf = itoa::Buffer::new();
        if util
            .core
            .normalize_digits_only(&candidate[..first_slash_index])
            == buf.format(number.country_code())
        {
            return candidate[second_slash_index + 1..].contains('/');
        }
    }
    true
}

/// The groups of the number as the formatter would write them, taken
/// from the RFC 3966 rendering (which is hyphen-separated throughout).
fn get_national_number_groups(util: &PhoneNumberUtil, number: &PhoneNumber) -> Option<Vec<String>> {
    let rfc3966_format = util
        .core
        .format(number, PhoneNumberFormat::RFC3966)
        .ok()?;
    let end_index = rfc3966_format.find(';').unwrap_or(rfc3966_format.len());
    let start_index = rfc3966_format.find('-').map(|index| index + 1).unwrap_or(0);
    Some(
        rfc3966_format[start_index..end_index]
            .split('-')
            .map(str::to_owned)
            .collect(),
    )
}

fn check_number_grouping_is_valid(
    util: &PhoneNumberUtil,
    number: &PhoneNumber,
    candidate: &str,
    checker: GroupChecker,
) -> bool {
    // Digits folded to ASCII, everything else kept in place.
    let normalized_candidate = dec_from_char::normalize_decimals(candidate);
    let Some(formatted_number_groups) = get_national_number_groups(util, number) else {
        return false;
    };
    checker(util, number, &normalized_candidate, &formatted_number_groups)
}

/// Every formatted group must appear in order in the candidate; digits
/// of one group must not be split across two candidate groups.
fn all_number_groups_remain_grouped(
    util: &PhoneNumberUtil,
    number: &PhoneNumber,
    normalized_candidate: &str,
    formatted_number_groups: &[String],
) -> bool {
    let mut from_index = 0;
    if number.country_code_source() != CountryCodeSource::FROM_DEFAULT_COUNTRY {
        // Skip over the country code when it was written out.
        let mut buf = itoa::Buffer::new();
        let country_code = buf.format(number.country_code());
        if let Some(index) = normalized_candidate.find(country_code) {
            from_index = index + country_code.len();
        }
    }
    for (group_index, group) in formatted_number_groups.iter().enumerate() {
        let Some(relative_index) = normalized_candidate[from_index..].find(group.as_str()) else {
            return false;
        };
        let group_start_index = from_index + relative_index;
        from_index = group_start_index + group.len();
        if group_index == 0 && from_index < normalized_candidate.len() {
            // The user may have written area code and subscriber number
            // as one run; accept that when the region has a national
            // prefix that could have soaked up the grouping.
            let region = util
                .core
                .get_region_code_for_country_code(number.country_code());
            if util.core.get_ndd_prefix_for_region(region, true).is_some()
                && normalized_candidate[from_index..]
                    .chars()
                    .next()
                    .map_or(false, |c| c.is_ascii_digit())
            {
                let national_significant_number =
                    util.core.get_national_significant_number(number);
                return normalized_candidate[group_start_index..]
                    .starts_with(&national_significant_number);
            }
        }
    }
    // Whatever trails the groups must still contain the extension.
    normalized_candidate[from_index..].contains(number.extension())
}

/// The candidate's trailing digit groups must equal the formatted groups
/// exactly; only the first one may carry extra leading digits (country
/// code or national prefix).
fn all_number_groups_are_exactly_present(
    util: &PhoneNumberUtil,
    number: &PhoneNumber,
    normalized_candidate: &str,
    formatted_number_groups: &[String],
) -> bool {
    let candidate_groups: Vec<&str> = normalized_candidate
        .split(|c: char| !c.is_ascii_digit())
        .filter(|group| !group.is_empty())
        .collect();
    if candidate_groups.is_empty() {
        return false;
    }
    // The extension, when present, occupies the last group.
    let mut candidate_number_group_index = if number.has_extension() {
        match candidate_groups.len().checked_sub(2) {
            Some(index) => index,
            None => return false,
        }
    } else {
        candidate_groups.len() - 1
    };
    if candidate_groups.len() == 1
        || candidate_groups[candidate_number_group_index]
            .contains(&util.core.get_national_significant_number(number))
    {
        return true;
    }
    let mut formatted_number_group_index = formatted_number_groups.len() - 1;
    while formatted_number_group_index > 0 {
        if candidate_groups[candidate_number_group_index]
            != formatted_number_groups[formatted_number_group_index]
        {
            return false;
        }
        formatted_number_group_index -= 1;
        if candidate_number_group_index == 0 {
            return false;
        }
        candidate_number_group_index -= 1;
    }
    candidate_groups[candidate_number_group_index].ends_with(&formatted_number_groups[0])
}
