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

use std::collections::{HashMap, HashSet};

use strum::IntoEnumIterator;

use crate::metadata::{PhoneMetadata, PhoneNumberDesc};
use crate::phonenumber::PhoneNumber;

use super::consts::{
    DIGITS, OPTIONAL_EXT_SUFFIX, PLUS_SIGN, POSSIBLE_CHARS_AFTER_EXT_LABEL,
    POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL, RFC3966_EXTN_PREFIX, RFC3966_PREFIX,
};
use super::enums::{NumberLengthType, PhoneNumberFormat, PhoneNumberType};
use super::errors::ValidationError;

/// Returns the description inside the metadata for the given type.
pub(crate) fn get_number_desc_by_type(
    metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> &PhoneNumberDesc {
    match phone_number_type {
        PhoneNumberType::PremiumRate => &metadata.premium_rate,
        PhoneNumberType::TollFree => &metadata.toll_free,
        PhoneNumberType::Mobile => &metadata.mobile,
        PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => &metadata.fixed_line,
        PhoneNumberType::SharedCost => &metadata.shared_cost,
        PhoneNumberType::VoIP => &metadata.voip,
        PhoneNumberType::PersonalNumber => &metadata.personal_number,
        PhoneNumberType::Pager => &metadata.pager,
        PhoneNumberType::UAN => &metadata.uan,
        PhoneNumberType::VoiceMail => &metadata.voicemail,
        PhoneNumberType::Unknown => &metadata.general_desc,
    }
}

/// Used by format and format_by_pattern to glue the country calling code
/// onto an already formatted national number.
pub(crate) fn prefix_number_with_country_calling_code(
    country_calling_code: i32,
    number_format: PhoneNumberFormat,
    formatted_number: &mut String,
) {
    let mut buf = itoa::Buffer::new();
    let country_calling_code_str = buf.format(country_calling_code);

    match number_format {
        PhoneNumberFormat::E164 => {
            *formatted_number =
                fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, &formatted_number);
        }
        PhoneNumberFormat::International => {
            *formatted_number =
                fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, " ", &formatted_number);
        }
        PhoneNumberFormat::RFC3966 => {
            *formatted_number = fast_cat::concat_str!(
                RFC3966_PREFIX,
                PLUS_SIGN,
                country_calling_code_str,
                "-",
                &formatted_number
            );
        }
        PhoneNumberFormat::National => {}
    }
}

// True when one national number is the suffix of the other or both are
// the same.
pub(crate) fn is_national_number_suffix_of_the_other(
    first_number: &PhoneNumber,
    second_number: &PhoneNumber,
) -> bool {
    let mut buf = itoa::Buffer::new();
    let first_number_national_number = buf.format(first_number.national_number());
    let mut buf = itoa::Buffer::new();
    let second_number_national_number = buf.format(second_number.national_number());
    // ends_with holds when the strings are equal, too.
    first_number_national_number.ends_with(second_number_national_number)
        || second_number_national_number.ends_with(first_number_national_number)
}

/// Builds an expression capturing up to `max_length` digits.
pub(crate) fn extn_digits(max_length: u32) -> String {
    let mut buf = itoa::Buffer::new();
    let max_length_str = buf.format(max_length);
    format!("([{}]{{1,{}}})", DIGITS, max_length_str)
}

// Builds the regular-expression alternation matching extensions. The only
// capturing groups must be the digit runs to capture as the extension, or
// parsing will fail. The caps per label class:
//
//   explicit ";ext=" and word labels        20
//   auto-dial labels (",," or ";")          15
//   ambiguous single chars (x # ~)           9
//   bare digits before a trailing "#"        6
//
// ITU officially allows extensions of up to 40 digits, but labels are not
// standardized and longer caps multiply false interpretations of two
// adjacent numbers as number + extension.
pub(crate) fn create_extn_pattern(for_parsing: bool) -> String {
    let ext_limit_after_explicit_label = 20;
    let ext_limit_after_likely_label = 15;
    let ext_limit_after_ambiguous_char = 9;
    let ext_limit_when_not_sure = 6;

    // Non-ASCII letters appear both precomposed and in decomposed form
    // with the combining accent, since canonical equivalence is not an
    // option in the regex engine.
    // Word labels: ext/extn/extension (with the Spanish extensión
    // variants), fullwidth ｅｘｔｎ, Russian доб, anexo, and int with its
    // fullwidth form ｉｎｔ.
    let explicit_ext_labels = "(?:e?xt(?:ensi(?:o\u{0301}?|\u{00F3}))?n?|\
(?:\u{FF45})?\u{FF58}\u{FF54}(?:\u{FF4E})?|\u{0434}\u{043E}\u{0431}|anexo|\
int|\u{FF49}\u{FF4E}\u{FF54})";
    // One-character symbols usable as an extension marker.
    let ambiguous_ext_labels = "(?:[x\u{FF58}#\u{FF03}~\u{FF5E}])";
    // When the extension is not separated clearly.
    let ambiguous_separator = "[- ]+";

    let rfc_extn = fast_cat::concat_str!(
        RFC3966_EXTN_PREFIX,
        &extn_digits(ext_limit_after_explicit_label)
    );
    let explicit_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        explicit_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_explicit_label),
        OPTIONAL_EXT_SUFFIX
    );
    let ambiguous_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        ambiguous_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_ambiguous_char),
        OPTIONAL_EXT_SUFFIX
    );
    let american_style_extn_with_suffix = fast_cat::concat_str!(
        ambiguous_separator,
        &extn_digits(ext_limit_when_not_sure),
        "#"
    );

    let extension_pattern = fast_cat::concat_str!(
        &rfc_extn,
        "|",
        &explicit_extn,
        "|",
        &ambiguous_extn,
        "|",
        &american_style_extn_with_suffix
    );
    if for_parsing {
        // ",," is commonly used for auto dialling the extension when
        // connected; a semicolon works the same way on the major mobile
        // platforms.
        let auto_dialling_and_ext_labels_found = "(?:,{2}|;)";
        // Same separators as above but without the comma, since the label
        // itself may contain one.
        let possible_separators_number_ext_label_no_comma = "[ \u{00A0}\t]*";

        let auto_dialling_extn = fast_cat::concat_str!(
            possible_separators_number_ext_label_no_comma,
            auto_dialling_and_ext_labels_found,
            POSSIBLE_CHARS_AFTER_EXT_LABEL,
            &extn_digits(ext_limit_after_likely_label),
            OPTIONAL_EXT_SUFFIX
        );
        let only_commas_extn = fast_cat::concat_str!(
            possible_separators_number_ext_label_no_comma,
            "(?:,)+",
            POSSIBLE_CHARS_AFTER_EXT_LABEL,
            &extn_digits(ext_limit_after_ambiguous_char),
            OPTIONAL_EXT_SUFFIX
        );
        return fast_cat::concat_str!(
            &extension_pattern,
            "|",
            &auto_dialling_extn,
            "|",
            &only_commas_extn
        );
    }
    extension_pattern
}

/// Replaces every character found in `normalization_replacements` with
/// its mapping (looked up through the upper-cased character) and, when
/// `remove_non_matches` is set, drops everything else.
pub(crate) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &mut String,
) {
    let mut normalized_number = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        if let Some(replacement) = normalization_replacements.get(&phone_char.to_ascii_uppercase())
        {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(phone_char);
        }
    }
    *phone_number = normalized_number;
}

/// Returns `true` if any possible-number data is set for the desc. A
/// single length of -1 marks a type with no numbers at all.
pub(crate) fn desc_has_possible_number_data(desc: &PhoneNumberDesc) -> bool {
    desc.possible_length.len() != 1 || desc.possible_length.first() != Some(&-1)
}

/// Returns `true` if the desc carries any data of its own.
pub(crate) fn desc_has_data(desc: &PhoneNumberDesc) -> bool {
    desc.has_example_number()
        || desc_has_possible_number_data(desc)
        || desc.has_national_number_pattern()
}

/// Collects the number types this metadata actually has data for.
/// FIXED_LINE_OR_MOBILE and UNKNOWN are never reported; the former is a
/// convenience value, the latter a non-type.
pub(crate) fn get_supported_types_for_metadata(
    metadata: &PhoneMetadata,
    types: &mut HashSet<PhoneNumberType>,
) {
    PhoneNumberType::iter()
        .filter(|number_type| {
            !matches!(
                number_type,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown
            )
        })
        .filter(|number_type| desc_has_data(get_number_desc_by_type(metadata, *number_type)))
        .for_each(|number_type| {
            types.insert(number_type);
        });
}

/// Checks a number against the possible lengths for the given type, and
/// reports whether it matches, or is too short or too long. Membership is
/// exact: a length between the minimum and the maximum that appears in
/// neither set is INVALID_LENGTH, never a pass.
pub(crate) fn test_number_length(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> Result<NumberLengthType, ValidationError> {
    let desc_for_type = get_number_desc_by_type(phone_metadata, phone_number_type);
    // Where a sub-description has the same possible lengths as the
    // general desc they are omitted from it, so fall back; where no
    // numbers of the type exist the single length -1 cannot match
    // anything real.
    let mut possible_lengths = if desc_for_type.possible_length.is_empty() {
        phone_metadata.general_desc.possible_length.clone()
    } else {
        desc_for_type.possible_length.clone()
    };

    let mut local_lengths = desc_for_type.possible_length_local_only.clone();
    if phone_number_type == PhoneNumberType::FixedLineOrMobile {
        let fixed_line_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::FixedLine);
        if !desc_has_possible_number_data(fixed_line_desc) {
            // Some non-geographical entities have no fixed-line data at
            // all; check mobile on its own.
            return test_number_length(phone_number, phone_metadata, PhoneNumberType::Mobile);
        }
        let mobile_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::Mobile);
        if desc_has_possible_number_data(mobile_desc) {
            // Merge the mobile lengths in, again falling back to the
            // general desc when they are omitted.
            let lengths_to_append = if mobile_desc.possible_length.is_empty() {
                &phone_metadata.general_desc.possible_length
            } else {
                &mobile_desc.possible_length
            };
            possible_lengths.extend_from_slice(lengths_to_append);
            possible_lengths.sort();

            if local_lengths.is_empty() {
                local_lengths = mobile_desc.possible_length_local_only.clone();
            } else {
                local_lengths.extend_from_slice(&mobile_desc.possible_length_local_only);
                local_lengths.sort();
            }
        }
    }

    if possible_lengths.first().unwrap_or(&-1) == &-1 {
        return Err(ValidationError::InvalidLength);
    }

    let actual_length = phone_number.chars().count() as i32;
    // Possible lengths and local-only lengths never overlap; the
    // metadata provider guarantees that.
    if local_lengths.contains(&actual_length) {
        return Ok(NumberLengthType::IsPossibleLocalOnly);
    }

    let minimum_length = possible_lengths[0];
    if minimum_length == actual_length {
        return Ok(NumberLengthType::IsPossible);
    } else if minimum_length > actual_length {
        return Err(ValidationError::TooShort);
    } else if possible_lengths[possible_lengths.len() - 1] < actual_length {
        return Err(ValidationError::TooLong);
    }
    // The first element has been checked already.
    if possible_lengths[1..].contains(&actual_length) {
        Ok(NumberLengthType::IsPossible)
    } else {
        Err(ValidationError::InvalidLength)
    }
}

/// Length check against the region as a whole rather than one type.
pub(crate) fn test_number_length_with_unknown_type(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
) -> Result<NumberLengthType, ValidationError> {
    test_number_length(phone_number, phone_metadata, PhoneNumberType::Unknown)
}

/// Copies only the fields that identify a number, leaving behind the
/// context that `parse_and_keep_raw_input` captures.
pub(crate) fn copy_core_fields_only(from_number: &PhoneNumber, to_number: &mut PhoneNumber) {
    to_number.set_country_code(from_number.country_code());
    to_number.set_national_number(from_number.national_number());
    if from_number.has_extension() && !from_number.extension().is_empty() {
        to_number.set_extension(from_number.extension().to_owned());
    }
    if from_number.italian_leading_zero() {
        to_number.set_italian_leading_zero(true);
        // Only relevant when there are leading zeros at all.
        to_number.set_number_of_leading_zeros(from_number.number_of_leading_zeros());
    }
}
