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

use regex::Regex;

use crate::regex_cache::RegexCache;

use super::consts::{
    DIGITS, MIN_LENGTH_FOR_NSN, PLUS_CHARS, PLUS_SIGN, RFC3966_VISUAL_SEPARATOR,
    SECOND_NUMBER_START, STAR_SIGN, VALID_ALPHA, VALID_ALPHA_INCL_UPPERCASE, VALID_PUNCTUATION,
};
use super::helpers::create_extn_pattern;

/// Every regular expression and character table the engine needs,
/// compiled once at construction. A few source strings are kept next to
/// their compiled form for diagnostics.
#[allow(unused)]
pub(crate) struct PhonePatterns {
    /// Regular expression of viable phone numbers: at least three digits
    /// with only valid punctuation, alpha characters and digits among
    /// them, or a bare two-digit short number. Location independent; no
    /// extension part.
    ///
    /// Corresponds to
    /// `plus*(([punct]|[star])*digit){3,}([punct]|[star]|digit|[alpha])*`
    /// with the bare `digit{2}` alternative ordered last so the longer
    /// form wins.
    valid_phone_number: String,

    /// All the ways extensions are written, for parsing. Run
    /// case-insensitively. Parsing is more lenient than matching: commas
    /// and semicolons also count as extension markers here.
    extn_patterns_for_parsing: String,

    /// Extension pattern used when scanning free text, where comma and
    /// semicolon labels would produce too many false hits.
    pub extn_patterns_for_matching: String,

    pub regexp_cache: RegexCache,

    /// Characters that must survive normalization for dialing to work at
    /// all: digits, `+`, `*`, `#`.
    pub diallable_char_mappings: HashMap<char, char>,
    /// E.161 keypad letters to the digit they stand for.
    pub alpha_mappings: HashMap<char, char>,
    /// Keypad letters plus ASCII digits, the combined normalization map.
    pub alpha_phone_mappings: HashMap<char, char>,

    /// Symbols retained when formatting alpha numbers: digits, letters,
    /// and grouping symbols folded to their canonical form.
    pub all_plus_number_grouping_symbols: HashMap<char, char>,

    /// Country codes whose mobile numbers carry a token before the area
    /// code (Argentina's `9`); the token widens the national destination
    /// code by its length.
    pub mobile_token_mappings: HashMap<i32, char>,

    /// Country codes with geographically assigned mobile numbers.
    pub geo_mobile_countries: HashSet<i32>,
    /// Subset whose geographic mobiles carry no area code (China: the
    /// leading digits are a carrier indicator instead).
    pub geo_mobile_countries_without_mobile_area_codes: HashSet<i32>,
    /// Country codes with area codes but no national prefix (Mexico).
    pub countries_without_national_prefix_with_area_codes: HashSet<i32>,

    /// Distinguishes regions with a single international dialing prefix
    /// (digits, possibly a tone-wait tilde) from regions whose
    /// `international_prefix` is a genuine regex over several prefixes.
    pub single_international_prefix: Regex,

    pub capturing_digit_pattern: Regex,
    pub capturing_ascii_digits_pattern: Regex,

    /// Characters a phone number may start with: digits and plus signs.
    /// Leading garbage before the first such character carries no
    /// information and is stripped.
    pub valid_start_char_pattern: Regex,

    /// Marker that probably starts a second phone number; everything
    /// from it onwards is dropped.
    pub second_number_start_pattern: Regex,

    /// Trailing characters to drop: everything that is neither a letter
    /// nor a digit. `#` stays because it may close an extension.
    pub unwanted_end_char_pattern: Regex,

    /// Groups of valid punctuation characters.
    pub separator_pattern: Regex,

    /// Anchored, case-insensitive form of the parsing extension pattern.
    pub extn_pattern: Regex,

    /// The viability test: the valid phone number with an optional
    /// extension suffix, anchored at both ends.
    pub valid_phone_number_pattern: Regex,

    /// Three or more letters anywhere — the signal that keypad-letter
    /// normalization applies instead of letter stripping.
    pub valid_alpha_phone_pattern: Regex,

    /// Finds the first `$N` group reference of a format template. `\d`
    /// rather than a literal `$1` because some plans (Argentina) never
    /// use group one in their national format.
    pub first_group_capturing_pattern: Regex,

    pub carrier_code_pattern: Regex,

    pub plus_chars_pattern: Regex,

    /// RFC 3966 global-number-digits, for a `phone-context` starting
    /// with `+`.
    pub rfc3966_global_number_digits_pattern: Regex,

    /// RFC 3966 domainname, for every other `phone-context`.
    pub rfc3966_domainname_pattern: Regex,

    /// A number format is usable by the as-you-type formatter only when
    /// its template is `$1` groups joined by plain phone punctuation;
    /// anything else (star signs and the like) would leak into the
    /// output mid-typing.
    pub aytf_eligible_format_pattern: Regex,

    /// Does a national prefix formatting rule consist of the first group
    /// only, possibly parenthesised (unbalanced parens allowed)?
    pub formatting_rule_first_group_only_pattern: Regex,
}

impl PhonePatterns {
    fn initialize_mappings(&mut self) {
        self.mobile_token_mappings.insert(54, '9');

        self.geo_mobile_countries_without_mobile_area_codes.insert(86); // China

        self.countries_without_national_prefix_with_area_codes.insert(52); // Mexico

        self.geo_mobile_countries.insert(52); // Mexico
        self.geo_mobile_countries.insert(54); // Argentina
        self.geo_mobile_countries.insert(55); // Brazil
        self.geo_mobile_countries.insert(62); // Indonesia: some prefixes only
        self.geo_mobile_countries
            .extend(&self.geo_mobile_countries_without_mobile_area_codes);

        let mut ascii_digit_mappings = HashMap::with_capacity(10);
        for d in '0'..='9' {
            ascii_digit_mappings.insert(d, d);
        }

        // E.161: only upper-case keys; lookups upper-case first.
        let mut alpha_map = HashMap::with_capacity(26);
        for (letters, digit) in [
            ("ABC", '2'),
            ("DEF", '3'),
            ("GHI", '4'),
            ("JKL", '5'),
            ("MNO", '6'),
            ("PQRS", '7'),
            ("TUV", '8'),
            ("WXYZ", '9'),
        ] {
            for letter in letters.chars() {
                alpha_map.insert(letter, digit);
            }
        }
        self.alpha_mappings = alpha_map;

        let mut combined_map = HashMap::with_capacity(40);
        combined_map.extend(self.alpha_mappings.iter());
        combined_map.extend(ascii_digit_mappings.iter());
        self.alpha_phone_mappings = combined_map;

        let mut diallable_char_map = HashMap::new();
        diallable_char_map.extend(ascii_digit_mappings.iter());
        diallable_char_map.insert('+', '+');
        diallable_char_map.insert('*', '*');
        diallable_char_map.insert('#', '#');
        self.diallable_char_mappings = diallable_char_map;

        let mut all_plus_number_groupings = HashMap::new();
        // Letters map to their upper-case selves from either case.
        for c in self.alpha_mappings.keys() {
            all_plus_number_groupings.insert(c.to_ascii_lowercase(), *c);
            all_plus_number_groupings.insert(*c, *c);
        }
        all_plus_number_groupings.extend(ascii_digit_mappings.iter());
        // Grouping symbols, folded to their canonical form.
        for dash in [
            '-', '\u{FF0D}', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}',
            '\u{2015}', '\u{2212}',
        ] {
            all_plus_number_groupings.insert(dash, '-');
        }
        all_plus_number_groupings.insert('/', '/');
        all_plus_number_groupings.insert('\u{FF0F}', '/');
        all_plus_number_groupings.insert(' ', ' ');
        all_plus_number_groupings.insert('\u{3000}', ' ');
        all_plus_number_groupings.insert('\u{2060}', ' ');
        all_plus_number_groupings.insert('.', '.');
        all_plus_number_groupings.insert('\u{FF0E}', '.');
        self.all_plus_number_grouping_symbols = all_plus_number_groupings;
    }

    pub fn new() -> Self {
        let alphanum = fast_cat::concat_str!(VALID_ALPHA_INCL_UPPERCASE, DIGITS);
        let extn_patterns_for_parsing = create_extn_pattern(true);
        // The bare short-number alternative goes last so a full number is
        // matched in its entirety first.
        let valid_phone_number = format!(
            "[{}]*(?:[{}{}]*{}){{3,}}[{}{}{}{}]*|{}{{{}}}",
            PLUS_CHARS,
            VALID_PUNCTUATION,
            STAR_SIGN,
            DIGITS,
            VALID_PUNCTUATION,
            STAR_SIGN,
            DIGITS,
            VALID_ALPHA,
            DIGITS,
            MIN_LENGTH_FOR_NSN,
        );

        let rfc3966_phone_digit = format!("({}|{})", DIGITS, RFC3966_VISUAL_SEPARATOR);
        let rfc3966_domainlabel = format!("[{}]+((\\-)*[{}])*", alphanum, alphanum);
        let rfc3966_toplabel = format!(
            "[{}]+((\\-)*[{}])*",
            VALID_ALPHA_INCL_UPPERCASE, alphanum
        );

        let mut instance = Self {
            valid_phone_number: valid_phone_number.clone(),
            extn_patterns_for_parsing: extn_patterns_for_parsing.clone(),
            extn_patterns_for_matching: create_extn_pattern(false),
            regexp_cache: RegexCache::with_capacity(128),
            diallable_char_mappings: Default::default(),
            alpha_mappings: Default::default(),
            alpha_phone_mappings: Default::default(),
            all_plus_number_grouping_symbols: Default::default(),
            mobile_token_mappings: Default::default(),
            geo_mobile_countries: Default::default(),
            geo_mobile_countries_without_mobile_area_codes: Default::default(),
            countries_without_national_prefix_with_area_codes: Default::default(),
            single_international_prefix: Regex::new(
                "[\\d]+(?:[~\u{2053}\u{223C}\u{FF5E}][\\d]+)?",
            )
            .unwrap(),
            capturing_digit_pattern: Regex::new(&format!("([{}])", DIGITS)).unwrap(),
            capturing_ascii_digits_pattern: Regex::new("(\\d+)").unwrap(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS)).unwrap(),
            second_number_start_pattern: Regex::new(SECOND_NUMBER_START).unwrap(),
            unwanted_end_char_pattern: Regex::new("[^\\p{N}\\p{L}#]").unwrap(),
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION)).unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", &extn_patterns_for_parsing)).unwrap(),
            valid_phone_number_pattern: Regex::new(&format!(
                "(?i)^(?:{})(?:{})?$",
                &valid_phone_number, &extn_patterns_for_parsing
            ))
            .unwrap(),
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}.*").unwrap(),
            first_group_capturing_pattern: Regex::new("(\\$\\d)").unwrap(),
            carrier_code_pattern: Regex::new("\\$CC").unwrap(),
            plus_chars_pattern: Regex::new(&format!("[{}]+", PLUS_CHARS)).unwrap(),
            rfc3966_global_number_digits_pattern: Regex::new(&format!(
                "^\\{}{}*{}{}*$",
                PLUS_SIGN, &rfc3966_phone_digit, DIGITS, rfc3966_phone_digit
            ))
            .unwrap(),
            rfc3966_domainname_pattern: Regex::new(&format!(
                "^({}\\.)*{}\\.?$",
                rfc3966_domainlabel, rfc3966_toplabel
            ))
            .unwrap(),
            aytf_eligible_format_pattern: Regex::new(&format!(
                "^[{}]*\\$1[{}]*(\\$\\d[{}]*)*$",
                VALID_PUNCTUATION, VALID_PUNCTUATION, VALID_PUNCTUATION
            ))
            .unwrap(),
            formatting_rule_first_group_only_pattern: Regex::new("^\\(?\\$1\\)?$").unwrap(),
        };
        instance.initialize_mappings();
        instance
    }
}
