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

//! Finds phone numbers embedded in free text.
//!
//! A single bounded candidate pattern scans the text; each hit runs
//! through date/timestamp/pub-page rejections, a bracket sanity check,
//! the parser, and the semantic checks of the chosen [`Leniency`]. When
//! a candidate fails as a whole, delimiter-split fragments of it are
//! retried, bounded by the caller's `max_tries`.

mod leniency;

use std::sync::LazyLock;

use regex::Regex;

use crate::phonenumber::PhoneNumber;
use crate::util::consts::{
    MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, PLUS_CHARS, VALID_PUNCTUATION,
};
use crate::util::enums::Leniency;
use crate::util::helpers::create_extn_pattern;
use crate::util::PhoneNumberUtil;

/// One phone number found in text: the byte range it occupies, the text
/// of that range, and the parsed number.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneNumberMatch {
    start: usize,
    raw_string: String,
    number: PhoneNumber,
}

impl PhoneNumberMatch {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.start + self.raw_string.len()
    }

    pub fn raw_string(&self) -> &str {
        &self.raw_string
    }

    pub fn number(&self) -> &PhoneNumber {
        &self.number
    }

    pub fn into_number(self) -> PhoneNumber {
        self.number
    }
}

fn limit(lower: usize, upper: usize) -> String {
    format!("{{{},{}}}", lower, upper)
}

struct FindPatterns {
    /// The bounded candidate pattern: optional lead character, digit
    /// blocks joined by limited punctuation, optional extension.
    pattern: Regex,
    /// Candidates whose brackets do not pair up are parts of something
    /// else (formulas, markup).
    matching_brackets: Regex,
    /// A lead character ('(' or '+') at the very start of a candidate.
    lead_class_at_start: Regex,
    slash_separated_dates: Regex,
    time_stamps: Regex,
    time_stamps_suffix: Regex,
    pub_pages: Regex,
    /// Trailing characters that cannot end a number.
    unwanted_end_chars: Regex,
    /// '%' aside, currency symbols hugging a match disqualify it.
    currency_symbol: Regex,
    /// Delimiters to split a failed candidate on, tried in order.
    inner_matches: Vec<Regex>,
}

impl FindPatterns {
    fn new() -> Self {
        let opening_parens = "(\\[\u{FF08}\u{FF3B}";
        let closing_parens = ")\\]\u{FF09}\u{FF3D}";
        let non_parens = format!("[^{}{}]", opening_parens, closing_parens);
        // Limit on the number of pairs of brackets in a candidate.
        let bracket_pair_limit = limit(0, 3);
        let matching_brackets = format!(
            "^(?:[{op}])?(?:{np}+[{cp}])?{np}+(?:[{op}]{np}+[{cp}]){lim}{np}*$",
            op = opening_parens,
            cp = closing_parens,
            np = non_parens,
            lim = bracket_pair_limit,
        );
        let lead_class_chars = format!("{}{}", opening_parens, PLUS_CHARS);
        let lead_class = format!("[{}]", lead_class_chars);
        // Limits for the digit shape of a candidate.
        let lead_limit = limit(0, 2);
        let punctuation_limit = limit(0, 4);
        let digit_block_limit = MAX_LENGTH_FOR_NSN + MAX_LENGTH_COUNTRY_CODE;
        let block_limit = limit(0, digit_block_limit);
        let punctuation = format!("[{}]{}", VALID_PUNCTUATION, punctuation_limit);
        let digit_sequence = format!("\\p{{Nd}}{}", limit(1, digit_block_limit));
        let pattern = format!(
            "(?i)(?:{lead}{punct}){lead_limit}{digits}(?:{punct}{digits}){block_limit}(?:{extn})?",
            lead = lead_class,
            punct = punctuation,
            lead_limit = lead_limit,
            digits = digit_sequence,
            block_limit = block_limit,
            extn = create_extn_pattern(false),
        );
        Self {
            pattern: Regex::new(&pattern).unwrap(),
            matching_brackets: Regex::new(&matching_brackets).unwrap(),
            lead_class_at_start: Regex::new(&format!("^{}", lead_class)).unwrap(),
            slash_separated_dates: Regex::new(
                "(?:(?:[0-3]?\\d/[01]?\\d)|(?:[01]?\\d/[0-3]?\\d))/(?:[12]\\d{3}|\\d{2})",
            )
            .unwrap(),
            time_stamps: Regex::new("[12]\\d{3}[-/]?[01]\\d[-/]?[0-3]\\d +[0-2]\\d$").unwrap(),
            time_stamps_suffix: Regex::new("^:[0-5]\\d").unwrap(),
            pub_pages: Regex::new("\\d{1,5}-+\\d{1,5}\\s{0,4}\\(\\d{1,4}").unwrap(),
            unwanted_end_chars: Regex::new("[^\\p{N}\\p{L}#]+$").unwrap(),
            currency_symbol: Regex::new("\\p{Sc}").unwrap(),
            inner_matches: vec![
                // Breaks on a slash: "651-234-2345/332-445-1234".
                Regex::new("/+(.*)").unwrap(),
                // The bracket is part of the second number:
                // "(650) 223 3345 (754) 223 3321".
                Regex::new("(\\([^(]*)").unwrap(),
                // Breaks on a dash with surrounding space.
                Regex::new("(?:\\p{Z}-|-\\p{Z})\\p{Z}*(.+)").unwrap(),
                // Breaks on an em-dash-like character.
                Regex::new("[\u{2012}-\u{2015}\u{FF0D}]\\p{Z}*(.+)").unwrap(),
                // Breaks on full stops.
                Regex::new("\\.+\\p{Z}*([^.]+)").unwrap(),
                // Breaks on whitespace.
                Regex::new("\\p{Z}+(\\P{Z}+)").unwrap(),
            ],
        }
    }
}

static PATTERNS: LazyLock<FindPatterns> = LazyLock::new(FindPatterns::new);

fn trim_after_first_match<'b>(pattern: &Regex, candidate: &'b str) -> &'b str {
    match pattern.find(candidate) {
        Some(found) => &candidate[..found.start()],
        None => candidate,
    }
}

/// Letters of the Latin script (and their combining marks); a number
/// glued to one of these is part of a word, not a phone number.
fn is_latin_letter(c: char) -> bool {
    if !c.is_alphabetic() && !('\u{0300}'..='\u{036F}').contains(&c) {
        return false;
    }
    matches!(
        c as u32,
        0x0041..=0x00FF | 0x0100..=0x017F | 0x0180..=0x024F | 0x1E00..=0x1EFF | 0x0300..=0x036F
    )
}

fn is_invalid_punctuation_symbol(c: char) -> bool {
    c == '%' || PATTERNS.currency_symbol.is_match(c.encode_utf8(&mut [0u8; 4]))
}

/// Iterator over the numbers found in one text, produced by
/// [`PhoneNumberUtil::find_numbers`].
pub struct PhoneNumberMatcher<'u, 't> {
    util: &'u PhoneNumberUtil,
    text: &'t str,
    preferred_region: String,
    leniency: Leniency,
    /// Failed candidates consume one try each; the scan stops when they
    /// run out.
    max_tries: u64,
    search_index: usize,
}

impl<'u, 't> PhoneNumberMatcher<'u, 't> {
    pub(crate) fn new(
        util: &'u PhoneNumberUtil,
        text: &'t str,
        default_region: &str,
        leniency: Leniency,
        max_tries: u64,
    ) -> Self {
        Self {
            util,
            text,
            preferred_region: default_region.to_owned(),
            leniency,
            max_tries,
            search_index: 0,
        }
    }

    fn extract_match(&mut self, candidate: &'t str, offset: usize) -> Option<PhoneNumberMatch> {
        // Skip things that look like dates or timestamps rather than
        // numbers.
        if PATTERNS.slash_separated_dates.is_match(candidate) {
            return None;
        }
        if PATTERNS.time_stamps.is_match(candidate) {
            let following_text = &self.text[offset + candidate.len()..];
            if PATTERNS.time_stamps_suffix.is_match(following_text) {
                return None;
            }
        }
        if let Some(found) = self.parse_and_verify(candidate, offset) {
            return Some(found);
        }
        self.extract_inner_match(candidate, offset)
    }

    /// Retries delimiter-separated fragments of a candidate that failed
    /// as a whole.
    fn extract_inner_match(&mut self, candidate: &'t str, offset: usize) -> Option<PhoneNumberMatch> {
        for inner_match_pattern in &PATTERNS.inner_matches {
            let mut is_first_match = true;
            let mut search_from = 0;
            while self.max_tries > 0 {
                let Some(captures) = inner_match_pattern.captures_at(candidate, search_from) else {
                    break;
                };
                let whole_match = captures.get(0).expect("group 0 always present");
                if is_first_match {
                    // The part before the delimiter may itself be a
                    // number.
                    let group = trim_after_first_match(
                        &PATTERNS.unwanted_end_chars,
                        &candidate[..whole_match.start()],
                    );
                    if let Some(found) = self.parse_and_verify(group, offset) {
                        return Some(found);
                    }
                    self.max_tries -= 1;
                    is_first_match = false;
                }
                if let Some(inner_group) = captures.get(1) {
                    let group =
                        trim_after_first_match(&PATTERNS.unwanted_end_chars, inner_group.as_str());
                    if let Some(found) = self.parse_and_verify(group, offset + inner_group.start())
                    {
                        return Some(found);
                    }
                    self.max_tries -= 1;
                }
                if whole_match.end() <= search_from {
                    break;
                }
                search_from = whole_match.end();
            }
        }
        None
    }

    fn parse_and_verify(&mut self, candidate: &'t str, offset: usize) -> Option<PhoneNumberMatch> {
        let text = self.text;
        if candidate.is_empty() {
            return None;
        }
        if !PATTERNS.matching_brackets.is_match(candidate)
            || PATTERNS.pub_pages.is_match(candidate)
        {
            return None;
        }
        if self.leniency >= Leniency::Valid {
            // A candidate hugging a Latin letter or a currency symbol is
            // part of the surrounding prose.
            if offset > 0 && !PATTERNS.lead_class_at_start.is_match(candidate) {
                if let Some(previous_char) = text[..offset].chars().next_back() {
                    if is_invalid_punctuation_symbol(previous_char) || is_latin_letter(previous_char)
                    {
                        return None;
                    }
                }
            }
            let last_char_index = offset + candidate.len();
            if last_char_index < text.len() {
                if let Some(next_char) = text[last_char_index..].chars().next() {
                    if is_invalid_punctuation_symbol(next_char) || is_latin_letter(next_char) {
                        return None;
                    }
                }
            }
        }
        let mut number = self
            .util
            .core
            .parse_and_keep_raw_input(candidate, &self.preferred_region)
            .ok()?;
        // Four-digit Israeli service numbers are only numbers when the
        // star that dials them is present.
        if self
            .util
            .core
            .get_region_code_for_country_code(number.country_code())
            == "IL"
            && self
                .util
                .core
                .get_national_significant_number(&number)
                .len()
                == 4
            && (offset == 0 || text[..offset].chars().next_back() != Some('*'))
        {
            return None;
        }
        if !leniency::verify(self.util, self.leniency, &number, candidate) {
            return None;
        }
        // The match reports the span and text; the parse context on the
        // number itself is not part of the result.
        number.clear_country_code_source();
        number.clear_raw_input();
        number.clear_preferred_domestic_carrier_code();
        Some(PhoneNumberMatch {
            start: offset,
            raw_string: candidate.to_owned(),
            number,
        })
    }
}

impl<'u, 't> Iterator for PhoneNumberMatcher<'u, 't> {
    type Item = PhoneNumberMatch;

    fn next(&mut self) -> Option<PhoneNumberMatch> {
        let text = self.text;
        while self.max_tries > 0 && self.search_index < text.len() {
            let Some(candidate_match) = PATTERNS.pattern.find_at(text, self.search_index) else {
                break;
            };
            let start = candidate_match.start();
            let candidate = trim_after_first_match(
                &self.util.core.patterns.second_number_start_pattern,
                candidate_match.as_str(),
            );
            self.search_index = if candidate.is_empty() {
                candidate_match.end()
            } else {
                start + candidate.len()
            };
            let found = self.extract_match(candidate, start);
            if found.is_some() {
                return found;
            }
            self.max_tries -= 1;
        }
        None
    }
}
