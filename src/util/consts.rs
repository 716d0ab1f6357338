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

// The minimum and maximum length of the national significant number.
pub const MIN_LENGTH_FOR_NSN: usize = 2;
// The ITU says the maximum length should be 15, but longer numbers exist
// in the wild (Germany).
pub const MAX_LENGTH_FOR_NSN: usize = 17;
/// The maximum length of the country calling code.
pub const MAX_LENGTH_COUNTRY_CODE: usize = 3;
// Input longer than this is certainly not a phone number; refusing it up
// front keeps regex evaluation bounded.
pub const MAX_INPUT_STRING_LENGTH: usize = 250;

pub const PLUS_SIGN: &str = "+";
pub const STAR_SIGN: &str = "*";
pub const PLUS_CHARS: &str = "+\u{FF0B}";

// Acceptable punctuation inside a phone number. This excludes punctuation
// found as a leading character only: dashes, whitespace, full stops,
// slashes, square brackets, parentheses and tildes, with full-width
// variants. The letter 'x' is included since it stands in for carrier
// information in some numbers.
pub const VALID_PUNCTUATION: &str = "-x\
\u{2010}-\u{2015}\u{2212}\u{30FC}\u{FF0D}-\u{FF0F} \u{00A0}\
\u{00AD}\u{200B}\u{2060}\u{3000}()\u{FF08}\u{FF09}\u{FF3B}\
\u{FF3D}.\\[\\]/~\u{2053}\u{223C}";

// Characters that typically start a second phone number written next to
// the first one, as in "(530) 583-6985 x302/x2303": everything from the
// slash on belongs to another number and is cut off.
pub const SECOND_NUMBER_START: &str = r"[\\/] *x";

pub const REGION_CODE_FOR_NON_GEO_ENTITY: &str = "001";

pub const RFC3966_EXTN_PREFIX: &str = ";ext=";
pub const RFC3966_PREFIX: &str = "tel:";
pub const RFC3966_PHONE_CONTEXT: &str = ";phone-context=";
pub const RFC3966_ISDN_SUBADDRESS: &str = ";isub=";
pub const RFC3966_VISUAL_SEPARATOR: &str = r"[\-\.\(\)]?";

/// Any Unicode decimal digit.
pub const DIGITS: &str = r"\p{Nd}";

pub const VALID_ALPHA: &str = "a-z";
pub const VALID_ALPHA_INCL_UPPERCASE: &str = "A-Za-z";

// Default extension prefix used when formatting, unless the region's
// metadata declares a preferred one.
pub const DEFAULT_EXTN_PREFIX: &str = " ext. ";

pub const POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL: &str = "[ \u{00A0}\\t,]*";

// Optional full stop (.) or colon, followed by zero or more
// spaces/tabs/commas.
pub const POSSIBLE_CHARS_AFTER_EXT_LABEL: &str = "[:\\.\u{FF0E}]?[ \u{00A0}\\t,-]*";
pub const OPTIONAL_EXT_SUFFIX: &str = "#?";

pub const NANPA_COUNTRY_CODE: i32 = 1;
