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

//! Anchoring helpers. Most metadata patterns are written unanchored and
//! rely on the caller matching "from the start" or "the whole string";
//! these traits make that requirement explicit at every call site.

use regex::{Captures, Match, Regex};

pub trait RegexFullMatch {
    /// The match must cover the entire input.
    fn full_match(&self, s: &str) -> bool;
}

pub trait RegexConsume {
    /// The match must begin at the first byte of the input.
    fn matches_start(&self, s: &str) -> bool {
        self.find_start(s).is_some()
    }

    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>>;
    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>>;
}

impl RegexFullMatch for Regex {
    fn full_match(&self, s: &str) -> bool {
        match self.find(s) {
            Some(matched) => matched.start() == 0 && matched.end() == s.len(),
            None => false,
        }
    }
}

impl RegexConsume for Regex {
    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>> {
        let captures = self.captures(s)?;
        if captures.get(0)?.start() != 0 {
            return None;
        }
        Some(captures)
    }

    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>> {
        let found = self.find(s)?;
        if found.start() != 0 {
            return None;
        }
        Some(found)
    }
}
