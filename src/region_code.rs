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

//! Sentinel region codes shared between the library and its callers.
//!
//! Regions are identified by their ISO 3166-1 alpha-2 code in upper case.
//! Two sentinels exist on top of the real alpha-2 codes: `ZZ` for "region
//! unknown" and `001` for non-geographical entities (country calling codes
//! such as 800 or 979 that belong to the world rather than a country).

pub struct RegionCode {}

impl RegionCode {
    /// Returns a region code string representing the "unknown" region.
    pub fn get_unknown() -> &'static str {
        Self::zz()
    }

    pub fn zz() -> &'static str {
        "ZZ"
    }

    /// The region code for non-geographical entities, per UN M.49.
    pub fn un001() -> &'static str {
        "001"
    }
}
