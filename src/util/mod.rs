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

pub(crate) mod consts;
pub(crate) mod core;
pub mod enums;
pub mod errors;
pub(crate) mod helpers;
pub(crate) mod patterns;

mod api;

pub use api::PhoneNumberUtil;
pub use enums::{
    Leniency, MatchType, NumberLengthType, NumberOrStr, PhoneNumberFormat, PhoneNumberType,
};
pub use errors::{GetExampleNumberError, ParseError, ValidationError};
