// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware version extraction from the `hid` property.

use std::sync::LazyLock;

use regex::Regex;

static VERSION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"V(\d+(?:\.\d+)*)\.bin$").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// Extracts the firmware version from a firmware identifier.
///
/// The identifier is a file name ending in `V<digits>(.<digits>)*.bin`.
/// Identifiers without that suffix yield `None`.
///
/// # Examples
///
/// ```
/// use gree_lib::device::parse_firmware_version;
///
/// assert_eq!(
///     parse_firmware_version("362001000762+U-CS532AE(LT)V3.31.bin").as_deref(),
///     Some("3.31")
/// );
/// assert_eq!(parse_firmware_version("362001000762+U-CS532AE(LT)"), None);
/// ```
#[must_use]
pub fn parse_firmware_version(hid: &str) -> Option<String> {
    VERSION_SUFFIX
        .captures(hid)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
