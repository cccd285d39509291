// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notices printed to the terminal.

use sleeve_placement::Diagnostics;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn notify(&self, title: &str, message: &str) {
        tracing::warn!(title, message, "Notice");
        eprintln!("[{}] {}", title, message);
    }
}
