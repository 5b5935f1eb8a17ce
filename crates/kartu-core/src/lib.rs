// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kartu — Core card record, variants, and error definitions shared across all crates.

pub mod card;
pub mod config;
pub mod error;
pub mod human_errors;

pub use card::*;
pub use config::AppConfig;
pub use error::KartuError;
