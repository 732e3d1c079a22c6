// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests for the measure engine.
mod divergences_sanity;
mod generalized_sanity;
mod multivariate_sanity;
