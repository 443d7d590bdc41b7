// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Textual formats understood by Proteus.
//!
//! Currently this is the plate DSL only; the DSL text is the sole authorable
//! artifact.

pub mod dsl;

pub use dsl::{parse_model, ParseError};
