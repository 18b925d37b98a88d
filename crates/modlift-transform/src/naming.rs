// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Collision-free temporary names.

use modlift_syntax::lexer::{is_id_continue, is_id_start};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Globals the emitted code refers to.
const RESERVED: [&str; 4] = ["require", "exports", "module", "Object"];

/// Hands out `_base`, `_base2`, `_base3`, ... skipping every name already
/// taken. One generator serves one transform.
#[derive(Debug, Default)]
pub struct NameGenerator {
    taken: FxHashSet<String>,
}

impl NameGenerator {
    /// Creates a generator that avoids `taken` and the registry globals.
    pub fn new(taken: FxHashSet<String>) -> Self {
        let mut generator = Self { taken };
        for name in RESERVED {
            generator.reserve(name);
        }
        generator
    }

    /// Marks a name as unavailable.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    /// Returns a fresh name derived from `base` and marks it taken.
    pub fn fresh(&mut self, base: &str) -> String {
        let stem = format!("_{}", sanitize(base));
        let mut candidate = stem.clone();
        let mut counter = 1;
        while self.taken.contains(&candidate) {
            counter += 1;
            candidate = format!("{stem}{counter}");
        }
        trace!(name = %candidate, base, "synthesized name");
        self.taken.insert(candidate.clone());
        candidate
    }

    /// A fresh handle name for a module specifier: `"./utils/date-fns.js"`
    /// becomes `_dateFns`.
    pub fn module_handle(&mut self, specifier: &str) -> String {
        self.fresh(&handle_base(specifier))
    }
}

/// The last path segment of a specifier, without its extension, camel-cased.
fn handle_base(specifier: &str) -> String {
    let segment = specifier
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(specifier);
    let stem = match segment.rfind('.') {
        Some(dot) if dot > 0 => &segment[..dot],
        _ => segment,
    };

    let mut base = String::new();
    let mut upper_next = false;
    for ch in stem.chars() {
        if is_id_continue(ch) && ch != '$' {
            if upper_next && !base.is_empty() {
                base.extend(ch.to_uppercase());
            } else {
                base.push(ch);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    if base.is_empty() { "module".to_string() } else { base }
}

/// Maps arbitrary text onto identifier characters.
fn sanitize(base: &str) -> String {
    let cleaned: String = base
        .chars()
        .map(|ch| if is_id_continue(ch) { ch } else { '_' })
        .collect();
    match cleaned.chars().next() {
        Some(first) if is_id_start(first) || first == '_' => cleaned,
        Some(_) => format!("_{cleaned}"),
        None => "ref".to_string(),
    }
}
