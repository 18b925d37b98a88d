// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Rendering of parse and transform errors against their source.

use std::fmt::Write as _;

use modlift_syntax::LineIndex;
use modlift_transform::Error;
use owo_colors::OwoColorize;

/// Renders `error` as
///
/// ```text
/// path:line:column: error: message
///   let = = 1;
///       ^
/// ```
pub fn render(path: &str, source: &str, error: &Error, color: bool) -> String {
    let index = LineIndex::new(source);
    let position = index.line_column(error.span().start);
    let message = error.to_string();

    let mut out = String::new();
    let location = format!("{path}:{}:{}:", position.line, position.column);
    if color {
        let _ = writeln!(
            out,
            "{} {} {}",
            location.bold(),
            "error:".red().bold(),
            message.bold()
        );
    } else {
        let _ = writeln!(out, "{location} error: {message}");
    }

    let line = index.line_text(position.line);
    let padding: String = line
        .chars()
        .take(position.column.saturating_sub(1))
        .map(|ch| if ch == '\t' { '\t' } else { ' ' })
        .collect();
    let _ = writeln!(out, "  {line}");
    if color {
        let _ = writeln!(out, "  {padding}{}", "^".red().bold());
    } else {
        let _ = writeln!(out, "  {padding}^");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlift_transform::{TransformOptions, transform_source};

    fn error_for(source: &str) -> Error {
        transform_source(source, &TransformOptions::default()).unwrap_err()
    }

    #[test]
    fn test_render_transform_error() {
        let source = "let a;\nexport { a, missing };\n";
        let rendered = render("src/index.js", source, &error_for(source), false);
        assert_eq!(
            rendered,
            "src/index.js:2:13: error: Export 'missing' is not defined in this module\n\
            \x20 export { a, missing };\n\
            \x20             ^\n"
        );
    }

    #[test]
    fn test_render_syntax_error() {
        let source = "import { a from \"a\";";
        let rendered = render("a.js", source, &error_for(source), false);
        assert!(rendered.starts_with("a.js:1:12: error: SyntaxError: "));
        assert!(rendered.ends_with("  import { a from \"a\";\n             ^\n"));
    }

    #[test]
    fn test_tabs_are_kept_in_padding() {
        let source = "\texport { nope };";
        let rendered = render("t.js", source, &error_for(source), false);
        assert!(rendered.ends_with("  \texport { nope };\n  \t         ^\n"));
    }
}
