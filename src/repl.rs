// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interactive preview of the module transform.
//!
//! Each complete input is parsed as a module and the rewritten source is
//! printed back.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use modlift_transform::{TransformOptions, transform_source};
use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Config, Editor, Helper};

use crate::diagnostics;

const HISTORY_FILE: &str = ".modlift_history";
const MAX_HISTORY_SIZE: usize = 1000;

/// Dot-prefixed REPL commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
    Options,
    Resolve,
    Load,
}

impl ReplCommand {
    /// Parse a REPL command from input string
    pub fn parse(input: &str) -> Option<(Self, Option<&str>)> {
        let input = input.trim();
        let rest = input.strip_prefix('.')?;

        let mut parts = rest.splitn(2, char::is_whitespace);
        let cmd = parts.next()?.to_lowercase();
        let arg = parts.next().map(str::trim).filter(|arg| !arg.is_empty());

        match cmd.as_str() {
            "help" | "h" | "?" => Some((ReplCommand::Help, arg)),
            "exit" | "quit" | "q" => Some((ReplCommand::Exit, arg)),
            "clear" | "cls" => Some((ReplCommand::Clear, arg)),
            "version" | "v" => Some((ReplCommand::Version, arg)),
            "options" | "o" => Some((ReplCommand::Options, arg)),
            "resolve" | "r" => Some((ReplCommand::Resolve, arg)),
            "load" | "l" => Some((ReplCommand::Load, arg)),
            _ => None,
        }
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
            (".options", "Show the current transform options"),
            (".resolve", "Toggle require.resolve() wrapping"),
            (".load <file>", "Transform a file and print the result"),
        ]
    }
}

/// Words offered for completion and hints.
const COMPLETIONS: &[&str] = &[
    "import",
    "export",
    "default",
    "from",
    "as",
    "async",
    "await",
    "class",
    "const",
    "function",
    "let",
    "var",
    "return",
    ".help",
    ".exit",
    ".clear",
    ".version",
    ".options",
    ".resolve",
    ".load",
];

/// Completion, hints, highlighting and multi-line validation for rustyline
struct ModliftHelper;

impl Completer for ModliftHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let word = current_word(&line[..pos]);
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches = COMPLETIONS
            .iter()
            .filter(|candidate| candidate.starts_with(word))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: candidate[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for ModliftHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        let word = current_word(line);
        if word.len() < 2 {
            return None;
        }

        COMPLETIONS
            .iter()
            .find(|candidate| candidate.starts_with(word) && candidate.len() > word.len())
            .map(|candidate| candidate[word.len()..].to_string())
    }
}

/// The identifier or dot-command being typed at the end of `line`.
fn current_word(line: &str) -> &str {
    let start = line
        .rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
        .map(|i| i + 1)
        .unwrap_or(0);
    &line[start..]
}

impl Highlighter for ModliftHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim_start().starts_with('.') {
            return Cow::Owned(line.magenta().to_string());
        }

        let mut out = String::with_capacity(line.len() * 2);
        let mut rest = line;
        while let Some(ch) = rest.chars().next() {
            let len = if matches!(ch, '"' | '\'' | '`') {
                // module specifiers and other strings are coloured whole
                let literal = &rest[..string_len(rest, ch)];
                out.push_str(&literal.green().to_string());
                literal.len()
            } else if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                let len = rest
                    .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                    .unwrap_or(rest.len());
                out.push_str(&highlight_word(&rest[..len]));
                len
            } else {
                match ch {
                    '{' | '}' => out.push_str(&ch.yellow().to_string()),
                    '*' => out.push_str(&ch.cyan().to_string()),
                    _ => out.push(ch),
                }
                ch.len_utf8()
            };
            rest = &rest[len..];
        }
        Cow::Owned(out)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

/// Byte length of the string literal at the start of `text`, up to and
/// including the closing `quote` or the end of input.
fn string_len(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, ch) in text.char_indices().skip(1) {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            _ if ch == quote => return i + ch.len_utf8(),
            _ => {}
        }
    }
    text.len()
}

fn highlight_word(word: &str) -> String {
    match word {
        "import" | "export" | "default" | "from" | "as" => word.magenta().bold().to_string(),
        "async" | "await" | "class" | "const" | "extends" | "function" | "let" | "new"
        | "return" | "var" => word.blue().to_string(),
        _ if word.starts_with(|c: char| c.is_ascii_digit()) => word.yellow().to_string(),
        _ => word.to_string(),
    }
}

impl Validator for ModliftHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();
        if input.trim_start().starts_with('.') {
            return Ok(ValidationResult::Valid(None));
        }

        let trimmed = input.trim_end();
        let wants_more = !is_balanced(input)
            || trimmed.ends_with(['\\', '=', ',', '{', '(', '['])
            || trimmed.ends_with(" from")
            || trimmed.ends_with(" as");
        Ok(if wants_more {
            ValidationResult::Incomplete
        } else {
            ValidationResult::Valid(None)
        })
    }
}

/// Whether every bracket opened outside strings and comments is closed.
///
/// A stray closer counts as balanced so the parser can report it.
fn is_balanced(input: &str) -> bool {
    let mut open = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' | '\'' | '`' => {
                let mut escaped = false;
                let closed = chars.by_ref().any(|c| {
                    let end = !escaped && c == ch;
                    escaped = !escaped && c == '\\';
                    end
                });
                if !closed {
                    return false;
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                let _ = chars.by_ref().find(|&c| c == '\n');
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut star = false;
                let closed = chars.by_ref().any(|c| {
                    let end = star && c == '/';
                    star = c == '*';
                    end
                });
                if !closed {
                    return false;
                }
            }
            '(' | '[' | '{' => open.push(ch),
            ')' | ']' | '}' => {
                let expected = match ch {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if open.pop() != Some(expected) {
                    return true;
                }
            }
            _ => {}
        }
    }

    open.is_empty()
}

impl Helper for ModliftHelper {}

/// The interactive transform preview
pub struct Repl {
    options: TransformOptions,
    editor: Editor<ModliftHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl Repl {
    /// Create a new REPL using `options` for every transform
    pub fn new(options: TransformOptions) -> rustyline::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(MAX_HISTORY_SIZE)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(ModliftHelper));

        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("modlift")
            .join(HISTORY_FILE);

        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.load_history(&history_path);

        Ok(Self {
            options,
            editor,
            history_path,
        })
    }

    /// Run the REPL main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = format!("{} ", "modlift>".bright_green().bold());

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    if let Some((cmd, arg)) = ReplCommand::parse(trimmed) {
                        match self.execute_command(cmd, arg) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    self.transform_and_print("<repl>", trimmed);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        let _ = self.editor.save_history(&self.history_path);
        println!();
        Ok(())
    }

    fn print_banner(&self) {
        println!();
        println!(
            "  {} {} {}",
            "modlift".bright_cyan().bold(),
            "v".dimmed(),
            env!("CARGO_PKG_VERSION").bright_yellow()
        );
        println!(
            "  {}",
            "ES module syntax in, CommonJS registry calls out".dimmed()
        );
        println!();
        println!(
            "  {} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn execute_command(&mut self, cmd: ReplCommand, arg: Option<&str>) -> CommandResult {
        match cmd {
            ReplCommand::Help => self.print_help(),
            ReplCommand::Exit => return CommandResult::Exit,
            ReplCommand::Clear => print!("\x1B[2J\x1B[H"),
            ReplCommand::Version => println!(
                "{}: {}",
                "modlift".bright_cyan().bold(),
                env!("CARGO_PKG_VERSION").yellow()
            ),
            ReplCommand::Options => self.print_options(),
            ReplCommand::Resolve => {
                self.options.enable_resolve = !self.options.enable_resolve;
                let state = if self.options.enable_resolve { "on" } else { "off" };
                println!("{} {}", "require.resolve wrapping".dimmed(), state.cyan());
            }
            ReplCommand::Load => match arg {
                Some(path) => self.load_file(Path::new(path)),
                None => eprintln!(
                    "{}: {} {}",
                    "Error".red().bold(),
                    ".load".cyan(),
                    "requires a file path".dimmed()
                ),
            },
        }
        CommandResult::Continue
    }

    fn print_help(&self) {
        println!();
        println!("{}", "REPL Commands:".white().bold());
        println!();
        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:16} {}", cmd.cyan(), desc.dimmed());
        }
        println!();
        println!("{}", "Keyboard Shortcuts:".white().bold());
        println!();
        println!("  {:16} {}", "Ctrl+C".yellow(), "Cancel current input".dimmed());
        println!("  {:16} {}", "Ctrl+D".yellow(), "Exit REPL".dimmed());
        println!("  {:16} {}", "Tab".yellow(), "Autocomplete".dimmed());
        println!();
    }

    fn print_options(&self) {
        println!("  {:16} {}", "import_default".cyan(), self.options.import_default);
        println!("  {:16} {}", "import_all".cyan(), self.options.import_all);
        println!("  {:16} {}", "enable_resolve".cyan(), self.options.enable_resolve);
    }

    fn load_file(&self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(source) => self.transform_and_print(&path.display().to_string(), &source),
            Err(err) => eprintln!(
                "{}: failed to read {}: {}",
                "Error".red().bold(),
                path.display(),
                err
            ),
        }
    }

    fn transform_and_print(&self, name: &str, source: &str) {
        match transform_source(source, &self.options) {
            Ok(output) => {
                print!("{}", output.code);
                if !output.is_es_module {
                    println!("{}", "// no module syntax".dimmed());
                }
            }
            Err(err) => eprint!("{}", diagnostics::render(name, source, &err, true)),
        }
    }
}

/// Result of executing a REPL command
enum CommandResult {
    Continue,
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repl_command_parse() {
        assert!(matches!(
            ReplCommand::parse(".help"),
            Some((ReplCommand::Help, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".exit"),
            Some((ReplCommand::Exit, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".resolve"),
            Some((ReplCommand::Resolve, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".load  src/app.js "),
            Some((ReplCommand::Load, Some("src/app.js")))
        ));
        assert!(ReplCommand::parse("import a from \"a\"").is_none());
        assert!(ReplCommand::parse(".unknown").is_none());
    }

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced("export { a, b }"));
        assert!(is_balanced("import { a } from \"{\""));
        assert!(is_balanced("import { a } from \"a\\\"{\""));
        assert!(is_balanced("export {}; // {"));
        assert!(is_balanced("export /* { */ {}"));
        assert!(is_balanced("export }"));
        assert!(!is_balanced("export function f() {"));
        assert!(!is_balanced("import {"));
        assert!(!is_balanced("export const s = `unterminated"));
        assert!(!is_balanced("export /* unterminated"));
    }

    #[test]
    fn test_string_len() {
        assert_eq!(string_len("\"./a\" ;", '"'), 5);
        assert_eq!(string_len("'a\\'b'", '\''), 6);
        assert_eq!(string_len("\"open", '"'), 5);
    }

    #[test]
    fn test_highlight_keeps_text() {
        let line = "import { a } from \"./a b\"; // ok";
        let highlighted = ModliftHelper.highlight(line, 0);
        assert!(highlighted.contains("\"./a b\""));
        assert!(highlighted.contains("import"));
        assert!(highlighted.contains("// ok"));
    }

    #[test]
    fn test_current_word() {
        assert_eq!(current_word("import { use"), "use");
        assert_eq!(current_word(".lo"), ".lo");
        assert_eq!(current_word("export "), "");
    }
}
