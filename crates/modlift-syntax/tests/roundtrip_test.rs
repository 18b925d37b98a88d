//! Parse/print round-trip tests over realistic module sources.
//!
//! Printing normalizes layout, so the contract checked here is that a
//! printed program reparses and prints to the same text.

use modlift_syntax::ast::Statement;
use modlift_syntax::codegen::print_program;
use modlift_syntax::{LineIndex, parse};

const COMPONENT: &str = r#"
import React, { useState, useEffect as effect } from 'react';
import * as styles from "./styles.css";
import './polyfills';

const DEFAULT_DELAY = 250, { freeze } = Object;

export function useDebounced(value, delay = DEFAULT_DELAY) {
  const [current, setCurrent] = useState(value);
  effect(() => {
    const handle = setTimeout(() => setCurrent(value), delay);
    return () => clearTimeout(handle);
  }, [value, delay]);
  return current;
}

export default class Widget extends React.Component {
  static defaultProps = { label: `Widget ${DEFAULT_DELAY}ms` };
  #clicks = 0;
  handleClick = async (event) => {
    this.#clicks++;
    await this.props.onClick?.(event, this.#clicks);
  };
  render() {
    const { label, ...rest } = this.props;
    return React.createElement("div", { className: styles.root, ...rest }, label ?? "none");
  }
}

export { freeze as deepFreeze, DEFAULT_DELAY as "default-delay" };
export * from "./hooks";
export * as utils from "./utils";
"#;

const SCRIPT_LIKE: &str = r#"
'use strict';
var counter = 0;
function* ids(prefix) {
  while (true) yield `${prefix}-${counter++}`;
}
outer: for (var i = 0, j = 10; i < j; i++, j--) {
  switch (i % 3) {
    case 0: continue outer;
    case 1: if (j > 5) break outer; else break;
    default:
  }
}
do counter--; while (counter > 0)
try { JSON.parse("{"); } catch ({ message }) { console.error(message); } finally { counter = -0; }
const re = /[a-z]+\/(\d+)/gi, n = 0x1F + 1e3 + .5 + 10n;
label: { break label; }
"#;

fn normalize(src: &str) -> String {
    let program = parse(src).unwrap_or_else(|err| panic!("failed to parse: {err}"));
    print_program(&program)
}

#[test]
fn test_component_module_roundtrip() {
    let once = normalize(COMPONENT);
    let twice = normalize(&once);
    assert_eq!(once, twice);
    assert!(once.contains("import React, { useState, useEffect as effect } from \"react\";"));
    assert!(once.contains("export { freeze as deepFreeze, DEFAULT_DELAY as \"default-delay\" };"));
}

#[test]
fn test_script_like_roundtrip_preserves_ast() {
    let first = parse(SCRIPT_LIKE).unwrap();
    let printed = print_program(&first);
    let second = parse(&printed).unwrap();
    assert_eq!(first, second, "printed:\n{printed}");
}

#[test]
fn test_module_declarations_are_top_level_only() {
    let program = parse(COMPONENT).unwrap();
    let module_items = program
        .body
        .iter()
        .filter(|stmt| stmt.is_module_declaration())
        .count();
    assert_eq!(module_items, 8);
    assert!(matches!(program.body[0], Statement::Import(_)));
}

#[test]
fn test_error_position_maps_to_line_and_column() {
    let src = "import a from \"a\";\nexport { a }\nlet = = 1;\n";
    let err = parse(src).unwrap_err();
    let position = LineIndex::new(src).line_column(err.span().start);
    assert_eq!(position.line, 3);
    assert_eq!(position.column, 7);
}
