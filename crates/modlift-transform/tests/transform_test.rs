//! End-to-end behaviour of the module transform: source in, printed
//! CommonJS out.

use modlift_syntax::ast::Span;
use modlift_syntax::codegen::print_statements;
use modlift_syntax::parse;
use modlift_transform::{Error, TransformError, TransformOptions, transform, transform_source};

const ES_MODULE: &str = "Object.defineProperty(exports, \"__esModule\", { value: true });\n";

fn lift(src: &str) -> String {
    transform_source(src, &TransformOptions::default())
        .unwrap_or_else(|err| panic!("transform failed: {err}"))
        .code
}

fn lift_err(src: &str) -> TransformError {
    match transform_source(src, &TransformOptions::default()) {
        Err(Error::Transform(err)) => err,
        other => panic!("expected a transform error, got {other:?}"),
    }
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in:\n{haystack}"))
}

#[test]
fn test_script_without_module_syntax_is_unchanged() {
    let program = parse("var a = 1;\nfunction f() { return require(\"x\"); }\nf();").unwrap();
    let result = transform(&program, &TransformOptions::default()).unwrap();
    assert!(!result.is_es_module);
    assert_eq!(result.statements, program.body);
}

#[test]
fn test_imports_are_hoisted_in_order() {
    let code = lift(
        "foo();\n\
         import a from \"a\";\n\
         bar();\n\
         import \"b\";\n\
         import { c, d as e } from \"c\";",
    );
    assert_eq!(
        code,
        format!(
            "var _a = require(\"a\");\n\
             var a = _$$_IMPORT_DEFAULT(_a);\n\
             require(\"b\");\n\
             var _c = require(\"c\");\n\
             var c = _c.c;\n\
             var e = _c.d;\n\
             foo();\n\
             bar();\n\
             {ES_MODULE}"
        )
    );
}

#[test]
fn test_export_all_copies_in_source_order() {
    let code = lift("export * from \"a\";\nexport * from \"b\";");
    assert!(code.starts_with("var _a = require(\"a\");\nvar _b = require(\"b\");\n"));
    // the later copy overwrites the earlier one
    assert!(position(&code, "Object.keys(_a)") < position(&code, "Object.keys(_b)"));
    assert!(code.contains("exports[_key] = _b[_key];"));
    assert!(code.ends_with(ES_MODULE));
}

#[test]
fn test_named_default_function_stays_referable() {
    let code = lift("export default function named() {}\nnamed.displayName = \"Named\";");
    assert_eq!(
        code,
        format!(
            "function named() {{}}\n\
             named.displayName = \"Named\";\n\
             exports.default = named;\n\
             {ES_MODULE}"
        )
    );
}

#[test]
fn test_default_expression_gets_collision_free_binding() {
    let code = lift("const _default = 1;\nexport default 42;");
    assert_eq!(
        code,
        format!(
            "const _default = 1;\n\
             var _default2 = 42;\n\
             exports.default = _default2;\n\
             {ES_MODULE}"
        )
    );
}

#[test]
fn test_anonymous_default_class_is_named() {
    let code = lift("export default class extends Base {}");
    assert!(code.starts_with("class _default extends Base {}\n"));
    assert!(code.contains("exports.default = _default;\n"));
}

#[test]
fn test_same_local_under_two_names() {
    let code = lift("let a = 1;\nexport { a, a as b };");
    assert_eq!(
        code,
        format!("let a = 1;\nexports.a = a;\nexports.b = a;\n{ES_MODULE}")
    );
}

#[test]
fn test_export_of_missing_binding_fails() {
    let err = lift_err("export { missing };");
    assert_eq!(
        err,
        TransformError::UndefinedExportBinding {
            name: "missing".to_string(),
            span: Span::new(9, 16),
        }
    );
}

#[test]
fn test_second_default_export_is_reported() {
    let err = lift_err("export default 1;\nexport default 2;");
    assert_eq!(
        err,
        TransformError::DuplicateDefaultExport {
            span: Span::new(18, 35),
        }
    );
}

#[test]
fn test_side_effect_import_binds_nothing() {
    let code = lift("import \"side-effect-module\";");
    assert_eq!(code, format!("require(\"side-effect-module\");\n{ES_MODULE}"));
}

#[test]
fn test_output_is_a_fixed_point() {
    let src = "import React, { useState } from \"react\";\n\
               import * as styles from \"./styles.css\";\n\
               export const [a, b] = useState(0);\n\
               export default function App() { return React.createElement(\"div\", styles); }\n\
               export * from \"./hooks\";";
    let once = lift(src);

    let program = parse(&once).unwrap();
    let result = transform(&program, &TransformOptions::default()).unwrap();
    assert!(!result.is_es_module);
    assert_eq!(result.statements, program.body);
    assert_eq!(print_statements(&result.statements), once);
}

#[test]
fn test_reexports() {
    let code = lift(
        "export { default as Button, helper } from \"./button\";\n\
         export * as utils from \"./utils\";",
    );
    assert_eq!(
        code,
        format!(
            "var _button = require(\"./button\");\n\
             var _default = _$$_IMPORT_DEFAULT(_button);\n\
             var _helper = _button.helper;\n\
             var _utils = require(\"./utils\");\n\
             var _utils2 = _$$_IMPORT_ALL(_utils);\n\
             exports.Button = _default;\n\
             exports.helper = _helper;\n\
             exports.utils = _utils2;\n\
             {ES_MODULE}"
        )
    );
}

#[test]
fn test_string_export_names() {
    let code = lift("import { \"a-b\" as ab } from \"m\";\nexport { ab as \"c d\" };");
    assert!(code.contains("var ab = _m[\"a-b\"];\n"));
    assert!(code.contains("exports[\"c d\"] = ab;\n"));
}

#[test]
fn test_custom_helpers_and_resolve() {
    let options = TransformOptions {
        import_default: "interopDefault".to_string(),
        import_all: "interopWildcard".to_string(),
        enable_resolve: true,
    };
    let output = transform_source("import a, * as all from \"pkg\";", &options).unwrap();
    assert_eq!(
        output.code,
        format!(
            "var _pkg = require(require.resolve(\"pkg\"));\n\
             var a = interopDefault(_pkg);\n\
             var all = interopWildcard(_pkg);\n\
             {ES_MODULE}"
        )
    );
    assert_eq!(output.dependencies, ["pkg"]);
}

#[test]
fn test_empty_export_marks_module() {
    let output = transform_source("export {};", &TransformOptions::default()).unwrap();
    assert!(output.is_es_module);
    assert_eq!(output.code, ES_MODULE);
}

#[test]
fn test_export_declarations_snapshot_after_body() {
    let code = lift("export let count = 0;\nexport function bump() { count++; }\ncount = 5;");
    assert_eq!(
        code,
        format!(
            "let count = 0;\n\
             function bump() {{\n\
            \x20 count++;\n\
             }}\n\
             count = 5;\n\
             exports.count = count;\n\
             exports.bump = bump;\n\
             {ES_MODULE}"
        )
    );
}

#[test]
fn test_errors_abort_without_output() {
    assert!(matches!(
        lift_err("import x from \"\";"),
        TransformError::InvalidModuleSpecifier { .. }
    ));
    assert!(matches!(
        lift_err("let a, b;\nexport { a as x, b as x };"),
        TransformError::DuplicateExportName { .. }
    ));
}

#[test]
fn test_deep_nesting_is_a_syntax_error() {
    let deep = format!("export const x = {}1{};", "[".repeat(2000), "]".repeat(2000));
    match transform_source(&deep, &TransformOptions::default()) {
        Err(Error::Syntax(err)) => assert_eq!(err.message(), "Nesting too deep"),
        other => panic!("expected a syntax error, got {other:?}"),
    }

    let nested = format!("{}1{}", "[".repeat(40), "]".repeat(40));
    let out = lift(&format!("export const x = {nested};"));
    assert!(out.starts_with(&format!("const x = {nested};\n")), "{out}");
}
