//! Inline snapshot tests for printed output
//!
//! Formatter, generator and lint output are compared against inline snapshots so layout
//! changes show up in review.
//!
//! Review changes: `cargo insta review`

use brace::diagnostics::format_location;
use brace::format::{FormatConfig, format_source, format_source_with_config};
use brace::{generate, lint, parse_source};

fn generate_str(source: &str) -> String {
    let program = parse_source(source).expect("parse failed");
    generate(&program).expect("generation failed")
}

// ============================================================================
// Formatter
// ============================================================================

#[test]
fn test_format_program() {
    let source = "// greeting helpers\n\
        function greet(name,punct){const msg=\"Hello, \"+name+punct;return msg}\n\
        const people=['ada','linus']\n\
        for(let i=0;i<people.length;i++) greet(people[i],'!')";
    insta::assert_snapshot!(format_source(source).unwrap(), @r#"
    // greeting helpers
    function greet(name, punct) {
      const msg = "Hello, " + name + punct;
      return msg;
    }
    const people = [
      "ada",
      "linus"
    ];
    for (let i = 0; i < people.length; i++)
      greet(people[i], "!");
    "#);
}

#[test]
fn test_format_nested_literals() {
    insta::assert_snapshot!(format_source("let o = {a: {b: 1}, c: []}").unwrap(), @r"
    let o = {
      a: {
        b: 1
      },
      c: []
    };
    ");
}

#[test]
fn test_format_compact_wide_indent() {
    let config = FormatConfig::new()
        .with_indent_width(4)
        .with_break_long_constructs(false);
    let source = "const cfg={name:'x',tags:[1,2]}\nif(cfg.name=='x'){log(cfg)}else{log(null)}";
    insta::assert_snapshot!(format_source_with_config(source, &config).unwrap(), @r#"
    const cfg = {name: "x", tags: [1, 2]};
    if (cfg.name == "x") {
        log(cfg);
    } else {
        log(null);
    }
    "#);
}

#[test]
fn test_format_keeps_statement_comments() {
    insta::assert_snapshot!(format_source("/* block */\nlet a = 1 // trailing\n").unwrap(), @r"
    /* block */
    let a = 1;
    // trailing
    ");
}

#[test]
fn test_format_arrow_and_assignments() {
    let source = "const inc=(x)=>{return x+1}\nlet n=0\nn+=inc(n)\nn--";
    insta::assert_snapshot!(format_source(source).unwrap(), @r"
    const inc = (x) => {
      return x + 1;
    };
    let n = 0;
    n += inc(n);
    n--;
    ");
}

// ============================================================================
// Generator
// ============================================================================

#[test]
fn test_generate_program() {
    let source = "function area(w, h) { if (w > 0) { return w * h } else return 0 }\n\
        const shapes = [{w: 1, h: 2}]";
    insta::assert_snapshot!(generate_str(source), @r"
    function area(w, h) {
    if (w > 0) {
    return w * h;
    } else return 0;
    }
    const shapes = [{w: 1, h: 2}];
    ");
}

#[test]
fn test_generate_literals_and_grouping() {
    let source = "let a = 'it' + \"s\"; var b = (1 + 2.5) * 4; const c = [true, false, null, undefined]";
    insta::assert_snapshot!(generate_str(source), @r#"
    let a = "it" + "s";
    var b = (1 + 2.5) * 4;
    const c = [true, false, null, undefined];
    "#);
}

#[test]
fn test_generate_unsupported_message() {
    let program = parse_source("let xs = [1]; for (let i = 0; i < 1; i++) {}").unwrap();
    let err = generate(&program).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"code generation does not support ForStatement nodes");
}

// ============================================================================
// Lint
// ============================================================================

#[test]
fn test_lint_report() {
    let source = "var total = 0\n\
        function add(n, unused) { total = total + n }\n\
        add(1, missing)\n\
        let total = 2\n";
    let program = parse_source(source).unwrap();
    let report: Vec<String> = lint(&program)
        .iter()
        .map(|d| format_location("main.js", source, d.offset, &d.message))
        .collect();
    insta::assert_snapshot!(report.join("\n"), @r"
    main.js:3:8: Undefined variable: 'missing'
    main.js:2:17: Unused parameter: 'unused'
    main.js:4:5: Duplicate declaration: 'total'
    main.js:1:1: 'var' is not allowed, use 'let' or 'const' instead.
    ");
}
