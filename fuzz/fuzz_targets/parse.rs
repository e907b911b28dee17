#![no_main]

use brace::frontend::{lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // No input may panic any stage
    let Ok(tokens) = lexer::lex_with_comments(s) else {
        return;
    };
    if let Ok(program) = parser::parse(&tokens) {
        let _ = brace::lint(&program);
        let _ = brace::generate(&program);
        let formatted = brace::format::format(&program, &brace::FormatConfig::default());
        // Formatting must produce parseable text
        assert!(brace::parse_source_with_comments(&formatted).is_ok(), "formatted output does not parse");
    }
});
