//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde_json::json;

use crate::codegen;
use crate::format::{FormatConfig, format_diff, format_source_with_config};
use crate::frontend::ast::Program;
use crate::frontend::diagnostics::{self, line_col};
use crate::frontend::resolver::{self, Resolution};
use crate::frontend::{lexer, parser};
use crate::lint::{self, LintConfig};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (10 MB).
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a source file.
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn report<E>(file_path: &str, source: &str, error: E) -> CliError
where
    E: Diagnostic + Send + Sync + 'static,
{
    CliError::failure(diagnostics::render(file_path, source, error).trim_end())
}

fn parse_program(file_path: &str, source: &str) -> CliResult<Program> {
    brace_syntax::parse_source(source).map_err(|e| report(file_path, source, e))
}

/// Lex and display tokens, comments included.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex_with_comments(&source).map_err(|e| report(file_path, &source, e))?;

    for tok in &tokens {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display AST.
pub fn parse_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|e| report(file_path, &source, e))?;
    let ast = parser::parse(&tokens).map_err(|e| report(file_path, &source, e))?;
    println!("{:#?}", ast);
    Ok(ExitCode::SUCCESS)
}

/// Resolve names and dump scopes, symbols and findings.
pub fn resolve_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let program = parse_program(file_path, &source)?;
    let resolution = resolver::resolve(&program);
    print!("{}", resolution_dump(&source, &resolution));
    Ok(ExitCode::SUCCESS)
}

fn resolution_dump(source: &str, resolution: &Resolution) -> String {
    let position = |offset: usize| {
        let (line, col) = line_col(source, offset);
        format!("{}:{}", line, col)
    };

    let mut out = String::from("scopes:\n");
    for scope in &resolution.scopes {
        match scope.parent {
            Some(parent) => out.push_str(&format!("  {} (in {})\n", scope.id, parent)),
            None => out.push_str(&format!("  {}\n", scope.id)),
        }
    }

    out.push_str("symbols:\n");
    for symbol in &resolution.symbols {
        out.push_str(&format!(
            "  {} {} in {} at {}, {} reference(s)\n",
            symbol.kind,
            symbol.name,
            symbol.scope,
            position(symbol.declared_at),
            symbol.reference_count
        ));
    }

    for undefined in &resolution.undefined {
        out.push_str(&format!("undefined {} at {}\n", undefined.name, position(undefined.offset)));
    }
    for unused in &resolution.unused {
        out.push_str(&format!(
            "unused {} {} in {} at {}\n",
            unused.kind,
            unused.name,
            unused.scope,
            position(unused.offset)
        ));
    }
    for redeclared in &resolution.redeclarations {
        out.push_str(&format!(
            "redeclared {} in {} at {} (first at {})\n",
            redeclared.name,
            redeclared.scope,
            position(redeclared.offset),
            position(redeclared.first_offset)
        ));
    }
    out
}

/// Lint a file. Any finding makes the command fail.
pub fn lint_file(file_path: &str, config: &LintConfig, json_output: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let program = parse_program(file_path, &source)?;
    let findings = lint::lint_with_config(&program, config);

    if json_output {
        let entries: Vec<serde_json::Value> = findings
            .iter()
            .map(|d| {
                let (line, column) = line_col(&source, d.offset);
                json!({
                    "rule": d.rule.as_str(),
                    "message": d.message,
                    "offset": d.offset,
                    "line": line,
                    "column": column,
                })
            })
            .collect();
        let text = serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::failure(format!("Error encoding diagnostics: {}", e)))?;
        println!("{}", text);
    } else {
        for d in &findings {
            println!("{}", diagnostics::format_location(file_path, &source, d.offset, &d.message));
        }
    }

    if findings.is_empty() {
        if !json_output {
            println!("✓ No problems found");
        }
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Print fixed-style generated source.
pub fn gen_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let program = parse_program(file_path, &source)?;
    let code = codegen::generate(&program).map_err(|e| CliError::failure(format!("{}: {}", file_path, e)))?;
    println!("{}", code);
    Ok(ExitCode::SUCCESS)
}

/// Format brace source files.
pub fn format_files(path: &str, check_mode: bool, diff_mode: bool, config: &FormatConfig) -> CliResult<ExitCode> {
    let path = Path::new(path);
    let files = collect_js_files(path);

    if files.is_empty() {
        return Err(CliError::failure("No .js files found"));
    }

    let mut needs_formatting = false;
    let mut formatted_count = 0;
    let mut error_count = 0;

    for file_path in &files {
        let source = match fs::read_to_string(file_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(file = %file_path.display(), error = %e, "skipping unreadable file");
                error_count += 1;
                continue;
            }
        };

        match format_source_with_config(&source, config) {
            Ok(formatted) => {
                let changed = source != formatted;

                if diff_mode && changed {
                    println!("--- {}", file_path.display());
                    if let Ok(Some(diff)) = format_diff(&source, config) {
                        print!("{}", diff);
                    }
                    println!();
                }

                if check_mode {
                    if changed {
                        println!("Would reformat: {}", file_path.display());
                        needs_formatting = true;
                    }
                } else if diff_mode {
                    if changed {
                        needs_formatting = true;
                    }
                } else if changed {
                    if let Err(e) = fs::write(file_path, &formatted) {
                        eprintln!("Error writing {}: {}", file_path.display(), e);
                        error_count += 1;
                    } else {
                        println!("Formatted: {}", file_path.display());
                        formatted_count += 1;
                    }
                }
            }
            Err(e) => {
                let name = file_path.display().to_string();
                eprintln!("{}", diagnostics::render(&name, &source, e));
                error_count += 1;
            }
        }
    }

    if check_mode || diff_mode {
        if needs_formatting {
            let msg = if diff_mode {
                "need formatting"
            } else {
                "would be reformatted"
            };
            return Err(CliError::failure(format!("\n{} file(s) {}", files.len(), msg)));
        } else {
            println!("✓ {} file(s) already formatted", files.len());
        }
    } else {
        println!("\n✓ {} file(s) formatted, {} error(s)", formatted_count, error_count);
    }

    if error_count > 0 {
        return Err(CliError::new("", ExitCode::FAILURE));
    }

    Ok(ExitCode::SUCCESS)
}

/// Collect `.js` files under `path`, skipping hidden directories, `target` and `node_modules`.
pub fn collect_js_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        if is_js(path) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        match fs::read_dir(path) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let entry_path = entry.path();
                    if entry_path.is_dir() {
                        let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                        if !name.starts_with('.') && name != "target" && name != "node_modules" {
                            files.extend(collect_js_files(&entry_path));
                        } else {
                            tracing::debug!(dir = %entry_path.display(), "skipping directory");
                        }
                    } else if is_js(&entry_path) {
                        files.push(entry_path);
                    }
                }
            }
            Err(e) => tracing::warn!(dir = %path.display(), error = %e, "cannot read directory"),
        }
    }

    files.sort();
    files
}

fn is_js(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "js")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("brace_cli_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_collect_js_files_skips_hidden_and_vendor_dirs() {
        let dir = scratch_dir("collect");
        for sub in ["src", ".git", "node_modules", "target"] {
            fs::create_dir_all(dir.join(sub)).unwrap();
            fs::write(dir.join(sub).join("a.js"), "let a;").unwrap();
        }
        fs::write(dir.join("main.js"), "let b;").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        let files = collect_js_files(&dir);
        assert_eq!(files, vec![dir.join("main.js"), dir.join("src").join("a.js")]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_format_files_check_and_write() {
        let dir = scratch_dir("fmt");
        let file = dir.join("main.js");
        fs::write(&file, "let a=1").unwrap();
        let config = FormatConfig::default();
        let dir_str = dir.to_string_lossy().to_string();

        assert!(format_files(&dir_str, true, false, &config).is_err());
        assert_eq!(format_files(&dir_str, false, false, &config).unwrap(), ExitCode::SUCCESS);
        assert_eq!(fs::read_to_string(&file).unwrap(), "let a = 1;\n");
        assert_eq!(format_files(&dir_str, true, false, &config).unwrap(), ExitCode::SUCCESS);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_lint_file_exit_codes() {
        let dir = scratch_dir("lint");
        let clean = dir.join("clean.js");
        let dirty = dir.join("dirty.js");
        fs::write(&clean, "const a = 1;\na;\n").unwrap();
        fs::write(&dirty, "var a = b;\n").unwrap();
        let config = LintConfig::default();

        assert_eq!(lint_file(&clean.to_string_lossy(), &config, false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(lint_file(&dirty.to_string_lossy(), &config, true).unwrap(), ExitCode::FAILURE);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_syntax_error_is_cli_error() {
        let dir = scratch_dir("syntax");
        let file = dir.join("bad.js");
        fs::write(&file, "function f(a b) {}").unwrap();
        let err = lint_file(&file.to_string_lossy(), &LintConfig::default(), false).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("expected ')'"), "got: {}", err.message);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_resolution_dump() {
        let source = "function f(x) { return y; }";
        let program = brace_syntax::parse_source(source).unwrap();
        let dump = resolution_dump(source, &resolver::resolve(&program));
        assert_eq!(
            dump,
            "scopes:\n  global\n  function_1 (in global)\n\
             symbols:\n  function f in global at 1:10, 0 reference(s)\n  parameter x in function_1 at 1:12, 0 reference(s)\n\
             undefined y at 1:24\n\
             unused parameter x in function_1 at 1:12\n\
             unused function f in global at 1:10\n"
        );
    }
}
