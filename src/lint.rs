//! Lint layer: resolver findings reworded as messages, plus structural rules.
//!
//! Diagnostics are ordered by rule group: undefined references, then unused bindings, then
//! duplicate declarations, then structural rules in source order.

use std::fmt;

use crate::frontend::ast::{self, DeclKind, Program, Span, VarDecl, Visitor};
use crate::frontend::resolver::{self, Resolution};

/// Identity of a lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintRule {
    Undefined,
    Unused,
    Redeclared,
    NoVar,
}

impl LintRule {
    pub const ALL: [LintRule; 4] = [LintRule::Undefined, LintRule::Unused, LintRule::Redeclared, LintRule::NoVar];

    pub fn as_str(self) -> &'static str {
        match self {
            LintRule::Undefined => "undefined",
            LintRule::Unused => "unused",
            LintRule::Redeclared => "redeclared",
            LintRule::NoVar => "no-var",
        }
    }

    pub fn from_name(name: &str) -> Option<LintRule> {
        LintRule::ALL.into_iter().find(|rule| rule.as_str() == name)
    }
}

impl fmt::Display for LintRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rules run. Every rule is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintConfig {
    pub undefined: bool,
    pub unused: bool,
    pub redeclared: bool,
    pub no_var: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            undefined: true,
            unused: true,
            redeclared: true,
            no_var: true,
        }
    }
}

impl LintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: LintRule, enabled: bool) -> Self {
        match rule {
            LintRule::Undefined => self.undefined = enabled,
            LintRule::Unused => self.unused = enabled,
            LintRule::Redeclared => self.redeclared = enabled,
            LintRule::NoVar => self.no_var = enabled,
        }
        self
    }

    /// Turn `rule` off.
    pub fn allow(self, rule: LintRule) -> Self {
        self.with_rule(rule, false)
    }

    pub fn is_enabled(&self, rule: LintRule) -> bool {
        match rule {
            LintRule::Undefined => self.undefined,
            LintRule::Unused => self.unused,
            LintRule::Redeclared => self.redeclared,
            LintRule::NoVar => self.no_var,
        }
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintDiagnostic {
    pub rule: LintRule,
    pub message: String,
    pub offset: usize,
}

impl LintDiagnostic {
    fn new(rule: LintRule, message: String, offset: usize) -> Self {
        Self { rule, message, offset }
    }
}

/// Lint `program` with every rule enabled.
pub fn lint(program: &Program) -> Vec<LintDiagnostic> {
    lint_with_config(program, &LintConfig::default())
}

#[tracing::instrument(skip_all, fields(statements = program.body.len()))]
pub fn lint_with_config(program: &Program, config: &LintConfig) -> Vec<LintDiagnostic> {
    let resolution = resolver::resolve(program);
    lint_resolved(program, &resolution, config)
}

/// Lint using an existing resolution of `program`.
pub fn lint_resolved(program: &Program, resolution: &Resolution, config: &LintConfig) -> Vec<LintDiagnostic> {
    let mut diagnostics = Vec::new();

    if config.undefined {
        diagnostics.extend(resolution.undefined.iter().map(|u| {
            LintDiagnostic::new(LintRule::Undefined, format!("Undefined variable: '{}'", u.name), u.offset)
        }));
    }

    if config.unused {
        diagnostics.extend(resolution.unused.iter().map(|u| {
            LintDiagnostic::new(LintRule::Unused, format!("Unused {}: '{}'", u.kind, u.name), u.offset)
        }));
    }

    if config.redeclared {
        diagnostics.extend(resolution.redeclarations.iter().map(|r| {
            LintDiagnostic::new(LintRule::Redeclared, format!("Duplicate declaration: '{}'", r.name), r.offset)
        }));
    }

    if config.no_var {
        let mut rule = NoVar::default();
        rule.visit_program(program);
        diagnostics.extend(rule.diagnostics);
    }

    tracing::debug!(count = diagnostics.len(), "lint finished");
    diagnostics
}

/// Flags every `var` declaration.
#[derive(Default)]
struct NoVar {
    diagnostics: Vec<LintDiagnostic>,
}

impl Visitor for NoVar {
    fn visit_var_decl(&mut self, decl: &VarDecl, span: Span) {
        if decl.kind == DeclKind::Var {
            self.diagnostics.push(LintDiagnostic::new(
                LintRule::NoVar,
                "'var' is not allowed, use 'let' or 'const' instead.".to_string(),
                span.start,
            ));
        }
        ast::walk_var_decl(self, decl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lint_str(source: &str) -> Vec<LintDiagnostic> {
        lint(&brace_syntax::parse_source(source).unwrap())
    }

    fn messages(diagnostics: &[LintDiagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn test_clean_program() {
        assert!(lint_str("const a = 1;\nconst b = a + 1;\nb;").is_empty());
    }

    #[test]
    fn test_messages_in_rule_order() {
        let diagnostics = lint_str("var a = 1;\nlet a = 2;\nfunction f(p) { return q; }");
        assert_eq!(
            messages(&diagnostics),
            vec![
                "Undefined variable: 'q'",
                "Unused parameter: 'p'",
                "Unused variable: 'a'",
                "Unused function: 'f'",
                "Duplicate declaration: 'a'",
                "'var' is not allowed, use 'let' or 'const' instead.",
            ]
        );
        assert_eq!(diagnostics[5].offset, 0);
        assert_eq!(diagnostics[4].offset, 15);
    }

    #[test]
    fn test_var_in_for_initializer() {
        let diagnostics = lint_str("for (var i = 0; i < 2; i++) { }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, LintRule::NoVar);
        assert_eq!(diagnostics[0].offset, 5);
    }

    #[test]
    fn test_config_disables_rules() {
        let program = brace_syntax::parse_source("var x = y;").unwrap();
        let config = LintConfig::new().allow(LintRule::NoVar).allow(LintRule::Unused);
        let diagnostics = lint_with_config(&program, &config);
        assert_eq!(messages(&diagnostics), vec!["Undefined variable: 'y'"]);
    }

    #[test]
    fn test_rule_names() {
        for rule in LintRule::ALL {
            assert_eq!(LintRule::from_name(rule.as_str()), Some(rule));
        }
        assert_eq!(LintRule::from_name("no-var"), Some(LintRule::NoVar));
        assert_eq!(LintRule::from_name("semicolons"), None);
        assert!(!LintConfig::new().allow(LintRule::Redeclared).is_enabled(LintRule::Redeclared));
    }
}
