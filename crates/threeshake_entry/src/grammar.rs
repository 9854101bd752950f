//! Line grammar for the library's aggregation modules.
//!
//! Each non-blank line (after comment stripping) is one of:
//!
//! ```text
//! statement  := "export" "{" [ specifier { "," specifier } [ "," ] ] "}" "from" string [ ";" ]
//!             | "export" "*" "from" string [ ";" ]
//!             | "import" string [ ";" ]
//! specifier  := ident [ "as" ident ]
//! ```
//!
//! Lines outside the grammar are kept verbatim as [`Statement::Other`].

use std::fmt;

use threeshake_core::strip_comments;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

impl ExportSpecifier {
    pub fn new(name: &str) -> Self {
        Self { local: name.to_string(), exported: name.to_string() }
    }
}

impl fmt::Display for ExportSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.local == self.exported {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{} as {}", self.local, self.exported)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `export { A, B as C } from './path.js';`
    Named { specifiers: Vec<ExportSpecifier>, source: String },
    /// `export * from './path.js';`
    Star { source: String },
    /// `import './path.js';`
    SideEffect { source: String },
    Other(String),
}

impl Statement {
    pub fn source(&self) -> Option<&str> {
        match self {
            Statement::Named { source, .. }
            | Statement::Star { source }
            | Statement::SideEffect { source } => Some(source),
            Statement::Other(_) => None,
        }
    }

    /// Names this statement makes available to importers. Empty for
    /// wildcard and side-effect statements.
    pub fn exported_names(&self) -> Vec<&str> {
        match self {
            Statement::Named { specifiers, .. } => {
                specifiers.iter().map(|s| s.exported.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub(crate) fn with_source(self, new_source: String) -> Self {
        match self {
            Statement::Named { specifiers, .. } => {
                Statement::Named { specifiers, source: new_source }
            }
            Statement::Star { .. } => Statement::Star { source: new_source },
            Statement::SideEffect { .. } => Statement::SideEffect { source: new_source },
            other => other,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Named { specifiers, source } => {
                let names =
                    specifiers.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
                write!(f, "export {{ {} }} from '{}';", names, source)
            }
            Statement::Star { source } => write!(f, "export * from '{}';", source),
            Statement::SideEffect { source } => write!(f, "import '{}';", source),
            Statement::Other(line) => write!(f, "{}", line),
        }
    }
}

/// Strips comments and parses every non-blank line of a module.
pub fn parse_statements(text: &str) -> Vec<Statement> {
    strip_comments(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_statement)
        .collect()
}

pub fn parse_statement(line: &str) -> Statement {
    let mut cursor = Cursor::new(line);
    let parsed = if cursor.keyword("export") {
        if cursor.punct('*') {
            cursor.from_clause().map(|source| Statement::Star { source })
        } else if cursor.punct('{') {
            cursor.specifier_list().and_then(|specifiers| {
                cursor.from_clause().map(|source| Statement::Named { specifiers, source })
            })
        } else {
            None
        }
    } else if cursor.keyword("import") {
        cursor.string().map(|source| Statement::SideEffect { source })
    } else {
        None
    };

    match parsed {
        Some(statement) if cursor.finish() => statement,
        _ => Statement::Other(line.trim().to_string()),
    }
}

struct Cursor<'s> {
    rest: &'s str,
}

impl<'s> Cursor<'s> {
    fn new(line: &'s str) -> Self {
        Self { rest: line }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn punct(&mut self, c: char) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn keyword(&mut self, word: &str) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(word) {
            Some(rest) if !rest.starts_with(is_ident_char) => {
                self.rest = rest;
                true
            }
            _ => false,
        }
    }

    fn ident(&mut self) -> Option<&'s str> {
        self.skip_ws();
        let end = self.rest.find(|c: char| !is_ident_char(c)).unwrap_or(self.rest.len());
        if end == 0 || self.rest.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(ident)
    }

    fn string(&mut self) -> Option<String> {
        self.skip_ws();
        let quote = self.rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
        let body = &self.rest[1..];
        let end = body.find(quote)?;
        self.rest = &body[end + 1..];
        Some(body[..end].trim().to_string())
    }

    fn specifier_list(&mut self) -> Option<Vec<ExportSpecifier>> {
        let mut specifiers = Vec::new();
        loop {
            if self.punct('}') {
                return Some(specifiers);
            }
            let local = self.ident()?;
            let exported = if self.keyword("as") { self.ident()? } else { local };
            specifiers.push(ExportSpecifier {
                local: local.to_string(),
                exported: exported.to_string(),
            });
            if !self.punct(',') {
                return self.punct('}').then_some(specifiers);
            }
        }
    }

    fn from_clause(&mut self) -> Option<String> {
        if self.keyword("from") { self.string() } else { None }
    }

    /// Optional trailing semicolon, then end of line.
    fn finish(&mut self) -> bool {
        self.punct(';');
        self.skip_ws();
        self.rest.is_empty()
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_export() {
        let stmt = parse_statement("export { SphereGeometry, SphereBufferGeometry } from './SphereGeometry.js';");
        assert_eq!(
            stmt,
            Statement::Named {
                specifiers: vec![
                    ExportSpecifier::new("SphereGeometry"),
                    ExportSpecifier::new("SphereBufferGeometry")
                ],
                source: "./SphereGeometry.js".to_string(),
            }
        );
        assert_eq!(stmt.exported_names(), vec!["SphereGeometry", "SphereBufferGeometry"]);
    }

    #[test]
    fn test_aliased_export() {
        let stmt = parse_statement("export { Math as _Math } from './math/Math.js';");
        assert_eq!(stmt.exported_names(), vec!["_Math"]);
        assert_eq!(stmt.to_string(), "export { Math as _Math } from './math/Math.js';");
    }

    #[test]
    fn test_star_export() {
        let stmt = parse_statement("export * from \"./constants.js\"");
        assert_eq!(stmt, Statement::Star { source: "./constants.js".to_string() });
        assert!(stmt.exported_names().is_empty());
    }

    #[test]
    fn test_side_effect_import() {
        let stmt = parse_statement("import './polyfills.js';");
        assert_eq!(stmt, Statement::SideEffect { source: "./polyfills.js".to_string() });
        assert_eq!(stmt.to_string(), "import './polyfills.js';");
    }

    #[test]
    fn test_trailing_comma_and_spacing() {
        let stmt = parse_statement("export {A,B,} from'./ab.js' ;");
        assert_eq!(stmt.exported_names(), vec!["A", "B"]);
        assert_eq!(stmt.source(), Some("./ab.js"));
    }

    #[test]
    fn test_empty_specifier_list() {
        let stmt = parse_statement("export { } from './nothing.js';");
        assert_eq!(stmt, Statement::Named { specifiers: vec![], source: "./nothing.js".to_string() });
    }

    #[test]
    fn test_unrecognised_lines_are_kept() {
        for line in [
            "export const REVISION = '88';",
            "export * as utils from './utils.js';",
            "import { Foo } from './foo.js';",
            "export { A } from './a.js'; export { B } from './b.js';",
            "exports.foo = 1;",
            "if ( typeof __THREE_DEVTOOLS__ !== 'undefined' ) {",
        ] {
            assert_eq!(parse_statement(line), Statement::Other(line.to_string()), "{}", line);
        }
    }

    #[test]
    fn test_display_round_trips_shape() {
        let stmt = parse_statement("export   {  Scene  }   from   './scenes/Scene.js'");
        assert_eq!(stmt.to_string(), "export { Scene } from './scenes/Scene.js';");
    }

    #[test]
    fn test_parse_statements_skips_comments_and_blanks() {
        let text = r#"
            /**
             * Library root
             */
            import './polyfills.js';

            // renderers
            export { WebGLRenderer } from './renderers/WebGLRenderer.js';
            export * from './geometries/Geometries.js'; // aggregated
        "#;
        let stmts = parse_statements(text);
        assert_eq!(stmts.len(), 3);
        assert!(matches!(stmts[0], Statement::SideEffect { .. }));
        assert!(matches!(stmts[1], Statement::Named { .. }));
        assert!(matches!(stmts[2], Statement::Star { .. }));
    }
}
