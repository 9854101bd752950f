//! Module-import detection.
//!
//! Analysis runs in two passes over the oxc AST of one code unit:
//!
//! 1. [`ImportCollector`] records names consumed directly (`import { A }`,
//!    `const { A } = require(..)`, `require(..).A`) and builds a binding table
//!    of locals known to hold the library namespace (`import * as T`,
//!    `import T`, `const T = require(..)`).
//! 2. [`ReferenceSites`] records every non-computed member access whose object
//!    is one of those locals, and each bound local is resolved to the members
//!    accessed through it.
//!
//! Bindings are tracked by name only; a nested scope that shadows a bound
//! local is still treated as the library.

use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use oxc_parser::{Parser as OxcParser, ParserReturn};
use std::collections::HashSet;

use threeshake_core::{DependencySet, Error, Result};

use crate::options::DetectOptions;

/// How a local came to hold the library namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingKind {
    Namespace,
    Default,
    Require,
}

#[derive(Debug, Clone)]
struct Binding {
    local: String,
    kind: BindingKind,
}

/// Detects the library exports consumed by `code` through ES imports or
/// CommonJS `require` calls.
pub fn detect_deps(code: &str, opts: &DetectOptions) -> Result<DependencySet> {
    let file = opts.display_name();
    trace!("Parsing {} for '{}' imports", file, opts.module_name);

    let allocator = Allocator::default();
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(&allocator, code, opts.source_type()).parse();

    if panicked || !errors.is_empty() {
        let message = errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        debug!("Syntax error in {}: {}", file, message);
        return Err(Error::Syntax { file, message });
    }

    let mut collector = ImportCollector::new(&opts.module_name);
    collector.visit_program(&program);

    let mut deps = DependencySet::new();
    deps.extend(collector.imported);
    deps.extend(collector.required);

    if !collector.bindings.is_empty() {
        let locals: HashSet<&str> = collector.bindings.iter().map(|b| b.local.as_str()).collect();
        let mut sites = ReferenceSites { locals, sites: Vec::new() };
        sites.visit_program(&program);

        for binding in &collector.bindings {
            trace!("Resolving {:?} binding '{}'", binding.kind, binding.local);
            deps.extend(
                sites
                    .sites
                    .iter()
                    .filter(|(local, _)| *local == binding.local)
                    .map(|(_, member)| member.as_str()),
            );
        }
    }

    debug!("Found {} '{}' dependencies in {}", deps.len(), opts.module_name, file);
    Ok(deps)
}

/// Byte-buffer entry point; the buffer must hold UTF-8 source text.
pub fn detect_deps_bytes(code: &[u8], opts: &DetectOptions) -> Result<DependencySet> {
    let code = std::str::from_utf8(code).map_err(|e| {
        Error::InvalidInput(format!("{} is not UTF-8 text: {}", opts.display_name(), e))
    })?;
    detect_deps(code, opts)
}

struct ImportCollector<'m> {
    module_name: &'m str,
    imported: Vec<String>,
    required: Vec<String>,
    bindings: Vec<Binding>,
}

impl<'m> ImportCollector<'m> {
    fn new(module_name: &'m str) -> Self {
        Self { module_name, imported: Vec::new(), required: Vec::new(), bindings: Vec::new() }
    }

    fn bind(&mut self, local: &str, kind: BindingKind) {
        trace!("Recording {:?} binding '{}'", kind, local);
        self.bindings.push(Binding { local: local.to_string(), kind });
    }

    /// `require('<module>')`, possibly parenthesized.
    fn is_library_require(&self, expr: &Expression) -> bool {
        if let Expression::CallExpression(call) = expr.without_parentheses()
            && let Expression::Identifier(callee) = &call.callee
            && callee.name.as_str() == "require"
            && call.arguments.len() == 1
            && let Some(Expression::StringLiteral(arg)) = call.arguments[0].as_expression()
        {
            return arg.value.as_str() == self.module_name;
        }
        false
    }
}

impl<'a> Visit<'a> for ImportCollector<'_> {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        if it.source.value.as_str() == self.module_name && !it.import_kind.is_type() {
            for spec in it.specifiers.iter().flatten() {
                match spec {
                    ImportDeclarationSpecifier::ImportSpecifier(s) => {
                        if !s.import_kind.is_type() {
                            self.imported.push(s.imported.name().to_string());
                        }
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                        self.bind(s.local.name.as_str(), BindingKind::Default);
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                        self.bind(s.local.name.as_str(), BindingKind::Namespace);
                    }
                }
            }
        }
        walk::walk_import_declaration(self, it);
    }

    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        if let Some(init) = &it.init
            && self.is_library_require(init)
        {
            match &it.id.kind {
                BindingPatternKind::ObjectPattern(pattern) => {
                    for prop in &pattern.properties {
                        if let Some(name) = prop.key.static_name() {
                            self.required.push(name.to_string());
                        }
                    }
                }
                BindingPatternKind::BindingIdentifier(ident) => {
                    self.bind(ident.name.as_str(), BindingKind::Require);
                }
                _ => {}
            }
        }
        walk::walk_variable_declarator(self, it);
    }

    fn visit_static_member_expression(&mut self, it: &StaticMemberExpression<'a>) {
        if self.is_library_require(&it.object) {
            self.required.push(it.property.name.to_string());
        }
        walk::walk_static_member_expression(self, it);
    }
}

/// Non-computed member accesses on bound locals, in source order.
struct ReferenceSites<'b> {
    locals: HashSet<&'b str>,
    sites: Vec<(String, String)>,
}

impl<'a> Visit<'a> for ReferenceSites<'_> {
    fn visit_static_member_expression(&mut self, it: &StaticMemberExpression<'a>) {
        if let Expression::Identifier(ident) = &it.object
            && self.locals.contains(ident.name.as_str())
        {
            self.sites.push((ident.name.to_string(), it.property.name.to_string()));
        }
        walk::walk_static_member_expression(self, it);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(code: &str) -> Vec<String> {
        detect_deps(code, &DetectOptions::default()).unwrap().into_vec()
    }

    #[test]
    fn test_named_imports_in_declaration_order() {
        let deps = detect("import { A, B, C } from 'three';");
        assert_eq!(deps, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_aliased_import_reports_imported_name() {
        let deps = detect("import { Scene as S, Mesh } from 'three';\nnew S();");
        assert_eq!(deps, vec!["Scene", "Mesh"]);
    }

    #[test]
    fn test_other_modules_ignored() {
        let deps = detect("import { Scene } from 'three-extras';\nimport { Mesh } from 'three';");
        assert_eq!(deps, vec!["Mesh"]);
    }

    #[test]
    fn test_namespace_import_resolves_members() {
        let code = r#"
            import * as THREE from 'three';
            import { LinearFilter } from 'three';
            const scene = new THREE.Scene();
            scene.add(new THREE.Object3D());
            const r = new THREE.WebGLRenderer();
            r.filter = LinearFilter;
        "#;
        assert_eq!(detect(code), vec!["LinearFilter", "Scene", "Object3D", "WebGLRenderer"]);
    }

    #[test]
    fn test_default_import_resolves_members() {
        let deps = detect("import T from 'three';\nconst v = new T.Vector3();");
        assert_eq!(deps, vec!["Vector3"]);
    }

    #[test]
    fn test_destructured_require() {
        let deps = detect("const { A, B } = require('three');\nconst other = require('lodash');");
        assert_eq!(deps, vec!["A", "B"]);
    }

    #[test]
    fn test_destructured_require_with_rename() {
        let deps = detect("const { Scene: S, Mesh } = require('three');");
        assert_eq!(deps, vec!["Scene", "Mesh"]);
    }

    #[test]
    fn test_bound_require_resolves_members() {
        let code = r#"
            var T = require('three');
            var renderer = new T.WebGLRenderer();
            var geo = new T.SphereGeometry(1, 32, 32);
            var again = new T.WebGLRenderer();
        "#;
        assert_eq!(detect(code), vec!["WebGLRenderer", "SphereGeometry"]);
    }

    #[test]
    fn test_require_member_access() {
        let deps = detect("const filter = require('three').LinearFilter;");
        assert_eq!(deps, vec!["LinearFilter"]);
    }

    #[test]
    fn test_parenthesized_require_member_access() {
        let deps = detect("const filter = (require('three')).NearestFilter;");
        assert_eq!(deps, vec!["NearestFilter"]);
    }

    #[test]
    fn test_computed_access_ignored() {
        let code = "const T = require('three');\nconst k = 'Scene';\nnew T[k]();\nnew T.Mesh();";
        assert_eq!(detect(code), vec!["Mesh"]);
    }

    #[test]
    fn test_imports_before_requires_before_references() {
        let code = r#"
            const T = require('three');
            const f = T.RGBFormat;
            const { Color } = require('three');
            import { Scene } from 'three';
        "#;
        assert_eq!(detect(code), vec!["Scene", "Color", "RGBFormat"]);
    }

    #[test]
    fn test_es5_commonjs_module() {
        let code = r#"
            var THREE = require('three');
            var filter = require('three').LinearFilter;
            var { RGBAFormat, NearestFilter } = require('three');

            module.exports = function () {
                var renderer = new THREE.WebGLRenderer();
                var format = THREE.RGBFormat;
                var mesh = new THREE.SphereGeometry();
                mesh.filter = filter;
            };
        "#;
        assert_eq!(
            detect(code),
            vec![
                "LinearFilter",
                "RGBAFormat",
                "NearestFilter",
                "WebGLRenderer",
                "RGBFormat",
                "SphereGeometry"
            ]
        );
    }

    #[test]
    fn test_require_with_extra_arguments_ignored() {
        let deps = detect("const { A } = require('three', 'extra');");
        assert!(deps.is_empty());
    }

    #[test]
    fn test_type_only_imports_skipped() {
        let opts = DetectOptions::default().with_filename("scene.ts");
        let deps = detect_deps(
            "import type { Camera } from 'three';\nimport { type Light, Scene } from 'three';",
            &opts,
        )
        .unwrap();
        assert_eq!(deps.as_slice(), ["Scene"]);
    }

    #[test]
    fn test_custom_module_name() {
        let opts = DetectOptions { module_name: "three/src/Three".to_string(), ..Default::default() };
        let deps =
            detect_deps("import { Scene } from 'three/src/Three';\nimport { Mesh } from 'three';", &opts)
                .unwrap();
        assert_eq!(deps.as_slice(), ["Scene"]);
    }

    #[test]
    fn test_jsx_file() {
        let opts = DetectOptions::default().with_filename("View.jsx");
        let deps = detect_deps(
            "import * as THREE from 'three';\nconst el = <div color={new THREE.Color()} />;",
            &opts,
        )
        .unwrap();
        assert_eq!(deps.as_slice(), ["Color"]);
    }

    #[test]
    fn test_idempotent() {
        let code = "import * as T from 'three';\nnew T.B(); new T.A(); import { C } from 'three';";
        let first = detect(code);
        let second = detect(code);
        assert_eq!(first, second);
        assert_eq!(first, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_shadowed_binding_still_counts() {
        // Name-only tracking: a parameter shadowing the namespace is not told apart
        let code = "import * as T from 'three';\nnew T.Scene();\nfunction f(T) { return T.NotLib; }";
        assert_eq!(detect(code), vec!["Scene", "NotLib"]);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let result = detect_deps("import { from 'three'", &DetectOptions::default());
        assert!(matches!(result, Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_no_library_usage() {
        assert!(detect("const x = 42;").is_empty());
    }

    #[test]
    fn test_bytes_input() {
        let deps =
            detect_deps_bytes(b"import { Scene } from 'three';", &DetectOptions::default()).unwrap();
        assert_eq!(deps.as_slice(), ["Scene"]);
    }

    #[test]
    fn test_non_utf8_bytes_rejected() {
        let result = detect_deps_bytes(&[0x66, 0x6f, 0xff, 0xfe], &DetectOptions::default());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
