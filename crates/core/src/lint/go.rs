//! Go style linter using Tree-sitter
//!
//! Implements a subset of golint's checks with golint's wording and
//! confidence scores:
//! - package comments (presence, form, detachment)
//! - doc comments on exported functions, methods, and types
//! - naming (underscores, ALL_CAPS, leading `k`, initialisms)
//! - receiver names
//! - error strings passed to `errors.New` / `fmt.Errorf`
//! - `x += 1` instead of `x++`
//! - `else` after a block that ends in `return`
//! - `error` not being the last result

use super::naming::{is_exported, name_problems};
use super::{LintError, Position, Problem, StyleLinter};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Methods whose doc comments are implied by the interface they satisfy
const COMMON_METHODS: &[&str] = &["Error", "Read", "ServeHTTP", "String", "Write", "Unwrap"];

/// Go style linter
pub struct GoLinter {
    language: tree_sitter::Language,
}

impl Default for GoLinter {
    fn default() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl GoLinter {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_parser(&self) -> Result<Parser, LintError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| LintError::TreeSitter(e.to_string()))?;
        Ok(parser)
    }

    fn parse_tree(
        &self,
        parser: &mut Parser,
        path: &Path,
        source: &[u8],
    ) -> Result<Tree, LintError> {
        let tree = parser.parse(source, None).ok_or_else(|| LintError::Parse {
            file: path.to_path_buf(),
            line: 1,
            column: 1,
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let at = first_error(root).unwrap_or(root).start_position();
            return Err(LintError::Parse {
                file: path.to_path_buf(),
                line: at.row + 1,
                column: at.column + 1,
            });
        }
        Ok(tree)
    }
}

impl StyleLinter for GoLinter {
    fn lint_files(&self, files: &BTreeMap<PathBuf, Vec<u8>>) -> Result<Vec<Problem>, LintError> {
        let mut parser = self.create_parser()?;
        let mut parsed = Vec::with_capacity(files.len());
        let mut package: Option<String> = None;

        for (path, source) in files {
            let tree = self.parse_tree(&mut parser, path, source)?;
            let name = package_name(tree.root_node(), source).ok_or_else(|| LintError::Parse {
                file: path.clone(),
                line: 1,
                column: 1,
            })?;

            if let Some(expected) = &package {
                if *expected != name {
                    return Err(LintError::MultiplePackages {
                        file: path.clone(),
                        found: name,
                        expected: expected.clone(),
                    });
                }
            } else {
                package = Some(name.clone());
            }
            parsed.push((path, source, tree, name));
        }

        let mut problems = Vec::new();
        for (path, source, tree, name) in &parsed {
            let mut file = FileLint::new(path, source, name);
            file.lint(tree.root_node());
            problems.extend(file.problems);
        }

        problems.sort_by(|a, b| a.position.cmp(&b.position));
        Ok(problems)
    }
}

/// Lint state for one file
struct FileLint<'a> {
    path: &'a Path,
    source: &'a [u8],
    package: &'a str,
    is_test: bool,
    problems: Vec<Problem>,
}

impl<'a> FileLint<'a> {
    fn new(path: &'a Path, source: &'a [u8], package: &'a str) -> Self {
        let is_test = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with("_test.go"));
        Self {
            path,
            source,
            package,
            is_test,
            problems: Vec::new(),
        }
    }

    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn report(&mut self, node: Node, confidence: f64, text: impl Into<String>) {
        let at = node.start_position();
        self.problems.push(Problem {
            position: Position {
                filename: self.path.to_path_buf(),
                line: at.row + 1,
                column: at.column + 1,
            },
            confidence,
            text: text.into(),
        });
    }

    fn lint(&mut self, root: Node) {
        self.lint_package_comment(root);
        self.lint_declarations(root);

        let mut receivers: HashMap<String, String> = HashMap::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match node.kind() {
                "method_declaration" => self.lint_receiver_name(node, &mut receivers),
                "call_expression" => self.lint_error_string(node),
                "assignment_statement" => self.lint_inc_dec(node),
                "if_statement" => self.lint_else(node),
                _ => {}
            }
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    // ── Package comment ──────────────────────────────────────────

    fn lint_package_comment(&mut self, root: Node) {
        if self.is_test {
            return;
        }
        let Some(clause) = child_of_kind(root, "package_clause") else {
            return;
        };

        match doc_comment(clause, self.source) {
            Some(doc) => {
                let prefix = format!("Package {} ", self.package);
                if self.package != "main" && !doc.text.starts_with(&prefix) {
                    self.report(
                        doc.node,
                        1.0,
                        format!("package comment should be of the form \"{}...\"", prefix),
                    );
                }
            }
            None => {
                if let Some(detached) = detached_comment(clause) {
                    self.report(
                        detached,
                        0.9,
                        "package comment is detached; there should be no blank lines between it and the package statement",
                    );
                    return;
                }
                self.report(
                    clause,
                    0.2,
                    "should have a package comment, unless it's in another file for this package",
                );
            }
        }
    }

    // ── Top-level declarations ───────────────────────────────────

    fn lint_declarations(&mut self, root: Node) {
        let mut cursor = root.walk();
        let decls: Vec<Node> = root.named_children(&mut cursor).collect();
        for decl in decls {
            match decl.kind() {
                "function_declaration" => {
                    self.lint_func_doc(decl, None);
                    self.lint_func_name(decl, "func");
                    self.lint_error_return(decl);
                }
                "method_declaration" => {
                    let receiver = receiver_type(decl, self.source);
                    self.lint_func_doc(decl, receiver.as_deref());
                    self.lint_func_name(decl, "method");
                    self.lint_error_return(decl);
                }
                "type_declaration" => self.lint_type_declaration(decl),
                "const_declaration" => self.lint_value_names(decl, "const"),
                "var_declaration" => self.lint_value_names(decl, "var"),
                _ => {}
            }
        }
    }

    fn lint_func_doc(&mut self, decl: Node, receiver: Option<&str>) {
        if self.is_test {
            return;
        }
        let Some(name_node) = decl.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node);
        if !is_exported(name) {
            return;
        }

        let (kind, display) = match receiver {
            Some(recv) => {
                if !is_exported(recv) || COMMON_METHODS.contains(&name) {
                    return;
                }
                ("method", format!("{}.{}", recv, name))
            }
            None => ("function", name.to_string()),
        };

        match doc_comment(decl, self.source) {
            None => self.report(
                decl,
                1.0,
                format!(
                    "exported {} {} should have comment or be unexported",
                    kind, display
                ),
            ),
            Some(doc) => {
                let prefix = format!("{} ", name);
                if !doc.text.starts_with(&prefix) {
                    self.report(
                        doc.node,
                        1.0,
                        format!(
                            "comment on exported {} {} should be of the form \"{}...\"",
                            kind, display, prefix
                        ),
                    );
                }
            }
        }
    }

    fn lint_func_name(&mut self, decl: Node, thing: &str) {
        let Some(name_node) = decl.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node);
        if self.is_test
            && ["Example", "Test", "Benchmark"]
                .iter()
                .any(|p| name.starts_with(p))
        {
            return;
        }
        self.lint_name(name_node, thing);
    }

    fn lint_name(&mut self, ident: Node, thing: &str) {
        let name = self.text(ident);
        for (confidence, message) in name_problems(name, thing) {
            self.report(ident, confidence, message);
        }
    }

    fn lint_type_declaration(&mut self, decl: Node) {
        let grouped = has_child_of_kind(decl, "(");
        let mut cursor = decl.walk();
        let specs: Vec<Node> = decl
            .named_children(&mut cursor)
            .filter(|n| matches!(n.kind(), "type_spec" | "type_alias"))
            .collect();

        for spec in specs {
            let Some(name_node) = spec.child_by_field_name("name") else {
                continue;
            };
            self.lint_name(name_node, "type");

            if self.is_test {
                continue;
            }
            let name = self.text(name_node);
            if !is_exported(name) {
                continue;
            }
            let doc = if grouped {
                doc_comment(spec, self.source)
            } else {
                doc_comment(decl, self.source)
            };
            match doc {
                None => self.report(
                    spec,
                    1.0,
                    format!("exported type {} should have comment or be unexported", name),
                ),
                Some(doc) => {
                    let text = ["A ", "An ", "The "]
                        .iter()
                        .find_map(|article| doc.text.strip_prefix(article))
                        .unwrap_or(doc.text.as_str());
                    if !text.starts_with(&format!("{} ", name)) {
                        self.report(
                            doc.node,
                            1.0,
                            format!(
                                "comment on exported type {} should be of the form \"{} ...\" (with optional leading article)",
                                name, name
                            ),
                        );
                    }
                }
            }
        }
    }

    fn lint_value_names(&mut self, decl: Node, thing: &str) {
        let mut specs = Vec::new();
        let mut cursor = decl.walk();
        for child in decl.named_children(&mut cursor) {
            match child.kind() {
                "const_spec" | "var_spec" => specs.push(child),
                "var_spec_list" => {
                    let mut list_cursor = child.walk();
                    specs.extend(
                        child
                            .named_children(&mut list_cursor)
                            .filter(|n| n.kind() == "var_spec"),
                    );
                }
                _ => {}
            }
        }

        for spec in specs {
            let mut name_cursor = spec.walk();
            let names: Vec<Node> = spec
                .children_by_field_name("name", &mut name_cursor)
                .collect();
            for ident in names {
                self.lint_name(ident, thing);
            }
        }
    }

    fn lint_error_return(&mut self, decl: Node) {
        let Some(result) = decl.child_by_field_name("result") else {
            return;
        };
        if result.kind() != "parameter_list" {
            return;
        }

        let mut cursor = result.walk();
        let types: Vec<&str> = result
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "parameter_declaration")
            .filter_map(|n| n.child_by_field_name("type"))
            .map(|t| self.text(t))
            .collect();

        if types.len() <= 1 || types.last() == Some(&"error") {
            return;
        }
        if types[..types.len() - 1].contains(&"error") {
            self.report(
                decl,
                0.9,
                "error should be the last type when returning multiple items",
            );
        }
    }

    // ── Whole-tree checks ────────────────────────────────────────

    fn lint_receiver_name(&mut self, decl: Node, receivers: &mut HashMap<String, String>) {
        let Some(list) = decl.child_by_field_name("receiver") else {
            return;
        };
        let mut cursor = list.walk();
        let Some(param) = list
            .named_children(&mut cursor)
            .find(|n| n.kind() == "parameter_declaration")
        else {
            return;
        };
        let Some(ident) = param.child_by_field_name("name") else {
            return;
        };

        let name = self.text(ident);
        if name == "_" {
            self.report(
                ident,
                1.0,
                "receiver name should not be an underscore, omit the name if it is unused",
            );
            return;
        }
        if name == "this" || name == "self" {
            self.report(
                ident,
                1.0,
                "receiver name should be a reflection of its identity; don't use generic names such as \"this\" or \"self\"",
            );
            return;
        }

        let Some(recv) = receiver_type(decl, self.source) else {
            return;
        };
        match receivers.get(&recv) {
            Some(previous) if previous != name => {
                let message = format!(
                    "receiver name {} should be consistent with previous receiver name {} for {}",
                    name, previous, recv
                );
                self.report(ident, 1.0, message);
            }
            Some(_) => {}
            None => {
                receivers.insert(recv, name.to_string());
            }
        }
    }

    fn lint_error_string(&mut self, call: Node) {
        let Some(function) = call.child_by_field_name("function") else {
            return;
        };
        if function.kind() != "selector_expression" {
            return;
        }
        let (Some(operand), Some(field)) = (
            function.child_by_field_name("operand"),
            function.child_by_field_name("field"),
        ) else {
            return;
        };
        let target = (self.text(operand), self.text(field));
        if target != ("errors", "New") && target != ("fmt", "Errorf") {
            return;
        }

        let Some(args) = call.child_by_field_name("arguments") else {
            return;
        };
        let mut cursor = args.walk();
        let Some(first) = args.named_children(&mut cursor).next() else {
            return;
        };
        let Some(literal) = string_literal(first.kind(), self.text(first)) else {
            return;
        };

        if let Some(confidence) = error_string_confidence(&literal) {
            self.report(
                first,
                confidence,
                "error strings should not be capitalized or end with punctuation or a newline",
            );
        }
    }

    fn lint_inc_dec(&mut self, stmt: Node) {
        let suffix = {
            let mut cursor = stmt.walk();
            let found = stmt.children(&mut cursor).find_map(|c| match c.kind() {
                "+=" => Some(("+=", "++")),
                "-=" => Some(("-=", "--")),
                _ => None,
            });
            match found {
                Some(found) => found,
                None => return,
            }
        };

        let (Some(left), Some(right)) = (
            stmt.child_by_field_name("left"),
            stmt.child_by_field_name("right"),
        ) else {
            return;
        };
        if left.named_child_count() != 1 || right.named_child_count() != 1 {
            return;
        }
        let (Some(target), Some(value)) = (left.named_child(0), right.named_child(0)) else {
            return;
        };
        if value.kind() != "int_literal" || self.text(value) != "1" {
            return;
        }

        let (operator, replacement) = suffix;
        let target = self.text(target);
        self.report(
            stmt,
            0.8,
            format!(
                "should replace {} {} 1 with {}{}",
                target, operator, target, replacement
            ),
        );
    }

    fn lint_else(&mut self, stmt: Node) {
        let Some(alternative) = stmt.child_by_field_name("alternative") else {
            return;
        };
        if alternative.kind() != "block" {
            return;
        }
        // members of an else-if chain are left alone
        if let Some(parent) = stmt.parent() {
            if parent.kind() == "if_statement"
                && parent
                    .child_by_field_name("alternative")
                    .is_some_and(|alt| alt.id() == stmt.id())
            {
                return;
            }
        }

        let Some(body) = stmt.child_by_field_name("consequence") else {
            return;
        };
        let Some(last) = last_statement(body) else {
            return;
        };
        if last.kind() != "return_statement" {
            return;
        }

        let short_decl = stmt
            .child_by_field_name("initializer")
            .is_some_and(|init| init.kind() == "short_var_declaration");
        let extra = if short_decl {
            " (move short variable declaration to its own line if necessary)"
        } else {
            ""
        };
        self.report(
            alternative,
            1.0,
            format!(
                "if block ends with a return statement, so drop this else and outdent its block{}",
                extra
            ),
        );
    }
}

// ── Tree helpers ─────────────────────────────────────────────────

/// A doc comment group directly above a declaration
struct DocComment<'tree> {
    /// First comment of the group; problems about the comment point here
    node: Node<'tree>,
    text: String,
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error)
}

fn child_of_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn has_child_of_kind(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

fn package_name(root: Node, source: &[u8]) -> Option<String> {
    let clause = child_of_kind(root, "package_clause")?;
    let ident = child_of_kind(clause, "package_identifier")?;
    ident.utf8_text(source).ok().map(str::to_string)
}

/// Collect the comments immediately above `node` with no blank line between.
fn doc_comment<'tree>(node: Node<'tree>, source: &[u8]) -> Option<DocComment<'tree>> {
    let mut group = Vec::new();
    let mut next_row = node.start_position().row;
    let mut current = node.prev_sibling();

    while let Some(prev) = current {
        if prev.kind() != "comment" || prev.end_position().row + 1 != next_row {
            break;
        }
        group.push(prev);
        next_row = prev.start_position().row;
        current = prev.prev_sibling();
    }

    let first = *group.last()?;
    // a trailing comment on the previous statement is not documentation
    if first
        .prev_sibling()
        .is_some_and(|p| p.end_position().row == first.start_position().row)
    {
        return None;
    }

    let text = group
        .iter()
        .rev()
        .map(|c| comment_text(c.utf8_text(source).unwrap_or("")))
        .collect::<Vec<_>>()
        .join("\n");
    Some(DocComment { node: first, text })
}

/// A comment separated from `node` by exactly one blank line, if any
fn detached_comment<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    let prev = node.prev_sibling()?;
    if prev.kind() == "comment" && prev.end_position().row + 2 == node.start_position().row {
        Some(prev)
    } else {
        None
    }
}

/// Strip comment markers the way `go/ast` does for doc text.
fn comment_text(raw: &str) -> String {
    if let Some(line) = raw.strip_prefix("//") {
        return line.strip_prefix(' ').unwrap_or(line).to_string();
    }
    raw.strip_prefix("/*")
        .and_then(|r| r.strip_suffix("*/"))
        .unwrap_or(raw)
        .trim()
        .to_string()
}

/// Receiver base type name: `func (s *Server[T]) ...` -> `Server`
fn receiver_type(decl: Node, source: &[u8]) -> Option<String> {
    let list = decl.child_by_field_name("receiver")?;
    let mut cursor = list.walk();
    let param = list
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration")?;
    let ty = param.child_by_field_name("type")?.utf8_text(source).ok()?;
    let base = ty.trim_start_matches('*').trim();
    let base = base.split('[').next().unwrap_or(base).trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

/// Last statement of a block, skipping comments
fn last_statement(block: Node) -> Option<Node> {
    let mut cursor = block.walk();
    let children: Vec<Node> = block
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    let last = *children.last()?;
    if last.kind() == "statement_list" {
        return last_statement(last);
    }
    Some(last)
}

/// Contents of a Go string literal, with a trailing `\n` escape decoded
fn string_literal(kind: &str, raw: &str) -> Option<String> {
    match kind {
        "raw_string_literal" => raw
            .strip_prefix('`')
            .and_then(|r| r.strip_suffix('`'))
            .map(str::to_string),
        "interpreted_string_literal" => {
            let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
            match inner.strip_suffix("\\n") {
                Some(head) => Some(format!("{}\n", head)),
                None => Some(inner.to_string()),
            }
        }
        _ => None,
    }
}

/// Confidence that an error string breaks the conventions, `None` when clean.
fn error_string_confidence(s: &str) -> Option<f64> {
    const BASIC_CONFIDENCE: f64 = 0.8;
    const CAP_CONFIDENCE: f64 = BASIC_CONFIDENCE - 0.2;

    let mut chars = s.chars();
    let first = chars.next()?;
    let last = s.chars().next_back().unwrap_or(first);
    if matches!(last, '.' | ':' | '!' | '\n') {
        return Some(BASIC_CONFIDENCE);
    }
    if first.is_uppercase() {
        // proper nouns and initialisms are common, hence the lower confidence
        match chars.next() {
            None => return Some(CAP_CONFIDENCE),
            Some(second) if !second.is_uppercase() => return Some(CAP_CONFIDENCE),
            Some(_) => {}
        }
    }
    None
}
