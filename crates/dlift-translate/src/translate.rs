//! Recursive-descent translation from the source AST to the D AST.
//!
//! One rule per source node kind, exhaustively matched: a node kind with no
//! rule is a hard `UnsupportedConstruct` failure, never a silent skip.
//! Partial but syntactically plausible output is worse than a refusal.

use dlift_ast::{Constant, Expr, Module, ScopeResolution, Stmt};
use dlift_dlang::{DExpr, DStmt, DType};
use log::trace;

use crate::annot::annotation_to_type;
use crate::error::TranslateError;
use crate::scope::BindingTracker;

/// Runtime helper applied to every inferred declaration's initializer so the
/// declared `auto` widens to the most general representable type instead of
/// freezing on the initializer's narrow one.
pub const WIDEN_HELPER: &str = "broaden";

/// Runtime helper that infers a common element type for a non-empty list
/// literal, or falls back to a `Variant[]` when the elements disagree.
pub const ARRAY_HELPER: &str = "commonTypeOrVariantArray";

/// Walks one source tree and produces the corresponding D tree.
///
/// Borrows the scope-resolution result for that tree and owns the binding
/// history built up while walking it. One translator per source tree;
/// unrelated trees with their own resolutions can translate in parallel.
pub struct Translator<'a> {
    scopes: &'a ScopeResolution,
    bindings: BindingTracker,
}

impl<'a> Translator<'a> {
    pub fn new(scopes: &'a ScopeResolution) -> Self {
        Self {
            scopes,
            bindings: BindingTracker::new(),
        }
    }

    /// Translate a whole compilation unit into a statement list.
    pub fn translate_module(&mut self, module: &Module) -> Result<DStmt, TranslateError> {
        let stmts = module
            .body
            .iter()
            .map(|stmt| self.translate_stmt(stmt))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DStmt::List(stmts))
    }

    pub fn translate_stmt(&mut self, stmt: &Stmt) -> Result<DStmt, TranslateError> {
        match stmt {
            Stmt::Assign {
                targets,
                value,
                span,
            } => match targets.as_slice() {
                [Expr::Name(target)] => {
                    let scope = self.scopes.scope_of(target.node).ok_or_else(|| {
                        TranslateError::MissingScopeInfo {
                            name: target.name.clone(),
                            span: target.span,
                        }
                    })?;
                    let rvalue = self.translate_expr(value)?;
                    if self.bindings.is_first_binding(scope, &target.name) {
                        trace!("first binding of `{}` in scope {:?}", target.name, scope);
                        Ok(DStmt::var_decl(
                            DType::Auto,
                            target.name.clone(),
                            Some(call(WIDEN_HELPER, vec![rvalue])),
                        ))
                    } else {
                        trace!("rebinding of `{}` in scope {:?}", target.name, scope);
                        Ok(DStmt::Expr(DExpr::Assign {
                            lvalue: Box::new(DExpr::Var(target.name.clone())),
                            rvalue: Box::new(rvalue),
                        }))
                    }
                }
                [_] => Err(TranslateError::UnsupportedConstruct {
                    what: "assignment to a non-name target",
                    span: *span,
                }),
                [] => Err(TranslateError::UnsupportedConstruct {
                    what: "assignment without targets",
                    span: *span,
                }),
                _ => Err(TranslateError::UnpackingNotSupported { span: *span }),
            },
            Stmt::AnnAssign {
                target,
                annotation,
                value,
                span: _,
            } => {
                let init = self.translate_expr(value)?;
                let scope = self.scopes.scope_of(target.node).ok_or_else(|| {
                    TranslateError::MissingScopeInfo {
                        name: target.name.clone(),
                        span: target.span,
                    }
                })?;
                if !self.bindings.is_first_binding(scope, &target.name) {
                    // The name is already declared in this scope; a second
                    // declaration would not compile, so the annotated form
                    // routes to a plain assignment like any other rebinding.
                    trace!("rebinding of `{}` in scope {:?}", target.name, scope);
                    return Ok(DStmt::Expr(DExpr::Assign {
                        lvalue: Box::new(DExpr::Var(target.name.clone())),
                        rvalue: Box::new(init),
                    }));
                }
                // Annotations are best-effort: a shape the resolver does not
                // recognize falls back to `auto` and is never surfaced. The
                // annotation is dropped outright rather than re-applied as a
                // runtime cast.
                let ty = annotation_to_type(annotation).unwrap_or(DType::Auto);
                Ok(DStmt::var_decl(ty, target.name.clone(), Some(init)))
            }
            Stmt::Pass { span: _ } => Ok(DStmt::Empty),
            Stmt::FunctionDef {
                name,
                args,
                body,
                // Return-type translation (union/any normalization to
                // Variant) is still pending; the signature stays `auto`.
                returns: _,
                span: _,
            } => {
                let mut params = Vec::with_capacity(args.len());
                for arg in args {
                    // Unannotated or unresolvable parameters take the
                    // tagged-union fallback type.
                    let ty = match &arg.annotation {
                        Some(ann) => annotation_to_type(ann).unwrap_or_else(|_| DType::variant()),
                        None => DType::variant(),
                    };
                    params.push((ty, arg.name.clone()));
                }
                let body = body
                    .iter()
                    .map(|stmt| self.translate_stmt(stmt))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DStmt::Function {
                    name: name.clone(),
                    params,
                    body,
                })
            }
            Stmt::Return { span, .. } => Err(TranslateError::UnsupportedConstruct {
                what: "return statement",
                span: *span,
            }),
            Stmt::While { span, .. } => Err(TranslateError::UnsupportedConstruct {
                what: "while loop",
                span: *span,
            }),
        }
    }

    pub fn translate_expr(&mut self, expr: &Expr) -> Result<DExpr, TranslateError> {
        match expr {
            Expr::Name(ident) => Ok(DExpr::Var(ident.name.clone())),
            Expr::Constant { value, span } => match value {
                Constant::Int(n) => Ok(DExpr::Int(*n)),
                Constant::Str(s) => Ok(DExpr::Str(s.clone())),
                Constant::Float(_) => Err(TranslateError::UnsupportedConstruct {
                    what: "float literal",
                    span: *span,
                }),
                Constant::Bool(_) => Err(TranslateError::UnsupportedConstruct {
                    what: "bool literal",
                    span: *span,
                }),
                Constant::None => Err(TranslateError::UnsupportedConstruct {
                    what: "None literal",
                    span: *span,
                }),
            },
            Expr::List { elts, span: _ } => {
                if elts.is_empty() {
                    return Ok(DExpr::Array(Vec::new()));
                }
                // Heterogeneous literal contents cannot be typed up front
                // without real inference; defer the element-type decision to
                // the runtime helper instead of guessing and being wrong.
                let args = elts
                    .iter()
                    .map(|elt| self.translate_expr(elt))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(call(ARRAY_HELPER, args))
            }
            Expr::Subscript { span, .. } => Err(TranslateError::UnsupportedConstruct {
                what: "subscript expression",
                span: *span,
            }),
            Expr::Attribute { span, .. } => Err(TranslateError::UnsupportedConstruct {
                what: "attribute access",
                span: *span,
            }),
            Expr::Call { span, .. } => Err(TranslateError::UnsupportedConstruct {
                what: "call expression",
                span: *span,
            }),
        }
    }
}

fn call(helper: &str, args: Vec<DExpr>) -> DExpr {
    DExpr::Call {
        callee: Box::new(DExpr::Var(helper.to_string())),
        args,
    }
}

/// Translate a whole source tree and render it to D source text.
///
/// The result is either the complete rendered text or the first failure;
/// there is no partial output. The caller supplies the scope-resolution
/// result computed for this exact tree.
pub fn generate_dlang(
    module: &Module,
    scopes: &ScopeResolution,
) -> Result<String, TranslateError> {
    let mut translator = Translator::new(scopes);
    let tree = translator.translate_module(module)?;
    Ok(tree.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlift_ast::{Arg, Ident, NodeId, ScopeId, Span};

    fn name_expr(text: &str, node: u32) -> Expr {
        Expr::Name(Ident::new(text, NodeId(node), Span::DUMMY))
    }

    fn int_lit(value: i64) -> Expr {
        Expr::Constant {
            value: Constant::Int(value),
            span: Span::DUMMY,
        }
    }

    fn str_lit(value: &str) -> Expr {
        Expr::Constant {
            value: Constant::Str(value.to_string()),
            span: Span::DUMMY,
        }
    }

    fn assign(target: &str, node: u32, value: Expr) -> Stmt {
        Stmt::Assign {
            targets: vec![name_expr(target, node)],
            value,
            span: Span::DUMMY,
        }
    }

    fn list(elts: Vec<Expr>) -> Expr {
        Expr::List {
            elts,
            span: Span::DUMMY,
        }
    }

    /// Scope resolution standing in for the external pass: every listed
    /// node binds in the single function scope.
    fn flat_scope(nodes: &[u32]) -> ScopeResolution {
        let mut scopes = ScopeResolution::new();
        for &node in nodes {
            scopes.bind(NodeId(node), ScopeId(0));
        }
        scopes
    }

    #[test]
    fn test_empty_function_with_untyped_param() {
        // def f(a): pass
        let module = Module::new(vec![Stmt::FunctionDef {
            name: "f".to_string(),
            args: vec![Arg {
                name: "a".to_string(),
                node: NodeId(1),
                annotation: None,
                span: Span::DUMMY,
            }],
            body: vec![Stmt::Pass { span: Span::DUMMY }],
            returns: Some(name_expr("int", 2)),
            span: Span::DUMMY,
        }]);

        let rendered = generate_dlang(&module, &flat_scope(&[1])).unwrap();
        assert_eq!(rendered, "auto f(Variant a) {;}");
    }

    #[test]
    fn test_declaration_then_rebinding_sequence() {
        // a = []; b = 1; d: int = 1; e: list[int] = [1]; a = 1
        let module = Module::new(vec![
            assign("a", 1, list(vec![])),
            assign("b", 2, int_lit(1)),
            Stmt::AnnAssign {
                target: Ident::new("d", NodeId(3), Span::DUMMY),
                annotation: name_expr("int", 4),
                value: int_lit(1),
                span: Span::DUMMY,
            },
            Stmt::AnnAssign {
                target: Ident::new("e", NodeId(5), Span::DUMMY),
                annotation: Expr::Subscript {
                    value: Box::new(name_expr("list", 6)),
                    index: Box::new(name_expr("int", 7)),
                    span: Span::DUMMY,
                },
                value: list(vec![int_lit(1)]),
                span: Span::DUMMY,
            },
            assign("a", 8, int_lit(1)),
        ]);

        let rendered = generate_dlang(&module, &flat_scope(&[1, 2, 3, 5, 8])).unwrap();
        assert_eq!(
            rendered,
            "auto a = broaden([]);\
             auto b = broaden(1);\
             int d = 1;\
             int[] e = commonTypeOrVariantArray(1);\
             a = 1;"
        );
    }

    #[test]
    fn test_first_occurrence_of_every_name_is_a_declaration() {
        let module = Module::new(vec![
            assign("x", 1, int_lit(1)),
            assign("y", 2, int_lit(2)),
            assign("x", 3, int_lit(3)),
            assign("y", 4, int_lit(4)),
        ]);

        let rendered = generate_dlang(&module, &flat_scope(&[1, 2, 3, 4])).unwrap();
        assert_eq!(
            rendered,
            "auto x = broaden(1);auto y = broaden(2);x = 3;y = 4;"
        );
        for name in ["x", "y"] {
            let decl = format!("auto {} = ", name);
            assert!(
                rendered.find(&decl).unwrap() < rendered.find(&format!(";{} = ", name)).unwrap(),
                "first occurrence of `{}` must be a declaration: {}",
                name,
                rendered
            );
        }
    }

    #[test]
    fn test_same_name_in_sibling_scopes_declares_twice() {
        let mut scopes = ScopeResolution::new();
        scopes.bind(NodeId(1), ScopeId(1));
        scopes.bind(NodeId(2), ScopeId(2));

        let module = Module::new(vec![
            Stmt::FunctionDef {
                name: "f".to_string(),
                args: vec![],
                body: vec![assign("a", 1, int_lit(1))],
                returns: None,
                span: Span::DUMMY,
            },
            Stmt::FunctionDef {
                name: "g".to_string(),
                args: vec![],
                body: vec![assign("a", 2, int_lit(2))],
                returns: None,
                span: Span::DUMMY,
            },
        ]);

        let rendered = generate_dlang(&module, &scopes).unwrap();
        assert_eq!(
            rendered,
            "auto f() {auto a = broaden(1);}auto g() {auto a = broaden(2);}"
        );
    }

    #[test]
    fn test_annotated_declaration_makes_later_assignment_a_rebinding() {
        let module = Module::new(vec![
            Stmt::AnnAssign {
                target: Ident::new("d", NodeId(1), Span::DUMMY),
                annotation: name_expr("int", 2),
                value: int_lit(1),
                span: Span::DUMMY,
            },
            assign("d", 3, int_lit(2)),
        ]);

        let rendered = generate_dlang(&module, &flat_scope(&[1, 3])).unwrap();
        assert_eq!(rendered, "int d = 1;d = 2;");
    }

    #[test]
    fn test_annotated_assignment_after_plain_binding_rebinds() {
        // a = 1; a: int = 2 in one scope: `a` is already declared, so the
        // annotated form must not re-declare it.
        let module = Module::new(vec![
            assign("a", 1, int_lit(1)),
            Stmt::AnnAssign {
                target: Ident::new("a", NodeId(2), Span::DUMMY),
                annotation: name_expr("int", 3),
                value: int_lit(2),
                span: Span::DUMMY,
            },
        ]);

        let rendered = generate_dlang(&module, &flat_scope(&[1, 2])).unwrap();
        assert_eq!(rendered, "auto a = broaden(1);a = 2;");
    }

    #[test]
    fn test_unrecognized_annotation_falls_back_to_auto() {
        // q: typing.List = 1, an attribute-shaped annotation, gets dropped.
        let module = Module::new(vec![Stmt::AnnAssign {
            target: Ident::new("q", NodeId(1), Span::DUMMY),
            annotation: Expr::Attribute {
                value: Box::new(name_expr("typing", 2)),
                attr: "List".to_string(),
                span: Span::DUMMY,
            },
            value: int_lit(1),
            span: Span::DUMMY,
        }]);

        let rendered = generate_dlang(&module, &flat_scope(&[1])).unwrap();
        assert_eq!(rendered, "auto q = 1;");
    }

    #[test]
    fn test_annotated_parameters_resolve_or_fall_back() {
        let module = Module::new(vec![Stmt::FunctionDef {
            name: "f".to_string(),
            args: vec![
                Arg {
                    name: "n".to_string(),
                    node: NodeId(1),
                    annotation: Some(name_expr("float", 2)),
                    span: Span::DUMMY,
                },
                Arg {
                    name: "xs".to_string(),
                    node: NodeId(3),
                    annotation: Some(Expr::Attribute {
                        value: Box::new(name_expr("typing", 4)),
                        attr: "Any".to_string(),
                        span: Span::DUMMY,
                    }),
                    span: Span::DUMMY,
                },
            ],
            body: vec![Stmt::Pass { span: Span::DUMMY }],
            returns: None,
            span: Span::DUMMY,
        }]);

        let rendered = generate_dlang(&module, &flat_scope(&[])).unwrap();
        assert_eq!(rendered, "auto f(double n, Variant xs) {;}");
    }

    #[test]
    fn test_mixed_list_defers_to_runtime_helper() {
        // a = [1, 'two', 3, '4']
        let module = Module::new(vec![assign(
            "a",
            1,
            list(vec![int_lit(1), str_lit("two"), int_lit(3), str_lit("4")]),
        )]);

        let rendered = generate_dlang(&module, &flat_scope(&[1])).unwrap();
        assert_eq!(
            rendered,
            "auto a = broaden(commonTypeOrVariantArray(1, \"two\", 3, \"4\"));"
        );
    }

    #[test]
    fn test_multi_target_assignment_is_fatal() {
        let module = Module::new(vec![Stmt::Assign {
            targets: vec![name_expr("a", 1), name_expr("b", 2)],
            value: int_lit(1),
            span: Span::new(0, 9),
        }]);

        let err = generate_dlang(&module, &flat_scope(&[1, 2])).unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnpackingNotSupported {
                span: Span::new(0, 9)
            }
        );
    }

    #[test]
    fn test_untranslatable_statements_are_fatal() {
        let ret = Module::new(vec![Stmt::Return {
            value: None,
            span: Span::new(0, 6),
        }]);
        assert!(matches!(
            generate_dlang(&ret, &flat_scope(&[])).unwrap_err(),
            TranslateError::UnsupportedConstruct {
                what: "return statement",
                ..
            }
        ));

        let float = Module::new(vec![assign(
            "a",
            1,
            Expr::Constant {
                value: Constant::Float(1.5),
                span: Span::new(4, 7),
            },
        )]);
        assert!(matches!(
            generate_dlang(&float, &flat_scope(&[1])).unwrap_err(),
            TranslateError::UnsupportedConstruct {
                what: "float literal",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_scope_info_surfaces_contract_violation() {
        let module = Module::new(vec![assign("a", 1, int_lit(1))]);
        let err = generate_dlang(&module, &ScopeResolution::new()).unwrap_err();
        assert_eq!(
            err,
            TranslateError::MissingScopeInfo {
                name: "a".to_string(),
                span: Span::DUMMY,
            }
        );
    }

    #[test]
    fn test_failure_yields_no_partial_output() {
        // A valid statement followed by a fatal one: the whole translation
        // aborts, nothing of the first statement survives.
        let module = Module::new(vec![
            assign("a", 1, int_lit(1)),
            Stmt::While {
                test: name_expr("a", 2),
                body: vec![],
                span: Span::DUMMY,
            },
        ]);
        assert!(generate_dlang(&module, &flat_scope(&[1])).is_err());
    }

    #[test]
    fn test_string_values_render_escaped() {
        let module = Module::new(vec![assign("s", 1, str_lit("he said \"hi\""))]);
        let rendered = generate_dlang(&module, &flat_scope(&[1])).unwrap();
        assert_eq!(rendered, "auto s = broaden(\"he said \\\"hi\\\"\");");
    }
}
