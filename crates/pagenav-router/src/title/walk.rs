//! Breadth-first traversal over a Python syntax tree
//!
//! Yields nodes in the same order as Python's `ast.walk`: a node, then its
//! siblings, then their children in field order. Node kinds that can never
//! contain a call (operators, contexts, import aliases, match patterns) are
//! not visited; pruning them does not change the relative order of the rest.

use std::collections::VecDeque;

use rustpython_parser::ast::{self, Expr, Stmt};

/// A node of interest in the tree
#[derive(Debug, Clone, Copy)]
pub(crate) enum Node<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Arguments(&'a ast::Arguments),
    Arg(&'a ast::Arg),
    Keyword(&'a ast::Keyword),
    Comprehension(&'a ast::Comprehension),
    WithItem(&'a ast::WithItem),
    Handler(&'a ast::ExceptHandler),
    MatchCase(&'a ast::MatchCase),
}

/// Lazy breadth-first iterator, children are queued only when a node is yielded
pub(crate) struct BreadthFirst<'a> {
    queue: VecDeque<Node<'a>>,
}

impl<'a> BreadthFirst<'a> {
    pub(crate) fn new(suite: &'a [Stmt]) -> Self {
        Self {
            queue: suite.iter().map(Node::Stmt).collect(),
        }
    }

    /// Every call expression, in traversal order
    pub(crate) fn calls(self) -> impl Iterator<Item = &'a ast::ExprCall> {
        self.filter_map(|node| match node {
            Node::Expr(Expr::Call(call)) => Some(call),
            _ => None,
        })
    }

    fn expr(&mut self, expr: &'a Expr) {
        self.queue.push_back(Node::Expr(expr));
    }

    fn opt(&mut self, expr: Option<&'a Expr>) {
        if let Some(expr) = expr {
            self.expr(expr);
        }
    }

    fn exprs(&mut self, exprs: impl IntoIterator<Item = &'a Expr>) {
        self.queue.extend(exprs.into_iter().map(Node::Expr));
    }

    fn body(&mut self, stmts: &'a [Stmt]) {
        self.queue.extend(stmts.iter().map(Node::Stmt));
    }

    fn comprehensions(&mut self, generators: &'a [ast::Comprehension]) {
        self.queue
            .extend(generators.iter().map(Node::Comprehension));
    }

    fn children(&mut self, node: Node<'a>) {
        match node {
            Node::Stmt(stmt) => self.stmt_children(stmt),
            Node::Expr(expr) => self.expr_children(expr),
            Node::Arguments(args) => {
                // posonlyargs, args, vararg, kwonlyargs, kw_defaults, kwarg, defaults
                self.queue.extend(
                    args.posonlyargs
                        .iter()
                        .chain(args.args.iter())
                        .map(|a| Node::Arg(&a.def)),
                );
                self.queue.extend(args.vararg.as_deref().map(Node::Arg));
                self.queue
                    .extend(args.kwonlyargs.iter().map(|a| Node::Arg(&a.def)));
                self.exprs(args.kwonlyargs.iter().filter_map(|a| a.default.as_deref()));
                self.queue.extend(args.kwarg.as_deref().map(Node::Arg));
                self.exprs(
                    args.posonlyargs
                        .iter()
                        .chain(args.args.iter())
                        .filter_map(|a| a.default.as_deref()),
                );
            }
            Node::Arg(arg) => self.opt(arg.annotation.as_deref()),
            Node::Keyword(keyword) => self.expr(&keyword.value),
            Node::Comprehension(comp) => {
                self.expr(&comp.target);
                self.expr(&comp.iter);
                self.exprs(comp.ifs.iter());
            }
            Node::WithItem(item) => {
                self.expr(&item.context_expr);
                self.opt(item.optional_vars.as_deref());
            }
            Node::Handler(ast::ExceptHandler::ExceptHandler(handler)) => {
                self.opt(handler.type_.as_deref());
                self.body(&handler.body);
            }
            Node::MatchCase(case) => {
                self.opt(case.guard.as_deref());
                self.body(&case.body);
            }
        }
    }

    fn stmt_children(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::FunctionDef(ast::StmtFunctionDef {
                args,
                body,
                decorator_list,
                returns,
                ..
            })
            | Stmt::AsyncFunctionDef(ast::StmtAsyncFunctionDef {
                args,
                body,
                decorator_list,
                returns,
                ..
            }) => {
                self.queue.push_back(Node::Arguments(&**args));
                self.body(body);
                self.exprs(decorator_list.iter());
                self.opt(returns.as_deref());
            }
            Stmt::ClassDef(ast::StmtClassDef {
                bases,
                keywords,
                body,
                decorator_list,
                ..
            }) => {
                self.exprs(bases.iter());
                self.queue.extend(keywords.iter().map(Node::Keyword));
                self.body(body);
                self.exprs(decorator_list.iter());
            }
            Stmt::Return(ast::StmtReturn { value, .. }) => self.opt(value.as_deref()),
            Stmt::Delete(ast::StmtDelete { targets, .. }) => self.exprs(targets.iter()),
            Stmt::Assign(ast::StmtAssign { targets, value, .. }) => {
                self.exprs(targets.iter());
                self.expr(value);
            }
            Stmt::AugAssign(ast::StmtAugAssign { target, value, .. }) => {
                self.expr(target);
                self.expr(value);
            }
            Stmt::AnnAssign(ast::StmtAnnAssign {
                target,
                annotation,
                value,
                ..
            }) => {
                self.expr(target);
                self.expr(annotation);
                self.opt(value.as_deref());
            }
            Stmt::For(ast::StmtFor {
                target,
                iter,
                body,
                orelse,
                ..
            })
            | Stmt::AsyncFor(ast::StmtAsyncFor {
                target,
                iter,
                body,
                orelse,
                ..
            }) => {
                self.expr(target);
                self.expr(iter);
                self.body(body);
                self.body(orelse);
            }
            Stmt::While(ast::StmtWhile {
                test, body, orelse, ..
            })
            | Stmt::If(ast::StmtIf {
                test, body, orelse, ..
            }) => {
                self.expr(test);
                self.body(body);
                self.body(orelse);
            }
            Stmt::With(ast::StmtWith { items, body, .. })
            | Stmt::AsyncWith(ast::StmtAsyncWith { items, body, .. }) => {
                self.queue.extend(items.iter().map(Node::WithItem));
                self.body(body);
            }
            Stmt::Match(ast::StmtMatch { subject, cases, .. }) => {
                self.expr(subject);
                self.queue.extend(cases.iter().map(Node::MatchCase));
            }
            Stmt::Raise(ast::StmtRaise { exc, cause, .. }) => {
                self.opt(exc.as_deref());
                self.opt(cause.as_deref());
            }
            Stmt::Try(ast::StmtTry {
                body,
                handlers,
                orelse,
                finalbody,
                ..
            })
            | Stmt::TryStar(ast::StmtTryStar {
                body,
                handlers,
                orelse,
                finalbody,
                ..
            }) => {
                self.body(body);
                self.queue.extend(handlers.iter().map(Node::Handler));
                self.body(orelse);
                self.body(finalbody);
            }
            Stmt::Assert(ast::StmtAssert { test, msg, .. }) => {
                self.expr(test);
                self.opt(msg.as_deref());
            }
            Stmt::Expr(ast::StmtExpr { value, .. }) => self.expr(value),
            _ => {}
        }
    }

    fn expr_children(&mut self, expr: &'a Expr) {
        match expr {
            Expr::BoolOp(ast::ExprBoolOp { values, .. }) => self.exprs(values.iter()),
            Expr::NamedExpr(ast::ExprNamedExpr { target, value, .. }) => {
                self.expr(target);
                self.expr(value);
            }
            Expr::BinOp(ast::ExprBinOp { left, right, .. }) => {
                self.expr(left);
                self.expr(right);
            }
            Expr::UnaryOp(ast::ExprUnaryOp { operand, .. }) => self.expr(operand),
            Expr::Lambda(ast::ExprLambda { args, body, .. }) => {
                self.queue.push_back(Node::Arguments(&**args));
                self.expr(body);
            }
            Expr::IfExp(ast::ExprIfExp {
                test, body, orelse, ..
            }) => {
                self.expr(test);
                self.expr(body);
                self.expr(orelse);
            }
            Expr::Dict(ast::ExprDict { keys, values, .. }) => {
                self.exprs(keys.iter().flatten());
                self.exprs(values.iter());
            }
            Expr::Set(ast::ExprSet { elts, .. })
            | Expr::List(ast::ExprList { elts, .. })
            | Expr::Tuple(ast::ExprTuple { elts, .. }) => self.exprs(elts.iter()),
            Expr::ListComp(ast::ExprListComp {
                elt, generators, ..
            })
            | Expr::SetComp(ast::ExprSetComp {
                elt, generators, ..
            })
            | Expr::GeneratorExp(ast::ExprGeneratorExp {
                elt, generators, ..
            }) => {
                self.expr(elt);
                self.comprehensions(generators);
            }
            Expr::DictComp(ast::ExprDictComp {
                key,
                value,
                generators,
                ..
            }) => {
                self.expr(key);
                self.expr(value);
                self.comprehensions(generators);
            }
            Expr::Await(ast::ExprAwait { value, .. })
            | Expr::YieldFrom(ast::ExprYieldFrom { value, .. })
            | Expr::Attribute(ast::ExprAttribute { value, .. })
            | Expr::Starred(ast::ExprStarred { value, .. }) => self.expr(value),
            Expr::Yield(ast::ExprYield { value, .. }) => self.opt(value.as_deref()),
            Expr::Compare(ast::ExprCompare {
                left, comparators, ..
            }) => {
                self.expr(left);
                self.exprs(comparators.iter());
            }
            Expr::Call(ast::ExprCall {
                func,
                args,
                keywords,
                ..
            }) => {
                self.expr(func);
                self.exprs(args.iter());
                self.queue.extend(keywords.iter().map(Node::Keyword));
            }
            Expr::FormattedValue(ast::ExprFormattedValue {
                value, format_spec, ..
            }) => {
                self.expr(value);
                self.opt(format_spec.as_deref());
            }
            Expr::JoinedStr(ast::ExprJoinedStr { values, .. }) => self.exprs(values.iter()),
            Expr::Subscript(ast::ExprSubscript { value, slice, .. }) => {
                self.expr(value);
                self.expr(slice);
            }
            Expr::Slice(ast::ExprSlice {
                lower, upper, step, ..
            }) => {
                self.opt(lower.as_deref());
                self.opt(upper.as_deref());
                self.opt(step.as_deref());
            }
            _ => {}
        }
    }
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.children(node);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustpython_parser::Parse;

    fn call_names(source: &str) -> Vec<String> {
        let suite = ast::Suite::parse(source, "<test>").unwrap();
        BreadthFirst::new(&suite)
            .calls()
            .filter_map(|call| match call.func.as_ref() {
                Expr::Name(name) => Some(name.id.as_str().to_string()),
                Expr::Attribute(attr) => Some(attr.attr.as_str().to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_statements_before_nested_calls() {
        let source = r#"
def helper():
    deep()

top()
"#;
        assert_eq!(call_names(source), vec!["top", "deep"]);
    }

    #[test]
    fn test_source_order_within_a_level() {
        assert_eq!(call_names("a()\nb()\nc()\n"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reaches_parameter_annotations() {
        let source = "def f(a: one(), *rest: two(), key: three() = four(), **kw: five()):\n    pass\n";
        assert_eq!(call_names(source), vec!["four", "one", "two", "three", "five"]);
    }

    #[test]
    fn test_outer_call_before_its_arguments() {
        assert_eq!(call_names("outer(inner())\n"), vec!["outer", "inner"]);
    }

    #[test]
    fn test_reaches_compound_statements() {
        let source = r#"
with ctx() as c:
    if flag:
        in_if()
    else:
        in_else()
try:
    in_try()
except Exception:
    in_handler()
for x in items():
    in_loop(x)
"#;
        let names = call_names(source);
        for name in ["ctx", "items", "in_if", "in_else", "in_try", "in_handler", "in_loop"] {
            assert!(names.iter().any(|n| n == name), "missing {name}");
        }
    }

    #[test]
    fn test_reaches_comprehensions_and_keywords() {
        let source = "result = run(key=[f(x) for x in g() if h(x)])\n";
        let names = call_names(source);
        assert_eq!(names[0], "run");
        for name in ["f", "g", "h"] {
            assert!(names.iter().any(|n| n == name), "missing {name}");
        }
    }
}
