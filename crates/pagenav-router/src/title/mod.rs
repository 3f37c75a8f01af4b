//! Static title extraction from page source
//!
//! Page files are parsed into a Python syntax tree and searched for the first
//! call shaped like `st.title("...")`. Nothing is executed: page files may do
//! network or file I/O at import time, and navigation must not trigger it.

mod walk;

use std::fs;
use std::path::Path;

use rustpython_parser::ast::{self, Expr, Stmt};
use rustpython_parser::Parse;
use tracing::{debug, warn};

use crate::config::TitleConfig;
use crate::error::{Result, RouterError};
use walk::BreadthFirst;

/// Reads a page file and extracts its navigation title
///
/// Source that cannot be decoded as UTF-8 or parsed as Python yields the
/// fallback title, so one broken page never stops a navigation build.
///
/// # Errors
///
/// [`RouterError::Io`] if the file cannot be read.
pub fn extract_title(page_file: &Path, config: &TitleConfig) -> Result<String> {
    let bytes = fs::read(page_file).map_err(|source| RouterError::Io {
        path: page_file.to_path_buf(),
        source,
    })?;

    let label = page_file.to_string_lossy();
    match String::from_utf8(bytes) {
        Ok(source) => Ok(title_from_source(&source, &label, config)),
        Err(err) => {
            warn!("Page {} is not valid UTF-8 ({}), using fallback title", label, err);
            Ok(config.fallback_title.clone())
        }
    }
}

/// Extracts the navigation title from in-memory page source
///
/// `source_path` only labels parse diagnostics.
///
/// The tree is walked breadth-first and the first call of the form
/// `<alias>.<title_method>(...)` decides the outcome: its first positional
/// argument is the title when it is a plain string literal, otherwise the
/// fallback title is returned without looking further.
///
/// # Examples
///
/// ```
/// use pagenav_router::{title_from_source, TitleConfig};
///
/// let config = TitleConfig::default();
/// let source = "import streamlit as st\n\nst.title(\"Admin Panel\")\n";
/// assert_eq!(title_from_source(source, "page.py", &config), "Admin Panel");
/// assert_eq!(title_from_source("print('hi')\n", "page.py", &config), "Page");
/// ```
pub fn title_from_source(source: &str, source_path: &str, config: &TitleConfig) -> String {
    let suite = match ast::Suite::parse(source, source_path) {
        Ok(suite) => suite,
        Err(err) => {
            warn!("Failed to parse {}: {}, using fallback title", source_path, err);
            return config.fallback_title.clone();
        }
    };

    if let Some(module) = &config.require_import {
        if !binds_alias(&suite, module, &config.alias) {
            debug!(
                "{} does not import {} as {}, using fallback title",
                source_path, module, config.alias
            );
            return config.fallback_title.clone();
        }
    }

    let title = BreadthFirst::new(&suite)
        .calls()
        .find(|call| is_title_call(call, &config.alias, &config.title_method))
        .and_then(literal_argument)
        .unwrap_or_else(|| config.fallback_title.clone());
    title
}

/// Matches `<alias>.<method>(...)` where `<alias>` is a bare name
///
/// Purely syntactic: a local rebinding of the alias still matches.
fn is_title_call(call: &ast::ExprCall, alias: &str, method: &str) -> bool {
    match call.func.as_ref() {
        Expr::Attribute(ast::ExprAttribute { value, attr, .. }) => {
            attr.as_str() == method
                && matches!(value.as_ref(), Expr::Name(ast::ExprName { id, .. }) if id.as_str() == alias)
        }
        _ => false,
    }
}

/// First positional argument, when it is a string literal
fn literal_argument(call: &ast::ExprCall) -> Option<String> {
    match call.args.first()? {
        Expr::Constant(ast::ExprConstant {
            value: ast::Constant::Str(title),
            ..
        }) => Some(title.clone()),
        _ => None,
    }
}

/// Whether a top-level `import` binds `alias` to `module`
fn binds_alias(suite: &[Stmt], module: &str, alias: &str) -> bool {
    suite.iter().any(|stmt| match stmt {
        Stmt::Import(ast::StmtImport { names, .. }) => names.iter().any(|name| {
            let imported = name.name.as_str();
            match &name.asname {
                Some(asname) => asname.as_str() == alias && imported == module,
                None => imported == module && module == alias,
            }
        }),
        _ => false,
    })
}
