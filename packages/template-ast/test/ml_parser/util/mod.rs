#![allow(dead_code)]

//! ML Parser Test Utilities
//!
//! Mirrors angular/packages/compiler/test/ml_parser/ast_spec_utils.ts

use angular_template_ast::ml_parser::ast::{Element, Node};
use angular_template_ast::ml_parser::html_parser::HtmlParser;
use angular_template_ast::ml_parser::lexer::TokenizeOptions;
use angular_template_ast::ml_parser::parser::ParseTreeResult;
use angular_template_ast::parse_util::{ParseError, ParseLocation};

pub fn parse(html: &str) -> ParseTreeResult {
    HtmlParser::new().parse(html, "TestComp", &TokenizeOptions::default())
}

/// Nodes as `[kind, name or value, depth]` rows; attributes follow their element.
pub fn humanize_dom(result: &ParseTreeResult) -> Vec<Vec<String>> {
    if !result.errors.is_empty() {
        let messages: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
        panic!("Unexpected parse errors:\n{}", messages.join("\n"));
    }
    humanize_nodes(&result.root_nodes)
}

pub fn humanize_nodes(nodes: &[Node]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for node in nodes {
        humanize_node(node, 0, &mut rows);
    }
    rows
}

fn humanize_node(node: &Node, depth: usize, rows: &mut Vec<Vec<String>>) {
    match node {
        Node::Element(element) => humanize_element(element, depth, rows),
        Node::Text(text) => rows.push(vec!["Text".to_string(), text.value.clone(), depth.to_string()]),
        Node::Comment(comment) => rows.push(vec![
            "Comment".to_string(),
            comment.value.clone().unwrap_or_default(),
            depth.to_string(),
        ]),
    }
}

fn humanize_element(element: &Element, depth: usize, rows: &mut Vec<Vec<String>>) {
    rows.push(vec!["Element".to_string(), element.name.clone(), depth.to_string()]);
    for attr in &element.attrs {
        rows.push(vec!["Attribute".to_string(), attr.name.clone(), attr.value.clone()]);
    }
    for child in &element.children {
        humanize_node(child, depth + 1, rows);
    }
}

pub fn humanize_line_column(location: &ParseLocation) -> String {
    format!("{}:{}", location.line, location.col)
}

/// Errors as `[message, line:col]` rows.
pub fn humanize_errors(errors: &[ParseError]) -> Vec<Vec<String>> {
    errors
        .iter()
        .map(|e| vec![e.msg.clone(), humanize_line_column(&e.span.start)])
        .collect()
}

/// Builds expected rows from string slices.
pub fn rows(expected: &[&[&str]]) -> Vec<Vec<String>> {
    expected
        .iter()
        .map(|cells| cells.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
