//! PowerShell completion scripts

use super::template::Template;
use super::{CommandPath, RenderContext};
use crate::tree::CommandNode;

pub const TEMPLATE: Template = Template::new(include_str!("templates/powershell.tpl"));

pub fn render(ctx: &RenderContext<'_>) -> String {
    let commands = ctx.commands();

    let transitions: Vec<String> = commands.iter().filter_map(transition).collect();
    let command_list: Vec<String> = commands.iter().map(command_clause).collect();
    let aliases: Vec<String> = ctx.names.iter().map(|name| quote(name)).collect();

    let mut vars = ctx.common_vars();
    vars.insert("aliases", aliases.join(", "));
    vars.insert("root", quote(ctx.script_name));
    vars.insert("transitions", switch("$cmdPath", 8, &transitions));
    vars.insert("command_list", switch("$cmdPath", 4, &command_list));

    TEMPLATE.safe_substitute(&vars)
}

/// `switch` over `subject` with the given clauses, nothing when there are none
fn switch(subject: &str, indent: usize, clauses: &[String]) -> String {
    if clauses.is_empty() {
        return String::new();
    }
    let pad = " ".repeat(indent);
    let body: Vec<String> = clauses
        .iter()
        .map(|clause| indent_lines(clause, indent + 4))
        .collect();
    format!(
        "{pad}switch -CaseSensitive ({subject}) {{\n{}\n{pad}}}",
        body.join("\n")
    )
}

fn transition(cmd: &CommandPath<'_>) -> Option<String> {
    let node = cmd.node;
    let mut arms = Vec::new();

    for child in node.subcommands.values() {
        arms.push(format!(
            "{} {{ $cmdPath = {} }}",
            quote(&child.name),
            quote(&cmd.child_id(&child.name))
        ));
    }
    for option in node.value_options() {
        for flag in &option.flags {
            arms.push(format!("{} {{ $skip = $true }}", quote(flag)));
        }
    }

    if arms.is_empty() {
        return None;
    }

    Some(format!(
        "{} {{\n{}\n}}",
        quote(&cmd.id),
        switch("$word", 4, &arms)
    ))
}

fn command_clause(cmd: &CommandPath<'_>) -> String {
    let node = cmd.node;
    let mut lines = vec![
        format!("    $opts = {}", array(node.flag_words())),
        format!(
            "    $coms = {}",
            array(node.subcommands.keys().map(String::as_str).collect())
        ),
    ];

    let values = value_clauses(node);
    if !values.is_empty() {
        lines.push(switch("$prev", 4, &values));
    }

    format!("{} {{\n{}\n}}", quote(&cmd.id), lines.join("\n"))
}

fn value_clauses(node: &CommandNode) -> Vec<String> {
    let mut clauses = Vec::new();
    for option in node.value_options() {
        let values = array(option.choice_list().iter().map(String::as_str).collect());
        for flag in &option.flags {
            clauses.push(format!("{} {{ $values = {} }}", quote(flag), values));
        }
    }
    clauses
}

fn array(items: Vec<&str>) -> String {
    let quoted: Vec<String> = items.into_iter().map(quote).collect();
    format!("@({})", quoted.join(", "))
}

fn indent_lines(text: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// PowerShell verbatim string
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
