//! Fish completion scripts
//!
//! Fish has no word-walking function; each candidate is a `complete` line
//! guarded by a condition on the subcommands already typed.

use super::template::Template;
use super::RenderContext;
use crate::tree::{CommandNode, OptionSpec};

pub const TEMPLATE: Template = Template::new(include_str!("templates/fish.tpl"));

pub fn render(ctx: &RenderContext<'_>) -> String {
    let no_subcommand = format!("__fish{}_no_subcommand", ctx.function);
    let tree = ctx.tree;

    let opts: Vec<String> = tree
        .options
        .iter()
        .map(|option| option_line(ctx.script_name, &no_subcommand, option))
        .collect();

    let mut cmds = Vec::new();
    for (i, child) in tree.subcommands.values().enumerate() {
        if i > 0 {
            cmds.push(String::new());
        }
        command_lines(ctx.script_name, &no_subcommand, tree, child, &[], &mut cmds);
    }

    let cmds_names: Vec<String> = tree
        .subcommands
        .values()
        .map(|child| quote(&child.name))
        .collect();
    let wraps: Vec<String> = ctx
        .names
        .iter()
        .skip(1)
        .map(|alias| format!("complete -c {} -w {}", quote(alias), quote(ctx.script_name)))
        .collect();

    let mut vars = ctx.common_vars();
    vars.insert("cmds_names", cmds_names.join(" "));
    vars.insert("opts", opts.join("\n"));
    vars.insert("cmds", cmds.join("\n"));
    vars.insert("wraps", wraps.join("\n"));

    TEMPLATE.safe_substitute(&vars)
}

/// Lines for `command` and everything below it.
///
/// `parents` are the subcommand names between the root and `command`.
fn command_lines<'a>(
    script_name: &str,
    no_subcommand: &str,
    parent: &CommandNode,
    command: &'a CommandNode,
    parents: &[&'a str],
    out: &mut Vec<String>,
) {
    let mut path = parents.to_vec();
    path.push(command.name.as_str());
    out.push(format!("# {} {}", script_name, path.join(" ")));

    let condition = if parents.is_empty() {
        no_subcommand.to_string()
    } else {
        let siblings: Vec<String> = parent.subcommands.keys().map(|k| quote(k)).collect();
        format!(
            "{}; and not __fish_seen_subcommand_from {}",
            seen_all(parents),
            siblings.join(" ")
        )
    };

    let mut line = format!(
        "complete -c {} -f -n {} -a {}",
        quote(script_name),
        quote(&condition),
        quote(&command.name)
    );
    if let Some(help) = description(command.help.as_deref()) {
        line.push_str(&format!(" -d {}", quote(&help)));
    }
    out.push(line);

    let scope = seen_all(&path);
    for option in &command.options {
        out.push(option_line(script_name, &scope, option));
    }

    if command.is_leaf() {
        return;
    }
    out.push(format!("# {} {} subcommands", script_name, path.join(" ")));
    for child in command.subcommands.values() {
        command_lines(script_name, no_subcommand, command, child, &path, out);
    }
}

fn seen_all(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("__fish_seen_subcommand_from {}", quote(name)))
        .collect::<Vec<_>>()
        .join("; and ")
}

fn option_line(script_name: &str, condition: &str, option: &OptionSpec) -> String {
    let mut line = format!("complete -c {} -n {}", quote(script_name), quote(condition));

    for flag in &option.flags {
        if let Some(long) = flag.strip_prefix("--") {
            line.push_str(&format!(" -l {}", quote(long)));
        } else if let Some(short) = flag.strip_prefix('-') {
            if short.chars().count() == 1 {
                line.push_str(&format!(" -s {}", quote(short)));
            } else {
                line.push_str(&format!(" -o {}", quote(short)));
            }
        }
    }

    match &option.choices {
        Some(choices) => {
            let words: Vec<String> = choices.iter().map(|c| argument_word(c)).collect();
            line.push_str(&format!(" -x -a {}", quote(&words.join(" "))));
        }
        None if option.takes_value => line.push_str(" -r"),
        None => {}
    }

    if let Some(help) = description(option.help.as_deref()) {
        line.push_str(&format!(" -d {}", quote(&help)));
    }
    line
}

fn description(help: Option<&str>) -> Option<String> {
    help.filter(|h| !h.trim().is_empty())
        .map(|h| h.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Fish single-quoted string
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', r"\\").replace('\'', r"\'"))
}

const FISH_SPECIAL: &[char] = &[
    '\\', ' ', '$', '\'', '"', '(', ')', '*', '?', '{', '}', ';', '&', '|', '<', '>', '#',
];

/// Escape one candidate of an `-a` list, which fish expands before use
fn argument_word(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if FISH_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
