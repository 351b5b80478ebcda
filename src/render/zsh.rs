//! Zsh completion scripts
//!
//! Candidates are offered through `_describe`, so every option and
//! subcommand carries its help text. The script works both from `fpath`
//! (autoloaded as `_<name>`) and when sourced directly.

use super::template::Template;
use super::{double_quote_escape, single_quote, CommandPath, RenderContext};
use crate::tree::{CommandNode, OptionSpec};

pub const TEMPLATE: Template = Template::new(include_str!("templates/zsh.tpl"));

pub fn render(ctx: &RenderContext<'_>) -> String {
    let commands = ctx.commands();

    let transitions: Vec<String> = commands.iter().filter_map(transition).collect();
    let command_list: Vec<String> = commands.iter().map(command_branch).collect();

    let mut vars = ctx.common_vars();
    vars.insert("root", single_quote(ctx.script_name));
    vars.insert("names", ctx.names.join(" "));
    vars.insert("transitions", transitions.join("\n"));
    vars.insert("command_list", command_list.join("\n\n"));

    TEMPLATE.safe_substitute(&vars)
}

fn pattern(option: &OptionSpec) -> String {
    option
        .flags
        .iter()
        .map(|f| single_quote(f))
        .collect::<Vec<_>>()
        .join("|")
}

fn transition(cmd: &CommandPath<'_>) -> Option<String> {
    let node = cmd.node;
    let mut arms = Vec::new();

    for child in node.subcommands.values() {
        arms.push(format!(
            "                ({})\n                    cmdpath={}\n                    ;;",
            single_quote(&child.name),
            single_quote(&cmd.child_id(&child.name))
        ));
    }

    let skip: Vec<String> = node.value_options().map(pattern).collect();
    if !skip.is_empty() {
        arms.push(format!(
            "                ({})\n                    i=$(( i + 1 ))\n                    ;;",
            skip.join("|")
        ));
    }

    if arms.is_empty() {
        return None;
    }

    Some(format!(
        "            ({})\n                case \"${{word}}\" in\n{}\n                esac\n                ;;",
        single_quote(&cmd.id),
        arms.join("\n")
    ))
}

fn command_branch(cmd: &CommandPath<'_>) -> String {
    let node = cmd.node;

    let opts: Vec<String> = node
        .options
        .iter()
        .flat_map(|option| {
            option
                .flags
                .iter()
                .map(move |flag| describe_item(flag, option.help.as_deref()))
        })
        .collect();
    let coms: Vec<String> = node
        .subcommands
        .values()
        .map(|child| describe_item(&child.name, child.help.as_deref()))
        .collect();

    let mut lines = vec![
        format!("        ({})", single_quote(&cmd.id)),
        format!("            opts=({})", opts.join(" ")),
        format!("            coms=({})", coms.join(" ")),
    ];

    if let Some(values) = value_cases(node) {
        lines.push("            case \"${prev}\" in".to_string());
        lines.push(values);
        lines.push("            esac".to_string());
    }

    lines.push("            ;;".to_string());
    lines.join("\n")
}

fn value_cases(node: &CommandNode) -> Option<String> {
    let arms: Vec<String> = node
        .value_options()
        .map(|option| {
            let body = match &option.choices {
                Some(choices) => {
                    let values: Vec<String> = choices
                        .iter()
                        .map(|c| format!("\"{}\"", double_quote_escape(&escape_colon(c))))
                        .collect();
                    format!("                    vals=({})", values.join(" "))
                }
                None => "                    _files\n                    return".to_string(),
            };
            format!("                ({})\n{}\n                    ;;", pattern(option), body)
        })
        .collect();

    if arms.is_empty() {
        None
    } else {
        Some(arms.join("\n"))
    }
}

/// `_describe` entry: `value:description`, colons in the value escaped
fn describe_item(value: &str, help: Option<&str>) -> String {
    let mut item = escape_colon(value);
    if let Some(help) = help.filter(|h| !h.is_empty()) {
        item.push(':');
        item.push_str(&help.replace('\n', " "));
    }
    format!("\"{}\"", double_quote_escape(&item))
}

fn escape_colon(s: &str) -> String {
    s.replace(':', r"\:")
}
