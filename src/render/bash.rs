//! Bash completion scripts

use super::template::Template;
use super::{double_quote_escape, single_quote, CommandPath, RenderContext};
use crate::tree::CommandNode;

pub const TEMPLATE: Template = Template::new(include_str!("templates/bash.tpl"));

/// Render the bash script
pub fn render(ctx: &RenderContext<'_>) -> String {
    let commands = ctx.commands();

    let transitions: Vec<String> = commands.iter().filter_map(transition).collect();
    let command_list: Vec<String> = commands.iter().map(command_branch).collect();
    let compdefs: Vec<String> = ctx
        .names
        .iter()
        .map(|name| format!("complete -o default -F {} {}", ctx.function, name))
        .collect();

    let mut vars = ctx.common_vars();
    vars.insert("root", single_quote(ctx.script_name));
    vars.insert("transitions", transitions.join("\n"));
    vars.insert("command_list", command_list.join("\n\n"));
    vars.insert("compdefs", compdefs.join("\n"));

    TEMPLATE.safe_substitute(&vars)
}

/// `case` patterns matching any spelling of the given options
fn flag_pattern<'a>(flags: impl Iterator<Item = &'a String>) -> String {
    flags
        .map(|f| single_quote(f))
        .collect::<Vec<_>>()
        .join("|")
}

/// Word-walk branch: step into subcommands, skip option arguments
fn transition(cmd: &CommandPath<'_>) -> Option<String> {
    let node = cmd.node;
    let mut arms = Vec::new();

    for child in node.subcommands.values() {
        arms.push(format!(
            "                    {})\n                        cmdpath={}\n                        ;;",
            single_quote(&child.name),
            single_quote(&cmd.child_id(&child.name))
        ));
    }

    let value_flags: Vec<&String> = node.value_options().flat_map(|o| o.flags.iter()).collect();
    if !value_flags.is_empty() {
        arms.push(format!(
            "                    {})\n                        i=$((i + 1))\n                        ;;",
            flag_pattern(value_flags.into_iter())
        ));
    }

    if arms.is_empty() {
        return None;
    }

    Some(format!(
        "            {})\n                case \"${{word}}\" in\n{}\n                esac\n                ;;",
        single_quote(&cmd.id),
        arms.join("\n")
    ))
}

/// Candidate branch for one command path
fn command_branch(cmd: &CommandPath<'_>) -> String {
    let node = cmd.node;
    let mut lines = vec![
        format!("        {})", single_quote(&cmd.id)),
        format!("            opts=\"{}\"", words(node.flag_words())),
        format!("            coms=\"{}\"", words(subcommand_names(node))),
    ];

    if let Some(values) = value_cases(node) {
        lines.push("            case \"${prev}\" in".to_string());
        lines.push(values);
        lines.push("            esac".to_string());
    }

    lines.push("            ;;".to_string());
    lines.join("\n")
}

/// `case "${prev}"` arms completing option arguments
fn value_cases(node: &CommandNode) -> Option<String> {
    let mut arms = Vec::new();

    for option in node.value_options() {
        let body = match &option.choices {
            Some(choices) => format!(
                "                    COMPREPLY=($(compgen -W \"{}\" -- \"${{cur}}\"))\n                    return 0",
                words(choices.iter().map(String::as_str).collect())
            ),
            // nothing to offer; `-o default` falls back to file names
            None => "                    return 0".to_string(),
        };
        arms.push(format!(
            "                {})\n{}\n                    ;;",
            flag_pattern(option.flags.iter()),
            body
        ));
    }

    if arms.is_empty() {
        None
    } else {
        Some(arms.join("\n"))
    }
}

fn subcommand_names(node: &CommandNode) -> Vec<&str> {
    node.subcommands.values().map(|c| c.name.as_str()).collect()
}

fn words(items: Vec<&str>) -> String {
    items
        .into_iter()
        .map(double_quote_escape)
        .collect::<Vec<_>>()
        .join(" ")
}
