//! Getter for `clap::Command`

use super::CommandSource;
use crate::tree::OptionSpec;
use ::clap::{Arg, Command};
use indexmap::IndexMap;
use std::any::Any;
use std::borrow::Cow;

/// Reads options and subcommands from a [`clap::Command`]
pub struct ClapGetter<'a> {
    cmd: Cow<'a, Command>,
}

impl<'a> ClapGetter<'a> {
    /// Wrap a top-level command.
    ///
    /// The command is cloned and built so clap's generated `--help`,
    /// `--version` and `help` entries, and global args propagated to
    /// subcommands, are visible.
    pub fn new(cmd: &Command) -> ClapGetter<'static> {
        let mut built = cmd.clone();
        built.build();
        ClapGetter {
            cmd: Cow::Owned(built),
        }
    }

    fn borrowed(cmd: &'a Command) -> Self {
        ClapGetter {
            cmd: Cow::Borrowed(cmd),
        }
    }
}

/// Registry entry for `clap::Command` values
pub fn getter(cli: &dyn Any) -> Option<Box<dyn CommandSource + '_>> {
    cli.downcast_ref::<Command>()
        .map(|cmd| Box::new(ClapGetter::new(cmd)) as Box<dyn CommandSource>)
}

impl CommandSource for ClapGetter<'_> {
    fn name(&self) -> String {
        self.cmd.get_name().to_string()
    }

    fn help(&self) -> Option<String> {
        self.cmd.get_about().map(|about| about.to_string())
    }

    fn options(&self) -> Vec<OptionSpec> {
        self.cmd
            .get_arguments()
            .filter(|arg| !arg.is_positional() && !arg.is_hide_set())
            .map(option_from_arg)
            .collect()
    }

    fn subcommands(&self) -> IndexMap<String, Box<dyn CommandSource + '_>> {
        self.cmd
            .get_subcommands()
            .filter(|sub| !sub.is_hide_set())
            .map(|sub| {
                let getter: Box<dyn CommandSource + '_> = Box::new(ClapGetter::borrowed(sub));
                (sub.get_name().to_string(), getter)
            })
            .collect()
    }
}

fn option_from_arg(arg: &Arg) -> OptionSpec {
    let mut flags = Vec::new();
    if let Some(long) = arg.get_long() {
        flags.push(format!("--{}", long));
    }
    for alias in arg.get_visible_aliases().unwrap_or_default() {
        flags.push(format!("--{}", alias));
    }
    if let Some(short) = arg.get_short() {
        flags.push(format!("-{}", short));
    }
    for alias in arg.get_visible_short_aliases().unwrap_or_default() {
        flags.push(format!("-{}", alias));
    }

    let takes_value = arg.get_action().takes_values();
    let choices: Vec<String> = if takes_value {
        arg.get_possible_values()
            .iter()
            .filter(|value| !value.is_hide_set())
            .map(|value| value.get_name().to_string())
            .collect()
    } else {
        Vec::new()
    };

    let mut spec = OptionSpec::flag(flags);
    spec.help = arg.get_help().map(|help| help.to_string());
    spec.takes_value = takes_value;
    if !choices.is_empty() {
        spec.choices = Some(choices);
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::getters::build_tree;
    use ::clap::{value_parser, ArgAction};

    fn command() -> Command {
        Command::new("mytool")
            .about("Test argument parser")
            .disable_help_flag(true)
            .disable_help_subcommand(true)
            .arg(
                Arg::new("file")
                    .short('f')
                    .long("file")
                    .help("File to be write into"),
            )
            .subcommand(
                Command::new("list")
                    .about("List files")
                    .disable_help_flag(true)
                    .arg(
                        Arg::new("all")
                            .short('a')
                            .long("all")
                            .help("Include hidden files")
                            .action(ArgAction::SetTrue),
                    )
                    .arg(
                        Arg::new("sort")
                            .long("sort")
                            .value_parser(["name", "size", "time"]),
                    )
                    .arg(Arg::new("path").help("Path to list")),
            )
    }

    #[test]
    fn test_options_skip_positionals() {
        let getter = ClapGetter::new(&command());
        let tree = build_tree(&getter);

        assert_eq!(tree.name, "mytool");
        assert_eq!(tree.help.as_deref(), Some("Test argument parser"));
        assert_eq!(tree.options.len(), 1);
        assert_eq!(tree.options[0].flags, vec!["--file", "-f"]);
        assert!(tree.options[0].takes_value);
        assert_eq!(tree.options[0].help.as_deref(), Some("File to be write into"));

        let list = &tree.subcommands["list"];
        assert_eq!(list.options.len(), 2);
        assert_eq!(list.options[0].flags, vec!["--all", "-a"]);
        assert!(!list.options[0].takes_value);
    }

    #[test]
    fn test_possible_values_become_choices() {
        let tree = build_tree(&ClapGetter::new(&command()));
        let sort = &tree.subcommands["list"].options[1];
        assert_eq!(
            sort.choices.as_deref(),
            Some(&["name".to_string(), "size".to_string(), "time".to_string()][..])
        );
    }

    #[test]
    fn test_typed_values_have_no_choices() {
        let cmd = Command::new("jobs").arg(
            Arg::new("jobs")
                .long("jobs")
                .value_parser(value_parser!(u32)),
        );
        let tree = build_tree(&ClapGetter::new(&cmd));
        let jobs = tree
            .options
            .iter()
            .find(|o| o.flags.contains(&"--jobs".to_string()))
            .unwrap();
        assert!(jobs.takes_value);
        assert_eq!(jobs.choices, None);
    }

    #[test]
    fn test_hidden_items_are_skipped() {
        let cmd = Command::new("app")
            .disable_help_flag(true)
            .disable_help_subcommand(true)
            .arg(Arg::new("secret").long("secret").hide(true))
            .subcommand(Command::new("internal").hide(true))
            .subcommand(Command::new("public"));
        let tree = build_tree(&ClapGetter::new(&cmd));
        assert!(tree.options.is_empty());
        assert_eq!(tree.subcommands.len(), 1);
        assert!(tree.subcommands.contains_key("public"));
    }

    #[test]
    fn test_generated_help_is_included() {
        let cmd = Command::new("app").subcommand(Command::new("run"));
        let tree = build_tree(&ClapGetter::new(&cmd));
        assert!(tree.flag_words().contains(&"--help"));
        assert!(tree.subcommands.contains_key("help"));
    }

    #[test]
    fn test_global_args_propagate() {
        let cmd = Command::new("app")
            .disable_help_flag(true)
            .disable_help_subcommand(true)
            .arg(
                Arg::new("verbose")
                    .long("verbose")
                    .action(ArgAction::SetTrue)
                    .global(true),
            )
            .subcommand(Command::new("run").disable_help_flag(true));
        let tree = build_tree(&ClapGetter::new(&cmd));
        assert_eq!(tree.subcommands["run"].flag_words(), vec!["--verbose"]);
    }
}
