//! Getter for command definition documents

use super::CommandSource;
use crate::config::{CommandDef, OptionDef};
use crate::tree::OptionSpec;
use indexmap::IndexMap;
use std::any::Any;

/// Reads options and subcommands from a [`CommandDef`]
pub struct DefinitionGetter<'a> {
    name: String,
    def: &'a CommandDef,
}

impl<'a> DefinitionGetter<'a> {
    /// Wrap a root definition, named by its `name` field
    pub fn new(def: &'a CommandDef) -> Self {
        DefinitionGetter {
            name: def.name.clone().unwrap_or_default(),
            def,
        }
    }

    /// Wrap a subcommand definition stored under `key`
    fn child(key: &str, def: &'a CommandDef) -> Self {
        DefinitionGetter {
            name: def.name.clone().unwrap_or_else(|| key.to_string()),
            def,
        }
    }
}

/// Registry entry for definition documents
pub fn getter(cli: &dyn Any) -> Option<Box<dyn CommandSource + '_>> {
    cli.downcast_ref::<CommandDef>()
        .map(|def| Box::new(DefinitionGetter::new(def)) as Box<dyn CommandSource + '_>)
}

impl CommandSource for DefinitionGetter<'_> {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn help(&self) -> Option<String> {
        self.def.help.clone()
    }

    fn options(&self) -> Vec<OptionSpec> {
        self.def
            .options
            .iter()
            .filter(|option| !option.hidden)
            .map(option_from_def)
            .collect()
    }

    fn subcommands(&self) -> IndexMap<String, Box<dyn CommandSource + '_>> {
        self.def
            .commands
            .iter()
            .filter(|(_, command)| !command.hidden)
            .map(|(key, command)| {
                let getter = DefinitionGetter::child(key, command);
                let name = getter.name.clone();
                (name, Box::new(getter) as Box<dyn CommandSource + '_>)
            })
            .collect()
    }
}

fn option_from_def(option: &OptionDef) -> OptionSpec {
    let mut spec = OptionSpec::flag(option.flags.iter().cloned());
    spec.help = option.help.clone();
    spec.takes_value = option.takes_value();
    if !option.choices.is_empty() {
        spec.choices = Some(option.choices.clone());
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_definition;
    use crate::getters::{build_tree, extract};

    const YAML: &str = r#"
name: demo
help: Demo tool
options:
  - flags: [--verbose, -v]
    help: Print more
  - flags: --secret
    hidden: true
commands:
  build:
    help: Build things
    options:
      - flags: --output
        takes-value: true
      - flags: --jobs
        takes-value: true
      - flags: --format
        choices: [json, yaml]
  internal:
    hidden: true
  renamed:
    name: publish
"#;

    #[test]
    fn test_extract_definition() {
        let def = parse_definition(YAML, None).unwrap();
        let tree = extract(&def).unwrap();

        assert_eq!(tree.name, "demo");
        assert_eq!(tree.options.len(), 1);
        assert_eq!(tree.options[0].flags, vec!["--verbose", "-v"]);
        assert_eq!(tree.options[0].primary(), "--verbose");

        let build = &tree.subcommands["build"];
        let flags: Vec<&str> = build.options.iter().map(|o| o.primary()).collect();
        assert_eq!(flags, vec!["--output", "--jobs", "--format"]);
        assert_eq!(
            build.options[2].choices,
            Some(vec!["json".to_string(), "yaml".to_string()])
        );
        assert!(build.options[0].takes_value);
        assert_eq!(build.options[0].choices, None);
    }

    #[test]
    fn test_hidden_commands_skipped_and_names_override_keys() {
        let def = parse_definition(YAML, None).unwrap();
        let tree = build_tree(&DefinitionGetter::new(&def));
        let names: Vec<&str> = tree.subcommands.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["build", "publish"]);
        assert_eq!(tree.subcommands["publish"].name, "publish");
    }

    #[test]
    fn test_unnamed_root() {
        let def = CommandDef::default();
        let tree = extract(&def).unwrap();
        assert_eq!(tree.name, "");
        assert!(tree.options.is_empty());
        assert!(tree.subcommands.is_empty());
    }
}
