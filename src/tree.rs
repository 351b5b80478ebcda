//! Normalized command tree
//!
//! Every supported CLI object model is reduced to this representation before
//! rendering. The tree is built once and only read afterwards.

use indexmap::IndexMap;

/// One command or subcommand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandNode {
    /// Name used on the command line and in generated identifiers
    pub name: String,

    /// Short description of the command
    pub help: Option<String>,

    /// Options accepted by this command, in declaration order
    pub options: Vec<OptionSpec>,

    /// Child commands keyed by name, in declaration order
    pub subcommands: IndexMap<String, CommandNode>,
}

/// One flag or option
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSpec {
    /// Every spelling of the option, e.g. `-v` and `--verbose`
    pub flags: Vec<String>,

    /// Description shown by shells that support one
    pub help: Option<String>,

    /// Allowed literal values, `None` for a free-form value
    pub choices: Option<Vec<String>>,

    /// Whether the option consumes the following argument
    pub takes_value: bool,
}

impl CommandNode {
    /// Create an empty command
    pub fn new(name: impl Into<String>) -> Self {
        CommandNode {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Append an option
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Insert a child command under its own name
    pub fn with_subcommand(mut self, child: CommandNode) -> Self {
        self.subcommands.insert(child.name.clone(), child);
        self
    }

    /// Whether the command has no subcommands
    pub fn is_leaf(&self) -> bool {
        self.subcommands.is_empty()
    }

    /// Visit every command in pre-order together with its path from the root.
    ///
    /// The root's path is `[root.name]`; children follow their parent and keep
    /// declaration order, so the result is the order shells render in.
    pub fn walk(&self) -> Vec<(Vec<&str>, &CommandNode)> {
        let mut out = Vec::new();
        self.walk_into(Vec::new(), &mut out);
        out
    }

    fn walk_into<'a>(
        &'a self,
        mut path: Vec<&'a str>,
        out: &mut Vec<(Vec<&'a str>, &'a CommandNode)>,
    ) {
        path.push(self.name.as_str());
        out.push((path.clone(), self));
        for child in self.subcommands.values() {
            child.walk_into(path.clone(), out);
        }
    }

    /// All flag spellings of this command, in declaration order
    pub fn flag_words(&self) -> Vec<&str> {
        self.options
            .iter()
            .flat_map(|o| o.flags.iter().map(String::as_str))
            .collect()
    }

    /// Options that consume an argument
    pub fn value_options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().filter(|o| o.takes_value)
    }
}

impl OptionSpec {
    /// Create a boolean flag from its spellings
    pub fn flag<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = OptionSpec::default();
        for flag in flags {
            let flag = flag.into();
            if !spec.flags.contains(&flag) {
                spec.flags.push(flag);
            }
        }
        spec
    }

    /// Create an option that takes a free-form value
    pub fn value<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionSpec {
            takes_value: true,
            ..Self::flag(flags)
        }
    }

    /// Set the description
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Restrict the value to the given literals; implies `takes_value`
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self.takes_value = true;
        self
    }

    /// The longest spelling, which is the `--long-name` when there is one
    pub fn primary(&self) -> &str {
        self.flags
            .iter()
            .map(String::as_str)
            .fold("", |best, f| if f.len() > best.len() { f } else { best })
    }

    /// Choices, or an empty slice
    pub fn choice_list(&self) -> &[String] {
        self.choices.as_deref().unwrap_or(&[])
    }
}
