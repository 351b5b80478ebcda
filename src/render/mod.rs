//! Completion script rendering
//!
//! A [`Completer`] owns the normalized command tree and renders it for one
//! of the supported shells. Each shell module computes its fragments from
//! the tree and substitutes them into that shell's fixed template.

pub mod bash;
pub mod fish;
pub mod powershell;
pub mod template;
pub mod zsh;

use crate::error::{CompleteError, Result};
use crate::getters::{build_tree, extract, CommandSource};
use crate::tree::CommandNode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::any::Any;
use std::env;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub use template::Template;

/// A supported shell dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl Shell {
    /// Every supported shell
    pub const ALL: [Shell; 4] = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
            Shell::PowerShell => "powershell",
        }
    }

    /// Guess the shell from the `SHELL` environment variable
    pub fn detect() -> Result<Shell> {
        match env::var("SHELL") {
            Ok(shell) if !shell.is_empty() => Shell::from_shell_path(&shell),
            _ => Err(CompleteError::ShellNotDetected),
        }
    }

    /// Parse the basename of a shell executable path, e.g. `/bin/zsh`
    pub fn from_shell_path(path: &str) -> Result<Shell> {
        let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let name = base.strip_suffix(".exe").unwrap_or(base);
        name.parse()
    }
}

impl FromStr for Shell {
    type Err = CompleteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            "powershell" | "pwsh" => Ok(Shell::PowerShell),
            _ => Err(CompleteError::UnsupportedShell(s.to_string())),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders completion scripts for one CLI.
///
/// To use the completer:
///
/// ```no_run
/// use rcomplete::Completer;
///
/// let cli = clap::Command::new("mytool").subcommand(clap::Command::new("run"));
/// let script = Completer::new(&cli).unwrap().render("bash").unwrap();
/// println!("{}", script);
/// ```
///
/// Then save the result where the shell's completion engine reads it.
#[derive(Debug, Clone)]
pub struct Completer {
    tree: CommandNode,
    prog: Vec<String>,
    script_path: PathBuf,
}

impl Completer {
    /// Extract the tree from any supported CLI object
    pub fn new<T: Any>(cli: &T) -> Result<Self> {
        Ok(Self::from_tree(extract(cli)?))
    }

    /// Extract the tree from a custom command source
    pub fn from_source(source: &dyn CommandSource) -> Self {
        Self::from_tree(build_tree(source))
    }

    /// Render an already built tree
    pub fn from_tree(tree: CommandNode) -> Self {
        let script_path = current_script_path();
        let prog = if tree.name.is_empty() {
            script_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            tree.name.clone()
        };

        Completer {
            tree,
            prog: vec![prog],
            script_path,
        }
    }

    /// Set the program name; further entries are registered as aliases.
    ///
    /// An empty list keeps the current names.
    pub fn with_prog<I, S>(mut self, prog: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prog: Vec<String> = prog.into_iter().map(Into::into).collect();
        if !prog.is_empty() {
            self.prog = prog;
        }
        self
    }

    /// Set the path hashed into the generated function name
    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = path.into();
        self
    }

    /// The extracted command tree
    pub fn tree(&self) -> &CommandNode {
        &self.tree
    }

    /// Program name followed by its aliases
    pub fn prog(&self) -> &[String] {
        &self.prog
    }

    /// Name of the shell function the scripts define
    pub fn function_name(&self) -> String {
        generate_function_name(&self.prog[0], &self.script_path)
    }

    /// Render for a shell given by name
    pub fn render(&self, shell: &str) -> Result<String> {
        Ok(self.render_shell(shell.parse()?))
    }

    /// Render for the shell named by `$SHELL`
    pub fn render_detected(&self) -> Result<String> {
        Ok(self.render_shell(Shell::detect()?))
    }

    /// Render for a shell
    pub fn render_shell(&self, shell: Shell) -> String {
        debug!(%shell, prog = %self.prog[0], "rendering completion script");
        let ctx = self.context();
        match shell {
            Shell::Bash => bash::render(&ctx),
            Shell::Zsh => zsh::render(&ctx),
            Shell::Fish => fish::render(&ctx),
            Shell::PowerShell => powershell::render(&ctx),
        }
    }

    pub fn render_bash(&self) -> String {
        self.render_shell(Shell::Bash)
    }

    pub fn render_zsh(&self) -> String {
        self.render_shell(Shell::Zsh)
    }

    pub fn render_fish(&self) -> String {
        self.render_shell(Shell::Fish)
    }

    pub fn render_powershell(&self) -> String {
        self.render_shell(Shell::PowerShell)
    }

    /// Render into a writer
    pub fn write_to<W: Write>(&self, shell: Shell, out: &mut W) -> Result<()> {
        let script = self.render_shell(shell);
        out.write_all(script.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext {
            tree: &self.tree,
            script_name: &self.prog[0],
            names: &self.prog,
            function: self.function_name(),
        }
    }
}

/// Everything a shell module needs to render
pub struct RenderContext<'a> {
    pub tree: &'a CommandNode,
    pub script_name: &'a str,
    pub names: &'a [String],
    pub function: String,
}

/// A command together with its position in the tree
pub struct CommandPath<'a> {
    /// Script name followed by the subcommand names, space separated
    pub id: String,
    /// Subcommand names below the root
    pub names: Vec<&'a str>,
    pub node: &'a CommandNode,
}

impl<'a> RenderContext<'a> {
    /// Every command in pre-order, root first
    pub fn commands(&self) -> Vec<CommandPath<'a>> {
        self.tree
            .walk()
            .into_iter()
            .map(|(path, node)| {
                let names = path[1..].to_vec();
                CommandPath {
                    id: self.path_id(&names),
                    names,
                    node,
                }
            })
            .collect()
    }

    /// Identifier of the command reached through `names`
    pub fn path_id(&self, names: &[&str]) -> String {
        let mut id = self.script_name.to_string();
        for name in names {
            id.push(' ');
            id.push_str(name);
        }
        id
    }

    /// Substitution values shared by every template
    pub fn common_vars(&self) -> std::collections::HashMap<&'static str, String> {
        let mut vars = std::collections::HashMap::new();
        vars.insert("script_name", self.script_name.to_string());
        vars.insert("function", self.function.clone());
        vars.insert("version", crate::VERSION.to_string());
        vars
    }
}

impl CommandPath<'_> {
    /// Identifier of a direct child
    pub fn child_id(&self, child: &str) -> String {
        format!("{} {}", self.id, child)
    }
}

static NOT_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// `_<name>_<hash>_complete`, unique per script name and location
pub fn generate_function_name(script_name: &str, script_path: &Path) -> String {
    let digest = format!(
        "{:x}",
        md5::compute(script_path.to_string_lossy().as_bytes())
    );
    format!(
        "_{}_{}_complete",
        sanitize_for_function_name(script_name),
        &digest[..16]
    )
}

/// Keep only characters valid in a shell function name
pub fn sanitize_for_function_name(name: &str) -> String {
    NOT_IDENTIFIER
        .replace_all(&name.replace('-', "_"), "")
        .into_owned()
}

/// Quote for POSIX shells (bash, zsh) as a single-quoted word
pub fn single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Escape for the inside of a POSIX double-quoted string
pub fn double_quote_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Path of the running executable
fn current_script_path() -> PathBuf {
    env::current_exe()
        .and_then(|exe| exe.canonicalize())
        .unwrap_or_default()
}
