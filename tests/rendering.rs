//! Integration tests for completion script rendering

mod common;

use common::DEMO;
use rcomplete::config::parse_definition;
use rcomplete::render::Template;
use rcomplete::{CommandNode, CompleteError, Completer, OptionSpec, Shell};

fn demo() -> Completer {
    let definition = parse_definition(DEMO, None).unwrap();
    Completer::new(&definition)
        .unwrap()
        .with_script_path("/usr/local/bin/demo")
}

#[test]
fn test_bash_candidates_per_command() {
    let script = demo().render("bash").unwrap();

    assert!(script.contains("        'demo')\n            opts=\"--verbose --help\"\n            coms=\"build\""));
    assert!(script.contains("        'demo build')\n            opts=\"--output --jobs --format\""));
    assert!(script.contains("compgen -W \"json yaml\""));
}

#[test]
fn test_every_shell_renders_all_commands_and_options() {
    let completer = demo();
    for shell in Shell::ALL {
        let script = completer.render_shell(shell);
        for word in ["build", "verbose", "output", "jobs", "format", "json", "yaml"] {
            assert!(script.contains(word), "{shell} script is missing {word}");
        }
        if shell != Shell::PowerShell {
            assert!(script.contains(&completer.function_name()));
        }
        assert!(!script.contains("%{"), "{shell} script has an unfilled placeholder");
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let completer = demo();
    for shell in Shell::ALL {
        assert_eq!(completer.render_shell(shell), completer.render_shell(shell));
    }
    let again = demo();
    assert_eq!(completer.render_zsh(), again.render_zsh());
}

#[test]
fn test_declaration_order_not_sorted() {
    let tree = CommandNode::new("ord")
        .with_option(OptionSpec::flag(["--zeta"]))
        .with_option(OptionSpec::flag(["--alpha"]))
        .with_subcommand(CommandNode::new("zulu"))
        .with_subcommand(CommandNode::new("alpha"));
    let completer = Completer::from_tree(tree).with_script_path("/bin/ord");

    let bash = completer.render_bash();
    assert!(bash.contains("opts=\"--zeta --alpha\""));
    assert!(bash.contains("coms=\"zulu alpha\""));

    let fish = completer.render_fish();
    let zulu = fish.find("-a 'zulu'").unwrap();
    let alpha = fish.find("-a 'alpha'").unwrap();
    assert!(zulu < alpha);
}

#[test]
fn test_empty_tree_renders_for_every_shell() {
    let completer = Completer::from_tree(CommandNode::new("bare")).with_script_path("/bin/bare");
    for shell in Shell::ALL {
        let script = completer.render_shell(shell);
        assert!(script.contains("bare"));
        assert!(!script.contains("%{"));
    }
}

#[test]
fn test_function_name_tracks_script_path() {
    let a = demo();
    let b = demo().with_script_path("/opt/demo/bin/demo");
    assert_ne!(a.function_name(), b.function_name());
    assert!(a.function_name().starts_with("_demo_"));
    assert_eq!(a.function_name(), demo().function_name());
}

#[test]
fn test_aliases_are_registered() {
    let completer = demo().with_prog(["demo", "dm"]);
    let function = completer.function_name();

    assert!(completer.render_bash().contains(&format!("complete -o default -F {function} dm")));
    assert!(completer.render_zsh().starts_with("#compdef demo dm"));
    assert!(completer.render_fish().contains("complete -c 'dm' -w 'demo'"));
    assert!(completer.render_powershell().contains("-CommandName 'demo', 'dm'"));
}

#[test]
fn test_unsupported_shell() {
    let err = demo().render("tcsh").unwrap_err();
    assert!(matches!(err, CompleteError::UnsupportedShell(ref s) if s == "tcsh"));
    assert!(err.to_string().contains("bash, zsh, fish, powershell"));
}

#[test]
fn test_shell_names_are_case_insensitive() {
    let completer = demo();
    assert_eq!(completer.render("BASH").unwrap(), completer.render_bash());
    assert_eq!(completer.render("pwsh").unwrap(), completer.render_powershell());
}

#[test]
fn test_special_characters_are_quoted() {
    let tree = CommandNode::new("q").with_subcommand(
        CommandNode::new("say")
            .with_help("Say \"hi\" and it's $HOME")
            .with_option(OptionSpec::flag(["--mode"]).with_choices(["a b", "c'd"])),
    );
    let completer = Completer::from_tree(tree).with_script_path("/bin/q");

    let zsh = completer.render_zsh();
    assert!(zsh.contains(r#""say:Say \"hi\" and it's \$HOME""#));

    let fish = completer.render_fish();
    assert!(fish.contains(r#"-d 'Say "hi" and it\'s $HOME'"#));

    let ps = completer.render_powershell();
    assert!(ps.contains("@('a b', 'c''d')"));
}

#[test]
fn test_templates_expose_their_placeholders() {
    let bash = Template::new(include_str!("../src/render/templates/bash.tpl"));
    let names = bash.placeholders();
    for name in ["script_name", "function", "transitions", "command_list", "compdefs"] {
        assert!(names.contains(&name), "bash template lacks {name}");
    }
}
