#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Init,
    Wizard,
    Configs,
    Catalog,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "init" => CliVerb::Init,
        "wizard" => CliVerb::Wizard,
        "configs" => CliVerb::Configs,
        "catalog" => CliVerb::Catalog,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  init [--layout <l>] [--backend <b>] [--catalog <path>]".to_string(),
        "                                       Create state directories and write config.yaml"
            .to_string(),
        "  wizard [--layout full|compact|minimal]".to_string(),
        "                                       Run the organization mapping wizard".to_string(),
        "  configs list                         List saved configurations".to_string(),
        "  configs show <id|timestamp>          Print one saved configuration as JSON"
            .to_string(),
        "  configs delete <id|timestamp>        Delete matching saved configurations".to_string(),
        "  catalog orgs|projects|teams [--filter <text>]".to_string(),
        "                                       List catalog entries".to_string(),
        "  catalog roster <team>                Print a team's member roster".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = vec!["orgmap: map organizations to projects, teams and members".to_string()];
    lines.push(String::new());
    lines.extend(cli_help_lines());
    lines.join("\n")
}
