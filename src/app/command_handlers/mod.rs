use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod catalog;
pub mod configs;
pub mod init;
pub mod wizard;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Init => init::cmd_init(&args[1..]),
        CliVerb::Wizard => wizard::cmd_wizard(&args[1..]),
        CliVerb::Configs => configs::cmd_configs(&args[1..]),
        CliVerb::Catalog => catalog::cmd_catalog(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
