use crate::app::command_support::{split_flags, CommandContext};
use crate::catalog::filter;

pub fn cmd_catalog(args: &[String]) -> Result<String, String> {
    if args.is_empty() {
        return Err("usage: catalog <orgs|projects|teams|roster> ...".to_string());
    }

    match args[0].as_str() {
        kind @ ("orgs" | "projects" | "teams") => {
            let (positional, values) = split_flags(&args[1..], &["--filter"])?;
            if !positional.is_empty() {
                return Err(format!("usage: catalog {kind} [--filter <text>]"));
            }
            let catalog = CommandContext::load()?.catalog()?;
            let items = match kind {
                "orgs" => catalog.list_organizations(),
                "projects" => catalog
                    .list_projects()
                    .iter()
                    .map(|key| catalog.project_label(key))
                    .collect(),
                _ => catalog.list_teams(),
            };
            let needle = values[0].as_deref().unwrap_or("");
            Ok(filter(&items, needle).join("\n"))
        }
        "roster" => {
            if args.len() != 2 {
                return Err("usage: catalog roster <team>".to_string());
            }
            let catalog = CommandContext::load()?.catalog()?;
            let team = catalog
                .team(&args[1])
                .ok_or_else(|| format!("unknown team `{}`", args[1]))?;
            Ok(team.roster().join("\n"))
        }
        other => Err(format!("unknown catalog subcommand `{other}`")),
    }
}
