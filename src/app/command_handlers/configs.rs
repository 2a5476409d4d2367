use crate::app::command_support::CommandContext;
use crate::persistence::{Configuration, ConfigurationRef};
use crate::shared::clock::format_millis;

pub fn cmd_configs(args: &[String]) -> Result<String, String> {
    if args.is_empty() {
        return Err("usage: configs <list|show|delete> ...".to_string());
    }

    match args[0].as_str() {
        "list" => {
            if args.len() != 1 {
                return Err("usage: configs list".to_string());
            }
            let context = CommandContext::load()?;
            let configs = context
                .gateway()?
                .load()
                .map_err(|e| e.to_string())?;
            if configs.is_empty() {
                return Ok("no saved configurations".to_string());
            }
            Ok(configs
                .iter()
                .map(summary_line)
                .collect::<Vec<_>>()
                .join("\n"))
        }
        "show" => {
            if args.len() != 2 {
                return Err("usage: configs show <id|timestamp>".to_string());
            }
            let target = ConfigurationRef::parse(&args[1])?;
            let context = CommandContext::load()?;
            let config = context
                .gateway()?
                .find(&target)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("no configuration matches {target}"))?;
            serde_json::to_string_pretty(&config)
                .map_err(|e| format!("failed to encode configuration: {e}"))
        }
        "delete" => {
            if args.len() != 2 {
                return Err("usage: configs delete <id|timestamp>".to_string());
            }
            let target = ConfigurationRef::parse(&args[1])?;
            let context = CommandContext::load()?;
            let mut gateway = context.gateway()?;
            let removed = gateway.remove(&target).map_err(|e| e.to_string())?;
            if removed == 0 {
                return Err(format!("no configuration matches {target}"));
            }
            let remaining = gateway.load().map_err(|e| e.to_string())?.len();
            Ok(format!(
                "configuration deleted\nremoved={removed}\nremaining={remaining}"
            ))
        }
        other => Err(format!("unknown configs subcommand `{other}`")),
    }
}

fn summary_line(config: &Configuration) -> String {
    format!(
        "{} organization={} projects={} teams={} members={} saved_at={}",
        config.id,
        config.organization,
        config.projects.len(),
        config.team_count(),
        config.member_count(),
        format_millis(config.timestamp)
    )
}
