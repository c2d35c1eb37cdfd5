//! `skillforge tools`: map canonical tool names for a platform.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;

use super::OutputFormat;
use crate::config::CompilerConfig;
use crate::platform::Platform;
use crate::tools::ToolCatalog;

#[derive(Args, Debug)]
pub struct ToolsCommand {
    /// Canonical tool names, e.g. `Read Grep mcp__github__search`.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// Platform to map for.
    #[arg(short, long)]
    pub platform: Platform,

    /// Also print each tool's support on every platform.
    #[arg(long)]
    pub compat: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ToolsCommand {
    pub fn execute(self, config: &CompilerConfig) -> Result<()> {
        let catalog = ToolCatalog::with_overrides(config);
        let report = catalog.validate_tool_list(&self.names, self.platform);

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "platform": self.platform,
                    "valid": report.valid,
                    "mapped": report.mapped,
                    "unknownTools": report.unknown_tools,
                    "warnings": report.warnings,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Text => {
                println!("{} {}", format!("{}:", self.platform).bold(), report.mapped.join(", "));
                for tool in &report.unknown_tools {
                    println!("{} Unknown tool: {tool}", "✗".red());
                }
                for warning in &report.warnings {
                    println!("{} {warning}", "⚠".yellow());
                }
                if self.compat {
                    print_compatibility(&catalog, &self.names);
                }
            }
        }

        if report.valid {
            Ok(())
        } else {
            Err(anyhow!(
                "Unknown tools for {}: {}",
                self.platform,
                report.unknown_tools.join(", ")
            ))
        }
    }
}

fn print_compatibility(catalog: &ToolCatalog, names: &[String]) {
    for name in names {
        let Some(compat) = catalog.get_tool_compatibility(name) else {
            continue;
        };
        println!("\n{}{}", compat.canonical.bold(), if compat.safe { "" } else { " (unsafe)" });
        for platform in Platform::ALL {
            let line = match compat.support(platform).and_then(|s| s.name.clone()) {
                Some(name) => name,
                None => "not available".dimmed().to_string(),
            };
            println!("  {platform:<8} {line}");
        }
        if let Some(warning) = &compat.warning {
            println!("  {} {warning}", "⚠".yellow());
        }
    }
}
