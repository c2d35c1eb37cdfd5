use anyhow::Result;
use skillforge::compiler::SpecCompiler;
use skillforge::config::CompilerConfig;
use skillforge::platform::Platform;
use skillforge::spec::Spec;
use skillforge::test_utils::fixed_context;

const CONFIG: &str = r#"
version = "2.1.0"
project_name = "acme-agents"

[variables]
docsUrl = "https://docs.example.com"
maxRetries = 3

[tools.Notebook]
claude = "NotebookEdit"
copilot = "edit"
codex = false
warning = "Notebook editing differs between platforms"
safe = false

[tools.WebFetch]
codex = "fetch"
"#;

const SPEC: &str = "---
name: gsd-researcher
tools: [Read, Notebook, WebFetch]
---

See {{docsUrl}} and retry {{maxRetries}} times (v{{version}}).
";

fn compile(platform: Platform) -> Result<skillforge::compiler::CompiledArtifact> {
    let config = CompilerConfig::from_toml_str(CONFIG)?;
    let spec = Spec::parse("gsd-researcher", SPEC)?;
    let ctx = fixed_context(platform, &config);
    Ok(SpecCompiler::new(config).compile(&spec, platform, &ctx)?)
}

#[test]
fn test_config_variables_reach_templates() -> Result<()> {
    let artifact = compile(Platform::Claude)?;
    assert!(
        artifact
            .text
            .ends_with("See https://docs.example.com and retry 3 times (v2.1.0).\n")
    );
    Ok(())
}

#[test]
fn test_tool_overrides_per_platform() -> Result<()> {
    let claude = compile(Platform::Claude)?;
    assert!(claude.text.contains("tools:\n  - Read\n  - NotebookEdit\n  - WebFetch\n"));

    let copilot = compile(Platform::Copilot)?;
    assert!(copilot.text.contains("tools: ['read', 'edit']\n"));
    assert!(copilot.tool_warnings.iter().any(|w| w.contains("Notebook editing")));

    let codex = compile(Platform::Codex)?;
    assert!(codex.text.contains("tools: ['read', 'fetch']\n"));
    Ok(())
}

#[test]
fn test_project_fields_in_metadata() -> Result<()> {
    let artifact = compile(Platform::Codex)?;
    assert!(artifact.text.contains("  projectVersion: '2.1.0'\n"));
    assert!(artifact.text.contains("  projectName: acme-agents\n"));
    Ok(())
}

#[test]
fn test_unknown_config_keys_rejected() {
    assert!(CompilerConfig::from_toml_str("colour = \"red\"\n").is_err());
}
