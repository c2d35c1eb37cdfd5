use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_tools_maps_and_collapses() -> Result<()> {
    let project = TestProject::new()?;
    project
        .command()?
        .args(["tools", "Read", "Grep", "Glob", "WebFetch", "--platform", "codex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("codex: read, search\n"))
        .stdout(predicate::str::contains("WebFetch"));
    Ok(())
}

#[test]
fn test_tools_reports_every_unknown_tool() -> Result<()> {
    let project = TestProject::new()?;
    project
        .command()?
        .args(["tools", "Teleport", "Read", "Telepathy", "-p", "claude"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown tool: Teleport"))
        .stdout(predicate::str::contains("Unknown tool: Telepathy"));
    Ok(())
}

#[test]
fn test_tools_json() -> Result<()> {
    let project = TestProject::new()?;
    let output =
        project.run(&["tools", "Bash", "mcp__github__search", "-p", "copilot", "--format", "json"])?;
    assert!(output.success, "stderr: {}", output.stderr);

    let report: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["platform"], "copilot");
    assert_eq!(report["mapped"], serde_json::json!(["execute", "mcp__github__search"]));
    assert_eq!(report["unknownTools"], serde_json::json!([]));
    Ok(())
}

#[test]
fn test_tools_compat_table() -> Result<()> {
    let project = TestProject::new()?;
    project
        .command()?
        .args(["tools", "WebSearch", "-p", "claude", "--compat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WebSearch (unsafe)"))
        .stdout(predicate::str::contains("copilot  not available"));
    Ok(())
}

#[test]
fn test_tools_use_config_overrides() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("[tools.Notebook]\nclaude = \"NotebookEdit\"\n")?;
    project
        .command()?
        .args(["tools", "Notebook", "-p", "claude"])
        .assert()
        .success()
        .stdout(predicate::str::contains("claude: NotebookEdit"));
    Ok(())
}
