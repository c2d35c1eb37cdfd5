use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_check_valid_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("agent.md", "---\nname: gsd-planner\ntools: ['read', 'search']\n---\n\nBody\n")?;

    project
        .command()?
        .args(["check", "agent.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frontmatter is valid"));
    Ok(())
}

#[test]
fn test_check_invalid_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("agent.md", "---\nname: x\ntools: [Bash, Read\n---\n\nBody\n")?;

    project
        .command()?
        .args(["check", "agent.md"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid frontmatter"))
        .stderr(predicate::str::contains("agent.md has invalid frontmatter"));
    Ok(())
}

#[test]
fn test_check_json_output() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("agent.md", "---\ntools: [Bash, Read\n---\n")?;

    let output = project.run(&["check", "agent.md", "--format", "json"])?;
    assert!(!output.success);

    let report: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["valid"], serde_json::Value::Bool(false));
    let line = report["errors"][0]["line"].as_u64();
    assert!(line.is_some_and(|line| line >= 2), "report: {report}");
    Ok(())
}

#[test]
fn test_check_file_without_frontmatter() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("notes.md", "# Just notes\n")?;

    project.command()?.args(["check", "notes.md"]).assert().success();
    Ok(())
}

#[test]
fn test_check_non_mapping_frontmatter() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("list.md", "---\n- a\n- b\n---\n")?;

    project.command()?.args(["check", "list.md"]).assert().failure();
    Ok(())
}
