use anyhow::Result;
use predicates::prelude::*;

use crate::common::{PLANNER_SPEC, TestProject};

#[test]
fn test_compile_to_stdout() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("specs/gsd-planner.md", PLANNER_SPEC)?;

    project
        .command()?
        .args(["compile", "specs/gsd-planner.md", "--platform", "codex"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\nname: gsd-planner\n"))
        .stdout(predicate::str::contains("tools: ['read', 'edit', 'execute', 'search']"))
        .stdout(predicate::str::contains("  sourceSpec: specs/gsd-planner.md"))
        .stdout(predicate::str::contains("Run $gsd-plan-phase to start."))
        .stdout(predicate::str::contains("==>").not());
    Ok(())
}

#[test]
fn test_compile_all_platforms_to_out_dir() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("specs/gsd-planner.md", PLANNER_SPEC)?;

    let output = project.run(&["compile", "specs/gsd-planner.md", "--out-dir", "dist"])?;
    assert!(output.success, "stderr: {}", output.stderr);
    assert_eq!(output.stdout.matches('✓').count(), 3);

    let claude = project.read_file("dist/claude/gsd-planner.md")?;
    assert!(claude.contains("tools:\n  - Read\n"));
    assert!(claude.contains("model: opus"));
    assert!(!claude.contains("metadata:"));

    let copilot = project.read_file("dist/copilot/gsd-planner.md")?;
    assert!(copilot.contains("tools: ['read', 'edit', 'execute', 'search']"));
    assert!(copilot.contains("  platform: copilot"));

    let codex = project.read_file("dist/codex/gsd-planner.md")?;
    assert!(codex.contains("Run $gsd-plan-phase"));
    Ok(())
}

#[test]
fn test_compile_quiet_prints_nothing_on_success() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("specs/gsd-planner.md", PLANNER_SPEC)?;

    project
        .command()?
        .args(["--quiet", "compile", "specs/gsd-planner.md", "-p", "claude", "-o", "dist"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(project.path().join("dist/claude/gsd-planner.md").exists());
    Ok(())
}

#[test]
fn test_compile_multiple_artifacts_to_stdout_are_labelled() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("specs/gsd-planner.md", PLANNER_SPEC)?;

    project
        .command()?
        .args(["compile", "specs/gsd-planner.md", "-p", "claude", "-p", "copilot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("==> claude/gsd-planner.md <=="))
        .stdout(predicate::str::contains("==> copilot/gsd-planner.md <=="));
    Ok(())
}

#[test]
fn test_undefined_variable_fails_with_suggestion() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("specs/typo.md", "---\nname: typo\n---\nUse {{comandPrefix}}help\n")?;

    project
        .command()?
        .args(["compile", "specs/typo.md", "-p", "claude"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("comandPrefix"))
        .stderr(predicate::str::contains("commandPrefix"))
        .stderr(predicate::str::contains("1 of 1 compilations failed"));
    Ok(())
}

#[test]
fn test_failure_isolated_per_spec() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("specs/gsd-planner.md", PLANNER_SPEC)?;
    project.write_file("specs/broken.md", "---\nname: broken\ntools: [Teleport]\n---\n")?;

    let output = project.run(&[
        "compile",
        "specs/gsd-planner.md",
        "specs/broken.md",
        "-p",
        "copilot",
        "--out-dir",
        "dist",
    ])?;
    assert!(!output.success);
    assert!(output.stderr.contains("Teleport"), "stderr: {}", output.stderr);
    assert!(output.stderr.contains("1 of 2 compilations failed"));
    assert!(project.path().join("dist/copilot/gsd-planner.md").exists());
    assert!(!project.path().join("dist/copilot/broken.md").exists());
    Ok(())
}

#[test]
fn test_missing_spec_file() -> Result<()> {
    let project = TestProject::new()?;
    project
        .command()?
        .args(["compile", "specs/nope.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read spec"));
    Ok(())
}

#[test]
fn test_unknown_platform_is_a_usage_error() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("specs/gsd-planner.md", PLANNER_SPEC)?;
    project
        .command()?
        .args(["compile", "specs/gsd-planner.md", "--platform", "cursor"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cursor"));
    Ok(())
}

#[test]
fn test_config_file_applies() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("version = \"3.0.0\"\n[variables]\nteam = \"platform-eng\"\n")?;
    project.write_file("specs/owned.md", "---\nname: owned\n---\nOwned by {{team}} at v{{version}}.\n")?;

    project
        .command()?
        .args(["compile", "specs/owned.md", "-p", "copilot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  projectVersion: '3.0.0'"))
        .stdout(predicate::str::contains("Owned by platform-eng at v3.0.0."));
    Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("version = [unclosed\n")?;
    project.write_file("specs/gsd-planner.md", PLANNER_SPEC)?;

    project
        .command()?
        .args(["compile", "specs/gsd-planner.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOML"));
    Ok(())
}
