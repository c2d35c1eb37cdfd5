use anyhow::Result;
use skillforge::compiler::{PromptStatus, SpecCompiler};
use skillforge::core::{CompileError, Stage};
use skillforge::frontmatter::validator::validate;
use skillforge::platform::Platform;
use skillforge::spec::Spec;
use skillforge::test_utils::{fixed_context, init_test_logging, test_config};
use skillforge::value::{FrontmatterDocument, Value};

use crate::common::PLANNER_SPEC;

fn compile(content: &str, platform: Platform) -> Result<String, CompileError> {
    let config = test_config();
    let spec = Spec::parse("gsd-planner", content)?;
    let compiler = SpecCompiler::new(config.clone());
    compiler
        .compile(&spec, platform, &fixed_context(platform, &config))
        .map(|artifact| artifact.text)
}

/// Frontmatter text between the delimiters.
fn frontmatter_of(text: &str) -> &str {
    let rest = text.strip_prefix("---\n").unwrap_or(text);
    rest.split_once("\n---\n").map_or(rest, |(fm, _)| fm)
}

#[test]
fn test_planner_for_claude() -> Result<()> {
    init_test_logging(None);
    let text = compile(PLANNER_SPEC, Platform::Claude)?;
    assert_eq!(
        text,
        "---
name: gsd-planner
description: Creates executable phase plans
tools:
  - Read
  - Write
  - Bash
  - Grep
  - Glob
  - WebFetch
skills:
  - gsd-planning
model: opus
color: green
---

# Planner

Run /gsd-plan-phase to start. Files live under .claude.
"
    );
    Ok(())
}

#[test]
fn test_planner_for_copilot() -> Result<()> {
    let text = compile(PLANNER_SPEC, Platform::Copilot)?;
    assert_eq!(
        text,
        "---
name: gsd-planner
description: Creates executable phase plans
tools: ['read', 'edit', 'execute', 'search']
metadata:
  platform: copilot
  generated: '2026-01-28'
  templateVersion: '1.0.0'
  projectVersion: '1.8.1'
  projectName: get-shit-done
---

# Planner

Run /gsd-plan-phase to start. Files live under .github.
"
    );
    Ok(())
}

#[test]
fn test_planner_for_codex() -> Result<()> {
    let text = compile(PLANNER_SPEC, Platform::Codex)?;
    assert!(text.contains("tools: ['read', 'edit', 'execute', 'search']\n"));
    assert!(text.contains("  platform: codex\n"));
    assert!(!text.contains("skills"));
    assert!(!text.contains("model"));
    assert!(text.ends_with("Run $gsd-plan-phase to start. Files live under .codex.\n"));
    Ok(())
}

#[test]
fn test_every_artifact_round_trips() -> Result<()> {
    let tricky = "---
name: gsd-debug
description: 'Debug: find root causes #fast'
argument-hint: [issue, '--verbose']
tools: [Read, Bash, mcp__github__search_issues]
hooks: {}
version-pin: '2.0'
empty: ''
none: null
enabled: false
retries: 0
---
Body
";
    for platform in Platform::ALL {
        let config = test_config();
        let spec = Spec::parse("gsd-debug", tricky)?;
        let artifact = SpecCompiler::new(config.clone()).compile(
            &spec,
            platform,
            &fixed_context(platform, &config),
        )?;

        let fm = frontmatter_of(&artifact.text);
        assert!(validate(fm).valid, "{platform}: {fm}");
        let parsed: serde_yaml::Value = serde_yaml::from_str(fm)?;
        assert_eq!(
            parsed,
            serde_yaml::Value::Mapping(artifact.frontmatter.to_yaml_mapping()),
            "{platform}"
        );
    }
    Ok(())
}

#[test]
fn test_cleaning_and_argument_hint() -> Result<()> {
    let text = compile(
        "---\nname: x\nargument-hint: [phase, '--dry-run']\nempty: ''\nnone: null\nenabled: false\nretries: 0\ntools: []\n---\n",
        Platform::Claude,
    )?;
    let fm = frontmatter_of(&text);
    assert_eq!(fm, "name: x\nargument-hint: '[phase, --dry-run]'\nenabled: false\nretries: 0");
    Ok(())
}

#[test]
fn test_mcp_tools_pass_through() -> Result<()> {
    let content = "---\nname: x\ntools: [mcp__github__search, Read]\n---\n";
    assert!(compile(content, Platform::Claude)?.contains("  - mcp__github__search\n  - Read"));
    assert!(compile(content, Platform::Codex)?.contains("tools: ['mcp__github__search', 'read']"));
    Ok(())
}

#[test]
fn test_failures_carry_spec_and_platform() {
    let err = compile("---\nname: x\n---\n{{#isCodex}}unterminated", Platform::Copilot).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'gsd-planner'"));
    assert!(message.contains("copilot"));
    assert!(matches!(err, CompileError::Stage { stage: Stage::RenderBody, .. }));

    let err = compile("---\ntools: [Read, Telepathy]\n---\n", Platform::Claude).unwrap_err();
    assert!(err.to_string().contains("Telepathy"));
}

#[test]
fn test_spec_built_from_document() -> Result<()> {
    let doc = FrontmatterDocument::new()
        .with("name", "gsd-verifier")
        .with("tools", vec!["Read", "Grep", "Glob"])
        .with("skills", Value::Sequence(Vec::new()));
    let spec = Spec::from_document("gsd-verifier", &doc, "Verify.\n")?;

    let config = test_config();
    let artifact = SpecCompiler::new(config.clone()).compile(
        &spec,
        Platform::Claude,
        &fixed_context(Platform::Claude, &config),
    )?;
    assert_eq!(
        artifact.text,
        "---\nname: gsd-verifier\ntools:\n  - Read\n  - Grep\n  - Glob\n---\n\nVerify.\n"
    );
    Ok(())
}

#[test]
fn test_prompt_length_report_attached() -> Result<()> {
    let config = test_config();
    let body = "x".repeat(29_000);
    let spec = Spec::parse("big", &format!("---\nname: big\n---\n{body}"))?;
    let compiler = SpecCompiler::new(config.clone());

    let copilot =
        compiler.compile(&spec, Platform::Copilot, &fixed_context(Platform::Copilot, &config))?;
    assert_eq!(copilot.prompt_length.status, PromptStatus::Warning);

    let claude =
        compiler.compile(&spec, Platform::Claude, &fixed_context(Platform::Claude, &config))?;
    assert_eq!(claude.prompt_length.status, PromptStatus::Ok);
    Ok(())
}
