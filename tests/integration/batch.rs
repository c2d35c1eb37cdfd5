use anyhow::Result;
use skillforge::compiler::{CompileJob, SpecCompiler};
use skillforge::core::{CompileError, Stage};
use skillforge::platform::Platform;
use skillforge::spec::Spec;
use skillforge::test_utils::{fixed_context, test_config};
use std::sync::Arc;

use crate::common::PLANNER_SPEC;

fn job(spec: &Arc<Spec>, platform: Platform) -> CompileJob {
    CompileJob {
        spec: Arc::clone(spec),
        platform,
        context: fixed_context(platform, &test_config()),
    }
}

#[tokio::test]
async fn test_batch_matches_sequential_compilation() -> Result<()> {
    let config = test_config();
    let compiler = SpecCompiler::new(config);
    let spec = Arc::new(Spec::parse("gsd-planner", PLANNER_SPEC)?);

    let jobs: Vec<_> = (0..12).map(|i| job(&spec, Platform::ALL[i % 3])).collect();
    let results = compiler.compile_batch(jobs.clone(), 4).await?;

    assert_eq!(results.len(), jobs.len());
    for (job, result) in jobs.iter().zip(results) {
        let artifact = result?;
        let sequential = compiler.compile(&job.spec, job.platform, &job.context)?;
        assert_eq!(artifact.platform, job.platform);
        assert_eq!(artifact.text, sequential.text);
    }
    Ok(())
}

#[tokio::test]
async fn test_one_failure_does_not_abort_the_batch() -> Result<()> {
    let compiler = SpecCompiler::new(test_config());
    let good = Arc::new(Spec::parse("gsd-planner", PLANNER_SPEC)?);
    let bad_tool = Arc::new(Spec::parse("gsd-broken", "---\ntools: [Teleport]\n---\n")?);

    let jobs = vec![
        job(&good, Platform::Claude),
        job(&bad_tool, Platform::Copilot),
        job(&good, Platform::Codex),
    ];
    let results = compiler.compile_batch(jobs, 8).await?;

    assert!(results[0].is_ok());
    assert!(results[2].is_ok());
    match &results[1] {
        Err(CompileError::Stage {
            spec,
            platform,
            stage,
            ..
        }) => {
            assert_eq!(spec, "gsd-broken");
            assert_eq!(*platform, Platform::Copilot);
            assert_eq!(*stage, Stage::MapTools);
        }
        other => panic!("expected a stage error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_zero_parallelism_still_runs() -> Result<()> {
    let compiler = SpecCompiler::new(test_config());
    let spec = Arc::new(Spec::parse("gsd-planner", PLANNER_SPEC)?);
    let results = compiler.compile_batch(vec![job(&spec, Platform::Claude)], 0).await?;
    assert_eq!(results.len(), 1);
    assert!(results[0].is_ok());
    Ok(())
}
