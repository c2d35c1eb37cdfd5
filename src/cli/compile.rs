//! `skillforge compile`: compile spec files for one or more platforms.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::compiler::{CompileJob, CompiledArtifact, SpecCompiler};
use crate::config::CompilerConfig;
use crate::core::user_friendly_error;
use crate::platform::Platform;
use crate::spec::Spec;

/// Compile spec files into platform artifacts.
///
/// Without `--out-dir` the artifacts are printed to stdout; with it each one
/// is written to `<DIR>/<platform>/<name>.md`.
#[derive(Args, Debug)]
pub struct CompileCommand {
    /// Spec files to compile.
    #[arg(value_name = "SPEC", required = true)]
    pub specs: Vec<PathBuf>,

    /// Target platform. Repeat for several; defaults to all platforms.
    #[arg(short, long = "platform", value_name = "PLATFORM")]
    pub platforms: Vec<Platform>,

    /// Write artifacts under this directory instead of printing them.
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Compilations to run at once (default: from config, else CPU count).
    #[arg(long, value_name = "N")]
    pub max_parallel: Option<usize>,
}

impl CompileCommand {
    fn targets(&self) -> Vec<Platform> {
        if self.platforms.is_empty() {
            Platform::ALL.to_vec()
        } else {
            let mut targets = Vec::with_capacity(self.platforms.len());
            for platform in &self.platforms {
                if !targets.contains(platform) {
                    targets.push(*platform);
                }
            }
            targets
        }
    }

    pub async fn execute(self, config: CompilerConfig, quiet: bool) -> Result<()> {
        let mut specs = Vec::with_capacity(self.specs.len());
        for path in &self.specs {
            specs.push(Arc::new(Spec::load(path).await?));
        }

        let targets = self.targets();
        let mut jobs = Vec::with_capacity(specs.len() * targets.len());
        for spec in &specs {
            for &platform in &targets {
                jobs.push(CompileJob::for_platform(Arc::clone(spec), platform, &config));
            }
        }
        let total = jobs.len();
        let parallelism = self.max_parallel.unwrap_or_else(|| config.parallelism());

        let compiler = SpecCompiler::new(config);
        let results = compiler.compile_batch(jobs, parallelism).await?;

        let mut failures = 0;
        let mut artifacts = Vec::new();
        for result in results {
            match result {
                Ok(artifact) if !artifact.validation.valid => {
                    failures += 1;
                    eprintln!(
                        "{} {} for {} produced invalid frontmatter",
                        "✗".red(),
                        artifact.spec,
                        artifact.platform
                    );
                    for issue in &artifact.validation.errors {
                        eprintln!("    {issue}");
                    }
                }
                Ok(artifact) => artifacts.push(artifact),
                Err(e) => {
                    failures += 1;
                    user_friendly_error(anyhow::Error::from(e)).display();
                }
            }
        }

        match &self.out_dir {
            Some(dir) => {
                for artifact in &artifacts {
                    let path = write_artifact(dir, artifact).await?;
                    if !quiet {
                        println!("{} {} ({})", "✓".green(), path.display(), artifact.prompt_length);
                    }
                }
            }
            None => print_artifacts(&artifacts),
        }

        if failures > 0 {
            return Err(anyhow!("{failures} of {total} compilations failed"));
        }
        Ok(())
    }
}

/// Output path of an artifact under `dir`.
pub(super) fn artifact_path(dir: &Path, artifact: &CompiledArtifact) -> PathBuf {
    dir.join(artifact.platform.as_str()).join(format!("{}.md", artifact.spec))
}

async fn write_artifact(dir: &Path, artifact: &CompiledArtifact) -> Result<PathBuf> {
    let path = artifact_path(dir, artifact);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(&path, &artifact.text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}

fn print_artifacts(artifacts: &[CompiledArtifact]) {
    match artifacts {
        [single] => print!("{}", single.text),
        many => {
            for (i, artifact) in many.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("==> {}/{}.md <==", artifact.platform, artifact.spec);
                print!("{}", artifact.text);
                if !artifact.text.ends_with('\n') {
                    println!();
                }
            }
        }
    }
}
