//! 외부 명령(패키지 매니저/git/셸 스크립트) 실행기.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{CommandOutput, CommandRunner};

/// tokio 프로세스 기반 실행기. 완료될 때까지 기다리며 타임아웃은 두지 않는다.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    async fn execute(&self, workdir: &Path, program: &str, args: &[String]) -> Result<CommandOutput> {
        let command_line = display_command(program, args);
        tracing::debug!(cwd = %workdir.display(), "running {command_line}");

        let output = Command::new(program)
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("failed to spawn '{command_line}'"))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            bail!(
                "'{}' failed ({}): {}",
                command_line,
                output.status,
                if stderr.is_empty() {
                    "no stderr output"
                } else {
                    stderr.as_str()
                }
            );
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, workdir: &Path, command: &[String]) -> Result<CommandOutput> {
        let (program, args) = command
            .split_first()
            .map(|(p, a)| (p.trim(), a))
            .filter(|(p, _)| !p.is_empty())
            .context("command is empty")?;
        self.execute(workdir, program, args).await
    }

    async fn run_shell(&self, workdir: &Path, script: &str) -> Result<CommandOutput> {
        if script.trim().is_empty() {
            bail!("script is empty");
        }
        let args = vec!["-c".to_string(), script.to_string()];
        self.execute(workdir, "sh", &args).await
    }
}

fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
