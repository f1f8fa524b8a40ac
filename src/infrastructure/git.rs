//! git CLI 기반 소스 관리 구현.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::{CommandRunner, FetchSpec, SourceControl};
use crate::infrastructure::process::TokioCommandRunner;

const REMOTE: &str = "origin";

/// `git` 명령을 실행해 작업 트리를 조작한다.
pub struct GitCli<R = TokioCommandRunner> {
    runner: R,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(TokioCommandRunner)
    }
}

impl<R: CommandRunner> GitCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn git(&self, workdir: &Path, args: &[&str]) -> Result<()> {
        let mut command = Vec::with_capacity(args.len() + 1);
        command.push("git".to_string());
        command.extend(args.iter().map(|a| a.to_string()));
        self.runner.run(workdir, &command).await?;
        Ok(())
    }
}

/// fetch 티어별 git 인자.
pub fn fetch_args(tier: &FetchSpec) -> Vec<&str> {
    match tier {
        FetchSpec::Ref(git_ref) => vec!["fetch", REMOTE, git_ref.as_str(), "--depth=1"],
        FetchSpec::Revision(id) => vec!["fetch", REMOTE, id.as_str(), "--depth=1"],
        FetchSpec::All => vec!["fetch", REMOTE],
    }
}

#[async_trait]
impl<R: CommandRunner> SourceControl for GitCli<R> {
    async fn fetch(&self, workdir: &Path, tier: &FetchSpec) -> Result<()> {
        self.git(workdir, &fetch_args(tier)).await
    }

    async fn reset_hard(&self, workdir: &Path, target: &str) -> Result<()> {
        self.git(workdir, &["reset", "--hard", target]).await
    }

    async fn discard_changes(&self, workdir: &Path) -> Result<()> {
        self.git(workdir, &["reset", "--hard"]).await
    }
}
