//! CLI 명령 파싱 모듈.

use std::env;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::config::{Config, DefaultsConfig};
use crate::application::usecases::compare_deps::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "wpdeps")]
#[command(about = "Compare WordPress asset dependencies between a change and its base revision")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build both revisions, diff their asset manifests and post the report (default)
    Run(RunArgs),
    /// Show effective merged config and tool availability
    Config,
    /// Print the dependency snapshot of the current working tree as JSON
    Snapshot(SnapshotArgs),
}

#[derive(Debug, Args, Default)]
struct SnapshotArgs {
    /// Manifest glob, relative to the working directory
    #[arg(long)]
    pattern: Option<String>,

    /// Glob of paths to skip; `{a,b}` lists alternatives
    #[arg(long)]
    exclude: Option<String>,

    /// Working directory, relative to the current directory
    #[arg(long)]
    cwd: Option<String>,
}

#[derive(Debug, Args, Default)]
struct RunArgs {
    #[command(flatten)]
    snapshot: SnapshotArgs,

    /// Package script that produces the asset manifests
    #[arg(long)]
    build_script: Option<String>,

    /// Shell command run after checking out the base revision
    #[arg(long)]
    clean_script: Option<String>,

    /// Fold unchanged assets into a <details> block
    #[arg(long)]
    collapse_unchanged: bool,

    /// Leave unchanged assets out of the report
    #[arg(long)]
    omit_unchanged: bool,

    /// Print the report instead of posting it
    #[arg(long)]
    dry_run: bool,
}

pub enum CliAction {
    InspectConfig,
    InspectSnapshot { overrides: Config, base_dir: PathBuf },
    Run(RunOptions),
}

impl SnapshotArgs {
    fn overrides(self) -> DefaultsConfig {
        DefaultsConfig {
            pattern: self.pattern,
            exclude: self.exclude,
            cwd: self.cwd,
            ..DefaultsConfig::default()
        }
    }
}

impl RunArgs {
    /// 지정된 플래그만 설정 위에 덮어쓴다. 꺼진 bool 플래그는 미지정으로 둔다.
    fn into_options(self, base_dir: PathBuf) -> RunOptions {
        let defaults = DefaultsConfig {
            build_script: self.build_script,
            clean_script: self.clean_script,
            collapse_unchanged: self.collapse_unchanged.then_some(true),
            omit_unchanged: self.omit_unchanged.then_some(true),
            ..self.snapshot.overrides()
        };

        RunOptions {
            overrides: Config {
                defaults,
                ..Config::default()
            },
            base_dir,
            dry_run: self.dry_run,
        }
    }
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        let base_dir = match self.command {
            Some(Commands::Config) => return Ok(CliAction::InspectConfig),
            _ => env::current_dir()
                .map_err(|err| format!("failed to read current directory: {err}"))?,
        };

        Ok(match self.command {
            Some(Commands::Snapshot(args)) => CliAction::InspectSnapshot {
                overrides: Config {
                    defaults: args.overrides(),
                    ..Config::default()
                },
                base_dir,
            },
            Some(Commands::Run(args)) => CliAction::Run(args.into_options(base_dir)),
            _ => CliAction::Run(self.run.into_options(base_dir)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> CliAction {
        Cli::try_parse_from(args).unwrap().into_action().unwrap()
    }

    #[test]
    fn bare_invocation_runs_with_no_overrides() {
        let CliAction::Run(options) = action(&["wpdeps"]) else {
            panic!("expected run");
        };
        assert_eq!(options.overrides, Config::default());
        assert!(!options.dry_run);
    }

    #[test]
    fn run_flags_become_overrides() {
        let CliAction::Run(options) = action(&[
            "wpdeps",
            "run",
            "--pattern",
            "build/*.asset.php",
            "--clean-script",
            "rm -rf build",
            "--omit-unchanged",
            "--dry-run",
        ]) else {
            panic!("expected run");
        };
        let defaults = &options.overrides.defaults;
        assert_eq!(defaults.pattern.as_deref(), Some("build/*.asset.php"));
        assert_eq!(defaults.clean_script.as_deref(), Some("rm -rf build"));
        assert_eq!(defaults.omit_unchanged, Some(true));
        assert_eq!(defaults.collapse_unchanged, None);
        assert!(options.dry_run);
    }

    #[test]
    fn top_level_flags_work_without_subcommand() {
        let CliAction::Run(options) = action(&["wpdeps", "--cwd", "plugin", "--collapse-unchanged"])
        else {
            panic!("expected run");
        };
        assert_eq!(options.overrides.defaults.cwd.as_deref(), Some("plugin"));
        assert_eq!(options.overrides.defaults.collapse_unchanged, Some(true));
    }

    #[test]
    fn config_and_snapshot_subcommands() {
        assert!(matches!(action(&["wpdeps", "config"]), CliAction::InspectConfig));

        let CliAction::InspectSnapshot { overrides, .. } =
            action(&["wpdeps", "snapshot", "--exclude", "**/vendor/**"])
        else {
            panic!("expected snapshot");
        };
        assert_eq!(overrides.defaults.exclude.as_deref(), Some("**/vendor/**"));
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        assert!(Cli::try_parse_from(["wpdeps", "--force"]).is_err());
    }
}
