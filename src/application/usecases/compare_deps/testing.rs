//! 유스케이스 테스트용 인메모리 포트 구현.

use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::application::config::Config;
use crate::application::ports::{
    CommandOutput, CommandRunner, CommentGateway, CommentGatewayFactory, ConfigRepository,
    EventSource, FetchSpec, PackageManagerDetector, ReportRenderer, Reporter, SnapshotReader,
    SourceControl, TokenResolver,
};
use crate::application::usecases::compare_deps::CompareDependenciesUseCase;
use crate::domain::error::RunError;
use crate::domain::package_manager::PackageManagerProfile;
use crate::domain::policy::report_marker;
use crate::domain::report::{IssueComment, RenderOptions};
use crate::domain::snapshot::{AssetManifest, ChangeRecord, DependencySnapshot};
use crate::domain::trigger::{PullRequestEvent, RepositoryRef, TriggerContext, TriggerEvent};

/// 트리거 입력 시나리오.
pub struct Fixture {
    event: std::result::Result<TriggerContext, String>,
}

impl Fixture {
    pub fn pull_request() -> Self {
        Self {
            event: Ok(TriggerContext {
                event: TriggerEvent::PullRequest(PullRequestEvent {
                    base_sha: "b4se".to_string(),
                    base_ref: "trunk".to_string(),
                    number: 42,
                    head_sha: "he4d".to_string(),
                }),
                repository: RepositoryRef::parse("octo/plugin"),
            }),
        }
    }

    pub fn push() -> Self {
        Self {
            event: Ok(TriggerContext {
                event: TriggerEvent::Push {
                    before: "abc123".to_string(),
                    git_ref: "main".to_string(),
                },
                repository: RepositoryRef::parse("octo/plugin"),
            }),
        }
    }

    pub fn unsupported(name: &str) -> Self {
        Self {
            event: Err(name.to_string()),
        }
    }
}

pub struct Harness {
    config_repo: StaticConfig,
    tokens: StaticToken,
    events: FixtureEvents,
    pub commands: FakeCommands,
    pub source_control: FakeSourceControl,
    pub detector: ScriptedDetector,
    snapshots: QueuedSnapshots,
    renderer: MarkerRenderer,
    factory: FakeGatewayFactory,
    pub gateway: FakeGateway,
    pub reporter: RecordingReporter,
}

impl Harness {
    pub fn new(fixture: Fixture) -> Self {
        let gateway = FakeGateway::default();
        Self {
            config_repo: StaticConfig,
            tokens: StaticToken,
            events: FixtureEvents(fixture),
            commands: FakeCommands::default(),
            source_control: FakeSourceControl::default(),
            detector: ScriptedDetector::default(),
            snapshots: QueuedSnapshots::current_then_base(),
            renderer: MarkerRenderer,
            factory: FakeGatewayFactory(gateway.clone()),
            gateway,
            reporter: RecordingReporter::default(),
        }
    }

    pub fn use_case(&self) -> CompareDependenciesUseCase<'_> {
        CompareDependenciesUseCase {
            config_repo: &self.config_repo,
            token_resolver: &self.tokens,
            event_source: &self.events,
            commands: &self.commands,
            source_control: &self.source_control,
            detector: &self.detector,
            snapshot_reader: &self.snapshots,
            renderer: &self.renderer,
            gateway_factory: &self.factory,
            reporter: &self.reporter,
        }
    }
}

struct StaticConfig;

impl ConfigRepository for StaticConfig {
    fn load(&self) -> Result<Config> {
        Ok(Config::default())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Ok("{}".to_string())
    }
}

struct StaticToken;

impl TokenResolver for StaticToken {
    fn resolve(&self, _config: &Config) -> Option<String> {
        Some("token".to_string())
    }
}

struct FixtureEvents(Fixture);

impl EventSource for FixtureEvents {
    fn load(&self) -> Result<TriggerContext> {
        match &self.0.event {
            Ok(ctx) => Ok(ctx.clone()),
            Err(name) => Err(RunError::UnsupportedTrigger(name.clone()).into()),
        }
    }
}

#[derive(Default)]
pub struct FakeCommands {
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
}

impl FakeCommands {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_on(&self, command_line: &str) {
        self.failing.lock().unwrap().insert(command_line.to_string());
    }

    fn record(&self, line: String) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(line.clone());
        if self.failing.lock().unwrap().contains(&line) {
            bail!("{line} exited with status 1");
        }
        Ok(CommandOutput::default())
    }
}

#[async_trait]
impl CommandRunner for FakeCommands {
    async fn run(&self, _workdir: &Path, command: &[String]) -> Result<CommandOutput> {
        self.record(command.join(" "))
    }

    async fn run_shell(&self, _workdir: &Path, script: &str) -> Result<CommandOutput> {
        self.record(format!("sh -c {script}"))
    }
}

#[derive(Default)]
pub struct FakeSourceControl {
    calls: Mutex<Vec<String>>,
    failing_fetches: Mutex<Vec<FetchSpec>>,
    failing_resets: Mutex<HashSet<String>>,
}

impl FakeSourceControl {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_fetch(&self, tier: FetchSpec) {
        self.failing_fetches.lock().unwrap().push(tier);
    }

    pub fn fail_reset(&self, target: &str) {
        self.failing_resets.lock().unwrap().insert(target.to_string());
    }
}

#[async_trait]
impl SourceControl for FakeSourceControl {
    async fn fetch(&self, _workdir: &Path, tier: &FetchSpec) -> Result<()> {
        self.calls.lock().unwrap().push(format!("fetch {tier:?}"));
        if self.failing_fetches.lock().unwrap().contains(tier) {
            bail!("couldn't find remote ref");
        }
        Ok(())
    }

    async fn reset_hard(&self, _workdir: &Path, target: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("reset {target}"));
        if self.failing_resets.lock().unwrap().contains(target) {
            bail!("unknown revision '{target}'");
        }
        Ok(())
    }

    async fn discard_changes(&self, _workdir: &Path) -> Result<()> {
        self.calls.lock().unwrap().push("discard".to_string());
        Ok(())
    }
}

/// 호출 순서대로 준비된 lockfile을 "발견"한다. 준비된 값이 없으면 lockfile이 없는 것으로 본다.
#[derive(Default)]
pub struct ScriptedDetector {
    lockfiles: Mutex<VecDeque<&'static str>>,
}

impl ScriptedDetector {
    pub fn then_found(&self, lockfile: &'static str) -> &Self {
        self.lockfiles.lock().unwrap().push_back(lockfile);
        self
    }
}

impl PackageManagerDetector for ScriptedDetector {
    fn detect(&self, _workdir: &Path) -> PackageManagerProfile {
        let next = self.lockfiles.lock().unwrap().pop_front();
        PackageManagerProfile::detect(|file| Some(file) == next)
    }
}

/// 첫 호출은 현재 리비전, 두 번째 호출은 base 리비전 스냅샷을 돌려준다.
struct QueuedSnapshots(Mutex<VecDeque<DependencySnapshot>>);

impl QueuedSnapshots {
    fn current_then_base() -> Self {
        let manifest = |deps: &[&str], fingerprint: &str| AssetManifest {
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            fingerprint: fingerprint.to_string(),
        };
        let current = DependencySnapshot::from([("a.js".to_string(), manifest(&["x", "y"], "H1"))]);
        let base = DependencySnapshot::from([("a.js".to_string(), manifest(&["x"], "H2"))]);
        Self(Mutex::new(VecDeque::from([current, base])))
    }
}

impl SnapshotReader for QueuedSnapshots {
    fn read(&self, _workdir: &Path, _pattern: &str, _exclude: &str) -> Result<DependencySnapshot> {
        Ok(self.0.lock().unwrap().pop_front().unwrap_or_default())
    }
}

struct MarkerRenderer;

impl ReportRenderer for MarkerRenderer {
    fn render(&self, records: &[ChangeRecord], _options: RenderOptions) -> String {
        format!("{}\n{} assets", report_marker(), records.len())
    }
}

struct FakeGatewayFactory(FakeGateway);

impl CommentGatewayFactory for FakeGatewayFactory {
    fn build(
        &self,
        _repository: &RepositoryRef,
        _config: &Config,
        _token: String,
    ) -> Result<Box<dyn CommentGateway>> {
        Ok(Box::new(self.0.clone()))
    }
}

#[derive(Default)]
struct GatewayState {
    comments: Vec<IssueComment>,
    calls: Vec<String>,
    created: Vec<String>,
    failing: HashSet<&'static str>,
}

/// 호출 기록을 공유하는 코멘트 API 가짜 구현.
#[derive(Clone, Default)]
pub struct FakeGateway(Arc<Mutex<GatewayState>>);

impl FakeGateway {
    pub fn with_comments(comments: Vec<IssueComment>) -> Self {
        let gateway = Self::default();
        gateway.0.lock().unwrap().comments = comments;
        gateway
    }

    pub fn fail(&self, operation: &'static str) {
        self.0.lock().unwrap().failing.insert(operation);
    }

    pub fn fail_all(&self) {
        for op in ["list", "update", "create", "review"] {
            self.fail(op);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().calls.clone()
    }

    pub fn created(&self) -> Vec<String> {
        self.0.lock().unwrap().created.clone()
    }

    fn record(&self, operation: &'static str, target: u64) -> Result<()> {
        let mut state = self.0.lock().unwrap();
        state.calls.push(format!("{operation} {target}"));
        if state.failing.contains(operation) {
            bail!("{operation} failed (403): Resource not accessible by integration");
        }
        Ok(())
    }
}

#[async_trait]
impl CommentGateway for FakeGateway {
    async fn list_comments(&self, issue_number: u64) -> Result<Vec<IssueComment>> {
        self.record("list", issue_number)?;
        Ok(self.0.lock().unwrap().comments.clone())
    }

    async fn update_comment(&self, comment_id: u64, _body: &str) -> Result<()> {
        self.record("update", comment_id)
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()> {
        self.record("create", issue_number)?;
        self.0.lock().unwrap().created.push(body.to_string());
        Ok(())
    }

    async fn create_review_comment(&self, pull_number: u64, _body: &str) -> Result<()> {
        self.record("review", pull_number)
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn push(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

impl Reporter for RecordingReporter {
    fn section(&self, name: &str) {
        self.push(format!("== {name} =="));
    }

    fn kv(&self, key: &str, value: &str) {
        self.push(format!("{key}: {value}"));
    }

    fn status(&self, scope: &str, message: &str) {
        self.push(format!("[{scope}] {message}"));
    }

    fn raw(&self, line: &str) {
        self.push(line.to_string());
    }
}
