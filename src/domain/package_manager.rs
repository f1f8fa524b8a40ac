//! lockfile 기반 패키지 매니저 선택 정책.

/// 우선순위 순서의 lockfile 표. 앞쪽이 높다.
pub const LOCKFILES: [(&str, PackageManager); 3] = [
    ("yarn.lock", PackageManager::Yarn),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("package-lock.json", PackageManager::Npm),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// 실행 파일 이름.
    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }
}

/// 한 번의 빌드에 사용할 매니저와 설치 명령.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManagerProfile {
    pub manager: PackageManager,
    pub install_command: Vec<String>,
}

impl PackageManagerProfile {
    /// 존재하는 lockfile 정보만으로 프로필을 고른다.
    /// yarn.lock > pnpm-lock.yaml > package-lock.json > 기본 npm.
    pub fn detect(mut exists: impl FnMut(&str) -> bool) -> Self {
        let found = LOCKFILES
            .iter()
            .find(|(file, _)| exists(file))
            .map(|(_, manager)| *manager);

        match found {
            Some(PackageManager::Yarn) => Self::new(PackageManager::Yarn, &["install", "--frozen-lockfile"]),
            Some(PackageManager::Pnpm) => Self::new(PackageManager::Pnpm, &["install", "--frozen-lockfile"]),
            Some(PackageManager::Npm) => Self::new(PackageManager::Npm, &["ci"]),
            None => Self::new(PackageManager::Npm, &["install"]),
        }
    }

    fn new(manager: PackageManager, args: &[&str]) -> Self {
        let mut install_command = vec![manager.program().to_string()];
        install_command.extend(args.iter().map(|a| a.to_string()));
        Self {
            manager,
            install_command,
        }
    }

    pub fn name(&self) -> &'static str {
        self.manager.program()
    }

    /// `<manager> run <script>` 형태의 빌드 명령.
    pub fn run_script_command(&self, script: &str) -> Vec<String> {
        vec![
            self.manager.program().to_string(),
            "run".to_string(),
            script.to_string(),
        ]
    }

    pub fn install_command_line(&self) -> String {
        self.install_command.join(" ")
    }
}
