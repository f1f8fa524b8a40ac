//! lockfile 기반 패키지 매니저 감지 어댑터.

use std::path::Path;

use crate::application::ports::PackageManagerDetector;
use crate::domain::package_manager::PackageManagerProfile;

/// 작업 디렉터리의 lockfile 존재 여부로 패키지 매니저를 고른다.
pub struct LockfileDetector;

impl PackageManagerDetector for LockfileDetector {
    fn detect(&self, workdir: &Path) -> PackageManagerProfile {
        PackageManagerProfile::detect(|file| workdir.join(file).is_file())
    }
}
