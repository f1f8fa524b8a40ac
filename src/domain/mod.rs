//! Domain layer
//! 트리거/스냅샷/리포트 규칙을 외부 의존성 없이 표현한다.

pub mod error;
pub mod package_manager;
pub mod policy;
pub mod report;
pub mod snapshot;
pub mod trigger;
