//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod gateway_factory;
mod lockfile_detector;
mod markdown_renderer;
mod reporter;
mod token_resolver;

pub use config_repository::JsonConfigRepository;
pub use gateway_factory::GitHubGatewayFactory;
pub use lockfile_detector::LockfileDetector;
pub use markdown_renderer::MarkdownRendererAdapter;
pub use reporter::ConsoleReporter;
pub use token_resolver::EnvTokenResolver;
