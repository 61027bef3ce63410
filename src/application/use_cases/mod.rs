/// Use cases module containing application business logic orchestration
mod collect_build_info;

pub use collect_build_info::CollectBuildInfoUseCase;
