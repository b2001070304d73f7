pub mod ports;
pub mod update_use_case;

pub use update_use_case::UpdateUseCase;
