mod serve;

pub use serve::ServeResourceUseCase;
