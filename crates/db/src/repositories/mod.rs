pub mod collection_repo;
pub mod figure_repo;
pub mod series_repo;
pub mod user_repo;

pub use collection_repo::CollectionRepo;
pub use figure_repo::FigureRepo;
pub use series_repo::SeriesRepo;
pub use user_repo::UserRepo;
