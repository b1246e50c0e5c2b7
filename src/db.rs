pub mod sheets_repo;
pub use sheets_repo::SheetsRepository;
