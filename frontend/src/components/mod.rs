pub mod bulk_edit;
pub mod export;
pub mod import;
pub mod statistics;
