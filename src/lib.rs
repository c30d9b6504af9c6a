pub mod console;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod paging;
pub mod prompt;
pub mod registry;
pub mod report;
pub mod session;
