pub mod library_locator;

pub use library_locator::{LibraryDir, LibraryLocator};
