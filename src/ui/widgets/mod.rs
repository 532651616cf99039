pub mod searchbar;
pub mod statusbar;
pub mod table;

pub use searchbar::SearchBar;
pub use table::DataTable;
