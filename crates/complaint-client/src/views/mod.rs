pub mod detail;
pub mod list;

pub use detail::{ComplaintDetailView, DetailState};
pub use list::{ComplaintListView, ListRow, ListSource, StatusFilter};
