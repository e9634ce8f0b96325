pub mod page;
pub mod shift;
pub mod workplace;

pub use page::Page;
pub use shift::Shift;
pub use workplace::{Workplace, WorkplaceResult};
