pub mod allocator;
pub mod normalize;
pub mod search;
pub mod store;
pub mod types;

pub use allocator::allocate_in;
pub use store::{count_by_category, RegistrationStore, SharedRegistrationStore};
pub use types::{format_bib, Category, CategoryBand, NewRegistration, Registration};
