pub mod alternative;
pub mod category;
pub mod license;

pub use alternative::Alternative;
pub use category::Category;
pub use license::License;
