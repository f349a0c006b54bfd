pub mod category;
pub mod product;
pub mod setting;
pub mod user;
pub mod wishlist;

pub use category::{Category, CategorySummary};
pub use product::{Product, ProductDetail, ProductImage};
pub use setting::SiteSetting;
pub use user::{Role, User, UserProfile};
pub use wishlist::{WishlistEntry, WishlistItem};
