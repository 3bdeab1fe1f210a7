pub mod cart;
pub mod menus;
pub mod order_items;
pub mod orders;
pub mod reviews;
pub mod user_mapping;
pub mod users;

pub use cart::Entity as Cart;
pub use menus::Entity as Menus;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use reviews::Entity as Reviews;
pub use user_mapping::Entity as UserMapping;
pub use users::Entity as Users;
