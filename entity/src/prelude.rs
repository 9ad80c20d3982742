pub use super::actor::Entity as Actor;
pub use super::employment::Entity as Employment;
pub use super::performance::Entity as Performance;
pub use super::user::Entity as User;
