pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    AuthSession, Course, NewUser, PublicUser, Purchase, PurchaseStatus, PurchaseWithCourse, Role,
    Stats, User,
};
pub use ports::{CourseStore, PasswordService, PortError, PortResult, TokenIssuer};
pub use service::{ShopError, ShopResult, ShopService};
