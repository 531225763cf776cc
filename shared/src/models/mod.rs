//! Data Models
//!
//! Plain serde structs shared between the local cache (sqlx `FromRow` under
//! the `db` feature) and the remote document ledger.

pub mod admin;
pub mod cart;
pub mod counter;
pub mod customer;
pub mod order;
pub mod pos_order;
pub mod product;
pub mod promotion;
pub mod stats;

// Re-exports
pub use admin::AdminUser;
pub use cart::{CartAdd, CartItem, CartUpdateQuantity};
pub use counter::CodeCounter;
pub use customer::{Address, AddressCreate, Customer, CustomerCreate, CustomerUpdate};
pub use order::{CheckoutRequest, Order, OrderItem};
pub use pos_order::{PosLineDraft, PosOrder, PosOrderCreate, PosOrderItem};
pub use product::{Product, ProductCreate, ProductUpdate, ProductVariant, VariantDraft};
pub use promotion::{Promotion, PromotionCreate, PromotionUpdate};
pub use stats::{BestSeller, DashboardStats, SalesChannel};
