//! Remote Document Types
//!
//! One explicit serde struct per record kind. Field sets are fixed at compile
//! time; the record key is duplicated inside the document so reads don't need
//! the store's record-id type.

use serde::{Deserialize, Serialize};

use shared::models::{
    Address, Customer, Order, OrderItem, PosOrder, PosOrderItem, Product, ProductVariant,
    Promotion,
};

// Collection names
pub const COUNTER_TABLE: &str = "counter";
pub const PRODUCT_TABLE: &str = "product";
pub const VARIANT_TABLE: &str = "variant";
pub const ORDER_TABLE: &str = "order";
pub const POS_ORDER_TABLE: &str = "pos_order";
pub const CUSTOMER_TABLE: &str = "customer";
pub const PROMOTION_TABLE: &str = "promotion";

/// Product document, keyed by its sequential code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDoc {
    pub code: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub price: f64,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<&Product> for ProductDoc {
    fn from(p: &Product) -> Self {
        Self {
            code: p.code.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            category: p.category.clone(),
            image: p.image.clone(),
            price: p.price,
            is_active: p.is_active,
            created_at: p.created_at,
        }
    }
}

impl ProductDoc {
    /// Rebuild the cache model from this document and its variant children
    pub fn into_product(self, variants: Vec<VariantDoc>) -> Product {
        Product {
            code: self.code,
            name: self.name,
            description: self.description,
            category: self.category,
            image: self.image,
            price: self.price,
            is_active: self.is_active,
            created_at: self.created_at,
            variants: variants.into_iter().map(ProductVariant::from).collect(),
        }
    }
}

/// Variant document, keyed by its SKU; `product` carries the parent code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantDoc {
    pub sku: String,
    pub product: String,
    pub size: String,
    pub color: String,
    pub price: f64,
    pub stock: i64,
}

impl From<&ProductVariant> for VariantDoc {
    fn from(v: &ProductVariant) -> Self {
        Self {
            sku: v.sku.clone(),
            product: v.product_code.clone(),
            size: v.size.clone(),
            color: v.color.clone(),
            price: v.price,
            stock: v.stock,
        }
    }
}

impl From<VariantDoc> for ProductVariant {
    fn from(doc: VariantDoc) -> Self {
        Self {
            sku: doc.sku,
            product_code: doc.product,
            size: doc.size,
            color: doc.color,
            price: doc.price,
            stock: doc.stock,
        }
    }
}

/// Online order document with embedded line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDoc {
    pub order_id: String,
    pub customer_id: Option<String>,
    pub placed_at: i64,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub promotion_id: Option<String>,
    pub address_line: Option<String>,
    pub payment_method: String,
    pub items: Vec<OrderItemDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDoc {
    pub product_code: String,
    pub name: String,
    pub sku: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub image: Option<String>,
}

impl From<&Order> for OrderDoc {
    fn from(o: &Order) -> Self {
        Self {
            order_id: o.id.clone(),
            customer_id: o.customer_id.clone(),
            placed_at: o.placed_at,
            subtotal: o.subtotal,
            discount: o.discount,
            total: o.total,
            promotion_id: o.promotion_id.clone(),
            address_line: o.address_line.clone(),
            payment_method: o.payment_method.clone(),
            items: o
                .items
                .iter()
                .map(|i| OrderItemDoc {
                    product_code: i.product_code.clone(),
                    name: i.name.clone(),
                    sku: i.sku.clone(),
                    unit_price: i.unit_price,
                    quantity: i.quantity,
                    image: i.image.clone(),
                })
                .collect(),
        }
    }
}

impl From<OrderDoc> for Order {
    fn from(doc: OrderDoc) -> Self {
        let items = doc
            .items
            .into_iter()
            .map(|i| OrderItem {
                order_id: doc.order_id.clone(),
                product_code: i.product_code,
                name: i.name,
                sku: i.sku,
                unit_price: i.unit_price,
                quantity: i.quantity,
                image: i.image,
            })
            .collect();
        Self {
            id: doc.order_id,
            customer_id: doc.customer_id,
            placed_at: doc.placed_at,
            subtotal: doc.subtotal,
            discount: doc.discount,
            total: doc.total,
            promotion_id: doc.promotion_id,
            address_line: doc.address_line,
            payment_method: doc.payment_method,
            items,
        }
    }
}

/// Point-of-sale order document with embedded line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosOrderDoc {
    pub pos_order_id: String,
    pub receipt_number: i64,
    pub admin_id: Option<String>,
    pub placed_at: i64,
    pub total: f64,
    pub payment_method: String,
    pub items: Vec<OrderItemDoc>,
}

impl From<&PosOrder> for PosOrderDoc {
    fn from(o: &PosOrder) -> Self {
        Self {
            pos_order_id: o.id.clone(),
            receipt_number: o.receipt_number,
            admin_id: o.admin_id.clone(),
            placed_at: o.placed_at,
            total: o.total,
            payment_method: o.payment_method.clone(),
            items: o
                .items
                .iter()
                .map(|i| OrderItemDoc {
                    product_code: i.product_code.clone(),
                    name: i.name.clone(),
                    sku: i.sku.clone(),
                    unit_price: i.unit_price,
                    quantity: i.quantity,
                    image: i.image.clone(),
                })
                .collect(),
        }
    }
}

impl From<PosOrderDoc> for PosOrder {
    fn from(doc: PosOrderDoc) -> Self {
        let items = doc
            .items
            .into_iter()
            .map(|i| PosOrderItem {
                pos_order_id: doc.pos_order_id.clone(),
                product_code: i.product_code,
                name: i.name,
                sku: i.sku,
                unit_price: i.unit_price,
                quantity: i.quantity,
                image: i.image,
            })
            .collect();
        Self {
            id: doc.pos_order_id,
            receipt_number: doc.receipt_number,
            admin_id: doc.admin_id,
            placed_at: doc.placed_at,
            total: doc.total,
            payment_method: doc.payment_method,
            items,
        }
    }
}

/// Customer document with embedded address book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDoc {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: i64,
    pub addresses: Vec<AddressDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDoc {
    pub address_id: String,
    pub label: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub is_default: bool,
}

impl From<&Customer> for CustomerDoc {
    fn from(c: &Customer) -> Self {
        Self {
            customer_id: c.id.clone(),
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            created_at: c.created_at,
            addresses: c.addresses.iter().map(AddressDoc::from).collect(),
        }
    }
}

impl From<&Address> for AddressDoc {
    fn from(a: &Address) -> Self {
        Self {
            address_id: a.id.clone(),
            label: a.label.clone(),
            street: a.street.clone(),
            city: a.city.clone(),
            postal_code: a.postal_code.clone(),
            is_default: a.is_default,
        }
    }
}

/// Promotion document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionDoc {
    pub promotion_id: String,
    pub name: String,
    pub percent: f64,
    pub starts_at: i64,
    pub ends_at: i64,
    pub is_active: bool,
}

impl From<&Promotion> for PromotionDoc {
    fn from(p: &Promotion) -> Self {
        Self {
            promotion_id: p.id.clone(),
            name: p.name.clone(),
            percent: p.percent,
            starts_at: p.starts_at,
            ends_at: p.ends_at,
            is_active: p.is_active,
        }
    }
}
