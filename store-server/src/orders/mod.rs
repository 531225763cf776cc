//! Order Service
//!
//! Write paths for the two ledgers: checkout turns a customer's cart into an
//! online order; POS entry rings up an in-store sale. Both append to the
//! remote ledger first and cache locally after (the same ordering rule the
//! allocator follows), and orders are never mutated once placed.

pub mod money;

use sqlx::SqlitePool;

use crate::db::repository::{
    CartRepository, CustomerRepository, OrderRepository, PosOrderRepository, ProductRepository,
    PromotionRepository,
};
use crate::remote::{RemoteLedger, RemoteMirror};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Address, CheckoutRequest, Order, OrderItem, PosOrder, PosOrderCreate, PosOrderItem,
};
use shared::util::{new_id, now_millis, snowflake_id};

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    pos_orders: PosOrderRepository,
    cart: CartRepository,
    customers: CustomerRepository,
    promotions: PromotionRepository,
    products: ProductRepository,
    mirror: RemoteMirror,
}

impl OrderService {
    pub fn new(pool: SqlitePool, ledger: RemoteLedger) -> Self {
        Self {
            orders: OrderRepository::new(pool.clone()),
            pos_orders: PosOrderRepository::new(pool.clone()),
            cart: CartRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            promotions: PromotionRepository::new(pool.clone()),
            products: ProductRepository::new(pool),
            mirror: RemoteMirror::new(ledger),
        }
    }

    /// Place an online order from the customer's cart
    pub async fn checkout(&self, req: CheckoutRequest) -> AppResult<Order> {
        let customer = self
            .customers
            .find_by_id(&req.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {}", req.customer_id)))?;

        let cart_items = self.cart.find_by_customer(&customer.id).await?;
        if cart_items.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        let now = now_millis();
        let subtotal = money::subtotal(cart_items.iter().map(|i| (i.unit_price, i.quantity)));

        let (discount, promotion_id) = match &req.promotion_id {
            Some(id) => {
                let promotion = self
                    .promotions
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Promotion {}", id)))?;
                if !promotion.is_current(now) {
                    return Err(AppError::business_rule("Promotion is not active"));
                }
                (
                    money::percent_of(subtotal, promotion.percent),
                    Some(promotion.id),
                )
            }
            None => (0.0, None),
        };
        let total = money::subtract(subtotal, discount);

        let address_line = match &req.address_id {
            Some(address_id) => {
                let address = self
                    .customers
                    .find_address(&customer.id, address_id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Address {}", address_id)))?;
                Some(format_address_line(&address))
            }
            None => None,
        };

        let payment_method = normalize_payment_method(req.payment_method.as_deref(), "card")?;

        let order_id = new_id();
        let order = Order {
            id: order_id.clone(),
            customer_id: Some(customer.id.clone()),
            placed_at: now,
            subtotal,
            discount,
            total,
            promotion_id,
            address_line,
            payment_method,
            items: cart_items
                .into_iter()
                .map(|c| OrderItem {
                    order_id: order_id.clone(),
                    product_code: c.product_code,
                    name: c.name,
                    sku: c.sku,
                    unit_price: c.unit_price,
                    quantity: c.quantity,
                    image: c.image,
                })
                .collect(),
        };

        self.mirror.append_order(&order).await?;
        self.orders.insert(&order).await?;

        // The order is committed on both sides; a stale cart only costs the
        // customer a manual clear, so don't fail the checkout over it
        if let Err(e) = self.cart.clear(&customer.id).await {
            tracing::warn!(customer = %customer.id, error = %e, "Failed to clear cart after checkout");
        }

        tracing::info!(order = %order.id, total = order.total, "Online order placed");
        Ok(order)
    }

    /// Ring up an in-store sale; prices come from the cached catalog
    pub async fn place_pos_order(
        &self,
        admin_id: Option<String>,
        data: PosOrderCreate,
    ) -> AppResult<PosOrder> {
        if data.lines.is_empty() {
            return Err(AppError::validation("Sale has no lines"));
        }

        let pos_order_id = new_id();
        let mut items = Vec::with_capacity(data.lines.len());
        for line in &data.lines {
            if line.quantity < 1 {
                return Err(AppError::validation(format!(
                    "Invalid quantity {} for {}",
                    line.quantity, line.sku
                )));
            }
            let product = self
                .products
                .find_by_code(&line.product_code)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Product {}", line.product_code)))?;
            let variant = product
                .variants
                .iter()
                .find(|v| v.sku == line.sku)
                .ok_or_else(|| AppError::not_found(format!("Variant {}", line.sku)))?;

            items.push(PosOrderItem {
                pos_order_id: pos_order_id.clone(),
                product_code: product.code.clone(),
                name: product.name.clone(),
                sku: variant.sku.clone(),
                unit_price: variant.price,
                quantity: line.quantity,
                image: (!product.image.is_empty()).then(|| product.image.clone()),
            });
        }

        let total = money::subtotal(items.iter().map(|i| (i.unit_price, i.quantity)));
        let order = PosOrder {
            id: pos_order_id,
            receipt_number: snowflake_id(),
            admin_id,
            placed_at: now_millis(),
            total,
            payment_method: normalize_payment_method(data.payment_method.as_deref(), "cash")?,
            items,
        };

        self.mirror.append_pos_order(&order).await?;
        self.pos_orders.insert(&order).await?;

        tracing::info!(
            pos_order = %order.id,
            receipt = order.receipt_number,
            total = order.total,
            "Point-of-sale order placed"
        );
        Ok(order)
    }
}

/// Trimmed payment method, falling back to the channel default
fn normalize_payment_method(given: Option<&str>, default: &str) -> AppResult<String> {
    match given {
        None => Ok(default.to_string()),
        Some(m) => {
            let m = m.trim();
            if m.is_empty() {
                return Err(AppError::validation("Payment method cannot be blank"));
            }
            Ok(m.to_string())
        }
    }
}

fn format_address_line(address: &Address) -> String {
    format!(
        "{}, {} {}",
        address.street, address.postal_code, address.city
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogService;
    use crate::db::DbService;
    use shared::models::{
        CartItem, CustomerCreate, PosLineDraft, ProductCreate, PromotionCreate, VariantDraft,
    };

    struct Fixture {
        pool: SqlitePool,
        ledger: RemoteLedger,
        service: OrderService,
    }

    async fn fixture() -> Fixture {
        let db = DbService::in_memory().await.unwrap();
        let ledger = RemoteLedger::in_memory().await.unwrap();
        Fixture {
            pool: db.pool.clone(),
            ledger: ledger.clone(),
            service: OrderService::new(db.pool, ledger),
        }
    }

    async fn seed_customer(pool: &SqlitePool) -> String {
        CustomerRepository::new(pool.clone())
            .create(CustomerCreate {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                phone: None,
            })
            .await
            .unwrap()
            .id
    }

    fn cart_line(customer: &str, name: &str, price: f64, qty: i64) -> CartItem {
        CartItem {
            id: new_id(),
            customer_id: customer.into(),
            product_code: "PROD-001".into(),
            sku: format!("{name}-SKU"),
            name: name.into(),
            unit_price: price,
            quantity: qty,
            image: None,
        }
    }

    #[tokio::test]
    async fn checkout_totals_clear_cart_and_mirror_remotely() {
        let fx = fixture().await;
        let customer = seed_customer(&fx.pool).await;

        let cart = CartRepository::new(fx.pool.clone());
        cart.add(&cart_line(&customer, "Shirt", 19.99, 3)).await.unwrap();
        cart.add(&cart_line(&customer, "Hat", 5.0, 1)).await.unwrap();

        let promo = PromotionRepository::new(fx.pool.clone())
            .create(PromotionCreate {
                name: "spring".into(),
                percent: 10.0,
                starts_at: 0,
                ends_at: i64::MAX,
            })
            .await
            .unwrap();

        let order = fx
            .service
            .checkout(CheckoutRequest {
                customer_id: customer.clone(),
                promotion_id: Some(promo.id),
                address_id: None,
                payment_method: Some("card".into()),
            })
            .await
            .unwrap();

        assert_eq!(order.subtotal, 64.97);
        assert_eq!(order.discount, 6.5); // 10% of 64.97 → 6.50
        assert_eq!(order.total, 58.47);
        assert_eq!(order.items.len(), 2);

        // Cart is cleared, and the remote ledger carries the same order
        assert!(cart.find_by_customer(&customer).await.unwrap().is_empty());
        let remote = RemoteMirror::new(fx.ledger.clone())
            .fetch_orders()
            .await
            .unwrap();
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0].total, 58.47);
    }

    #[tokio::test]
    async fn checkout_with_empty_cart_is_rejected() {
        let fx = fixture().await;
        let customer = seed_customer(&fx.pool).await;

        let err = fx
            .service
            .checkout(CheckoutRequest {
                customer_id: customer,
                promotion_id: None,
                address_id: None,
                payment_method: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn expired_promotion_is_rejected() {
        let fx = fixture().await;
        let customer = seed_customer(&fx.pool).await;
        CartRepository::new(fx.pool.clone())
            .add(&cart_line(&customer, "Shirt", 10.0, 1))
            .await
            .unwrap();

        let promo = PromotionRepository::new(fx.pool.clone())
            .create(PromotionCreate {
                name: "gone".into(),
                percent: 50.0,
                starts_at: 0,
                ends_at: 1,
            })
            .await
            .unwrap();

        let err = fx
            .service
            .checkout(CheckoutRequest {
                customer_id: customer,
                promotion_id: Some(promo.id),
                address_id: None,
                payment_method: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn pos_order_resolves_prices_from_the_catalog() {
        let fx = fixture().await;

        let catalog = CatalogService::new(fx.pool.clone(), fx.ledger.clone());
        let product = catalog
            .create_product(ProductCreate {
                name: "Basic Tee".into(),
                description: None,
                category: "shirts".into(),
                image: Some("tee.png".into()),
                price: 19.5,
                variants: vec![VariantDraft {
                    sku: "TEE-M".into(),
                    size: "M".into(),
                    color: "black".into(),
                    price: 21.0,
                    stock: 5,
                }],
            })
            .await
            .unwrap();

        let sale = fx
            .service
            .place_pos_order(
                Some("admin-1".into()),
                PosOrderCreate {
                    lines: vec![PosLineDraft {
                        product_code: product.code.clone(),
                        sku: "TEE-M".into(),
                        quantity: 2,
                    }],
                    payment_method: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(sale.total, 42.0);
        assert_eq!(sale.items[0].name, "Basic Tee");
        assert_eq!(sale.items[0].image.as_deref(), Some("tee.png"));

        let remote = RemoteMirror::new(fx.ledger.clone())
            .fetch_pos_orders()
            .await
            .unwrap();
        assert_eq!(remote.len(), 1);
    }

    #[tokio::test]
    async fn pos_order_with_unknown_variant_is_not_found() {
        let fx = fixture().await;
        let catalog = CatalogService::new(fx.pool.clone(), fx.ledger.clone());
        catalog
            .create_product(ProductCreate {
                name: "Basic Tee".into(),
                description: None,
                category: "shirts".into(),
                image: None,
                price: 19.5,
                variants: vec![],
            })
            .await
            .unwrap();

        let err = fx
            .service
            .place_pos_order(
                None,
                PosOrderCreate {
                    lines: vec![PosLineDraft {
                        product_code: "PROD-001".into(),
                        sku: "NOPE".into(),
                        quantity: 1,
                    }],
                    payment_method: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
