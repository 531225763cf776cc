//! End-to-end flow: catalog → cart → checkout → POS sale → dashboard,
//! then a cold cache rebuilt from the remote ledger produces the same
//! dashboard numbers.

use chrono::{Datelike, Utc};

use store_server::db::DbService;
use store_server::db::repository::{CartRepository, CustomerRepository};
use store_server::remote::RemoteLedger;
use store_server::{CatalogService, OrderService, SalesAggregator, SyncService};

use shared::models::{
    CartItem, CheckoutRequest, CustomerCreate, PosLineDraft, PosOrderCreate, ProductCreate,
    SalesChannel, VariantDraft,
};
use shared::util::new_id;

fn this_month() -> (u32, i32) {
    let now = Utc::now();
    (now.month(), now.year())
}

#[tokio::test]
async fn dashboard_survives_a_cache_rebuild() {
    let ledger = RemoteLedger::in_memory().await.unwrap();
    let local = DbService::in_memory().await.unwrap();

    // --- Catalog: one product with two variants, code minted remotely ---
    let catalog = CatalogService::new(local.pool.clone(), ledger.clone());
    let product = catalog
        .create_product(ProductCreate {
            name: "Basic Tee".into(),
            description: Some("Cotton".into()),
            category: "shirts".into(),
            image: Some("tee.png".into()),
            price: 20.0,
            variants: vec![
                VariantDraft {
                    sku: "TEE-M".into(),
                    size: "M".into(),
                    color: "black".into(),
                    price: 20.0,
                    stock: 10,
                },
                VariantDraft {
                    sku: "TEE-L".into(),
                    size: "L".into(),
                    color: "black".into(),
                    price: 22.0,
                    stock: 10,
                },
            ],
        })
        .await
        .unwrap();
    assert_eq!(product.code, "PROD-001");

    // --- Customer checks out a cart ---
    let customer = CustomerRepository::new(local.pool.clone())
        .create(CustomerCreate {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: None,
        })
        .await
        .unwrap();

    CartRepository::new(local.pool.clone())
        .add(&CartItem {
            id: new_id(),
            customer_id: customer.id.clone(),
            product_code: product.code.clone(),
            sku: "TEE-M".into(),
            name: product.name.clone(),
            unit_price: 20.0,
            quantity: 2,
            image: Some("tee.png".into()),
        })
        .await
        .unwrap();

    let orders = OrderService::new(local.pool.clone(), ledger.clone());
    let order = orders
        .checkout(CheckoutRequest {
            customer_id: customer.id.clone(),
            promotion_id: None,
            address_id: None,
            payment_method: Some("card".into()),
        })
        .await
        .unwrap();
    assert_eq!(order.total, 40.0);

    // --- Cashier rings up a sale on the other ledger ---
    let sale = orders
        .place_pos_order(
            Some("admin-1".into()),
            PosOrderCreate {
                lines: vec![PosLineDraft {
                    product_code: product.code.clone(),
                    sku: "TEE-L".into(),
                    quantity: 1,
                }],
                payment_method: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(sale.total, 22.0);

    // --- Dashboard over the live cache ---
    let (month, year) = this_month();
    let aggregator = SalesAggregator::new(local.pool.clone(), chrono_tz::UTC);

    let online = aggregator
        .stats(SalesChannel::Online, month, year)
        .await
        .unwrap();
    let physical = aggregator
        .stats(SalesChannel::Physical, month, year)
        .await
        .unwrap();
    let summary = aggregator
        .stats(SalesChannel::Summary, month, year)
        .await
        .unwrap();

    assert_eq!(online.revenue, 40.0);
    assert_eq!(physical.revenue, 22.0);
    assert_eq!(summary.revenue, online.revenue + physical.revenue);
    assert_eq!(summary.orders, online.orders + physical.orders);
    assert_eq!(summary.items_sold, 3);
    assert_eq!(summary.best_sellers.len(), 1);
    assert_eq!(summary.best_sellers[0].name, "Basic Tee");
    assert_eq!(summary.best_sellers[0].quantity, 3);

    // --- A cold cache refreshed from the remote ledger agrees ---
    let cold = DbService::in_memory().await.unwrap();
    let refreshed = SyncService::new(cold.pool.clone(), ledger)
        .refresh_data()
        .await
        .unwrap();
    assert_eq!(refreshed.products, 1);
    assert_eq!(refreshed.orders, 1);
    assert_eq!(refreshed.pos_orders, 1);

    let cold_summary = SalesAggregator::new(cold.pool, chrono_tz::UTC)
        .stats(SalesChannel::Summary, month, year)
        .await
        .unwrap();
    assert_eq!(cold_summary.revenue, summary.revenue);
    assert_eq!(cold_summary.orders, summary.orders);
    assert_eq!(cold_summary.items_sold, summary.items_sold);
    assert_eq!(cold_summary.best_sellers, summary.best_sellers);
}
