//! Remote Mirroring
//!
//! Writes local records into their remote document counterparts and reads
//! whole ledgers back for the sync pull. Every payload is a typed document
//! from [`super::documents`].

use super::documents::{
    CUSTOMER_TABLE, CustomerDoc, ORDER_TABLE, OrderDoc, POS_ORDER_TABLE, PRODUCT_TABLE,
    PROMOTION_TABLE, PosOrderDoc, ProductDoc, PromotionDoc, VARIANT_TABLE, VariantDoc,
};
use super::{LedgerResult, RemoteLedger};
use shared::models::{Customer, Order, PosOrder, Product, Promotion};

#[derive(Clone)]
pub struct RemoteMirror {
    ledger: RemoteLedger,
}

impl RemoteMirror {
    pub fn new(ledger: RemoteLedger) -> Self {
        Self { ledger }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Overwrite a product document and rebuild its variant children.
    ///
    /// Used for updates after the initial allocation; creation goes through
    /// the allocator's transaction instead.
    pub async fn upsert_product(&self, product: &Product) -> LedgerResult<()> {
        let doc = ProductDoc::from(product);
        let variants: Vec<VariantDoc> = product.variants.iter().map(VariantDoc::from).collect();

        self.ledger
            .db()
            .query(
                "BEGIN TRANSACTION;
                 UPSERT type::thing('product', $code) CONTENT $product;
                 DELETE variant WHERE product = $code;
                 FOR $v IN $variants {
                     UPSERT type::thing('variant', $v.sku) CONTENT $v;
                 };
                 COMMIT TRANSACTION;",
            )
            .bind(("code", product.code.clone()))
            .bind(("product", doc))
            .bind(("variants", variants))
            .await?
            .check()?;
        Ok(())
    }

    /// Delete a product document and its variant children
    pub async fn delete_product(&self, code: &str) -> LedgerResult<()> {
        self.ledger
            .db()
            .query(
                "BEGIN TRANSACTION;
                 DELETE type::thing('product', $code);
                 DELETE variant WHERE product = $code;
                 COMMIT TRANSACTION;",
            )
            .bind(("code", code.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    /// All product documents (sync pull)
    pub async fn fetch_products(&self) -> LedgerResult<Vec<ProductDoc>> {
        let docs: Vec<ProductDoc> = self.ledger.db().select(PRODUCT_TABLE).await?;
        Ok(docs)
    }

    /// All variant documents (sync pull)
    pub async fn fetch_variants(&self) -> LedgerResult<Vec<VariantDoc>> {
        let docs: Vec<VariantDoc> = self.ledger.db().select(VARIANT_TABLE).await?;
        Ok(docs)
    }

    // =========================================================================
    // Ledgers
    // =========================================================================

    /// Append a placed online order
    pub async fn append_order(&self, order: &Order) -> LedgerResult<()> {
        let doc = OrderDoc::from(order);
        let _: Option<OrderDoc> = self
            .ledger
            .db()
            .create((ORDER_TABLE, order.id.clone()))
            .content(doc)
            .await?;
        Ok(())
    }

    /// Append a rung-up point-of-sale order
    pub async fn append_pos_order(&self, order: &PosOrder) -> LedgerResult<()> {
        let doc = PosOrderDoc::from(order);
        let _: Option<PosOrderDoc> = self
            .ledger
            .db()
            .create((POS_ORDER_TABLE, order.id.clone()))
            .content(doc)
            .await?;
        Ok(())
    }

    /// All online order documents (sync pull)
    pub async fn fetch_orders(&self) -> LedgerResult<Vec<OrderDoc>> {
        let docs: Vec<OrderDoc> = self.ledger.db().select(ORDER_TABLE).await?;
        Ok(docs)
    }

    /// All point-of-sale order documents (sync pull)
    pub async fn fetch_pos_orders(&self) -> LedgerResult<Vec<PosOrderDoc>> {
        let docs: Vec<PosOrderDoc> = self.ledger.db().select(POS_ORDER_TABLE).await?;
        Ok(docs)
    }

    // =========================================================================
    // Customers and promotions
    // =========================================================================

    pub async fn upsert_customer(&self, customer: &Customer) -> LedgerResult<()> {
        let doc = CustomerDoc::from(customer);
        let _: Option<CustomerDoc> = self
            .ledger
            .db()
            .upsert((CUSTOMER_TABLE, customer.id.clone()))
            .content(doc)
            .await?;
        Ok(())
    }

    pub async fn upsert_promotion(&self, promotion: &Promotion) -> LedgerResult<()> {
        let doc = PromotionDoc::from(promotion);
        let _: Option<PromotionDoc> = self
            .ledger
            .db()
            .upsert((PROMOTION_TABLE, promotion.id.clone()))
            .content(doc)
            .await?;
        Ok(())
    }

    pub async fn delete_promotion(&self, id: &str) -> LedgerResult<()> {
        let _: Option<PromotionDoc> = self
            .ledger
            .db()
            .delete((PROMOTION_TABLE, id.to_string()))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderItem;
    use shared::util::new_id;

    fn order(total: f64) -> Order {
        let id = new_id();
        Order {
            id: id.clone(),
            customer_id: None,
            placed_at: 1_000,
            subtotal: total,
            discount: 0.0,
            total,
            promotion_id: None,
            address_line: None,
            payment_method: "card".into(),
            items: vec![OrderItem {
                order_id: id,
                product_code: "PROD-001".into(),
                name: "Shirt".into(),
                sku: "SH-M".into(),
                unit_price: total,
                quantity: 1,
                image: None,
            }],
        }
    }

    #[tokio::test]
    async fn appended_orders_come_back_from_fetch() {
        let ledger = RemoteLedger::in_memory().await.unwrap();
        let mirror = RemoteMirror::new(ledger);

        mirror.append_order(&order(10.0)).await.unwrap();
        mirror.append_order(&order(20.0)).await.unwrap();

        let docs = mirror.fetch_orders().await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs.iter().map(|d| d.items.len()).sum::<usize>(), 2);
    }

    #[tokio::test]
    async fn appending_the_same_order_twice_fails() {
        let ledger = RemoteLedger::in_memory().await.unwrap();
        let mirror = RemoteMirror::new(ledger);

        let o = order(10.0);
        mirror.append_order(&o).await.unwrap();
        // Ledger records are append-only; a second create on the same id errors
        assert!(mirror.append_order(&o).await.is_err());
    }
}
