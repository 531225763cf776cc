//! Sequential Product Code Allocator
//!
//! Mints human-readable product codes ("PROD-001") from a single shared
//! counter record in the remote ledger and persists the new product together
//! with its variants in the same atomic transaction.
//!
//! Concurrency is optimistic: the counter is read outside the transaction,
//! the transaction re-reads it and THROWs when another writer advanced it in
//! between, and the whole allocation retries with a fresh read. An in-process
//! lock would not help: allocations can originate from any device talking to
//! the same ledger.

use super::code::format_product_code;
use crate::remote::documents::{COUNTER_TABLE, ProductDoc, VariantDoc};
use crate::remote::{LedgerError, LedgerResult, RemoteLedger};
use shared::models::{CodeCounter, Product, ProductCreate, ProductVariant};

/// Counter record key: `counter:product_code`
const COUNTER_KEY: &str = "product_code";

/// Whole-allocation retries on optimistic conflict
const MAX_ATTEMPTS: u32 = 3;

/// One atomic unit: re-check the counter, create the product document and its
/// variant children, advance the counter. Any failed statement cancels the
/// whole transaction.
const ALLOCATE_TX: &str = "
    BEGIN TRANSACTION;
    LET $current = (SELECT VALUE count FROM counter:product_code)[0] OR 0;
    IF $current != $expected {
        THROW 'allocation conflict: counter moved';
    };
    CREATE type::thing('product', $code) CONTENT $product;
    FOR $v IN $variants {
        CREATE type::thing('variant', $v.sku) CONTENT $v;
    };
    UPSERT counter:product_code SET count = $next;
    COMMIT TRANSACTION;
";

#[derive(Clone)]
pub struct ProductCodeAllocator {
    ledger: RemoteLedger,
}

impl ProductCodeAllocator {
    pub fn new(ledger: RemoteLedger) -> Self {
        Self { ledger }
    }

    /// Allocate the next code and persist product + variants remotely.
    ///
    /// Returns the fully-formed product. Nothing is written to the local
    /// cache here; callers cache only after this returns Ok.
    pub async fn allocate(&self, data: &ProductCreate, created_at: i64) -> LedgerResult<Product> {
        let mut attempt = 1;
        loop {
            // Read the counter; absent record is the base case, count = 0
            let current: Option<CodeCounter> = self
                .ledger
                .db()
                .select((COUNTER_TABLE, COUNTER_KEY))
                .await?;
            let current = current.map(|c| c.count).unwrap_or(0);
            let next = current + 1;
            let code = format_product_code(next);

            let product = build_product(data, &code, created_at);
            let doc = ProductDoc::from(&product);
            let variants: Vec<VariantDoc> =
                product.variants.iter().map(VariantDoc::from).collect();

            let mut response = self
                .ledger
                .db()
                .query(ALLOCATE_TX)
                .bind(("expected", current))
                .bind(("next", next))
                .bind(("code", code.clone()))
                .bind(("product", doc))
                .bind(("variants", variants))
                .await?;

            match classify_errors(&mut response) {
                None => {
                    tracing::info!(code = %code, attempt, "Allocated product code");
                    return Ok(product);
                }
                Some(err) => {
                    if matches!(err, LedgerError::Conflict(_)) && attempt < MAX_ATTEMPTS {
                        tracing::warn!(attempt, "Product code allocation conflict, retrying");
                        attempt += 1;
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }
}

/// Inspect every per-statement error of a cancelled transaction.
///
/// When one statement fails, the others report a generic "query was not
/// executed" error; only the real cause tells conflict (optimistic THROW or
/// engine write conflict, retryable) apart from everything else.
fn classify_errors(response: &mut surrealdb::Response) -> Option<LedgerError> {
    let errors = response.take_errors();
    if errors.is_empty() {
        return None;
    }

    let messages: Vec<String> = errors.into_values().map(|e| e.to_string()).collect();
    let cause = messages
        .iter()
        .find(|m| !m.contains("not executed"))
        .or_else(|| messages.first())
        .cloned()
        .unwrap_or_default();

    if cause.to_lowercase().contains("conflict") {
        Some(LedgerError::Conflict(cause))
    } else {
        Some(LedgerError::Remote(cause))
    }
}

/// Assemble the product with the minted code; every variant's product
/// reference is overwritten with it, whatever the caller sent.
fn build_product(data: &ProductCreate, code: &str, created_at: i64) -> Product {
    Product {
        code: code.to_string(),
        name: data.name.clone(),
        description: data.description.clone().unwrap_or_default(),
        category: data.category.clone(),
        image: data.image.clone().unwrap_or_default(),
        price: data.price,
        is_active: true,
        created_at,
        variants: data
            .variants
            .iter()
            .map(|v| ProductVariant {
                sku: v.sku.clone(),
                product_code: code.to_string(),
                size: v.size.clone(),
                color: v.color.clone(),
                price: v.price,
                stock: v.stock,
            })
            .collect(),
    }
}
