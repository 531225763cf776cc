//! Customer Repository

use sqlx::SqlitePool;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Address, AddressCreate, Customer, CustomerCreate, CustomerUpdate};
use shared::util::{new_id, now_millis};

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        let customer = Customer {
            id: new_id(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            created_at: now_millis(),
            addresses: Vec::new(),
        };

        sqlx::query(
            "INSERT INTO customers (id, name, email, phone, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .execute(self.base.pool())
        .await?;

        Ok(customer)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let customer: Option<Customer> = sqlx::query_as("SELECT * FROM customers WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.base.pool())
            .await?;

        let Some(mut customer) = customer else {
            return Ok(None);
        };
        customer.addresses = self.addresses_of(id).await?;
        Ok(Some(customer))
    }

    pub async fn update(&self, id: &str, data: CustomerUpdate) -> RepoResult<Customer> {
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = ?");
        }
        if data.email.is_some() {
            set_parts.push("email = ?");
        }
        if data.phone.is_some() {
            set_parts.push("phone = ?");
        }

        if !set_parts.is_empty() {
            let query_str = format!(
                "UPDATE customers SET {} WHERE id = ?",
                set_parts.join(", ")
            );
            let mut query = sqlx::query(&query_str);
            if let Some(v) = data.name {
                query = query.bind(v);
            }
            if let Some(v) = data.email {
                query = query.bind(v);
            }
            if let Some(v) = data.phone {
                query = query.bind(v);
            }
            let result = query.bind(id).execute(self.base.pool()).await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound(format!("Customer {} not found", id)));
            }
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    // =========================================================================
    // Address book
    // =========================================================================

    pub async fn add_address(&self, customer_id: &str, data: AddressCreate) -> RepoResult<Address> {
        if self.find_by_id(customer_id).await?.is_none() {
            return Err(RepoError::NotFound(format!(
                "Customer {} not found",
                customer_id
            )));
        }

        let address = Address {
            id: new_id(),
            customer_id: customer_id.to_string(),
            label: data.label,
            street: data.street,
            city: data.city,
            postal_code: data.postal_code,
            is_default: data.is_default,
        };

        let mut tx = self.base.pool().begin().await?;
        if address.is_default {
            // Only one default per customer
            sqlx::query("UPDATE addresses SET is_default = 0 WHERE customer_id = ?1")
                .bind(customer_id)
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query(
            "INSERT INTO addresses (id, customer_id, label, street, city, postal_code, is_default) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&address.id)
        .bind(&address.customer_id)
        .bind(&address.label)
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.postal_code)
        .bind(address.is_default)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(address)
    }

    pub async fn find_address(
        &self,
        customer_id: &str,
        address_id: &str,
    ) -> RepoResult<Option<Address>> {
        let address: Option<Address> =
            sqlx::query_as("SELECT * FROM addresses WHERE id = ?1 AND customer_id = ?2")
                .bind(address_id)
                .bind(customer_id)
                .fetch_optional(self.base.pool())
                .await?;
        Ok(address)
    }

    pub async fn delete_address(&self, customer_id: &str, address_id: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?1 AND customer_id = ?2")
            .bind(address_id)
            .bind(customer_id)
            .execute(self.base.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "Address {} not found",
                address_id
            )));
        }
        Ok(())
    }

    async fn addresses_of(&self, customer_id: &str) -> RepoResult<Vec<Address>> {
        let addresses: Vec<Address> = sqlx::query_as(
            "SELECT * FROM addresses WHERE customer_id = ?1 ORDER BY is_default DESC, label",
        )
        .bind(customer_id)
        .fetch_all(self.base.pool())
        .await?;
        Ok(addresses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn second_default_address_demotes_the_first() {
        let db = DbService::in_memory().await.unwrap();
        let repo = CustomerRepository::new(db.pool.clone());

        let customer = repo
            .create(CustomerCreate {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                phone: None,
            })
            .await
            .unwrap();

        repo.add_address(
            &customer.id,
            AddressCreate {
                label: "home".into(),
                street: "Calle Mayor 1".into(),
                city: "Madrid".into(),
                postal_code: "28001".into(),
                is_default: true,
            },
        )
        .await
        .unwrap();
        repo.add_address(
            &customer.id,
            AddressCreate {
                label: "office".into(),
                street: "Gran Via 2".into(),
                city: "Madrid".into(),
                postal_code: "28002".into(),
                is_default: true,
            },
        )
        .await
        .unwrap();

        let found = repo.find_by_id(&customer.id).await.unwrap().unwrap();
        let defaults: Vec<&Address> =
            found.addresses.iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].label, "office");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let repo = CustomerRepository::new(db.pool.clone());

        let data = CustomerCreate {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: None,
        };
        repo.create(data.clone()).await.unwrap();
        let err = repo.create(data).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
