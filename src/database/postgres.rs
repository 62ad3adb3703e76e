use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    Address, AddressInput, Contact, ContactFilter, ContactInput, NewUser, User, UserUpdate,
};
use crate::database::repository::{AddressRepository, ContactRepository, Store, UserRepository};

const CONTACT_COLUMNS: &str = "id, username, first_name, last_name, email, phone";
const ADDRESS_COLUMNS: &str = "id, contact_id, street, city, province, country, postal_code";

/// Store backed by a Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so filter text matches literally, then wrap for substring search.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Appends the owner scope and every present filter as a WHERE clause
fn push_contact_filters(qb: &mut QueryBuilder<'static, Postgres>, username: &str, filter: &ContactFilter) {
    qb.push(" WHERE username = ").push_bind(username.to_string());

    if let Some(name) = &filter.name {
        let pattern = like_pattern(name);
        qb.push(" AND (first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR last_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(email) = &filter.email {
        qb.push(" AND email ILIKE ").push_bind(like_pattern(email));
    }
    if let Some(phone) = &filter.phone {
        qb.push(" AND phone ILIKE ").push_bind(like_pattern(phone));
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn count_users_by_username(&self, username: &str) -> Result<i64, DatabaseError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let row = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, name) VALUES ($1, $2, $3) \
             RETURNING username, password, name, token",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT username, password, name, token FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT username, password, name, token FROM users WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_user(
        &self,
        username: &str,
        update: UserUpdate,
    ) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), password = COALESCE($3, password) \
             WHERE username = $1 RETURNING username, password, name, token",
        )
        .bind(username)
        .bind(update.name)
        .bind(update.password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn set_token(&self, username: &str, token: Option<String>) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE users SET token = $2 WHERE username = $1")
            .bind(username)
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ContactRepository for PgStore {
    async fn insert_contact(
        &self,
        username: &str,
        input: &ContactInput,
    ) -> Result<Contact, DatabaseError> {
        let sql = format!(
            "INSERT INTO contacts (username, first_name, last_name, email, phone) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            CONTACT_COLUMNS
        );
        let row = sqlx::query_as::<_, Contact>(&sql)
            .bind(username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_contact(&self, username: &str, id: i32) -> Result<Option<Contact>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE username = $1 AND id = $2",
            CONTACT_COLUMNS
        );
        let row = sqlx::query_as::<_, Contact>(&sql)
            .bind(username)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count_contact(&self, username: &str, id: i32) -> Result<i64, DatabaseError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM contacts WHERE username = $1 AND id = $2")
            .bind(username)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    async fn update_contact(
        &self,
        username: &str,
        id: i32,
        input: &ContactInput,
    ) -> Result<Option<Contact>, DatabaseError> {
        let sql = format!(
            "UPDATE contacts SET first_name = $3, last_name = $4, email = $5, phone = $6 \
             WHERE username = $1 AND id = $2 RETURNING {}",
            CONTACT_COLUMNS
        );
        let row = sqlx::query_as::<_, Contact>(&sql)
            .bind(username)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_contact(&self, username: &str, id: i32) -> Result<bool, DatabaseError> {
        // addresses go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM contacts WHERE username = $1 AND id = $2")
            .bind(username)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_contacts(
        &self,
        username: &str,
        filter: &ContactFilter,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Contact>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM contacts", CONTACT_COLUMNS));
        push_contact_filters(&mut qb, username, filter);
        qb.push(" ORDER BY id LIMIT ")
            .push_bind(take)
            .push(" OFFSET ")
            .push_bind(skip);

        let rows = qb.build_query_as::<Contact>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn count_contacts(
        &self,
        username: &str,
        filter: &ContactFilter,
    ) -> Result<i64, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) AS count FROM contacts");
        push_contact_filters(&mut qb, username, filter);

        let row = qb.build().fetch_one(&self.pool).await?;
        Ok(row.try_get("count")?)
    }
}

#[async_trait]
impl AddressRepository for PgStore {
    async fn insert_address(
        &self,
        contact_id: i32,
        input: &AddressInput,
    ) -> Result<Address, DatabaseError> {
        let sql = format!(
            "INSERT INTO addresses (contact_id, street, city, province, country, postal_code) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            ADDRESS_COLUMNS
        );
        let row = sqlx::query_as::<_, Address>(&sql)
            .bind(contact_id)
            .bind(&input.street)
            .bind(&input.city)
            .bind(&input.province)
            .bind(&input.country)
            .bind(&input.postal_code)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_address(
        &self,
        contact_id: i32,
        id: i32,
    ) -> Result<Option<Address>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM addresses WHERE contact_id = $1 AND id = $2",
            ADDRESS_COLUMNS
        );
        let row = sqlx::query_as::<_, Address>(&sql)
            .bind(contact_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_address(
        &self,
        contact_id: i32,
        id: i32,
        input: &AddressInput,
    ) -> Result<Option<Address>, DatabaseError> {
        let sql = format!(
            "UPDATE addresses SET street = $3, city = $4, province = $5, country = $6, postal_code = $7 \
             WHERE contact_id = $1 AND id = $2 RETURNING {}",
            ADDRESS_COLUMNS
        );
        let row = sqlx::query_as::<_, Address>(&sql)
            .bind(contact_id)
            .bind(id)
            .bind(&input.street)
            .bind(&input.city)
            .bind(&input.province)
            .bind(&input.country)
            .bind(&input.postal_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_address(&self, contact_id: i32, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM addresses WHERE contact_id = $1 AND id = $2")
            .bind(contact_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_addresses(&self, contact_id: i32) -> Result<Vec<Address>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM addresses WHERE contact_id = $1 ORDER BY id",
            ADDRESS_COLUMNS
        );
        let rows = sqlx::query_as::<_, Address>(&sql)
            .bind(contact_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
