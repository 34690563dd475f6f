use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use gymdesk_data::{
    Delete,
    Update,
    Insert,
    Query,
    Retrieve,
    Membership,
    MembershipFilter,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Membership> for Connection {
    type Filter = MembershipFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Membership>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                name,
                email,
                phone,
                plan_type,
                workout_type,
                joining_date,
                expiry_date,
                payment_method,
                ROUND(amount, 10) AS amount
            FROM users
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        qry.push(" ORDER BY id");

        let members: Vec<Membership> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Membership> for Connection {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Membership> {
        let filter = MembershipFilter {
            id: Some(member_id),
        };
        let member = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Membership> for Connection {
    async fn insert(&self, member: Membership) -> Result<Membership> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO users (
                    name,
                    email,
                    phone,
                    plan_type,
                    workout_type,
                    joining_date,
                    expiry_date,
                    payment_method,
                    amount
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.name)
                .push_bind(&member.email)
                .push_bind(&member.phone)
                .push_bind(&member.plan_type)
                .push_bind(&member.workout_type)
                .push_bind(member.joining_date().unwrap_or(""))
                .push_bind(&member.expiry_date)
                .push_bind(member.payment_method())
                .push_bind(member.amount_value());

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        log::debug!("inserted membership {}", insert.id);
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Membership> for Connection {
    /// Update membership
    async fn update(&self, member: Membership) -> Result<Membership> {
        {
            let mut conn = self.lock().await;
            let result = QueryBuilder::<Sqlite>::new("UPDATE users SET")
                .push(" name = ")
                .push_bind(&member.name)
                .push(", email = ")
                .push_bind(&member.email)
                .push(", phone = ")
                .push_bind(&member.phone)
                .push(", plan_type = ")
                .push_bind(&member.plan_type)
                .push(", workout_type = ")
                .push_bind(&member.workout_type)
                .push(", joining_date = ")
                .push_bind(member.joining_date().unwrap_or(""))
                .push(", expiry_date = ")
                .push_bind(&member.expiry_date)
                .push(", payment_method = ")
                .push_bind(member.payment_method())
                .push(", amount = ")
                .push_bind(member.amount_value())
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
            if result.rows_affected() == 0 {
                return Err(QueryError::NotFound.into());
            }
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Membership> for Connection {
    /// Delete membership
    async fn delete(&self, member: Membership) -> Result<()> {
        let mut conn = self.lock().await;
        let result = QueryBuilder::<Sqlite>::new("DELETE FROM users WHERE id = ")
            .push_bind(member.id)
            .build()
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(QueryError::NotFound.into());
        }
        Ok(())
    }
}
