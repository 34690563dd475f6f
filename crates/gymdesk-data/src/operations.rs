use anyhow::Result;
use async_trait::async_trait;

use crate::{Membership, MembershipFilter};

#[async_trait]
pub trait Query<T> {
    type Filter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<T>>;
}

#[async_trait]
pub trait Insert<T> {
    async fn insert(&self, item: T) -> Result<T>;
}

#[async_trait]
pub trait Update<T> {
    async fn update(&self, item: T) -> Result<T>;
}

#[async_trait]
pub trait Retrieve<T> {
    type Key;
    async fn retrieve(&self, key: Self::Key) -> Result<T>;
}


#[async_trait]
pub trait Delete<T> {
    async fn delete(&self, item: T) -> Result<()>;
}

/// Everything a membership backend has to provide.
pub trait MembershipStore:
    Query<Membership, Filter = MembershipFilter>
    + Retrieve<Membership, Key = u32>
    + Insert<Membership>
    + Update<Membership>
    + Delete<Membership>
    + Send
    + Sync
{
}

impl<T> MembershipStore for T where
    T: Query<Membership, Filter = MembershipFilter>
        + Retrieve<Membership, Key = u32>
        + Insert<Membership>
        + Update<Membership>
        + Delete<Membership>
        + Send
        + Sync
{
}
