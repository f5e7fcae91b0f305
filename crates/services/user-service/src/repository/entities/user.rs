//! User database entity for SeaORM.

use std::collections::BTreeSet;

use sea_orm::entity::prelude::*;

use domain::{Membership, User};

use super::user_role;

/// Membership tier stored by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MembershipColumn {
    #[sea_orm(string_value = "BASIC")]
    Basic,
    #[sea_orm(string_value = "SILVER")]
    Silver,
    #[sea_orm(string_value = "GOLD")]
    Gold,
}

impl From<Membership> for MembershipColumn {
    fn from(membership: Membership) -> Self {
        match membership {
            Membership::Basic => MembershipColumn::Basic,
            Membership::Silver => MembershipColumn::Silver,
            Membership::Gold => MembershipColumn::Gold,
        }
    }
}

impl From<MembershipColumn> for Membership {
    fn from(column: MembershipColumn) -> Self {
        match column {
            MembershipColumn::Basic => Membership::Basic,
            MembershipColumn::Silver => Membership::Silver,
            MembershipColumn::Gold => Membership::Gold,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub membership: MembershipColumn,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    Roles,
}

impl Related<user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain record from the row and its role rows.
    pub fn into_user(self, roles: Vec<user_role::Model>) -> User {
        User {
            id: Some(self.id),
            username: self.username,
            password: self.password,
            email: self.email,
            phone: self.phone,
            age: self.age,
            membership: self.membership.into(),
            roles: roles.into_iter().map(|r| r.role).collect::<BTreeSet<_>>(),
        }
    }
}
