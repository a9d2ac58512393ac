//! Role-based access policy, checked at the boundary.
//!
//! Admin identity is configuration, not code: the policy is loaded from the
//! `[access]` section of `config.toml` and consulted wherever a mutating
//! request enters the system. An empty admin list means single-user local
//! mode: the CLI permits mutations, while network surfaces fail closed and
//! refuse admin calls until accounts are configured.

use anyhow::Result;
use serde::Serialize;

use crate::config::PrepConfig;
use crate::errors::not_an_admin;

/// Role an account holds on this shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May manage content records
    Admin,
    /// May only browse visible content
    Viewer,
}

/// The configured set of role assignments.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    admins: Vec<String>,
}

impl AccessPolicy {
    /// Build a policy from an explicit admin list.
    pub fn new(admins: Vec<String>) -> Self {
        Self { admins }
    }

    /// Build a policy from loaded configuration.
    pub fn from_config(config: &PrepConfig) -> Self {
        Self::new(config.access().admins())
    }

    /// Whether any admin accounts are configured at all.
    pub fn has_admins(&self) -> bool {
        !self.admins.is_empty()
    }

    /// Whether the account holds the admin role.
    pub fn is_admin(&self, account: &str) -> bool {
        self.admins.iter().any(|a| a == account)
    }

    /// The role the account holds.
    pub fn role_of(&self, account: &str) -> Role {
        if self.is_admin(account) {
            Role::Admin
        } else {
            Role::Viewer
        }
    }

    /// Require the admin role for a local (CLI) mutation.
    ///
    /// With no admins configured this is single-user mode and every local
    /// actor is permitted. Once admins exist, only they may mutate.
    pub fn require_local_admin(&self, account: &str) -> Result<()> {
        if !self.has_admins() || self.is_admin(account) {
            Ok(())
        } else {
            Err(not_an_admin(account).into())
        }
    }
}
