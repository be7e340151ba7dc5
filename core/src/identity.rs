// core/src/identity.rs

//! Authenticated identity, passed explicitly into every operation.
//!
//! Authentication itself (sessions, tokens, password storage) lives outside
//! this crate. Callers resolve whoever is signed in and hand the result to
//! the services here; nothing reads a "current user" from ambient state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Buyer,
  Seller,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub role: Role,
}

impl UserIdentity {
  pub fn new(id: Uuid, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
    UserIdentity {
      id,
      name: name.into(),
      email: email.into(),
      role,
    }
  }
}
