//! Guardian and godparent entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    GODPARENT_EMAIL_MAX_LEN, GODPARENT_NAME_MAX_LEN, GUARDIAN_NAME_MAX_LEN, GUARDIAN_TYPE_MAX_LEN,
};
use crate::constraints::{max_len, max_len_opt, required};
use crate::error::DomainResult;

/// Adult responsible for a child. Every column is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardian {
    pub id: Uuid,
    pub guardian_type: Option<String>,
    pub guardian_fname: Option<String>,
    pub guardian_lname: Option<String>,
}

impl Guardian {
    pub fn new(data: NewGuardian) -> DomainResult<Self> {
        data.check_constraints()?;
        Ok(Self {
            id: Uuid::new_v4(),
            guardian_type: data.guardian_type,
            guardian_fname: data.guardian_fname,
            guardian_lname: data.guardian_lname,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewGuardian {
    pub guardian_type: Option<String>,
    pub guardian_fname: Option<String>,
    pub guardian_lname: Option<String>,
}

impl NewGuardian {
    /// True when no column carries a value.
    pub fn is_empty(&self) -> bool {
        self.guardian_type.is_none() && self.guardian_fname.is_none() && self.guardian_lname.is_none()
    }

    pub fn check_constraints(&self) -> DomainResult<()> {
        max_len_opt("guardian_type", self.guardian_type.as_deref(), GUARDIAN_TYPE_MAX_LEN)?;
        max_len_opt("guardian_fname", self.guardian_fname.as_deref(), GUARDIAN_NAME_MAX_LEN)?;
        max_len_opt("guardian_lname", self.guardian_lname.as_deref(), GUARDIAN_NAME_MAX_LEN)
    }
}

/// Sponsor who receives messages about the children they support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Godparent {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl Godparent {
    pub fn new(data: NewGodparent) -> DomainResult<Self> {
        data.check_constraints()?;
        Ok(Self {
            id: Uuid::new_v4(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGodparent {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl NewGodparent {
    pub fn check_constraints(&self) -> DomainResult<()> {
        required("first_name", &self.first_name)?;
        max_len("first_name", &self.first_name, GODPARENT_NAME_MAX_LEN)?;
        required("last_name", &self.last_name)?;
        max_len("last_name", &self.last_name, GODPARENT_NAME_MAX_LEN)?;
        max_len_opt("email", self.email.as_deref(), GODPARENT_EMAIL_MAX_LEN)
    }
}
