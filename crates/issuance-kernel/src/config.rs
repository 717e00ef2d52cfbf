//! Keeper configuration.

use issuance_kernel_lists::{Namespaces, ADDRESS_LISTS_NAMESPACE, PARAMS_NAMESPACE};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for the Keeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperConfig {
    /// Prefix accepted by the default address validator.
    pub address_prefix: String,
    /// Store namespace of address lists.
    pub address_lists_namespace: String,
    /// Store namespace of parameters and counters.
    pub params_namespace: String,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            address_prefix: "bb".to_string(),
            address_lists_namespace: ADDRESS_LISTS_NAMESPACE.to_string(),
            params_namespace: PARAMS_NAMESPACE.to_string(),
        }
    }
}

impl KeeperConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn namespaces(&self) -> Namespaces {
        Namespaces {
            address_lists: self.address_lists_namespace.clone(),
            params: self.params_namespace.clone(),
        }
    }
}
