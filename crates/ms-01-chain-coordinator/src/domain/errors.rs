//! Error types for the chain coordinator
//!
//! Two families reach callers:
//!
//! - **validation**: a required namespace argument was missing;
//! - **configuration**: a client or adapter was never wired.
//!
//! Storage failures never show up here; the session storage boundary
//! absorbs them.

use std::fmt;

use shared_types::ChainNamespace;

/// Which client family an operation asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientFamily {
    /// Network switching and approved-network queries.
    Network,
    /// Connect/disconnect.
    Connection,
}

impl ClientFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientFamily::Network => "network",
            ClientFamily::Connection => "connection",
        }
    }

    /// Name of the client as it appears in error messages.
    pub fn client_name(&self) -> &'static str {
        match self {
            ClientFamily::Network => "NetworkController client",
            ClientFamily::Connection => "ConnectionController client",
        }
    }
}

impl fmt::Display for ClientFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatorError {
    #[error("Chain namespace is required to {operation}")]
    NamespaceRequired { operation: &'static str },

    #[error("Universal adapter's {} is not set", .family.client_name())]
    UniversalClientNotSet { family: ClientFamily },

    #[error("Chain namespace is required to resolve the {}", .family.client_name())]
    NamespaceRequiredForClient { family: ClientFamily },

    #[error("Chain adapter not found for namespace {namespace}")]
    AdapterNotFound { namespace: ChainNamespace },

    #[error("{} not set for namespace {namespace}", .family.client_name())]
    ClientNotSet {
        family: ClientFamily,
        namespace: ChainNamespace,
    },

    #[error("Invalid coordinator configuration: {0}")]
    InvalidConfig(String),
}

impl CoordinatorError {
    /// A required argument was missing.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoordinatorError::NamespaceRequired { .. })
    }

    /// Something was never wired up.
    pub fn is_configuration(&self) -> bool {
        !self.is_validation()
    }

    /// The client family involved, for configuration errors about clients.
    pub fn family(&self) -> Option<ClientFamily> {
        match self {
            CoordinatorError::UniversalClientNotSet { family }
            | CoordinatorError::NamespaceRequiredForClient { family }
            | CoordinatorError::ClientNotSet { family, .. } => Some(*family),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_missing_piece() {
        let universal = CoordinatorError::UniversalClientNotSet {
            family: ClientFamily::Connection,
        };
        assert_eq!(
            universal.to_string(),
            "Universal adapter's ConnectionController client is not set"
        );

        let dedicated = CoordinatorError::ClientNotSet {
            family: ClientFamily::Network,
            namespace: ChainNamespace::solana(),
        };
        assert_eq!(
            dedicated.to_string(),
            "NetworkController client not set for namespace solana"
        );
    }

    #[test]
    fn test_classification() {
        let validation = CoordinatorError::NamespaceRequired {
            operation: "reset the account",
        };
        assert!(validation.is_validation());
        assert!(!validation.is_configuration());
        assert_eq!(validation.family(), None);

        let missing = CoordinatorError::AdapterNotFound {
            namespace: ChainNamespace::eip155(),
        };
        assert!(missing.is_configuration());
    }
}
