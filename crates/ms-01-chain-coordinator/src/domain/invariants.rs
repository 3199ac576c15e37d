//! Aggregate invariants
//!
//! Checked after every committed mutation; a violation is logged, not
//! raised.

use super::entities::CoordinatorState;

/// A violated aggregate invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `active_chain` names a namespace with no registry entry.
    ActiveChainUnregistered(String),
    /// A record's namespace differs from the key it is stored under.
    AdapterKeyMismatch { key: String, adapter: String },
}

/// The active namespace, when set, is registered.
///
/// `initialize` activates the first namespace before registering it, so a
/// state that is mid bring-up may fail this check; callers only run it on
/// committed states.
pub fn check_active_chain_registered(state: &CoordinatorState) -> Result<(), InvariantViolation> {
    match &state.active_chain {
        Some(ns) if !state.chains.contains(ns) => {
            Err(InvariantViolation::ActiveChainUnregistered(ns.to_string()))
        }
        _ => Ok(()),
    }
}

pub fn check_adapter_keys(state: &CoordinatorState) -> Result<(), InvariantViolation> {
    for key in state.chains.namespaces() {
        if let Some(adapter) = state.chains.get(&key) {
            if adapter.chain_namespace != key {
                return Err(InvariantViolation::AdapterKeyMismatch {
                    key: key.to_string(),
                    adapter: adapter.chain_namespace.to_string(),
                });
            }
        }
    }
    Ok(())
}

pub fn check_all(state: &CoordinatorState) -> Result<(), InvariantViolation> {
    check_active_chain_registered(state)?;
    check_adapter_keys(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ChainAdapter;
    use shared_types::ChainNamespace;

    #[test]
    fn test_empty_state_is_valid() {
        assert!(check_all(&CoordinatorState::default()).is_ok());
    }

    #[test]
    fn test_unregistered_active_chain_is_reported() {
        let state = CoordinatorState {
            active_chain: Some(ChainNamespace::solana()),
            ..Default::default()
        };
        assert_eq!(
            check_active_chain_registered(&state),
            Err(InvariantViolation::ActiveChainUnregistered(
                "solana".to_string()
            ))
        );
    }

    #[test]
    fn test_registered_active_chain_is_valid() {
        let mut state = CoordinatorState::default();
        state
            .chains
            .register(ChainAdapter::bare(ChainNamespace::solana()));
        state.active_chain = Some(ChainNamespace::solana());
        assert!(check_all(&state).is_ok());
    }
}
