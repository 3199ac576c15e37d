//! # Client Resolution Policy
//!
//! Picks the client that serves a network or connection request: the shared
//! universal adapter's, or the one wired to the target namespace.
//!
//! ## Rule
//!
//! ```text
//! use_universal = (hint_matches && !has_dedicated_adapter) || no_adapters
//! ```
//!
//! `hint_matches` compares the persisted session marker for the family
//! against the configured marker. `has_dedicated_adapter` holds when the
//! configured EVM namespace is registered with the dedicated adapter tag; in
//! that case the namespace's own wiring wins even over a recorded
//! protocol-wide session. Only that one namespace/tag pair is checked.

use shared_types::ChainNamespace;

use crate::domain::{
    ChainAdapter, ClientFamily, ConnectionClientHandle, CoordinatorConfig, CoordinatorError,
    CoordinatorState, NetworkClientHandle, UniversalAdapter,
};

/// Where a client came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientSource {
    Universal,
    Namespace(ChainNamespace),
}

impl ClientSource {
    /// Label used on the resolution counter.
    pub fn label(&self) -> &'static str {
        match self {
            ClientSource::Universal => "universal",
            ClientSource::Namespace(_) => "namespace",
        }
    }
}

/// Whether the stored marker for `family` means "connected through the
/// protocol-wide session".
pub fn hint_matches(family: ClientFamily, hint: Option<&str>, config: &CoordinatorConfig) -> bool {
    let marker = match family {
        ClientFamily::Network => config.network_hint_marker.as_str(),
        ClientFamily::Connection => config.connection_hint_marker.as_str(),
    };
    hint == Some(marker)
}

pub fn has_dedicated_adapter(state: &CoordinatorState, config: &CoordinatorConfig) -> bool {
    state
        .chains
        .get(&config.dedicated_evm_namespace)
        .and_then(|adapter| adapter.adapter_type)
        == Some(config.dedicated_evm_adapter)
}

/// Decide the source without touching any client handle.
///
/// Universal wins without a target namespace; otherwise the target must be
/// resolvable and registered.
pub fn decide_source(
    family: ClientFamily,
    requested: Option<&ChainNamespace>,
    hint: Option<&str>,
    state: &CoordinatorState,
    config: &CoordinatorConfig,
) -> Result<ClientSource, CoordinatorError> {
    let use_universal = (hint_matches(family, hint, config)
        && !has_dedicated_adapter(state, config))
        || state.no_adapters;

    if use_universal {
        return Ok(ClientSource::Universal);
    }

    let target = state
        .target(requested)
        .ok_or(CoordinatorError::NamespaceRequiredForClient { family })?;

    if !state.chains.contains(target) {
        return Err(CoordinatorError::AdapterNotFound {
            namespace: target.clone(),
        });
    }

    Ok(ClientSource::Namespace(target.clone()))
}

fn pick<T>(
    family: ClientFamily,
    source: ClientSource,
    state: &CoordinatorState,
    universal: impl Fn(&UniversalAdapter) -> Option<T>,
    dedicated: impl Fn(&ChainAdapter) -> Option<T>,
) -> Result<(T, ClientSource), CoordinatorError> {
    match &source {
        ClientSource::Universal => universal(&state.universal_adapter)
            .map(|client| (client, source.clone()))
            .ok_or(CoordinatorError::UniversalClientNotSet { family }),
        ClientSource::Namespace(namespace) => {
            let adapter =
                state
                    .chains
                    .get(namespace)
                    .ok_or_else(|| CoordinatorError::AdapterNotFound {
                        namespace: namespace.clone(),
                    })?;
            dedicated(adapter)
                .map(|client| (client, source.clone()))
                .ok_or_else(|| CoordinatorError::ClientNotSet {
                    family,
                    namespace: namespace.clone(),
                })
        }
    }
}

pub fn resolve_network_client(
    requested: Option<&ChainNamespace>,
    hint: Option<&str>,
    state: &CoordinatorState,
    config: &CoordinatorConfig,
) -> Result<(NetworkClientHandle, ClientSource), CoordinatorError> {
    let family = ClientFamily::Network;
    let source = decide_source(family, requested, hint, state, config)?;
    pick(
        family,
        source,
        state,
        |universal| universal.network_client.clone(),
        |adapter| adapter.network_client.clone(),
    )
}

pub fn resolve_connection_client(
    requested: Option<&ChainNamespace>,
    hint: Option<&str>,
    state: &CoordinatorState,
    config: &CoordinatorConfig,
) -> Result<(ConnectionClientHandle, ClientSource), CoordinatorError> {
    let family = ClientFamily::Connection;
    let source = decide_source(family, requested, hint, state, config)?;
    pick(
        family,
        source,
        state,
        |universal| universal.connection_client.clone(),
        |adapter| adapter.connection_client.clone(),
    )
}
