//! Build-target resolver
//!
//! `ResolutionTable` is the injection table: for every capability contract it
//! holds the native and the web implementation (either may be missing).
//! `resolve` binds a build's imports for exactly one target, all at once:
//!
//! - a known module name binds to that target's implementation
//! - an unknown module name is left unresolved and reported in
//!   `ResolvedBuild::passthrough`, never substituted
//! - a known contract with no implementation for the target fails the whole
//!   resolution; no partially linked build is returned

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{
    BuildError, Contract, GestureProvider, GraphicsProvider, NavigationProvider,
    NetworkStatusProvider, PlatformTarget,
};
use crate::infrastructure::config::Config;
use crate::modules::shims::{
    Argon2Hasher, HashCapability, InsecureHashShim, NativeGestures, NativeGraphics,
    NativeNetworkStatus, NativeScreens, WebGestures, WebGraphics, WebNetworkStatus, WebScreens,
};

/// Native and web implementation of one contract
#[derive(Clone)]
pub struct TargetPair<T> {
    pub native: Option<T>,
    pub web: Option<T>,
}

impl<T> TargetPair<T> {
    pub fn both(native: T, web: T) -> Self {
        Self {
            native: Some(native),
            web: Some(web),
        }
    }

    pub fn native_only(native: T) -> Self {
        Self {
            native: Some(native),
            web: None,
        }
    }

    pub fn for_target(&self, target: PlatformTarget) -> Option<&T> {
        match target {
            PlatformTarget::Native => self.native.as_ref(),
            PlatformTarget::Web => self.web.as_ref(),
        }
    }
}

#[derive(Clone)]
pub struct ResolutionTable {
    pub network: TargetPair<Arc<dyn NetworkStatusProvider>>,
    pub hash: TargetPair<HashCapability>,
    pub gesture: TargetPair<Arc<dyn GestureProvider>>,
    pub graphics: TargetPair<Arc<dyn GraphicsProvider>>,
    pub navigation: TargetPair<Arc<dyn NavigationProvider>>,
}

impl ResolutionTable {
    /// Table with every contract implemented for both targets
    pub fn standard(config: &Config) -> Self {
        Self {
            network: TargetPair::both(
                Arc::new(NativeNetworkStatus::new(config.connectivity_probe.clone())),
                Arc::new(WebNetworkStatus::default()),
            ),
            hash: TargetPair::both(
                HashCapability::Secure(Arc::new(Argon2Hasher)),
                HashCapability::Insecure(InsecureHashShim),
            ),
            gesture: TargetPair::both(Arc::new(NativeGestures), Arc::new(WebGestures)),
            graphics: TargetPair::both(Arc::new(NativeGraphics), Arc::new(WebGraphics)),
            navigation: TargetPair::both(
                Arc::new(NativeScreens::default()),
                Arc::new(WebScreens),
            ),
        }
    }

    fn implements(&self, contract: Contract, target: PlatformTarget) -> bool {
        match contract {
            Contract::NetworkStatus => self.network.for_target(target).is_some(),
            Contract::SecureHash => self.hash.for_target(target).is_some(),
            Contract::Gesture => self.gesture.for_target(target).is_some(),
            Contract::Graphics => self.graphics.for_target(target).is_some(),
            Contract::Navigation => self.navigation.for_target(target).is_some(),
        }
    }

    /// Bind every import of a build for `target`
    pub fn resolve<S: AsRef<str>>(
        &self,
        target: PlatformTarget,
        imports: &[S],
    ) -> Result<ResolvedBuild, BuildError> {
        let mut contracts = BTreeSet::new();
        let mut passthrough: Vec<String> = Vec::new();

        for import in imports {
            let name = import.as_ref();
            match Contract::from_module(name) {
                Some(contract) => {
                    contracts.insert(contract);
                }
                None => {
                    if !passthrough.iter().any(|p| p == name) {
                        passthrough.push(name.to_string());
                    }
                }
            }
        }

        let missing: Vec<Contract> = contracts
            .iter()
            .copied()
            .filter(|c| !self.implements(*c, target))
            .collect();
        if !missing.is_empty() {
            let err = BuildError::MissingImplementation {
                target,
                contracts: missing,
            };
            tracing::error!("resolver: {}", err);
            return Err(err);
        }

        for name in &passthrough {
            tracing::warn!("resolver: '{}' is not a known capability, left unresolved", name);
        }

        let pick = |contract: Contract| contracts.contains(&contract);
        let build = ResolvedBuild {
            target,
            network: pick(Contract::NetworkStatus)
                .then(|| self.network.for_target(target).cloned())
                .flatten(),
            hash: pick(Contract::SecureHash)
                .then(|| self.hash.for_target(target).cloned())
                .flatten(),
            gesture: pick(Contract::Gesture)
                .then(|| self.gesture.for_target(target).cloned())
                .flatten(),
            graphics: pick(Contract::Graphics)
                .then(|| self.graphics.for_target(target).cloned())
                .flatten(),
            navigation: pick(Contract::Navigation)
                .then(|| self.navigation.for_target(target).cloned())
                .flatten(),
            passthrough,
        };

        tracing::info!(
            "resolver: linked {} capabilit(ies) for target '{}'",
            contracts.len(),
            target
        );
        Ok(build)
    }
}

/// Capabilities linked for one target
pub struct ResolvedBuild {
    target: PlatformTarget,
    network: Option<Arc<dyn NetworkStatusProvider>>,
    hash: Option<HashCapability>,
    gesture: Option<Arc<dyn GestureProvider>>,
    graphics: Option<Arc<dyn GraphicsProvider>>,
    navigation: Option<Arc<dyn NavigationProvider>>,
    passthrough: Vec<String>,
}

impl ResolvedBuild {
    pub fn target(&self) -> PlatformTarget {
        self.target
    }

    /// Imports that matched no contract
    pub fn passthrough(&self) -> &[String] {
        &self.passthrough
    }

    pub fn linked(&self) -> Vec<Contract> {
        Contract::ALL
            .into_iter()
            .filter(|c| match c {
                Contract::NetworkStatus => self.network.is_some(),
                Contract::SecureHash => self.hash.is_some(),
                Contract::Gesture => self.gesture.is_some(),
                Contract::Graphics => self.graphics.is_some(),
                Contract::Navigation => self.navigation.is_some(),
            })
            .collect()
    }

    pub fn network(&self) -> Result<&Arc<dyn NetworkStatusProvider>, BuildError> {
        self.network
            .as_ref()
            .ok_or(BuildError::NotLinked(Contract::NetworkStatus))
    }

    pub fn hash(&self) -> Result<&HashCapability, BuildError> {
        self.hash
            .as_ref()
            .ok_or(BuildError::NotLinked(Contract::SecureHash))
    }

    pub fn gesture(&self) -> Result<&Arc<dyn GestureProvider>, BuildError> {
        self.gesture
            .as_ref()
            .ok_or(BuildError::NotLinked(Contract::Gesture))
    }

    pub fn graphics(&self) -> Result<&Arc<dyn GraphicsProvider>, BuildError> {
        self.graphics
            .as_ref()
            .ok_or(BuildError::NotLinked(Contract::Graphics))
    }

    pub fn navigation(&self) -> Result<&Arc<dyn NavigationProvider>, BuildError> {
        self.navigation
            .as_ref()
            .ok_or(BuildError::NotLinked(Contract::Navigation))
    }
}
