//! Signing algorithm identifiers and lists

use std::fmt;
use std::sync::Arc;

use crate::error::{KeyringError, Result};

/// Name of a public key scheme (e.g. `segwit`, `secp256k1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PubKeyType(&'static str);

impl PubKeyType {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PubKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A signing algorithm a keyring can be asked to use
///
/// Implementations are identified purely by [`SigningAlgo::name`]. Key
/// generation and derivation belong to the keyring backend, not to this trait.
pub trait SigningAlgo: Send + Sync + fmt::Debug {
    /// Scheme name of keys produced under this algorithm
    fn name(&self) -> PubKeyType;
}

/// Ordered list of signing algorithms
#[derive(Clone, Default)]
pub struct SigningAlgoList(Vec<Arc<dyn SigningAlgo>>);

impl SigningAlgoList {
    pub fn new(algos: Vec<Arc<dyn SigningAlgo>>) -> Self {
        Self(algos)
    }

    /// Whether an algorithm with the same name is in the list
    pub fn contains(&self, algo: &dyn SigningAlgo) -> bool {
        let name = algo.name();
        self.0.iter().any(|a| a.name() == name)
    }

    /// Resolve an algorithm by name
    pub fn find(&self, name: &str) -> Result<Arc<dyn SigningAlgo>> {
        self.0
            .iter()
            .find(|a| a.name().as_str() == name)
            .cloned()
            .ok_or_else(|| KeyringError::UnsupportedAlgorithm(name.to_string()))
    }

    pub fn names(&self) -> Vec<PubKeyType> {
        self.0.iter().map(|a| a.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SigningAlgo>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for SigningAlgoList {
    fn eq(&self, other: &Self) -> bool {
        self.names() == other.names()
    }
}

impl Eq for SigningAlgoList {}

impl fmt::Debug for SigningAlgoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl fmt::Display for SigningAlgoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|a| a.name().as_str()).collect();
        f.write_str(&names.join(","))
    }
}

impl FromIterator<Arc<dyn SigningAlgo>> for SigningAlgoList {
    fn from_iter<I: IntoIterator<Item = Arc<dyn SigningAlgo>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(&'static str);

    impl SigningAlgo for Named {
        fn name(&self) -> PubKeyType {
            PubKeyType::new(self.0)
        }
    }

    fn list(names: &[&'static str]) -> SigningAlgoList {
        names
            .iter()
            .map(|&n| Arc::new(Named(n)) as Arc<dyn SigningAlgo>)
            .collect()
    }

    #[test]
    fn test_contains_matches_by_name() {
        let algos = list(&["segwit", "secp256k1"]);
        assert!(algos.contains(&Named("secp256k1")));
        assert!(!algos.contains(&Named("ed25519")));
    }

    #[test]
    fn test_find_unknown_algorithm() {
        let algos = list(&["segwit"]);
        assert_eq!(algos.find("segwit").unwrap().name().as_str(), "segwit");

        let err = algos.find("eth_secp256k1").unwrap_err();
        assert!(matches!(err, KeyringError::UnsupportedAlgorithm(ref n) if n == "eth_secp256k1"));
    }

    #[test]
    fn test_display_joins_names() {
        assert_eq!(list(&["segwit", "secp256k1"]).to_string(), "segwit,secp256k1");
        assert_eq!(SigningAlgoList::default().to_string(), "");
    }

    #[test]
    fn test_equality_ignores_instances() {
        assert_eq!(list(&["segwit"]), list(&["segwit"]));
        assert_ne!(list(&["segwit"]), list(&["segwit", "segwit"]));
    }
}
