//! Ticker symbol → price-index identifier resolution.
//!
//! The price index identifies assets by its own slug (`bitcoin`), not by
//! ticker (`BTC`), and tickers are not unique in its catalog (`eth` maps to
//! `ethereum` and to several bridged tokens). Collisions keep the shortest
//! identifier; on equal length the first one seen stays.

use crate::data::{DataError, PriceIndex};
use crate::domain::AssetCatalogEntry;
use std::cell::OnceCell;
use std::collections::HashMap;
use tracing::info;

/// Lowercase ticker → canonical identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolMap {
    ids: HashMap<String, String>,
}

impl SymbolMap {
    /// Index a full catalog. Every symbol in the catalog gets a key.
    pub fn from_catalog<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a AssetCatalogEntry>,
    {
        let mut map = Self::default();
        for entry in entries {
            map.insert(&entry.symbol, &entry.id);
        }
        map
    }

    /// Insert one entry, replacing an existing one only with a strictly shorter id.
    pub fn insert(&mut self, symbol: &str, id: &str) {
        let key = symbol.to_lowercase();
        match self.ids.get_mut(&key) {
            Some(existing) if id.len() < existing.len() => *existing = id.to_string(),
            Some(_) => {}
            None => {
                self.ids.insert(key, id.to_string());
            }
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.ids.get(&symbol.to_lowercase()).map(String::as_str)
    }

    pub fn lookup(&self, symbol: &str) -> Result<&str, DataError> {
        self.get(symbol).ok_or_else(|| DataError::UnknownSymbol {
            symbol: symbol.to_string(),
        })
    }

    /// Resolve a set of tickers; fails on the first unknown one.
    ///
    /// Keys of the result are the tickers as given.
    pub fn resolve<'t, I>(&self, tickers: I) -> Result<HashMap<String, String>, DataError>
    where
        I: IntoIterator<Item = &'t str>,
    {
        tickers
            .into_iter()
            .map(|t| self.lookup(t).map(|id| (t.to_string(), id.to_string())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ids.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Resolves one ticker at a time, fetching the catalog on first use only.
///
/// The map lives as long as the resolver and is never persisted.
pub struct SymbolResolver<'p> {
    index: &'p dyn PriceIndex,
    map: OnceCell<SymbolMap>,
}

impl<'p> SymbolResolver<'p> {
    pub fn new(index: &'p dyn PriceIndex) -> Self {
        Self {
            index,
            map: OnceCell::new(),
        }
    }

    pub fn resolve_one(&self, symbol: &str) -> Result<String, DataError> {
        self.symbol_map()?.lookup(symbol).map(str::to_string)
    }

    pub fn is_loaded(&self) -> bool {
        self.map.get().is_some()
    }

    fn symbol_map(&self) -> Result<&SymbolMap, DataError> {
        if let Some(map) = self.map.get() {
            return Ok(map);
        }
        let catalog = self.index.fetch_catalog()?;
        let map = SymbolMap::from_catalog(&catalog);
        info!(
            source = self.index.name(),
            entries = catalog.len(),
            symbols = map.len(),
            "built symbol map"
        );
        Ok(self.map.get_or_init(|| map))
    }
}
