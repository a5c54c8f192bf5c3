//! Per-compiler-type adapters and their process-wide cache.
//!
//! An application may compile queries through several base compiler types.
//! Each one gets exactly one [`OracleAdapter`], created on first request and
//! shared afterwards, so repeated lookups are cheap and return the same
//! adapter.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use oxide_orm::QueryCompiler;
use tracing::debug;

use crate::compiler::OracleCompiler;
use crate::error::Result;
use crate::options::OracleOptions;

/// The Oracle specialization of the base compiler type `C`.
///
/// Wrapping a `C` yields an [`OracleCompiler<C>`], which behaves like the
/// base compiler except for pagination and row decoding.
pub struct OracleAdapter<C> {
    options: Arc<OracleOptions>,
    _base: PhantomData<fn() -> C>,
}

impl<C> fmt::Debug for OracleAdapter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleAdapter")
            .field("base", &type_name::<C>())
            .field("options", &self.options)
            .finish()
    }
}

impl<C: QueryCompiler> OracleAdapter<C> {
    const fn new(options: Arc<OracleOptions>) -> Self {
        Self {
            options,
            _base: PhantomData,
        }
    }

    #[must_use]
    pub fn options(&self) -> &OracleOptions {
        &self.options
    }

    /// Specializes a base compiler instance.
    #[must_use]
    pub fn wrap(&self, base: C) -> OracleCompiler<C> {
        OracleCompiler::new(base, Arc::clone(&self.options))
    }

    /// Name of the base compiler type, for diagnostics.
    #[must_use]
    pub fn base_type_name(&self) -> &'static str {
        type_name::<C>()
    }
}

type AdapterMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// A cache holding one [`OracleAdapter`] per base compiler type.
///
/// Safe to share between threads. Concurrent first requests for the same
/// type agree on a single adapter.
#[derive(Debug, Default)]
pub struct AdapterRegistry {
    options: Arc<OracleOptions>,
    adapters: RwLock<AdapterMap>,
}

impl AdapterRegistry {
    /// Creates an empty registry with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry whose adapters share `options`.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::InvalidAlias`](crate::OracleError::InvalidAlias)
    /// when `options` fails [`OracleOptions::validate`].
    pub fn with_options(options: OracleOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options: Arc::new(options),
            adapters: RwLock::default(),
        })
    }

    #[must_use]
    pub fn options(&self) -> &OracleOptions {
        &self.options
    }

    /// Returns the adapter for base compiler type `C`, creating it on first
    /// use. Every later call with the same `C` returns the same adapter.
    #[must_use]
    pub fn get<C: QueryCompiler + 'static>(&self) -> Arc<OracleAdapter<C>> {
        let key = TypeId::of::<C>();

        let cached = self
            .adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(adapter) = cached.and_then(downcast::<C>) {
            return adapter;
        }

        let mut adapters = self
            .adapters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // another thread may have inserted it between the two locks
        if let Some(adapter) = adapters.get(&key).cloned().and_then(downcast::<C>) {
            return adapter;
        }

        let adapter = Arc::new(OracleAdapter::<C>::new(Arc::clone(&self.options)));
        adapters.insert(key, adapter.clone());
        debug!(base = type_name::<C>(), cached = adapters.len(), "created oracle adapter");
        adapter
    }

    /// Number of adapters created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn downcast<C: QueryCompiler + 'static>(
    entry: Arc<dyn Any + Send + Sync>,
) -> Option<Arc<OracleAdapter<C>>> {
    entry.downcast::<OracleAdapter<C>>().ok()
}

/// The process-wide registry, using default options.
#[must_use]
pub fn registry() -> &'static AdapterRegistry {
    static REGISTRY: OnceLock<AdapterRegistry> = OnceLock::new();
    REGISTRY.get_or_init(AdapterRegistry::new)
}

/// Returns the process-wide Oracle adapter for base compiler type `C`.
///
/// ```
/// use std::sync::Arc;
/// use oxide_orm::SqlCompiler;
/// use oxide_sql_oracle::get_compiler;
///
/// let first = get_compiler::<SqlCompiler>();
/// let second = get_compiler::<SqlCompiler>();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[must_use]
pub fn get_compiler<C: QueryCompiler + 'static>() -> Arc<OracleAdapter<C>> {
    registry().get::<C>()
}
