//! Process-wide default resolver.
//!
//! Lifecycle: the host binds a resolver at startup ([`set_default`] or
//! [`load_default`]) and calls [`t`]/[`t_with`] from anywhere afterwards.
//! Re-binding is allowed and goes through a write lock; readers clone an
//! `Arc` and release the lock before resolving, so concurrent lookups never
//! wait on each other.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::i18n::error::LoadError;
use crate::i18n::resolver::{ResolveArgs, Resolver};

/// The currently bound default resolver.
static DEFAULT: RwLock<Option<Arc<Resolver>>> = RwLock::new(None);

/// What: Bind the process-wide default resolver.
///
/// Inputs:
/// - `resolver`: Resolver to use for [`t`] and [`t_with`]
///
/// Details:
/// - Replaces any previously bound resolver
pub fn set_default(resolver: Resolver) {
    let mut slot = DEFAULT.write().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        tracing::debug!("Replacing default translation table");
    }
    *slot = Some(Arc::new(resolver));
}

/// What: Load a translation file and bind it as the default.
///
/// Inputs:
/// - `path`: Translation file
///
/// Output:
/// - `Ok(())` once bound
///
/// # Errors
/// - Any error of [`Resolver::from_file`]; the previous default stays bound
pub fn load_default(path: &Path) -> Result<(), LoadError> {
    let resolver = Resolver::from_file(path)?;
    tracing::info!(
        path = %path.display(),
        entries = resolver.table().len(),
        "Default translation table loaded"
    );
    set_default(resolver);
    Ok(())
}

/// Unbind the default resolver.
pub fn clear_default() {
    *DEFAULT.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Whether a default resolver is bound.
#[must_use]
pub fn has_default() -> bool {
    DEFAULT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// The bound resolver, if any.
#[must_use]
pub fn default_resolver() -> Option<Arc<Resolver>> {
    DEFAULT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Resolve a key with the default resolver and no arguments.
#[must_use]
pub fn t(key: &str) -> String {
    t_with(key, &ResolveArgs::default())
}

/// What: Resolve a key with the default resolver.
///
/// Inputs:
/// - `key`: Translation key
/// - `args`: Resolution arguments
///
/// Output:
/// - Rendered string
///
/// Details:
/// - With no default bound, behaves like a missing key: the default text or
///   the key, with substitutions applied
#[must_use]
pub fn t_with(key: &str, args: &ResolveArgs) -> String {
    if let Some(resolver) = default_resolver() {
        return resolver.resolve(key, args);
    }
    tracing::debug!("No default translation table bound; returning '{}' untranslated", key);
    Resolver::default().resolve(key, args)
}
