use crate::error::ContainerError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// How often a capability's factory runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Lifetime {
    /// The factory runs on every resolution; each caller gets a fresh instance.
    Transient,
    /// The factory ran once at registration; every caller shares that instance.
    Singleton,
}

type ErasedInstance = Box<dyn Any + Send + Sync>;
type ErasedFactory = Arc<dyn Fn(&Container) -> Result<ErasedInstance, ContainerError> + Send + Sync>;

struct Entry {
    type_name: &'static str,
    lifetime: Lifetime,
    factory: ErasedFactory,
}

/// Capability registry and resolver.
///
/// Capabilities are keyed by the [`TypeId`] of the requested type, usually a trait
/// object such as `dyn StorageCapability`, and are always handed out as `Arc<C>`.
/// The handle is cheap to clone; clones share one table guarded by a single lock.
///
/// Factories receive the container so they can resolve their own dependencies.
/// The lock is never held while a factory runs. Concurrent `register_singleton`
/// calls for the same capability may therefore each run their factory; the last
/// insert wins and the other instances are dropped.
#[derive(Clone, Default)]
pub struct Container {
    entries: Arc<RwLock<FxHashMap<TypeId, Entry>>>,
}

impl Container {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transient factory for `C`, replacing any previous entry.
    pub fn register<C, F>(&self, factory: F)
    where
        C: ?Sized + Send + Sync + 'static,
        F: Fn(&Self) -> Result<Arc<C>, ContainerError> + Send + Sync + 'static,
    {
        let erased: ErasedFactory = Arc::new(move |container: &Self| {
            factory(container).map(|instance| Box::new(instance) as ErasedInstance)
        });
        self.insert::<C>(Lifetime::Transient, erased);
    }

    /// Builds `C` once and registers the result as a singleton.
    ///
    /// The entry only becomes visible after `factory` succeeded, so concurrent
    /// resolutions see either the previous entry or the finished one. Racing
    /// registrations of the same capability each build an instance and the last
    /// one inserted is kept.
    ///
    /// # Errors
    /// Returns the factory's error; nothing is registered in that case.
    pub fn register_singleton<C, F>(&self, factory: F) -> Result<(), ContainerError>
    where
        C: ?Sized + Send + Sync + 'static,
        F: FnOnce(&Self) -> Result<Arc<C>, ContainerError>,
    {
        let instance = factory(self).inspect_err(|err| {
            warn!(capability = type_name::<C>(), error = %err, "Singleton construction failed");
        })?;
        self.register_instance(instance);
        Ok(())
    }

    /// Registers an already-built instance as the singleton for `C`.
    pub fn register_instance<C>(&self, instance: Arc<C>)
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let erased: ErasedFactory = Arc::new(move |_: &Self| {
            Ok::<_, ContainerError>(Box::new(Arc::clone(&instance)) as ErasedInstance)
        });
        self.insert::<C>(Lifetime::Singleton, erased);
    }

    /// Resolves `C`.
    ///
    /// # Errors
    /// * [`ContainerError::Unregistered`] if nothing is registered for `C`.
    /// * [`ContainerError::TypeMismatch`] if the stored factory produced another type.
    /// * Whatever error a transient factory returns.
    pub fn resolve<C>(&self) -> Result<Arc<C>, ContainerError>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let factory = self.entries.read().get(&TypeId::of::<C>()).map(|e| Arc::clone(&e.factory));

        let Some(factory) = factory else {
            warn!(capability = type_name::<C>(), "Resolving unregistered capability");
            return Err(ContainerError::unregistered(type_name::<C>()));
        };

        let instance = (*factory)(self)?;
        instance
            .downcast::<Arc<C>>()
            .map(|boxed| *boxed)
            .map_err(|_| ContainerError::type_mismatch(type_name::<C>()))
    }

    #[must_use]
    pub fn contains<C>(&self) -> bool
    where
        C: ?Sized + 'static,
    {
        self.entries.read().contains_key(&TypeId::of::<C>())
    }

    /// Lifetime policy registered for `C`, if any.
    #[must_use]
    pub fn lifetime_of<C>(&self) -> Option<Lifetime>
    where
        C: ?Sized + 'static,
    {
        self.entries.read().get(&TypeId::of::<C>()).map(|e| e.lifetime)
    }

    /// Registered capabilities as `(type name, lifetime)`, sorted by name.
    #[must_use]
    pub fn capabilities(&self) -> Vec<(&'static str, Lifetime)> {
        let mut list: Vec<_> =
            self.entries.read().values().map(|e| (e.type_name, e.lifetime)).collect();
        list.sort_unstable_by_key(|(name, _)| *name);
        list
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes the entry for `C`. Returns whether one existed.
    pub fn unregister<C>(&self) -> bool
    where
        C: ?Sized + 'static,
    {
        let removed = self.entries.write().remove(&TypeId::of::<C>()).is_some();
        if removed {
            debug!(capability = type_name::<C>(), "Capability unregistered");
        }
        removed
    }

    /// Drops every registration, singletons included.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        let count = entries.len();
        entries.clear();
        debug!(count, "Container cleared");
    }

    fn insert<C>(&self, lifetime: Lifetime, factory: ErasedFactory)
    where
        C: ?Sized + 'static,
    {
        let entry = Entry { type_name: type_name::<C>(), lifetime, factory };
        let replaced = self.entries.write().insert(TypeId::of::<C>(), entry).is_some();
        debug!(capability = type_name::<C>(), %lifetime, replaced, "Capability registered");
    }

    #[cfg(test)]
    fn insert_erased<C>(&self, factory: ErasedFactory)
    where
        C: ?Sized + 'static,
    {
        self.insert::<C>(Lifetime::Transient, factory);
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container").field("capabilities", &self.capabilities()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    trait Counter: Send + Sync {
        fn id(&self) -> usize;
    }

    struct Numbered(usize);

    impl Counter for Numbered {
        fn id(&self) -> usize {
            self.0
        }
    }

    #[test]
    fn wrong_factory_output_is_a_type_mismatch() {
        let container = Container::new();
        container.insert_erased::<dyn Counter>(Arc::new(|_: &Container| {
            Ok::<_, ContainerError>(Box::new(Arc::new(42_u32)) as ErasedInstance)
        }));

        let err = container.resolve::<dyn Counter>().err().expect("mismatch");
        assert!(matches!(err, ContainerError::TypeMismatch { .. }));
    }

    #[test]
    fn singleton_factory_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let container = Container::new();
        let seen = Arc::clone(&calls);
        container
            .register_singleton::<dyn Counter, _>(move |_| {
                let n = seen.fetch_add(1, Ordering::SeqCst);
                let counter: Arc<dyn Counter> = Arc::new(Numbered(n));
                Ok(counter)
            })
            .expect("register");

        for _ in 0..5 {
            assert_eq!(container.resolve::<dyn Counter>().expect("resolve").id(), 0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_singleton_leaves_no_entry() {
        let container = Container::new();
        let result = container.register_singleton::<dyn Counter, _>(|_| {
            Err(ContainerError::construction("dyn Counter", "disk full"))
        });

        assert!(matches!(result, Err(ContainerError::Construction { .. })));
        assert!(!container.contains::<dyn Counter>());
    }

    #[test]
    fn reregistration_replaces_the_entry() {
        let container = Container::new();
        container.register_instance::<dyn Counter>(Arc::new(Numbered(1)));
        container.register::<dyn Counter, _>(|_| {
            let counter: Arc<dyn Counter> = Arc::new(Numbered(2));
            Ok(counter)
        });

        assert_eq!(container.len(), 1);
        assert_eq!(container.lifetime_of::<dyn Counter>(), Some(Lifetime::Transient));
        assert_eq!(container.resolve::<dyn Counter>().expect("resolve").id(), 2);
    }

    #[test]
    fn debug_lists_capability_names() {
        let container = Container::new();
        container.register_instance::<dyn Counter>(Arc::new(Numbered(1)));
        let rendered = format!("{container:?}");
        assert!(rendered.contains("Counter"));
        assert!(rendered.contains("Singleton"));
    }
}
