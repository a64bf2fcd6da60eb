use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an externally owned resource embedded in a payload.
///
/// Components embed a symbol and pictures embed a pixmap. The store never
/// looks inside these resources; it only keeps them alive. Cloning a handle
/// increments the reference count and dropping it decrements the count, so
/// the resource lives exactly as long as some payload (or the caller) holds
/// it. Two handles are equal when they point at the same resource instance.
#[derive(Clone, Default)]
pub struct Resource(Option<Arc<dyn Any + Send + Sync>>);

impl Resource {
    /// Wrap a new resource value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    /// Wrap an already shared resource.
    pub fn from_arc(resource: Arc<dyn Any + Send + Sync>) -> Self {
        Self(Some(resource))
    }

    /// The empty handle.
    pub const fn none() -> Self {
        Self(None)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the resource as `T` if it holds one of that type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|r| r.downcast_ref::<T>())
    }

    /// Whether both handles refer to the same resource (or are both empty).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Number of live handles to the resource; 0 for the empty handle.
    pub fn ref_count(&self) -> usize {
        self.0.as_ref().map_or(0, Arc::strong_count)
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(r) => write!(f, "Resource({:p})", Arc::as_ptr(r)),
            None => write!(f, "Resource(none)"),
        }
    }
}
