use std::{
    cell::{Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

/// A single-threaded, reference-counted resource with interior mutability.
///
/// `StResource` is how the engine shares chunks and the chunk map between the
/// [`World`](crate::engine_state::voxels::world::World) and the neighbor lookups it
/// hands to every chunk. It uses `Rc<RefCell<T>>` internally, so a conflicting
/// borrow panics immediately instead of deadlocking.
///
/// # Type Parameters
/// - `T`: The type of the contained resource
///
/// # Examples
///
/// ```
/// use voxel_world::core::StResource;
///
/// let counter = StResource::new(0);
/// let clone = counter.clone();
///
/// *clone.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
///
/// let weak = counter.downgrade();
/// assert_eq!(weak.upgrade().map(|c| *c.get()), Some(1));
/// ```
///
/// # Panics
/// - Panics if a shared borrow is held while trying to borrow mutably
/// - Panics if a mutable borrow is held while trying to borrow at all
pub struct StResource<T> {
    /// The shared cell holding the resource.
    pub resource: Rc<RefCell<T>>,
}

impl<T> StResource<T> {
    /// Creates a new `StResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RefCell::new(resource)),
        }
    }

    /// Returns a guard that allows reading the contained value.
    ///
    /// # Panics
    /// Panics if the value is currently mutably borrowed.
    pub fn get(&self) -> Ref<'_, T> {
        self.resource.borrow()
    }

    /// Returns a guard that allows modifying the contained value.
    ///
    /// # Panics
    /// Panics if the value is currently borrowed.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.resource.borrow_mut()
    }

    /// Creates a non-owning handle to the same resource.
    ///
    /// Holders of a [`WeakStResource`] never keep the resource alive, which is
    /// what lets a chunk look back into the chunk map that owns it.
    pub fn downgrade(&self) -> WeakStResource<T> {
        WeakStResource {
            resource: Rc::downgrade(&self.resource),
        }
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

/// A non-owning counterpart of [`StResource`].
pub struct WeakStResource<T> {
    resource: Weak<RefCell<T>>,
}

impl<T> WeakStResource<T> {
    /// Returns the strong handle if the resource is still alive.
    pub fn upgrade(&self) -> Option<StResource<T>> {
        self.resource
            .upgrade()
            .map(|resource| StResource { resource })
    }
}

impl<T> Clone for WeakStResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_value() {
        let resource = StResource::new(vec![1, 2, 3]);
        let clone = resource.clone();
        clone.get_mut().push(4);
        assert_eq!(resource.get().len(), 4);
    }

    #[test]
    fn weak_handle_does_not_keep_resource_alive() {
        let resource = StResource::new(5u8);
        let weak = resource.downgrade();
        assert!(weak.upgrade().is_some());
        drop(resource);
        assert!(weak.upgrade().is_none());
    }
}
