use super::object::SceneObject;

/// Stable index of an object in the scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ObjectHandle(u32);

/// Ordered collection of scene objects.
///
/// The manager is an append-only arena: `add_object` returns a handle that
/// stays valid for the scene's lifetime (objects are never removed), and
/// draw order is exactly insertion order — there is no depth sorting.
#[derive(Debug, Default)]
pub struct SceneManager {
    objects: Vec<SceneObject>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object and returns its stable handle. O(1) amortized;
    /// duplicates are not detected.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectHandle {
        let handle = ObjectHandle(self.objects.len() as u32);
        self.objects.push(object);
        handle
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Resolves a handle. Handles from this manager are always valid because
    /// the arena is append-only.
    #[inline]
    pub fn object(&self, handle: ObjectHandle) -> &SceneObject {
        &self.objects[handle.0 as usize]
    }

    #[inline]
    pub fn object_mut(&mut self, handle: ObjectHandle) -> &mut SceneObject {
        &mut self.objects[handle.0 as usize]
    }

    /// Iterates objects in insertion order (the draw order).
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::scene::MeshHandle;

    fn obj(x: f32) -> SceneObject {
        SceneObject::new(MeshHandle(0), Vec2::new(x, 0.0))
    }

    #[test]
    fn draw_order_is_insertion_order_not_position_order() {
        let mut scene = SceneManager::new();
        scene.add_object(obj(50.0));
        scene.add_object(obj(-10.0));
        scene.add_object(obj(3.0));

        let xs: Vec<f32> = scene.iter().map(|o| o.position().x).collect();
        assert_eq!(xs, vec![50.0, -10.0, 3.0]);
    }

    #[test]
    fn handles_resolve_to_their_objects() {
        let mut scene = SceneManager::new();
        let a = scene.add_object(obj(1.0));
        let b = scene.add_object(obj(2.0));

        assert_eq!(scene.object(a).position().x, 1.0);
        assert_eq!(scene.object(b).position().x, 2.0);

        scene.object_mut(a).set_position(Vec2::new(9.0, 0.0));
        assert_eq!(scene.object(a).position().x, 9.0);
        assert_eq!(scene.object(b).position().x, 2.0);
    }
}
