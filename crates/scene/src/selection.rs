use foundation::ids::ObjectId;

/// At most one selected object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<ObjectId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ObjectId> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, id: &ObjectId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Replaces the selection. Returns `true` if it changed.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if self.current.as_ref() == Some(&id) {
            return false;
        }
        self.current = Some(id);
        true
    }

    /// Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Clears the selection only if it is `id`.
    pub fn forget(&mut self, id: &ObjectId) -> bool {
        if self.is_selected(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
