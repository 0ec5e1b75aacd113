use crate::trail::Trail;

/// The trail highlighted on the results screen, tracked by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrailSelection {
    selected_id: Option<String>,
}

impl TrailSelection {
    /// Start with the first trail selected, if there is one.
    pub fn new(trails: &[Trail]) -> Self {
        Self {
            selected_id: trails.first().map(|t| t.id.clone()),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Select the trail with `id`. Ids not in `trails` are ignored and the
    /// previous selection is kept. Returns whether the selection changed.
    pub fn select(&mut self, trails: &[Trail], id: &str) -> bool {
        if !trails.iter().any(|t| t.id == id) {
            return false;
        }
        let changed = self.selected_id.as_deref() != Some(id);
        self.selected_id = Some(id.to_string());
        changed
    }

    /// The trail to show details for: the selected one, or the first trail
    /// when nothing valid is selected.
    pub fn resolve<'a>(&self, trails: &'a [Trail]) -> Option<&'a Trail> {
        self.selected_id
            .as_deref()
            .and_then(|id| trails.iter().find(|t| t.id == id))
            .or_else(|| trails.first())
    }

    /// Position of the resolved trail in `trails`
    pub fn index(&self, trails: &[Trail]) -> Option<usize> {
        let trail = self.resolve(trails)?;
        trails.iter().position(|t| t.id == trail.id)
    }
}
