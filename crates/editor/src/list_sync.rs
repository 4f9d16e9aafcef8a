use std::f64::consts::FRAC_PI_2;

use formats::document::ObjectKind;
use foundation::color::Rgb;
use foundation::ids::ObjectId;
use foundation::time::Time;
use runtime::timer::FlashTimers;
use tracing::debug;

use crate::controller::{InteractionController, SelectionChange};
use crate::error::ModelError;
use crate::model::{ModelEvent, PlacementModel};
use crate::object::Dimensions;

/// What the list shows for one object.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub label: String,
    pub dimensions: Dimensions,
    pub color: Rgb,
}

/// External object list, e.g. a sidebar.
pub trait ListView {
    /// Replaces every row. Must be idempotent.
    fn render(&mut self, rows: &[ListRow]);
    fn highlight(&mut self, id: &ObjectId);
    fn clear_highlight(&mut self, id: &ObjectId);
    fn scroll_into_view(&mut self, id: &ObjectId);
}

/// Edits coming from the list, keyed by object id.
#[derive(Debug, Clone, PartialEq)]
pub enum ListRequest {
    Rename { id: ObjectId, text: String },
    UpdateProperties { id: ObjectId, dimensions: Dimensions, color: Rgb },
    /// Quarter turn about the vertical axis.
    Rotate { id: ObjectId },
    Reorder(Vec<ObjectId>),
    /// Row `dragged` was dropped onto row `target`.
    MoveBefore { dragged: ObjectId, target: ObjectId },
    Select(ObjectId),
    Delete(ObjectId),
}

pub fn rows(model: &PlacementModel) -> Vec<ListRow> {
    model
        .objects()
        .iter()
        .map(|o| ListRow {
            id: o.id.clone(),
            kind: o.kind,
            label: o.label.clone(),
            dimensions: o.dimensions,
            color: o.color,
        })
        .collect()
}

/// Keeps a [`ListView`] in step with the model and the scene selection.
#[derive(Debug, Clone)]
pub struct ListSync {
    highlight_secs: f64,
    highlights: FlashTimers<ObjectId>,
}

impl ListSync {
    pub fn new(highlight_secs: f64) -> Self {
        Self {
            highlight_secs,
            highlights: FlashTimers::new(),
        }
    }

    pub fn is_highlighted(&self, id: &ObjectId) -> bool {
        self.highlights.is_active(id)
    }

    /// Drains model events and re-renders once if any of them shows in the
    /// list. Returns whether a render happened.
    pub fn sync(&mut self, model: &mut PlacementModel, view: &mut impl ListView) -> bool {
        let events = model.drain_events();
        for event in &events {
            if let ModelEvent::ObjectRemoved(id) = event {
                self.highlights.cancel(id);
            }
            if let ModelEvent::Replaced = event {
                self.highlights.clear();
            }
        }
        if !events.iter().any(ModelEvent::affects_list) {
            return false;
        }
        view.render(&rows(model));
        true
    }

    /// Highlights and reveals the row of a newly selected object. The
    /// highlight fades after the configured time; selecting again restarts it.
    pub fn on_selection(&mut self, change: &SelectionChange, now: Time, view: &mut impl ListView) {
        if let SelectionChange::Selected(id) = change {
            view.highlight(id);
            view.scroll_into_view(id);
            self.highlights.start(id.clone(), now, self.highlight_secs);
        }
    }

    pub fn tick(&mut self, now: Time, view: &mut impl ListView) {
        for id in self.highlights.expire(now) {
            view.clear_highlight(&id);
        }
    }

    /// Applies a list request to the model and controller.
    pub fn apply(
        &mut self,
        request: ListRequest,
        model: &mut PlacementModel,
        controller: &mut InteractionController,
        now: Time,
        view: &mut impl ListView,
    ) -> Result<(), ModelError> {
        debug!(?request, "list request");
        match request {
            ListRequest::Rename { id, text } => model.rename(&id, &text),
            ListRequest::UpdateProperties {
                id,
                dimensions,
                color,
            } => model.update_properties(&id, dimensions, color),
            ListRequest::Rotate { id } => model.rotate(&id, FRAC_PI_2).map(|_| ()),
            ListRequest::Reorder(order) => model.reorder(&order),
            ListRequest::MoveBefore { dragged, target } => model.move_before(&dragged, &target),
            ListRequest::Select(id) => {
                if !model.contains(&id) {
                    return Err(ModelError::UnknownObject(id));
                }
                controller.select(id.clone());
                self.on_selection(&SelectionChange::Selected(id), now, view);
                Ok(())
            }
            ListRequest::Delete(id) => {
                model.remove_object(&id)?;
                controller.forget(&id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{ListRequest, ListRow, ListSync, ListView};
    use crate::controller::{InteractionController, SelectionChange};
    use crate::model::PlacementModel;
    use crate::object::Dimensions;
    use formats::document::ObjectKind;
    use foundation::color::Rgb;
    use foundation::ids::ObjectId;
    use foundation::time::Time;
    use pretty_assertions::assert_eq;

    /// In-memory list that records what it was asked to do.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingList {
        pub rows: Vec<ListRow>,
        pub renders: usize,
        pub highlighted: Vec<ObjectId>,
        pub scrolled_to: Vec<ObjectId>,
    }

    impl ListView for RecordingList {
        fn render(&mut self, rows: &[ListRow]) {
            self.rows = rows.to_vec();
            self.renders += 1;
        }

        fn highlight(&mut self, id: &ObjectId) {
            if !self.highlighted.contains(id) {
                self.highlighted.push(id.clone());
            }
        }

        fn clear_highlight(&mut self, id: &ObjectId) {
            self.highlighted.retain(|h| h != id);
        }

        fn scroll_into_view(&mut self, id: &ObjectId) {
            self.scrolled_to.push(id.clone());
        }
    }

    fn labels(list: &RecordingList) -> Vec<&str> {
        list.rows.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn renders_once_per_batch_and_skips_moves() {
        let mut model = PlacementModel::default();
        let mut list = RecordingList::default();
        let mut sync = ListSync::new(1.5);

        let a = model.add_object(ObjectKind::Shelf, Dimensions::new(1.0, 1.0, 1.0), Rgb::WHITE);
        model.add_object(ObjectKind::Tile, Dimensions::new(1.0, 0.2, 1.0), Rgb::WHITE);
        assert!(sync.sync(&mut model, &mut list));
        assert_eq!(list.renders, 1);
        assert_eq!(labels(&list), vec!["Shelf", "Tile"]);

        model
            .move_to(&a, foundation::math::Vec3::new(3.0, 0.5, 0.0))
            .expect("move");
        assert!(!sync.sync(&mut model, &mut list));
        assert_eq!(list.renders, 1);
    }

    #[test]
    fn selection_highlight_fades_and_restarts() {
        let mut list = RecordingList::default();
        let mut sync = ListSync::new(1.5);
        let id = ObjectId::sequential(0);
        let change = SelectionChange::Selected(id.clone());

        sync.on_selection(&change, Time(0.0), &mut list);
        assert_eq!(list.highlighted, vec![id.clone()]);
        assert_eq!(list.scrolled_to, vec![id.clone()]);

        sync.on_selection(&change, Time(1.0), &mut list);
        sync.tick(Time(2.0), &mut list);
        assert_eq!(list.highlighted, vec![id.clone()]);
        sync.tick(Time(2.5), &mut list);
        assert!(list.highlighted.is_empty());
        assert!(!sync.is_highlighted(&id));
    }

    #[test]
    fn requests_edit_the_model() {
        let mut model = PlacementModel::default();
        let mut controller = InteractionController::default();
        let mut list = RecordingList::default();
        let mut sync = ListSync::new(1.5);
        let a = model.add_object(ObjectKind::Shelf, Dimensions::new(1.0, 1.0, 1.0), Rgb::WHITE);
        let b = model.add_object(ObjectKind::Shelf, Dimensions::new(1.0, 1.0, 1.0), Rgb::WHITE);
        let now = Time(0.0);

        let requests = vec![
            ListRequest::Rename {
                id: a.clone(),
                text: "Dairy".to_string(),
            },
            ListRequest::Rotate { id: a.clone() },
            ListRequest::MoveBefore {
                dragged: b.clone(),
                target: a.clone(),
            },
            ListRequest::Select(a.clone()),
        ];
        for r in requests {
            sync.apply(r, &mut model, &mut controller, now, &mut list)
                .expect("apply");
        }
        sync.sync(&mut model, &mut list);
        assert_eq!(labels(&list), vec!["Shelf", "Dairy"]);
        assert_eq!(controller.selection(), Some(&a));
        assert_eq!(
            model.object(&a).expect("a").rotation.y,
            std::f64::consts::FRAC_PI_2
        );

        sync.apply(ListRequest::Delete(a.clone()), &mut model, &mut controller, now, &mut list)
            .expect("delete");
        sync.sync(&mut model, &mut list);
        assert_eq!(controller.selection(), None);
        assert!(!sync.is_highlighted(&a));
        assert_eq!(list.rows.len(), 1);

        let err = sync.apply(ListRequest::Select(a.clone()), &mut model, &mut controller, now, &mut list);
        assert!(err.is_err());
    }
}
