use formats::document::Document;
use formats::export::{EXPORT_FILE_NAME, EXPORT_MEDIA_TYPE, render_standalone_html};
use formats::project::{PROJECT_MEDIA_TYPE, ProjectError, project_file_name};
use foundation::math::Vec2;
use runtime::frame::Frame;
use scene::renderer::{Lighting, Renderer, View};
use tracing::{info, warn};

use crate::commands::{Artifact, CommandOutput, EditorCommand, NewObject, positive_finite};
use crate::config::EditorConfig;
use crate::controller::{InteractionController, Key};
use crate::error::ModelError;
use crate::import::{ImportGuard, ImportTicket};
use crate::list_sync::{ListRequest, ListSync, ListView};
use crate::model::{PlacementModel, SceneMode};
use crate::notice::Notice;
use crate::reconstruct::reconstruct;

/// Editing session: model, input controller and list view wired together.
///
/// Every entry point leaves the list view in sync with the model.
pub struct Editor<V: ListView> {
    config: EditorConfig,
    model: PlacementModel,
    controller: InteractionController,
    list_sync: ListSync,
    view: V,
    imports: ImportGuard,
    lighting: Lighting,
    frame: Frame,
}

impl<V: ListView> Editor<V> {
    pub fn new(config: EditorConfig, view: V) -> Self {
        let mut editor = Self {
            controller: InteractionController::new(&config),
            list_sync: ListSync::new(config.list_highlight_secs),
            model: PlacementModel::new(SceneMode::Editable),
            imports: ImportGuard::new(),
            lighting: Lighting::editor(),
            frame: Frame::new(0, 0.0),
            config,
            view,
        };
        editor.view.render(&[]);
        editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn model(&self) -> &PlacementModel {
        &self.model
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    fn refresh_list(&mut self) {
        self.list_sync.sync(&mut self.model, &mut self.view);
    }

    pub fn execute(&mut self, command: EditorCommand) -> Result<CommandOutput, Notice> {
        match &command {
            EditorCommand::CreateFloor { width, depth } => {
                positive_finite(&[*width, *depth])?;
                self.model.create_floor(*width, *depth);
                self.refresh_list();
                Ok(CommandOutput::Done)
            }
            EditorCommand::AddShelf { .. } | EditorCommand::AddTile { .. } => {
                let NewObject {
                    kind,
                    dimensions,
                    color,
                } = command.new_object().unwrap_or(Err(Notice::InvalidDimensions))?;
                let id = self.model.add_object(kind, dimensions, color);
                self.refresh_list();
                Ok(CommandOutput::Created(id))
            }
            EditorCommand::DeleteSelected => {
                let id = self.controller.selection().cloned().ok_or(Notice::NothingSelected)?;
                self.model
                    .remove_object(&id)
                    .map_err(|_| Notice::UnknownObject(id.clone()))?;
                self.controller.forget(&id);
                self.refresh_list();
                Ok(CommandOutput::Done)
            }
            EditorCommand::SetGridSnap(on) => {
                self.controller.grid_snap = *on;
                Ok(CommandOutput::Done)
            }
            EditorCommand::Save { name } => self.save(name).map(|artifact| CommandOutput::Artifact {
                notice: Notice::ProjectSaved {
                    file_name: artifact.file_name.clone(),
                },
                artifact,
            }),
            EditorCommand::Export => self.export().map(|artifact| CommandOutput::Artifact {
                notice: Notice::MapExported {
                    file_name: artifact.file_name.clone(),
                },
                artifact,
            }),
        }
    }

    pub fn to_document(&self) -> Document {
        self.model.to_document()
    }

    /// Project file for download as `<name>.json`.
    pub fn save(&self, name: &str) -> Result<Artifact, Notice> {
        let file_name = project_file_name(name).map_err(|err| match err {
            ProjectError::InvalidName(name) => Notice::InvalidProjectName(name),
            _ => Notice::EmptyProjectName,
        })?;
        let contents = self
            .to_document()
            .to_json_string()
            .map_err(|err| Notice::SaveFailed(err.to_string()))?;
        info!(%file_name, objects = self.model.len(), "project saved");
        Ok(Artifact {
            file_name,
            media_type: PROJECT_MEDIA_TYPE,
            contents,
        })
    }

    pub fn export(&self) -> Result<Artifact, Notice> {
        let contents = render_standalone_html(&self.to_document())
            .map_err(|err| Notice::SaveFailed(err.to_string()))?;
        info!(objects = self.model.len(), "map exported");
        Ok(Artifact {
            file_name: EXPORT_FILE_NAME.to_string(),
            media_type: EXPORT_MEDIA_TYPE,
            contents,
        })
    }

    /// Starts a project load. Only one may be in flight.
    pub fn begin_import(&mut self) -> Result<ImportTicket, Notice> {
        self.imports.begin()
    }

    /// Gives up on a load that never produced a payload, such as a closed
    /// file picker.
    pub fn cancel_import(&mut self, ticket: ImportTicket) -> Result<(), Notice> {
        self.imports.cancel(ticket)?;
        info!("project load cancelled");
        Ok(())
    }

    /// Ends a load whose payload could not be read. The model is untouched.
    pub fn abort_import(&mut self, ticket: ImportTicket, reason: &str) -> Notice {
        if let Err(notice) = self.imports.cancel(ticket) {
            return notice;
        }
        warn!(%reason, "project read failed");
        Notice::LoadFailed(reason.to_string())
    }

    /// Replaces the model with the project in `payload`. On any failure the
    /// current model stays as it was.
    pub fn finish_import(&mut self, ticket: ImportTicket, payload: &str) -> Result<Notice, Notice> {
        self.imports.finish(ticket)?;

        let staged = Document::from_json_str(payload)
            .map_err(|err| err.to_string())
            .and_then(|doc| reconstruct(&doc, SceneMode::Editable).map_err(|err| err.to_string()));
        let mut staged = match staged {
            Ok(model) => model,
            Err(reason) => {
                warn!(%reason, "project load failed");
                return Err(Notice::LoadFailed(reason));
            }
        };

        staged.reserve_sequence(self.model.next_sequence());
        self.model = staged;
        self.controller.clear_selection();
        self.refresh_list();
        info!(objects = self.model.len(), "project loaded");
        Ok(Notice::ProjectLoaded {
            objects: self.model.len(),
        })
    }

    /// Convenience for loads that complete synchronously.
    pub fn load(&mut self, payload: &str) -> Result<Notice, Notice> {
        let ticket = self.begin_import()?;
        self.finish_import(ticket, payload)
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.controller.set_viewport(width, height);
    }

    pub fn pointer_down(&mut self, ndc: Vec2) {
        self.controller.pointer_down(&self.model, ndc);
    }

    pub fn pointer_move(&mut self, ndc: Vec2) {
        self.controller.pointer_move(&mut self.model, ndc);
        self.refresh_list();
    }

    pub fn pointer_up(&mut self, ndc: Vec2) {
        if let Some(change) = self.controller.pointer_up(&self.model, ndc) {
            self.list_sync.on_selection(&change, self.frame.time, &mut self.view);
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.controller.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.controller.key_up(key);
    }

    pub fn list_request(&mut self, request: ListRequest) -> Result<(), ModelError> {
        let result = self.list_sync.apply(
            request,
            &mut self.model,
            &mut self.controller,
            self.frame.time,
            &mut self.view,
        );
        self.refresh_list();
        result
    }

    /// Advances the clock by `dt_s` seconds: camera damping and highlight
    /// expiry.
    pub fn tick(&mut self, dt_s: f64) -> Frame {
        self.frame = self.frame.advance(dt_s);
        self.controller.update();
        self.list_sync.tick(self.frame.time, &mut self.view);
        self.refresh_list();
        self.frame
    }

    /// Draws the current frame, handing over label canvases that need a
    /// fresh upload.
    pub fn render_frame(&mut self, renderer: &mut impl Renderer) {
        let uploads = self.model.take_pending_uploads();
        renderer.draw(
            self.frame,
            &View {
                scene: self.model.scene(),
                camera: &self.controller.camera,
                lighting: &self.lighting,
                uploads: &uploads,
            },
        );
    }
}
