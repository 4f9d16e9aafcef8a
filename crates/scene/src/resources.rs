use foundation::arena::Arena;
use foundation::color::Rgb;
use foundation::handles::Handle;

use crate::components::{Material, Shape};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GeometryId(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MaterialId(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureId(pub Handle);

pub const LABEL_CANVAS_WIDTH: u32 = 256;
pub const LABEL_CANVAS_HEIGHT: u32 = 64;
pub const LABEL_FONT: &str = "48px sans-serif";

/// Text drawn on an offscreen canvas and uploaded as a texture.
///
/// Pixels are not rasterized here; the record is what a backend needs to
/// redraw the canvas. Every redraw bumps `revision` and flags the texture for
/// upload until the backend acknowledges it.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasTexture {
    pub width: u32,
    pub height: u32,
    pub font: &'static str,
    pub fill: Rgb,
    pub text: String,
    pub revision: u64,
    pub needs_upload: bool,
}

impl CanvasTexture {
    pub fn label(text: &str) -> Self {
        Self {
            width: LABEL_CANVAS_WIDTH,
            height: LABEL_CANVAS_HEIGHT,
            font: LABEL_FONT,
            fill: Rgb::BLACK,
            text: text.to_string(),
            revision: 1,
            needs_upload: true,
        }
    }

    /// Clears the canvas and draws `text` centred.
    pub fn redraw(&mut self, text: &str) {
        self.text = text.to_string();
        self.revision += 1;
        self.needs_upload = true;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ResourceCounts {
    pub geometries: usize,
    pub materials: usize,
    pub textures: usize,
}

/// GPU-side resources referenced by scene nodes.
///
/// Nodes hold ids only; whoever replaces or despawns a node releases what it
/// referenced, so the live counts track exactly what the scene still uses.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    geometries: Arena<Shape>,
    materials: Arena<Material>,
    textures: Arena<CanvasTexture>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_geometry(&mut self, shape: Shape) -> GeometryId {
        GeometryId(self.geometries.insert(shape))
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Shape> {
        self.geometries.get(id.0)
    }

    pub fn release_geometry(&mut self, id: GeometryId) -> bool {
        self.geometries.remove(id.0).is_some()
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        MaterialId(self.materials.insert(material))
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    /// Releases a material together with the texture it maps.
    pub fn release_material(&mut self, id: MaterialId) -> bool {
        let Some(material) = self.materials.remove(id.0) else {
            return false;
        };
        if let Some(map) = material.map {
            self.textures.remove(map.0);
        }
        true
    }

    pub fn add_texture(&mut self, texture: CanvasTexture) -> TextureId {
        TextureId(self.textures.insert(texture))
    }

    pub fn texture(&self, id: TextureId) -> Option<&CanvasTexture> {
        self.textures.get(id.0)
    }

    pub fn texture_mut(&mut self, id: TextureId) -> Option<&mut CanvasTexture> {
        self.textures.get_mut(id.0)
    }

    /// Textures redrawn since the last call, marked as uploaded.
    pub fn take_pending_uploads(&mut self) -> Vec<TextureId> {
        let pending: Vec<TextureId> = self
            .textures
            .iter()
            .filter(|(_, t)| t.needs_upload)
            .map(|(h, _)| TextureId(h))
            .collect();
        for id in &pending {
            if let Some(t) = self.textures.get_mut(id.0) {
                t.needs_upload = false;
            }
        }
        pending
    }

    pub fn counts(&self) -> ResourceCounts {
        ResourceCounts {
            geometries: self.geometries.len(),
            materials: self.materials.len(),
            textures: self.textures.len(),
        }
    }
}
