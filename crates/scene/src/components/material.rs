use foundation::color::Rgb;

use crate::resources::TextureId;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MaterialKind {
    /// Lit by scene lights.
    Standard,
    /// Unlit flat colour.
    Basic,
    LineBasic,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Rgb,
    pub double_sided: bool,
    pub transparent: bool,
    pub map: Option<TextureId>,
}

impl Material {
    pub fn standard(color: Rgb) -> Self {
        Self {
            kind: MaterialKind::Standard,
            color,
            double_sided: false,
            transparent: false,
            map: None,
        }
    }

    pub fn basic(color: Rgb) -> Self {
        Self {
            kind: MaterialKind::Basic,
            ..Self::standard(color)
        }
    }

    pub fn line(color: Rgb) -> Self {
        Self {
            kind: MaterialKind::LineBasic,
            ..Self::standard(color)
        }
    }

    pub fn textured(map: TextureId) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color: Rgb::WHITE,
            double_sided: false,
            transparent: true,
            map: Some(map),
        }
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}
