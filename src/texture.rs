//! Procedural noise textures. Each pixel independently picks one of two colors
//! with equal odds; the result is tiled as a repeating fill pattern. The buffers
//! are plain RGBA so they can be generated and checked without a canvas.

use rand::Rng;

pub type Rgb = [u8; 3];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    rgba: Vec<u8>, // row-major, 4 bytes per pixel
}

impl Texture {
    pub fn noise<R: Rng + ?Sized>(width: u32, height: u32, a: Rgb, b: Rgb, rng: &mut R) -> Self {
        let pixels = width as usize * height as usize;
        let mut rgba = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            let [r, g, b] = if rng.gen_bool(0.5) { a } else { b };
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

/// The fixed set of textures baked once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureKind {
    Grass,
    Forest,
    Obstacle,
    Asphalt,
    Trunk,
    Crown,
}

impl TextureKind {
    pub const ALL: [TextureKind; 6] = [
        TextureKind::Grass,
        TextureKind::Forest,
        TextureKind::Obstacle,
        TextureKind::Asphalt,
        TextureKind::Trunk,
        TextureKind::Crown,
    ];

    /// (width, height, first color, second color)
    pub fn recipe(self) -> (u32, u32, Rgb, Rgb) {
        match self {
            TextureKind::Grass => (80, 80, [144, 238, 144], [124, 218, 124]),
            TextureKind::Forest => (100, 100, [34, 139, 34], [24, 119, 24]),
            TextureKind::Obstacle => (20, 40, [102, 102, 102], [92, 92, 92]),
            TextureKind::Asphalt => (100, 100, [50, 50, 50], [60, 60, 60]),
            TextureKind::Trunk => (10, 40, [139, 69, 19], [119, 49, 9]),
            TextureKind::Crown => (30, 50, [34, 139, 34], [24, 119, 24]),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub struct TextureSet {
    textures: Vec<Texture>, // in TextureKind::ALL order
}

impl TextureSet {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let textures = TextureKind::ALL
            .iter()
            .map(|kind| {
                let (w, h, a, b) = kind.recipe();
                Texture::noise(w, h, a, b, rng)
            })
            .collect();
        Self { textures }
    }

    pub fn get(&self, kind: TextureKind) -> &Texture {
        &self.textures[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureKind, &Texture)> {
        TextureKind::ALL.iter().copied().zip(self.textures.iter())
    }
}
