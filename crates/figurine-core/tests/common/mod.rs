#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use image::{DynamicImage, Rgba, RgbaImage};

use figurine_core::crop::{CropController, CropEvent, CropState};
use figurine_core::geometry::Size;
use figurine_core::surface::{EventSurface, ListenerKind, Subscription};

/// Surface that counts attach/detach calls.
#[derive(Clone, Default)]
pub struct CountingSurface {
    pub attached: Rc<Cell<usize>>,
    pub detached: Rc<Cell<usize>>,
    pub last_kinds: Rc<Cell<Option<ListenerKind>>>,
}

impl CountingSurface {
    pub fn live(&self) -> usize {
        self.attached.get() - self.detached.get()
    }
}

impl EventSurface for CountingSurface {
    fn subscribe(&self, kinds: &[ListenerKind]) -> Subscription {
        self.attached.set(self.attached.get() + 1);
        self.last_kinds.set(kinds.first().copied());
        let detached = Rc::clone(&self.detached);
        Subscription::new(kinds, move || detached.set(detached.get() + 1))
    }
}

/// RGBA image whose red/green channels encode the pixel's column/row
/// (modulo 256), so crops can be checked by reading back a pixel.
pub fn coordinate_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    DynamicImage::ImageRgba8(img)
}

/// Crop state with a bound image in a container, default crop applied.
pub fn loaded_crop_state(
    controller: &CropController,
    container: Size,
    natural: Size,
    aspect_ratio: f32,
) -> CropState {
    let state = CropState::new(aspect_ratio);
    let state = controller.apply(&state, &CropEvent::ContainerResized(container));
    controller.apply(&state, &CropEvent::ImageLoaded { natural })
}

/// Small deterministic generator for property-style loops.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// Uniform float in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        let unit = self.next_u32() as f32 / (1u64 << 31) as f32;
        lo + unit * (hi - lo)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u32() as usize % items.len()]
    }
}
