use crate::action::ActionToken;
use crate::bag::ExtrasBag;
use serde::{Deserialize, Serialize};

/// A single value stored in an [`ExtrasBag`].
///
/// The variant set mirrors what inter-process payloads can carry: primitives,
/// strings, flat arrays, nested bags, raster images, and opaque action
/// handles owned by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ExtraValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    Str(String),
    IntList(Vec<i32>),
    ValueList(Vec<ExtraValue>),
    Bag(ExtrasBag),
    Image(ImageData),
    Action(ActionToken),
}

/// Raw ARGB raster supplied by a caller, typically an icon.
///
/// Dimensions are carried explicitly so consumers can validate size without
/// decoding anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub argb: Vec<u8>,
}

impl ImageData {
    /// Builds an image of the given dimensions with zeroed pixels.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            argb: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Whether the image is an exact `size` x `size` square.
    pub fn is_square_of(&self, size: u32) -> bool {
        self.width == size && self.height == size
    }
}
