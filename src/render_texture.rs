use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::id::TextureId;

#[derive(Debug)]
struct RenderTextureRecord {
    width: u32,
    height: u32,
    native_texture: Option<TextureId>,
    offset: usize,
    empty: bool,
}

/// Shared record of an off-screen render target.
///
/// The render-target manager creates one per target and hands clones to the accumulator
/// through [`RenderState::set_render_texture_info`](crate::RenderState::set_render_texture_info).
/// While the target is active the accumulator tracks whether exactly one default-shaded
/// quad was drawn into it; if so, that quad's source texture can stand in for the target
/// and the copy into a fresh texture is skipped.
///
/// Clones share the record. Equality is identity: two infos are equal only if they are
/// clones of the same target.
#[derive(Clone)]
pub struct RenderTextureInfo(Rc<RefCell<RenderTextureRecord>>);

impl RenderTextureInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self(Rc::new(RefCell::new(RenderTextureRecord {
            width,
            height,
            native_texture: None,
            offset: 0,
            empty: true,
        })))
    }

    pub fn width(&self) -> u32 {
        self.0.borrow().width
    }

    pub fn height(&self) -> u32 {
        self.0.borrow().height
    }

    /// The reuse candidate: the only texture drawn into this target so far, if any.
    pub fn native_texture(&self) -> Option<TextureId> {
        self.0.borrow().native_texture
    }

    /// Quad index at which the candidate draw was recorded.
    pub fn offset(&self) -> usize {
        self.0.borrow().offset
    }

    /// True while no quad has targeted this render texture.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().empty
    }

    /// Returns the record to its pristine state so the target can be rendered again.
    pub fn clear(&self) {
        let mut record = self.0.borrow_mut();
        record.native_texture = None;
        record.offset = 0;
        record.empty = true;
    }

    /// Registers a quad drawn into this target.
    ///
    /// Only the first quad can become a candidate, and only when `eligible`; any other
    /// quad clears the candidate for good.
    pub(crate) fn record_draw(&self, texture: TextureId, offset: usize, eligible: bool) {
        let mut record = self.0.borrow_mut();
        if eligible && record.empty {
            record.native_texture = Some(texture);
            record.offset = offset;
        } else {
            record.native_texture = None;
        }
        record.empty = false;
    }

    pub(crate) fn clear_candidate(&self) {
        self.0.borrow_mut().native_texture = None;
    }
}

impl PartialEq for RenderTextureInfo {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for RenderTextureInfo {}

impl fmt::Debug for RenderTextureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0.borrow();
        f.debug_struct("RenderTextureInfo")
            .field("id", &Rc::as_ptr(&self.0))
            .field("width", &record.width)
            .field("height", &record.height)
            .field("native_texture", &record.native_texture)
            .field("offset", &record.offset)
            .field("empty", &record.empty)
            .finish()
    }
}
