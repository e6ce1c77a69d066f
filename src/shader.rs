//! Shader capabilities the accumulator needs to make batching decisions.
//!
//! Program selection and execution live in the back end. The accumulator only asks two
//! questions of a shader and otherwise treats it as an identity: two quads can share a
//! batch only if they were set up with the very same shader instance.

use std::fmt;
use std::rc::Rc;

pub trait Shader: fmt::Debug {
    /// Short name used in trace output.
    fn label(&self) -> &str {
        "shader"
    }

    /// True if drawing with this shader is indistinguishable from the built-in default
    /// shader, so the shared default instance can be bound in its place.
    fn is_default_equivalent(&self) -> bool {
        false
    }

    /// True if a batch using this shader must reach the back end even when it received no
    /// quads (for example a shader that clears or fills its target on its own).
    fn requires_empty_submission(&self) -> bool {
        false
    }
}

/// The built-in pass-through shader. Every default-equivalent shader is batched as this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultShader;

impl Shader for DefaultShader {
    fn label(&self) -> &str {
        "default"
    }

    fn is_default_equivalent(&self) -> bool {
        true
    }
}

/// Identity comparison for shared shaders.
///
/// Compares data addresses only; vtable pointers of the same type may differ between
/// codegen units.
#[inline]
pub fn shader_ptr_eq(a: &Rc<dyn Shader>, b: &Rc<dyn Shader>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}
