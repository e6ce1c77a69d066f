use quadstate::Shader;

/// Shader stand-in with configurable capabilities.
#[derive(Debug, Clone)]
pub struct TestShader {
    pub label: &'static str,
    pub default_equivalent: bool,
    pub requires_empty_submission: bool,
}

impl TestShader {
    /// A shader with its own program.
    pub fn custom(label: &'static str) -> Self {
        Self {
            label,
            default_equivalent: false,
            requires_empty_submission: false,
        }
    }

    /// A shader whose output matches the default shader (e.g. zero-strength tint).
    pub fn default_like(label: &'static str) -> Self {
        Self {
            default_equivalent: true,
            ..Self::custom(label)
        }
    }

    /// A shader that must run even with no quads.
    pub fn always_submitted(label: &'static str) -> Self {
        Self {
            requires_empty_submission: true,
            ..Self::custom(label)
        }
    }
}

impl Shader for TestShader {
    fn label(&self) -> &str {
        self.label
    }

    fn is_default_equivalent(&self) -> bool {
        self.default_equivalent
    }

    fn requires_empty_submission(&self) -> bool {
        self.requires_empty_submission
    }
}
