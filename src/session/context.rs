/// Identity of the test that owns a capture.
///
/// Earlier revisions inferred this by walking the call stack inside the capture core; the
/// core now takes it as an explicit value so stack inspection stays in the test-framework
/// integration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestContext {
    test_class: String,
    test_name: String,
}

impl TestContext {
    /// Bundle a test class and test name.
    pub fn new(test_class: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            test_class: test_class.into(),
            test_name: test_name.into(),
        }
    }

    /// Class (or module path) of the owning test.
    pub fn test_class(&self) -> &str {
        &self.test_class
    }

    /// Name of the owning test function.
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Default artifact name for captures that never set one: `<class>_<test>`.
    ///
    /// Class paths contain separators (`::`, `.`) outside the allowed artifact character
    /// set, so anything that is not an ASCII letter, digit, or underscore is mapped to an
    /// underscore.
    pub fn default_artifact_name(&self) -> String {
        format!("{}_{}", self.test_class, self.test_name)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/context.rs"]
mod tests;
