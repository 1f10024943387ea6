use std::collections::HashMap;
use std::sync::Arc;

use scholar_core::{Error, Tool};

/// Mapping from RPC method name to the tool that serves it.
///
/// Built once at startup and immutable afterwards; shared across request
/// tasks behind an `Arc`.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its declared method name.
    ///
    /// # Errors
    /// Two tools claiming the same method is a startup error, never a
    /// silent overwrite; returns `Error::DuplicateMethod`.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), Error> {
        let method = tool.method();
        if self.tools.contains_key(method) {
            return Err(Error::DuplicateMethod(method.to_string()));
        }
        self.tools.insert(method.to_string(), tool);
        Ok(())
    }

    /// Look up the tool serving `method`.
    #[must_use]
    pub fn get(&self, method: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(method)
    }

    /// The registered method names, for startup logging.
    #[must_use]
    pub fn methods(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Shut down every registered tool, releasing held resources.
    pub async fn shutdown(&self) {
        for tool in self.tools.values() {
            tool.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::{Map, Value};

    struct StaticTool(&'static str);

    #[async_trait]
    impl Tool for StaticTool {
        fn method(&self) -> &'static str {
            self.0
        }

        async fn call(&self, _params: Map<String, Value>) -> Result<Value, Error> {
            Ok(Value::Null)
        }

        async fn shutdown(&self) {}
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(StaticTool("scholar.search_articles")))
            .unwrap();

        assert!(registry.get("scholar.search_articles").is_some());
        assert!(registry.get("scholar.unknown").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_method_is_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(StaticTool("tool.a"))).unwrap();

        let err = registry
            .register(Arc::new(StaticTool("tool.a")))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateMethod(m) if m == "tool.a"));
        assert_eq!(registry.len(), 1);
    }
}
