//! Predefined namespace bindings of the static context.

use serde::{Deserialize, Serialize};

pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const FN_NAMESPACE: &str = "http://www.w3.org/2005/xpath-functions";
pub const MATH_NAMESPACE: &str = "http://www.w3.org/2005/xpath-functions/math";
pub const MAP_NAMESPACE: &str = "http://www.w3.org/2005/xpath-functions/map";
pub const ARRAY_NAMESPACE: &str = "http://www.w3.org/2005/xpath-functions/array";
pub const ERR_NAMESPACE: &str = "http://www.w3.org/2005/xqt-errors";
pub const LOCAL_NAMESPACE: &str = "http://www.w3.org/2005/xquery-local-functions";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticBinding {
    pub prefix: String,
    pub uri: String,
}

/// Ordered list of predefined prefix bindings.
///
/// Later bindings shadow earlier ones with the same prefix, matching how
/// prolog declarations behave.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticContext {
    bindings: Vec<StaticBinding>,
}

impl StaticContext {
    pub fn empty() -> StaticContext {
        StaticContext::default()
    }

    /// Prefixes every XPath 3.1 processor predeclares.
    pub fn xpath() -> StaticContext {
        StaticContext::empty()
            .with("xml", XML_NAMESPACE)
            .with("xs", XS_NAMESPACE)
            .with("xsi", XSI_NAMESPACE)
            .with("fn", FN_NAMESPACE)
            .with("math", MATH_NAMESPACE)
            .with("map", MAP_NAMESPACE)
            .with("array", ARRAY_NAMESPACE)
            .with("err", ERR_NAMESPACE)
    }

    /// XPath prefixes plus `local`.
    pub fn xquery() -> StaticContext {
        StaticContext::xpath().with("local", LOCAL_NAMESPACE)
    }

    /// Look up a preset by name (`empty`, `xpath`, `xquery`).
    pub fn preset(name: &str) -> Option<StaticContext> {
        match name {
            "empty" => Some(StaticContext::empty()),
            "xpath" => Some(StaticContext::xpath()),
            "xquery" => Some(StaticContext::xquery()),
            _ => None,
        }
    }

    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> StaticContext {
        self.bindings.push(StaticBinding {
            prefix: prefix.into(),
            uri: uri.into(),
        });
        self
    }

    pub fn bindings(&self) -> &[StaticBinding] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl From<Vec<StaticBinding>> for StaticContext {
    fn from(bindings: Vec<StaticBinding>) -> Self {
        StaticContext { bindings }
    }
}
