//! Go interface type builder.

use apigen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::doc_fragments;

/// A method signature in an interface.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub params: Vec<String>,
    pub returns: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: None,
        }
    }

    pub fn param(mut self, ty: impl Into<String>) -> Self {
        self.params.push(ty.into());
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    fn signature(&self) -> String {
        let params = self.params.join(", ");
        match &self.returns {
            Some(ret) => format!("{}({}) {}", self.name, params, ret),
            None => format!("{}({})", self.name, params),
        }
    }
}

/// Builder for `type Name interface { ... }` declarations.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    doc: Option<String>,
    embeds: Vec<String>,
    methods: Vec<Method>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            embeds: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn embed(mut self, ty: impl Into<String>) -> Self {
        self.embeds.push(ty.into());
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = doc_fragments(&self.doc);
        let body = self
            .embeds
            .iter()
            .map(CodeFragment::line)
            .chain(self.methods.iter().map(|m| CodeFragment::line(m.signature())))
            .collect();
        fragments.push(CodeFragment::braced(format!("type {} interface", self.name), body));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_interface() {
        let i = Interface::new("BottleController")
            .doc("BottleController is the controller interface for the Bottle actions.")
            .embed("goa.Controller")
            .method(Method::new("Show").param("*ShowBottleContext").returns("error"))
            .build();
        assert_eq!(
            i,
            "// BottleController is the controller interface for the Bottle actions.\ntype BottleController interface {\n\tgoa.Controller\n\tShow(*ShowBottleContext) error\n}\n"
        );
    }
}
