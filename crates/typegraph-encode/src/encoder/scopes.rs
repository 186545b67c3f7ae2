use typegraph_model::ScopeId;

use super::Encoder;
use crate::error::GraphResult;
use crate::frame::Framer;
use crate::keys::Key;

impl<'a> Encoder<'a> {
    /// Stages one node per scope: the binding count, the key of each bound
    /// declaration, the child count and the key of each child node.
    pub(super) fn scope_tree(&mut self, package: &str, id: ScopeId) -> GraphResult<Key> {
        let scope = self.lookup_scope(id)?;
        let key = self.registry.mint_scope(package);

        let mut out = Framer::with_capacity(2 + scope.bindings.len() + scope.children.len());
        out.push_uvarint(scope.bindings.len() as u64);
        for obj in scope.bindings.values() {
            let obj = self.object(*obj)?;
            out.push(obj);
        }

        out.push_uvarint(scope.children.len() as u64);
        for child in &scope.children {
            let child = self.scope_tree(package, *child)?;
            out.push(child);
        }

        self.batch.set(key.clone(), out.finish());
        Ok(key)
    }
}
