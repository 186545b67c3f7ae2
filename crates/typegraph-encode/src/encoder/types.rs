use typegraph_model::{Type, TypeId};

use super::{Encoder, Kind};
use crate::error::{GraphError, GraphResult};
use crate::frame::Framer;

impl<'a> Encoder<'a> {
    /// Frames a composite type. Components are resolved first, which stages their
    /// own bodies as a side effect; `id` itself is already registered, so a
    /// component that leads back to it resolves to its key instead of recursing.
    pub(super) fn type_body(&mut self, id: TypeId, ty: &'a Type) -> GraphResult<Vec<u8>> {
        let mut out = Framer::new();
        match ty {
            Type::Basic { name } => {
                // Basic types are resolved by name in the registry and never get here.
                return Err(GraphError::UnsupportedConstruct {
                    detail: format!("basic type `{name}` ({id}) has no body"),
                });
            }
            Type::Signature {
                params,
                results,
                recv,
                variadic,
            } => {
                let params = self.ty(*params)?;
                let results = self.ty(*results)?;
                let recv = match recv {
                    Some(recv) => Some(self.object(*recv)?),
                    None => None,
                };
                out.push_byte(Kind::Signature.tag())
                    .push(params)
                    .push(results)
                    .push(recv.as_ref().map(|k| k.as_bytes()).unwrap_or_default())
                    .push_byte(u8::from(*variadic));
            }
            Type::Named {
                underlying,
                obj,
                methods,
            } => {
                let underlying = (*underlying).ok_or_else(|| GraphError::UnsupportedConstruct {
                    detail: format!("named type {id} has no underlying type"),
                })?;
                let underlying = self.ty(underlying)?;
                let typename = self.object(*obj)?;
                out.push_byte(Kind::Named.tag())
                    .push(underlying)
                    .push(typename)
                    .push_uvarint(methods.len() as u64);
                for method in methods {
                    let method = self.object(*method)?;
                    out.push(method);
                }
            }
            Type::Slice { elem } => {
                let elem = self.ty(*elem)?;
                out.push_byte(Kind::Slice.tag()).push(elem);
            }
            Type::Pointer { elem } => {
                let elem = self.ty(*elem)?;
                out.push_byte(Kind::Pointer.tag()).push(elem);
            }
            Type::Interface { methods, embeddeds } => {
                out.push_byte(Kind::Interface.tag())
                    .push_uvarint(methods.len() as u64);
                for method in methods {
                    let method = self.object(*method)?;
                    out.push(method);
                }
                out.push_uvarint(embeddeds.len() as u64);
                for embedded in embeddeds {
                    let embedded = self.ty(*embedded)?;
                    out.push(embedded);
                }
            }
            Type::Array { elem, len } => {
                let elem = self.ty(*elem)?;
                out.push_byte(Kind::Array.tag()).push(elem).push_uvarint(*len);
            }
            Type::Struct { fields } => {
                out.push_byte(Kind::Struct.tag());
                for field in fields {
                    let var = self.object(field.var)?;
                    out.push(var).push(field.tag.as_bytes());
                }
            }
            Type::Tuple { vars } => {
                out.push_byte(Kind::Tuple.tag());
                for var in vars {
                    let var = self.object(*var)?;
                    out.push(var);
                }
            }
            Type::Map { key, elem } => {
                let key = self.ty(*key)?;
                let elem = self.ty(*elem)?;
                out.push_byte(Kind::Map.tag()).push(key).push(elem);
            }
            Type::Chan { elem, dir } => {
                let elem = self.ty(*elem)?;
                out.push_byte(Kind::Chan.tag()).push(elem).push_byte(dir.as_byte());
            }
        }
        Ok(out.finish())
    }
}
