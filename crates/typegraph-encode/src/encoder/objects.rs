use typegraph_model::{ConstValue, Object, ObjectKind, Rational};

use super::{Encoder, Kind};
use crate::error::{GraphError, GraphResult};
use crate::frame::{frame, Framer};

/// Tag of a constant's value, framed after the declaration's type key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ValueKind {
    Bool = 1,
    String = 2,
    Int = 3,
    Float = 4,
    Complex = 5,
}

impl<'a> Encoder<'a> {
    /// Frames a declaration: name, kind tag, type key, then kind-specific fields.
    pub(super) fn object_body(&mut self, obj: &'a Object) -> GraphResult<Vec<u8>> {
        let ty = self.ty(obj.ty)?;
        let kind = match obj.kind {
            ObjectKind::Func => Kind::Func,
            ObjectKind::Var => Kind::Var,
            ObjectKind::TypeName => Kind::TypeName,
            ObjectKind::Const(_) => Kind::Const,
            ObjectKind::PkgName { .. } => Kind::PkgName,
        };

        let mut out = Framer::with_capacity(5);
        out.push(obj.name.as_bytes()).push_byte(kind.tag()).push(ty);
        match &obj.kind {
            ObjectKind::Const(value) => {
                let (value_kind, data) = encode_constant(value);
                out.push_byte(value_kind as u8).push(data);
            }
            ObjectKind::PkgName { imported } => {
                let imported = self
                    .universe
                    .package(*imported)
                    .ok_or_else(|| GraphError::DanglingReference {
                        entity: "package",
                        id: imported.to_string(),
                    })?;
                out.push(imported.path.as_bytes());
            }
            ObjectKind::Func | ObjectKind::Var | ObjectKind::TypeName => {}
        }
        Ok(out.finish())
    }
}

/// The value tag and payload of a constant.
///
/// Integers are a sign byte (0 for non-negative, 1 for negative) followed by the
/// big-endian magnitude without leading zero bytes. Floats frame numerator and
/// denominator as integers; complex values frame the real and imaginary floats.
pub fn encode_constant(value: &ConstValue) -> (ValueKind, Vec<u8>) {
    match value {
        ConstValue::Bool(b) => (ValueKind::Bool, vec![u8::from(*b)]),
        ConstValue::String(s) => (ValueKind::String, s.as_bytes().to_vec()),
        ConstValue::Int(i) => (ValueKind::Int, int_bytes(*i)),
        ConstValue::Float(r) => (ValueKind::Float, rational_bytes(r)),
        ConstValue::Complex { re, im } => (
            ValueKind::Complex,
            frame(&[rational_bytes(re), rational_bytes(im)]),
        ),
    }
}

fn int_bytes(value: i128) -> Vec<u8> {
    let magnitude = value.unsigned_abs().to_be_bytes();
    let first = magnitude.iter().position(|&b| b != 0).unwrap_or(magnitude.len());
    let mut out = Vec::with_capacity(1 + magnitude.len() - first);
    out.push(u8::from(value < 0));
    out.extend_from_slice(&magnitude[first..]);
    out
}

fn rational_bytes(value: &Rational) -> Vec<u8> {
    frame(&[int_bytes(value.numer()), int_bytes(value.denom())])
}
