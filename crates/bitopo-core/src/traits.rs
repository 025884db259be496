use sha2::{Digest, Sha256};

use crate::definition::NodeTypeDef;
use crate::types::{TypeInfo, TypeRef};

/// A Rust type with a node in the explicit type graph.
pub trait Described {
    fn type_info() -> TypeRef;
}

/// A type that may cross a process boundary.
///
/// Usually derived with `#[derive(Transferable)]`, which also places the type
/// under the transferability marker in the type graph.
pub trait Transferable: Described {
    /// The stable type id, see [`stable_type_id`].
    const TYPE_ID: u128;
}

/// A participant type in the topology.
///
/// The returned record is the capability table for the type: which
/// interfaces it declares (and how they are marked at the use site) and which
/// of its own methods carry lifecycle markers.
pub trait NodeType: 'static {
    fn definition() -> NodeTypeDef;
}

/// Derives a stable 128-bit type id from a type name: the first 16 bytes of
/// SHA-256 over the UTF-8 name, read big-endian.
pub fn stable_type_id(name: &str) -> u128 {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(bytes)
}

macro_rules! primitive_described {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Described for $ty {
                fn type_info() -> TypeRef {
                    TypeInfo::primitive(stringify!($ty))
                }
            }
        )*
    };
}

primitive_described!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl Described for String {
    fn type_info() -> TypeRef {
        TypeInfo::class("String").transferable().build()
    }
}

impl<T: Described> Described for Vec<T> {
    fn type_info() -> TypeRef {
        container("Vec", T::type_info())
    }
}

impl<T: Described> Described for Option<T> {
    fn type_info() -> TypeRef {
        container("Option", T::type_info())
    }
}

// Containers are transferable exactly when their element is.
fn container(outer: &str, inner: TypeRef) -> TypeRef {
    let builder = TypeInfo::class(format!("{outer}<{}>", inner.name()));
    if inner.is_transferable() {
        builder.transferable().build()
    } else {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;

    struct Handle;

    impl Described for Handle {
        fn type_info() -> TypeRef {
            TypeInfo::class("Handle").build()
        }
    }

    #[test]
    fn test_stable_type_id_is_deterministic() {
        assert_eq!(stable_type_id("Counter"), stable_type_id("Counter"));
        assert_ne!(stable_type_id("Counter"), stable_type_id("Gauge"));
        assert_ne!(stable_type_id("Counter"), 0);
    }

    #[test]
    fn test_builtin_descriptions() {
        let int = i32::type_info();
        assert_eq!(int.name(), "i32");
        assert_eq!(int.kind(), TypeKind::Primitive);
        assert!(String::type_info().is_transferable());
        assert!(Vec::<u8>::type_info().is_transferable());
        assert_eq!(Option::<String>::type_info().name(), "Option<String>");
    }

    #[test]
    fn test_container_of_opaque_type_is_not_transferable() {
        assert!(!Vec::<Handle>::type_info().is_transferable());
        assert!(!Option::<Handle>::type_info().is_transferable());
    }
}
