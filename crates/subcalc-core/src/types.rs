//! Value types accepted by the document builder.
//!
//! Which Rust types may be stored is decided at compile time: a value can be
//! passed to [`JsonDocument::set`](crate::JsonDocument::set) only if its type
//! implements the sealed [`IntoJsonValue`] trait, and to
//! [`JsonDocument::set_nested`](crate::JsonDocument::set_nested) only if it
//! also implements [`ScalarValue`]. Anything else is rejected by the compiler,
//! so no value is ever silently stringified.

/// Opaque reference to an object stored in a document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) usize);

/// A node in a document tree. Integers and floats stay distinct, and arrays
/// are homogeneous.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    IntegerArray(Vec<i64>),
    StringArray(Vec<String>),
    /// A nested object owned by the same document.
    Object(ObjectId),
}

mod private {
    pub trait Sealed {}
}

/// Types that can be stored as a root field of a document.
pub trait IntoJsonValue: private::Sealed {
    #[doc(hidden)]
    fn into_json_value(self) -> JsonValue;
}

/// Types that can also be stored inside a nested object. Array types do
/// not implement it: nested objects hold scalars only.
pub trait ScalarValue: IntoJsonValue {}

macro_rules! impl_value {
    (@kind $ty:ty, scalar) => {
        impl ScalarValue for $ty {}
    };
    (@kind $ty:ty, array) => {};
    ($ty:ty, $kind:ident, |$v:ident| $body:expr) => {
        impl private::Sealed for $ty {}
        impl IntoJsonValue for $ty {
            fn into_json_value(self) -> JsonValue {
                let $v = self;
                $body
            }
        }
        impl_value!(@kind $ty, $kind);
    };
}

impl_value!(i64, scalar, |v| JsonValue::Integer(v));
impl_value!(i32, scalar, |v| JsonValue::Integer(i64::from(v)));
impl_value!(u32, scalar, |v| JsonValue::Integer(i64::from(v)));
impl_value!(f64, scalar, |v| JsonValue::Float(v));
impl_value!(f32, scalar, |v| JsonValue::Float(f64::from(v)));
impl_value!(bool, scalar, |v| JsonValue::Bool(v));
impl_value!(String, scalar, |v| JsonValue::String(v));
impl_value!(&str, scalar, |v| JsonValue::String(v.to_owned()));
impl_value!(&String, scalar, |v| JsonValue::String(v.clone()));

impl_value!(Vec<i64>, array, |v| JsonValue::IntegerArray(v));
impl_value!(&[i64], array, |v| JsonValue::IntegerArray(v.to_vec()));
impl_value!(Vec<i32>, array, |v| JsonValue::IntegerArray(
    v.into_iter().map(i64::from).collect()
));
impl_value!(Vec<String>, array, |v| JsonValue::StringArray(v));
impl_value!(&[String], array, |v| JsonValue::StringArray(v.to_vec()));
impl_value!(Vec<&str>, array, |v| JsonValue::StringArray(
    v.into_iter().map(str::to_owned).collect()
));
impl_value!(&[&str], array, |v| JsonValue::StringArray(
    v.iter().map(|s| (*s).to_owned()).collect()
));

/// `None` is stored as `null`.
impl<T: IntoJsonValue> private::Sealed for Option<T> {}

impl<T: IntoJsonValue> IntoJsonValue for Option<T> {
    fn into_json_value(self) -> JsonValue {
        match self {
            Some(v) => v.into_json_value(),
            None => JsonValue::Null,
        }
    }
}

impl<T: ScalarValue> ScalarValue for Option<T> {}
