use crate::{types::TypeDescription, value::Value};
use parking_lot::RwLock;
use std::{
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

struct ObjectInstance {
    runtime_type: TypeDescription,
    fields: RwLock<HashMap<String, Value>>,
}

/// A shared reference to a heap object. Equality is reference identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<ObjectInstance>);

impl ObjectRef {
    pub fn new(runtime_type: TypeDescription) -> Self {
        Self::with_fields(runtime_type, std::iter::empty::<(String, Value)>())
    }

    pub fn with_fields<K: Into<String>>(
        runtime_type: TypeDescription,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Self(Arc::new(ObjectInstance {
            runtime_type,
            fields: RwLock::new(fields.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }))
    }

    pub fn runtime_type(&self) -> TypeDescription {
        self.0.runtime_type
    }

    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.0.fields.read().get(name).cloned()
    }

    pub fn set_field(&self, name: impl Into<String>, value: Value) {
        self.0.fields.write().insert(name.into(), value);
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:p}", self.0.runtime_type, Arc::as_ptr(&self.0))
    }
}
