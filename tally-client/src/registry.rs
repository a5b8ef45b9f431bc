use std::collections::HashMap;

use futures::future::BoxFuture;
use serde_json::Value;
use tally_lib::error::TallyError;

/// Whether invoking a method reads remote state or mutates it. Change calls
/// are the ones that can move balances and deserve a measurement around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    View,
    Change,
}

type InvokeFn<C> = Box<dyn Fn(C, Value) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync>;

struct Method<C> {
    kind: MethodKind,
    invoke: InvokeFn<C>,
}

/// Lookup table from method-name string to a typed async invocation closure
/// over a cloneable client handle, built once at startup. Dispatching an
/// unregistered name is the typed [`TallyError::UnknownMethod`] error, not a
/// runtime property-access failure.
pub struct MethodRegistry<C> {
    methods: HashMap<&'static str, Method<C>>,
}

impl<C: Clone> MethodRegistry<C> {
    pub fn new() -> Self {
        MethodRegistry {
            methods: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: &'static str, kind: MethodKind, invoke: F) -> &mut Self
    where
        F: Fn(C, Value) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync + 'static,
    {
        self.methods.insert(
            name,
            Method {
                kind,
                invoke: Box::new(invoke),
            },
        );
        self
    }

    pub fn kind(&self, name: &str) -> Option<MethodKind> {
        self.methods.get(name).map(|method| method.kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }

    pub async fn invoke(&self, client: &C, name: &str, args: Value) -> anyhow::Result<Value> {
        let method = self
            .methods
            .get(name)
            .ok_or_else(|| TallyError::UnknownMethod(name.to_string()))?;
        (method.invoke)(client.clone(), args).await
    }
}

impl<C: Clone> Default for MethodRegistry<C> {
    fn default() -> Self {
        MethodRegistry::new()
    }
}
