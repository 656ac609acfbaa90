//! Test utilities for weft-application tests
//!
//! `MapProvider` is a real, minimal binding store: fixed values, explicit
//! absent bindings, failing bindings, and bindings that build through a
//! descriptor in the caller's resolution context. An unbound key is reported
//! as a missing dependency. It records every
//! `get_instance` call so tests can assert what was requested.
//!
//! `Recorder` is a target type whose members write what they received into
//! an event log.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use weft_application::{Provider, ResolutionStack, TypeDescriptor};
use weft_domain::metadata::{
    ConstructorMeta, FieldMeta, Instance, MethodMeta, ParamMeta, TypeExpr, downcast_target,
};
use weft_domain::value_objects::TypeIdentity;
use weft_domain::{InjectionError, InvokeError, ProviderError};

pub enum Entry {
    Value(Instance),
    Absent,
    Fail(String),
    Build(Arc<TypeDescriptor>),
}

#[derive(Default)]
pub struct MapProvider {
    entries: HashMap<TypeIdentity, Entry>,
    calls: Mutex<Vec<TypeIdentity>>,
}

impl MapProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value<T: Any + Send + Sync>(mut self, key: TypeIdentity, value: T) -> Self {
        self.entries.insert(key, Entry::Value(Arc::new(value)));
        self
    }

    pub fn absent(mut self, key: TypeIdentity) -> Self {
        self.entries.insert(key, Entry::Absent);
        self
    }

    pub fn failing(mut self, key: TypeIdentity, message: &str) -> Self {
        self.entries.insert(key, Entry::Fail(message.to_string()));
        self
    }

    pub fn building(mut self, key: TypeIdentity, descriptor: TypeDescriptor) -> Self {
        self.entries.insert(key, Entry::Build(Arc::new(descriptor)));
        self
    }

    pub fn calls(&self) -> Vec<TypeIdentity> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, key: &TypeIdentity) -> usize {
        self.calls.lock().unwrap().iter().filter(|k| *k == key).count()
    }
}

impl Provider for MapProvider {
    fn is_bound(&self, key: &TypeIdentity) -> bool {
        self.entries.contains_key(key)
    }

    fn get_instance(
        &self,
        key: &TypeIdentity,
        stack: &mut ResolutionStack,
    ) -> Result<Option<Instance>, ProviderError> {
        self.calls.lock().unwrap().push(key.clone());
        match self.entries.get(key) {
            Some(Entry::Value(value)) => Ok(Some(Arc::clone(value))),
            Some(Entry::Absent) => Ok(None),
            None => Err(InjectionError::missing(key).into()),
            Some(Entry::Fail(message)) => Err(ProviderError::failed(message.clone())),
            Some(Entry::Build(descriptor)) => Ok(Some(descriptor.materialize_in(self, stack)?)),
        }
    }
}

/// Dependency value with a label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(pub &'static str);

/// Target whose members log what they receive
#[derive(Default)]
pub struct Recorder {
    pub events: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

/// Event log of an instance created from a `Recorder` constructor
pub fn events_of(instance: &Instance) -> Vec<String> {
    instance
        .downcast_ref::<Recorder>()
        .map(Recorder::events)
        .unwrap_or_default()
}

fn describe(value: Option<&Instance>) -> String {
    match value {
        Some(value) => value
            .downcast_ref::<Token>()
            .map_or_else(|| "?".to_string(), |token| token.0.to_string()),
        None => "none".to_string(),
    }
}

/// Public no-argument `Recorder` constructor
pub fn recorder_constructor() -> ConstructorMeta {
    ConstructorMeta::default_of::<Recorder>()
}

/// Marked `Recorder` constructor taking the given parameters
pub fn recording_constructor(params: Vec<ParamMeta>) -> ConstructorMeta {
    params.into_iter().fold(
        ConstructorMeta::new(|args| {
            let recorder = Recorder::default();
            let received: Vec<String> = (0..args.len())
                .map(|i| args.raw(i).map(describe))
                .collect::<Result<_, _>>()?;
            recorder.push(format!("new({})", received.join(",")));
            Ok(Arc::new(recorder) as Instance)
        })
        .inject(),
        ConstructorMeta::param,
    )
}

/// Unmarked `Recorder` field that logs assignments as `name=value`
pub fn recording_field(name: &'static str, ty: TypeExpr) -> FieldMeta {
    FieldMeta::new(name, ty, move |target, value| {
        let recorder = downcast_target::<Recorder>(target)?;
        recorder.push(format!("{name}={}", describe(value.as_ref())));
        Ok(())
    })
}

/// Unmarked `Recorder` method that logs calls as `name(args)`
pub fn recording_method(name: &'static str, params: Vec<ParamMeta>) -> MethodMeta {
    params.into_iter().fold(
        MethodMeta::new(name, move |target, args| {
            let recorder = downcast_target::<Recorder>(target)?;
            let received: Vec<String> = (0..args.len())
                .map(|i| args.raw(i).map(describe))
                .collect::<Result<_, _>>()?;
            recorder.push(format!("{name}({})", received.join(",")));
            Ok(())
        }),
        MethodMeta::param,
    )
}

/// Static method that logs calls into `log`
pub fn static_method(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> MethodMeta {
    MethodMeta::new(name, move |target, args| {
        if target.is_some() {
            return Err(InvokeError::access("static method received a receiver"));
        }
        let received: Vec<String> = (0..args.len())
            .map(|i| args.raw(i).map(describe))
            .collect::<Result<_, _>>()?;
        log.lock().unwrap().push(format!("{name}({})", received.join(",")));
        Ok(())
    })
    .as_static()
}

pub fn param(name: &str, class: &str) -> ParamMeta {
    ParamMeta::new(name, TypeExpr::class(class))
}
