//! Attached actions as tagged command values with one uniform call contract.

use serde::Serialize;
use serde_json::Value;

use crate::event::Direction;
use crate::item::ItemContext;
use crate::page::PageId;

/// Why an action is being invoked, passed to every callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Invocation {
    Trigger,
    Rotate { direction: Direction, amount: u32 },
    Tap { x: u32, y: u32 },
    Swipe { direction: Direction },
}

/// Requests an action makes of the page manager. Applied after the item call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerRequest {
    GoTo(PageId),
    Back,
    SetBrightness(u8),
}

type Handler = Box<dyn Fn(&Invocation, &Value) -> anyhow::Result<()>>;

/// Named handler plus the argument record bound at attach time.
pub struct Callback {
    name: String,
    args: Value,
    handler: Handler,
}

impl Callback {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &Value {
        &self.args
    }

    pub fn call(&self, invocation: &Invocation) -> anyhow::Result<()> {
        (self.handler)(invocation, &self.args)
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Something an item does after its state cycle.
#[derive(Debug)]
pub enum Action {
    GoTo(PageId),
    Back,
    Brightness(u8),
    Call(Callback),
}

impl Action {
    /// Bind a handler to an argument record.
    pub fn call<F>(name: impl Into<String>, args: Value, handler: F) -> Self
    where
        F: Fn(&Invocation, &Value) -> anyhow::Result<()> + 'static,
    {
        Self::Call(Callback {
            name: name.into(),
            args,
            handler: Box::new(handler),
        })
    }

    /// Handler with no bound arguments.
    pub fn from_fn<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Invocation) -> anyhow::Result<()> + 'static,
    {
        Self::call(name, Value::Null, move |invocation, _| handler(invocation))
    }

    pub fn navigation_target(&self) -> Option<PageId> {
        match self {
            Self::GoTo(id) => Some(*id),
            _ => None,
        }
    }

    /// Run the action. Callback failures are logged, never propagated.
    pub(crate) fn invoke(&self, invocation: &Invocation, ctx: &mut ItemContext<'_>) {
        match self {
            Self::GoTo(id) => ctx.request(ManagerRequest::GoTo(*id)),
            Self::Back => ctx.request(ManagerRequest::Back),
            Self::Brightness(percent) => ctx.request(ManagerRequest::SetBrightness(*percent)),
            Self::Call(callback) => {
                tracing::debug!(action = callback.name(), ?invocation, "invoking action");
                if let Err(err) = callback.call(invocation) {
                    tracing::warn!(
                        action = callback.name(),
                        error = %format!("{err:#}"),
                        "action failed"
                    );
                }
            }
        }
    }
}

/// Merge an invocation with bound arguments into one flat JSON object.
///
/// Bound arguments win on key collisions. Non-object argument records are
/// exposed under `"args"`.
pub fn invocation_fields(invocation: &Invocation, args: &Value) -> serde_json::Map<String, Value> {
    let mut fields = match serde_json::to_value(invocation) {
        Ok(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    if let Invocation::Rotate { direction, .. } = invocation {
        let sign = match direction {
            Direction::Left => "-",
            Direction::Right => "+",
        };
        fields.insert("sign".to_string(), Value::from(sign));
    }
    match args {
        Value::Object(map) => {
            for (key, value) in map {
                fields.insert(key.clone(), value.clone());
            }
        }
        Value::Null => {}
        other => {
            fields.insert("args".to_string(), other.clone());
        }
    }
    fields
}
