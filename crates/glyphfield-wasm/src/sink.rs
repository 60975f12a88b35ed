use glyphfield_core::uniforms::{UniformSink, UniformSlot};
use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;

/// Writes uniforms into a JS material's uniform table. Existing entries get
/// their `value` field set; missing ones are added as `{ value }`.
pub(crate) struct MaterialUniforms<'a> {
    target: &'a JsValue,
    error: Option<JsValue>,
}

impl<'a> MaterialUniforms<'a> {
    pub(crate) fn new(target: &'a JsValue) -> Self {
        Self { target, error: None }
    }

    /// First error hit while writing, if any.
    pub(crate) fn finish(self) -> Result<(), JsValue> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn write(&self, name: &str, value: f32) -> Result<(), JsValue> {
        let key = JsValue::from_str(name);
        let value_key = JsValue::from_str("value");
        let entry = Reflect::get(self.target, &key)?;
        if entry.is_object() {
            Reflect::set(&entry, &value_key, &JsValue::from(value))?;
        } else {
            let entry = Object::new();
            Reflect::set(&entry, &value_key, &JsValue::from(value))?;
            Reflect::set(self.target, &key, &entry)?;
        }
        Ok(())
    }
}

impl UniformSink for MaterialUniforms<'_> {
    fn set_uniform(&mut self, slot: UniformSlot, value: f32) {
        let Some(name) = slot.name() else {
            return;
        };
        if let Err(err) = self.write(name, value) {
            self.error.get_or_insert(err);
        }
    }
}
