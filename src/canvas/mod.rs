//! The ordered drop target holding placed components.

pub mod palette;

use log::debug;
use std::collections::BTreeMap;
use uuid::Uuid;

use self::palette::PaletteItem;
use crate::error::BuilderError;
use crate::strategy::schema::{schema_for, FieldSpec};
use crate::strategy::types::{first_line, ComponentKind, ComponentType};

/// A schema field together with its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigField {
    pub spec: &'static FieldSpec,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedComponent {
    pub id: Uuid,
    pub kind: ComponentKind,
    pub display_name: String,
    /// Attached once at drop time, in schema order.
    pub fields: Vec<ConfigField>,
}

impl PlacedComponent {
    fn configure(kind: ComponentKind, display_name: String) -> Self {
        let fields = schema_for(kind)
            .iter()
            .map(|spec| ConfigField {
                spec,
                value: spec.default_value(),
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            kind,
            display_name,
            fields,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    pub fn field(&self, key: &str) -> Option<&ConfigField> {
        let key = key.trim().to_lowercase();
        self.fields.iter().find(|f| f.spec.key() == key)
    }

    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), BuilderError> {
        let wanted = key.trim().to_lowercase();
        let display_name = &self.display_name;
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.spec.key() == wanted)
            .ok_or_else(|| BuilderError::UnknownField {
                component: display_name.clone(),
                field: key.to_string(),
            })?;
        field.value = field.spec.check(value)?;
        Ok(())
    }

    /// Current values keyed by lower-cased label.
    pub fn extract_config(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.spec.key(), f.value.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    components: Vec<PlacedComponent>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn components(&self) -> &[PlacedComponent] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Accept a dropped palette item, attaching its configuration form.
    ///
    /// Unknown types and indicators are rejected and leave the canvas as it was.
    pub fn drop_item(&mut self, item: &PaletteItem) -> Result<&PlacedComponent, BuilderError> {
        let kind = ComponentKind::resolve(&item.data_type, &item.text)?;
        let component = PlacedComponent::configure(kind, first_line(&item.text).to_string());
        debug!(
            "Placed {} '{}' ({} fields) at position {}",
            component.component_type(),
            component.display_name,
            component.fields.len(),
            self.components.len()
        );
        self.components.push(component);
        Ok(&self.components[self.components.len() - 1])
    }

    /// Re-create a component from saved values, e.g. when reopening a draft.
    ///
    /// `config` must hold exactly the schema's keys; nothing falls back to a
    /// default. The canvas is unchanged on error.
    pub fn restore(
        &mut self,
        data_type: &str,
        name: &str,
        config: &BTreeMap<String, String>,
    ) -> Result<&PlacedComponent, BuilderError> {
        let mut component =
            PlacedComponent::configure(ComponentKind::resolve(data_type, name)?, name.to_string());
        for field in &mut component.fields {
            let key = field.spec.key();
            let value = config.get(&key).ok_or_else(|| {
                BuilderError::ValidationError(format!("'{}' is missing field '{}'", name, key))
            })?;
            field.value = field.spec.check(value)?;
        }
        if let Some(extra) = config.keys().find(|k| component.field(k).is_none()) {
            return Err(BuilderError::UnknownField {
                component: name.to_string(),
                field: extra.clone(),
            });
        }
        self.components.push(component);
        Ok(&self.components[self.components.len() - 1])
    }

    pub fn get(&self, id: Uuid) -> Option<&PlacedComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    fn position(&self, id: Uuid) -> Result<usize, BuilderError> {
        self.components
            .iter()
            .position(|c| c.id == id)
            .ok_or(BuilderError::ComponentNotFound(id))
    }

    pub fn set_field(&mut self, id: Uuid, key: &str, value: &str) -> Result<(), BuilderError> {
        let idx = self.position(id)?;
        self.components[idx].set_field(key, value)
    }

    pub fn remove_component(&mut self, id: Uuid) -> Result<PlacedComponent, BuilderError> {
        let idx = self.position(id)?;
        Ok(self.components.remove(idx))
    }

    /// Move a component to `index`, clamped to the end of the canvas.
    pub fn move_component(&mut self, id: Uuid, index: usize) -> Result<(), BuilderError> {
        let idx = self.position(id)?;
        let component = self.components.remove(idx);
        let target = index.min(self.components.len());
        self.components.insert(target, component);
        Ok(())
    }
}
